//! Letters and the letter arena
//!
//! A `Letter` is an immutable named building block: a homogeneous form in
//! the representation coordinates and the frame. Letters live in an
//! `Alphabet` arena and are referenced everywhere else by stable `LetterId`
//! indices, so composites never hold pointers into the table.

use std::collections::HashMap;
use std::fmt;

use crate::symbolic::Form;
use crate::FormsError;

/// Stable index of a letter inside its `Alphabet`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterId(pub(crate) u32);

impl LetterId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Named symbolic building block with a well-defined wedge degree.
#[derive(Clone, Debug)]
pub struct Letter {
    name: String,
    display_name: String,
    expression: Form,
    degree: usize,
}

impl Letter {
    /// Identifier used for lookups.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used when rendering composites.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The letter's defining expression.
    pub fn expression(&self) -> &Form {
        &self.expression
    }

    /// Wedge degree of the defining expression.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Arena of letters, ordered by definition.
#[derive(Clone, Debug, Default)]
pub struct Alphabet {
    letters: Vec<Letter>,
    by_name: HashMap<String, LetterId>,
}

impl Alphabet {
    /// Empty alphabet.
    pub fn new() -> Alphabet {
        Alphabet::default()
    }

    /// Define a letter. The expression must be non-zero and homogeneous;
    /// its wedge degree becomes the letter's degree.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        expression: Form,
    ) -> Result<LetterId, FormsError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(FormsError::InvalidLetter(format!(
                "letter `{name}` is already defined"
            )));
        }
        if expression.is_zero() {
            return Err(FormsError::InvalidLetter(format!(
                "letter `{name}` has a zero expression"
            )));
        }
        let degree = expression.grade().ok_or_else(|| {
            FormsError::InvalidLetter(format!("letter `{name}` is not homogeneous"))
        })?;
        let id = LetterId(self.letters.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.letters.push(Letter {
            name,
            display_name: display_name.into(),
            expression,
            degree,
        });
        Ok(id)
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True iff no letters are defined.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letter by id.
    pub fn get(&self, id: LetterId) -> &Letter {
        &self.letters[id.index()]
    }

    /// Letter id by name.
    pub fn lookup(&self, name: &str) -> Option<LetterId> {
        self.by_name.get(name).copied()
    }

    /// All ids in definition order.
    pub fn ids(&self) -> impl Iterator<Item = LetterId> + '_ {
        (0..self.letters.len() as u32).map(LetterId)
    }

    /// All letters in definition order.
    pub fn letters(&self) -> impl Iterator<Item = &Letter> {
        self.letters.iter()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
