//! Composite elements and composite expressions
//!
//! A `Composite` is an ordered tuple of letter indices standing for a formal
//! wedge product. Growth only ever produces tuples that are non-decreasing
//! in letter order, and the derived lexicographic `Ord` (prefixes compare
//! smaller) is exactly the canonical order the generator pools rely on.
//!
//! `CompositeExpr` is the notation layer: arbitrary algebraic combinations
//! of composites (sums, scalar multiples, products, integer powers) that can
//! be structurally expanded back into forms.

use std::fmt;

use crate::alphabet::{Alphabet, LetterId};
use crate::symbolic::{Form, Ratio};

/// Ordered tuple of letters, the atomic unit of every returned basis.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composite {
    factors: Vec<LetterId>,
}

impl Composite {
    /// Single-letter composite.
    pub fn singleton(letter: LetterId) -> Composite {
        Composite {
            factors: vec![letter],
        }
    }

    /// Copy with one more factor appended.
    pub fn extended(&self, letter: LetterId) -> Composite {
        let mut factors = self.factors.clone();
        factors.push(letter);
        Composite { factors }
    }

    /// Number of factors.
    pub fn length(&self) -> usize {
        self.factors.len()
    }

    /// Factors in product order.
    pub fn factors(&self) -> &[LetterId] {
        &self.factors
    }

    /// Last factor; composites produced by growth are never empty.
    pub fn last_factor(&self) -> Option<LetterId> {
        self.factors.last().copied()
    }

    /// Sum of the factors' wedge degrees.
    pub fn degree(&self, alphabet: &Alphabet) -> usize {
        self.factors
            .iter()
            .map(|&id| alphabet.get(id).degree())
            .sum()
    }

    /// All length-(n-1) sub-tuples obtained by deleting one factor, keeping
    /// the relative order of the rest.
    pub fn deletions(&self) -> impl Iterator<Item = Composite> + '_ {
        (0..self.factors.len()).map(move |skip| {
            let factors = self
                .factors
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &id)| id)
                .collect();
            Composite { factors }
        })
    }

    /// The literal wedge product of the factors' defining expressions, in
    /// representation coordinates.
    pub fn ambient_product(&self, alphabet: &Alphabet) -> Form {
        let mut out = Form::scalar(Ratio::one());
        for &id in &self.factors {
            out = out.wedge(alphabet.get(id).expression());
        }
        out
    }

    /// Render with the letters' display names.
    pub fn display<'a>(&'a self, alphabet: &'a Alphabet) -> CompositeDisplay<'a> {
        CompositeDisplay {
            composite: self,
            alphabet,
        }
    }
}

/// Display adapter joining factor display names.
#[derive(Debug)]
pub struct CompositeDisplay<'a> {
    composite: &'a Composite,
    alphabet: &'a Alphabet,
}

impl fmt::Display for CompositeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for &id in self.composite.factors() {
            if !first {
                f.write_str("·")?;
            }
            first = false;
            f.write_str(self.alphabet.get(id).display_name())?;
        }
        Ok(())
    }
}

/// Algebraic combination of composites.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CompositeExpr {
    /// The zero expression.
    Zero,
    /// A bare scalar.
    Scalar(Ratio),
    /// A single composite.
    Atom(Composite),
    /// Scalar multiple of a sub-expression.
    Scaled(Ratio, Box<CompositeExpr>),
    /// Sum of sub-expressions.
    Sum(Vec<CompositeExpr>),
    /// Non-commutative product of sub-expressions.
    Product(Vec<CompositeExpr>),
    /// Integer wedge power of a sub-expression.
    Power(Box<CompositeExpr>, u32),
}

impl CompositeExpr {
    /// Structurally rewrite the expression into a form by replacing every
    /// composite leaf with the literal product of its letters' expressions.
    /// Valid for arbitrary combinations, not only basis elements.
    pub fn expand(&self, alphabet: &Alphabet) -> Form {
        match self {
            CompositeExpr::Zero => Form::zero(),
            CompositeExpr::Scalar(value) => Form::scalar(value.clone()),
            CompositeExpr::Atom(composite) => composite.ambient_product(alphabet),
            CompositeExpr::Scaled(factor, inner) => inner.expand(alphabet).scale(factor),
            CompositeExpr::Sum(terms) => terms
                .iter()
                .fold(Form::zero(), |acc, t| acc.add(&t.expand(alphabet))),
            CompositeExpr::Product(factors) => factors
                .iter()
                .fold(Form::scalar(Ratio::one()), |acc, t| {
                    acc.wedge(&t.expand(alphabet))
                }),
            CompositeExpr::Power(inner, exponent) => inner.expand(alphabet).wedge_pow(*exponent),
        }
    }
}
