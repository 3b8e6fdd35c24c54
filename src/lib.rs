//! # Invariant differential forms on associated bundles
//!
//! This library computes a basis for the space of G-invariant differential
//! forms on an associated bundle G ×_H V, given a finite alphabet of named
//! building blocks ("letters", symbolic expressions in the coordinates of V
//! and the frame of G) and a bound on the wedge degree.
//!
//! ## Core Algorithm
//!
//! 1. **Growth at the special point**: seed singleton composites from the
//!    letters and extend accepted composites one letter at a time, testing
//!    linear independence at the most degenerate point of the representation
//! 2. **Growth at the principal point**: repeat at a fixed generic-looking
//!    point, reusing and extending the same generator pools
//! 3. **Rebasing at the generic point**: re-evaluate every accepted
//!    composite along a one-parameter ray (the only point that keeps a free
//!    radial symbol) and install those evaluations as the authoritative
//!    per-degree bases
//!
//! Candidate products are pruned by an anti-monotonicity filter (every
//! one-shorter restriction must already be an accepted generator) and by an
//! append-ordering restriction that derives each product exactly once, so
//! the search stays far from the combinatorial explosion of raw products.
//!
//! ## Usage Example
//!
//! ```ignore
//! use cartan::{reps, BuildConfig, InvariantForms};
//!
//! let table = reps::su3_so3_r3()?;
//! let forms = InvariantForms::construct(table.alphabet, table.info, BuildConfig::up_to_degree(4))?;
//! for degree in 0..=4 {
//!     println!("degree {degree}: dim {}", forms.p_forms(degree).len());
//! }
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements a key component of the construction
pub mod alphabet;  // Letters and the letter arena
pub mod composite; // Composite elements and composite expressions
pub mod orbit;     // Representative points and representation data
pub mod reps;      // Concrete representation tables
pub mod span;      // Incremental linear spans of evaluated forms
pub mod symbolic;  // Minimal symbolic backend

mod builder; // Growth passes and rebasing

// Re-exports for convenience
pub use alphabet::{Alphabet, Letter, LetterId};
pub use composite::{Composite, CompositeExpr};
pub use orbit::{OrbitType, RepresentationInfo, RepresentativePoint};
pub use span::{Span, SpanError};
pub use symbolic::{Blade, Form, Monomial, Poly, Ratio, Symbol};

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use builder::GrowthEngine;

/// Configuration parameters for one construction run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Largest wedge degree to compute a basis for.
    pub max_degree: usize,

    /// Optional bound on composite length; `None` relies on the degree bound
    /// alone (growth still terminates: every acceptance grows some
    /// finite-dimensional per-degree space).
    pub max_length: Option<usize>,
}

impl BuildConfig {
    /// Configuration with only a degree bound.
    pub fn up_to_degree(max_degree: usize) -> Self {
        Self {
            max_degree,
            max_length: None,
        }
    }
}

/// Errors that can occur during construction and queries.
///
/// The algorithm is deterministic: every failure reflects a structural
/// problem with the inputs, never a transient condition, so nothing here is
/// retried.
#[derive(Error, Debug)]
pub enum FormsError {
    /// A letter definition was rejected (zero or inhomogeneous expression,
    /// duplicate name).
    #[error("invalid letter: {0}")]
    InvalidLetter(String),

    /// Malformed configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A form does not lie in the span of the computed basis: it is not
    /// invariant at the expected degree, or `max_degree` was set too low.
    #[error("form of degree {degree} is not in the span of the computed basis")]
    NotInSpan {
        /// Wedge degree of the offending homogeneous component.
        degree: usize,
    },

    /// A non-zero scalar term appeared mixed with higher-degree terms.
    #[error("a non-zero scalar term is mixed with higher-degree terms")]
    MixedScalarTerm,

    /// No non-zero invariant function was found at any representative point;
    /// the representation data is inconsistent.
    #[error("the degree-0 invariant-function slot is empty or zero")]
    EmptyInvariantSlot,

    /// A denominator vanished under a representative-point substitution.
    #[error("expression is undefined at the representative point")]
    UndefinedAtPoint,

    /// An accepted composite basis became linearly dependent when
    /// re-evaluated at the generic point; the representation data violates
    /// the specialisation premise.
    #[error("rebasing failed: generator {index} of degree {degree} is dependent at the generic point")]
    DependentRebasing {
        /// Degree whose basis failed to rebase.
        degree: usize,
        /// Position of the dependent generator in that degree's basis.
        index: usize,
    },
}

/// The finished, read-only invariant-form algebra.
///
/// Constructed in one shot by [`InvariantForms::construct`]; afterwards the
/// object only answers queries, so it is safe to share across threads for
/// concurrent reads.
#[derive(Debug)]
pub struct InvariantForms {
    alphabet: Alphabet,
    rep: RepresentationInfo,
    config: BuildConfig,
    pools: Vec<BTreeSet<Composite>>,
    degree_bases: Vec<Vec<Composite>>,
    spaces: Vec<Span>,
    slot: Option<Composite>,
}

impl InvariantForms {
    /// Run the whole construction: two growth passes (special, then
    /// principal point) followed by the generic-point rebasing.
    pub fn construct(
        alphabet: Alphabet,
        rep: RepresentationInfo,
        config: BuildConfig,
    ) -> Result<InvariantForms, FormsError> {
        if config.max_length == Some(0) {
            return Err(FormsError::InvalidConfig(
                "max_length must be at least 1".to_string(),
            ));
        }

        let constructed = GrowthEngine::new(&alphabet, &rep, &config).run()?;

        let forms = InvariantForms {
            alphabet,
            rep,
            config,
            pools: constructed.pools,
            degree_bases: constructed.degree_bases,
            spaces: constructed.spaces,
            slot: constructed.slot,
        };
        debug!(
            degrees = forms.config.max_degree,
            dimensions = ?(0..=forms.config.max_degree)
                .map(|d| forms.p_forms(d).len())
                .collect::<Vec<_>>(),
            "construction finished"
        );
        Ok(forms)
    }

    /// Composite basis for a degree; empty above anything computed.
    pub fn p_forms(&self, degree: usize) -> &[Composite] {
        self.degree_bases
            .get(degree)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dimension of the evaluated space for a degree.
    pub fn dimension(&self, degree: usize) -> usize {
        self.spaces.get(degree).map(Span::dimension).unwrap_or(0)
    }

    /// The unique (up to scale) degree-0 basis element. Errors when the slot
    /// is empty or its generic evaluation vanishes; both indicate
    /// inconsistent representation inputs.
    pub fn invariant_function(&self) -> Result<&Composite, FormsError> {
        let slot = self.slot.as_ref().ok_or(FormsError::EmptyInvariantSlot)?;
        if self.eval(slot, OrbitType::Generic)?.is_zero() {
            return Err(FormsError::EmptyInvariantSlot);
        }
        Ok(slot)
    }

    /// Evaluate a composite at one of the representative points.
    pub fn eval(&self, composite: &Composite, orbit: OrbitType) -> Result<Form, FormsError> {
        self.rep
            .point(orbit)
            .apply(&composite.ambient_product(&self.alphabet))
    }

    /// Express a form in composite notation against the computed bases.
    ///
    /// The generic-point substitution is applied first, so the input may
    /// still be written in representation coordinates. A homogeneous
    /// degree-0 input comes back as a normalized scalar; any other degree is
    /// decomposed against that degree's evaluated basis and re-expressed
    /// against the corresponding composite basis. Inhomogeneous inputs are
    /// split per degree, except that a non-zero scalar term mixed with
    /// higher-degree terms is an error.
    pub fn to_composite(&self, form: &Form) -> Result<CompositeExpr, FormsError> {
        let evaluated = self.rep.point(OrbitType::Generic).apply(form)?;
        if evaluated.is_zero() {
            return Ok(CompositeExpr::Zero);
        }
        let parts = evaluated.homogeneous_parts();
        if parts.len() > 1 && parts.contains_key(&0) {
            return Err(FormsError::MixedScalarTerm);
        }

        let mut summands = Vec::new();
        for (degree, part) in parts {
            if degree == 0 {
                let value = part
                    .coefficient(&Blade::scalar())
                    .cloned()
                    .unwrap_or_else(Ratio::zero);
                summands.push(CompositeExpr::Scalar(value));
                continue;
            }
            if degree > self.config.max_degree {
                return Err(FormsError::NotInSpan { degree });
            }
            let coefficients = self.spaces[degree]
                .components(&part)
                .map_err(|_| FormsError::NotInSpan { degree })?;
            let mut terms = Vec::new();
            for (coefficient, composite) in
                coefficients.into_iter().zip(&self.degree_bases[degree])
            {
                if coefficient.is_zero() {
                    continue;
                }
                let atom = CompositeExpr::Atom(composite.clone());
                terms.push(if coefficient.is_one() {
                    atom
                } else {
                    CompositeExpr::Scaled(coefficient, Box::new(atom))
                });
            }
            summands.push(match terms.len() {
                0 => CompositeExpr::Zero,
                1 => terms.remove(0),
                _ => CompositeExpr::Sum(terms),
            });
        }
        Ok(match summands.len() {
            1 => summands.remove(0),
            _ => CompositeExpr::Sum(summands),
        })
    }

    /// Structurally rewrite a composite expression into a form by replacing
    /// every composite leaf with the literal product of its letters'
    /// expressions. Valid for arbitrary algebraic combinations of
    /// composites, not only basis elements.
    pub fn from_composite(&self, expr: &CompositeExpr) -> Form {
        expr.expand(&self.alphabet)
    }

    /// Canonical generators of one length, in canonical order.
    pub fn generator_pool(&self, length: usize) -> impl Iterator<Item = &Composite> {
        length
            .checked_sub(1)
            .and_then(|i| self.pools.get(i))
            .into_iter()
            .flatten()
    }

    /// Largest composite length that produced a generator.
    pub fn longest_generator(&self) -> usize {
        self.pools.len()
    }

    /// The letter arena the bases refer to.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The representation the construction ran against.
    pub fn representation(&self) -> &RepresentationInfo {
        &self.rep
    }

    /// Degree bound the construction ran with.
    pub fn max_degree(&self) -> usize {
        self.config.max_degree
    }

    /// Deterministic digest of the computed bases: identical inputs yield an
    /// identical fingerprint.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for (degree, basis) in self.degree_bases.iter().enumerate() {
            hasher.update(&(degree as u64).to_le_bytes());
            hasher.update(&(basis.len() as u64).to_le_bytes());
            for composite in basis {
                for &id in composite.factors() {
                    hasher.update(&(id.index() as u64).to_le_bytes());
                }
                hasher.update(&u64::MAX.to_le_bytes());
            }
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_unbounded_length() {
        let config = BuildConfig::up_to_degree(3);
        assert_eq!(config.max_degree, 3);
        assert!(config.max_length.is_none());
    }

    #[test]
    fn zero_length_bound_is_rejected() {
        let config = BuildConfig {
            max_degree: 1,
            max_length: Some(0),
        };
        let result = InvariantForms::construct(
            Alphabet::new(),
            RepresentationInfo::new(
                RepresentativePoint::new(),
                RepresentativePoint::new(),
                RepresentativePoint::new(),
            ),
            config,
        );
        assert!(matches!(result, Err(FormsError::InvalidConfig(_))));
    }

    #[test]
    fn empty_alphabet_builds_empty_bases() {
        let forms = InvariantForms::construct(
            Alphabet::new(),
            RepresentationInfo::new(
                RepresentativePoint::new(),
                RepresentativePoint::new(),
                RepresentativePoint::new(),
            ),
            BuildConfig::up_to_degree(2),
        )
        .expect("construction succeeds");
        for degree in 0..=2 {
            assert!(forms.p_forms(degree).is_empty());
        }
        assert!(matches!(
            forms.invariant_function(),
            Err(FormsError::EmptyInvariantSlot)
        ));
    }
}
