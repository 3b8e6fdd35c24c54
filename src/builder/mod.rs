//! Construction engine
//!
//! Owns all mutable state of a single construction run: the per-length
//! generator pools, the per-degree composite bases, the per-degree evaluated
//! spaces and the invariant-function slot. The lifecycle is linear and
//! explicit (grow at the special point, grow again at the principal point,
//! then rebase every positive degree at the generic point) and the engine
//! is consumed by the terminal object afterwards, so no phase can run twice.

mod growth;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::composite::Composite;
use crate::orbit::{OrbitType, RepresentationInfo};
use crate::span::{Span, SpanError};
use crate::symbolic::Form;
use crate::{BuildConfig, FormsError};

/// Phases of the three-step lifecycle, in execution order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum GrowthPhase {
    /// First growth pass, at the special point.
    Special,
    /// Second growth pass, at the principal point.
    Principal,
    /// Final rebasing at the generic point.
    Rebase,
}

impl GrowthPhase {
    fn orbit(self) -> OrbitType {
        match self {
            GrowthPhase::Special => OrbitType::Special,
            GrowthPhase::Principal => OrbitType::Principal,
            GrowthPhase::Rebase => OrbitType::Generic,
        }
    }
}

/// Everything the terminal object keeps once construction finishes.
pub(crate) struct Constructed {
    pub(crate) pools: Vec<BTreeSet<Composite>>,
    pub(crate) degree_bases: Vec<Vec<Composite>>,
    pub(crate) spaces: Vec<Span>,
    pub(crate) slot: Option<Composite>,
}

/// Mutable state of one construction run.
pub(crate) struct GrowthEngine<'a> {
    alphabet: &'a Alphabet,
    rep: &'a RepresentationInfo,
    config: &'a BuildConfig,
    /// `pools[l - 1]` is the sorted length-`l` generator pool.
    pools: Vec<BTreeSet<Composite>>,
    /// Per-degree composite bases, `0..=max_degree`; source of truth for the
    /// public result.
    degree_bases: Vec<Vec<Composite>>,
    /// Per-degree evaluated spaces at the currently active point.
    spaces: Vec<Span>,
    /// The invariant-function slot (degree 0).
    slot: Option<Composite>,
    /// Letter evaluations at the currently active point.
    letter_values: Vec<Form>,
    /// Evaluations of accepted composites at the currently active point.
    pool_values: BTreeMap<Composite, Form>,
}

impl<'a> GrowthEngine<'a> {
    pub(crate) fn new(
        alphabet: &'a Alphabet,
        rep: &'a RepresentationInfo,
        config: &'a BuildConfig,
    ) -> GrowthEngine<'a> {
        let degrees = config.max_degree + 1;
        GrowthEngine {
            alphabet,
            rep,
            config,
            pools: Vec::new(),
            degree_bases: vec![Vec::new(); degrees],
            spaces: (0..degrees).map(|_| Span::new()).collect(),
            slot: None,
            letter_values: Vec::new(),
            pool_values: BTreeMap::new(),
        }
    }

    /// Run the whole construction: two growth passes, then the rebasing.
    pub(crate) fn run(mut self) -> Result<Constructed, FormsError> {
        self.pass(GrowthPhase::Special)?;
        self.pass(GrowthPhase::Principal)?;
        self.rebase()?;
        Ok(Constructed {
            pools: self.pools,
            degree_bases: self.degree_bases,
            spaces: self.spaces,
            slot: self.slot,
        })
    }

    /// Install the authoritative evaluated bases at the generic point. The
    /// degree-0 slot is left untouched.
    fn rebase(&mut self) -> Result<(), FormsError> {
        let phase = GrowthPhase::Rebase;
        debug!(?phase, "rebasing accepted composite bases");
        self.load_letter_values(phase.orbit())?;
        for degree in 1..=self.config.max_degree {
            let forms: Vec<Form> = self.degree_bases[degree]
                .iter()
                .map(|c| self.evaluate(c))
                .collect();
            self.spaces[degree]
                .set_basis(forms)
                .map_err(|err| match err {
                    SpanError::DependentGenerator { index } => {
                        FormsError::DependentRebasing { degree, index }
                    }
                    SpanError::NotInSpan => FormsError::NotInSpan { degree },
                })?;
        }
        Ok(())
    }
}
