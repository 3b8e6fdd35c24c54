//! One growth pass at one representative point
//!
//! Rebuild the evaluated spaces from the composites already known, seed the
//! length-1 pool from the letters, then repeatedly extend accepted
//! composites by one letter. The append-ordering restriction (never append
//! a letter smaller than the last factor) keeps every produced tuple
//! non-decreasing, so each product is derived exactly once; the eligibility
//! filter prunes any candidate with an unknown one-shorter restriction, in
//! the manner of candidate pruning in frequent-itemset search.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::composite::Composite;
use crate::symbolic::{Form, Ratio};
use crate::FormsError;

use super::{GrowthEngine, GrowthPhase};

impl GrowthEngine<'_> {
    /// Evaluate every letter at the active point.
    pub(super) fn load_letter_values(&mut self, orbit: crate::orbit::OrbitType) -> Result<(), FormsError> {
        let point = self.rep.point(orbit);
        self.letter_values = self
            .alphabet
            .letters()
            .map(|letter| point.apply(letter.expression()))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Wedge of the factors' values at the active point.
    pub(super) fn evaluate(&self, composite: &Composite) -> Form {
        let mut out = Form::scalar(Ratio::one());
        for &id in composite.factors() {
            out = out.wedge(&self.letter_values[id.index()]);
        }
        out
    }

    /// One full growth pass at the phase's representative point.
    pub(super) fn pass(&mut self, phase: GrowthPhase) -> Result<(), FormsError> {
        debug!(?phase, "growth pass");
        self.load_letter_values(phase.orbit())?;
        self.rebuild_spaces();
        self.seed_singletons();

        // Length-1 generators drive every extension; the pool is fixed once
        // seeding is done.
        let extenders: Vec<crate::alphabet::LetterId> = self
            .pools
            .first()
            .map(|pool| pool.iter().filter_map(Composite::last_factor).collect())
            .unwrap_or_default();

        let mut length = 1usize;
        loop {
            if let Some(bound) = self.config.max_length {
                if length >= bound {
                    debug!(length, "length bound exhausted");
                    break;
                }
            }
            let parents: Vec<Composite> = match self.pools.get(length - 1) {
                Some(pool) if !pool.is_empty() => pool.iter().cloned().collect(),
                _ => break,
            };

            let mut batches: BTreeMap<usize, Vec<(Composite, Form)>> = BTreeMap::new();
            for parent in &parents {
                let Some(last) = parent.last_factor() else {
                    continue;
                };
                for &id in extenders.iter().filter(|&&id| id >= last) {
                    let candidate = parent.extended(id);
                    if !self.eligible(&candidate, length) {
                        continue;
                    }
                    let degree = candidate.degree(self.alphabet);
                    if degree > self.config.max_degree {
                        continue;
                    }
                    let value = match self.pool_values.get(parent) {
                        Some(parent_value) => parent_value.wedge(&self.letter_values[id.index()]),
                        None => self.evaluate(&candidate),
                    };
                    if value.is_zero() || self.spaces[degree].contains(&value) {
                        continue;
                    }
                    batches.entry(degree).or_default().push((candidate, value));
                }
            }

            let mut accepted = 0usize;
            for (degree, batch) in batches {
                let forms: Vec<Form> = batch.iter().map(|(_, form)| form.clone()).collect();
                let kept = self.spaces[degree].insert_batch(&forms);
                for ((candidate, value), keep) in batch.into_iter().zip(kept) {
                    if !keep {
                        continue;
                    }
                    trace!(
                        degree,
                        length = candidate.length(),
                        composite = %candidate.display(self.alphabet),
                        "accepted composite"
                    );
                    self.accept(candidate, degree, value);
                    accepted += 1;
                }
            }
            debug!(length = length + 1, accepted, "growth round finished");
            // Keep walking as long as a longer pool exists: a pass may
            // revisit lengths inherited from an earlier point even when this
            // round accepted nothing new.
            length += 1;
        }
        Ok(())
    }

    /// Discard point-specific numeric content and re-evaluate every known
    /// composite at the active point. The composite pools persist.
    fn rebuild_spaces(&mut self) {
        for space in &mut self.spaces {
            *space = crate::span::Span::new();
        }
        self.pool_values.clear();
        for degree in 0..self.degree_bases.len() {
            let composites: Vec<Composite> = self.degree_bases[degree].clone();
            for composite in composites {
                let value = self.evaluate(&composite);
                self.spaces[degree].insert(&value);
                self.pool_values.insert(composite, value);
            }
        }
    }

    /// Seed length 1: every letter whose singleton is independent at the
    /// active point joins the pool; the first non-zero degree-0 value is
    /// recorded into the invariant-function slot.
    fn seed_singletons(&mut self) {
        for id in self.alphabet.ids().collect::<Vec<_>>() {
            let singleton = Composite::singleton(id);
            if self
                .pools
                .first()
                .map(|pool| pool.contains(&singleton))
                .unwrap_or(false)
            {
                continue;
            }
            let degree = self.alphabet.get(id).degree();
            if degree > self.config.max_degree {
                trace!(letter = self.alphabet.get(id).name(), "letter exceeds degree bound");
                continue;
            }
            let value = self.letter_values[id.index()].clone();
            if degree == 0 && !value.is_zero() && self.slot.is_none() {
                debug!(letter = self.alphabet.get(id).name(), "invariant function found");
                self.slot = Some(singleton.clone());
            }
            if self.spaces[degree].insert(&value) {
                trace!(
                    letter = self.alphabet.get(id).name(),
                    degree,
                    "accepted singleton"
                );
                self.accept(singleton, degree, value);
            }
        }
    }

    /// Anti-monotonicity test: a length-(l+1) candidate is eligible iff it is
    /// not already registered and every one-deletion sub-tuple is a known
    /// length-l generator.
    fn eligible(&self, candidate: &Composite, parent_length: usize) -> bool {
        if self
            .pools
            .get(parent_length)
            .map(|pool| pool.contains(candidate))
            .unwrap_or(false)
        {
            return false;
        }
        let Some(pool) = self.pools.get(parent_length - 1) else {
            return false;
        };
        candidate.deletions().all(|sub| pool.contains(&sub))
    }

    fn accept(&mut self, composite: Composite, degree: usize, value: Form) {
        self.pool_entry(composite.length()).insert(composite.clone());
        self.degree_bases[degree].push(composite.clone());
        self.pool_values.insert(composite, value);
    }

    fn pool_entry(&mut self, length: usize) -> &mut BTreeSet<Composite> {
        while self.pools.len() < length {
            self.pools.push(BTreeSet::new());
        }
        &mut self.pools[length - 1]
    }
}
