//! Incremental linear span of evaluated forms
//!
//! One instance per degree. Vectors are `Form`s; elimination runs over the
//! fraction field of the coefficient ring, with blades as coordinates. The
//! span keeps both the accepted generators (in submission order) and a
//! forward-reduced echelon of them, so membership tests and dimension
//! queries stay cheap as generators accumulate.
//!
//! Contract: [`Span::insert_batch`] processes entries strictly in submission
//! order and reports one acceptance flag per entry. The growth loop matches
//! surviving vectors back to their originating composites by position, so
//! this ordering is load-bearing and covered by property tests.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::symbolic::{Blade, Form, Ratio};

/// Errors from span queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpanError {
    /// The queried form is not a linear combination of the basis.
    #[error("form is not in the span of the installed basis")]
    NotInSpan,

    /// An installed generator was linearly dependent on its predecessors.
    #[error("generator {index} is linearly dependent on the preceding basis")]
    DependentGenerator {
        /// Position of the offending generator in the installed list.
        index: usize,
    },
}

/// Forward-reduced row: `entries[pivot] == 1`, and no entry is the pivot of
/// an earlier row.
#[derive(Debug, Clone)]
struct EchelonRow {
    pivot: Blade,
    entries: BTreeMap<Blade, Ratio>,
}

/// Incremental basis of evaluated forms.
#[derive(Debug, Clone, Default)]
pub struct Span {
    basis: Vec<Form>,
    rows: Vec<EchelonRow>,
}

impl Span {
    /// Empty span.
    pub fn new() -> Span {
        Span::default()
    }

    /// Number of independent generators accepted so far.
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    /// Accepted generators in submission order.
    pub fn basis(&self) -> &[Form] {
        &self.basis
    }

    /// Offer a generator. Returns `true` iff the dimension grew, in which
    /// case the form (as submitted) joins the basis.
    pub fn insert(&mut self, form: &Form) -> bool {
        let residue = self.reduce(form);
        let Some((pivot, lead)) = residue.iter().next().map(|(b, c)| (b.clone(), c.clone())) else {
            return false;
        };
        let inv = lead.inv();
        let entries: BTreeMap<Blade, Ratio> = residue
            .into_iter()
            .map(|(blade, coeff)| (blade, coeff.mul(&inv)))
            .collect();
        self.rows.push(EchelonRow { pivot, entries });
        self.basis.push(form.clone());
        true
    }

    /// Offer a batch of generators. Entries are processed strictly in
    /// submission order; the i-th flag reports whether the i-th entry grew
    /// the dimension at the moment it was offered.
    pub fn insert_batch(&mut self, forms: &[Form]) -> Vec<bool> {
        forms.iter().map(|form| self.insert(form)).collect()
    }

    /// True iff the form already lies in the span (the zero form trivially
    /// does).
    pub fn contains(&self, form: &Form) -> bool {
        self.reduce(form).is_empty()
    }

    /// Replace the basis wholesale. Fails if the supplied generators are not
    /// linearly independent.
    pub fn set_basis(&mut self, forms: Vec<Form>) -> Result<(), SpanError> {
        self.basis.clear();
        self.rows.clear();
        for (index, form) in forms.into_iter().enumerate() {
            if !self.insert(&form) {
                return Err(SpanError::DependentGenerator { index });
            }
        }
        Ok(())
    }

    /// Coefficients expressing `form` against the basis, in basis order.
    pub fn components(&self, form: &Form) -> Result<Vec<Ratio>, SpanError> {
        let n = self.basis.len();
        if form.is_zero() {
            return Ok(vec![Ratio::zero(); n]);
        }
        if n == 0 {
            return Err(SpanError::NotInSpan);
        }

        // One row per blade: [basis columns | target], reduced to RREF.
        let mut blades: Vec<Blade> = Vec::new();
        for b in self.basis.iter().flat_map(|f| f.terms().map(|(b, _)| b)) {
            if !blades.contains(b) {
                blades.push(b.clone());
            }
        }
        for (b, _) in form.terms() {
            if !blades.contains(b) {
                blades.push(b.clone());
            }
        }
        blades.sort();

        let mut rows: Vec<Vec<Ratio>> = blades
            .iter()
            .map(|blade| {
                let mut row: Vec<Ratio> = self
                    .basis
                    .iter()
                    .map(|f| f.coefficient(blade).cloned().unwrap_or_else(Ratio::zero))
                    .collect();
                row.push(form.coefficient(blade).cloned().unwrap_or_else(Ratio::zero));
                row
            })
            .collect();

        let mut pivot_of_column: Vec<Option<usize>> = vec![None; n];
        let mut used = vec![false; rows.len()];
        for col in 0..n {
            let Some(pivot_row) = (0..rows.len()).find(|&r| !used[r] && !rows[r][col].is_zero())
            else {
                // The basis is kept independent by insert/set_basis.
                debug_assert!(false, "basis column without pivot");
                return Err(SpanError::NotInSpan);
            };
            used[pivot_row] = true;
            pivot_of_column[col] = Some(pivot_row);
            let inv = rows[pivot_row][col].inv();
            for entry in &mut rows[pivot_row] {
                *entry = entry.mul(&inv);
            }
            for r in 0..rows.len() {
                if r == pivot_row || rows[r][col].is_zero() {
                    continue;
                }
                let factor = rows[r][col].clone();
                for c in 0..=n {
                    let delta = factor.mul(&rows[pivot_row][c]);
                    rows[r][c] = rows[r][c].sub(&delta);
                }
            }
        }

        // Every non-pivot row is now zero on all basis columns; a non-zero
        // target entry there means the form leaves the span.
        for (r, row) in rows.iter().enumerate() {
            if !used[r] && !row[n].is_zero() {
                return Err(SpanError::NotInSpan);
            }
        }

        Ok(pivot_of_column
            .into_iter()
            .map(|p| match p {
                Some(row) => rows[row][n].clone(),
                None => Ratio::zero(),
            })
            .collect())
    }

    /// Residue of `form` after eliminating every row pivot. Empty iff the
    /// form lies in the span.
    fn reduce(&self, form: &Form) -> BTreeMap<Blade, Ratio> {
        let mut coords: BTreeMap<Blade, Ratio> = form
            .terms()
            .map(|(b, c)| (b.clone(), c.clone()))
            .collect();
        for row in &self.rows {
            let Some(factor) = coords.get(&row.pivot).cloned() else {
                continue;
            };
            for (blade, value) in &row.entries {
                let delta = factor.mul(value);
                match coords.get_mut(blade) {
                    Some(existing) => {
                        *existing = existing.sub(&delta);
                        if existing.is_zero() {
                            coords.remove(blade);
                        }
                    }
                    None => {
                        if !delta.is_zero() {
                            coords.insert(blade.clone(), delta.neg());
                        }
                    }
                }
            }
        }
        coords
    }
}
