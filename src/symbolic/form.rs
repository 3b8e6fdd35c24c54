//! Exterior algebra over the frame
//!
//! A `Form` is a finite sum of wedge monomials in the frame 1-forms with
//! `Ratio` coefficients: blade ↦ coefficient, where a `Blade` is a strictly
//! increasing index sequence into the frame. Wedge products pick up shuffle
//! signs; a repeated generator annihilates the term. The representation is
//! always normalized (no zero coefficients), so the zero test and structural
//! equality are exact.

use std::collections::BTreeMap;
use std::fmt;

use super::poly::{Poly, Symbol};
use super::ratio::Ratio;

/// Index into the frame of 1-form generators.
pub type FrameIndex = u32;

/// Wedge monomial: strictly increasing frame indices. The empty blade is the
/// scalar unit.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Blade(Vec<FrameIndex>);

impl Blade {
    /// The scalar blade.
    pub fn scalar() -> Blade {
        Blade(Vec::new())
    }

    /// A single frame generator.
    pub fn generator(index: FrameIndex) -> Blade {
        Blade(vec![index])
    }

    /// Build from indices; returns `None` on a repeated index.
    pub fn from_indices(mut indices: Vec<FrameIndex>) -> Option<Blade> {
        indices.sort_unstable();
        if indices.windows(2).any(|w| w[0] == w[1]) {
            return None;
        }
        Some(Blade(indices))
    }

    /// Wedge degree.
    pub fn grade(&self) -> usize {
        self.0.len()
    }

    /// Frame indices in increasing order.
    pub fn indices(&self) -> &[FrameIndex] {
        &self.0
    }

    /// Merge two blades, counting the transpositions needed to interleave
    /// them. Returns `None` when a generator repeats (the product is zero),
    /// otherwise the merged blade and whether the sign is negative.
    pub fn wedge(&self, other: &Blade) -> Option<(Blade, bool)> {
        let a = &self.0;
        let b = &other.0;
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let mut transpositions = 0usize;
        let mut i = 0;
        let mut j = 0;
        while i < a.len() && j < b.len() {
            if a[i] == b[j] {
                return None;
            }
            if a[i] < b[j] {
                merged.push(a[i]);
                i += 1;
            } else {
                // b[j] crosses every remaining generator of `a`
                transpositions += a.len() - i;
                merged.push(b[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);
        Some((Blade(merged), transpositions % 2 == 1))
    }
}

/// Differential form: blade ↦ coefficient, normalized.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Form {
    terms: BTreeMap<Blade, Ratio>,
}

impl Form {
    /// The zero form.
    pub fn zero() -> Form {
        Form::default()
    }

    /// A scalar (degree-0) form.
    pub fn scalar(value: Ratio) -> Form {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(Blade::scalar(), value);
        }
        Form { terms }
    }

    /// A scalar form with a polynomial coefficient.
    pub fn scalar_poly(value: Poly) -> Form {
        Form::scalar(Ratio::from_poly(value))
    }

    /// The i-th frame 1-form.
    pub fn generator(index: FrameIndex) -> Form {
        let mut terms = BTreeMap::new();
        terms.insert(Blade::generator(index), Ratio::one());
        Form { terms }
    }

    /// A single `coefficient · blade` term.
    pub fn term(coefficient: Ratio, blade: Blade) -> Form {
        let mut terms = BTreeMap::new();
        if !coefficient.is_zero() {
            terms.insert(blade, coefficient);
        }
        Form { terms }
    }

    /// True iff the form is identically zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Wedge degree when the form is homogeneous and non-zero.
    pub fn grade(&self) -> Option<usize> {
        let mut grades = self.terms.keys().map(Blade::grade);
        let first = grades.next()?;
        if grades.all(|g| g == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Split into homogeneous components, keyed by degree.
    pub fn homogeneous_parts(&self) -> BTreeMap<usize, Form> {
        let mut parts: BTreeMap<usize, Form> = BTreeMap::new();
        for (blade, coeff) in &self.terms {
            parts
                .entry(blade.grade())
                .or_default()
                .insert_term(blade.clone(), coeff.clone());
        }
        parts
    }

    /// Coefficient of a blade, if present.
    pub fn coefficient(&self, blade: &Blade) -> Option<&Ratio> {
        self.terms.get(blade)
    }

    /// Iterate `(blade, coefficient)` terms in blade order.
    pub fn terms(&self) -> impl Iterator<Item = (&Blade, &Ratio)> {
        self.terms.iter()
    }

    fn insert_term(&mut self, blade: Blade, coeff: Ratio) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.get_mut(&blade) {
            Some(existing) => {
                *existing = existing.add(&coeff);
                if existing.is_zero() {
                    self.terms.remove(&blade);
                }
            }
            None => {
                self.terms.insert(blade, coeff);
            }
        }
    }

    /// Sum of two forms.
    pub fn add(&self, other: &Form) -> Form {
        let mut out = self.clone();
        for (blade, coeff) in &other.terms {
            out.insert_term(blade.clone(), coeff.clone());
        }
        out
    }

    /// Difference of two forms.
    pub fn sub(&self, other: &Form) -> Form {
        self.add(&other.neg())
    }

    /// Negation.
    pub fn neg(&self) -> Form {
        Form {
            terms: self
                .terms
                .iter()
                .map(|(b, c)| (b.clone(), c.neg()))
                .collect(),
        }
    }

    /// Multiply every coefficient by a scalar.
    pub fn scale(&self, factor: &Ratio) -> Form {
        if factor.is_zero() {
            return Form::zero();
        }
        Form {
            terms: self
                .terms
                .iter()
                .map(|(b, c)| (b.clone(), c.mul(factor)))
                .collect(),
        }
    }

    /// Multiply every coefficient by a polynomial.
    pub fn scale_poly(&self, factor: &Poly) -> Form {
        self.scale(&Ratio::from_poly(factor.clone()))
    }

    /// Wedge product.
    pub fn wedge(&self, other: &Form) -> Form {
        let mut out = Form::zero();
        for (ba, ca) in &self.terms {
            for (bb, cb) in &other.terms {
                if let Some((blade, negative)) = ba.wedge(bb) {
                    let mut coeff = ca.mul(cb);
                    if negative {
                        coeff = coeff.neg();
                    }
                    out.insert_term(blade, coeff);
                }
            }
        }
        out
    }

    /// Wedge power.
    pub fn wedge_pow(&self, exponent: u32) -> Form {
        let mut out = Form::scalar(Ratio::one());
        for _ in 0..exponent {
            out = out.wedge(self);
        }
        out
    }

    /// Substitute symbols in every coefficient. Returns `None` when some
    /// coefficient's denominator vanishes under the substitution.
    pub fn substitute(&self, assignments: &BTreeMap<Symbol, Poly>) -> Option<Form> {
        let mut out = Form::zero();
        for (blade, coeff) in &self.terms {
            let substituted = coeff.substitute(assignments)?;
            out.insert_term(blade.clone(), substituted);
        }
        Some(out)
    }

    /// Render with frame generator names.
    pub fn display<'a>(&'a self, frame: &'a [String]) -> FormDisplay<'a> {
        FormDisplay { form: self, frame }
    }
}

/// Display adapter carrying the frame names.
#[derive(Debug)]
pub struct FormDisplay<'a> {
    form: &'a Form,
    frame: &'a [String],
}

impl fmt::Display for FormDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.form.is_zero() {
            return f.write_str("0");
        }
        let mut first = true;
        for (blade, coeff) in self.form.terms() {
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            let wedge = blade
                .indices()
                .iter()
                .map(|&i| {
                    self.frame
                        .get(i as usize)
                        .cloned()
                        .unwrap_or_else(|| format!("e{i}"))
                })
                .collect::<Vec<_>>()
                .join("∧");
            if blade.grade() == 0 {
                write!(f, "{coeff}")?;
            } else if coeff.is_one() {
                write!(f, "{wedge}")?;
            } else {
                write!(f, "({coeff})·{wedge}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_of_generator_with_itself_vanishes() {
        let e0 = Form::generator(0);
        assert!(e0.wedge(&e0).is_zero());
    }

    #[test]
    fn wedge_anticommutes_on_one_forms() {
        let e0 = Form::generator(0);
        let e1 = Form::generator(1);
        assert_eq!(e0.wedge(&e1), e1.wedge(&e0).neg());
    }

    #[test]
    fn shuffle_sign_counts_crossings() {
        // e2 ∧ (e0∧e1) = +(e0∧e1∧e2): e2 crosses two generators
        let e01 = Form::generator(0).wedge(&Form::generator(1));
        let e2 = Form::generator(2);
        let expected = Form::generator(0)
            .wedge(&Form::generator(1))
            .wedge(&Form::generator(2));
        assert_eq!(e2.wedge(&e01), expected);
    }

    #[test]
    fn two_forms_commute() {
        let a = Form::generator(0).wedge(&Form::generator(1));
        let b = Form::generator(2).wedge(&Form::generator(3));
        assert_eq!(a.wedge(&b), b.wedge(&a));
    }

    #[test]
    fn homogeneous_parts_split_by_grade() {
        let mixed = Form::scalar(Ratio::integer(5))
            .add(&Form::generator(0))
            .add(&Form::generator(1).wedge(&Form::generator(2)));
        let parts = mixed.homogeneous_parts();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[&0], Form::scalar(Ratio::integer(5)));
        assert_eq!(parts[&1], Form::generator(0));
        assert!(mixed.grade().is_none());
    }

    #[test]
    fn substitution_applies_to_coefficients() {
        let x = Symbol::new("x");
        let form = Form::generator(0).scale_poly(&Poly::var(x.clone()));
        let mut point = BTreeMap::new();
        point.insert(x, Poly::integer(0));
        assert!(form.substitute(&point).map(|f| f.is_zero()).unwrap_or(false));
    }
}
