//! Sparse multivariate polynomials over ℚ
//!
//! Scalar coefficients for the whole engine. Terms are kept normalized in a
//! `BTreeMap` (no zero coefficients, no zero exponents), so structural
//! equality is semantic equality and iteration order is deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Interned symbol name (representation coordinate or radial parameter).
///
/// Cheap to clone; ordered by name so every container built on symbols
/// iterates deterministically.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Intern a symbol by name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Symbol(name.into())
    }

    /// Symbol name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Power product of symbols.
///
/// Invariant: no zero exponents stored, so the empty monomial is `1`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Monomial(BTreeMap<Symbol, u32>);

impl Monomial {
    /// The unit monomial.
    pub fn one() -> Self {
        Monomial(BTreeMap::new())
    }

    /// A single variable.
    pub fn var(symbol: Symbol) -> Self {
        let mut powers = BTreeMap::new();
        powers.insert(symbol, 1);
        Monomial(powers)
    }

    /// True for the unit monomial.
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Product of two monomials (exponents add).
    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut powers = self.0.clone();
        for (symbol, exp) in &other.0 {
            *powers.entry(symbol.clone()).or_insert(0) += exp;
        }
        Monomial(powers)
    }

    /// Sum of all exponents.
    pub fn total_degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterate `(symbol, exponent)` pairs in symbol order.
    pub fn powers(&self) -> impl Iterator<Item = (&Symbol, u32)> {
        self.0.iter().map(|(s, e)| (s, *e))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return f.write_str("1");
        }
        let mut first = true;
        for (symbol, exp) in self.powers() {
            if !first {
                f.write_str("*")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{exp}")?;
            }
        }
        Ok(())
    }
}

/// Sparse multivariate polynomial over ℚ.
///
/// Invariant: `terms` never holds a zero coefficient, so `terms.is_empty()`
/// is the zero test and derived equality is exact.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Poly::default()
    }

    /// The unit polynomial.
    pub fn one() -> Self {
        Poly::constant(BigRational::one())
    }

    /// A constant polynomial.
    pub fn constant(value: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(Monomial::one(), value);
        }
        Poly { terms }
    }

    /// A constant polynomial from a machine integer.
    pub fn integer(value: i64) -> Self {
        Poly::constant(BigRational::from_integer(BigInt::from(value)))
    }

    /// The polynomial consisting of a single variable.
    pub fn var(symbol: Symbol) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::var(symbol), BigRational::one());
        Poly { terms }
    }

    /// A single `coefficient * monomial` term.
    pub fn term(coefficient: BigRational, monomial: Monomial) -> Self {
        let mut terms = BTreeMap::new();
        if !coefficient.is_zero() {
            terms.insert(monomial, coefficient);
        }
        Poly { terms }
    }

    /// True iff this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The constant value, if the polynomial has no variable terms.
    pub fn as_constant(&self) -> Option<&BigRational> {
        match self.terms.len() {
            0 => None,
            1 => self.terms.get(&Monomial::one()),
            _ => None,
        }
    }

    /// True iff the polynomial is constant (including zero).
    pub fn is_constant(&self) -> bool {
        self.is_zero() || self.as_constant().is_some()
    }

    /// Number of terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Largest total degree among the terms; zero polynomial reports 0.
    pub fn total_degree(&self) -> u32 {
        self.terms
            .keys()
            .map(Monomial::total_degree)
            .max()
            .unwrap_or(0)
    }

    /// Symbols occurring with non-zero exponent, in order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = Vec::new();
        for monomial in self.terms.keys() {
            for (symbol, _) in monomial.powers() {
                if !out.contains(symbol) {
                    out.push(symbol.clone());
                }
            }
        }
        out.sort();
        out
    }

    /// Iterate `(monomial, coefficient)` terms in monomial order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    fn accumulate(terms: &mut BTreeMap<Monomial, BigRational>, monomial: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        match terms.get_mut(&monomial) {
            Some(existing) => {
                *existing += coeff;
                if existing.is_zero() {
                    terms.remove(&monomial);
                }
            }
            None => {
                terms.insert(monomial, coeff);
            }
        }
    }

    /// Sum of two polynomials.
    pub fn add(&self, other: &Poly) -> Poly {
        let mut terms = self.terms.clone();
        for (monomial, coeff) in &other.terms {
            Self::accumulate(&mut terms, monomial.clone(), coeff.clone());
        }
        Poly { terms }
    }

    /// Difference of two polynomials.
    pub fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.neg())
    }

    /// Negation.
    pub fn neg(&self) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c.clone()))
                .collect(),
        }
    }

    /// Product of two polynomials.
    pub fn mul(&self, other: &Poly) -> Poly {
        let mut terms = BTreeMap::new();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                Self::accumulate(&mut terms, ma.mul(mb), ca * cb);
            }
        }
        Poly { terms }
    }

    /// Multiply every coefficient by a rational constant.
    pub fn scale(&self, factor: &BigRational) -> Poly {
        if factor.is_zero() {
            return Poly::zero();
        }
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), c * factor))
                .collect(),
        }
    }

    /// Integer power by repeated multiplication.
    pub fn pow(&self, exponent: u32) -> Poly {
        let mut out = Poly::one();
        for _ in 0..exponent {
            out = out.mul(self);
        }
        out
    }

    /// Substitute symbols by polynomials; symbols absent from `assignments`
    /// are left in place.
    pub fn substitute(&self, assignments: &BTreeMap<Symbol, Poly>) -> Poly {
        let mut out = Poly::zero();
        for (monomial, coeff) in &self.terms {
            let mut product = Poly::constant(coeff.clone());
            for (symbol, exp) in monomial.powers() {
                let factor = match assignments.get(symbol) {
                    Some(replacement) => replacement.pow(exp),
                    None => {
                        let mut untouched = BTreeMap::new();
                        untouched.insert(symbol.clone(), exp);
                        Poly::term(BigRational::one(), Monomial(untouched))
                    }
                };
                product = product.mul(&factor);
            }
            out = out.add(&product);
        }
        out
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut first = true;
        for (monomial, coeff) in &self.terms {
            let negative = coeff.is_negative();
            let magnitude = coeff.abs();
            if first {
                if negative {
                    f.write_str("-")?;
                }
            } else if negative {
                f.write_str(" - ")?;
            } else {
                f.write_str(" + ")?;
            }
            first = false;
            if monomial.is_one() {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write!(f, "{monomial}")?;
            } else {
                write!(f, "{magnitude}*{monomial}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    #[test]
    fn addition_cancels_terms() {
        let x = Poly::var(sym("x"));
        let sum = x.add(&x.neg());
        assert!(sum.is_zero());
    }

    #[test]
    fn multiplication_collects_monomials() {
        let x = Poly::var(sym("x"));
        let one = Poly::one();
        // (x + 1)(x - 1) = x^2 - 1
        let product = x.add(&one).mul(&x.sub(&one));
        let expected = x.mul(&x).sub(&one);
        assert_eq!(product, expected);
    }

    #[test]
    fn substitution_replaces_symbols() {
        let x = sym("x");
        let r = sym("r");
        // x^2 + 3 under x -> 2r becomes 4r^2 + 3
        let poly = Poly::var(x.clone()).pow(2).add(&Poly::integer(3));
        let mut point = BTreeMap::new();
        point.insert(x, Poly::var(r.clone()).scale(&BigRational::from_integer(2.into())));
        let substituted = poly.substitute(&point);
        let expected = Poly::var(r).pow(2).scale(&BigRational::from_integer(4.into())).add(&Poly::integer(3));
        assert_eq!(substituted, expected);
    }

    #[test]
    fn substitution_to_constant_is_constant() {
        let x = sym("x");
        let poly = Poly::var(x.clone()).pow(3);
        let mut point = BTreeMap::new();
        point.insert(x, Poly::integer(0));
        assert!(poly.substitute(&point).is_zero());
    }

    #[test]
    fn display_orders_terms() {
        let x = Poly::var(sym("x"));
        let y = Poly::var(sym("y"));
        let p = x.mul(&x).add(&y.scale(&BigRational::from_integer((-2).into())));
        assert_eq!(p.to_string(), "x^2 - 2*y");
    }
}
