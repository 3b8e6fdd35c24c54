//! Fraction field over `Poly`
//!
//! Coefficients for linear elimination. At the special and principal points
//! every entry degenerates to a rational constant; at the generic point the
//! denominators carry the radial parameter, which is exactly what makes
//! "independent at the generic point" mean independence as functions of r.
//!
//! Normalization is lazy: constants are folded into the numerator, and the
//! common univariate case is reduced by a Euclidean gcd. Multivariate
//! fractions are left unreduced; equality still compares exactly by
//! cross-multiplication.

use std::collections::BTreeMap;
use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Zero};

use super::poly::{Poly, Symbol};

/// Exact quotient of two polynomials; denominator is never zero.
#[derive(Clone, Debug)]
pub struct Ratio {
    num: Poly,
    den: Poly,
}

impl Ratio {
    /// Quotient `num / den`. The denominator must be non-zero.
    pub fn new(num: Poly, den: Poly) -> Ratio {
        debug_assert!(!den.is_zero(), "zero denominator");
        Ratio { num, den }.normalized()
    }

    /// Embed a polynomial.
    pub fn from_poly(num: Poly) -> Ratio {
        Ratio {
            num,
            den: Poly::one(),
        }
    }

    /// Embed a machine integer.
    pub fn integer(value: i64) -> Ratio {
        Ratio::from_poly(Poly::integer(value))
    }

    /// The zero element.
    pub fn zero() -> Ratio {
        Ratio::from_poly(Poly::zero())
    }

    /// The unit element.
    pub fn one() -> Ratio {
        Ratio::from_poly(Poly::one())
    }

    /// Numerator after normalization.
    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    /// Denominator after normalization.
    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    /// True iff the value is zero.
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// True iff the value is one.
    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    /// Constant value if both numerator and denominator are constants.
    pub fn as_constant(&self) -> Option<BigRational> {
        if self.is_zero() {
            return Some(BigRational::zero());
        }
        let num = self.num.as_constant()?;
        let den = self.den.as_constant()?;
        Some(num / den)
    }

    /// Sum.
    pub fn add(&self, other: &Ratio) -> Ratio {
        let num = self.num.mul(&other.den).add(&other.num.mul(&self.den));
        let den = self.den.mul(&other.den);
        Ratio { num, den }.normalized()
    }

    /// Difference.
    pub fn sub(&self, other: &Ratio) -> Ratio {
        self.add(&other.neg())
    }

    /// Negation.
    pub fn neg(&self) -> Ratio {
        Ratio {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    /// Product.
    pub fn mul(&self, other: &Ratio) -> Ratio {
        Ratio {
            num: self.num.mul(&other.num),
            den: self.den.mul(&other.den),
        }
        .normalized()
    }

    /// Quotient. The divisor must be non-zero.
    pub fn div(&self, other: &Ratio) -> Ratio {
        debug_assert!(!other.is_zero(), "division by zero");
        Ratio {
            num: self.num.mul(&other.den),
            den: self.den.mul(&other.num),
        }
        .normalized()
    }

    /// Multiplicative inverse. The value must be non-zero.
    pub fn inv(&self) -> Ratio {
        debug_assert!(!self.is_zero(), "inverting zero");
        Ratio {
            num: self.den.clone(),
            den: self.num.clone(),
        }
        .normalized()
    }

    /// Substitute symbols in numerator and denominator. Returns `None` when
    /// the denominator vanishes at the substitution.
    pub fn substitute(&self, assignments: &BTreeMap<Symbol, Poly>) -> Option<Ratio> {
        let den = self.den.substitute(assignments);
        if den.is_zero() {
            return None;
        }
        let num = self.num.substitute(assignments);
        Some(Ratio { num, den }.normalized())
    }

    fn normalized(self) -> Ratio {
        let Ratio { mut num, mut den } = self;
        if num.is_zero() {
            return Ratio {
                num,
                den: Poly::one(),
            };
        }
        if let Some(c) = den.as_constant() {
            let inv = BigRational::one() / c.clone();
            return Ratio {
                num: num.scale(&inv),
                den: Poly::one(),
            };
        }
        // Univariate over a shared symbol: reduce by the Euclidean gcd and
        // make the denominator monic.
        // TODO: reduce multivariate fractions once a multivariate gcd lands.
        let mut symbols = num.symbols();
        for s in den.symbols() {
            if !symbols.contains(&s) {
                symbols.push(s);
            }
        }
        if symbols.len() == 1 {
            let s = &symbols[0];
            let dense_num = dense(&num, s);
            let dense_den = dense(&den, s);
            let gcd = dense_gcd(dense_num.clone(), dense_den.clone());
            if gcd.len() > 1 {
                let (qn, rn) = dense_divmod(&dense_num, &gcd);
                let (qd, rd) = dense_divmod(&dense_den, &gcd);
                debug_assert!(rn.iter().all(BigRational::is_zero));
                debug_assert!(rd.iter().all(BigRational::is_zero));
                num = from_dense(&qn, s);
                den = from_dense(&qd, s);
            }
            if let Some(lead) = dense(&den, s).last() {
                if !lead.is_one() {
                    let inv = BigRational::one() / lead.clone();
                    num = num.scale(&inv);
                    den = den.scale(&inv);
                }
            }
            if let Some(c) = den.as_constant() {
                let inv = BigRational::one() / c.clone();
                return Ratio {
                    num: num.scale(&inv),
                    den: Poly::one(),
                };
            }
        }
        Ratio { num, den }
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Ratio) -> bool {
        self.num.mul(&other.den) == other.num.mul(&self.den)
    }
}

impl Eq for Ratio {}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == Poly::one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({})/({})", self.num, self.den)
        }
    }
}

/// Dense ascending coefficient vector of a univariate polynomial in `s`.
fn dense(poly: &Poly, s: &Symbol) -> Vec<BigRational> {
    let mut coeffs = vec![BigRational::zero(); poly.total_degree() as usize + 1];
    for (monomial, coeff) in poly.terms() {
        let mut exp = 0;
        for (symbol, e) in monomial.powers() {
            debug_assert_eq!(symbol, s, "polynomial is not univariate in {s}");
            exp = e;
        }
        coeffs[exp as usize] = coeff.clone();
    }
    while coeffs.len() > 1 && coeffs.last().map(BigRational::is_zero).unwrap_or(false) {
        coeffs.pop();
    }
    coeffs
}

fn from_dense(coeffs: &[BigRational], s: &Symbol) -> Poly {
    let mut out = Poly::zero();
    for (exp, coeff) in coeffs.iter().enumerate() {
        if coeff.is_zero() {
            continue;
        }
        let term = Poly::var(s.clone()).pow(exp as u32).scale(coeff);
        out = out.add(&term);
    }
    out
}

fn dense_degree(coeffs: &[BigRational]) -> Option<usize> {
    coeffs.iter().rposition(|c| !c.is_zero())
}

/// Long division: returns `(quotient, remainder)`.
fn dense_divmod(a: &[BigRational], b: &[BigRational]) -> (Vec<BigRational>, Vec<BigRational>) {
    let Some(db) = dense_degree(b) else {
        return (Vec::new(), a.to_vec());
    };
    let mut remainder = a.to_vec();
    let mut quotient = vec![BigRational::zero(); a.len()];
    while let Some(da) = dense_degree(&remainder) {
        if da < db {
            break;
        }
        let factor = &remainder[da] / &b[db];
        quotient[da - db] = factor.clone();
        for i in 0..=db {
            let delta = &factor * &b[i];
            remainder[da - db + i] -= delta;
        }
    }
    (quotient, remainder)
}

/// Monic gcd by the Euclidean algorithm.
fn dense_gcd(mut a: Vec<BigRational>, mut b: Vec<BigRational>) -> Vec<BigRational> {
    while dense_degree(&b).is_some() {
        let (_, r) = dense_divmod(&a, &b);
        a = b;
        b = r;
    }
    match dense_degree(&a) {
        Some(d) => {
            let lead = a[d].clone();
            a.truncate(d + 1);
            for c in &mut a {
                *c = &*c / &lead;
            }
            a
        }
        None => vec![BigRational::one()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r_sym() -> Symbol {
        Symbol::new("r")
    }

    #[test]
    fn constant_denominator_folds_away() {
        let r = Poly::var(r_sym());
        let q = Ratio::new(r.clone(), Poly::integer(2));
        assert_eq!(q.denominator(), &Poly::one());
        assert_eq!(q, Ratio::from_poly(r.scale(&BigRational::new(1.into(), 2.into()))));
    }

    #[test]
    fn univariate_gcd_reduces() {
        let r = Poly::var(r_sym());
        // (r^2 - 1) / (r - 1) = r + 1
        let num = r.mul(&r).sub(&Poly::one());
        let den = r.sub(&Poly::one());
        let q = Ratio::new(num, den);
        assert_eq!(q, Ratio::from_poly(r.add(&Poly::one())));
        assert_eq!(q.denominator(), &Poly::one());
    }

    #[test]
    fn cross_multiplied_equality() {
        let r = Poly::var(r_sym());
        let a = Ratio::new(Poly::one(), r.clone());
        let b = Ratio::new(r.clone(), r.mul(&r));
        assert_eq!(a, b);
    }

    #[test]
    fn division_round_trips() {
        let r = Poly::var(r_sym());
        let a = Ratio::from_poly(r.add(&Poly::integer(3)));
        let b = Ratio::from_poly(r.clone());
        let q = a.div(&b);
        assert_eq!(q.mul(&b), a);
    }

    #[test]
    fn substitution_detects_vanishing_denominator() {
        let r = r_sym();
        let q = Ratio::new(Poly::one(), Poly::var(r.clone()));
        let mut point = BTreeMap::new();
        point.insert(r, Poly::integer(0));
        assert!(q.substitute(&point).is_none());
    }
}
