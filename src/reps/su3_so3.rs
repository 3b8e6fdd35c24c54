//! The SU(3) ×_{SO(3)} ℝ³ table
//!
//! SO(3) sits in SU(3) as the real orthogonal subgroup; the complement 𝔪 of
//! 𝔰𝔬(3) in 𝔰𝔲(3) is the 5-dimensional space of symmetric traceless
//! matrices, and V = ℝ³ carries the standard rotation action. The frame of
//! the associated bundle therefore splits into the 𝔪-part coframe σ_ab
//! (five independent entries of a symmetric traceless matrix of 1-forms)
//! and the vertical coframe Dx_a.
//!
//! All letters are full contractions against δ and ϵ, hence SO(3)-invariant:
//!
//! - `a`  = x·x                          (degree 0, the quadratic radius)
//! - `b`  = x_a Dx_a                     (degree 1, the radial 1-form)
//! - `β`  = x_a x_b σ_ab                 (degree 1)
//! - `γ`  = ϵ_abc x_a Dx_b ∧ (σx)_c      (degree 2)
//! - `ε`  = Dx_1 ∧ Dx_2 ∧ Dx_3          (degree 3)
//! - `⋆β` = x_a x_b ⋆σ_ab                (degree 4, dual taken in Λ𝔪*)
//!
//! The representative points sit on the ray through (1,0,0): the origin
//! (special), the unit point (principal) and (r,0,0) with r free (generic).

use crate::alphabet::Alphabet;
use crate::orbit::{RepresentationInfo, RepresentativePoint};
use crate::symbolic::{Blade, Form, FrameIndex, Poly, Ratio, Symbol};
use crate::FormsError;

use super::RepresentationTable;

/// σ coframe indices; `SIGMA_DIM` is dim 𝔪.
const SIGMA_DIM: u32 = 5;

fn coordinate(a: usize) -> Symbol {
    Symbol::new(format!("x{}", a + 1))
}

/// The σ_ab entry as a combination of the five independent coframe forms.
/// Tracelessness makes σ_33 the negative sum of the diagonal.
fn sigma(a: usize, b: usize) -> Form {
    sigma_with(a, b, Form::generator)
}

/// ⋆σ_ab, applying the Hodge dual of Λ𝔪* generator-wise.
fn sigma_star(a: usize, b: usize) -> Form {
    sigma_with(a, b, star_generator)
}

fn sigma_with(a: usize, b: usize, gen: impl Fn(FrameIndex) -> Form) -> Form {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (0, 0) => gen(0),
        (1, 1) => gen(1),
        (2, 2) => gen(0).neg().sub(&gen(1)),
        (0, 1) => gen(2),
        (0, 2) => gen(3),
        (1, 2) => gen(4),
        _ => Form::zero(),
    }
}

/// Dual of a σ generator inside Λ⁵𝔪*: the complementary blade, signed so
/// that f_i ∧ ⋆f_i is the positive volume form.
fn star_generator(i: FrameIndex) -> Form {
    let complement: Vec<FrameIndex> = (0..SIGMA_DIM).filter(|&j| j != i).collect();
    let blade = Blade::from_indices(complement).unwrap_or_default();
    let coefficient = if i % 2 == 0 {
        Ratio::one()
    } else {
        Ratio::one().neg()
    };
    Form::term(coefficient, blade)
}

fn vertical(a: usize) -> Form {
    Form::generator(SIGMA_DIM + a as FrameIndex)
}

fn levi_civita(a: usize, b: usize, c: usize) -> i64 {
    match (a, b, c) {
        (0, 1, 2) | (1, 2, 0) | (2, 0, 1) => 1,
        (0, 2, 1) | (2, 1, 0) | (1, 0, 2) => -1,
        _ => 0,
    }
}

/// Build the canonical letter set and representative points for the
/// SU(3) ×_{SO(3)} ℝ³ construction.
pub fn su3_so3_r3() -> Result<RepresentationTable, FormsError> {
    let x: Vec<Poly> = (0..3).map(|a| Poly::var(coordinate(a))).collect();

    // a = x·x
    let mut radius = Poly::zero();
    for xa in &x {
        radius = radius.add(&xa.mul(xa));
    }

    // b = x_a Dx_a
    let mut radial = Form::zero();
    for (a, xa) in x.iter().enumerate() {
        radial = radial.add(&vertical(a).scale_poly(xa));
    }

    // β = x_a x_b σ_ab
    let mut beta = Form::zero();
    for (a, xa) in x.iter().enumerate() {
        for (b, xb) in x.iter().enumerate() {
            beta = beta.add(&sigma(a, b).scale_poly(&xa.mul(xb)));
        }
    }

    // σx contractions, one 1-form per row index
    let sigma_x: Vec<Form> = (0..3)
        .map(|c| {
            let mut row = Form::zero();
            for (d, xd) in x.iter().enumerate() {
                row = row.add(&sigma(c, d).scale_poly(xd));
            }
            row
        })
        .collect();

    // γ = ϵ_abc x_a Dx_b ∧ (σx)_c
    let mut gamma = Form::zero();
    for (a, xa) in x.iter().enumerate() {
        for b in 0..3 {
            for c in 0..3 {
                let parity = levi_civita(a, b, c);
                if parity == 0 {
                    continue;
                }
                let term = vertical(b)
                    .wedge(&sigma_x[c])
                    .scale_poly(&xa.scale(&num_rational::BigRational::from_integer(parity.into())));
                gamma = gamma.add(&term);
            }
        }
    }

    // ε = Dx_1 ∧ Dx_2 ∧ Dx_3
    let epsilon = vertical(0).wedge(&vertical(1)).wedge(&vertical(2));

    // ⋆β = x_a x_b ⋆σ_ab
    let mut star_beta = Form::zero();
    for (a, xa) in x.iter().enumerate() {
        for (b, xb) in x.iter().enumerate() {
            star_beta = star_beta.add(&sigma_star(a, b).scale_poly(&xa.mul(xb)));
        }
    }

    let mut alphabet = Alphabet::new();
    alphabet.define("a", "a", Form::scalar_poly(radius))?;
    alphabet.define("b", "b", radial)?;
    alphabet.define("beta", "β", beta)?;
    alphabet.define("gamma", "γ", gamma)?;
    alphabet.define("epsilon", "ε", epsilon)?;
    alphabet.define("star_beta", "⋆β", star_beta)?;

    let radial_symbol = Symbol::new("r");
    let mut special = RepresentativePoint::new();
    let mut principal = RepresentativePoint::new();
    let mut generic = RepresentativePoint::new();
    for a in 0..3 {
        special.assign(coordinate(a), Poly::integer(0));
        principal.assign(coordinate(a), Poly::integer(if a == 0 { 1 } else { 0 }));
        generic.assign(
            coordinate(a),
            if a == 0 {
                Poly::var(radial_symbol.clone())
            } else {
                Poly::integer(0)
            },
        );
    }

    let frame = vec![
        "σ11".to_string(),
        "σ22".to_string(),
        "σ12".to_string(),
        "σ13".to_string(),
        "σ23".to_string(),
        "Dx1".to_string(),
        "Dx2".to_string(),
        "Dx3".to_string(),
    ];

    Ok(RepresentationTable {
        alphabet,
        info: RepresentationInfo::new(special, principal, generic),
        frame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::OrbitType;

    #[test]
    fn letters_have_expected_degrees() {
        let table = su3_so3_r3().expect("table builds");
        let degrees: Vec<usize> = table.alphabet.letters().map(|l| l.degree()).collect();
        assert_eq!(degrees, vec![0, 1, 1, 2, 3, 4]);
    }

    #[test]
    fn only_epsilon_survives_at_the_special_point() {
        let table = su3_so3_r3().expect("table builds");
        let point = table.info.point(OrbitType::Special);
        for letter in table.alphabet.letters() {
            let value = point.apply(letter.expression()).expect("polynomial letters");
            if letter.name() == "epsilon" {
                assert!(!value.is_zero());
            } else {
                assert!(value.is_zero(), "{} should vanish at the origin", letter.name());
            }
        }
    }

    #[test]
    fn principal_point_evaluations_are_nonzero() {
        let table = su3_so3_r3().expect("table builds");
        let point = table.info.point(OrbitType::Principal);
        for letter in table.alphabet.letters() {
            let value = point.apply(letter.expression()).expect("polynomial letters");
            assert!(!value.is_zero(), "{} vanishes at the principal point", letter.name());
        }
    }

    #[test]
    fn generic_point_keeps_the_radial_symbol() {
        let table = su3_so3_r3().expect("table builds");
        let point = table.info.point(OrbitType::Generic);
        let a = table.alphabet.lookup("a").expect("letter a exists");
        let value = point
            .apply(table.alphabet.get(a).expression())
            .expect("polynomial letters");
        // a evaluates to r^2 along the ray
        let r = Poly::var(Symbol::new("r"));
        assert_eq!(value, Form::scalar_poly(r.mul(&r)));
    }

    #[test]
    fn star_generator_signs_alternate() {
        // f_i ∧ ⋆f_i must reproduce the same signed volume for every i.
        let volume: Vec<Form> = (0..SIGMA_DIM)
            .map(|i| Form::generator(i).wedge(&star_generator(i)))
            .collect();
        for pair in volume.windows(2) {
            assert_eq!(pair[0], pair[1]);
        }
        assert!(!volume[0].is_zero());
    }
}
