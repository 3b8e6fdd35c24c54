//! End-to-end construction tests
//!
//! Exercises the full special → principal → generic lifecycle on the
//! SU(3) ×_{SO(3)} ℝ³ table and on a minimal one-letter representation.

use test_case::test_case;

use cartan::reps::su3_so3_r3;
use cartan::{
    Alphabet, BuildConfig, Form, InvariantForms, OrbitType, Poly, RepresentationInfo,
    RepresentativePoint, Symbol,
};

fn su3_forms(max_degree: usize) -> InvariantForms {
    let table = su3_so3_r3().expect("table builds");
    InvariantForms::construct(
        table.alphabet,
        table.info,
        BuildConfig::up_to_degree(max_degree),
    )
    .expect("construction succeeds")
}

/// A representation with one degree-0 letter whose value is a non-zero
/// constant at the special and principal points and a free radial symbol at
/// the generic point.
fn radial_only() -> (Alphabet, RepresentationInfo) {
    let x = Symbol::new("x");
    let mut alphabet = Alphabet::new();
    alphabet
        .define("a", "a", Form::scalar_poly(Poly::var(x.clone())))
        .expect("valid letter");

    let mut special = RepresentativePoint::new();
    special.assign(x.clone(), Poly::integer(1));
    let mut principal = RepresentativePoint::new();
    principal.assign(x.clone(), Poly::integer(2));
    let mut generic = RepresentativePoint::new();
    generic.assign(x, Poly::var(Symbol::new("r")));

    (alphabet, RepresentationInfo::new(special, principal, generic))
}

#[test]
fn radial_letter_yields_the_invariant_function() {
    let (alphabet, info) = radial_only();
    let forms = InvariantForms::construct(alphabet, info, BuildConfig::up_to_degree(1))
        .expect("construction succeeds");

    let function = forms.invariant_function().expect("slot is filled");
    assert_eq!(function.length(), 1);

    let value = forms
        .eval(function, OrbitType::Generic)
        .expect("evaluation succeeds");
    assert!(!value.is_zero());
    // The generic value is an expression in the radial symbol alone.
    let r = Poly::var(Symbol::new("r"));
    assert_eq!(value, Form::scalar_poly(r));
}

#[test]
fn degree_one_basis_has_the_published_dimension() {
    let forms = su3_forms(1);
    assert_eq!(forms.p_forms(1).len(), 2);
    assert_eq!(forms.p_forms(0).len(), 1);
}

#[test_case(0, 1)]
#[test_case(1, 2)]
#[test_case(2, 2)]
#[test_case(3, 3)]
#[test_case(4, 4)]
fn per_degree_dimensions(degree: usize, expected: usize) {
    let forms = su3_forms(4);
    assert_eq!(forms.p_forms(degree).len(), expected);
}

#[test]
fn basis_matches_reported_dimension() {
    let forms = su3_forms(4);
    for degree in 0..=4 {
        assert_eq!(forms.p_forms(degree).len(), forms.dimension(degree));
    }
}

#[test]
fn queries_above_the_degree_bound_are_empty() {
    let forms = su3_forms(2);
    assert!(forms.p_forms(3).is_empty());
    assert!(forms.p_forms(17).is_empty());
    assert_eq!(forms.dimension(17), 0);
}

#[test]
fn acceptance_is_anti_monotone() {
    let forms = su3_forms(4);
    assert!(forms.longest_generator() >= 2);
    for length in 2..=forms.longest_generator() {
        for composite in forms.generator_pool(length) {
            for deletion in composite.deletions() {
                assert!(
                    forms
                        .generator_pool(length - 1)
                        .any(|shorter| *shorter == deletion),
                    "accepted composite has an unregistered restriction"
                );
            }
        }
    }
}

#[test]
fn generator_pools_are_sorted() {
    let forms = su3_forms(4);
    for length in 1..=forms.longest_generator() {
        let pool: Vec<_> = forms.generator_pool(length).collect();
        for pair in pool.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}

#[test]
fn raising_the_degree_bound_preserves_lower_bases() {
    let narrow = su3_forms(2);
    let wide = su3_forms(4);
    for degree in 0..=2 {
        assert_eq!(narrow.p_forms(degree), wide.p_forms(degree));
    }
}

#[test]
fn composites_use_canonically_ordered_factors() {
    let forms = su3_forms(4);
    for degree in 0..=4 {
        for composite in forms.p_forms(degree) {
            let factors = composite.factors();
            for pair in factors.windows(2) {
                assert!(pair[0] <= pair[1], "factors must be non-decreasing");
            }
            assert_eq!(composite.degree(forms.alphabet()), degree);
        }
    }
}

#[test]
fn length_bound_caps_the_search() {
    let table = su3_so3_r3().expect("table builds");
    let forms = InvariantForms::construct(
        table.alphabet,
        table.info,
        BuildConfig {
            max_degree: 4,
            max_length: Some(1),
        },
    )
    .expect("construction succeeds");
    assert_eq!(forms.longest_generator(), 1);
    // Singletons only: the degree-4 basis is reduced to ⋆β.
    assert_eq!(forms.p_forms(4).len(), 1);
}

#[test]
fn special_pass_contributes_before_the_principal_pass() {
    // ε is the only letter that survives at the origin, so it must head the
    // degree-3 basis; the principal-pass products follow.
    let forms = su3_forms(4);
    let basis = forms.p_forms(3);
    assert_eq!(basis.len(), 3);
    let epsilon = forms.alphabet().lookup("epsilon").expect("letter exists");
    assert_eq!(basis[0].factors(), &[epsilon]);
}
