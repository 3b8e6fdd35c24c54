use proptest::prelude::*;

use cartan::{Form, Ratio, Span};

const GENERATORS: u32 = 4;

/// A 1-form with small integer coefficients over a fixed frame.
fn arb_form() -> impl Strategy<Value = Form> {
    proptest::collection::vec(-4i64..=4, GENERATORS as usize).prop_map(|coeffs| {
        coeffs
            .into_iter()
            .enumerate()
            .fold(Form::zero(), |acc, (i, c)| {
                acc.add(&Form::generator(i as u32).scale(&Ratio::integer(c)))
            })
    })
}

proptest! {
    #[test]
    fn batch_matches_sequential_insertion(
        forms in proptest::collection::vec(arb_form(), 0..10),
    ) {
        let mut batched = Span::new();
        let mut sequential = Span::new();

        let batch_flags = batched.insert_batch(&forms);
        let seq_flags: Vec<bool> = forms.iter().map(|f| sequential.insert(f)).collect();

        prop_assert_eq!(&batch_flags, &seq_flags, "insert_batch must process in submission order");
        prop_assert_eq!(batched.dimension(), sequential.dimension());

        // The accepted basis is exactly the flagged subsequence, in order.
        let accepted: Vec<&Form> = forms
            .iter()
            .zip(&batch_flags)
            .filter(|(_, &kept)| kept)
            .map(|(f, _)| f)
            .collect();
        prop_assert_eq!(accepted.len(), batched.basis().len());
        for (offered, kept) in accepted.iter().zip(batched.basis()) {
            prop_assert_eq!(*offered, kept);
        }
    }

    #[test]
    fn insert_grows_dimension_exactly_on_acceptance(
        forms in proptest::collection::vec(arb_form(), 0..10),
    ) {
        let mut span = Span::new();
        for form in &forms {
            let before = span.dimension();
            let accepted = span.insert(form);
            let after = span.dimension();
            prop_assert_eq!(after, if accepted { before + 1 } else { before });
            prop_assert!(span.dimension() <= GENERATORS as usize);
        }
    }

    #[test]
    fn every_offered_form_ends_up_contained(
        forms in proptest::collection::vec(arb_form(), 0..10),
    ) {
        let mut span = Span::new();
        span.insert_batch(&forms);
        for form in &forms {
            prop_assert!(span.contains(form), "offered forms are accepted or dependent");
        }
    }

    #[test]
    fn components_invert_linear_combinations(
        forms in proptest::collection::vec(arb_form(), 1..8),
        weights in proptest::collection::vec(-3i64..=3, 8),
    ) {
        let mut span = Span::new();
        span.insert_batch(&forms);
        if span.dimension() == 0 {
            return Ok(());
        }

        let expected: Vec<Ratio> = span
            .basis()
            .iter()
            .zip(&weights)
            .map(|(_, &w)| Ratio::integer(w))
            .collect();
        let target = span
            .basis()
            .iter()
            .zip(&expected)
            .fold(Form::zero(), |acc, (f, w)| acc.add(&f.scale(w)));

        let solved = span.components(&target).expect("combination lies in span");
        prop_assert_eq!(solved, expected);
    }
}
