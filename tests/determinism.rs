use std::collections::HashSet;

use cartan::reps::su3_so3_r3;
use cartan::{BuildConfig, InvariantForms};

#[test]
fn construction_is_deterministic() {
    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let table = su3_so3_r3().expect("table builds");
        let forms =
            InvariantForms::construct(table.alphabet, table.info, BuildConfig::up_to_degree(4))
                .expect("construction succeeds");
        fingerprints.insert(forms.fingerprint());
    }

    assert_eq!(fingerprints.len(), 1, "bases diverged across runs");
}

#[test]
fn bases_are_order_stable_across_runs() {
    let build = || {
        let table = su3_so3_r3().expect("table builds");
        InvariantForms::construct(table.alphabet, table.info, BuildConfig::up_to_degree(3))
            .expect("construction succeeds")
    };
    let first = build();
    let second = build();
    for degree in 0..=3 {
        assert_eq!(first.p_forms(degree), second.p_forms(degree));
    }
}
