//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cartan::reps::su3_so3_r3;
use cartan::{BuildConfig, InvariantForms};

fn benchmark_construction(c: &mut Criterion) {
    for max_degree in [2, 4] {
        c.bench_function(&format!("su3_so3_r3 max_degree={max_degree}"), |b| {
            b.iter(|| {
                let table = su3_so3_r3().expect("table builds");
                let forms = InvariantForms::construct(
                    table.alphabet,
                    table.info,
                    BuildConfig::up_to_degree(max_degree),
                )
                .expect("construction succeeds");
                black_box(forms.fingerprint());
            });
        });
    }
}

criterion_group!(benches, benchmark_construction);
criterion_main!(benches);
