use criterion::{criterion_group, criterion_main, Criterion};
use mcq_engine::{catalog, create, RngSource};
use std::hint::black_box;

fn benchmark_families(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for family in catalog() {
        let gen = create(family.question_id, family.levels).expect("registered family");
        let mut rng = RngSource::seeded(1);
        group.bench_function(family.question_id, |b| {
            b.iter(|| black_box(gen.generate_with(&mut rng)))
        });
    }

    group.finish();
}

fn benchmark_fallback_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback");

    // a single attempt forces most samplers onto their fallback instance
    let config = mcq_engine::GeneratorConfig {
        max_attempts: 1,
        ..Default::default()
    };
    let gen = mcq_engine::create_with_config("F5L7.1_Q4_F_MQ", 4, config).expect("registered family");
    let mut rng = RngSource::seeded(2);
    group.bench_function("circle_through_right_triangle", |b| {
        b.iter(|| black_box(gen.generate_with(&mut rng)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_families, benchmark_fallback_path);
criterion_main!(benches);
