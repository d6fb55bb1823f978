use criterion::{criterion_group, criterion_main, Criterion};
use pfpforge::collection::{CollectionDefinition, Trait, Variant};
use pfpforge::config::{CollisionPolicy, GenerationParams};
use pfpforge::generator::pool::build_pools;
use pfpforge::generator::{Generator, NoProgress};
use std::hint::black_box;

fn setup_definition(size: usize) -> CollectionDefinition {
    let traits = (0..6)
        .map(|t| {
            let variants = (0..10)
                .map(|v| Variant::new(&format!("t{}v{}", t, v), 10.0))
                .collect();
            Trait::new(&format!("trait{}", t), variants)
        })
        .collect();
    CollectionDefinition::new("bench", size, traits)
}

fn bench_pools(c: &mut Criterion) {
    let def = setup_definition(10_000);
    c.bench_function("build_pools_10k", |b| {
        b.iter(|| build_pools(black_box(&def.traits), black_box(10_000), false))
    });
}

fn bench_allocation(c: &mut Criterion) {
    let def = setup_definition(2_000);
    let params = GenerationParams {
        seed: Some(42),
        collision_policy: CollisionPolicy::Restore,
        ..Default::default()
    };
    c.bench_function("allocate_2k", |b| {
        b.iter(|| {
            Generator::new(black_box(&def), params.clone())
                .run(&NoProgress)
                .map(|r| r.pfps.len())
        })
    });
}

criterion_group!(benches, bench_pools, bench_allocation);
criterion_main!(benches);
