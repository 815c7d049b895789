use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mazecore::{Generator, Grid, Random, Search, Strategy};
use rand::SeedableRng as _;

const WIDTH: usize = 101;
const HEIGHT: usize = 61;

fn maze() -> Grid {
    Generator::new(WIDTH, HEIGHT)
        .unwrap()
        .generate(&mut Random::seed_from_u64(7))
        .unwrap()
}

pub fn paving(c: &mut Criterion) {
    let generator = Generator::new(WIDTH, HEIGHT).unwrap();
    c.bench_function("paving", |b| {
        b.iter(|| {
            let mut rng = Random::seed_from_u64(black_box(7));
            generator.generate(&mut rng).unwrap()
        })
    });
}

pub fn traversals(c: &mut Criterion) {
    let grid = maze();
    let (start, finish) = (grid.start().unwrap(), grid.finish().unwrap());

    for strategy in Strategy::ALL {
        c.bench_function(strategy.name(), |b| {
            b.iter(|| {
                Search::new(black_box(&grid), start, finish)
                    .unwrap()
                    .run_strategy(strategy)
            })
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = paving, traversals
}
criterion_main!(benches);
