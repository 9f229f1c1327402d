use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use wordgate::session::pool::{append_challenge_batch, assemble_quiz};
use wordgate::vocab::{ALL_BOOKS, ALL_UNITS, Book, Unit, VocabRepository};

fn full_selection() -> Vec<(Book, Unit)> {
    ALL_BOOKS
        .iter()
        .flat_map(|&book| ALL_UNITS.iter().map(move |&unit| (book, unit)))
        .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let catalog = VocabRepository::load();
    let one_unit = vec![(Book::Grade3Up, Unit::Unit1)];
    let everything = full_selection();
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("assemble_quiz (one unit, 8 words)", |b| {
        b.iter(|| assemble_quiz(&catalog, black_box(&one_unit), 8, &mut rng))
    });

    c.bench_function("assemble_quiz (whole catalog, 30 words)", |b| {
        b.iter(|| assemble_quiz(&catalog, black_box(&everything), 30, &mut rng))
    });
}

fn bench_challenge_batch(c: &mut Criterion) {
    let catalog = VocabRepository::load();
    let source = catalog.all().to_vec();
    let extras = catalog.extras().to_vec();
    let mut rng = SmallRng::seed_from_u64(11);

    c.bench_function("append_challenge_batch (whole catalog)", |b| {
        b.iter(|| {
            let mut queue = Vec::new();
            append_challenge_batch(&mut queue, black_box(&source), &extras, &mut rng);
            queue
        })
    });
}

criterion_group!(benches, bench_assemble, bench_challenge_batch);
criterion_main!(benches);
