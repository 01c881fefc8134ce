//! Match finder and state snapshot benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pile_match::cards::Dealer;
use pile_match::core::GameRng;
use pile_match::rules::{find_matches, MatchSnapshot};

fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    for piles in [1usize, 4, 8] {
        let state = Dealer::new()
            .decks(2)
            .side_piles(piles)
            .deal(&mut GameRng::new(42));
        group.bench_with_input(BenchmarkId::from_parameter(piles), &state, |b, state| {
            b.iter(|| find_matches(black_box(state)))
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let state = Dealer::new().decks(8).side_piles(8).deal(&mut GameRng::new(7));
    let snapshot = MatchSnapshot::fresh(&state);

    c.bench_function("state_clone", |b| b.iter(|| black_box(&state).clone()));
    c.bench_function("redeal_check", |b| {
        b.iter(|| snapshot.any_still_present(black_box(&state)))
    });
}

criterion_group!(benches, bench_find_matches, bench_snapshot);
criterion_main!(benches);
