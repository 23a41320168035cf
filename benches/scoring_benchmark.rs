use criterion::{black_box, criterion_group, criterion_main, Criterion};
use novice_tracker::models::Habit;
use novice_tracker::scoring::{self, Direction};
use uuid::Uuid;

fn benchmark_scoring(c: &mut Criterion) {
    let mut habit = Habit::new(
        Uuid::new_v4(),
        "Benchmark habit".to_string(),
        true,
        true,
        10,
        "2026-01-15T10:00:00Z",
    );
    habit.streak_level = -2;

    let mut group = c.benchmark_group("scoring");

    group.bench_function("stat_delta_full_range", |b| {
        b.iter(|| {
            for d in 1..=10 {
                black_box(scoring::stat_delta(black_box(d), Direction::Up));
                black_box(scoring::stat_delta(black_box(d), Direction::Down));
            }
        })
    });

    group.bench_function("score_press", |b| {
        b.iter(|| scoring::score(black_box(&habit), Direction::Up))
    });

    group.finish();
}

criterion_group!(benches, benchmark_scoring);
criterion_main!(benches);
