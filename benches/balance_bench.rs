use criterion::{black_box, criterion_group, criterion_main, Criterion};

use balance_core::content::{EnemyType, PillarId};
use balance_core::drops::DropContext;
use balance_core::mastery::PlayerMasteryProgress;
use balance_core::progression::FortressProgress;
use balance_core::synergy::Roster;
use balance_core::waves::PillarSelection;
use balance_core::{BalanceEngine, Fp, SeededRandom};

fn bench_fixed_point(c: &mut Criterion) {
    let a = Fp::from_ratio(12, 100);
    let b = Fp::from_int(1234);

    c.bench_function("fp_mul", |bench| {
        bench.iter(|| black_box(a).mul(black_box(b)))
    });

    c.bench_function("fp_pow_cycle", |bench| {
        bench.iter(|| Fp::from_ratio(8, 5).pow(black_box(7)))
    });

    c.bench_function("fp_sqrt", |bench| bench.iter(|| black_box(b).sqrt()));
}

fn bench_scaling(c: &mut Criterion) {
    let engine = BalanceEngine::default();

    c.bench_function("enemy_stats", |bench| {
        bench.iter(|| engine.enemy_stats(black_box(EnemyType::Behemoth), black_box(357), true))
    });

    c.bench_function("enemy_rewards", |bench| {
        bench.iter(|| engine.enemy_rewards(black_box(EnemyType::Behemoth), black_box(357), true))
    });
}

fn bench_waves(c: &mut Criterion) {
    let engine = BalanceEngine::default();
    let selection = PillarSelection::default();

    c.bench_function("wave_composition", |bench| {
        bench.iter(|| engine.wave_composition(black_box(47), &selection))
    });

    c.bench_function("preview_100_waves", |bench| {
        bench.iter(|| engine.preview_waves(black_box(1..=100), &selection))
    });
}

fn bench_progression(c: &mut Criterion) {
    let engine = BalanceEngine::default();

    c.bench_function("level_for_xp", |bench| {
        bench.iter(|| engine.level_for_xp(black_box(12_345_678)))
    });

    c.bench_function("grant_xp_50_levels", |bench| {
        let start = FortressProgress::new();
        bench.iter(|| engine.grant_xp(&start, black_box(1_000_000)))
    });
}

fn bench_synergy_and_drops(c: &mut Criterion) {
    let engine = BalanceEngine::default();
    let roster = Roster {
        heroes: vec!["storm".into(), "forge".into(), "vanguard".into()],
        turrets: vec!["arc".into(), "flamer".into(), "mortar".into()],
        perks: vec!["chain_reaction".into(), "fortify".into()],
    };

    c.bench_function("aggregate_synergies", |bench| {
        bench.iter(|| engine.synergies(black_box(&roster)))
    });

    let context = DropContext::boss(EnemyType::Overmind, PillarId::Science);
    c.bench_function("roll_drops", |bench| {
        let mut rng = SeededRandom::new(42);
        bench.iter(|| engine.roll_drops(black_box(&context), &mut rng))
    });

    c.bench_function("mastery_unlock", |bench| {
        let progress = PlayerMasteryProgress::new(10);
        bench.iter(|| engine.unlock_mastery(black_box(&progress), "void_core"))
    });
}

criterion_group!(
    benches,
    bench_fixed_point,
    bench_scaling,
    bench_waves,
    bench_progression,
    bench_synergy_and_drops
);
criterion_main!(benches);
