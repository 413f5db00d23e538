use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use pounce::board::{Action, Piece, Pos, Rank, Side};
use pounce::engine::Engine;
use pounce::movegen::{legal_actions, random_action};
use pounce::nn::encoding::encode_observation;

/// Plays a seeded random prefix to get a representative mid-game state.
fn mid_game_engine(moves: usize) -> Engine {
    let mut engine = Engine::new();
    let mut rng = SmallRng::seed_from_u64(1234);
    for _ in 0..moves {
        if engine.state.terminated {
            break;
        }
        match random_action(&engine.state, &mut rng) {
            Some(action) => {
                engine.step(&action);
            }
            None => break,
        }
    }
    engine
}

fn bench_legal_actions(c: &mut Criterion) {
    let opening = Engine::new();
    c.bench_function("legal_actions_opening", |b| {
        b.iter(|| legal_actions(black_box(&opening.state)))
    });

    let mid = mid_game_engine(14);
    c.bench_function("legal_actions_mid_game", |b| {
        b.iter(|| legal_actions(black_box(&mid.state)))
    });
}

fn bench_step_placement(c: &mut Criterion) {
    let mid = mid_game_engine(14);
    let action = legal_actions(&mid.state)
        .into_iter()
        .find(|a| matches!(a, Action::Place { .. }))
        .expect("mid-game state has a legal placement");

    c.bench_function("step_placement_with_cascade", |b| {
        b.iter_batched(
            || mid.state.clone(),
            |state| {
                let mut engine = Engine { state };
                engine.step(black_box(&action))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_encode_observation(c: &mut Criterion) {
    let mid = mid_game_engine(14);
    c.bench_function("encode_observation", |b| {
        b.iter(|| encode_observation(black_box(&mid.state)))
    });
}

fn bench_cascade_heavy_placement(c: &mut Criterion) {
    // A cat dropped into a crowded neighborhood pushes four pieces.
    let mut engine = Engine::new();
    let center = Pos::new(3, 3);
    for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        let pos = center.offset(dr, dc).unwrap();
        engine.state.put(pos, Piece::new(Side::White, Rank::Kitten));
    }
    engine.state.player_mut(Side::White).stock.kitten = 4;
    engine.state.player_mut(Side::White).placed.kitten = 4;
    engine.state.player_mut(Side::Black).stock.kitten = 7;
    engine.state.player_mut(Side::Black).stock.cat = 1;
    let target = Action::Place {
        pos: center,
        rank: Rank::Cat,
    };

    c.bench_function("step_crowded_placement", |b| {
        b.iter_batched(
            || engine.state.clone(),
            |state| {
                let mut engine = Engine { state };
                engine.step(black_box(&target))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_random_game(c: &mut Criterion) {
    c.bench_function("full_random_game", |b| {
        b.iter(|| {
            let mut engine = Engine::new();
            let mut rng = SmallRng::seed_from_u64(99);
            for _ in 0..300 {
                if engine.state.terminated {
                    break;
                }
                match random_action(&engine.state, &mut rng) {
                    Some(action) => {
                        engine.step(&action);
                    }
                    None => break,
                }
            }
            black_box(engine.state.turn_count)
        })
    });
}

criterion_group!(
    benches,
    bench_legal_actions,
    bench_step_placement,
    bench_encode_observation,
    bench_cascade_heavy_placement,
    bench_full_random_game,
);
criterion_main!(benches);
