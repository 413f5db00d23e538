//! Self-play game generation for training data.
//!
//! Plays full Boop games with both seats driven by a policy through the
//! legality fallback, recording every move, reward, and outcome for
//! reinforcement learning. Games can run concurrently on a rayon pool.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::engine::Engine;
use crate::policy::{select_action, Policy, DEFAULT_MAX_RETRIES};

/// Configuration for self-play game generation.
#[derive(Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Turn cap per game; games hitting it are recorded as truncated.
    pub max_turns: u32,
    /// Resample budget for policy proposals before the uniform fallback.
    pub max_retries: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_turns: 300,
            max_retries: DEFAULT_MAX_RETRIES,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A single recorded move from a self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    /// Acting player index.
    pub player: usize,
    /// Wire quadruple of the action taken.
    pub action: [usize; 4],
    /// Reward granted to the acting player.
    pub reward: f64,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Winning player index; `None` when the game was truncated.
    pub winner: Option<usize>,
    /// Moves played, terminal move included.
    pub turns: u32,
    /// True when the turn cap ended the game.
    pub truncated: bool,
    /// All moves in order.
    pub moves: Vec<MoveRecord>,
}

/// Plays a single game and returns its record.
///
/// Both seats draw proposals from `policies` and resolve them through
/// the legality fallback, so every applied action is legal regardless of
/// policy behavior.
pub fn play_game(
    config: &SelfPlayConfig,
    policies: [&dyn Policy; 2],
    game_id: usize,
    rng: &mut SmallRng,
) -> GameRecord {
    let mut engine = Engine::new();
    let mut moves: Vec<MoveRecord> = Vec::new();
    let mut winner = None;
    let mut truncated = false;

    loop {
        if moves.len() as u32 >= config.max_turns {
            truncated = true;
            break;
        }

        let side = engine.state.to_move;
        let action = match select_action(
            policies[side.index()],
            &engine,
            rng,
            config.max_retries,
        ) {
            Some(action) => action,
            None => {
                truncated = true;
                break;
            }
        };

        let result = engine.step(&action);
        moves.push(MoveRecord {
            player: side.index(),
            action: action.to_indices(),
            reward: result.reward,
        });

        if result.terminated {
            // No turn switch on a win: the actor is the winner.
            winner = Some(side.index());
            break;
        }
    }

    GameRecord {
        game_id,
        winner,
        turns: moves.len() as u32,
        truncated,
        moves,
    }
}

/// Runs self-play generation, producing all game records.
pub fn run_self_play(config: &SelfPlayConfig, policy: Arc<dyn Policy>) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, policy, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed game.
///
/// This lets the caller process games incrementally (e.g. stream to disk)
/// rather than waiting for the whole batch.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, policy: Arc<dyn Policy>, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, policy, on_game);
    } else {
        run_self_play_sequential(config, policy, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, policy: Arc<dyn Policy>, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, [policy.as_ref(), policy.as_ref()], i, &mut rng);
        if !config.quiet {
            report_game(&game, i + 1, config.num_games, game_start.elapsed().as_secs_f64());
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// A channel delivers completed games to the callback from workers.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, policy: Arc<dyn Policy>, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let game_start = Instant::now();
                    let game = play_game(
                        &config_clone,
                        [policy.as_ref(), policy.as_ref()],
                        i,
                        &mut rng,
                    );
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report_game(
                            &game,
                            n,
                            config_clone.num_games,
                            game_start.elapsed().as_secs_f64(),
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the main thread and pass to callback.
    for game in rx {
        on_game(game);
    }

    handle.join().expect("selfplay worker thread panicked");
}

/// Prints one per-game progress line to stderr.
fn report_game(game: &GameRecord, n: usize, total: usize, elapsed: f64) {
    let outcome = match game.winner {
        Some(winner) => format!("player {} wins", winner),
        None => "truncated".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} in {} turns ({:.1}s)",
        n, total, outcome, game.turns, elapsed,
    );
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints an aggregate summary of a batch of games to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let mut wins = [0usize; 2];
    let mut truncated = 0usize;
    let mut total_turns = 0u64;

    for game in games {
        match game.winner {
            Some(winner) => wins[winner] += 1,
            None => truncated += 1,
        }
        total_turns += u64::from(game.turns);
    }

    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f64 / games.len() as f64
    };
    eprintln!(
        "Summary: {} games, player 0 wins {}, player 1 wins {}, truncated {}, avg {:.1} turns",
        games.len(),
        wins[0],
        wins[1],
        truncated,
        avg_turns,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RandomPolicy;

    fn seeded_config() -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 3,
            threads: 1,
            seed: 42,
            quiet: true,
            ..SelfPlayConfig::default()
        }
    }

    #[test]
    fn play_game_produces_consistent_record() {
        let config = seeded_config();
        let policy = RandomPolicy::new(17);
        let mut rng = SmallRng::seed_from_u64(1);

        let game = play_game(&config, [&policy, &policy], 0, &mut rng);

        assert_eq!(game.turns as usize, game.moves.len());
        assert!(game.turns <= config.max_turns);
        if let Some(winner) = game.winner {
            assert!(!game.truncated);
            let last = game.moves.last().unwrap();
            assert_eq!(last.player, winner);
            assert_eq!(last.reward, 1.0);
        } else {
            assert!(game.truncated);
        }
        // Turns alternate between the players throughout.
        for pair in game.moves.windows(2) {
            assert_ne!(pair[0].player, pair[1].player);
        }
    }

    #[test]
    fn run_self_play_plays_requested_games() {
        let config = seeded_config();
        let games = run_self_play(&config, Arc::new(RandomPolicy::new(9)));

        assert_eq!(games.len(), 3);
        for (i, game) in games.iter().enumerate() {
            assert_eq!(game.game_id, i);
        }
    }

    #[test]
    fn sequential_self_play_is_reproducible() {
        let config = seeded_config();
        let a = run_self_play(&config, Arc::new(RandomPolicy::new(9)));
        let b = run_self_play(&config, Arc::new(RandomPolicy::new(9)));

        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_eq!(a_json, b_json);
    }

    #[test]
    fn parallel_self_play_delivers_all_games() {
        let config = SelfPlayConfig {
            num_games: 4,
            threads: 2,
            seed: 7,
            quiet: true,
            ..SelfPlayConfig::default()
        };
        let games = run_self_play(&config, Arc::new(RandomPolicy::new(3)));

        assert_eq!(games.len(), 4);
        let mut ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn jsonl_output_is_one_valid_object_per_line() {
        let config = seeded_config();
        let games = run_self_play(&config, Arc::new(RandomPolicy::new(9)));

        let mut buffer = Vec::new();
        write_jsonl(&games, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), games.len());
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["game_id"].is_u64());
            assert!(value["moves"].is_array());
        }
    }
}
