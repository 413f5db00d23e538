//! The decision-component boundary.
//!
//! A policy maps an observation to a proposed action. Proposals are
//! untrusted input: a policy may be wrong or propose illegal moves, so
//! every proposal passes through `select_action`, which re-validates
//! against the engine and falls back to a uniformly random legal action
//! after a bounded number of resamples.

pub mod neural;

pub use neural::OnnxPolicy;

use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Action, Pos, Rank, COLS, ROWS};
use crate::engine::Engine;
use crate::movegen;
use crate::nn::encoding::Observation;

/// Default resample budget for policy proposals.
pub const DEFAULT_MAX_RETRIES: usize = 200;

/// An opaque decision component.
///
/// Implementations receive an observation and return an action that may
/// be illegal; callers must never step the engine with it unchecked.
pub trait Policy: Send + Sync {
    /// Proposes an action for the given observation.
    fn predict(&self, obs: &Observation) -> Action;
}

/// Samples uniformly from the raw 2x6x6x2 action space, legality blind.
pub struct RandomPolicy {
    rng: Mutex<SmallRng>,
}

impl RandomPolicy {
    /// Creates a random policy. Seed 0 draws from entropy.
    pub fn new(seed: u64) -> Self {
        let rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
        RandomPolicy {
            rng: Mutex::new(rng),
        }
    }
}

impl Policy for RandomPolicy {
    fn predict(&self, _obs: &Observation) -> Action {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let pos = Pos::new(rng.gen_range(0..ROWS), rng.gen_range(0..COLS));
        let rank = if rng.gen_range(0..2) == 0 {
            Rank::Kitten
        } else {
            Rank::Cat
        };
        if rng.gen_range(0..2) == 0 {
            Action::Place { pos, rank }
        } else {
            Action::Graduate { pos, rank }
        }
    }
}

/// Resolves a policy's proposal into a legal action.
///
/// Resamples the policy up to `max_retries` times, accepting the first
/// legal proposal; after that, draws uniformly from `legal_actions()`.
/// Returns `None` only if the state has no legal action at all, which is
/// unreachable from the starting position.
pub fn select_action(
    policy: &dyn Policy,
    engine: &Engine,
    rng: &mut impl Rng,
    max_retries: usize,
) -> Option<Action> {
    let obs = engine.observation();
    for _ in 0..max_retries {
        let proposal = policy.predict(&obs);
        if engine.is_legal(&proposal) {
            return Some(proposal);
        }
    }
    movegen::random_action(&engine.state, rng)
}
