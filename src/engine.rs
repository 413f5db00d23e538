//! Engine facade.
//!
//! Owns a single game's state and exposes the environment surface consumed
//! by hosts and drivers: reset, the legality predicate, legal-action
//! enumeration, transitions, observation encoding, and a serializable
//! state snapshot. One engine instance per game session; callers serialize
//! access themselves (there is no internal concurrency).

use serde::Serialize;

use crate::board::{Action, GameState, PieceCounts, Pos, Rank, Side, COLS, ROWS};
use crate::movegen;
use crate::nn::encoding::{encode_observation, Observation};
use crate::resolve;

/// Per-cell entry in a state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Owning player index (0 or 1).
    pub owner: usize,
    pub rank: Rank,
}

/// Serializable snapshot of the full game state.
///
/// This is the only engine state ever serialized to an external caller;
/// session and presentation layers use it to render boards and report
/// progress.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub board: [[Option<CellView>; COLS]; ROWS],
    /// Stock counts indexed by player.
    pub stock: [PieceCounts; 2],
    pub current_player: usize,
    pub terminated: bool,
}

/// Side information reported with a transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Cells of the winning cat lines, set exactly when the step won.
    pub winning_line: Option<Vec<Pos>>,
    /// Kittens promoted to cats by the step.
    pub promoted: u32,
}

/// Result of one transition.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub observation: Observation,
    /// Reward for the player who acted.
    pub reward: f64,
    pub terminated: bool,
    /// Always false: the engine applies no step limit. A turn cap, if
    /// any, is layered by the caller.
    pub truncated: bool,
    pub info: StepInfo,
}

/// A deterministic Boop rules engine for one game.
pub struct Engine {
    pub state: GameState,
}

impl Engine {
    /// Creates an engine in the starting position.
    pub fn new() -> Self {
        Engine {
            state: GameState::new(),
        }
    }

    /// Resets to the starting position and returns the initial observation.
    pub fn reset(&mut self) -> Observation {
        self.state = GameState::new();
        self.observation()
    }

    /// Encodes the current state as an observation tensor.
    pub fn observation(&self) -> Observation {
        encode_observation(&self.state)
    }

    /// Returns true if the side to move may apply `action`.
    pub fn is_legal(&self, action: &Action) -> bool {
        movegen::is_legal(&self.state, action)
    }

    /// Enumerates every legal action in the fixed enumeration order.
    pub fn legal_actions(&self) -> Vec<Action> {
        movegen::legal_actions(&self.state)
    }

    /// Applies one action and reports the transition.
    ///
    /// The action must have passed [`Engine::is_legal`]; stepping an
    /// unchecked action is a caller contract violation, not a runtime
    /// error the engine defends against.
    pub fn step(&mut self, action: &Action) -> StepResult {
        let outcome = resolve::apply_action(&mut self.state, action);
        StepResult {
            observation: self.observation(),
            reward: outcome.reward,
            terminated: outcome.terminated,
            truncated: false,
            info: StepInfo {
                winning_line: outcome.winning_line,
                promoted: outcome.promoted,
            },
        }
    }

    /// Builds the serializable snapshot of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        let mut board = [[None; COLS]; ROWS];
        for (row, cells) in self.state.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                board[row][col] = cell.map(|piece| CellView {
                    owner: piece.owner.index(),
                    rank: piece.rank,
                });
            }
        }
        StateSnapshot {
            board,
            stock: [
                self.state.player(Side::Black).stock,
                self.state.player(Side::White).stock,
            ],
            current_player: self.state.to_move.index(),
            terminated: self.state.terminated,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
