//! Action application.
//!
//! Applies a validated action to a game state: the placement branch runs
//! the boop cascade, then the promotion pass, then the win check; the
//! graduation/removal branch converts a piece back into cat stock. Both
//! branches end the acting player's turn unless the game just terminated.

pub mod boop;
pub mod lines;

pub use boop::boop_adjacent;
pub use lines::find_lines;

use crate::board::{Action, GameState, Piece, Pos, Rank};

/// Reward granted per promoted kitten and per graduation/removal.
pub const MINOR_REWARD: f64 = 0.1;

/// Reward granted for winning.
pub const WIN_REWARD: f64 = 1.0;

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Reward for the acting player.
    pub reward: f64,
    /// True when this action won the game.
    pub terminated: bool,
    /// Cells of the winning cat lines when the game just ended.
    pub winning_line: Option<Vec<Pos>>,
    /// Kittens promoted to cats by this action.
    pub promoted: u32,
}

/// Applies a legal action to `state` and reports the outcome.
///
/// The caller must have validated `action` with [`crate::movegen::is_legal`]
/// first; applying an unchecked action violates the engine's contract and
/// leaves the piece bookkeeping undefined.
pub fn apply_action(state: &mut GameState, action: &Action) -> StepOutcome {
    match *action {
        Action::Place { pos, rank } => apply_placement(state, pos, rank),
        Action::Graduate { pos, .. } => apply_graduation(state, pos),
    }
}

fn apply_placement(state: &mut GameState, pos: Pos, rank: Rank) -> StepOutcome {
    let side = state.to_move;
    {
        let player = state.player_mut(side);
        *player.stock.get_mut(rank) -= 1;
        *player.placed.get_mut(rank) += 1;
    }
    state.put(pos, Piece::new(side, rank));

    boop_adjacent(state, pos);

    // Promotion pass: every kitten in any matched line converts to a cat
    // in stock. Overlapping lines repeat cells; the occupancy re-check
    // makes the repeats harmless.
    let mut reward = 0.0;
    let mut promoted = 0;
    for line_pos in find_lines(state, side, false) {
        if let Some(piece) = state.piece_at(line_pos) {
            if !piece.is_cat() {
                state.take(line_pos);
                let player = state.player_mut(side);
                player.placed.kitten -= 1;
                player.stock.cat += 1;
                reward += MINOR_REWARD;
                promoted += 1;
            }
        }
    }

    let winning = find_lines(state, side, true);
    if !winning.is_empty() {
        state.terminated = true;
        return StepOutcome {
            reward: WIN_REWARD,
            terminated: true,
            winning_line: Some(winning),
            promoted,
        };
    }

    state.to_move = side.opponent();
    state.turn_count += 1;
    StepOutcome {
        reward,
        terminated: false,
        winning_line: None,
        promoted,
    }
}

fn apply_graduation(state: &mut GameState, pos: Pos) -> StepOutcome {
    let side = state.to_move;
    if let Some(piece) = state.take(pos) {
        let player = state.player_mut(side);
        *player.placed.get_mut(piece.rank) -= 1;
        player.stock.cat += 1;
    }

    // Graduation/removal ends the turn exactly like a placement.
    state.to_move = side.opponent();
    state.turn_count += 1;
    StepOutcome {
        reward: MINOR_REWARD,
        terminated: false,
        winning_line: None,
        promoted: 0,
    }
}
