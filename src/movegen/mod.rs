//! Legality checking and legal-action enumeration.
//!
//! `is_legal` is the single pure predicate used for validating externally
//! supplied actions and for enumeration. `legal_actions` walks the full
//! action space in a fixed order so callers can pick fallback actions
//! deterministically or reproducibly at random.

use rand::Rng;

use crate::board::{Action, GameState, Pos, Rank, COLS, PIECES_PER_PLAYER, ROWS};

/// Returns true if the side to move may apply `action` in `state`.
///
/// Placements need an empty target cell and stock of the placed rank.
/// Graduation/removal is gated on the acting player having all eight
/// pieces on the board and an empty cat stock; the action's rank names
/// the resulting piece and must be `Cat`, while the targeted piece may be
/// a kitten (graduate) or a cat (return to stock).
pub fn is_legal(state: &GameState, action: &Action) -> bool {
    let pos = action.pos();
    if pos.row >= ROWS || pos.col >= COLS {
        return false;
    }
    let player = state.player(state.to_move);

    match *action {
        Action::Place { pos, rank } => {
            state.piece_at(pos).is_none() && player.stock.get(rank) > 0
        }
        Action::Graduate { pos, rank } => {
            if player.placed.total() < PIECES_PER_PLAYER {
                return false;
            }
            let piece = match state.piece_at(pos) {
                Some(piece) => piece,
                None => return false,
            };
            piece.owner == state.to_move && rank == Rank::Cat && player.stock.cat == 0
        }
    }
}

/// Enumerates every legal action for the side to move.
///
/// Order is fixed: cells row-major, then rank (kitten before cat), then
/// action kind (place before graduate).
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let mut legal = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            let pos = Pos::new(row, col);
            for rank in [Rank::Kitten, Rank::Cat] {
                for action in [Action::Place { pos, rank }, Action::Graduate { pos, rank }] {
                    if is_legal(state, &action) {
                        legal.push(action);
                    }
                }
            }
        }
    }
    legal
}

/// Picks a uniformly random legal action, or `None` if there is none.
pub fn random_action(state: &GameState, rng: &mut impl Rng) -> Option<Action> {
    let legal = legal_actions(state);
    if legal.is_empty() {
        None
    } else {
        Some(legal[rng.gen_range(0..legal.len())])
    }
}
