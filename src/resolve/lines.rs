//! Three-in-a-line detection.
//!
//! Shared by the promotion check (any rank) and the win check (cats
//! only). A line is three collinear, board-adjacent cells along one of
//! the four axes, all occupied by the same side.

use crate::board::{GameState, Pos, Side, COLS, ROWS};

/// The four line axes: row, column, and the two diagonals.
const LINE_DIRS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Finds every three-cell line owned by `side`.
///
/// Returns the concatenated cells of all matched windows in scan order;
/// overlapping lines contribute their shared cells repeatedly, which
/// promotion tolerates by re-checking occupancy. Empty when nothing
/// matches. With `only_cats`, every cell of a window must hold a cat.
pub fn find_lines(state: &GameState, side: Side, only_cats: bool) -> Vec<Pos> {
    let mut matches = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            let start = Pos::new(row, col);
            for &(dr, dc) in &LINE_DIRS {
                if let Some(window) = window_from(start, dr, dc) {
                    if window
                        .iter()
                        .all(|&pos| cell_matches(state, pos, side, only_cats))
                    {
                        matches.extend_from_slice(&window);
                    }
                }
            }
        }
    }
    matches
}

/// Builds the three-cell window starting at `start`, or `None` if it
/// runs off the board.
fn window_from(start: Pos, dr: i32, dc: i32) -> Option<[Pos; 3]> {
    let second = start.offset(dr, dc)?;
    let third = second.offset(dr, dc)?;
    Some([start, second, third])
}

fn cell_matches(state: &GameState, pos: Pos, side: Side, only_cats: bool) -> bool {
    match state.piece_at(pos) {
        Some(piece) => piece.owner == side && (!only_cats || piece.is_cat()),
        None => false,
    }
}
