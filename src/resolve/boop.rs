//! The boop cascade.
//!
//! A newly placed piece pushes each of its eight neighbors one cell
//! further along the placement->neighbor direction. Cats cannot be booped
//! by kittens; everything else moves. Pushes are evaluated one direction
//! at a time against the board as mutated so far, never chained beyond
//! one cell, and a piece pushed off the board returns to its owner's
//! stock rather than the booper's.

use crate::board::{GameState, Pos};

/// Neighbor offsets in cascade evaluation order.
const NEIGHBOR_DIRS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Runs the boop cascade for a piece just placed at `origin`.
///
/// No-op if `origin` is empty. Each push destination is two cells from
/// the origin, so the eight destinations are pairwise distinct and the
/// placed piece itself never moves.
pub fn boop_adjacent(state: &mut GameState, origin: Pos) {
    let booper_is_cat = match state.piece_at(origin) {
        Some(piece) => piece.is_cat(),
        None => return,
    };

    for &(dr, dc) in &NEIGHBOR_DIRS {
        let neighbor_pos = match origin.offset(dr, dc) {
            Some(pos) => pos,
            None => continue,
        };
        let neighbor = match state.piece_at(neighbor_pos) {
            Some(piece) => piece,
            None => continue,
        };
        if !booper_is_cat && neighbor.is_cat() {
            continue;
        }

        match neighbor_pos.offset(dr, dc) {
            Some(dest) => {
                // Occupied destination blocks the push entirely.
                if state.piece_at(dest).is_none() {
                    if let Some(piece) = state.take(neighbor_pos) {
                        state.put(dest, piece);
                    }
                }
            }
            None => {
                // Pushed off the board: back to the owner's stock.
                if let Some(piece) = state.take(neighbor_pos) {
                    let owner = state.player_mut(piece.owner);
                    *owner.placed.get_mut(piece.rank) -= 1;
                    *owner.stock.get_mut(piece.rank) += 1;
                }
            }
        }
    }
}
