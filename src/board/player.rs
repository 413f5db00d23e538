//! Per-player piece bookkeeping.
//!
//! Each player owns a fixed allotment of eight pieces. At any point every
//! piece is either in the player's off-board stock or placed on the board,
//! so `stock + placed` across both ranks always sums to the allotment.

use serde::Serialize;

use super::piece::Rank;

/// Total pieces allotted to each player.
pub const PIECES_PER_PLAYER: u8 = 8;

/// Kitten/cat counts for one pool (stock or placed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PieceCounts {
    pub kitten: u8,
    pub cat: u8,
}

impl PieceCounts {
    /// Returns the count for the given rank.
    pub const fn get(&self, rank: Rank) -> u8 {
        match rank {
            Rank::Kitten => self.kitten,
            Rank::Cat => self.cat,
        }
    }

    /// Returns a mutable reference to the count for the given rank.
    pub fn get_mut(&mut self, rank: Rank) -> &mut u8 {
        match rank {
            Rank::Kitten => &mut self.kitten,
            Rank::Cat => &mut self.cat,
        }
    }

    /// Returns the combined kitten and cat count.
    pub const fn total(&self) -> u8 {
        self.kitten + self.cat
    }
}

/// One player's stock and placed pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    /// Pieces held off-board, available to place.
    pub stock: PieceCounts,
    /// Pieces currently on the board.
    pub placed: PieceCounts,
}

impl PlayerState {
    /// Creates the starting pools: eight kittens in stock, nothing placed.
    pub const fn new() -> Self {
        PlayerState {
            stock: PieceCounts {
                kitten: PIECES_PER_PLAYER,
                cat: 0,
            },
            placed: PieceCounts { kitten: 0, cat: 0 },
        }
    }

    /// Returns the fraction of the allotment still in stock, in [0, 1].
    pub fn stock_fraction(&self) -> f32 {
        f32::from(self.stock.total()) / f32::from(PIECES_PER_PLAYER)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::new()
    }
}
