//! Game state -> tensor encoding.
//!
//! Produces a [6, 6, 5] f32 tensor, channel-last, flattened row-major.
//! All values lie in [0, 1].
//!
//! Channel layout per cell:
//!   0: cell holds a Black piece
//!   1: cell holds a White piece
//!   2: occupant is a cat (either side)
//!   3: Black's remaining stock fraction, broadcast over all cells
//!   4: White's remaining stock fraction, broadcast over all cells
//!
//! The observation is derived on demand from board and stock; it is never
//! stored as primary state.

use crate::board::{GameState, Pos, Side, COLS, ROWS};

/// Channels per cell.
pub const NUM_CHANNELS: usize = 5;

/// Length of the flattened observation tensor.
pub const OBS_LEN: usize = ROWS * COLS * NUM_CHANNELS;

/// A flattened observation tensor.
pub type Observation = [f32; OBS_LEN];

/// Channel offset constants.
const CHAN_BLACK: usize = 0;
const CHAN_WHITE: usize = 1;
const CHAN_CAT: usize = 2;
const CHAN_BLACK_STOCK: usize = 3;
const CHAN_WHITE_STOCK: usize = 4;

/// Returns the flat tensor index of `(row, col, channel)`.
#[inline]
pub const fn obs_index(row: usize, col: usize, channel: usize) -> usize {
    (row * COLS + col) * NUM_CHANNELS + channel
}

/// Encodes a `GameState` into the flat observation tensor.
pub fn encode_observation(state: &GameState) -> Observation {
    let mut tensor = [0.0f32; OBS_LEN];

    let black_stock = state.player(Side::Black).stock_fraction();
    let white_stock = state.player(Side::White).stock_fraction();

    for row in 0..ROWS {
        for col in 0..COLS {
            if let Some(piece) = state.piece_at(Pos::new(row, col)) {
                let owner_chan = match piece.owner {
                    Side::Black => CHAN_BLACK,
                    Side::White => CHAN_WHITE,
                };
                tensor[obs_index(row, col, owner_chan)] = 1.0;
                if piece.is_cat() {
                    tensor[obs_index(row, col, CHAN_CAT)] = 1.0;
                }
            }
            tensor[obs_index(row, col, CHAN_BLACK_STOCK)] = black_stock;
            tensor[obs_index(row, col, CHAN_WHITE_STOCK)] = white_stock;
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Rank};

    #[test]
    fn initial_observation_is_empty_board_full_stock() {
        let state = GameState::new();
        let obs = encode_observation(&state);

        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(obs[obs_index(row, col, 0)], 0.0);
                assert_eq!(obs[obs_index(row, col, 1)], 0.0);
                assert_eq!(obs[obs_index(row, col, 2)], 0.0);
                assert_eq!(obs[obs_index(row, col, 3)], 1.0);
                assert_eq!(obs[obs_index(row, col, 4)], 1.0);
            }
        }
    }

    #[test]
    fn pieces_set_owner_and_cat_channels() {
        let mut state = GameState::new();
        state.put(Pos::new(1, 2), Piece::new(Side::Black, Rank::Kitten));
        state.put(Pos::new(4, 5), Piece::new(Side::White, Rank::Cat));

        let obs = encode_observation(&state);

        assert_eq!(obs[obs_index(1, 2, 0)], 1.0);
        assert_eq!(obs[obs_index(1, 2, 1)], 0.0);
        assert_eq!(obs[obs_index(1, 2, 2)], 0.0);

        assert_eq!(obs[obs_index(4, 5, 0)], 0.0);
        assert_eq!(obs[obs_index(4, 5, 1)], 1.0);
        assert_eq!(obs[obs_index(4, 5, 2)], 1.0);
    }

    #[test]
    fn stock_channels_broadcast_fraction() {
        let mut state = GameState::new();
        state.player_mut(Side::Black).stock.kitten = 3;
        state.player_mut(Side::Black).stock.cat = 1;
        state.player_mut(Side::White).stock.kitten = 0;

        let obs = encode_observation(&state);

        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(obs[obs_index(row, col, 3)], 0.5);
                assert_eq!(obs[obs_index(row, col, 4)], 0.0);
            }
        }
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut state = GameState::new();
        state.put(Pos::new(0, 0), Piece::new(Side::Black, Rank::Cat));
        state.put(Pos::new(5, 5), Piece::new(Side::White, Rank::Kitten));

        let obs = encode_observation(&state);
        assert!(obs.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
