//! Actions and their wire encoding.
//!
//! An action is either a placement or a graduation/removal, targeting one
//! cell with one rank. Externally actions travel as a quadruple of integers
//! `[kind, row, col, rank]` matching the original environment's action
//! space; `from_indices` decodes that shape.
//!
//! Decoding only validates the kind and rank discriminants. Coordinates
//! are carried as-is, off-board values included, so that legality checking
//! (not parsing) is the single place that rejects them.

use thiserror::Error;

use super::piece::Rank;
use super::state::Pos;

/// Errors from decoding a wire action quadruple.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("expected 4 action components, got {0}")]
    WrongLength(usize),

    #[error("invalid action kind index: {0}")]
    InvalidKind(i64),

    #[error("invalid rank index: {0}")]
    InvalidRank(i64),

    #[error("negative coordinate: {0}")]
    NegativeCoordinate(i64),
}

/// A single move by the side to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a piece of `rank` from stock onto an empty cell.
    Place { pos: Pos, rank: Rank },

    /// Graduate a kitten in the cell to a cat in stock, or return a cat
    /// in the cell to stock. Only legal with `rank = Cat`: the rank names
    /// the resulting piece.
    Graduate { pos: Pos, rank: Rank },
}

impl Action {
    /// Returns the targeted cell.
    pub const fn pos(self) -> Pos {
        match self {
            Action::Place { pos, .. } | Action::Graduate { pos, .. } => pos,
        }
    }

    /// Returns the action's rank component.
    pub const fn rank(self) -> Rank {
        match self {
            Action::Place { rank, .. } | Action::Graduate { rank, .. } => rank,
        }
    }

    /// Returns the wire index of the action kind (0 = place, 1 = graduate).
    pub const fn kind_index(self) -> usize {
        match self {
            Action::Place { .. } => 0,
            Action::Graduate { .. } => 1,
        }
    }

    /// Encodes the action as the `[kind, row, col, rank]` wire quadruple.
    pub fn to_indices(self) -> [usize; 4] {
        let pos = self.pos();
        [self.kind_index(), pos.row, pos.col, self.rank().index()]
    }

    /// Decodes a wire quadruple into an action.
    pub fn from_indices(indices: &[i64]) -> Result<Action, ActionError> {
        if indices.len() != 4 {
            return Err(ActionError::WrongLength(indices.len()));
        }
        let (kind, row, col, rank) = (indices[0], indices[1], indices[2], indices[3]);

        for &coord in &[row, col] {
            if coord < 0 {
                return Err(ActionError::NegativeCoordinate(coord));
            }
        }
        let rank = match rank {
            0 => Rank::Kitten,
            1 => Rank::Cat,
            other => return Err(ActionError::InvalidRank(other)),
        };
        let pos = Pos::new(row as usize, col as usize);

        match kind {
            0 => Ok(Action::Place { pos, rank }),
            1 => Ok(Action::Graduate { pos, rank }),
            other => Err(ActionError::InvalidKind(other)),
        }
    }
}
