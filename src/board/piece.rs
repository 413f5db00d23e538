//! Pieces and the players that own them.
//!
//! A piece is a kitten or a cat belonging to one of the two sides. Pieces
//! are immutable values: mutation of a cell always replaces the whole
//! occupant rather than editing it in place.

use serde::{Deserialize, Serialize};

/// One of the two players. `Black` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

/// Both sides in turn order.
pub const ALL_SIDES: [Side; 2] = [Side::Black, Side::White];

impl Side {
    /// Returns the side's player index (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Side::Black => 0,
            Side::White => 1,
        }
    }

    /// Returns the side with the given player index.
    pub const fn from_index(idx: usize) -> Option<Side> {
        match idx {
            0 => Some(Side::Black),
            1 => Some(Side::White),
            _ => None,
        }
    }

    /// Returns the opposing side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// The rank of a piece. Kittens promote to cats; cats never demote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Kitten,
    Cat,
}

impl Rank {
    /// Returns the rank's wire index (0 = kitten, 1 = cat).
    pub const fn index(self) -> usize {
        match self {
            Rank::Kitten => 0,
            Rank::Cat => 1,
        }
    }

    /// Returns the rank with the given wire index.
    pub const fn from_index(idx: usize) -> Option<Rank> {
        match idx {
            0 => Some(Rank::Kitten),
            1 => Some(Rank::Cat),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Side,
    pub rank: Rank,
}

impl Piece {
    /// Creates a piece.
    pub const fn new(owner: Side, rank: Rank) -> Self {
        Piece { owner, rank }
    }

    /// Returns true if the piece is a cat.
    pub const fn is_cat(self) -> bool {
        matches!(self.rank, Rank::Cat)
    }

    /// Returns the render symbol: `b`/`w` for kittens, `B`/`W` for cats.
    pub const fn symbol(self) -> char {
        match (self.owner, self.rank) {
            (Side::Black, Rank::Kitten) => 'b',
            (Side::White, Rank::Kitten) => 'w',
            (Side::Black, Rank::Cat) => 'B',
            (Side::White, Rank::Cat) => 'W',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_index_roundtrip() {
        for side in ALL_SIDES {
            assert_eq!(Side::from_index(side.index()), Some(side));
        }
        assert_eq!(Side::from_index(2), None);
    }

    #[test]
    fn opponent_flips() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
        for side in ALL_SIDES {
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn rank_index_roundtrip() {
        for rank in [Rank::Kitten, Rank::Cat] {
            assert_eq!(Rank::from_index(rank.index()), Some(rank));
        }
        assert_eq!(Rank::from_index(2), None);
    }

    #[test]
    fn piece_symbols() {
        assert_eq!(Piece::new(Side::Black, Rank::Kitten).symbol(), 'b');
        assert_eq!(Piece::new(Side::White, Rank::Kitten).symbol(), 'w');
        assert_eq!(Piece::new(Side::Black, Rank::Cat).symbol(), 'B');
        assert_eq!(Piece::new(Side::White, Rank::Cat).symbol(), 'W');
    }

    #[test]
    fn is_cat_only_for_cats() {
        assert!(Piece::new(Side::Black, Rank::Cat).is_cat());
        assert!(!Piece::new(Side::Black, Rank::Kitten).is_cat());
    }
}
