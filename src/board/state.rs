//! Game state representation.
//!
//! Holds the complete snapshot of a Boop game at a given point in time:
//! the 6x6 grid, both players' piece pools, whose turn it is, and whether
//! the game has ended. The grid is a fixed-size array of optional pieces,
//! owned exclusively by the state; all mutation goes through `&mut` access.

use super::piece::{Piece, Side};
use super::player::PlayerState;

/// Board height.
pub const ROWS: usize = 6;

/// Board width.
pub const COLS: usize = 6;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// Creates a position. Callers are responsible for bounds.
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }

    /// Returns the position offset by `(dr, dc)`, or `None` if it leaves
    /// the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col) {
            Some(Pos::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

/// Complete game state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Occupant of each cell, row-major.
    pub cells: [[Option<Piece>; COLS]; ROWS],
    /// Piece pools, indexed by `Side::index()`.
    pub players: [PlayerState; 2],
    /// The side to act next.
    pub to_move: Side,
    /// Completed turns since the start of the game.
    pub turn_count: u32,
    /// Set once a player has won; no further actions are applied.
    pub terminated: bool,
}

impl GameState {
    /// Creates the starting state: empty board, full stocks, `Black` to move.
    pub fn new() -> Self {
        GameState {
            cells: [[None; COLS]; ROWS],
            players: [PlayerState::new(), PlayerState::new()],
            to_move: Side::Black,
            turn_count: 0,
            terminated: false,
        }
    }

    /// Returns the occupant of a cell.
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.cells[pos.row][pos.col]
    }

    /// Places a piece in a cell, replacing any occupant.
    pub fn put(&mut self, pos: Pos, piece: Piece) {
        self.cells[pos.row][pos.col] = Some(piece);
    }

    /// Removes and returns the occupant of a cell.
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        self.cells[pos.row][pos.col].take()
    }

    /// Returns the pools of the given side.
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    /// Returns mutable pools for the given side.
    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side.index()]
    }

    /// Returns how many pieces the side currently has on the board.
    pub fn total_placed(&self, side: Side) -> u8 {
        self.player(side).placed.total()
    }

    /// Renders the board as a text diagram, one row per line:
    /// `.` empty, `b`/`w` kittens, `B`/`W` cats.
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(piece) => piece.symbol(),
                        None => '.',
                    })
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::Rank;

    #[test]
    fn new_state_is_empty() {
        let state = GameState::new();
        assert!(state
            .cells
            .iter()
            .all(|row| row.iter().all(|c| c.is_none())));
        assert_eq!(state.to_move, Side::Black);
        assert_eq!(state.turn_count, 0);
        assert!(!state.terminated);
    }

    #[test]
    fn put_and_take() {
        let mut state = GameState::new();
        let pos = Pos::new(2, 3);
        let piece = Piece::new(Side::White, Rank::Cat);

        state.put(pos, piece);
        assert_eq!(state.piece_at(pos), Some(piece));

        assert_eq!(state.take(pos), Some(piece));
        assert_eq!(state.piece_at(pos), None);
    }

    #[test]
    fn offset_stays_on_board() {
        let pos = Pos::new(0, 5);
        assert_eq!(pos.offset(1, 0), Some(Pos::new(1, 5)));
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, 1), None);
        assert_eq!(Pos::new(5, 0).offset(1, -1), None);
    }

    #[test]
    fn total_placed_counts_both_ranks() {
        let mut state = GameState::new();
        state.player_mut(Side::Black).placed.kitten = 5;
        state.player_mut(Side::Black).placed.cat = 2;
        assert_eq!(state.total_placed(Side::Black), 7);
        assert_eq!(state.total_placed(Side::White), 0);
    }

    #[test]
    fn render_shows_symbols() {
        let mut state = GameState::new();
        state.put(Pos::new(0, 0), Piece::new(Side::Black, Rank::Kitten));
        state.put(Pos::new(0, 2), Piece::new(Side::White, Rank::Cat));

        let rendered = state.render();
        let first_line = rendered.lines().next().unwrap();
        assert_eq!(first_line, "b . W . . .");
        assert_eq!(rendered.lines().count(), ROWS);
    }
}
