//! Host command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the host main loop can dispatch on.

use crate::board::Action;
use crate::session::Seat;

/// A parsed client-to-host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new game: `new <game> [<seat0> <seat1>]`.
    /// Seats default to `human ai`.
    New { game: String, seats: [Seat; 2] },

    /// Apply a move: `move <session> <kind> <row> <col> <rank>`.
    Move { session_id: String, action: Action },

    /// Query the state snapshot: `state <session>`.
    State { session_id: String },

    /// Query the legal actions: `legal <session>`.
    Legal { session_id: String },

    /// Query the text board rendering: `render <session>`.
    Render { session_id: String },

    /// Terminate the host process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines and unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to
/// stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "quit" => Some(Command::Quit),
        "new" => parse_new(&tokens),
        "move" => parse_move(&tokens),
        "state" => parse_session_query(&tokens, |session_id| Command::State { session_id }),
        "legal" => parse_session_query(&tokens, |session_id| Command::Legal { session_id }),
        "render" => parse_session_query(&tokens, |session_id| Command::Render { session_id }),
        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `new <game> [<seat0> <seat1>]`.
fn parse_new(tokens: &[&str]) -> Option<Command> {
    match tokens.len() {
        2 => Some(Command::New {
            game: tokens[1].to_string(),
            seats: [Seat::Human, Seat::Ai],
        }),
        4 => {
            let seat0 = Seat::from_name(tokens[2]);
            let seat1 = Seat::from_name(tokens[3]);
            match (seat0, seat1) {
                (Some(seat0), Some(seat1)) => Some(Command::New {
                    game: tokens[1].to_string(),
                    seats: [seat0, seat1],
                }),
                _ => {
                    eprintln!("malformed new: seats must be 'human' or 'ai'");
                    None
                }
            }
        }
        _ => {
            eprintln!("malformed new: expected 'new <game> [<seat0> <seat1>]'");
            None
        }
    }
}

/// Parses `move <session> <kind> <row> <col> <rank>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 6 {
        eprintln!("malformed move: expected 'move <session> <kind> <row> <col> <rank>'");
        return None;
    }

    let mut wire = [0i64; 4];
    for (slot, token) in wire.iter_mut().zip(&tokens[2..]) {
        match token.parse::<i64>() {
            Ok(value) => *slot = value,
            Err(_) => {
                eprintln!("malformed move component: '{}'", token);
                return None;
            }
        }
    }

    match Action::from_indices(&wire) {
        Ok(action) => Some(Command::Move {
            session_id: tokens[1].to_string(),
            action,
        }),
        Err(e) => {
            eprintln!("malformed move: {}", e);
            None
        }
    }
}

/// Parses a single-argument session query.
fn parse_session_query(tokens: &[&str], build: fn(String) -> Command) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed {}: expected '{} <session>'", tokens[0], tokens[0]);
        return None;
    }
    Some(build(tokens[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Pos, Rank};

    #[test]
    fn parses_new_with_default_seats() {
        assert_eq!(
            parse_command("new boop"),
            Some(Command::New {
                game: "boop".to_string(),
                seats: [Seat::Human, Seat::Ai],
            })
        );
    }

    #[test]
    fn parses_new_with_explicit_seats() {
        assert_eq!(
            parse_command("new boop human human"),
            Some(Command::New {
                game: "boop".to_string(),
                seats: [Seat::Human, Seat::Human],
            })
        );
    }

    #[test]
    fn rejects_new_with_bad_seats() {
        assert_eq!(parse_command("new boop human robot"), None);
        assert_eq!(parse_command("new boop human"), None);
    }

    #[test]
    fn parses_move() {
        assert_eq!(
            parse_command("move abc123 0 2 2 0"),
            Some(Command::Move {
                session_id: "abc123".to_string(),
                action: Action::Place {
                    pos: Pos::new(2, 2),
                    rank: Rank::Kitten,
                },
            })
        );
        assert_eq!(
            parse_command("move abc123 1 5 0 1"),
            Some(Command::Move {
                session_id: "abc123".to_string(),
                action: Action::Graduate {
                    pos: Pos::new(5, 0),
                    rank: Rank::Cat,
                },
            })
        );
    }

    #[test]
    fn rejects_malformed_move() {
        assert_eq!(parse_command("move abc123 0 2 2"), None);
        assert_eq!(parse_command("move abc123 0 x 2 0"), None);
        assert_eq!(parse_command("move abc123 7 0 0 0"), None);
    }

    #[test]
    fn parses_session_queries() {
        assert_eq!(
            parse_command("state s1"),
            Some(Command::State {
                session_id: "s1".to_string()
            })
        );
        assert_eq!(
            parse_command("legal s1"),
            Some(Command::Legal {
                session_id: "s1".to_string()
            })
        );
        assert_eq!(
            parse_command("render s1"),
            Some(Command::Render {
                session_id: "s1".to_string()
            })
        );
        assert_eq!(parse_command("state"), None);
    }

    #[test]
    fn ignores_empty_and_unknown_lines() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("frobnicate"), None);
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }
}
