//! Pounce -- a Boop game host.
//!
//! This binary reads line commands from stdin and answers each with a
//! single JSON object on stdout. Games are served from an explicit
//! registry built at startup; AI seats answer through the configured
//! policy with the legality fallback.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use serde::Serialize;

use pounce::engine::Engine;
use pounce::policy::RandomPolicy;
use pounce::protocol::parser::{parse_command, Command};
use pounce::session::{GameSpec, Registry, SessionError, SessionHost};

/// Builds the game-kind table served by this host.
fn build_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(
        "boop",
        GameSpec {
            constructor: Engine::new,
            policy: Arc::new(RandomPolicy::new(0)),
        },
    );
    registry
}

/// Writes one response line: the payload on success, an error object
/// otherwise.
fn respond<W: Write, T: Serialize>(out: &mut W, result: Result<T, SessionError>) {
    let line = match result {
        Ok(value) => serde_json::to_string(&value)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string()),
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    };
    writeln!(out, "{}", line).unwrap();
    out.flush().unwrap();
}

/// Runs the main host loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut host = SessionHost::new(build_registry());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::New { game, seats } => {
                respond(&mut out, host.new_game(&game, seats));
            }
            Command::Move { session_id, action } => {
                respond(&mut out, host.make_move(&session_id, &action));
            }
            Command::State { session_id } => {
                respond(&mut out, host.state_of(&session_id));
            }
            Command::Legal { session_id } => {
                respond(&mut out, host.legal_of(&session_id));
            }
            Command::Render { session_id } => {
                respond(&mut out, host.render_of(&session_id));
            }
            Command::Quit => {
                break;
            }
        }
    }
}
