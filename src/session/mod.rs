//! Session hosting.
//!
//! Multiplexes live games for an external UI: a registry of playable
//! game kinds (an explicit configuration table injected at startup), a
//! store of active sessions, re-validation of every externally supplied
//! action, and AI replies driven through the policy fallback. The
//! transport that carries requests -- HTTP or the stdin protocol -- stays
//! outside this module.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use crate::board::Action;
use crate::engine::{Engine, StateSnapshot};
use crate::policy::{select_action, Policy, DEFAULT_MAX_RETRIES};

/// Errors reported to the transport layer.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game '{0}' is not supported")]
    UnknownGame(String),

    #[error("invalid session id: {0}")]
    UnknownSession(String),
}

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human,
    Ai,
}

impl Seat {
    /// Parses a seat name as it appears in protocol commands.
    pub fn from_name(name: &str) -> Option<Seat> {
        match name {
            "human" => Some(Seat::Human),
            "ai" => Some(Seat::Ai),
            _ => None,
        }
    }
}

/// A playable game kind: how to construct a fresh engine and which
/// decision component answers for AI seats.
#[derive(Clone)]
pub struct GameSpec {
    pub constructor: fn() -> Engine,
    pub policy: Arc<dyn Policy>,
}

/// The game-kind table, built at startup and injected into the host.
#[derive(Default, Clone)]
pub struct Registry {
    games: HashMap<String, GameSpec>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry {
            games: HashMap::new(),
        }
    }

    /// Registers a game kind under an identifier.
    pub fn register(&mut self, name: impl Into<String>, spec: GameSpec) {
        self.games.insert(name.into(), spec);
    }

    /// Looks up a game kind.
    pub fn get(&self, name: &str) -> Option<&GameSpec> {
        self.games.get(name)
    }
}

/// One live game.
struct Session {
    engine: Engine,
    seats: [Seat; 2],
    policy: Arc<dyn Policy>,
}

/// Response to a successful `new_game`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGameResponse {
    pub session_id: String,
    pub state: StateSnapshot,
    pub status: String,
}

/// Response to a `make_move`.
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse {
    pub state: StateSnapshot,
    pub status: String,
    pub game_over: bool,
}

/// Response to a `legal` query: wire quadruples in enumeration order.
#[derive(Debug, Clone, Serialize)]
pub struct LegalResponse {
    pub legal: Vec<[usize; 4]>,
}

/// Response to a `render` query.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub render: String,
    pub current_player: usize,
}

/// Hosts live sessions over an injected registry.
///
/// Sessions are destroyed as soon as their game terminates; later
/// requests against the id fail with `UnknownSession`.
pub struct SessionHost {
    registry: Registry,
    sessions: HashMap<String, Session>,
    rng: SmallRng,
}

impl SessionHost {
    /// Creates a host over the given registry, seeding ids from entropy.
    pub fn new(registry: Registry) -> Self {
        SessionHost {
            registry,
            sessions: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a host with a fixed RNG seed for reproducible ids and
    /// AI fallback draws.
    pub fn with_seed(registry: Registry, seed: u64) -> Self {
        SessionHost {
            registry,
            sessions: HashMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Starts a new game of the given kind and returns its session id
    /// and initial state.
    pub fn new_game(
        &mut self,
        game: &str,
        seats: [Seat; 2],
    ) -> Result<NewGameResponse, SessionError> {
        let spec = self
            .registry
            .get(game)
            .ok_or_else(|| SessionError::UnknownGame(game.to_string()))?;

        let mut engine = (spec.constructor)();
        engine.reset();
        let policy = Arc::clone(&spec.policy);

        let mut session_id = fresh_id(&mut self.rng);
        while self.sessions.contains_key(&session_id) {
            session_id = fresh_id(&mut self.rng);
        }

        let state = engine.snapshot();
        self.sessions.insert(
            session_id.clone(),
            Session {
                engine,
                seats,
                policy,
            },
        );

        Ok(NewGameResponse {
            session_id,
            state,
            status: "Game started".to_string(),
        })
    }

    /// Applies an externally supplied move to a session.
    ///
    /// The action is re-validated regardless of source; an illegal action
    /// gets an "invalid action" response and leaves the state untouched.
    /// When the game continues and the next seat is an AI, the host
    /// answers through the policy fallback before responding.
    pub fn make_move(
        &mut self,
        session_id: &str,
        action: &Action,
    ) -> Result<MoveResponse, SessionError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;

        if !session.engine.is_legal(action) {
            return Ok(MoveResponse {
                state: session.engine.snapshot(),
                status: "Invalid action! Try again.".to_string(),
                game_over: false,
            });
        }

        let result = session.engine.step(action);
        if result.terminated {
            let winner = session.engine.state.to_move.index();
            let response = MoveResponse {
                state: session.engine.snapshot(),
                status: format!("Game over! Player {} wins!", winner),
                game_over: true,
            };
            self.sessions.remove(session_id);
            return Ok(response);
        }

        let next = session.engine.state.to_move;
        if session.seats[next.index()] == Seat::Ai {
            let policy = Arc::clone(&session.policy);
            if let Some(ai_action) =
                select_action(policy.as_ref(), &session.engine, &mut self.rng, DEFAULT_MAX_RETRIES)
            {
                let ai_result = session.engine.step(&ai_action);
                if ai_result.terminated {
                    let status = if ai_result.reward > 0.0 {
                        "Game over! AI wins!".to_string()
                    } else {
                        "Game over! It's a draw!".to_string()
                    };
                    let response = MoveResponse {
                        state: session.engine.snapshot(),
                        status,
                        game_over: true,
                    };
                    self.sessions.remove(session_id);
                    return Ok(response);
                }
            }
        }

        let current = session.engine.state.to_move.index();
        Ok(MoveResponse {
            state: session.engine.snapshot(),
            status: format!("Player {}'s turn.", current),
            game_over: false,
        })
    }

    /// Returns the current state snapshot of a session.
    pub fn state_of(&self, session_id: &str) -> Result<StateSnapshot, SessionError> {
        self.session(session_id)
            .map(|session| session.engine.snapshot())
    }

    /// Returns the legal actions of a session as wire quadruples.
    pub fn legal_of(&self, session_id: &str) -> Result<LegalResponse, SessionError> {
        self.session(session_id).map(|session| LegalResponse {
            legal: session
                .engine
                .legal_actions()
                .iter()
                .map(|action| action.to_indices())
                .collect(),
        })
    }

    /// Returns the text rendering of a session's board.
    pub fn render_of(&self, session_id: &str) -> Result<RenderResponse, SessionError> {
        self.session(session_id).map(|session| RenderResponse {
            render: session.engine.state.render(),
            current_player: session.engine.state.to_move.index(),
        })
    }

    fn session(&self, session_id: &str) -> Result<&Session, SessionError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }

    #[cfg(test)]
    fn engine_mut(&mut self, session_id: &str) -> Option<&mut Engine> {
        self.sessions
            .get_mut(session_id)
            .map(|session| &mut session.engine)
    }
}

/// Draws a fresh 32-hex-digit session id.
fn fresh_id(rng: &mut SmallRng) -> String {
    (0..4).map(|_| format!("{:08x}", rng.gen::<u32>())).collect()
}
