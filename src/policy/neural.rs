//! ONNX-backed policy inference.
//!
//! Loads a trained policy network via the `ort` crate and proposes
//! actions by taking the argmax of each action-component logit block
//! (kind, row, col, rank). Without the `neural` feature, or when no
//! model is loaded, prediction degrades to a fixed proposal that the
//! host-side fallback replaces with a legal action.

#[cfg(feature = "neural")]
use ort::session::{builder::GraphOptimizationLevel, Session};
#[cfg(feature = "neural")]
use std::sync::Mutex;

use super::Policy;
use crate::board::{Action, Pos, Rank, COLS, ROWS};
use crate::nn::encoding::Observation;
#[cfg(feature = "neural")]
use crate::nn::encoding::NUM_CHANNELS;

/// Logit block sizes per action component: kind, row, col, rank.
const HEAD_SIZES: [usize; 4] = [2, ROWS, COLS, 2];

/// A policy backed by an ONNX model.
pub struct OnnxPolicy {
    #[cfg(feature = "neural")]
    session: Option<Mutex<Session>>,
}

impl OnnxPolicy {
    /// Creates an ONNX policy, loading the model from `path`.
    ///
    /// A missing or unloadable model leaves the policy in degraded mode
    /// rather than failing: every proposal is then the fixed fallback.
    pub fn new(path: &str) -> Self {
        #[cfg(feature = "neural")]
        {
            let session = load_session(path).map(Mutex::new);
            if session.is_some() {
                eprintln!("info: loaded policy ONNX model from {}", path);
            }
            OnnxPolicy { session }
        }

        #[cfg(not(feature = "neural"))]
        {
            let _ = path;
            eprintln!("info: neural policy disabled (compiled without 'neural' feature)");
            OnnxPolicy {}
        }
    }

    /// Returns true if a model is loaded.
    pub fn has_model(&self) -> bool {
        #[cfg(feature = "neural")]
        {
            self.session.is_some()
        }
        #[cfg(not(feature = "neural"))]
        {
            false
        }
    }
}

/// Loads an ONNX session from a file path. Returns None on failure.
#[cfg(feature = "neural")]
fn load_session(path: &str) -> Option<Session> {
    match Session::builder()
        .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
        .and_then(|b| b.with_intra_threads(1))
        .and_then(|b| b.commit_from_file(path))
    {
        Ok(session) => Some(session),
        Err(e) => {
            eprintln!("info: failed to load ONNX model {}: {}", path, e);
            None
        }
    }
}

/// Runs the model on one observation, returning the flat logit vector.
#[cfg(feature = "neural")]
fn run_inference(session: &mut Session, obs: &Observation) -> Option<Vec<f32>> {
    use ort::value::Value;

    let input = Value::from_array(([1, ROWS, COLS, NUM_CHANNELS], obs.to_vec())).ok()?;
    let outputs = session.run(ort::inputs![input]).ok()?;
    let (_shape, data) = outputs[0].try_extract_tensor::<f32>().ok()?;
    Some(data.to_vec())
}

/// Decodes flat logits into an action by per-component argmax.
///
/// Returns None if the logit vector is shorter than the four blocks.
#[cfg_attr(not(feature = "neural"), allow(dead_code))]
fn decode_logits(logits: &[f32]) -> Option<Action> {
    let total: usize = HEAD_SIZES.iter().sum();
    if logits.len() < total {
        return None;
    }

    let mut components = [0usize; 4];
    let mut offset = 0;
    for (i, &size) in HEAD_SIZES.iter().enumerate() {
        let head = &logits[offset..offset + size];
        let mut best = 0;
        for (j, &value) in head.iter().enumerate() {
            if value > head[best] {
                best = j;
            }
        }
        components[i] = best;
        offset += size;
    }

    let wire: Vec<i64> = components.iter().map(|&c| c as i64).collect();
    Action::from_indices(&wire).ok()
}

/// Proposal used when no model output is available.
const fn fallback_proposal() -> Action {
    Action::Place {
        pos: Pos::new(0, 0),
        rank: Rank::Kitten,
    }
}

impl Policy for OnnxPolicy {
    fn predict(&self, obs: &Observation) -> Action {
        #[cfg(feature = "neural")]
        if let Some(mutex) = &self.session {
            let mut session = match mutex.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(logits) = run_inference(&mut session, obs) {
                if let Some(action) = decode_logits(&logits) {
                    return action;
                }
            }
        }

        let _ = obs;
        fallback_proposal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_logits_takes_argmax_per_head() {
        // kind: 1, row: 4, col: 0, rank: 1.
        let mut logits = vec![0.0f32; 16];
        logits[1] = 2.0; // kind = graduate
        logits[2 + 4] = 3.0; // row = 4
        logits[2 + 6] = 0.5; // col = 0
        logits[2 + 6 + 6 + 1] = 1.0; // rank = cat

        let action = decode_logits(&logits).unwrap();
        assert_eq!(
            action,
            Action::Graduate {
                pos: Pos::new(4, 0),
                rank: Rank::Cat
            }
        );
    }

    #[test]
    fn decode_logits_rejects_short_vector() {
        assert_eq!(decode_logits(&[0.0; 10]), None);
    }

    #[test]
    fn degraded_policy_proposes_fixed_action() {
        #[cfg(not(feature = "neural"))]
        {
            let policy = OnnxPolicy::new("missing.onnx");
            assert!(!policy.has_model());
            let obs = crate::engine::Engine::new().observation();
            assert_eq!(policy.predict(&obs), fallback_proposal());
        }
    }
}
