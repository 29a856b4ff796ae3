//! Stage transitions and the probability side effect.

use super::Stage;
use serde::{Deserialize, Serialize};

/// A deal moving from one stage to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub from: Stage,
    pub to: Stage,
    /// Probability the deal carries after the move.
    pub probability: u8,
}

/// Work out what a stage change does to a deal currently at `from`.
///
/// Returns `None` when `to == from`: the move is a no-op and the deal's
/// probability is left alone. Otherwise the new probability is the
/// caller's override if one was given, else the target stage's default.
pub fn plan_transition(
    from: Stage,
    to: Stage,
    probability_override: Option<u8>,
) -> Option<StageChange> {
    if from == to {
        return None;
    }

    Some(StageChange {
        from,
        to,
        probability: probability_override.unwrap_or_else(|| to.default_probability()),
    })
}
