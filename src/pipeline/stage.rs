//! Deal stages and their ordering.

use crate::error::CrmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One phase of the sales process a deal occupies.
///
/// The forward chain runs `Lead → Qualified → Proposal → Negotiation →
/// Closed Won`. `Closed Lost` sits outside the chain: it can be entered
/// from any stage but has no next or previous stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl Stage {
    /// Every stage, in display order.
    pub const ALL: [Stage; 6] = [
        Stage::Lead,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::ClosedWon,
        Stage::ClosedLost,
    ];

    /// The linear chain used by next/previous navigation and the pipeline board.
    pub const FORWARD: [Stage; 5] = [
        Stage::Lead,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::ClosedWon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Lead => "Lead",
            Stage::Qualified => "Qualified",
            Stage::Proposal => "Proposal",
            Stage::Negotiation => "Negotiation",
            Stage::ClosedWon => "Closed Won",
            Stage::ClosedLost => "Closed Lost",
        }
    }

    /// Position in the forward chain, `None` for `Closed Lost`.
    pub fn forward_index(self) -> Option<usize> {
        Self::FORWARD.iter().position(|&s| s == self)
    }

    /// The stage immediately after this one in the forward chain.
    pub fn next(self) -> Option<Stage> {
        let index = self.forward_index()?;
        Self::FORWARD.get(index + 1).copied()
    }

    /// The stage immediately before this one in the forward chain.
    pub fn previous(self) -> Option<Stage> {
        let index = self.forward_index()?;
        index.checked_sub(1).map(|i| Self::FORWARD[i])
    }

    /// Suggested win probability (percent) for a deal entering this stage.
    pub fn default_probability(self) -> u8 {
        match self {
            Stage::Lead => 10,
            Stage::Qualified => 30,
            Stage::Proposal => 50,
            Stage::Negotiation => 70,
            Stage::ClosedWon => 100,
            Stage::ClosedLost => 0,
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }

    pub fn is_open(self) -> bool {
        !self.is_closed()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Lead
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CrmError;

    /// Accepts display names ("Closed Won") as well as snake/kebab/camel
    /// spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "lead" => Ok(Stage::Lead),
            "qualified" => Ok(Stage::Qualified),
            "proposal" => Ok(Stage::Proposal),
            "negotiation" => Ok(Stage::Negotiation),
            "closedwon" | "won" => Ok(Stage::ClosedWon),
            "closedlost" | "lost" => Ok(Stage::ClosedLost),
            _ => Err(CrmError::InvalidStage(s.to_string())),
        }
    }
}

/// Direction of a single step along the forward chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

impl StepDirection {
    /// Apply this step to a stage.
    pub fn step(self, stage: Stage) -> Option<Stage> {
        match self {
            StepDirection::Forward => stage.next(),
            StepDirection::Backward => stage.previous(),
        }
    }
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDirection::Forward => f.write_str("next"),
            StepDirection::Backward => f.write_str("previous"),
        }
    }
}
