//! What one turn decided and why, for logs and downstream storage.

use crate::conflict::Review;
use crate::legality::Correction;
use crate::rules::Candidate;
use crate::sanity::SanityVerdict;
use serde::Serialize;
use std::fmt;
use types::{Call, Position};

/// The pipeline stage that replaced a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Legality,
    Sanity,
    Conflict,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Legality => "legality",
            Stage::Sanity => "sanity",
            Stage::Conflict => "conflict",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Override {
    pub stage: Stage,
    pub from: Call,
    pub to: Call,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRecord {
    pub seat: Position,
    /// The registry's pick, with the rule that made it and the rules it beat.
    pub proposed: Candidate,
    pub corrected: Correction,
    pub sanity: SanityVerdict,
    pub review: Review,
    pub final_call: Call,
    pub rationale: String,
    pub overrides: Vec<Override>,
}

impl TurnRecord {
    pub fn was_overridden(&self) -> bool {
        !self.overrides.is_empty()
    }

    pub fn override_at(&self, stage: Stage) -> Option<&Override> {
        self.overrides.iter().find(|o| o.stage == stage)
    }

    /// Rule rationale followed by every override reason.
    pub(crate) fn rationale_for(proposed: &Candidate, overrides: &[Override]) -> String {
        std::iter::once(proposed.rationale.as_str())
            .chain(overrides.iter().map(|o| o.reason.as_str()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for TurnRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.seat, self.final_call.notation(), self.rationale)?;
        for o in &self.overrides {
            write!(f, "\n  [{}] {} -> {}: {}", o.stage, o.from.notation(), o.to.notation(), o.reason)?;
        }
        Ok(())
    }
}
