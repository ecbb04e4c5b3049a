//! Mission playthroughs.
//!
//! A [`MissionRun`] walks a mission's narrative one choice at a time,
//! resolving checks and accumulating XP, reputation and discipline. It
//! ends in [`MissionState::Completed`] or [`MissionState::Failed`], at
//! which point [`MissionRun::finish`] turns it into a
//! [`MissionResult`](sfa_core::MissionResult) for progression.

pub mod run;

pub use run::MissionRun;

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeOutcome;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MissionState {
    /// Waiting for a choice at this narrative step.
    InProgress {
        /// Index into the mission's narrative.
        step: usize,
    },
    /// The mission was completed.
    Completed,
    /// The mission was failed.
    Failed,
}

impl MissionState {
    /// Returns true for `Completed` and `Failed`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress { .. })
    }
}

impl std::fmt::Display for MissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress { step } => write!(f, "step {step}"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// What happened when one choice was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    /// Step the choice was made at.
    pub step: usize,
    /// Index of the choice taken.
    pub choice: usize,
    /// The check, if the choice had one.
    pub check: Option<ChallengeOutcome>,
    /// Change to the running XP total. Negative when a penalty applied.
    pub xp_change: i64,
    /// Reputation change from this choice.
    pub reputation_change: i32,
    /// Discipline change from this choice.
    pub discipline_change: i32,
    /// State after the choice.
    pub state: MissionState,
}
