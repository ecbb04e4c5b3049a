//! Mission definitions and the result of playing one.
//!
//! Missions are read-only reference data supplied by the content layer.
//! The narrative is an ordered list of steps; each choice either jumps to
//! another step by index or ends the mission via the `-1` marker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// How hard a mission is rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionDifficulty {
    /// One star.
    Beginner,
    /// Two stars.
    Easy,
    /// Three stars.
    #[default]
    Medium,
    /// Four stars.
    Hard,
    /// Five stars.
    Elite,
    /// The no-win scenario.
    KobayashiMaru,
}

impl MissionDifficulty {
    /// Returns true for the no-win scenario, where failed checks are not
    /// penalized.
    pub fn is_no_win(self) -> bool {
        matches!(self, Self::KobayashiMaru)
    }
}

impl fmt::Display for MissionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Beginner => "Beginner",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Elite => "Elite",
            Self::KobayashiMaru => "Kobayashi Maru",
        };
        f.write_str(label)
    }
}

/// Mission category shown on the mission board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    /// Charting the unknown.
    Exploration,
    /// Tactical engagements.
    Combat,
    /// Negotiation and first contact.
    Diplomacy,
    /// Scientific investigation.
    Research,
    /// Search and rescue.
    Rescue,
    /// Holding a position.
    Defense,
    /// Covert operations.
    Infiltration,
    /// Academy exercises.
    Training,
}

/// Where a choice leads.
///
/// Serialized as an integer: a step index, or `-1` for the end of the
/// mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum NextStep {
    /// Continue at this narrative step.
    Step(usize),
    /// The terminal marker.
    End,
}

impl TryFrom<i64> for NextStep {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::End),
            n if n >= 0 => usize::try_from(n)
                .map(Self::Step)
                .map_err(|_| format!("step index {n} out of range")),
            n => Err(format!("invalid next step {n}: expected an index or -1")),
        }
    }
}

impl From<NextStep> for i64 {
    fn from(next: NextStep) -> Self {
        match next {
            NextStep::Step(n) => n as i64,
            NextStep::End => -1,
        }
    }
}

/// One option the player can pick at a narrative step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Text shown to the player.
    #[serde(default)]
    pub text: String,
    /// XP granted when the choice succeeds.
    #[serde(default)]
    pub xp_bonus: u32,
    /// Attribute tested by this choice, if any.
    #[serde(default)]
    pub required_attribute: Option<Attribute>,
    /// Total needed to pass the check.
    #[serde(default)]
    pub required_value: Option<u32>,
    /// Where the choice leads. Absent means the mission ends on success.
    #[serde(default)]
    pub next_step: Option<NextStep>,
}

impl Choice {
    /// A choice with no check that leads to `next`.
    pub fn new(text: impl Into<String>, next_step: Option<NextStep>) -> Self {
        Self {
            text: text.into(),
            xp_bonus: 0,
            required_attribute: None,
            required_value: None,
            next_step,
        }
    }

    /// Set the XP bonus (builder style).
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp_bonus = xp;
        self
    }

    /// Gate the choice behind an attribute check (builder style).
    pub fn with_check(mut self, attribute: Attribute, required: u32) -> Self {
        self.required_attribute = Some(attribute);
        self.required_value = Some(required);
        self
    }

    /// The attribute check, present only when both the attribute and a
    /// positive required value are set.
    pub fn requirement(&self) -> Option<(Attribute, u32)> {
        match (self.required_attribute, self.required_value) {
            (Some(attribute), Some(value)) if value > 0 => Some((attribute, value)),
            _ => None,
        }
    }
}

/// A narrative beat with the choices available at it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeStep {
    /// Narration shown before the choices.
    #[serde(default)]
    pub text: String,
    /// Options available at this step.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Flat rewards granted on successful completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRewards {
    /// Credits added to the cadet's balance.
    #[serde(default)]
    pub credits: u64,
    /// Extra skill points on top of those from level-ups.
    #[serde(default)]
    pub skill_points: u32,
    /// Skill unlocked directly by id.
    #[serde(default)]
    pub skill_id: Option<String>,
    /// Decoration awarded.
    #[serde(default)]
    pub decoration_id: Option<String>,
}

/// A mission definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    /// Mission identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Mission category.
    #[serde(default, rename = "type")]
    pub kind: Option<MissionType>,
    /// Difficulty rating.
    #[serde(default)]
    pub difficulty: MissionDifficulty,
    /// Base XP granted on completion.
    #[serde(default)]
    pub xp_reward: u32,
    /// Name of a skill unlocked on completion.
    #[serde(default)]
    pub skill_reward: Option<String>,
    /// Flat rewards granted on completion.
    #[serde(default)]
    pub rewards: MissionRewards,
    /// Ordered narrative steps; play starts at index 0.
    #[serde(default)]
    pub narrative: Vec<NarrativeStep>,
}

/// Aggregate outcome of one mission playthrough.
///
/// Produced once when a run reaches a terminal state and consumed once by
/// progression. Submitting the same result twice applies it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionResult {
    /// Mission that was played.
    pub mission_id: String,
    /// Mission title, for logs.
    #[serde(default)]
    pub mission_title: String,
    /// Total XP to apply.
    pub xp_gained: u64,
    /// Whether the mission was completed.
    pub success: bool,
    /// Name of a skill unlocked by completion.
    #[serde(default)]
    pub skill_gained: Option<String>,
    /// Net reputation change.
    pub reputation_change: i32,
    /// Net discipline change.
    pub discipline_change: i32,
    /// Flat rewards, present only on success.
    #[serde(default)]
    pub rewards: Option<MissionRewards>,
}
