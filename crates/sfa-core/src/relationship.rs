use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest affinity a relationship can hold.
pub const MIN_AFFINITY: i32 = -100;
/// Highest affinity a relationship can hold.
pub const MAX_AFFINITY: i32 = 100;

/// Discrete bucket derived from a relationship's affinity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    /// Level ≤ -50.
    Hostile,
    /// Level in [-49, -20].
    Distrustful,
    /// Level in [-19, 19].
    #[default]
    Neutral,
    /// Level in [20, 49].
    Friendly,
    /// Level in [50, 79].
    Ally,
    /// Level ≥ 80.
    BestFriend,
}

impl RelationshipStatus {
    /// All statuses from most hostile to closest.
    pub const ALL: [RelationshipStatus; 6] = [
        Self::Hostile,
        Self::Distrustful,
        Self::Neutral,
        Self::Friendly,
        Self::Ally,
        Self::BestFriend,
    ];

    /// Bucket an affinity level. Thresholds are checked in ascending order.
    pub fn from_level(level: i32) -> Self {
        if level <= -50 {
            Self::Hostile
        } else if level <= -20 {
            Self::Distrustful
        } else if level < 20 {
            Self::Neutral
        } else if level < 50 {
            Self::Friendly
        } else if level < 80 {
            Self::Ally
        } else {
            Self::BestFriend
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hostile => "Hostile",
            Self::Distrustful => "Distrustful",
            Self::Neutral => "Neutral",
            Self::Friendly => "Friendly",
            Self::Ally => "Ally",
            Self::BestFriend => "Best Friend",
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cadet's standing with one NPC.
///
/// On load the level is clamped and the status re-derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRelationship")]
pub struct Relationship {
    /// The NPC this record tracks.
    pub npc_id: String,
    /// NPC display name at the time of the last interaction.
    pub npc_name: String,
    /// Affinity in [`MIN_AFFINITY`, `MAX_AFFINITY`].
    pub level: i32,
    /// Bucket derived from `level`.
    pub status: RelationshipStatus,
    /// Number of recorded interactions.
    pub interaction_count: u32,
    /// When the last interaction happened.
    pub last_interaction: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRelationship {
    npc_id: String,
    #[serde(default)]
    npc_name: String,
    #[serde(default)]
    level: i32,
    #[serde(default)]
    interaction_count: u32,
    #[serde(default)]
    last_interaction: Option<DateTime<Utc>>,
}

impl From<StoredRelationship> for Relationship {
    fn from(stored: StoredRelationship) -> Self {
        let level = stored.level.clamp(MIN_AFFINITY, MAX_AFFINITY);
        Self {
            npc_id: stored.npc_id,
            npc_name: stored.npc_name,
            level,
            status: RelationshipStatus::from_level(level),
            interaction_count: stored.interaction_count,
            last_interaction: stored.last_interaction,
        }
    }
}
