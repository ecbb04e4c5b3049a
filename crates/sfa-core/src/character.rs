use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attribute::{Attribute, Attributes};
use crate::error::{CoreError, CoreResult};
use crate::item::Equipment;

/// Unique identifier for a cadet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CadetId(pub Uuid);

impl CadetId {
    /// Generate a new random cadet ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CadetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CadetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Playable species. Each grants a fixed attribute bonus at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Adaptable and determined.
    Human,
    /// Logic and emotional control.
    Vulcan,
    /// Honorable warriors.
    Andorian,
    /// Telepathic empaths.
    Betazoid,
    /// Wisdom of joined lifetimes.
    Trill,
    /// Faith and resilience.
    Bajoran,
    /// Between two worlds.
    HalfVulcan,
}

impl Species {
    /// All playable species.
    pub const ALL: [Species; 7] = [
        Self::Human,
        Self::Vulcan,
        Self::Andorian,
        Self::Betazoid,
        Self::Trill,
        Self::Bajoran,
        Self::HalfVulcan,
    ];

    /// Attribute bonuses applied on top of the base scores at creation.
    pub fn bonuses(self) -> &'static [(Attribute, u32)] {
        match self {
            Self::Human => &[(Attribute::Charisma, 2)],
            Self::Vulcan => &[(Attribute::Logic, 3)],
            Self::Andorian => &[(Attribute::Agility, 2), (Attribute::Strength, 1)],
            Self::Betazoid => &[(Attribute::Charisma, 2), (Attribute::Intelligence, 1)],
            Self::Trill => &[(Attribute::Intelligence, 2), (Attribute::Logic, 1)],
            Self::Bajoran => &[(Attribute::Strength, 2), (Attribute::Charisma, 1)],
            Self::HalfVulcan => &[(Attribute::Logic, 2), (Attribute::Charisma, 1)],
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Vulcan => "vulcan",
            Self::Andorian => "andorian",
            Self::Betazoid => "betazoid",
            Self::Trill => "trill",
            Self::Bajoran => "bajoran",
            Self::HalfVulcan => "half_vulcan",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Species {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|sp| sp.key() == normalized)
            .ok_or_else(|| CoreError::UnknownSpecies(s.to_string()))
    }
}

/// Academy division a cadet trains in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    /// Leadership and tactics.
    Command,
    /// Research and analysis.
    Science,
    /// Technology and repairs.
    Engineering,
    /// Health and wellbeing.
    Medical,
    /// Protection and defense.
    Security,
}

impl Division {
    /// All divisions.
    pub const ALL: [Division; 5] = [
        Self::Command,
        Self::Science,
        Self::Engineering,
        Self::Medical,
        Self::Security,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Science => "science",
            Self::Engineering => "engineering",
            Self::Medical => "medical",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Division {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.key() == normalized)
            .ok_or_else(|| CoreError::UnknownDivision(s.to_string()))
    }
}

/// Academy rank, looked up from a fixed table by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Level 1.
    #[default]
    CadetFourthClass,
    /// Level 2.
    CadetThirdClass,
    /// Level 3.
    CadetSecondClass,
    /// Level 4.
    CadetFirstClass,
    /// Level 5.
    Ensign,
    /// Level 6.
    LieutenantJuniorGrade,
    /// Level 7.
    Lieutenant,
    /// Level 8.
    LieutenantCommander,
    /// Level 9.
    Commander,
    /// Level 10 and above.
    Captain,
}

impl Rank {
    /// The rank table in ascending order.
    pub const ALL: [Rank; 10] = [
        Self::CadetFourthClass,
        Self::CadetThirdClass,
        Self::CadetSecondClass,
        Self::CadetFirstClass,
        Self::Ensign,
        Self::LieutenantJuniorGrade,
        Self::Lieutenant,
        Self::LieutenantCommander,
        Self::Commander,
        Self::Captain,
    ];

    /// Rank for a level: `ALL[min(level - 1, last)]`.
    ///
    /// Levels past the end of the table stay at [`Rank::Captain`]; level 0
    /// maps to the first rank.
    pub fn for_level(level: u32) -> Self {
        let index = (level.saturating_sub(1) as usize).min(Self::ALL.len() - 1);
        Self::ALL[index]
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::CadetFourthClass => "Cadet Fourth Class",
            Self::CadetThirdClass => "Cadet Third Class",
            Self::CadetSecondClass => "Cadet Second Class",
            Self::CadetFirstClass => "Cadet First Class",
            Self::Ensign => "Ensign",
            Self::LieutenantJuniorGrade => "Lieutenant Junior Grade",
            Self::Lieutenant => "Lieutenant",
            Self::LieutenantCommander => "Lieutenant Commander",
            Self::Commander => "Commander",
            Self::Captain => "Captain",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

fn first_level() -> u32 {
    1
}

/// A player's cadet.
///
/// Owned by the player session. The rules engine never mutates a cadet in
/// place: every operation takes `&Character` and hands back a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCharacter")]
pub struct Character {
    /// Cadet identifier.
    pub id: CadetId,
    /// Display name.
    pub name: String,
    /// Species chosen at creation.
    pub species: Species,
    /// Division chosen at creation.
    pub division: Division,
    /// Current level (1-based).
    pub level: u32,
    /// XP accumulated toward the next level.
    pub xp: u64,
    /// Rank derived from `level`.
    pub rank: Rank,
    /// Attribute scores (each at least 1).
    pub attributes: Attributes,
    /// Attribute points awarded but not yet allocated.
    pub unspent_attribute_points: u32,
    /// Skill points awarded but not yet spent.
    pub unspent_skill_points: u32,
    /// Lifetime attribute points earned from level-ups.
    pub total_attribute_points_earned: u32,
    /// Owned skills, in the order they were acquired.
    pub skill_ids: Vec<String>,
    /// Level of each owned skill.
    pub skill_levels: BTreeMap<String, u32>,
    /// Missions completed successfully.
    pub completed_missions: Vec<String>,
    /// Credits balance.
    pub credits: u64,
    /// Decorations awarded.
    pub decorations: Vec<String>,
    /// Running reputation total from mission results.
    pub reputation: i32,
    /// Running discipline total from mission results.
    pub discipline: i32,
    /// Equipped items by slot.
    #[serde(rename = "equippedItems")]
    pub equipment: Equipment,
}

/// A cadet as written in a save.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCharacter {
    #[serde(default)]
    id: CadetId,
    name: String,
    species: Species,
    division: Division,
    #[serde(default = "first_level")]
    level: u32,
    #[serde(default)]
    xp: u64,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    unspent_attribute_points: u32,
    #[serde(default)]
    unspent_skill_points: u32,
    #[serde(default)]
    total_attribute_points_earned: u32,
    #[serde(default)]
    skill_ids: Vec<String>,
    #[serde(default)]
    skill_levels: BTreeMap<String, u32>,
    #[serde(default)]
    completed_missions: Vec<String>,
    #[serde(default)]
    credits: u64,
    #[serde(default)]
    decorations: Vec<String>,
    #[serde(default)]
    reputation: i32,
    #[serde(default)]
    discipline: i32,
    #[serde(default, rename = "equippedItems")]
    equipment: Equipment,
}

impl From<StoredCharacter> for Character {
    fn from(stored: StoredCharacter) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            species: stored.species,
            division: stored.division,
            level: stored.level,
            xp: stored.xp,
            rank: Rank::for_level(stored.level),
            attributes: stored.attributes,
            unspent_attribute_points: stored.unspent_attribute_points,
            unspent_skill_points: stored.unspent_skill_points,
            total_attribute_points_earned: stored.total_attribute_points_earned,
            skill_ids: stored.skill_ids,
            skill_levels: stored.skill_levels,
            completed_missions: stored.completed_missions,
            credits: stored.credits,
            decorations: stored.decorations,
            reputation: stored.reputation,
            discipline: stored.discipline,
            equipment: stored.equipment,
        }
    }
}

impl Character {
    /// A fresh level-1 cadet with the given attributes.
    pub fn new(
        name: impl Into<String>,
        species: Species,
        division: Division,
        attributes: Attributes,
    ) -> Self {
        Self {
            id: CadetId::new(),
            name: name.into(),
            species,
            division,
            level: 1,
            xp: 0,
            rank: Rank::for_level(1),
            attributes,
            unspent_attribute_points: 0,
            unspent_skill_points: 0,
            total_attribute_points_earned: 0,
            skill_ids: Vec::new(),
            skill_levels: BTreeMap::new(),
            completed_missions: Vec::new(),
            credits: 0,
            decorations: Vec::new(),
            reputation: 0,
            discipline: 0,
            equipment: Equipment::default(),
        }
    }

    /// Returns true if the cadet owns the skill.
    pub fn owns_skill(&self, skill_id: &str) -> bool {
        self.skill_ids.iter().any(|id| id == skill_id)
    }

    /// Level of an owned skill. Owned skills without a recorded level are
    /// at level 1; unowned skills return `None`.
    pub fn skill_level(&self, skill_id: &str) -> Option<u32> {
        if !self.owns_skill(skill_id) {
            return None;
        }
        Some(self.skill_levels.get(skill_id).copied().unwrap_or(1))
    }

    /// Returns true if the mission is in the completed list.
    pub fn has_completed(&self, mission_id: &str) -> bool {
        self.completed_missions.iter().any(|m| m == mission_id)
    }
}
