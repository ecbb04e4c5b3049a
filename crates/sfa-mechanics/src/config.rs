//! Tunable rules constants.
//!
//! Every number the engine awards or deducts lives here. The defaults
//! reproduce the academy's live balance; a partial JSON document can
//! override any subset because every struct is `#[serde(default)]`.

use serde::{Deserialize, Serialize};

/// Points awarded per level and creation limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionConfig {
    /// Attribute points granted per level gained.
    pub attribute_points_per_level: u32,
    /// Skill points granted per level gained.
    pub skill_points_per_level: u32,
    /// Highest value an attribute can be raised to by spending points.
    pub attribute_cap: u32,
    /// Free points a new cadet may distribute at creation.
    pub creation_points: u32,
    /// Skill points a new cadet starts with.
    pub starting_skill_points: u32,
    /// Credits a new cadet starts with.
    pub starting_credits: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            attribute_points_per_level: 2,
            skill_points_per_level: 2,
            attribute_cap: 20,
            creation_points: 5,
            starting_skill_points: 3,
            starting_credits: 100,
        }
    }
}

impl ProgressionConfig {
    /// Set the points granted per level (builder style).
    pub fn with_points_per_level(mut self, attribute: u32, skill: u32) -> Self {
        self.attribute_points_per_level = attribute;
        self.skill_points_per_level = skill;
        self
    }

    /// Set the attribute cap (builder style).
    pub fn with_attribute_cap(mut self, cap: u32) -> Self {
        self.attribute_cap = cap;
        self
    }

    /// Set the free creation points (builder style).
    pub fn with_creation_points(mut self, points: u32) -> Self {
        self.creation_points = points;
        self
    }
}

/// Reputation, discipline and XP adjustments applied during a mission, and
/// ship combat payouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewardConfig {
    /// Reputation for a choice with no check.
    pub narrative_reputation: i32,
    /// Reputation for passing a check.
    pub check_success_reputation: i32,
    /// Discipline for passing a check.
    pub check_success_discipline: i32,
    /// XP removed for failing a check. The running total never drops below zero.
    pub check_failure_xp_penalty: u64,
    /// Reputation change for failing a check (negative).
    pub check_failure_reputation: i32,
    /// Discipline change for failing a check (negative).
    pub check_failure_discipline: i32,
    /// Reputation for failing a check in a no-win scenario.
    pub no_win_reputation: i32,
    /// Reputation for completing a mission.
    pub completion_reputation: i32,
    /// Discipline for completing a mission.
    pub completion_discipline: i32,
    /// XP for any ship combat victory.
    pub combat_base_xp: u64,
    /// Extra combat XP per enemy difficulty step.
    pub combat_xp_per_difficulty: u64,
    /// Credits for any ship combat victory.
    pub combat_base_credits: u64,
    /// Extra combat credits per enemy difficulty step.
    pub combat_credits_per_difficulty: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            narrative_reputation: 2,
            check_success_reputation: 5,
            check_success_discipline: 2,
            check_failure_xp_penalty: 10,
            check_failure_reputation: -3,
            check_failure_discipline: -5,
            no_win_reputation: 10,
            completion_reputation: 10,
            completion_discipline: 5,
            combat_base_xp: 50,
            combat_xp_per_difficulty: 30,
            combat_base_credits: 25,
            combat_credits_per_difficulty: 25,
        }
    }
}

impl RewardConfig {
    /// Set the check-failure XP penalty (builder style).
    pub fn with_failure_penalty(mut self, xp: u64) -> Self {
        self.check_failure_xp_penalty = xp;
        self
    }

    /// Set the completion bonuses (builder style).
    pub fn with_completion(mut self, reputation: i32, discipline: i32) -> Self {
        self.completion_reputation = reputation;
        self.completion_discipline = discipline;
        self
    }

    /// Set the reputation granted for failing a no-win check (builder style).
    pub fn with_no_win_reputation(mut self, reputation: i32) -> Self {
        self.no_win_reputation = reputation;
        self
    }
}

/// The full set of rules constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Level-up and creation settings.
    pub progression: ProgressionConfig,
    /// Mission and combat reward settings.
    pub rewards: RewardConfig,
}

impl RulesConfig {
    /// Replace the progression settings (builder style).
    pub fn with_progression(mut self, progression: ProgressionConfig) -> Self {
        self.progression = progression;
        self
    }

    /// Replace the reward settings (builder style).
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }
}
