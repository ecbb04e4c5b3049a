//! Ship combat payouts.
//!
//! Combat itself is played by the presentation layer; the engine only
//! turns a victory into XP and credits.

use serde::{Deserialize, Serialize};
use sfa_core::Character;
use tracing::debug;

use crate::config::RulesConfig;
use crate::error::{MechError, MechResult};
use crate::progression::apply_xp;

/// Highest enemy difficulty.
pub const MAX_COMBAT_DIFFICULTY: u32 = 5;

/// XP and credits for one victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatReward {
    /// XP earned.
    pub xp: u64,
    /// Credits earned.
    pub credits: u64,
}

/// The outcome of applying a combat victory to a cadet.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatVictory {
    /// The updated cadet.
    pub character: Character,
    /// What the victory paid.
    pub reward: CombatReward,
    /// Levels gained from the XP.
    pub levels_gained: u32,
    /// Whether the rank changed.
    pub rank_changed: bool,
}

/// Payout for defeating an enemy of `difficulty` (1 to 5).
pub fn combat_reward(difficulty: u32, config: &RulesConfig) -> MechResult<CombatReward> {
    if !(1..=MAX_COMBAT_DIFFICULTY).contains(&difficulty) {
        return Err(MechError::InvalidArgument(format!(
            "combat difficulty {difficulty} outside 1..={MAX_COMBAT_DIFFICULTY}"
        )));
    }
    let rewards = &config.rewards;
    let steps = u64::from(difficulty);
    Ok(CombatReward {
        xp: rewards
            .combat_base_xp
            .saturating_add(rewards.combat_xp_per_difficulty.saturating_mul(steps)),
        credits: rewards
            .combat_base_credits
            .saturating_add(rewards.combat_credits_per_difficulty.saturating_mul(steps)),
    })
}

/// Apply a victory: XP through [`apply_xp`], then credits.
pub fn apply_combat_victory(
    character: &Character,
    difficulty: u32,
    config: &RulesConfig,
) -> MechResult<CombatVictory> {
    let reward = combat_reward(difficulty, config)?;
    let xp = i64::try_from(reward.xp)
        .map_err(|_| MechError::InvalidArgument(format!("combat XP out of range: {}", reward.xp)))?;
    let level_up = apply_xp(character, xp, &config.progression)?;
    let mut cadet = level_up.character;
    cadet.credits = cadet.credits.saturating_add(reward.credits);

    debug!(cadet = %cadet.id, difficulty, xp = reward.xp, credits = reward.credits, "combat won");
    Ok(CombatVictory {
        character: cadet,
        reward,
        levels_gained: level_up.levels_gained,
        rank_changed: level_up.rank_changed,
    })
}
