//! Progression and mission-resolution rules for Starfleet Academy.
//!
//! Provides the experience curve, level progression with point spending,
//! NPC relationship updates, d10 attribute checks, the mission state
//! machine, cadet creation, crafting, and ship combat payouts. Every operation is pure: it takes plain
//! data from `sfa-core` and returns new values. Randomness is always
//! injected through [`RollSource`].

pub mod challenge;
pub mod combat;
pub mod config;
pub mod crafting;
pub mod creation;
pub mod curve;
pub mod dice;
pub mod error;
pub mod mission;
pub mod progression;
pub mod relationship;

pub use challenge::{ChallengeOutcome, CheckModifiers, resolve};
pub use combat::{
    CombatReward, CombatVictory, MAX_COMBAT_DIFFICULTY, apply_combat_victory, combat_reward,
};
pub use config::{ProgressionConfig, RewardConfig, RulesConfig};
pub use crafting::{Crafted, can_craft, craft};
pub use creation::{CadetDraft, create_cadet, species_attributes};
pub use curve::{MAX_LEVEL, threshold_for};
pub use dice::{CHECK_DIE, FixedRolls, RollFn, RollSource};
pub use error::{MechError, MechResult};
pub use mission::{MissionRun, MissionState, StepReport};
pub use progression::{
    LevelUp, MissionApplication, allocate_attributes, apply_mission_result, apply_xp,
    learn_skill, upgrade_skill,
};
pub use relationship::{RelationshipUpdate, apply_delta, record_interaction};
