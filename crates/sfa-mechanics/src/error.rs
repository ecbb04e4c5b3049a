//! Error types for the rules engine.

use sfa_core::CoreError;

/// Errors that can occur during progression and mission operations.
///
/// A failed operation never touches the caller's character; every operation
/// computes against a copy and only returns it on success.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A precondition on an argument was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough unspent points for the requested spend.
    #[error("insufficient {kind} points: need {needed}, have {available}")]
    InsufficientPoints {
        /// Which pool was short ("attribute" or "skill").
        kind: &'static str,
        /// Points the operation needed.
        needed: u32,
        /// Points the cadet had.
        available: u32,
    },

    /// An allocation would push an attribute past the cap.
    #[error("{attribute} would reach {value}, above the cap of {cap}")]
    AttributeAtCap {
        /// The attribute being raised.
        attribute: String,
        /// The value it would reach.
        value: u32,
        /// The configured cap.
        cap: u32,
    },

    /// The cadet does not own the skill.
    #[error("skill '{0}' is not owned")]
    SkillNotOwned(String),

    /// The cadet already owns the skill.
    #[error("skill '{0}' is already owned")]
    SkillAlreadyOwned(String),

    /// The skill is already at its maximum level.
    #[error("skill '{id}' is already at max level {max}")]
    SkillAtMaxLevel {
        /// Skill identifier.
        id: String,
        /// The skill's level cap.
        max: u32,
    },

    /// The skill's level or prerequisite requirements are not met.
    #[error("skill '{id}' is locked: {reason}")]
    SkillLocked {
        /// Skill identifier.
        id: String,
        /// Which requirement failed.
        reason: String,
    },

    /// The cadet's level is below a recipe's requirement.
    #[error("recipe '{id}' requires level {required}, cadet is level {level}")]
    RecipeLocked {
        /// Recipe identifier.
        id: String,
        /// Level the recipe requires.
        required: u32,
        /// The cadet's level.
        level: u32,
    },

    /// Not enough of a resource to craft.
    #[error("not enough {resource}: need {needed}, have {available}")]
    MissingIngredient {
        /// Resource name.
        resource: String,
        /// Units the recipe consumes.
        needed: u32,
        /// Units held.
        available: u32,
    },

    /// A choice index does not exist at the current step.
    #[error("choice {index} does not exist at step {step} ({available} available)")]
    InvalidChoice {
        /// The requested choice.
        index: usize,
        /// The current step.
        step: usize,
        /// Number of choices at the step.
        available: usize,
    },

    /// A result was requested before the mission reached a terminal state.
    #[error("mission is still in progress at step {0}")]
    MissionInProgress(usize),

    /// A choice was made after the mission ended.
    #[error("mission has already ended")]
    MissionFinished,

    /// An error from the core data model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience result type for rules operations.
pub type MechResult<T> = Result<T, MechError>;
