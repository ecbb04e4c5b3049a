//! Core types for Starfleet Academy: cadets, relationships, missions, skills,
//! and crafting.
//!
//! This crate defines the plain data that the rules engine consumes and
//! produces. It performs no I/O; every record round-trips through JSON
//! with the camelCase field names used by the persistence layer.

/// The save record tying a cadet to its relationships.
pub mod academy;
/// The five cadet attributes and attribute maps.
pub mod attribute;
/// Cadets, species, divisions, and ranks.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Crafting resources, inventories, and recipes.
pub mod inventory;
/// Equipment items and slots.
pub mod item;
/// Mission definitions and mission results.
pub mod mission;
/// Cadet–NPC relationship records and status buckets.
pub mod relationship;
/// Skill definitions and the skill catalog.
pub mod skill;

/// Re-export the save record.
pub use academy::Academy;
/// Re-export attribute types.
pub use attribute::{Attribute, AttributeAllocation, Attributes, BASE_ATTRIBUTE, MIN_ATTRIBUTE};
/// Re-export cadet types.
pub use character::{CadetId, Character, Division, Rank, Species};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export crafting types.
pub use inventory::{Ingredient, Inventory, Recipe, ResourceStack};
/// Re-export equipment types.
pub use item::{Equipment, EquipmentSlot, Item};
/// Re-export mission types.
pub use mission::{
    Choice, Mission, MissionDifficulty, MissionResult, MissionRewards, MissionType, NarrativeStep,
    NextStep,
};
/// Re-export relationship types.
pub use relationship::{Relationship, RelationshipStatus};
/// Re-export skill types.
pub use skill::{Skill, SkillCatalog};
