//! New cadet creation.

use sfa_core::{AttributeAllocation, Attributes, Character, Division, Species};
use tracing::debug;

use crate::config::ProgressionConfig;
use crate::error::{MechError, MechResult};

/// Everything the player picks on the creation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadetDraft {
    /// Cadet name.
    pub name: String,
    /// Species, which sets the attribute bonuses.
    pub species: Species,
    /// Academy division.
    pub division: Division,
    /// Free creation points, added on top of the species scores.
    pub allocation: AttributeAllocation,
}

impl CadetDraft {
    /// A draft with no free points spent.
    pub fn new(name: impl Into<String>, species: Species, division: Division) -> Self {
        Self {
            name: name.into(),
            species,
            division,
            allocation: AttributeAllocation::new(),
        }
    }

    /// Set the free-point allocation (builder style).
    pub fn with_allocation(mut self, allocation: AttributeAllocation) -> Self {
        self.allocation = allocation;
        self
    }
}

/// Attribute scores for a species before any free points.
pub fn species_attributes(species: Species) -> Attributes {
    let mut attributes = Attributes::default();
    for &(attribute, bonus) in species.bonuses() {
        *attributes.get_mut(attribute) += bonus;
    }
    attributes
}

/// Build a level-1 cadet from a draft.
///
/// Free points beyond the configured creation budget are rejected; points
/// left unspent are forfeited.
pub fn create_cadet(draft: CadetDraft, config: &ProgressionConfig) -> MechResult<Character> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(MechError::InvalidArgument("cadet name is blank".to_string()));
    }
    let spent = draft.allocation.total();
    if spent > config.creation_points {
        return Err(MechError::InsufficientPoints {
            kind: "creation",
            needed: spent,
            available: config.creation_points,
        });
    }

    let mut attributes = species_attributes(draft.species);
    for (attribute, points) in draft.allocation.iter() {
        let value = attributes.get(attribute) + points;
        if value > config.attribute_cap {
            return Err(MechError::AttributeAtCap {
                attribute: attribute.to_string(),
                value,
                cap: config.attribute_cap,
            });
        }
        *attributes.get_mut(attribute) = value;
    }

    let mut cadet = Character::new(name, draft.species, draft.division, attributes);
    cadet.unspent_skill_points = config.starting_skill_points;
    cadet.credits = config.starting_credits;
    debug!(cadet = %cadet.id, species = %draft.species, division = %draft.division, "cadet created");
    Ok(cadet)
}
