use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Score every attribute starts from before species bonuses.
pub const BASE_ATTRIBUTE: u32 = 5;

/// Lowest score an attribute may hold.
pub const MIN_ATTRIBUTE: u32 = 1;

/// One of the five cadet attributes tested by narrative checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Reasoning and emotional control.
    Logic,
    /// Persuasion and presence.
    Charisma,
    /// Physical power.
    Strength,
    /// Reflexes and piloting.
    Agility,
    /// Knowledge and analysis.
    Intelligence,
}

impl Attribute {
    /// All attributes in display order.
    pub const ALL: [Attribute; 5] = [
        Self::Logic,
        Self::Charisma,
        Self::Strength,
        Self::Agility,
        Self::Intelligence,
    ];

    /// The lowercase key used in JSON and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Logic => "logic",
            Self::Charisma => "charisma",
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Intelligence => "intelligence",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == lower)
            .ok_or_else(|| CoreError::UnknownAttribute(s.to_string()))
    }
}

/// A cadet's five attribute scores.
///
/// Missing fields deserialize to [`BASE_ATTRIBUTE`], matching how the
/// client treated cadets saved before an attribute existed. Stored scores
/// below [`MIN_ATTRIBUTE`] are raised to it on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAttributes")]
pub struct Attributes {
    /// Logic score.
    pub logic: u32,
    /// Charisma score.
    pub charisma: u32,
    /// Strength score.
    pub strength: u32,
    /// Agility score.
    pub agility: u32,
    /// Intelligence score.
    pub intelligence: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(BASE_ATTRIBUTE)
    }
}

/// Attribute scores as written in a save, before the floor is applied.
#[derive(Deserialize)]
#[serde(default)]
struct StoredAttributes {
    logic: u32,
    charisma: u32,
    strength: u32,
    agility: u32,
    intelligence: u32,
}

impl Default for StoredAttributes {
    fn default() -> Self {
        Self {
            logic: BASE_ATTRIBUTE,
            charisma: BASE_ATTRIBUTE,
            strength: BASE_ATTRIBUTE,
            agility: BASE_ATTRIBUTE,
            intelligence: BASE_ATTRIBUTE,
        }
    }
}

impl From<StoredAttributes> for Attributes {
    fn from(stored: StoredAttributes) -> Self {
        Self {
            logic: stored.logic,
            charisma: stored.charisma,
            strength: stored.strength,
            agility: stored.agility,
            intelligence: stored.intelligence,
        }
        .floored()
    }
}

impl Attributes {
    /// Every attribute set to the same score.
    pub fn uniform(value: u32) -> Self {
        Self {
            logic: value,
            charisma: value,
            strength: value,
            agility: value,
            intelligence: value,
        }
    }

    /// Read one attribute.
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Logic => self.logic,
            Attribute::Charisma => self.charisma,
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
        }
    }

    /// Mutable access to one attribute.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Logic => &mut self.logic,
            Attribute::Charisma => &mut self.charisma,
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
        }
    }

    /// Iterate `(attribute, score)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u32)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    /// The first attribute scoring below [`MIN_ATTRIBUTE`], if any.
    pub fn below_floor(&self) -> Option<(Attribute, u32)> {
        self.iter().find(|(_, v)| *v < MIN_ATTRIBUTE)
    }

    /// Every score raised to at least [`MIN_ATTRIBUTE`].
    pub fn floored(mut self) -> Self {
        for attribute in Attribute::ALL {
            let score = self.get_mut(attribute);
            *score = (*score).max(MIN_ATTRIBUTE);
        }
        self
    }
}

/// Points to add per attribute, e.g. parsed from `logic=2,agility=1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAllocation(pub BTreeMap<Attribute, u32>);

impl AttributeAllocation {
    /// An empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` to an attribute (builder style). Saturates at `u32::MAX`.
    pub fn with(mut self, attribute: Attribute, points: u32) -> Self {
        let entry = self.0.entry(attribute).or_insert(0);
        *entry = entry.saturating_add(points);
        self
    }

    /// Total points across all attributes, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.0
            .values()
            .fold(0u32, |total, points| total.saturating_add(*points))
    }

    /// Points assigned to one attribute.
    pub fn get(&self, attribute: Attribute) -> u32 {
        self.0.get(&attribute).copied().unwrap_or(0)
    }

    /// Iterate non-zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u32)> + '_ {
        self.0.iter().filter(|(_, p)| **p > 0).map(|(a, p)| (*a, *p))
    }
}

impl FromStr for AttributeAllocation {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let mut allocation = Self::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, points)) = part.split_once('=') else {
                return Err(CoreError::InvalidAllocation {
                    input: part.to_string(),
                    reason: "expected attribute=points".to_string(),
                });
            };
            let attribute: Attribute = name.parse()?;
            let points: u32 = points
                .trim()
                .parse()
                .map_err(|_| CoreError::InvalidAllocation {
                    input: part.to_string(),
                    reason: "points must be a non-negative integer".to_string(),
                })?;
            let entry = allocation.0.entry(attribute).or_insert(0);
            *entry = entry
                .checked_add(points)
                .ok_or_else(|| CoreError::InvalidAllocation {
                    input: s.to_string(),
                    reason: format!("too many points for {attribute}"),
                })?;
            if allocation.0.values().try_fold(0u32, |t, p| t.checked_add(*p)).is_none() {
                return Err(CoreError::InvalidAllocation {
                    input: s.to_string(),
                    reason: "total points out of range".to_string(),
                });
            }
        }
        Ok(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_attribute_names() {
        assert_eq!("logic".parse::<Attribute>().unwrap(), Attribute::Logic);
        assert_eq!(" Agility ".parse::<Attribute>().unwrap(), Attribute::Agility);
        assert!(matches!(
            "luck".parse::<Attribute>(),
            Err(CoreError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn default_attributes_are_base() {
        let attrs = Attributes::default();
        assert!(attrs.iter().all(|(_, v)| v == BASE_ATTRIBUTE));
    }

    #[test]
    fn missing_json_fields_default_to_base() {
        let attrs: Attributes = serde_json::from_str(r#"{"logic": 8}"#).unwrap();
        assert_eq!(attrs.logic, 8);
        assert_eq!(attrs.charisma, BASE_ATTRIBUTE);
    }

    #[test]
    fn stored_scores_below_floor_are_raised() {
        let attrs: Attributes = serde_json::from_str(r#"{"logic": 0, "agility": 3}"#).unwrap();
        assert_eq!(attrs.logic, MIN_ATTRIBUTE);
        assert_eq!(attrs.agility, 3);
        assert_eq!(attrs.below_floor(), None);
    }

    #[test]
    fn below_floor_finds_zero_scores() {
        let mut attrs = Attributes::default();
        attrs.charisma = 0;
        assert_eq!(attrs.below_floor(), Some((Attribute::Charisma, 0)));
        assert_eq!(attrs.floored().charisma, MIN_ATTRIBUTE);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut attrs = Attributes::default();
        *attrs.get_mut(Attribute::Strength) += 3;
        assert_eq!(attrs.strength, 8);
        assert_eq!(attrs.get(Attribute::Logic), 5);
    }

    #[test]
    fn parse_allocation() {
        let alloc: AttributeAllocation = "logic=2, agility=1,logic=1".parse().unwrap();
        assert_eq!(alloc.get(Attribute::Logic), 3);
        assert_eq!(alloc.get(Attribute::Agility), 1);
        assert_eq!(alloc.total(), 4);
    }

    #[test]
    fn parse_allocation_rejects_garbage() {
        assert!("logic".parse::<AttributeAllocation>().is_err());
        assert!("logic=-1".parse::<AttributeAllocation>().is_err());
        assert!("luck=1".parse::<AttributeAllocation>().is_err());
        assert_eq!("".parse::<AttributeAllocation>().unwrap().total(), 0);
    }

    #[test]
    fn parse_allocation_rejects_overflow() {
        assert!(matches!(
            "logic=4294967295,agility=1".parse::<AttributeAllocation>(),
            Err(CoreError::InvalidAllocation { .. })
        ));
        assert!(matches!(
            "logic=4294967295,logic=1".parse::<AttributeAllocation>(),
            Err(CoreError::InvalidAllocation { .. })
        ));
    }

    #[test]
    fn builder_total_saturates() {
        let alloc = AttributeAllocation::new()
            .with(Attribute::Logic, u32::MAX)
            .with(Attribute::Logic, 1)
            .with(Attribute::Agility, 7);
        assert_eq!(alloc.get(Attribute::Logic), u32::MAX);
        assert_eq!(alloc.total(), u32::MAX);
    }
}
