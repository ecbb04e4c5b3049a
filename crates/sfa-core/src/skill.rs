use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::error::{CoreError, CoreResult};

fn default_max_level() -> u32 {
    5
}

fn default_one() -> u32 {
    1
}

/// A learnable skill from the content catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Skill identifier.
    pub id: String,
    /// Display name; missions unlock skills by name.
    pub name: String,
    /// Skill-tree category.
    #[serde(default)]
    pub category: String,
    /// Tier within its category.
    #[serde(default = "default_one")]
    pub tier: u32,
    /// Minimum cadet level to learn the skill.
    #[serde(default = "default_one")]
    pub required_level: u32,
    /// Skills that must be owned first.
    #[serde(default)]
    pub required_skill_ids: Vec<String>,
    /// Minimum level of each prerequisite (default 1).
    #[serde(default)]
    pub required_skill_levels: BTreeMap<String, u32>,
    /// Highest level the skill can be upgraded to.
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Flat attribute bonuses while owned.
    #[serde(default)]
    pub bonuses: BTreeMap<Attribute, i32>,
    /// Attribute bonuses multiplied by the skill's level.
    #[serde(default)]
    pub bonuses_per_level: BTreeMap<Attribute, i32>,
}

impl Skill {
    /// A tier-1 skill with no prerequisites and the default level cap.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            tier: 1,
            required_level: 1,
            required_skill_ids: Vec::new(),
            required_skill_levels: BTreeMap::new(),
            max_level: default_max_level(),
            bonuses: BTreeMap::new(),
            bonuses_per_level: BTreeMap::new(),
        }
    }

    /// Minimum level required of a prerequisite.
    pub fn required_level_of(&self, skill_id: &str) -> u32 {
        self.required_skill_levels.get(skill_id).copied().unwrap_or(1)
    }

    /// Bonus this skill grants to an attribute at the given skill level.
    ///
    /// Saturates at the `i32` bounds.
    pub fn bonus_for(&self, attribute: Attribute, level: u32) -> i32 {
        let flat = self.bonuses.get(&attribute).copied().unwrap_or(0);
        let per_level = self.bonuses_per_level.get(&attribute).copied().unwrap_or(0);
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        flat.saturating_add(per_level.saturating_mul(level))
    }
}

/// Skill definitions indexed by id.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: BTreeMap<String, Skill>,
}

impl SkillCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate ids.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> CoreResult<Self> {
        let mut catalog = Self::new();
        for skill in skills {
            catalog.insert(skill)?;
        }
        Ok(catalog)
    }

    /// Add a skill, rejecting duplicate ids.
    pub fn insert(&mut self, skill: Skill) -> CoreResult<()> {
        if self.skills.contains_key(&skill.id) {
            return Err(CoreError::DuplicateId(skill.id));
        }
        self.skills.insert(skill.id.clone(), skill);
        Ok(())
    }

    /// Look up a skill by id.
    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Look up a skill by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Skill> {
        self.skills.values().find(|s| s.name == name)
    }

    /// Iterate all skills in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Number of skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_combines_flat_and_per_level() {
        let mut skill = Skill::new("tactics", "Tactics");
        skill.bonuses.insert(Attribute::Logic, 1);
        skill.bonuses_per_level.insert(Attribute::Logic, 2);
        assert_eq!(skill.bonus_for(Attribute::Logic, 3), 7);
        assert_eq!(skill.bonus_for(Attribute::Charisma, 3), 0);
    }

    #[test]
    fn bonus_saturates() {
        let mut skill = Skill::new("tactics", "Tactics");
        skill.bonuses.insert(Attribute::Logic, 5);
        skill.bonuses_per_level.insert(Attribute::Logic, 1_000_000_000);
        assert_eq!(skill.bonus_for(Attribute::Logic, 3), i32::MAX);
        skill.bonuses_per_level.insert(Attribute::Agility, -1_000_000_000);
        assert_eq!(skill.bonus_for(Attribute::Agility, u32::MAX), i32::MIN);
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let result = SkillCatalog::from_skills([
            Skill::new("a", "Alpha"),
            Skill::new("a", "Also Alpha"),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn catalog_lookup_by_name() {
        let catalog =
            SkillCatalog::from_skills([Skill::new("warp", "Warp Theory"), Skill::new("med", "Triage")])
                .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_name("Triage").map(|s| s.id.as_str()), Some("med"));
        assert!(catalog.find_by_name("Unknown").is_none());
        assert!(catalog.get("warp").is_some());
    }

    #[test]
    fn json_defaults() {
        let skill: Skill = serde_json::from_str(r#"{"id": "x", "name": "X"}"#).unwrap();
        assert_eq!(skill.max_level, 5);
        assert_eq!(skill.required_level, 1);
        assert_eq!(skill.required_level_of("anything"), 1);
    }
}
