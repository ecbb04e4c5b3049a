//! Attribute checks.
//!
//! A check rolls one d10 and adds the cadet's attribute score and any
//! equipment or skill bonus. It succeeds when the total reaches the
//! required value. The no-win rule lives in the mission runner, not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sfa_core::{Attribute, Attributes, Character, SkillCatalog};
use tracing::debug;

use crate::dice::{CHECK_DIE, RollSource};
use crate::error::{MechError, MechResult};

/// The outcome of one attribute check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeOutcome {
    /// The attribute tested.
    pub attribute: Attribute,
    /// The d10 roll.
    pub roll_value: u32,
    /// The cadet's attribute score.
    pub base_value: u32,
    /// Equipment and skill bonus.
    pub bonus_value: i32,
    /// `roll + base + bonus`.
    pub total: i64,
    /// Total needed to pass.
    pub required_value: u32,
    /// Whether `total >= required`.
    pub success: bool,
}

impl std::fmt::Display for ChallengeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} check: {} + {} + {} = {} vs {} ({})",
            self.attribute,
            self.roll_value,
            self.base_value,
            self.bonus_value,
            self.total,
            self.required_value,
            if self.success { "success" } else { "failure" }
        )
    }
}

/// Resolve a check with one roll from `rolls`.
///
/// A roll outside `1..=10` means the source is broken and is rejected.
pub fn resolve<R: RollSource + ?Sized>(
    attribute: Attribute,
    base: u32,
    bonus: i32,
    required: u32,
    rolls: &mut R,
) -> MechResult<ChallengeOutcome> {
    let roll = rolls.roll_d10();
    if !(1..=CHECK_DIE).contains(&roll) {
        return Err(MechError::InvalidArgument(format!(
            "roll {roll} outside 1..={CHECK_DIE}"
        )));
    }
    let total = i64::from(roll) + i64::from(base) + i64::from(bonus);
    let success = total >= i64::from(required);
    debug!(%attribute, roll, base, bonus, total, required, success, "check resolved");
    Ok(ChallengeOutcome {
        attribute,
        roll_value: roll,
        base_value: base,
        bonus_value: bonus,
        total,
        required_value: required,
        success,
    })
}

/// Base scores and bonuses a cadet brings to checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckModifiers {
    base: Attributes,
    bonus: BTreeMap<Attribute, i32>,
}

impl CheckModifiers {
    /// Scores with no bonuses.
    pub fn new(base: Attributes) -> Self {
        Self {
            base,
            bonus: BTreeMap::new(),
        }
    }

    /// Add a bonus to one attribute (builder style).
    pub fn with_bonus(mut self, attribute: Attribute, bonus: i32) -> Self {
        let entry = self.bonus.entry(attribute).or_insert(0);
        *entry = entry.saturating_add(bonus);
        self
    }

    /// Modifiers for a cadet: attribute scores, plus equipped item stats
    /// and the bonuses of every owned skill at its current level.
    ///
    /// Owned skills missing from the catalog contribute nothing. Bonuses
    /// saturate at the `i32` bounds.
    pub fn for_cadet(character: &Character, catalog: &SkillCatalog) -> Self {
        let mut modifiers = Self::new(character.attributes);
        for attribute in Attribute::ALL {
            let equipment = character.equipment.bonus_for(attribute);
            let skills: i32 = character
                .skill_ids
                .iter()
                .filter_map(|id| {
                    let skill = catalog.get(id)?;
                    let level = character.skill_level(id)?;
                    Some(skill.bonus_for(attribute, level))
                })
                .fold(0i32, i32::saturating_add);
            let bonus = equipment.saturating_add(skills);
            if bonus != 0 {
                modifiers = modifiers.with_bonus(attribute, bonus);
            }
        }
        modifiers
    }

    /// The attribute score.
    pub fn base(&self, attribute: Attribute) -> u32 {
        self.base.get(attribute)
    }

    /// The total bonus for an attribute.
    pub fn bonus(&self, attribute: Attribute) -> i32 {
        self.bonus.get(&attribute).copied().unwrap_or(0)
    }

    /// Resolve a check for `attribute` against `required`.
    pub fn check<R: RollSource + ?Sized>(
        &self,
        attribute: Attribute,
        required: u32,
        rolls: &mut R,
    ) -> MechResult<ChallengeOutcome> {
        resolve(
            attribute,
            self.base(attribute),
            self.bonus(attribute),
            required,
            rolls,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{FixedRolls, RollFn};
    use sfa_core::{Division, EquipmentSlot, Item, Skill, Species};

    #[test]
    fn exact_total_succeeds() {
        let outcome = resolve(Attribute::Logic, 5, 2, 10, &mut FixedRolls::new([3])).unwrap();
        assert_eq!(outcome.total, 10);
        assert!(outcome.success);
        assert_eq!(outcome.roll_value, 3);
        assert_eq!(outcome.base_value, 5);
        assert_eq!(outcome.bonus_value, 2);
    }

    #[test]
    fn one_short_fails() {
        let outcome = resolve(Attribute::Logic, 5, 2, 11, &mut FixedRolls::new([3])).unwrap();
        assert!(!outcome.success);
    }

    #[test]
    fn negative_bonus() {
        let outcome = resolve(Attribute::Agility, 5, -8, 1, &mut FixedRolls::new([1])).unwrap();
        assert_eq!(outcome.total, -2);
        assert!(!outcome.success);
    }

    #[test]
    fn rejects_bad_rolls() {
        assert!(matches!(
            resolve(Attribute::Logic, 5, 0, 10, &mut RollFn(|| 0)),
            Err(MechError::InvalidArgument(_))
        ));
        assert!(resolve(Attribute::Logic, 5, 0, 10, &mut RollFn(|| 11)).is_err());
    }

    #[test]
    fn cadet_modifiers_include_gear_and_skills() {
        let mut cadet =
            Character::new("Scotty", Species::Human, Division::Engineering, Attributes::default());
        cadet.attributes.intelligence = 9;
        let spanner = Item::new("spanner", "Hyperspanner").with_stat(Attribute::Intelligence, 2);
        cadet.equipment.equip(EquipmentSlot::Tool, spanner);
        cadet.skill_ids.push("warp".to_string());
        cadet.skill_levels.insert("warp".to_string(), 3);
        cadet.skill_ids.push("unknown".to_string());

        let mut warp = Skill::new("warp", "Warp Theory");
        warp.bonuses.insert(Attribute::Intelligence, 1);
        warp.bonuses_per_level.insert(Attribute::Intelligence, 1);
        let catalog = SkillCatalog::from_skills([warp]).unwrap();

        let modifiers = CheckModifiers::for_cadet(&cadet, &catalog);
        assert_eq!(modifiers.base(Attribute::Intelligence), 9);
        assert_eq!(modifiers.bonus(Attribute::Intelligence), 6);
        assert_eq!(modifiers.bonus(Attribute::Logic), 0);

        let outcome = modifiers
            .check(Attribute::Intelligence, 20, &mut FixedRolls::new([5]))
            .unwrap();
        assert_eq!(outcome.total, 20);
        assert!(outcome.success);
    }

    #[test]
    fn huge_bonuses_saturate() {
        let mut cadet =
            Character::new("Data", Species::Human, Division::Science, Attributes::default());
        let visor = Item::new("visor", "VISOR").with_stat(Attribute::Logic, i32::MAX);
        cadet.equipment.equip(EquipmentSlot::Tool, visor);
        cadet.skill_ids.push("positronics".to_string());
        cadet.skill_levels.insert("positronics".to_string(), 3);

        let mut positronics = Skill::new("positronics", "Positronics");
        positronics
            .bonuses_per_level
            .insert(Attribute::Logic, 1_000_000_000);
        let catalog = SkillCatalog::from_skills([positronics]).unwrap();

        let modifiers = CheckModifiers::for_cadet(&cadet, &catalog);
        assert_eq!(modifiers.bonus(Attribute::Logic), i32::MAX);
        let outcome = modifiers
            .check(Attribute::Logic, 10, &mut FixedRolls::new([1]))
            .unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn display() {
        let outcome = resolve(Attribute::Charisma, 6, 1, 15, &mut FixedRolls::new([4])).unwrap();
        assert_eq!(
            outcome.to_string(),
            "charisma check: 4 + 6 + 1 = 11 vs 15 (failure)"
        );
    }
}
