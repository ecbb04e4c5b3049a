use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::error::{CoreError, CoreResult};

/// Where an item is worn or carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    /// Phaser or other sidearm.
    Weapon,
    /// Uniform or protective suit.
    Uniform,
    /// Miscellaneous accessory.
    Accessory,
    /// Tricorder, toolkit, and the like.
    Tool,
    /// Insignia or badge.
    Badge,
}

impl EquipmentSlot {
    /// All slots.
    pub const ALL: [EquipmentSlot; 5] = [
        Self::Weapon,
        Self::Uniform,
        Self::Accessory,
        Self::Tool,
        Self::Badge,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Uniform => "uniform",
            Self::Accessory => "accessory",
            Self::Tool => "tool",
            Self::Badge => "badge",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EquipmentSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|slot| slot.key() == normalized)
            .ok_or_else(|| CoreError::UnknownSlot(s.to_string()))
    }
}

/// An inventory item. Only its stat bonuses matter to the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Attribute bonuses granted while equipped.
    #[serde(default)]
    pub stats: BTreeMap<Attribute, i32>,
}

impl Item {
    /// Create an item with no stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats: BTreeMap::new(),
        }
    }

    /// Add a stat bonus (builder style).
    pub fn with_stat(mut self, attribute: Attribute, bonus: i32) -> Self {
        self.stats.insert(attribute, bonus);
        self
    }
}

/// Items currently equipped, at most one per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment(pub BTreeMap<EquipmentSlot, Item>);

impl Equipment {
    /// Equip an item, returning whatever previously occupied the slot.
    pub fn equip(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.0.insert(slot, item)
    }

    /// Remove the item in a slot.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.0.remove(&slot)
    }

    /// The item in a slot, if any.
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.0.get(&slot)
    }

    /// Sum of every equipped item's bonus to one attribute, saturating at
    /// the `i32` bounds.
    pub fn bonus_for(&self, attribute: Attribute) -> i32 {
        self.0
            .values()
            .filter_map(|item| item.stats.get(&attribute))
            .fold(0i32, |total, bonus| total.saturating_add(*bonus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_sums_across_slots() {
        let mut equipment = Equipment::default();
        equipment.equip(
            EquipmentSlot::Weapon,
            Item::new("phaser", "Type-2 Phaser").with_stat(Attribute::Agility, 2),
        );
        equipment.equip(
            EquipmentSlot::Tool,
            Item::new("tricorder", "Tricorder")
                .with_stat(Attribute::Intelligence, 3)
                .with_stat(Attribute::Agility, 1),
        );
        assert_eq!(equipment.bonus_for(Attribute::Agility), 3);
        assert_eq!(equipment.bonus_for(Attribute::Intelligence), 3);
        assert_eq!(equipment.bonus_for(Attribute::Charisma), 0);
    }

    #[test]
    fn bonus_saturates() {
        let mut equipment = Equipment::default();
        equipment.equip(
            EquipmentSlot::Weapon,
            Item::new("a", "A").with_stat(Attribute::Strength, i32::MAX),
        );
        equipment.equip(
            EquipmentSlot::Tool,
            Item::new("b", "B").with_stat(Attribute::Strength, 10),
        );
        assert_eq!(equipment.bonus_for(Attribute::Strength), i32::MAX);
    }

    #[test]
    fn equip_replaces_slot() {
        let mut equipment = Equipment::default();
        assert!(equipment.equip(EquipmentSlot::Badge, Item::new("a", "A")).is_none());
        let old = equipment.equip(EquipmentSlot::Badge, Item::new("b", "B"));
        assert_eq!(old.map(|i| i.id), Some("a".to_string()));
        assert_eq!(equipment.unequip(EquipmentSlot::Badge).map(|i| i.id), Some("b".to_string()));
        assert!(equipment.get(EquipmentSlot::Badge).is_none());
    }

    #[test]
    fn deserialize_equipped_items() {
        let json = r#"{"weapon": {"id": "phaser", "stats": {"strength": 1}}}"#;
        let equipment: Equipment = serde_json::from_str(json).unwrap();
        assert_eq!(equipment.bonus_for(Attribute::Strength), 1);
        assert_eq!("Uniform".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::Uniform);
    }
}
