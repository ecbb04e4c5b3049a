use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::relationship::Relationship;

/// One player's save: the cadet and everything that depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Academy {
    /// The player's cadet, if one has been created.
    #[serde(default)]
    pub cadet: Option<Character>,
    /// Relationships with NPCs, at most one per NPC.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Crafting resources held by the cadet.
    #[serde(default)]
    pub inventory: Inventory,
}

impl Academy {
    /// A save holding a freshly created cadet.
    pub fn with_cadet(cadet: Character) -> Self {
        Self {
            cadet: Some(cadet),
            relationships: Vec::new(),
            inventory: Inventory::default(),
        }
    }

    /// The relationship with an NPC, if one has been recorded.
    pub fn relationship_for(&self, npc_id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.npc_id == npc_id)
    }

    /// Insert or replace the relationship for its NPC.
    ///
    /// Relationships cannot exist without a cadet.
    pub fn upsert_relationship(&mut self, relationship: Relationship) -> CoreResult<()> {
        if self.cadet.is_none() {
            return Err(CoreError::NoCadet);
        }
        match self
            .relationships
            .iter_mut()
            .find(|r| r.npc_id == relationship.npc_id)
        {
            Some(existing) => *existing = relationship,
            None => self.relationships.push(relationship),
        }
        Ok(())
    }

    /// Delete the cadet, its relationships and its inventory, returning
    /// the cadet.
    pub fn reset(&mut self) -> Option<Character> {
        self.relationships.clear();
        self.inventory = Inventory::default();
        self.cadet.take()
    }
}
