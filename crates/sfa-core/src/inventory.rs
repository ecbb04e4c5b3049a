use serde::{Deserialize, Serialize};

/// Units of one crafting resource held by a cadet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStack {
    /// Resource identifier, when the resource came from the catalog.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub resource_name: String,
    /// Units held.
    #[serde(default)]
    pub quantity: u32,
}

impl ResourceStack {
    /// A stack of a catalog resource.
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            resource_id: Some(id.into()),
            resource_name: name.into(),
            quantity,
        }
    }
}

/// Resources a cadet holds for crafting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Held stacks, at most one per resource.
    #[serde(default)]
    pub resources: Vec<ResourceStack>,
}

impl Inventory {
    /// Add a stack (builder style). Merges into an existing stack of the
    /// same resource.
    pub fn with_resource(mut self, stack: ResourceStack) -> Self {
        self.add(stack);
        self
    }

    /// Add units, merging into an existing stack of the same resource.
    pub fn add(&mut self, stack: ResourceStack) {
        let existing = self.resources.iter_mut().find(|held| {
            same_resource(
                held,
                stack.resource_id.as_deref(),
                &stack.resource_name,
            )
        });
        match existing {
            Some(held) => held.quantity = held.quantity.saturating_add(stack.quantity),
            None => self.resources.push(stack),
        }
    }

    /// Index of the stack an ingredient draws from.
    pub fn position_of(&self, ingredient: &Ingredient) -> Option<usize> {
        self.resources.iter().position(|held| {
            same_resource(
                held,
                ingredient.resource_id.as_deref(),
                &ingredient.resource_name,
            )
        })
    }

    /// Units held of the resource an ingredient names.
    pub fn quantity_of(&self, ingredient: &Ingredient) -> u32 {
        self.position_of(ingredient)
            .map_or(0, |index| self.resources[index].quantity)
    }
}

/// A stack matches on identifier when both sides have one, else on name.
fn same_resource(held: &ResourceStack, id: Option<&str>, name: &str) -> bool {
    let id_match = matches!((held.resource_id.as_deref(), id), (Some(a), Some(b)) if a == b);
    id_match || (!name.is_empty() && held.resource_name == name)
}

/// Units of one resource a recipe consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Resource identifier, if the recipe names one.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Resource display name.
    #[serde(default)]
    pub resource_name: String,
    /// Units consumed.
    #[serde(default)]
    pub quantity: u32,
}

impl Ingredient {
    /// An ingredient matched by resource name.
    pub fn named(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            resource_id: None,
            resource_name: name.into(),
            quantity,
        }
    }
}

fn first_level() -> u32 {
    1
}

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe identifier.
    pub id: String,
    /// Name of the item produced.
    #[serde(default)]
    pub result_name: String,
    /// Free-form category ("equipment", "consumable", ...).
    #[serde(default)]
    pub category: String,
    /// Free-form rarity label.
    #[serde(default)]
    pub rarity: String,
    /// Minimum cadet level.
    #[serde(default = "first_level")]
    pub required_level: u32,
    /// Resources consumed.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// A level-1 recipe with no ingredients.
    pub fn new(id: impl Into<String>, result_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result_name: result_name.into(),
            category: String::new(),
            rarity: String::new(),
            required_level: 1,
            ingredients: Vec::new(),
        }
    }

    /// Add an ingredient (builder style).
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredients_match_by_id_or_name() {
        let inventory = Inventory::default()
            .with_resource(ResourceStack::new("dilithium", "Dilithium", 4))
            .with_resource(ResourceStack {
                resource_id: None,
                resource_name: "Tritanium".to_string(),
                quantity: 2,
            });

        let by_id = Ingredient {
            resource_id: Some("dilithium".to_string()),
            resource_name: "Dilithium Crystal".to_string(),
            quantity: 1,
        };
        assert_eq!(inventory.quantity_of(&by_id), 4);
        assert_eq!(inventory.quantity_of(&Ingredient::named("Tritanium", 1)), 2);
        assert_eq!(inventory.quantity_of(&Ingredient::named("Latinum", 1)), 0);
    }

    #[test]
    fn add_merges_stacks() {
        let mut inventory =
            Inventory::default().with_resource(ResourceStack::new("ore", "Ore", 3));
        inventory.add(ResourceStack::new("ore", "Ore", 2));
        assert_eq!(inventory.resources.len(), 1);
        assert_eq!(inventory.resources[0].quantity, 5);
    }

    #[test]
    fn recipe_json_defaults() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": "kit", "resultName": "Field Kit",
                "ingredients": [{"resourceName": "Ore", "quantity": 2}]}"#,
        )
        .unwrap();
        assert_eq!(recipe.required_level, 1);
        assert_eq!(recipe.ingredients[0], Ingredient::named("Ore", 2));
    }
}
