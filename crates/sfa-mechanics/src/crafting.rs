//! Crafting: spending held resources on a recipe.

use sfa_core::{Inventory, Recipe};
use tracing::debug;

use crate::error::{MechError, MechResult};

/// The outcome of crafting a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crafted {
    /// The inventory with the ingredients removed.
    pub inventory: Inventory,
    /// Name of the item produced.
    pub result_name: String,
}

/// Craft `recipe` from `inventory` for a cadet at `cadet_level`.
///
/// The cadet must meet the recipe's level and hold every ingredient in
/// full. Consumed stacks that reach zero are removed. Ingredients asking
/// for zero units are ignored.
pub fn craft(recipe: &Recipe, inventory: &Inventory, cadet_level: u32) -> MechResult<Crafted> {
    if cadet_level < recipe.required_level {
        return Err(MechError::RecipeLocked {
            id: recipe.id.clone(),
            required: recipe.required_level,
            level: cadet_level,
        });
    }

    let mut remaining = inventory.clone();
    for ingredient in recipe.ingredients.iter().filter(|i| i.quantity > 0) {
        let held = remaining.position_of(ingredient);
        let available = held.map_or(0, |index| remaining.resources[index].quantity);
        let Some(index) = held.filter(|_| available >= ingredient.quantity) else {
            return Err(MechError::MissingIngredient {
                resource: ingredient.resource_name.clone(),
                needed: ingredient.quantity,
                available,
            });
        };
        let stack = &mut remaining.resources[index];
        stack.quantity -= ingredient.quantity;
        if stack.quantity == 0 {
            remaining.resources.remove(index);
        }
    }

    debug!(recipe = %recipe.id, result = %recipe.result_name, "crafted");
    Ok(Crafted {
        inventory: remaining,
        result_name: recipe.result_name.clone(),
    })
}

/// Whether [`craft`] would succeed.
pub fn can_craft(recipe: &Recipe, inventory: &Inventory, cadet_level: u32) -> bool {
    craft(recipe, inventory, cadet_level).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfa_core::{Ingredient, ResourceStack};

    fn inventory() -> Inventory {
        Inventory::default()
            .with_resource(ResourceStack::new("dilithium", "Dilithium", 3))
            .with_resource(ResourceStack::new("tritanium", "Tritanium", 5))
    }

    fn phaser_rifle() -> Recipe {
        let mut recipe = Recipe::new("rifle", "Phaser Rifle")
            .with_ingredient(Ingredient::named("Dilithium", 3))
            .with_ingredient(Ingredient::named("Tritanium", 2));
        recipe.required_level = 3;
        recipe
    }

    #[test]
    fn crafting_consumes_ingredients() {
        let crafted = craft(&phaser_rifle(), &inventory(), 3).unwrap();
        assert_eq!(crafted.result_name, "Phaser Rifle");
        assert_eq!(crafted.inventory.resources.len(), 1);
        assert_eq!(crafted.inventory.resources[0].resource_name, "Tritanium");
        assert_eq!(crafted.inventory.resources[0].quantity, 3);
    }

    #[test]
    fn level_gate() {
        assert!(matches!(
            craft(&phaser_rifle(), &inventory(), 2),
            Err(MechError::RecipeLocked { required: 3, level: 2, .. })
        ));
        assert!(!can_craft(&phaser_rifle(), &inventory(), 2));
        assert!(can_craft(&phaser_rifle(), &inventory(), 3));
    }

    #[test]
    fn missing_or_short_ingredients() {
        let short = Recipe::new("torpedo", "Photon Torpedo")
            .with_ingredient(Ingredient::named("Tritanium", 6));
        assert!(matches!(
            craft(&short, &inventory(), 1),
            Err(MechError::MissingIngredient { needed: 6, available: 5, .. })
        ));

        let unknown =
            Recipe::new("bar", "Latinum Bar").with_ingredient(Ingredient::named("Latinum", 1));
        assert!(matches!(
            craft(&unknown, &inventory(), 1),
            Err(MechError::MissingIngredient { available: 0, .. })
        ));
    }

    #[test]
    fn repeated_ingredients_draw_from_the_same_stack() {
        let greedy = Recipe::new("core", "Warp Core")
            .with_ingredient(Ingredient::named("Dilithium", 2))
            .with_ingredient(Ingredient::named("Dilithium", 2));
        assert!(matches!(
            craft(&greedy, &inventory(), 1),
            Err(MechError::MissingIngredient { needed: 2, available: 1, .. })
        ));
    }
}
