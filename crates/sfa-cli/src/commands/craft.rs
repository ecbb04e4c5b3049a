use std::path::Path;

use colored::Colorize;
use sfa_core::{Academy, CoreError, Recipe};
use sfa_mechanics::craft;

use super::{Narrator, read_json, write_json};

pub fn run(
    save_path: &Path,
    recipes_path: &Path,
    recipe_id: &str,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut save: Academy = read_json(save_path)?;
    let level = save
        .cadet
        .as_ref()
        .map(|cadet| cadet.level)
        .ok_or_else(|| CoreError::NoCadet.to_string())?;
    let recipes: Vec<Recipe> = read_json(recipes_path)?;
    let recipe = recipes
        .iter()
        .find(|recipe| recipe.id == recipe_id)
        .ok_or_else(|| format!("unknown recipe: \"{recipe_id}\""))?;

    let crafted = craft(recipe, &save.inventory, level).map_err(|e| e.to_string())?;
    let narrator = Narrator::new(output.is_none());
    narrator.say(format!("{} {}", "Crafted".green().bold(), crafted.result_name));
    for ingredient in recipe.ingredients.iter().filter(|i| i.quantity > 0) {
        narrator.say(format!(
            "{}: {} -> {}",
            ingredient.resource_name,
            save.inventory.quantity_of(ingredient),
            crafted.inventory.quantity_of(ingredient)
        ));
    }

    save.inventory = crafted.inventory;
    write_json(&save, output)
}
