use std::path::Path;

use colored::Colorize;
use sfa_mechanics::{RulesConfig, apply_xp};

use super::{Narrator, read_cadet, write_json};

pub fn run(
    cadet_path: &Path,
    amount: i64,
    rules: &RulesConfig,
    output: Option<&Path>,
) -> Result<(), String> {
    let cadet = read_cadet(cadet_path)?;
    let result = apply_xp(&cadet, amount, &rules.progression).map_err(|e| e.to_string())?;
    let updated = &result.character;

    let narrator = Narrator::new(output.is_none());
    if result.levels_gained > 0 {
        narrator.say(format!(
            "{} level {} -> {} (+{} attribute, +{} skill points)",
            "Level up!".green().bold(),
            cadet.level,
            updated.level,
            result.attribute_points_gained,
            result.skill_points_gained
        ));
    }
    if result.rank_changed {
        narrator.say(format!("{} {}", "Promoted to".bold(), updated.rank));
    }
    narrator.say(format!("Level {}, XP {}", updated.level, updated.xp));

    write_json(updated, output)
}
