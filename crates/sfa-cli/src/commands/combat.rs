use std::path::Path;

use colored::Colorize;
use sfa_mechanics::{RulesConfig, apply_combat_victory};

use super::{Narrator, read_cadet, write_json};

pub fn run(
    cadet_path: &Path,
    difficulty: u32,
    rules: &RulesConfig,
    output: Option<&Path>,
) -> Result<(), String> {
    let cadet = read_cadet(cadet_path)?;
    let victory = apply_combat_victory(&cadet, difficulty, rules).map_err(|e| e.to_string())?;
    let updated = &victory.character;

    let narrator = Narrator::new(output.is_none());
    narrator.say(format!(
        "{} +{} XP, +{} credits",
        "Victory!".green().bold(),
        victory.reward.xp,
        victory.reward.credits
    ));
    if victory.levels_gained > 0 {
        narrator.say(format!("Level {} -> {}", cadet.level, updated.level));
    }
    if victory.rank_changed {
        narrator.say(format!("{} {}", "Promoted to".bold(), updated.rank));
    }

    write_json(updated, output)
}
