use std::path::Path;

use colored::Colorize;
use sfa_core::{Character, Skill};
use sfa_mechanics::{MechResult, learn_skill, upgrade_skill};

use super::{Narrator, read_cadet, read_catalog, write_json};

pub fn learn(
    cadet_path: &Path,
    skills_path: &Path,
    id: &str,
    output: Option<&Path>,
) -> Result<(), String> {
    spend(cadet_path, skills_path, id, output, "Learned", learn_skill)
}

pub fn upgrade(
    cadet_path: &Path,
    skills_path: &Path,
    id: &str,
    output: Option<&Path>,
) -> Result<(), String> {
    spend(cadet_path, skills_path, id, output, "Upgraded", upgrade_skill)
}

fn spend(
    cadet_path: &Path,
    skills_path: &Path,
    id: &str,
    output: Option<&Path>,
    verb: &str,
    op: fn(&Character, &Skill) -> MechResult<Character>,
) -> Result<(), String> {
    let cadet = read_cadet(cadet_path)?;
    let catalog = read_catalog(skills_path)?;
    let skill = catalog
        .get(id)
        .ok_or_else(|| format!("unknown skill: \"{id}\""))?;
    let updated = op(&cadet, skill).map_err(|e| e.to_string())?;

    let narrator = Narrator::new(output.is_none());
    narrator.say(format!(
        "{} {} (level {}/{}), {} skill point(s) left",
        verb.bold(),
        skill.name,
        updated.skill_level(&skill.id).unwrap_or(0),
        skill.max_level,
        updated.unspent_skill_points
    ));
    write_json(&updated, output)
}
