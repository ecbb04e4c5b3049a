use std::path::Path;

use colored::Colorize;
use sfa_core::{Academy, RelationshipStatus};
use sfa_mechanics::{apply_delta, record_interaction};

use super::{Narrator, read_json, write_json};

pub fn run(level: i32, delta: i32) -> Result<(), String> {
    let update = apply_delta(level, delta);
    println!(
        "  {} -> {} {}",
        level,
        update.level,
        colorize_status(update.status)
    );
    Ok(())
}

pub fn interact(
    save_path: &Path,
    npc_id: &str,
    npc_name: Option<&str>,
    delta: i32,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut save: Academy = read_json(save_path)?;
    let existing = save.relationship_for(npc_id);
    let name = npc_name
        .map(str::to_string)
        .or_else(|| existing.map(|r| r.npc_name.clone()))
        .unwrap_or_else(|| npc_id.to_string());
    let updated = record_interaction(existing, npc_id, &name, delta, chrono::Utc::now())
        .map_err(|e| e.to_string())?;

    let narrator = Narrator::new(output.is_none());
    narrator.say(format!(
        "{}: {} {} ({} interactions)",
        updated.npc_name.bold(),
        updated.level,
        colorize_status(updated.status),
        updated.interaction_count
    ));

    save.upsert_relationship(updated).map_err(|e| e.to_string())?;
    write_json(&save, output)
}

pub fn reset(save_path: &Path, output: Option<&Path>) -> Result<(), String> {
    let mut save: Academy = read_json(save_path)?;
    let relationships = save.relationships.len();
    let narrator = Narrator::new(output.is_none());
    match save.reset() {
        Some(cadet) => narrator.say(format!(
            "{} {} and {relationships} relationship(s)",
            "Deleted".red().bold(),
            cadet.name
        )),
        None => narrator.say("No cadet to delete."),
    }
    write_json(&save, output)
}

fn colorize_status(status: RelationshipStatus) -> colored::ColoredString {
    let label = status.label();
    match status {
        RelationshipStatus::Hostile => label.red().bold(),
        RelationshipStatus::Distrustful => label.yellow(),
        RelationshipStatus::Neutral => label.normal(),
        RelationshipStatus::Friendly => label.green(),
        RelationshipStatus::Ally | RelationshipStatus::BestFriend => label.green().bold(),
    }
}
