use std::path::Path;

use colored::Colorize;
use sfa_core::{AttributeAllocation, Division, Species};
use sfa_mechanics::{CadetDraft, RulesConfig, create_cadet};

use super::{Narrator, write_json};

pub fn run(
    name: &str,
    species: Species,
    division: Division,
    alloc: &str,
    rules: &RulesConfig,
    output: Option<&Path>,
) -> Result<(), String> {
    let allocation: AttributeAllocation = alloc.parse().map_err(|e| format!("--alloc: {e}"))?;
    let draft = CadetDraft::new(name, species, division).with_allocation(allocation);
    let cadet = create_cadet(draft, &rules.progression).map_err(|e| e.to_string())?;

    let narrator = Narrator::new(output.is_none());
    narrator.say(format!(
        "{} {} ({} {}, {})",
        "Created".bold(),
        cadet.name,
        cadet.species,
        cadet.division,
        cadet.rank
    ));
    let scores: Vec<String> = cadet
        .attributes
        .iter()
        .map(|(attribute, value)| format!("{attribute} {value}"))
        .collect();
    narrator.say(scores.join(", "));

    write_json(&cadet, output)
}
