use std::path::Path;

use sfa_core::AttributeAllocation;
use sfa_mechanics::{RulesConfig, allocate_attributes};

use super::{Narrator, read_cadet, write_json};

pub fn run(
    cadet_path: &Path,
    allocation: &str,
    rules: &RulesConfig,
    output: Option<&Path>,
) -> Result<(), String> {
    let cadet = read_cadet(cadet_path)?;
    let allocation: AttributeAllocation = allocation.parse().map_err(|e| format!("allocation: {e}"))?;
    let updated =
        allocate_attributes(&cadet, &allocation, &rules.progression).map_err(|e| e.to_string())?;

    let narrator = Narrator::new(output.is_none());
    for (attribute, _) in allocation.iter() {
        narrator.say(format!(
            "{attribute}: {} -> {}",
            cadet.attributes.get(attribute),
            updated.attributes.get(attribute)
        ));
    }
    narrator.say(format!(
        "{} attribute point(s) left",
        updated.unspent_attribute_points
    ));
    write_json(&updated, output)
}
