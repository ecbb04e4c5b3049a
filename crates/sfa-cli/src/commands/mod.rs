pub mod check;
pub mod combat;
pub mod craft;
pub mod create;
pub mod curve;
pub mod play;
pub mod relationship;
pub mod skill;
pub mod spend;
pub mod xp;

use std::fmt::Display;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sfa_core::{Character, Skill, SkillCatalog};
use sfa_mechanics::RulesConfig;

/// Load the rules constants, falling back to the defaults.
pub fn load_rules(path: Option<&Path>) -> Result<RulesConfig, String> {
    match path {
        Some(path) => read_json(path),
        None => Ok(RulesConfig::default()),
    }
}

/// Read and parse a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid JSON in {}: {e}", path.display()))
}

fn read_cadet(path: &Path) -> Result<Character, String> {
    read_json(path)
}

/// Read a skill catalog: a JSON array of skill definitions.
fn read_catalog(path: &Path) -> Result<SkillCatalog, String> {
    let skills: Vec<Skill> = read_json(path)?;
    SkillCatalog::from_skills(skills).map_err(|e| format!("{}: {e}", path.display()))
}

/// Where human-readable lines go. JSON owns stdout when it is written
/// there, so commentary moves to stderr.
#[derive(Clone, Copy)]
struct Narrator {
    to_stderr: bool,
}

impl Narrator {
    fn new(json_on_stdout: bool) -> Self {
        Self {
            to_stderr: json_on_stdout,
        }
    }

    fn say(&self, line: impl Display) {
        if self.to_stderr {
            eprintln!("  {line}");
        } else {
            println!("  {line}");
        }
    }
}

/// Write `value` as pretty JSON to `output`, or to stdout.
fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization error: {e}"))?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
            println!("  Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
