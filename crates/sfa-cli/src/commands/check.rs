use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sfa_core::Attribute;
use sfa_mechanics::{FixedRolls, RollSource, resolve};

pub fn run(
    attribute: Attribute,
    base: u32,
    bonus: i32,
    required: u32,
    roll: Option<u32>,
    seed: Option<u64>,
) -> Result<(), String> {
    let mut rolls = roll_source(roll.map(|r| vec![r]).as_deref(), seed);
    let outcome =
        resolve(attribute, base, bonus, required, rolls.as_mut()).map_err(|e| e.to_string())?;

    let verdict = if outcome.success {
        "SUCCESS".green().bold()
    } else {
        "FAILURE".red().bold()
    };
    println!("  {outcome}");
    println!("  {verdict}");
    Ok(())
}

/// Canned rolls if given, else a seeded or OS-seeded generator.
pub fn roll_source(rolls: Option<&[u32]>, seed: Option<u64>) -> Box<dyn RollSource> {
    match (rolls, seed) {
        (Some(rolls), _) => Box::new(FixedRolls::new(rolls.iter().copied())),
        (None, Some(seed)) => Box::new(StdRng::seed_from_u64(seed)),
        (None, None) => Box::new(StdRng::from_os_rng()),
    }
}
