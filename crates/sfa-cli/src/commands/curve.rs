use comfy_table::{ContentArrangement, Table};
use sfa_core::Rank;
use sfa_mechanics::{MAX_LEVEL, threshold_for};

pub fn run(to: u32) -> Result<(), String> {
    if to == 0 || to > MAX_LEVEL {
        return Err(format!("--to must be between 1 and {MAX_LEVEL}"));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Level", "XP to next", "Total XP", "Rank"]);

    let mut total = 0u64;
    for level in 1..=to {
        table.add_row(vec![
            level.to_string(),
            threshold_for(level).to_string(),
            total.to_string(),
            Rank::for_level(level).to_string(),
        ]);
        total += threshold_for(level);
    }

    println!("{table}");
    Ok(())
}
