use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sfa_core::{Mission, MissionResult, SkillCatalog};
use sfa_mechanics::{
    CheckModifiers, MissionRun, MissionState, RulesConfig, StepReport, apply_mission_result,
};

use super::check::roll_source;
use super::{Narrator, read_cadet, read_catalog, read_json, write_json};

pub struct PlayArgs<'a> {
    pub cadet: &'a Path,
    pub mission: &'a Path,
    pub choices: &'a [usize],
    pub seed: Option<u64>,
    pub rolls: Option<&'a [u32]>,
    pub skills: Option<&'a Path>,
    pub apply: bool,
    pub output: Option<&'a Path>,
    pub rules: &'a RulesConfig,
}

pub fn run(args: &PlayArgs<'_>) -> Result<(), String> {
    let cadet = read_cadet(args.cadet)?;
    let mission: Mission = read_json(args.mission)?;
    let catalog = match args.skills {
        Some(path) => read_catalog(path)?,
        None => SkillCatalog::new(),
    };

    let narrator = Narrator::new(args.output.is_none() && args.apply);
    let modifiers = CheckModifiers::for_cadet(&cadet, &catalog);
    let mut rolls = roll_source(args.rolls, args.seed);

    let mut run = MissionRun::start(&mission, &args.rules.rewards).map_err(|e| e.to_string())?;
    narrator.say(format!(
        "{} {} {}",
        "Mission".bold(),
        mission.title,
        format!("({})", mission.difficulty).dimmed()
    ));

    let mut taken = 0;
    for &choice in args.choices {
        if run.state().is_terminal() {
            break;
        }
        if let Some(step) = run.current_step() {
            narrator.say("");
            narrator.say(&step.text);
            if let Some(picked) = step.choices.get(choice) {
                narrator.say(format!("> {}", picked.text.bold()));
            }
        }
        let report = run
            .choose(choice, &modifiers, rolls.as_mut())
            .map_err(|e| e.to_string())?;
        describe(&narrator, &report);
        taken += 1;
    }
    if taken < args.choices.len() {
        tracing::warn!(
            unused = args.choices.len() - taken,
            "mission ended before all choices were used"
        );
    }
    if let MissionState::InProgress { step } = run.state() {
        return Err(format!(
            "mission is still at step {step} after {taken} choice(s); pass more --choices"
        ));
    }

    let result = run.finish().map_err(|e| e.to_string())?;
    narrator.say("");
    summarize(&narrator, &result);

    if args.apply {
        let applied = apply_mission_result(&cadet, &result, &catalog, &args.rules.progression)
            .map_err(|e| e.to_string())?;
        if applied.levels_gained > 0 {
            narrator.say(format!(
                "{} now level {}",
                "Level up!".green().bold(),
                applied.character.level
            ));
        }
        for skill in &applied.skills_unlocked {
            narrator.say(format!("{} {skill}", "Skill unlocked:".bold()));
        }
        write_json(&applied.character, args.output)
    } else if args.output.is_some() {
        write_json(&result, args.output)
    } else {
        Ok(())
    }
}

fn describe(narrator: &Narrator, report: &StepReport) {
    if let Some(check) = &report.check {
        let verdict = if check.success {
            "passed".green()
        } else {
            "failed".red()
        };
        narrator.say(format!("{check} {verdict}"));
    }
    narrator.say(
        format!(
            "xp {:+}, reputation {:+}, discipline {:+} -> {}",
            report.xp_change, report.reputation_change, report.discipline_change, report.state
        )
        .dimmed(),
    );
}

fn summarize(narrator: &Narrator, result: &MissionResult) {
    let outcome = if result.success {
        "COMPLETED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    narrator.say(format!("{} {}", result.mission_title, outcome));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["XP", "Reputation", "Discipline", "Credits", "Skill"]);
    table.add_row(vec![
        result.xp_gained.to_string(),
        format!("{:+}", result.reputation_change),
        format!("{:+}", result.discipline_change),
        result
            .rewards
            .as_ref()
            .map_or(0, |r| r.credits)
            .to_string(),
        result.skill_gained.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    for line in table.to_string().lines() {
        narrator.say(line);
    }
}
