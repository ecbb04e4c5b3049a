//! CLI driver for the Starfleet Academy rules engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use sfa_core::{Attribute, Division, Species};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "academy",
    about = "Starfleet Academy: cadet progression and mission rules",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file overriding the default rules constants
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Log rules decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the XP curve and rank table
    Curve {
        /// Last level to show
        #[arg(long, default_value = "10")]
        to: u32,
    },

    /// Create a new level-1 cadet
    Create {
        /// Cadet name
        #[arg(long)]
        name: String,

        /// Species (human, vulcan, andorian, betazoid, trill, bajoran, half-vulcan)
        #[arg(long)]
        species: Species,

        /// Division (command, science, engineering, medical, security)
        #[arg(long)]
        division: Division,

        /// Free creation points, e.g. "logic=2,agility=3"
        #[arg(long, default_value = "")]
        alloc: String,

        /// Write the cadet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply XP to a cadet
    Xp {
        /// Cadet JSON file
        cadet: PathBuf,

        /// XP to add
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Write the cadet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a change to a relationship level
    Relationship {
        /// Current affinity
        #[arg(allow_negative_numbers = true)]
        level: i32,

        /// Change to apply
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Record an NPC interaction in a save file
    Interact {
        /// Save JSON file (cadet and relationships)
        save: PathBuf,

        /// NPC identifier
        npc: String,

        /// Change to the relationship level
        #[arg(allow_negative_numbers = true)]
        delta: i32,

        /// NPC display name (defaults to the identifier)
        #[arg(long)]
        npc_name: Option<String>,

        /// Write the save to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete the cadet and all relationships from a save file
    Reset {
        /// Save JSON file
        save: PathBuf,

        /// Write the save to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a single attribute check
    Check {
        /// Attribute being tested
        #[arg(short, long, default_value = "logic")]
        attribute: Attribute,

        /// Attribute score
        #[arg(long)]
        base: u32,

        /// Total needed to pass
        #[arg(long)]
        required: u32,

        /// Equipment and skill bonus
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        bonus: i32,

        /// Use this d10 roll instead of rolling
        #[arg(long, conflicts_with = "seed")]
        roll: Option<u32>,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Play a mission non-interactively
    Play {
        /// Cadet JSON file
        cadet: PathBuf,

        /// Mission JSON file
        mission: PathBuf,

        /// Choice index to take at each step, e.g. "0,1,0"
        #[arg(short, long, value_delimiter = ',', required = true)]
        choices: Vec<usize>,

        /// RNG seed for reproducible rolls
        #[arg(short, long, conflicts_with = "rolls")]
        seed: Option<u64>,

        /// Canned d10 rolls, used in order
        #[arg(long, value_delimiter = ',')]
        rolls: Option<Vec<u32>>,

        /// Skill catalog JSON file, for skill bonuses and unlocks
        #[arg(long)]
        skills: Option<PathBuf>,

        /// Apply the result to the cadet and output the updated cadet
        #[arg(long)]
        apply: bool,

        /// Write JSON output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spend unspent attribute points
    Spend {
        /// Cadet JSON file
        cadet: PathBuf,

        /// Points per attribute, e.g. "logic=1,charisma=1"
        allocation: String,

        /// Write the cadet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Craft a recipe from the save's inventory
    Craft {
        /// Save JSON file (cadet and inventory)
        save: PathBuf,

        /// Recipe catalog JSON file
        recipes: PathBuf,

        /// Recipe identifier
        recipe: String,

        /// Write the save to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pay out a ship combat victory
    Combat {
        /// Cadet JSON file
        cadet: PathBuf,

        /// Enemy difficulty (1-5)
        difficulty: u32,

        /// Write the cadet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Learn or upgrade a skill
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },
}

#[derive(Subcommand)]
enum SkillAction {
    /// Learn a new skill
    Learn {
        /// Cadet JSON file
        cadet: PathBuf,

        /// Skill catalog JSON file
        skills: PathBuf,

        /// Skill identifier
        id: String,

        /// Write the cadet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Raise an owned skill by one level
    Upgrade {
        /// Cadet JSON file
        cadet: PathBuf,

        /// Skill catalog JSON file
        skills: PathBuf,

        /// Skill identifier
        id: String,

        /// Write the cadet to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::load_rules(cli.rules.as_deref()).and_then(|rules| match cli.command {
        Commands::Curve { to } => commands::curve::run(to),
        Commands::Create {
            name,
            species,
            division,
            alloc,
            output,
        } => commands::create::run(&name, species, division, &alloc, &rules, output.as_deref()),
        Commands::Xp {
            cadet,
            amount,
            output,
        } => commands::xp::run(&cadet, amount, &rules, output.as_deref()),
        Commands::Relationship { level, delta } => commands::relationship::run(level, delta),
        Commands::Interact {
            save,
            npc,
            delta,
            npc_name,
            output,
        } => commands::relationship::interact(
            &save,
            &npc,
            npc_name.as_deref(),
            delta,
            output.as_deref(),
        ),
        Commands::Reset { save, output } => commands::relationship::reset(&save, output.as_deref()),
        Commands::Check {
            attribute,
            base,
            required,
            bonus,
            roll,
            seed,
        } => commands::check::run(attribute, base, bonus, required, roll, seed),
        Commands::Play {
            cadet,
            mission,
            choices,
            seed,
            rolls,
            skills,
            apply,
            output,
        } => commands::play::run(&commands::play::PlayArgs {
            cadet: &cadet,
            mission: &mission,
            choices: &choices,
            seed,
            rolls: rolls.as_deref(),
            skills: skills.as_deref(),
            apply,
            output: output.as_deref(),
            rules: &rules,
        }),
        Commands::Spend {
            cadet,
            allocation,
            output,
        } => commands::spend::run(&cadet, &allocation, &rules, output.as_deref()),
        Commands::Craft {
            save,
            recipes,
            recipe,
            output,
        } => commands::craft::run(&save, &recipes, &recipe, output.as_deref()),
        Commands::Combat {
            cadet,
            difficulty,
            output,
        } => commands::combat::run(&cadet, difficulty, &rules, output.as_deref()),
        Commands::Skill { action } => match action {
            SkillAction::Learn {
                cadet,
                skills,
                id,
                output,
            } => commands::skill::learn(&cadet, &skills, &id, output.as_deref()),
            SkillAction::Upgrade {
                cadet,
                skills,
                id,
                output,
            } => commands::skill::upgrade(&cadet, &skills, &id, output.as_deref()),
        },
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
