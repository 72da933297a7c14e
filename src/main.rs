//! # npcgen Main Entry Point
//!
//! Resolves the requested options, generates one character and prints its
//! sheet.

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use npcgen::{
    generation::utils, AgeCategory, Alignment, CharClass, CharacterBuilder, CharacterOptions,
    CharacterSheet, Gender, Generator, LevelType, NpcGenResult, PowerType, Race, SheetFormat,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Command line arguments for the NPC generator.
///
/// Every character choice left out is picked at random.
#[derive(Parser, Debug)]
#[command(name = "npcgen")]
#[command(about = "Generates D&D 3.5 non-player characters")]
#[command(version)]
struct Args {
    /// Random seed; the same seed and options give the same character
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with character options; flags override its values
    #[arg(short, long)]
    options: Option<PathBuf>,

    #[arg(long)]
    gender: Option<Gender>,

    #[arg(long)]
    race: Option<Race>,

    #[arg(long)]
    alignment: Option<Alignment>,

    #[arg(long)]
    class: Option<CharClass>,

    /// Second class of a multiclass character
    #[arg(long)]
    second_class: Option<CharClass>,

    /// Take a second class (true/false); random when omitted
    #[arg(long)]
    multiclass: Option<bool>,

    /// Draw the class from the NPC classes
    #[arg(long)]
    npc_classes: bool,

    #[arg(long)]
    age_category: Option<AgeCategory>,

    /// Roll the age category instead of defaulting to adult
    #[arg(long)]
    random_age: bool,

    #[arg(long)]
    power: Option<PowerType>,

    #[arg(long)]
    level_type: Option<LevelType>,

    /// Sheet output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for SheetFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => SheetFormat::Text,
            OutputFormat::Json => SheetFormat::Json,
        }
    }
}

fn main() -> NpcGenResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting npcgen v{}", npcgen::VERSION);

    let options = merge_options(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating with seed {}", seed);

    let mut option_rng = StdRng::seed_from_u64(seed);
    let config = options.resolve(seed, &mut option_rng)?;

    let builder = CharacterBuilder::new();
    let mut rng = utils::create_rng(&config);
    let character = builder.generate(&config, &mut rng)?;

    let sheet = CharacterSheet::new(&character);
    println!("{}", SheetFormat::from(args.format).render(&sheet)?);
    Ok(())
}

/// Initializes `env_logger`, falling back to `info` on an unknown level.
fn initialize_logging(log_level: &str) {
    let level = log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Loads the options file, if any, and applies the command line flags on top.
fn merge_options(args: &Args) -> NpcGenResult<CharacterOptions> {
    let mut options = match &args.options {
        Some(path) => CharacterOptions::from_json_file(path)?,
        None => CharacterOptions::default(),
    };

    options.gender = args.gender.or(options.gender);
    options.race = args.race.or(options.race);
    options.alignment = args.alignment.or(options.alignment);
    options.class = args.class.or(options.class);
    options.second_class = args.second_class.or(options.second_class);
    options.multiclass = args.multiclass.or(options.multiclass);
    options.npc_classes |= args.npc_classes;
    options.age_category = args.age_category.or(options.age_category);
    options.random_age |= args.random_age;
    options.power = args.power.or(options.power);
    options.level_type = args.level_type.or(options.level_type);
    Ok(options)
}
