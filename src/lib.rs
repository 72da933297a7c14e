//! # npcgen
//!
//! A D&D 3.5 non-player character generator.
//!
//! ## Architecture Overview
//!
//! Generation is a single synchronous pass over a handful of components:
//!
//! - **Rule Tables**: races, classes, skills, feat catalogs, class features and
//!   spell progressions, all read-only
//! - **Dice Engine**: the "roll N dice, drop the lowest K" contract
//! - **Character**: the record under construction plus the derived-stat calculator
//! - **Generation**: configuration, the feat and class-feature selectors, and the
//!   builder that drives level-up from 1 to the target level
//! - **Rendering**: a read-only sheet projection of the finished character
//!
//! ```
//! use npcgen::{CharacterBuilder, GenerationConfig, Generator};
//!
//! let config = GenerationConfig::default();
//! let mut rng = npcgen::generation::utils::create_rng(&config);
//! let character = CharacterBuilder::new().generate(&config, &mut rng).unwrap();
//! assert_eq!(character.levels.iter().sum::<u32>(), character.total_level);
//! ```

pub mod character;
pub mod generation;
pub mod rendering;
pub mod rules;
pub mod utils;

pub use character::*;
pub use generation::*;
pub use rendering::*;
pub use rules::*;
pub use utils::*;

/// Core error type for the generator.
#[derive(thiserror::Error, Debug)]
pub enum NpcGenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The initial configuration breaks a race, alignment or class restriction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rule table references something that does not exist
    #[error("Rule table integrity fault: {0}")]
    RuleTable(String),

    /// A name could not be matched against an enumerated domain
    #[error("Unknown {kind}: '{key}'")]
    UnknownKey { kind: &'static str, key: String },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the npcgen codebase.
pub type NpcGenResult<T> = Result<T, NpcGenError>;

/// Version information for the generator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation tuning constants.
pub mod config {
    /// Attempts made to fill one feat slot before it is skipped
    pub const DEFAULT_FEAT_PICK_ATTEMPTS: u32 = 100;

    /// No ability score ends generation below this value
    pub const ABILITY_SCORE_FLOOR: i32 = 3;

    /// First character level governed by the epic tables
    pub const EPIC_LEVEL_THRESHOLD: u32 = 21;

    /// Character levels divisible by this grant an ability increase
    pub const ABILITY_INCREASE_INTERVAL: u32 = 4;

    /// Highest character level any level band reaches
    pub const MAX_CHARACTER_LEVEL: u32 = 40;
}
