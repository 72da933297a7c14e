//! # Utilities Module
//!
//! Randomness helpers shared by every generation step.

pub mod dice;

pub use dice::*;
