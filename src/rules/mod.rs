//! The rules-engine boundary.

mod engine;

pub use engine::{CastRequirements, ResolutionOutcome, RulesEngine, TriggerSpawn};
