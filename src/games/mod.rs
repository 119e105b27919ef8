//! Concrete rules-engine implementations.

pub mod duel;

pub use duel::{CardSpec, DuelRules};
