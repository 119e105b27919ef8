//! Card instances and zones.

mod instance;

pub use instance::{CardInstance, Zone};
