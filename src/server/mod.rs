//! Server layer: match registry, matchmaking rendezvous, and the
//! action gateway.

mod gateway;
mod registry;
mod rendezvous;

pub use gateway::{DeckSource, MatchServer, PlayerAction, ServerConfig};
pub use registry::{MatchHandle, MatchRegistry};
pub use rendezvous::{EnqueueOutcome, Rendezvous};
