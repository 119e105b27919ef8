//! Core types: identifiers, seats, errors, RNG.

mod error;
mod ids;
mod rng;
mod seat;

pub use error::{GameError, GameResult};
pub use ids::{AccountId, AccountRef, CardId, CardUid, DeckId, MatchId, TriggerId};
pub use rng::MatchRng;
pub use seat::{Seat, SeatMap};
