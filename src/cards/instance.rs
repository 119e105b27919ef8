//! Card instances - runtime card state within one match.
//!
//! A `CardInstance` is one physical copy of a card inside one match. It
//! is created at deck-load time, identified by a match-scoped uid, and
//! conceptually destroyed when the match ends (it only ever moves to a
//! terminal zone; the instance itself is never dropped mid-match).

use serde::{Deserialize, Serialize};

use crate::core::{CardId, CardUid, Seat};

/// The zones a card instance can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Face-down deck remainder.
    Deck,
    /// Owner's hand (hidden from the opponent; size is public).
    Hand,
    /// In play.
    Field,
    /// Discard pile.
    Graveyard,
    /// On the action stack, awaiting resolution.
    Stack,
    /// Removed from the game (terminal).
    Removed,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Field => "field",
            Zone::Graveyard => "graveyard",
            Zone::Stack => "stack",
            Zone::Removed => "removed",
        };
        write!(f, "{name}")
    }
}

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Match-scoped unique instance id.
    pub uid: CardUid,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Owning seat.
    pub owner: Seat,

    /// Current zone.
    pub zone: Zone,
}

impl CardInstance {
    /// Create a card instance in its owner's deck.
    #[must_use]
    pub fn new(uid: CardUid, card_id: CardId, owner: Seat) -> Self {
        Self {
            uid,
            card_id,
            owner,
            zone: Zone::Deck,
        }
    }
}
