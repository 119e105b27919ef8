//! The action stack: pending spells, abilities, and triggers.
//!
//! Entries resolve in LIFO order. The stack is only ever mutated two
//! ways: a fully-parameterized cast/activation/trigger push, and the
//! resolution pop driven by the priority protocol in `MatchState`. The
//! core never reorders entries.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardUid, Seat, TriggerId};

/// Unique identifier for a stack entry, monotonic within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntryId(pub u32);

impl StackEntryId {
    /// Create a new stack entry ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StackEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackEntry({})", self.0)
    }
}

/// What put an entry on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackSource {
    /// A card cast from hand.
    Cast { card: CardUid },

    /// An activated ability of a card in play.
    Activation { card: CardUid },

    /// A triggered ability, ordered by its controller.
    Trigger { id: TriggerId, source: CardUid },
}

impl StackSource {
    /// The card this entry originates from, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardUid> {
        match self {
            StackSource::Cast { card } | StackSource::Activation { card } => Some(*card),
            StackSource::Trigger { source, .. } => Some(*source),
        }
    }
}

/// An entry on the action stack: a submitted action plus every
/// parameter its controller chose while it was pending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Unique identifier for this entry.
    pub id: StackEntryId,

    /// Who controls this entry (chose its parameters, owns its triggers).
    pub controller: Seat,

    /// What caused this entry.
    pub source: StackSource,

    /// Chosen targets.
    pub targets: SmallVec<[CardUid; 3]>,

    /// Chosen cost payment.
    pub cost: SmallVec<[CardUid; 3]>,

    /// Chosen tributes.
    pub tributes: SmallVec<[CardUid; 3]>,

    /// Chosen X, if the action required one.
    pub x: Option<i64>,

    /// Chosen amount, if the action required one.
    pub amount: Option<i64>,
}

/// LIFO stack of pending actions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionStack {
    /// Index 0 = bottom, last = top.
    entries: Vec<StackEntry>,

    /// Next stack entry ID.
    next_id: u32,
}

impl ActionStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Peek at the top of the stack without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// All entries, bottom to top.
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Allocate the next entry id.
    pub fn next_id(&mut self) -> StackEntryId {
        let id = StackEntryId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Push a fully-parameterized entry.
    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry);
    }

    /// Pop the top entry for resolution.
    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }
}
