//! Identifier newtypes shared across the server core.
//!
//! Every id is a thin wrapper around an integer:
//! - `AccountId` / `DeckId`: opaque tokens owned by external storage
//! - `MatchId`: allocated monotonically by the match registry
//! - `CardId`: a card *definition* (what the card is)
//! - `CardUid`: a card *instance*, unique within one match, assigned at
//!   deck-load time and never reused
//! - `TriggerId`: a pending triggered ability awaiting ordering

use serde::{Deserialize, Serialize};

/// Opaque account identifier owned by the external auth/storage layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Account({})", self.0)
    }
}

/// Opaque deck identifier owned by external deck storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u64);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Match identifier, allocated monotonically by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    /// Create a new match ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Card definition identifier (which card this is, not which copy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card definition ID.
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

/// Match-scoped card instance identifier.
///
/// Allocated monotonically within one match at deck-load time.
/// Uids are never reused for the lifetime of the match, so any uid seen
/// in a message resolves to at most one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl CardUid {
    /// Create a new card uid.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw uid value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Identifier for a pending triggered ability awaiting player ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

impl TriggerId {
    /// Create a new trigger ID.
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

/// Immutable identity token for one participant, owned by external auth.
///
/// The core never mutates this; it is carried for the duration of a match
/// and echoed back in snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// Opaque account id.
    pub id: AccountId,

    /// Display name, for snapshots only.
    pub name: String,
}

impl AccountRef {
    /// Create a new account reference.
    #[must_use]
    pub fn new(id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        assert_eq!(AccountId::new(7).raw(), 7);
        assert_eq!(MatchId::new(3).raw(), 3);
        assert_eq!(CardUid::new(12).raw(), 12);
        assert_eq!(TriggerId::new(2).raw(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AccountId::new(1)), "Account(1)");
        assert_eq!(format!("{}", MatchId::new(9)), "Match(9)");
        assert_eq!(format!("{}", CardUid::new(4)), "Card#4");
    }

    #[test]
    fn test_account_ref() {
        let account = AccountRef::new(AccountId::new(5), "alice");
        assert_eq!(account.id, AccountId::new(5));
        assert_eq!(account.name, "alice");
    }
}
