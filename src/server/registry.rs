//! Process-wide match registry.
//!
//! Allocates monotonically increasing match ids and maps each id to its
//! live match. Every match is wrapped in its own `Mutex`: mutations
//! within one match serialize, while actions on unrelated matches
//! proceed concurrently. The id map itself sits behind a lightweight
//! `RwLock`, held only for lookup/insert.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;

use crate::core::{AccountId, GameError, GameResult, MatchId, Seat};
use crate::game::MatchState;

/// Shared handle to one live match.
pub type MatchHandle = Arc<Mutex<MatchState>>;

/// Registry of live matches.
#[derive(Debug, Default)]
pub struct MatchRegistry {
    next_id: AtomicU64,
    matches: RwLock<FxHashMap<MatchId, MatchHandle>>,
}

impl MatchRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next match id.
    pub fn allocate_id(&self) -> MatchId {
        MatchId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Publish a match, making it visible to lookups.
    pub fn publish(&self, state: MatchState) -> MatchHandle {
        let id = state.id();
        let handle = Arc::new(Mutex::new(state));
        self.matches
            .write()
            .expect("registry lock poisoned")
            .insert(id, Arc::clone(&handle));
        handle
    }

    /// Number of live matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.read().expect("registry lock poisoned").len()
    }

    /// Whether the registry holds no matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a match by id.
    pub fn get(&self, id: MatchId) -> GameResult<MatchHandle> {
        self.matches
            .read()
            .expect("registry lock poisoned")
            .get(&id)
            .cloned()
            .ok_or_else(|| GameError::not_found(format!("{id}")))
    }

    /// The single authorization check for every in-match action: the
    /// match must exist and the account must be one of its two
    /// participants. Returns the handle plus the account's seat.
    pub fn validate_player_match(
        &self,
        account: AccountId,
        id: MatchId,
    ) -> GameResult<(MatchHandle, Seat)> {
        let handle = self.get(id)?;
        let seat = {
            let state = handle.lock().expect("match lock poisoned");
            state.seat_of(account)
        };
        match seat {
            Some(seat) => Ok((handle, seat)),
            None => Err(GameError::authorization(format!(
                "{account} is not a participant of {id}"
            ))),
        }
    }

    /// Remove a match (external lifecycle policy; the core never calls
    /// this on its own).
    pub fn retire(&self, id: MatchId) -> GameResult<()> {
        self.matches
            .write()
            .expect("registry lock poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| GameError::not_found(format!("{id}")))
    }
}
