//! Matchmaking rendezvous: pairing two queuing accounts into one match.
//!
//! A single waiting slot plus a single pending-match slot, both guarded
//! by one mutex. Exactly one of the paired accounts (the second
//! arrival) receives the match synchronously; the first discovers it on
//! a later poll and claims it. A third account that arrives while a
//! pairing is unclaimed is told to retry without mutating anything, so
//! pairing exclusivity is never broken.

use std::sync::Mutex;

use tracing::{debug, info};

use crate::core::{AccountId, AccountRef, DeckId, GameError, GameResult, Seat};
use crate::game::{MatchSnapshot, MatchState};
use crate::rules::RulesEngine;
use crate::server::gateway::{DeckSource, ServerConfig};
use crate::server::registry::MatchRegistry;

/// The account occupying the waiting slot.
#[derive(Clone, Debug)]
struct WaitingEntry {
    account: AccountRef,
    deck: DeckId,
}

#[derive(Debug, Default)]
struct Slots {
    waiting: Option<WaitingEntry>,
    pending: Option<crate::core::MatchId>,
}

/// Result of one enqueue poll.
#[derive(Clone, Debug)]
pub enum EnqueueOutcome {
    /// No match yet; poll again.
    Pending,

    /// Paired: the fully-populated match state for the caller.
    Matched(MatchSnapshot),
}

/// The two-slot rendezvous protocol state.
#[derive(Debug, Default)]
pub struct Rendezvous {
    slots: Mutex<Slots>,
}

impl Rendezvous {
    /// Create an empty rendezvous.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One enqueue poll by an authenticated account.
    ///
    /// All transitions happen under the slot mutex, so two concurrent
    /// pollers can never both believe they created the match.
    pub fn enqueue(
        &self,
        account: AccountRef,
        deck: DeckId,
        registry: &MatchRegistry,
        rules: &dyn RulesEngine,
        decks: &dyn DeckSource,
        config: &ServerConfig,
    ) -> GameResult<EnqueueOutcome> {
        let mut slots = self.slots.lock().expect("rendezvous lock poisoned");

        let waiting = match &slots.waiting {
            None => {
                slots.waiting = Some(WaitingEntry { account, deck });
                return Ok(EnqueueOutcome::Pending);
            }
            Some(entry) => entry.clone(),
        };

        if waiting.account.id == account.id {
            // The waiting account's own repoll.
            let Some(match_id) = slots.pending else {
                return Ok(EnqueueOutcome::Pending);
            };

            // Claim the pairing created by the second arrival.
            let handle = registry.get(match_id)?;
            let mut state = handle.lock().expect("match lock poisoned");
            let seat = state.seat_of(account.id).ok_or_else(|| {
                GameError::Conflict(format!("{} pending for another account", match_id))
            })?;
            let list = decks.deck(account.id, waiting.deck)?;
            state.load_deck(seat, &list)?;
            let snapshot = MatchSnapshot::capture(&mut state, seat);

            slots.waiting = None;
            slots.pending = None;
            info!(%match_id, account = %account.id, "waiting account claimed match");
            return Ok(EnqueueOutcome::Matched(snapshot));
        }

        if slots.pending.is_some() {
            // A pairing is mid-claim; newcomers must retry.
            debug!(account = %account.id, "pairing in progress, newcomer retries");
            return Ok(EnqueueOutcome::Pending);
        }

        // Pair the newcomer with the waiting account.
        let match_id = registry.allocate_id();
        let creator_seat = config.creator_seat;
        let (one, two) = match creator_seat {
            Seat::One => (account.clone(), waiting.account.clone()),
            Seat::Two => (waiting.account.clone(), account.clone()),
        };
        let first_turn = creator_seat.other();
        let seed = config.seed.wrapping_add(match_id.raw());

        let mut state = MatchState::new(
            match_id,
            one,
            two,
            rules.schedule().clone(),
            first_turn,
            seed,
        );
        let list = decks.deck(account.id, deck)?;
        state.load_deck(creator_seat, &list)?;
        let snapshot = MatchSnapshot::capture(&mut state, creator_seat);

        registry.publish(state);
        slots.pending = Some(match_id);
        info!(
            %match_id,
            creator = %account.id,
            waiting = %waiting.account.id,
            "paired two accounts into a new match"
        );
        Ok(EnqueueOutcome::Matched(snapshot))
    }

    /// Leave the waiting slot. A no-op (not an error) if the account is
    /// not the occupant; refuses to orphan an unclaimed pairing.
    pub fn exit_queue(&self, account: AccountId) -> bool {
        let mut slots = self.slots.lock().expect("rendezvous lock poisoned");
        let occupant = slots
            .waiting
            .as_ref()
            .is_some_and(|w| w.account.id == account);
        if occupant && slots.pending.is_none() {
            slots.waiting = None;
            debug!(account = %account, "left the matchmaking queue");
            true
        } else {
            false
        }
    }

    /// Whether an account currently occupies the waiting slot.
    #[must_use]
    pub fn is_waiting(&self, account: AccountId) -> bool {
        self.slots
            .lock()
            .expect("rendezvous lock poisoned")
            .waiting
            .as_ref()
            .is_some_and(|w| w.account.id == account)
    }
}
