//! The action gateway: the synchronization boundary between client
//! connections and match state.
//!
//! `MatchServer` is an explicitly constructed service object owning the
//! registry and rendezvous slots - exactly one instance per server
//! process, injected wherever request handling happens. Every in-match
//! call validates participant membership through the registry, then
//! executes exactly one action against the state machine under that
//! match's lock.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AccountId, AccountRef, CardId, CardUid, DeckId, GameResult, MatchId, Seat, TriggerId};
use crate::game::{MatchSnapshot, PassTarget};
use crate::rules::RulesEngine;
use crate::server::registry::MatchRegistry;
use crate::server::rendezvous::{EnqueueOutcome, Rendezvous};

/// Boundary to external deck storage: the core exchanges identifiers
/// only and receives a definition-id list back.
pub trait DeckSource: Send + Sync {
    /// Fetch the deck list an account enqueued with.
    fn deck(&self, account: AccountId, deck: DeckId) -> GameResult<Vec<CardId>>;
}

/// Server-wide configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Which seat the second arrival (the match creator) takes. The
    /// other seat - the account that waited - owns the first turn.
    pub creator_seat: Seat,

    /// Base seed for per-match deck shuffling.
    pub seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            creator_seat: Seat::Two,
            seed: 0,
        }
    }
}

/// One state-mutating action submitted against a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Pass priority, optionally fast-forwarding to a target phase.
    PassPriority { until: Option<PassTarget> },

    /// Attempt to cast a card from hand.
    Cast { card: CardUid },

    /// Attempt to activate an ability of a card in play.
    Activate { card: CardUid },

    /// Abort the pending cast.
    CancelCast,

    /// Choose targets for the pending cast.
    AssignTargets { targets: Vec<CardUid> },

    /// Choose the cost payment for the pending cast.
    SelectCosts { cards: Vec<CardUid> },

    /// Choose tributes for the pending cast.
    SelectTributes { cards: Vec<CardUid> },

    /// Choose X for the pending cast.
    SetX { value: i64 },

    /// Choose the amount for the pending cast.
    SetAmount { value: i64 },

    /// Supply a total order for owed triggers.
    OrderTriggers { order: Vec<TriggerId> },

    /// Resolve a pending multi-destination selection.
    SendCardsToDestinations { groups: Vec<Vec<CardUid>> },

    /// Lock in the declared attacks.
    SubmitAttack,

    /// Assign an attacker to a defender.
    AssignAttack { attacker: CardUid, defender: CardUid },

    /// Remove an attacker's assignment.
    UnassignAttack { attacker: CardUid },

    /// Attach a secondary attacker to an existing assignment.
    AddSecondaryAttacker { attacker: CardUid, primary: CardUid },
}

/// The authoritative match server core.
pub struct MatchServer {
    registry: MatchRegistry,
    rendezvous: Rendezvous,
    rules: Arc<dyn RulesEngine>,
    decks: Arc<dyn DeckSource>,
    config: ServerConfig,
}

impl MatchServer {
    /// Construct a server with injected collaborators.
    #[must_use]
    pub fn new(rules: Arc<dyn RulesEngine>, decks: Arc<dyn DeckSource>, config: ServerConfig) -> Self {
        Self {
            registry: MatchRegistry::new(),
            rendezvous: Rendezvous::new(),
            rules,
            decks,
            config,
        }
    }

    /// The match registry (lifecycle policies retire matches here).
    #[must_use]
    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    /// Enter (or poll) matchmaking with a deck.
    pub fn enqueue(&self, account: AccountRef, deck: DeckId) -> GameResult<EnqueueOutcome> {
        self.rendezvous.enqueue(
            account,
            deck,
            &self.registry,
            self.rules.as_ref(),
            self.decks.as_ref(),
            &self.config,
        )
    }

    /// Leave matchmaking. Idempotent: not being in the queue is fine.
    pub fn exit_queue(&self, account: AccountId) {
        self.rendezvous.exit_queue(account);
    }

    /// Whether an account currently waits in the matchmaking slot.
    #[must_use]
    pub fn is_queued(&self, account: AccountId) -> bool {
        self.rendezvous.is_waiting(account)
    }

    /// Fetch the match snapshot for a participant, draining its outbox.
    pub fn fetch_state(&self, account: AccountId, match_id: MatchId) -> GameResult<MatchSnapshot> {
        let (handle, seat) = self.registry.validate_player_match(account, match_id)?;
        let mut state = handle.lock().expect("match lock poisoned");
        Ok(MatchSnapshot::capture(&mut state, seat))
    }

    /// Legal defenders for one attacker (query; drains nothing).
    pub fn attackables(
        &self,
        account: AccountId,
        match_id: MatchId,
        attacker: CardUid,
    ) -> GameResult<Vec<CardUid>> {
        let (handle, seat) = self.registry.validate_player_match(account, match_id)?;
        let state = handle.lock().expect("match lock poisoned");
        state.attackable_defenders(self.rules.as_ref(), seat, attacker)
    }

    /// Submit one state-mutating action against a match.
    ///
    /// Membership and readiness are checked before any mutation; the
    /// per-match lock guarantees no other caller observes a
    /// half-applied action.
    pub fn submit(
        &self,
        account: AccountId,
        match_id: MatchId,
        action: PlayerAction,
    ) -> GameResult<()> {
        let (handle, seat) = self.registry.validate_player_match(account, match_id)?;
        let mut state = handle.lock().expect("match lock poisoned");
        debug!(%match_id, %seat, ?action, "action submitted");

        let rules = self.rules.as_ref();
        match action {
            PlayerAction::PassPriority { until } => state.pass_priority(rules, seat, until),
            PlayerAction::Cast { card } => state.attempt_cast(rules, seat, card),
            PlayerAction::Activate { card } => state.attempt_activate(rules, seat, card),
            PlayerAction::CancelCast => state.cancel_cast(seat),
            PlayerAction::AssignTargets { targets } => state.assign_targets(seat, targets),
            PlayerAction::SelectCosts { cards } => state.select_costs(seat, cards),
            PlayerAction::SelectTributes { cards } => state.select_tributes(seat, cards),
            PlayerAction::SetX { value } => state.set_x(seat, value),
            PlayerAction::SetAmount { value } => state.set_amount(seat, value),
            PlayerAction::OrderTriggers { order } => state.add_ordered_triggers(seat, order),
            PlayerAction::SendCardsToDestinations { groups } => {
                state.send_cards_to_destinations(seat, groups)
            }
            PlayerAction::SubmitAttack => state.submit_attack(rules, seat),
            PlayerAction::AssignAttack { attacker, defender } => {
                state.assign_attack(rules, seat, attacker, defender)
            }
            PlayerAction::UnassignAttack { attacker } => {
                state.unassign_attack(rules, seat, attacker)
            }
            PlayerAction::AddSecondaryAttacker { attacker, primary } => {
                state.add_secondary_attacker(rules, seat, attacker, primary)
            }
        }
    }
}
