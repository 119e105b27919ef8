//! Match events and the per-participant outbox.
//!
//! Every state change produced by an action is described by a
//! `MatchEvent` and appended to *both* participants' outboxes in causal
//! order. A participant's outbox is drained atomically when that
//! participant fetches the match snapshot - that drain is the sole
//! delivery mechanism for polling clients, so nothing may be dropped or
//! duplicated between two drains.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Zone;
use crate::core::{CardUid, Seat, TriggerId};
use crate::game::{PhaseId, StackEntryId};

/// One observable state change inside a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A participant's deck was loaded into the match.
    DeckLoaded { seat: Seat, count: usize },

    /// Both decks are loaded; gameplay actions are now accepted.
    MatchReady,

    /// A new turn began.
    TurnBegan { turn_owner: Seat, turn_number: u32 },

    /// The match entered a new phase.
    PhaseEntered { phase: PhaseId },

    /// Priority moved from one seat to the other.
    PriorityPassed { from: Seat, to: Seat },

    /// A cast attempt was announced (parameters still being collected).
    CastAnnounced { seat: Seat, card: CardUid },

    /// An ability activation was announced.
    ActivationAnnounced { seat: Seat, card: CardUid },

    /// A pending cast was aborted before submission.
    CastCancelled { seat: Seat },

    /// Targets were chosen for the pending cast.
    TargetsChosen { seat: Seat, targets: Vec<CardUid> },

    /// Cost payment was chosen for the pending cast.
    CostsChosen { seat: Seat, cards: Vec<CardUid> },

    /// Tributes were chosen for the pending cast.
    TributesChosen { seat: Seat, cards: Vec<CardUid> },

    /// A numeric X was chosen for the pending cast.
    XChosen { seat: Seat, value: i64 },

    /// A numeric amount was chosen for the pending cast.
    AmountChosen { seat: Seat, value: i64 },

    /// An entry was pushed onto the action stack.
    StackPushed {
        entry: StackEntryId,
        controller: Seat,
        card: Option<CardUid>,
    },

    /// The top stack entry resolved.
    StackResolved { entry: StackEntryId },

    /// Simultaneous triggers are owed to a seat and must be ordered.
    TriggersOwed { seat: Seat, triggers: Vec<TriggerId> },

    /// A seat supplied a total order for its owed triggers.
    TriggersOrdered { seat: Seat, order: Vec<TriggerId> },

    /// A multi-destination card selection is awaited from a seat.
    SelectionRequired { seat: Seat, pool: Vec<CardUid> },

    /// A multi-destination card selection was applied.
    SelectionResolved { seat: Seat },

    /// A card instance changed zone.
    CardMoved { card: CardUid, from: Zone, to: Zone },

    /// A participant's life total changed.
    LifeChanged { seat: Seat, life: i64 },

    /// The turn owner locked in its declared attacks.
    AttackSubmitted { seat: Seat },

    /// An attacker was assigned to a defender.
    AttackAssigned { attacker: CardUid, defender: CardUid },

    /// An attacker's assignment was removed.
    AttackUnassigned { attacker: CardUid },

    /// An additional attacker joined an existing assignment.
    SecondaryAttackerAdded { attacker: CardUid, primary: CardUid },
}

/// Append-only event queue for one participant.
///
/// Backed by an `im::Vector` so snapshotting the match state clones the
/// queue in O(1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outbox {
    events: Vector<MatchEvent>,
}

impl Outbox {
    /// Create an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.
    pub fn push(&mut self, event: MatchEvent) {
        self.events.push_back(event);
    }

    /// Number of undelivered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the outbox is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return all undelivered events, in append order.
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }
}
