//! Per-participant match state.

use serde::{Deserialize, Serialize};

use crate::core::{AccountRef, CardUid, Seat, TriggerId};
use crate::events::Outbox;
use crate::game::combat::AttackPlan;
use crate::game::phase::PassTarget;
use crate::game::selection::{PendingCast, PendingSelection};

/// Default starting life total.
pub const DEFAULT_LIFE: i64 = 20;

/// A triggered ability owed to this seat, awaiting ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedTrigger {
    /// Trigger identity, monotonic within the match.
    pub id: TriggerId,

    /// The card whose ability triggered.
    pub source: CardUid,
}

/// One side of a match: identity, board state, and every transient
/// sub-state the protocol tracks for this seat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Participant {
    /// Immutable identity token from external auth.
    pub account: AccountRef,

    /// Which seat this participant occupies.
    pub seat: Seat,

    /// Life total.
    pub life: i64,

    /// Hand, in draw order. Hidden from the opponent; size is public.
    pub hand: Vec<CardUid>,

    /// Cards in play.
    pub field: Vec<CardUid>,

    /// Discard pile, oldest first.
    pub graveyard: Vec<CardUid>,

    /// Deck remainder, top = end of vec.
    pub deck: Vec<CardUid>,

    /// Whether this participant's deck has been loaded.
    pub deck_loaded: bool,

    /// Undelivered state-change events.
    pub outbox: Outbox,

    /// Cast/activation attempt still collecting parameters.
    pub pending_cast: Option<PendingCast>,

    /// Multi-destination selection awaited from this seat.
    pub pending_selection: Option<PendingSelection>,

    /// Simultaneous triggers owed to this seat, awaiting a total order.
    pub pending_triggers: Vec<OwedTrigger>,

    /// In-progress attack declaration (turn owner only).
    pub attacks: AttackPlan,

    /// Standing fast-forward pass intent.
    pub pass_intent: Option<PassTarget>,
}

impl Participant {
    /// Create a participant with an empty board.
    #[must_use]
    pub fn new(account: AccountRef, seat: Seat) -> Self {
        Self {
            account,
            seat,
            life: DEFAULT_LIFE,
            hand: Vec::new(),
            field: Vec::new(),
            graveyard: Vec::new(),
            deck: Vec::new(),
            deck_loaded: false,
            outbox: Outbox::new(),
            pending_cast: None,
            pending_selection: None,
            pending_triggers: Vec::new(),
            attacks: AttackPlan::new(),
            pass_intent: None,
        }
    }

    /// Whether the hand contains a uid.
    #[must_use]
    pub fn hand_contains(&self, uid: CardUid) -> bool {
        self.hand.contains(&uid)
    }

    /// Whether the field contains a uid.
    #[must_use]
    pub fn field_contains(&self, uid: CardUid) -> bool {
        self.field.contains(&uid)
    }

    /// Remove a uid from whichever zone list currently holds it.
    ///
    /// Returns `true` if the uid was found.
    pub fn remove_from_zone_lists(&mut self, uid: CardUid) -> bool {
        for list in [
            &mut self.hand,
            &mut self.field,
            &mut self.graveyard,
            &mut self.deck,
        ] {
            if let Some(pos) = list.iter().position(|&c| c == uid) {
                list.remove(pos);
                return true;
            }
        }
        false
    }
}
