//! Full-state snapshots returned to polling clients.
//!
//! A snapshot is built from one seat's perspective: the caller sees its
//! own hand, the opponent's hand size only. Fetching a snapshot drains
//! the caller's outbox - that drain is the delivery guarantee, so the
//! two are one operation.

use serde::{Deserialize, Serialize};

use crate::core::{AccountRef, CardId, CardUid, MatchId, Seat};
use crate::events::MatchEvent;
use crate::game::stack::StackEntry;
use crate::game::state::MatchState;
use crate::game::PhaseId;

/// One visible card instance: the match-scoped uid plus the definition
/// it points at, so clients can render what the card is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Instance id (what every action references).
    pub uid: CardUid,

    /// Definition id (what the card is).
    pub card_id: CardId,
}

/// One participant as visible to the snapshot's caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    /// Identity token.
    pub account: AccountRef,

    /// Seat occupied.
    pub seat: Seat,

    /// Life total.
    pub life: i64,

    /// Hand contents; `None` for the opponent.
    pub hand: Option<Vec<CardView>>,

    /// Hand size (public for both seats).
    pub hand_size: usize,

    /// Cards in play.
    pub field: Vec<CardView>,

    /// Discard pile.
    pub graveyard: Vec<CardView>,

    /// Cards left in deck.
    pub deck_size: usize,

    /// Whether this seat's deck is loaded.
    pub deck_loaded: bool,
}

/// A full match snapshot from one seat's perspective, including that
/// seat's drained events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Match id.
    pub id: MatchId,

    /// Whether gameplay actions are accepted.
    pub ready: bool,

    /// Current phase.
    pub phase: PhaseId,

    /// Current turn number.
    pub turn_number: u32,

    /// Whose turn it is.
    pub turn_owner: Seat,

    /// Who holds priority.
    pub priority: Seat,

    /// The action stack, bottom to top.
    pub stack: Vec<StackEntry>,

    /// The caller.
    pub me: ParticipantView,

    /// The opponent (hand hidden).
    pub opponent: ParticipantView,

    /// The caller's undelivered events, drained by this fetch.
    pub events: Vec<MatchEvent>,
}

impl MatchSnapshot {
    /// Build a snapshot for `seat`, draining that seat's outbox.
    #[must_use]
    pub fn capture(state: &mut MatchState, seat: Seat) -> Self {
        let events = state.drain_outbox(seat);
        Self {
            id: state.id(),
            ready: state.is_ready(),
            phase: state.phase(),
            turn_number: state.turn_number(),
            turn_owner: state.turn_owner(),
            priority: state.priority_holder(),
            stack: state.stack().entries().to_vec(),
            me: Self::view(state, seat, true),
            opponent: Self::view(state, seat.other(), false),
            events,
        }
    }

    fn view(state: &MatchState, seat: Seat, include_hand: bool) -> ParticipantView {
        let p = state.participant(seat);
        ParticipantView {
            account: p.account.clone(),
            seat,
            life: p.life,
            hand: include_hand.then(|| Self::cards(state, &p.hand)),
            hand_size: p.hand.len(),
            field: Self::cards(state, &p.field),
            graveyard: Self::cards(state, &p.graveyard),
            deck_size: p.deck.len(),
            deck_loaded: p.deck_loaded,
        }
    }

    fn cards(state: &MatchState, uids: &[CardUid]) -> Vec<CardView> {
        uids.iter()
            .filter_map(|&uid| state.card(uid).ok())
            .map(|card| CardView {
                uid: card.uid,
                card_id: card.card_id,
            })
            .collect()
    }
}
