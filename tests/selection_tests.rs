//! Multi-destination selection tests: the scry-style distribute-a-pool
//! flow.

mod common;

use ccg_server::cards::Zone;
use ccg_server::core::{CardUid, GameError, Seat};
use ccg_server::events::MatchEvent;

use common::{duel_match, fetch, pass, SEER};

/// Resolve a seer cast and return the selection pool (top of deck
/// first).
fn open_scry(state: &mut ccg_server::game::MatchState, rules: &ccg_server::games::duel::DuelRules) -> Vec<CardUid> {
    let seer = fetch(state, Seat::One, SEER, Zone::Hand);
    state.attempt_cast(rules, Seat::One, seer).unwrap();
    pass(rules, state);
    pass(rules, state);

    state
        .participant(Seat::One)
        .pending_selection
        .as_ref()
        .expect("scry must open a selection")
        .pool
        .clone()
}

/// The scry resolution opens a selection over the top three deck cards
/// and announces it.
#[test]
fn test_scry_opens_selection() {
    let (rules, mut state) = duel_match(42);
    let seer = fetch(&mut state, Seat::One, SEER, Zone::Hand);
    let top_three: Vec<CardUid> = {
        let deck = &state.participant(Seat::One).deck;
        deck[deck.len() - 3..].iter().rev().copied().collect()
    };

    state.attempt_cast(&rules, Seat::One, seer).unwrap();
    pass(&rules, &mut state);
    pass(&rules, &mut state);

    let pool = state
        .participant(Seat::One)
        .pending_selection
        .as_ref()
        .expect("scry must open a selection")
        .pool
        .clone();
    assert_eq!(pool, top_three);

    let drained = state.drain_outbox(Seat::One);
    assert!(drained
        .iter()
        .any(|e| matches!(e, MatchEvent::SelectionRequired { seat: Seat::One, .. })));
}

/// While a selection is open, its seat cannot pass or cast.
#[test]
fn test_open_selection_blocks_actions() {
    let (rules, mut state) = duel_match(42);
    open_scry(&mut state, &rules);

    let err = state.pass_priority(&rules, Seat::One, None).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
}

/// Malformed groupings are rejected atomically: wrong group count,
/// overfull destination, foreign card, incomplete coverage.
#[test]
fn test_invalid_groupings_rejected() {
    let (rules, mut state) = duel_match(42);
    let pool = open_scry(&mut state, &rules);
    let stranger = *state.participant(Seat::Two).deck.first().unwrap();

    let bad_groupings = [
        vec![pool.clone()],
        vec![vec![pool[0], pool[1]], vec![pool[2]]],
        vec![vec![stranger], vec![pool[0], pool[1], pool[2]]],
        vec![vec![], vec![pool[0], pool[1]]],
    ];

    for groups in bad_groupings {
        let err = state
            .send_cards_to_destinations(Seat::One, groups)
            .unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
        assert!(state.participant(Seat::One).pending_selection.is_some());
    }
}

/// A valid grouping moves one card to hand and the rest to the deck
/// bottom in listed order, then closes the selection.
#[test]
fn test_valid_grouping_applies() {
    let (rules, mut state) = duel_match(42);
    let pool = open_scry(&mut state, &rules);

    state
        .send_cards_to_destinations(Seat::One, vec![vec![pool[0]], vec![pool[1], pool[2]]])
        .unwrap();

    assert!(state.participant(Seat::One).pending_selection.is_none());
    assert_eq!(state.card(pool[0]).unwrap().zone, Zone::Hand);
    // First listed ends lowest in the deck.
    let deck = &state.participant(Seat::One).deck;
    assert_eq!(deck[0], pool[1]);
    assert_eq!(deck[1], pool[2]);

    let drained = state.drain_outbox(Seat::One);
    assert!(drained
        .iter()
        .any(|e| matches!(e, MatchEvent::SelectionResolved { seat: Seat::One })));

    // The match continues normally.
    pass(&rules, &mut state);
    pass(&rules, &mut state);
}

/// Keeping nothing is legal when the hand slot's minimum is zero.
#[test]
fn test_keeping_nothing_is_legal() {
    let (rules, mut state) = duel_match(7);
    let pool = open_scry(&mut state, &rules);

    state
        .send_cards_to_destinations(Seat::One, vec![vec![], pool.clone()])
        .unwrap();
    assert!(state.participant(Seat::One).pending_selection.is_none());
    let deck = &state.participant(Seat::One).deck;
    assert_eq!(&deck[0..3], pool.as_slice());
}
