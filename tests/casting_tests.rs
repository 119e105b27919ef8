//! Casting tests: announce, parameter collection, submission, and
//! cancellation.

mod common;

use ccg_server::cards::Zone;
use ccg_server::core::{GameError, Seat};
use ccg_server::events::MatchEvent;
use ccg_server::RulesEngine;

use common::{duel_match, fetch, pass, BIG, BURN, BEAST, CREATURE, REMOVAL};

// =============================================================================
// Untargeted casts
// =============================================================================

/// A cast with no open parameters is pushed immediately: the card moves
/// to the stack zone and the opponent gets the response window.
#[test]
fn test_plain_cast_pushes_immediately() {
    let (rules, mut state) = duel_match(42);
    let uid = fetch(&mut state, Seat::One, CREATURE, Zone::Hand);

    state.attempt_cast(&rules, Seat::One, uid).unwrap();

    assert_eq!(state.stack().len(), 1);
    assert_eq!(state.card(uid).unwrap().zone, Zone::Stack);
    assert_eq!(state.priority_holder(), Seat::Two);
    assert!(state.participant(Seat::One).pending_cast.is_none());
}

/// Two passes after the push resolve exactly the top entry; the card
/// enters play and priority returns to the turn owner.
#[test]
fn test_pushed_cast_resolves_on_double_pass() {
    let (rules, mut state) = duel_match(42);
    let uid = fetch(&mut state, Seat::One, CREATURE, Zone::Hand);
    state.attempt_cast(&rules, Seat::One, uid).unwrap();

    pass(&rules, &mut state); // seat two declines to respond
    pass(&rules, &mut state); // seat one confirms

    assert!(state.stack().is_empty());
    assert_eq!(state.card(uid).unwrap().zone, Zone::Field);
    assert!(state.participant(Seat::One).field.contains(&uid));
    assert_eq!(state.priority_holder(), Seat::One);
    // The resolution did not advance the phase.
    assert_eq!(state.phase(), rules.schedule().first());
}

// =============================================================================
// Rejection paths
// =============================================================================

/// Casting without priority is rejected.
#[test]
fn test_cast_requires_priority() {
    let (rules, mut state) = duel_match(42);
    let uid = fetch(&mut state, Seat::Two, CREATURE, Zone::Hand);

    let err = state.attempt_cast(&rules, Seat::Two, uid).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
    assert!(state.stack().is_empty());
}

/// Casting a card that is not in hand is rejected atomically: no stack
/// change, no sub-state, no events.
#[test]
fn test_cast_from_deck_rejected_without_side_effects() {
    let (rules, mut state) = duel_match(42);
    let uid = *state.participant(Seat::One).deck.first().unwrap();
    state.drain_outbox(Seat::One);
    state.drain_outbox(Seat::Two);

    let err = state.attempt_cast(&rules, Seat::One, uid).unwrap_err();

    assert!(matches!(err, GameError::Validation(_)));
    assert!(state.stack().is_empty());
    assert!(state.participant(Seat::One).pending_cast.is_none());
    assert!(state.participant(Seat::One).outbox.is_empty());
    assert!(state.participant(Seat::Two).outbox.is_empty());
}

/// A pending cast blocks every other priority action by that seat
/// until it is submitted or cancelled.
#[test]
fn test_pending_cast_blocks_other_actions() {
    let (rules, mut state) = duel_match(42);
    fetch(&mut state, Seat::Two, BIG, Zone::Field);
    let removal = fetch(&mut state, Seat::One, REMOVAL, Zone::Hand);
    let creature = fetch(&mut state, Seat::One, CREATURE, Zone::Hand);

    state.attempt_cast(&rules, Seat::One, removal).unwrap();
    assert!(state.participant(Seat::One).pending_cast.is_some());

    let err = state.pass_priority(&rules, Seat::One, None).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
    let err = state.attempt_cast(&rules, Seat::One, creature).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
}

// =============================================================================
// Targets
// =============================================================================

/// A targeted cast stays pending until targets are chosen; an illegal
/// choice is rejected and the sub-state stays open.
#[test]
fn test_targeted_cast_collects_targets() {
    let (rules, mut state) = duel_match(42);
    let enemy = fetch(&mut state, Seat::Two, BIG, Zone::Field);
    let own = fetch(&mut state, Seat::One, CREATURE, Zone::Field);
    let removal = fetch(&mut state, Seat::One, REMOVAL, Zone::Hand);

    state.attempt_cast(&rules, Seat::One, removal).unwrap();
    assert!(state.stack().is_empty());
    assert_eq!(state.priority_holder(), Seat::One);

    // Own cards are not legal targets; the wrong count is not either.
    let err = state.assign_targets(Seat::One, vec![own]).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
    let err = state.assign_targets(Seat::One, vec![]).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
    assert!(state.participant(Seat::One).pending_cast.is_some());

    state.assign_targets(Seat::One, vec![enemy]).unwrap();
    assert_eq!(state.stack().len(), 1);
    assert_eq!(state.stack().top().unwrap().targets.as_slice(), &[enemy]);

    pass(&rules, &mut state);
    pass(&rules, &mut state);
    assert_eq!(state.card(enemy).unwrap().zone, Zone::Graveyard);
    assert!(state.participant(Seat::Two).graveyard.contains(&enemy));
}

// =============================================================================
// X values
// =============================================================================

/// X must land inside the bounds the rules engine reported; the chosen
/// value flows through resolution.
#[test]
fn test_x_cast_bounds_and_effect() {
    let (rules, mut state) = duel_match(42);
    let burn = fetch(&mut state, Seat::One, BURN, Zone::Hand);
    state.attempt_cast(&rules, Seat::One, burn).unwrap();

    assert!(matches!(
        state.set_x(Seat::One, 0).unwrap_err(),
        GameError::Validation(_)
    ));
    assert!(matches!(
        state.set_x(Seat::One, 6).unwrap_err(),
        GameError::Validation(_)
    ));

    state.set_x(Seat::One, 4).unwrap();
    assert_eq!(state.stack().top().unwrap().x, Some(4));

    pass(&rules, &mut state);
    pass(&rules, &mut state);
    assert_eq!(state.participant(Seat::Two).life, 16);
}

// =============================================================================
// Tributes
// =============================================================================

/// A tribute cast is refused outright with no material, collects its
/// tribute otherwise, and sends the tribute to the graveyard on
/// resolution.
#[test]
fn test_tribute_cast() {
    let (rules, mut state) = duel_match(42);
    let beast = fetch(&mut state, Seat::One, BEAST, Zone::Hand);

    // No field card to tribute: the announce itself is rejected.
    let err = state.attempt_cast(&rules, Seat::One, beast).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));

    let fodder = fetch(&mut state, Seat::One, CREATURE, Zone::Field);
    let enemy = fetch(&mut state, Seat::Two, CREATURE, Zone::Field);
    state.attempt_cast(&rules, Seat::One, beast).unwrap();

    // The opponent's card is not a legal tribute.
    let err = state.select_tributes(Seat::One, vec![enemy]).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));

    state.select_tributes(Seat::One, vec![fodder]).unwrap();
    pass(&rules, &mut state);
    pass(&rules, &mut state);

    assert_eq!(state.card(fodder).unwrap().zone, Zone::Graveyard);
    assert_eq!(state.card(beast).unwrap().zone, Zone::Field);
}

// =============================================================================
// Cancellation
// =============================================================================

/// Cancelling a pending cast is a pure rollback: the card is back in
/// hand, priority unmoved, and the same cast can be re-announced.
#[test]
fn test_cancel_cast_rolls_back() {
    let (rules, mut state) = duel_match(42);
    fetch(&mut state, Seat::Two, BIG, Zone::Field);
    let removal = fetch(&mut state, Seat::One, REMOVAL, Zone::Hand);

    state.attempt_cast(&rules, Seat::One, removal).unwrap();
    state.cancel_cast(Seat::One).unwrap();

    assert!(state.participant(Seat::One).pending_cast.is_none());
    assert_eq!(state.card(removal).unwrap().zone, Zone::Hand);
    assert!(state.stack().is_empty());
    assert_eq!(state.priority_holder(), Seat::One);

    // Nothing was consumed; the announce works again.
    state.attempt_cast(&rules, Seat::One, removal).unwrap();
    assert!(state.participant(Seat::One).pending_cast.is_some());
}

/// Cancelling with nothing pending is an error.
#[test]
fn test_cancel_without_pending_is_rejected() {
    let (_, mut state) = duel_match(42);
    let err = state.cancel_cast(Seat::One).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
}

// =============================================================================
// Activations
// =============================================================================

/// Activating a card in play pushes an entry without moving the card;
/// the reference effect costs the opponent one life.
#[test]
fn test_activation_leaves_card_in_place() {
    let (rules, mut state) = duel_match(42);
    let creature = fetch(&mut state, Seat::One, CREATURE, Zone::Field);

    state.attempt_activate(&rules, Seat::One, creature).unwrap();
    assert_eq!(state.stack().len(), 1);
    assert_eq!(state.card(creature).unwrap().zone, Zone::Field);

    pass(&rules, &mut state);
    pass(&rules, &mut state);
    assert_eq!(state.participant(Seat::Two).life, 19);
    assert_eq!(state.card(creature).unwrap().zone, Zone::Field);
}

/// Every accepted action lands in both outboxes in the same order.
#[test]
fn test_events_mirror_across_outboxes() {
    let (rules, mut state) = duel_match(42);
    state.drain_outbox(Seat::One);
    state.drain_outbox(Seat::Two);

    let uid = fetch(&mut state, Seat::One, CREATURE, Zone::Hand);
    state.attempt_cast(&rules, Seat::One, uid).unwrap();
    pass(&rules, &mut state);
    pass(&rules, &mut state);

    let one = state.drain_outbox(Seat::One);
    let two = state.drain_outbox(Seat::Two);
    assert_eq!(one, two);
    assert!(one
        .iter()
        .any(|e| matches!(e, MatchEvent::StackResolved { .. })));
}
