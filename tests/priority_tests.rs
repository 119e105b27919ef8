//! Priority protocol tests: the double-pass rule and fast-forward
//! targets.

mod common;

use ccg_server::core::{GameError, Seat};
use ccg_server::game::{PassTarget, PhaseId};
use ccg_server::games::duel::phases;
use ccg_server::RulesEngine;
use proptest::prelude::*;

use common::{duel_match, pass};

// =============================================================================
// The double-pass rule
// =============================================================================

/// A single pass only transfers priority; nothing else moves.
#[test]
fn test_single_pass_transfers_priority() {
    let (rules, mut state) = duel_match(42);
    assert_eq!(state.phase(), phases::UNTAP);
    assert_eq!(state.priority_holder(), Seat::One);

    state.pass_priority(&rules, Seat::One, None).unwrap();

    assert_eq!(state.phase(), phases::UNTAP);
    assert_eq!(state.priority_holder(), Seat::Two);
    assert_eq!(state.turn_number(), 1);
}

/// Two consecutive passes with an empty stack advance exactly one
/// phase and hand priority back to the turn owner.
#[test]
fn test_double_pass_advances_one_phase() {
    let (rules, mut state) = duel_match(42);

    pass(&rules, &mut state);
    pass(&rules, &mut state);

    assert_eq!(state.phase(), phases::DRAW);
    assert_eq!(state.priority_holder(), Seat::One);
    // Entering the draw phase drew the turn owner a card.
    assert_eq!(state.participant(Seat::One).hand.len(), 1);
    assert_eq!(state.participant(Seat::Two).hand.len(), 0);
}

/// An action between passes resets the count: the opponent's earlier
/// pass does not count toward the advance.
#[test]
fn test_pass_count_resets_on_push() {
    let (rules, mut state) = duel_match(42);
    let uid = common::fetch(
        &mut state,
        Seat::Two,
        common::CREATURE,
        ccg_server::cards::Zone::Hand,
    );

    pass(&rules, &mut state); // seat one passes, priority to seat two
    state.attempt_cast(&rules, Seat::Two, uid).unwrap();

    // The push handed priority to seat one; its pass is the *first* of
    // a new pair, so the phase must not advance.
    pass(&rules, &mut state);
    assert_eq!(state.phase(), phases::UNTAP);
    assert_eq!(state.priority_holder(), Seat::Two);
}

/// Passing without priority is rejected with no state change.
#[test]
fn test_pass_requires_priority() {
    let (rules, mut state) = duel_match(42);

    let err = state.pass_priority(&rules, Seat::Two, None).unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
    assert_eq!(state.priority_holder(), Seat::One);
    assert_eq!(state.phase(), phases::UNTAP);
}

/// The turn rolls over after the last phase: owner flips, number
/// increments, the schedule restarts.
#[test]
fn test_turn_rollover() {
    let (rules, mut state) = duel_match(42);

    for _ in 0..rules.schedule().phases().len() {
        pass(&rules, &mut state);
        pass(&rules, &mut state);
    }

    assert_eq!(state.turn_number(), 2);
    assert_eq!(state.turn_owner(), Seat::Two);
    assert_eq!(state.phase(), phases::UNTAP);
    assert_eq!(state.priority_holder(), Seat::Two);
}

// =============================================================================
// Fast-forward targets
// =============================================================================

/// A phase target auto-passes that seat's intermediate windows; with
/// both seats targeting combat, two calls cross three phases.
#[test]
fn test_phase_target_fast_forward() {
    let (rules, mut state) = duel_match(42);
    let target = Some(PassTarget::Phase(phases::COMBAT));

    state.pass_priority(&rules, Seat::One, target).unwrap();
    state.pass_priority(&rules, Seat::Two, target).unwrap();

    assert_eq!(state.phase(), phases::COMBAT);
    assert_eq!(state.turn_number(), 1);
    assert_eq!(state.priority_holder(), Seat::One);
}

/// `MyMain` keeps auto-passing across the turn boundary until it is the
/// seat's own turn and main phase.
#[test]
fn test_my_main_crosses_turn_boundary() {
    let (rules, mut state) = duel_match(42);

    // Seat one rides to the top of its next turn, seat two to its own
    // main phase; seat one then passes its turn-two windows manually.
    state
        .pass_priority(&rules, Seat::One, Some(PassTarget::Phase(phases::UNTAP)))
        .unwrap();
    state
        .pass_priority(&rules, Seat::Two, Some(PassTarget::MyMain))
        .unwrap();
    assert_eq!(state.turn_number(), 2);
    assert_eq!(state.turn_owner(), Seat::Two);

    state.pass_priority(&rules, Seat::One, None).unwrap();
    state.pass_priority(&rules, Seat::One, None).unwrap();

    assert_eq!(state.phase(), phases::MAIN);
    assert_eq!(state.priority_holder(), Seat::Two);
    // Each seat drew once, on its own turn's draw phase.
    assert_eq!(state.participant(Seat::One).hand.len(), 1);
    assert_eq!(state.participant(Seat::Two).hand.len(), 1);
}

/// A target outside the schedule is rejected before anything moves.
#[test]
fn test_target_must_be_in_schedule() {
    let (rules, mut state) = duel_match(42);

    let err = state
        .pass_priority(&rules, Seat::One, Some(PassTarget::Phase(PhaseId::new(9))))
        .unwrap_err();
    assert!(matches!(err, GameError::Validation(_)));
    assert_eq!(state.priority_holder(), Seat::One);
}

// =============================================================================
// Structural invariants
// =============================================================================

proptest! {
    /// With no stack activity, any pass sequence walks the schedule in
    /// lockstep: every two passes advance one phase, five phases roll
    /// one turn, and the phase is always one the schedule names.
    #[test]
    fn prop_passes_walk_schedule(seed in 0u64..500, passes in 1usize..40) {
        let (rules, mut state) = duel_match(seed);

        for _ in 0..passes {
            pass(&rules, &mut state);
        }

        let advances = passes / 2;
        let ring = rules.schedule().phases().len();
        prop_assert!(rules.schedule().contains(state.phase()));
        prop_assert_eq!(state.phase(), rules.schedule().phases()[advances % ring]);
        prop_assert_eq!(state.turn_number(), 1 + (advances / ring) as u32);
    }
}
