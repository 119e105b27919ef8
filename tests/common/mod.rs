//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use std::sync::Arc;

use ccg_server::cards::Zone;
use ccg_server::core::{AccountId, AccountRef, CardId, CardUid, DeckId, GameResult, MatchId, Seat};
use ccg_server::game::MatchState;
use ccg_server::games::duel::{CardSpec, DuelRules};
use ccg_server::rules::RulesEngine;
use ccg_server::server::{DeckSource, EnqueueOutcome, MatchServer, ServerConfig};

// Card definitions used by every suite.
pub const CREATURE: CardId = CardId::new(1); // power 2
pub const BIG: CardId = CardId::new(2); // power 3
pub const REMOVAL: CardId = CardId::new(3); // destroys one enemy field card
pub const BEAST: CardId = CardId::new(4); // power 5, costs one tribute
pub const BURN: CardId = CardId::new(5); // X in 1..=5, opponent loses X life
pub const SAGE: CardId = CardId::new(6); // power 1, owes a draw trigger on resolve
pub const SEER: CardId = CardId::new(7); // power 1, scry 3 on resolve

/// Rules engine with every test card defined.
pub fn rules() -> DuelRules {
    let mut rules = DuelRules::new();
    rules.define(CREATURE, CardSpec::creature(2));
    rules.define(BIG, CardSpec::creature(3));
    rules.define(REMOVAL, CardSpec::default().with_targets(1, 1));
    rules.define(BEAST, CardSpec::creature(5).with_tributes(1));
    rules.define(BURN, CardSpec::default().with_x(1, 5));
    rules.define(SAGE, CardSpec::creature(1).with_trigger());
    rules.define(SEER, CardSpec::creature(1).with_scry(3));
    rules
}

/// A deck list containing several copies of every test card.
pub fn sample_deck() -> Vec<CardId> {
    let mut deck = Vec::new();
    for card in [CREATURE, BIG, REMOVAL, BEAST, BURN, SAGE, SEER] {
        for _ in 0..3 {
            deck.push(card);
        }
    }
    deck
}

/// Deck storage stub: every account owns the same fixed list.
pub struct FixedDecks(pub Vec<CardId>);

impl DeckSource for FixedDecks {
    fn deck(&self, _account: AccountId, _deck: DeckId) -> GameResult<Vec<CardId>> {
        Ok(self.0.clone())
    }
}

/// A match server over [`rules`] and a fixed deck list.
pub fn server(deck: Vec<CardId>) -> MatchServer {
    MatchServer::new(
        Arc::new(rules()),
        Arc::new(FixedDecks(deck)),
        ServerConfig::default(),
    )
}

pub fn alice() -> AccountRef {
    AccountRef::new(AccountId::new(1), "alice")
}

pub fn bob() -> AccountRef {
    AccountRef::new(AccountId::new(2), "bob")
}

/// Run the full rendezvous: alice waits, bob pairs, alice claims.
/// Returns the server plus the created match id; the match is ready.
pub fn paired_server() -> (MatchServer, MatchId) {
    let server = server(sample_deck());

    let outcome = server.enqueue(alice(), DeckId::new(10)).unwrap();
    assert!(matches!(outcome, EnqueueOutcome::Pending));

    let EnqueueOutcome::Matched(snap) = server.enqueue(bob(), DeckId::new(11)).unwrap() else {
        panic!("second arrival must be matched synchronously");
    };
    let id = snap.id;

    let EnqueueOutcome::Matched(_) = server.enqueue(alice(), DeckId::new(10)).unwrap() else {
        panic!("waiting account must claim the pairing on repoll");
    };
    (server, id)
}

/// A ready two-seat match over [`sample_deck`], seat one to act first.
pub fn duel_match(seed: u64) -> (DuelRules, MatchState) {
    let rules = rules();
    let mut state = MatchState::new(
        MatchId::new(1),
        alice(),
        bob(),
        rules.schedule().clone(),
        Seat::One,
        seed,
    );
    let deck = sample_deck();
    state.load_deck(Seat::One, &deck).unwrap();
    state.load_deck(Seat::Two, &deck).unwrap();
    (rules, state)
}

/// Pull the first copy of a definition out of a seat's deck into a
/// zone, bypassing the normal draw/cast paths. Setup only.
pub fn fetch(state: &mut MatchState, seat: Seat, card: CardId, zone: Zone) -> CardUid {
    let uid = state
        .participant(seat)
        .deck
        .iter()
        .copied()
        .find(|&uid| state.card(uid).map(|c| c.card_id) == Ok(card))
        .expect("definition present in deck");
    state.move_card(uid, zone).unwrap();
    uid
}

/// One plain pass by whoever holds priority.
pub fn pass(rules: &dyn RulesEngine, state: &mut MatchState) {
    let holder = state.priority_holder();
    state.pass_priority(rules, holder, None).unwrap();
}
