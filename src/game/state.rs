//! The per-match state machine: turn/phase/priority engine, the action
//! stack, combat tracking, and pending-selection flows.
//!
//! Every public operation is atomic validate-then-apply: a rejected
//! action mutates nothing and emits no event. Events produced by an
//! accepted action are appended to *both* participants' outboxes in
//! application order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{CardInstance, Zone};
use crate::core::{
    AccountId, AccountRef, CardId, CardUid, GameError, GameResult, MatchId, MatchRng, Seat,
    SeatMap, TriggerId,
};
use crate::events::MatchEvent;
use crate::game::combat::AttackPlan;
use crate::game::participant::{OwedTrigger, Participant};
use crate::game::phase::{PassTarget, PhaseId, PhaseSchedule};
use crate::game::selection::{CastKind, PendingCast, PendingSelection};
use crate::game::stack::{ActionStack, StackEntry, StackSource};
use crate::rules::{ResolutionOutcome, RulesEngine, TriggerSpawn};

/// Authoritative state of one match.
#[derive(Clone, Debug)]
pub struct MatchState {
    id: MatchId,
    seats: SeatMap<Participant>,
    schedule: PhaseSchedule,
    phase: PhaseId,
    turn_owner: Seat,
    priority: Seat,
    turn_number: u32,

    /// Passes since the last push/resolution. The phase advances (or
    /// the top of the stack resolves) only on the confirmatory second
    /// pass, so an empty stack cannot stall the turn structure.
    consecutive_passes: u8,

    stack: ActionStack,

    /// uid -> instance index for O(1) lookup.
    cards: FxHashMap<CardUid, CardInstance>,

    next_uid: u32,
    next_trigger_id: u32,
    ready: bool,
    rng: MatchRng,
}

impl MatchState {
    /// Create a match for two paired accounts.
    ///
    /// The match is not ready until both decks are loaded; the turn
    /// owner and priority start with `first_turn`.
    #[must_use]
    pub fn new(
        id: MatchId,
        one: AccountRef,
        two: AccountRef,
        schedule: PhaseSchedule,
        first_turn: Seat,
        seed: u64,
    ) -> Self {
        let phase = schedule.first();
        Self {
            id,
            seats: SeatMap::new(|seat| match seat {
                Seat::One => Participant::new(one.clone(), seat),
                Seat::Two => Participant::new(two.clone(), seat),
            }),
            schedule,
            phase,
            turn_owner: first_turn,
            priority: first_turn,
            turn_number: 1,
            consecutive_passes: 0,
            stack: ActionStack::new(),
            cards: FxHashMap::default(),
            next_uid: 0,
            next_trigger_id: 0,
            ready: false,
            rng: MatchRng::new(seed),
        }
    }

    // === Accessors ===

    /// Match id.
    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Whether both decks are loaded and actions are accepted.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PhaseId {
        self.phase
    }

    /// Current turn owner.
    #[must_use]
    pub fn turn_owner(&self) -> Seat {
        self.turn_owner
    }

    /// Current priority holder.
    #[must_use]
    pub fn priority_holder(&self) -> Seat {
        self.priority
    }

    /// Current turn number, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The phase schedule this match runs under.
    #[must_use]
    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// The action stack.
    #[must_use]
    pub fn stack(&self) -> &ActionStack {
        &self.stack
    }

    /// One seat's participant.
    #[must_use]
    pub fn participant(&self, seat: Seat) -> &Participant {
        &self.seats[seat]
    }

    /// Which seat an account occupies, if it is a participant.
    #[must_use]
    pub fn seat_of(&self, account: AccountId) -> Option<Seat> {
        Seat::both()
            .into_iter()
            .find(|&s| self.seats[s].account.id == account)
    }

    /// Resolve a uid to its card instance.
    pub fn card(&self, uid: CardUid) -> GameResult<&CardInstance> {
        self.cards
            .get(&uid)
            .ok_or_else(|| GameError::not_found(format!("{uid} in {}", self.id)))
    }

    // === State helpers (used by the core and by rules engines) ===

    /// Move a card to a zone, updating the index and its owner's zone
    /// lists. Returns the event describing the move without emitting
    /// it; the caller decides how the event reaches the outboxes.
    pub fn move_card(&mut self, uid: CardUid, to: Zone) -> GameResult<MatchEvent> {
        let (owner, from) = {
            let card = self.card(uid)?;
            (card.owner, card.zone)
        };

        self.seats[owner].remove_from_zone_lists(uid);
        match to {
            Zone::Deck => self.seats[owner].deck.push(uid),
            Zone::Hand => self.seats[owner].hand.push(uid),
            Zone::Field => self.seats[owner].field.push(uid),
            Zone::Graveyard => self.seats[owner].graveyard.push(uid),
            // Stack and Removed cards are tracked by the index alone.
            Zone::Stack | Zone::Removed => {}
        }
        if let Some(card) = self.cards.get_mut(&uid) {
            card.zone = to;
        }

        Ok(MatchEvent::CardMoved {
            card: uid,
            from,
            to,
        })
    }

    /// Place a card on the bottom of its owner's deck.
    pub fn move_card_to_deck_bottom(&mut self, uid: CardUid) -> GameResult<MatchEvent> {
        let event = self.move_card(uid, Zone::Deck)?;
        let owner = self.card(uid)?.owner;
        let deck = &mut self.seats[owner].deck;
        let popped = deck.pop().filter(|&c| c == uid);
        debug_assert!(popped.is_some());
        deck.insert(0, uid);
        Ok(event)
    }

    /// Change a seat's life total by a delta. Returns the event.
    pub fn change_life(&mut self, seat: Seat, delta: i64) -> MatchEvent {
        self.seats[seat].life += delta;
        MatchEvent::LifeChanged {
            seat,
            life: self.seats[seat].life,
        }
    }

    /// Draw the top card of a seat's deck into hand. Returns `None` if
    /// the deck is empty.
    pub fn draw_card(&mut self, seat: Seat) -> Option<MatchEvent> {
        let uid = *self.seats[seat].deck.last()?;
        // move_card cannot fail for an indexed uid.
        self.move_card(uid, Zone::Hand).ok()
    }

    // === Deck loading ===

    /// Load a deck list into a seat: allocate uids, shuffle, and mark
    /// the seat loaded. When both seats are loaded the match becomes
    /// ready and accepts gameplay actions.
    pub fn load_deck(&mut self, seat: Seat, cards: &[CardId]) -> GameResult<()> {
        if self.seats[seat].deck_loaded {
            return Err(GameError::validation(format!(
                "{seat} already loaded a deck"
            )));
        }

        let mut uids = Vec::with_capacity(cards.len());
        for &card_id in cards {
            let uid = CardUid::new(self.next_uid);
            self.next_uid += 1;
            self.cards.insert(uid, CardInstance::new(uid, card_id, seat));
            uids.push(uid);
        }
        self.rng.shuffle(&mut uids);

        let participant = &mut self.seats[seat];
        participant.deck = uids;
        participant.deck_loaded = true;
        self.emit(MatchEvent::DeckLoaded {
            seat,
            count: cards.len(),
        });

        if Seat::both().iter().all(|&s| self.seats[s].deck_loaded) {
            self.ready = true;
            self.emit(MatchEvent::MatchReady);
        }
        Ok(())
    }

    // === Priority protocol ===

    /// Pass priority, optionally fast-forwarding to a target phase.
    ///
    /// The second consecutive pass advances the match: with a non-empty
    /// stack exactly the top entry resolves and priority returns to the
    /// turn owner; with an empty stack the phase advances exactly once.
    /// A standing target keeps auto-passing intermediate windows (empty
    /// stack only) until the target phase is reached.
    pub fn pass_priority(
        &mut self,
        rules: &dyn RulesEngine,
        seat: Seat,
        target: Option<PassTarget>,
    ) -> GameResult<()> {
        self.require_ready()?;
        self.require_priority(seat)?;
        self.require_no_open_substates(seat)?;
        if let Some(t) = target {
            t.validate(&self.schedule)?;
        }

        self.seats[seat].pass_intent = target;

        loop {
            // The current priority holder passes.
            self.consecutive_passes += 1;

            if self.consecutive_passes >= 2 {
                self.consecutive_passes = 0;
                if !self.stack.is_empty() {
                    self.resolve_top(rules)?;
                    break;
                }
                self.advance_phase(rules);
                if self.any_owed_triggers() {
                    break;
                }
            } else {
                let from = self.priority;
                self.priority = from.other();
                self.emit(MatchEvent::PriorityPassed {
                    from,
                    to: self.priority,
                });
            }

            // Does the new holder keep auto-passing?
            let holder = self.priority;
            if self.intent_reached(holder) {
                self.seats[holder].pass_intent = None;
            }
            if !(self.stack.is_empty() && self.seats[holder].pass_intent.is_some()) {
                break;
            }
        }
        Ok(())
    }

    fn intent_reached(&self, seat: Seat) -> bool {
        match self.seats[seat].pass_intent {
            Some(PassTarget::Phase(p)) => self.phase == p,
            Some(PassTarget::MyMain) => {
                self.phase == self.schedule.main() && self.turn_owner == seat
            }
            None => false,
        }
    }

    fn advance_phase(&mut self, rules: &dyn RulesEngine) {
        match self.schedule.next(self.phase) {
            Some(next) => self.phase = next,
            None => {
                self.turn_owner = self.turn_owner.other();
                self.turn_number += 1;
                self.phase = self.schedule.first();
                // A new turn invalidates leftover attack declarations.
                self.seats[self.turn_owner].attacks.clear();
                self.seats[self.turn_owner.other()].attacks.clear();
                self.emit(MatchEvent::TurnBegan {
                    turn_owner: self.turn_owner,
                    turn_number: self.turn_number,
                });
            }
        }
        self.priority = self.turn_owner;
        self.emit(MatchEvent::PhaseEntered { phase: self.phase });

        let phase = self.phase;
        let events = rules.on_phase_begin(self, phase);
        for event in events {
            self.emit(event);
        }
    }

    fn resolve_top(&mut self, rules: &dyn RulesEngine) -> GameResult<()> {
        let entry = self
            .stack
            .pop()
            .ok_or_else(|| GameError::validation("stack is empty"))?;

        // A resolution closes any fast-forward windows.
        for seat in Seat::both() {
            self.seats[seat].pass_intent = None;
        }

        let outcome = rules.resolve_entry(self, &entry);
        self.priority = self.turn_owner;
        self.emit(MatchEvent::StackResolved { entry: entry.id });
        self.apply_outcome(outcome);
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: ResolutionOutcome) {
        for event in outcome.events {
            self.emit(event);
        }
        self.record_triggers(&outcome.triggers);
        if let Some((seat, selection)) = outcome.selection {
            let pool = selection.pool.clone();
            self.seats[seat].pending_selection = Some(selection);
            self.emit(MatchEvent::SelectionRequired { seat, pool });
        }
    }

    fn record_triggers(&mut self, spawns: &[TriggerSpawn]) {
        for seat in Seat::both() {
            let owed: Vec<OwedTrigger> = spawns
                .iter()
                .filter(|t| t.controller == seat)
                .map(|t| {
                    let id = TriggerId::new(self.next_trigger_id);
                    self.next_trigger_id += 1;
                    OwedTrigger {
                        id,
                        source: t.source,
                    }
                })
                .collect();
            if owed.is_empty() {
                continue;
            }
            let ids: Vec<TriggerId> = owed.iter().map(|t| t.id).collect();
            self.seats[seat].pending_triggers.extend(owed);
            self.emit(MatchEvent::TriggersOwed {
                seat,
                triggers: ids,
            });
        }
    }

    // === Casting ===

    /// Announce a cast from hand. On success the card enters a
    /// pending-cost/target collection sub-state; if the rules engine
    /// reports no open parameters the entry is pushed immediately.
    pub fn attempt_cast(
        &mut self,
        rules: &dyn RulesEngine,
        seat: Seat,
        card: CardUid,
    ) -> GameResult<()> {
        self.require_ready()?;
        self.require_priority(seat)?;
        self.require_no_open_substates(seat)?;
        self.require_owned(seat, card, Zone::Hand)?;

        let requirements = rules.cast_requirements(self, seat, card)?;
        self.seats[seat].pending_cast = Some(PendingCast::new(card, CastKind::Cast, requirements));
        self.emit(MatchEvent::CastAnnounced { seat, card });
        self.try_submit_pending(seat)
    }

    /// Announce an ability activation of a card in play.
    pub fn attempt_activate(
        &mut self,
        rules: &dyn RulesEngine,
        seat: Seat,
        card: CardUid,
    ) -> GameResult<()> {
        self.require_ready()?;
        self.require_priority(seat)?;
        self.require_no_open_substates(seat)?;
        self.require_owned(seat, card, Zone::Field)?;

        let requirements = rules.activation_requirements(self, seat, card)?;
        self.seats[seat].pending_cast =
            Some(PendingCast::new(card, CastKind::Activation, requirements));
        self.emit(MatchEvent::ActivationAnnounced { seat, card });
        self.try_submit_pending(seat)
    }

    /// Abort the pending cast before submission. No parameter choice is
    /// committed before the stack push, so this is a pure rollback to
    /// the pre-cast state; priority stays with the caster.
    pub fn cancel_cast(&mut self, seat: Seat) -> GameResult<()> {
        self.require_ready()?;
        if self.seats[seat].pending_cast.take().is_none() {
            return Err(GameError::validation(format!("{seat} has no pending cast")));
        }
        self.emit(MatchEvent::CastCancelled { seat });
        Ok(())
    }

    /// Choose targets for the pending cast.
    pub fn assign_targets(&mut self, seat: Seat, targets: Vec<CardUid>) -> GameResult<()> {
        self.require_ready()?;
        self.require_known_uids(&targets)?;
        let pending = self.pending_cast(seat)?;
        let req = &pending.requirements;
        if targets.len() < req.min_targets || targets.len() > req.max_targets {
            return Err(GameError::validation(format!(
                "action takes {}..={} targets, got {}",
                req.min_targets,
                req.max_targets,
                targets.len()
            )));
        }
        Self::require_choice_set(&targets, &req.legal_targets, "target")?;

        let chosen: SmallVec<[CardUid; 3]> = targets.iter().copied().collect();
        if let Some(pending) = self.seats[seat].pending_cast.as_mut() {
            pending.targets = Some(chosen);
        }
        self.emit(MatchEvent::TargetsChosen { seat, targets });
        self.try_submit_pending(seat)
    }

    /// Choose the cost payment for the pending cast.
    pub fn select_costs(&mut self, seat: Seat, cards: Vec<CardUid>) -> GameResult<()> {
        self.require_ready()?;
        self.require_known_uids(&cards)?;
        let pending = self.pending_cast(seat)?;
        let req = &pending.requirements;
        if cards.len() != req.cost_count {
            return Err(GameError::validation(format!(
                "cost requires exactly {} cards, got {}",
                req.cost_count,
                cards.len()
            )));
        }
        Self::require_choice_set(&cards, &req.cost_choices, "cost")?;

        let chosen: SmallVec<[CardUid; 3]> = cards.iter().copied().collect();
        if let Some(pending) = self.seats[seat].pending_cast.as_mut() {
            pending.cost = Some(chosen);
        }
        self.emit(MatchEvent::CostsChosen { seat, cards });
        self.try_submit_pending(seat)
    }

    /// Choose tributes for the pending cast.
    pub fn select_tributes(&mut self, seat: Seat, cards: Vec<CardUid>) -> GameResult<()> {
        self.require_ready()?;
        self.require_known_uids(&cards)?;
        let pending = self.pending_cast(seat)?;
        let req = &pending.requirements;
        if cards.len() != req.tribute_count {
            return Err(GameError::validation(format!(
                "tribute requires exactly {} cards, got {}",
                req.tribute_count,
                cards.len()
            )));
        }
        Self::require_choice_set(&cards, &req.tribute_choices, "tribute")?;

        let chosen: SmallVec<[CardUid; 3]> = cards.iter().copied().collect();
        if let Some(pending) = self.seats[seat].pending_cast.as_mut() {
            pending.tributes = Some(chosen);
        }
        self.emit(MatchEvent::TributesChosen { seat, cards });
        self.try_submit_pending(seat)
    }

    /// Choose the X value for the pending cast.
    pub fn set_x(&mut self, seat: Seat, value: i64) -> GameResult<()> {
        self.require_ready()?;
        let pending = self.pending_cast(seat)?;
        let (lo, hi) = pending
            .requirements
            .x_bounds
            .ok_or_else(|| GameError::validation("action does not take an X"))?;
        if value < lo || value > hi {
            return Err(GameError::validation(format!(
                "X must be in {lo}..={hi}, got {value}"
            )));
        }

        if let Some(pending) = self.seats[seat].pending_cast.as_mut() {
            pending.x = Some(value);
        }
        self.emit(MatchEvent::XChosen { seat, value });
        self.try_submit_pending(seat)
    }

    /// Choose the amount value for the pending cast.
    pub fn set_amount(&mut self, seat: Seat, value: i64) -> GameResult<()> {
        self.require_ready()?;
        let pending = self.pending_cast(seat)?;
        let (lo, hi) = pending
            .requirements
            .amount_bounds
            .ok_or_else(|| GameError::validation("action does not take an amount"))?;
        if value < lo || value > hi {
            return Err(GameError::validation(format!(
                "amount must be in {lo}..={hi}, got {value}"
            )));
        }

        if let Some(pending) = self.seats[seat].pending_cast.as_mut() {
            pending.amount = Some(value);
        }
        self.emit(MatchEvent::AmountChosen { seat, value });
        self.try_submit_pending(seat)
    }

    /// If every required parameter is satisfied, push the pending cast
    /// onto the stack and open the response window.
    fn try_submit_pending(&mut self, seat: Seat) -> GameResult<()> {
        let satisfied = self.seats[seat]
            .pending_cast
            .as_ref()
            .is_some_and(PendingCast::is_satisfied);
        if !satisfied {
            return Ok(());
        }

        let pending = self.seats[seat]
            .pending_cast
            .take()
            .expect("pending cast checked above");

        let source = match pending.kind {
            CastKind::Cast => StackSource::Cast { card: pending.card },
            CastKind::Activation => StackSource::Activation { card: pending.card },
        };
        let entry = StackEntry {
            id: self.stack.next_id(),
            controller: seat,
            source,
            targets: pending.targets.unwrap_or_default(),
            cost: pending.cost.unwrap_or_default(),
            tributes: pending.tributes.unwrap_or_default(),
            x: pending.x,
            amount: pending.amount,
        };
        let entry_id = entry.id;

        if pending.kind == CastKind::Cast {
            let event = self.move_card(pending.card, Zone::Stack)?;
            self.emit(event);
        }
        self.stack.push(entry);
        self.open_response_window(seat);
        self.emit(MatchEvent::StackPushed {
            entry: entry_id,
            controller: seat,
            card: Some(pending.card),
        });
        Ok(())
    }

    /// A push resets the pass count, clears fast-forward intents, and
    /// hands priority to the pusher's opponent for responses.
    fn open_response_window(&mut self, pusher: Seat) {
        self.consecutive_passes = 0;
        for seat in Seat::both() {
            self.seats[seat].pass_intent = None;
        }
        self.priority = pusher.other();
    }

    // === Triggers ===

    /// Supply a total order for this seat's owed triggers. The id list
    /// must be exactly the owed set; entries are pushed in the given
    /// order so the first id resolves last.
    pub fn add_ordered_triggers(&mut self, seat: Seat, order: Vec<TriggerId>) -> GameResult<()> {
        self.require_ready()?;
        let owed = &self.seats[seat].pending_triggers;
        if owed.is_empty() {
            return Err(GameError::validation(format!(
                "{seat} has no pending triggers"
            )));
        }
        if order.len() != owed.len()
            || !owed.iter().all(|t| order.contains(&t.id))
            || order
                .iter()
                .enumerate()
                .any(|(i, id)| order[..i].contains(id))
        {
            return Err(GameError::validation(
                "trigger order must list each pending trigger exactly once",
            ));
        }

        let owed: Vec<OwedTrigger> = std::mem::take(&mut self.seats[seat].pending_triggers);
        for &id in &order {
            let source = owed
                .iter()
                .find(|t| t.id == id)
                .expect("validated against owed set")
                .source;
            let entry = StackEntry {
                id: self.stack.next_id(),
                controller: seat,
                source: StackSource::Trigger { id, source },
                targets: SmallVec::new(),
                cost: SmallVec::new(),
                tributes: SmallVec::new(),
                x: None,
                amount: None,
            };
            let entry_id = entry.id;
            self.stack.push(entry);
            self.emit(MatchEvent::StackPushed {
                entry: entry_id,
                controller: seat,
                card: Some(source),
            });
        }
        self.open_response_window(seat);
        self.emit(MatchEvent::TriggersOrdered { seat, order });
        Ok(())
    }

    // === Selections ===

    /// Resolve a pending multi-destination selection with positional
    /// card groups.
    pub fn send_cards_to_destinations(
        &mut self,
        seat: Seat,
        groups: Vec<Vec<CardUid>>,
    ) -> GameResult<()> {
        self.require_ready()?;
        let selection = self.seats[seat]
            .pending_selection
            .as_ref()
            .ok_or_else(|| GameError::validation(format!("{seat} has no pending selection")))?
            .clone();
        selection.validate_groups(&groups)?;

        for (group, dest) in groups.iter().zip(&selection.destinations) {
            match dest.zone {
                // Bottom-of-deck groups keep their listed order, first
                // listed lowest.
                Zone::Deck => {
                    for &uid in group.iter().rev() {
                        let event = self.move_card_to_deck_bottom(uid)?;
                        self.emit(event);
                    }
                }
                zone => {
                    for &uid in group {
                        let event = self.move_card(uid, zone)?;
                        self.emit(event);
                    }
                }
            }
        }
        self.seats[seat].pending_selection = None;
        self.emit(MatchEvent::SelectionResolved { seat });
        Ok(())
    }

    // === Combat ===

    /// Legal defenders for one attacker (query; no mutation).
    pub fn attackable_defenders(
        &self,
        rules: &dyn RulesEngine,
        seat: Seat,
        attacker: CardUid,
    ) -> GameResult<Vec<CardUid>> {
        self.require_ready()?;
        self.require_owned(seat, attacker, Zone::Field)?;
        rules.attackable_defenders(self, seat, attacker)
    }

    /// Assign an attacker to a defender.
    pub fn assign_attack(
        &mut self,
        rules: &dyn RulesEngine,
        seat: Seat,
        attacker: CardUid,
        defender: CardUid,
    ) -> GameResult<()> {
        self.require_combat_actor(rules, seat)?;
        self.require_owned(seat, attacker, Zone::Field)?;
        self.card(defender)?;
        let legal = rules.attackable_defenders(self, seat, attacker)?;
        if !legal.contains(&defender) {
            return Err(GameError::validation(format!(
                "{attacker} cannot attack {defender}"
            )));
        }

        self.seats[seat].attacks.assign(attacker, defender);
        self.emit(MatchEvent::AttackAssigned { attacker, defender });
        Ok(())
    }

    /// Remove an attacker's assignment.
    pub fn unassign_attack(
        &mut self,
        rules: &dyn RulesEngine,
        seat: Seat,
        attacker: CardUid,
    ) -> GameResult<()> {
        self.require_combat_actor(rules, seat)?;
        self.seats[seat].attacks.unassign(attacker)?;
        self.emit(MatchEvent::AttackUnassigned { attacker });
        Ok(())
    }

    /// Attach an additional attacker to an existing assignment.
    pub fn add_secondary_attacker(
        &mut self,
        rules: &dyn RulesEngine,
        seat: Seat,
        attacker: CardUid,
        primary: CardUid,
    ) -> GameResult<()> {
        self.require_combat_actor(rules, seat)?;
        self.require_owned(seat, attacker, Zone::Field)?;
        self.seats[seat].attacks.add_secondary(attacker, primary)?;
        self.emit(MatchEvent::SecondaryAttackerAdded { attacker, primary });
        Ok(())
    }

    /// Lock in the declared attacks and resolve combat through the
    /// rules engine.
    pub fn submit_attack(&mut self, rules: &dyn RulesEngine, seat: Seat) -> GameResult<()> {
        self.require_combat_actor(rules, seat)?;

        self.emit(MatchEvent::AttackSubmitted { seat });
        let outcome = rules.resolve_combat(self, seat);
        self.apply_outcome(outcome);
        self.seats[seat].attacks.clear();
        Ok(())
    }

    // === Event emission ===

    /// Append an event to both participants' outboxes.
    fn emit(&mut self, event: MatchEvent) {
        for seat in Seat::both() {
            self.seats[seat].outbox.push(event.clone());
        }
    }

    /// Drain one seat's outbox (the snapshot fetch path).
    pub fn drain_outbox(&mut self, seat: Seat) -> Vec<MatchEvent> {
        self.seats[seat].outbox.drain()
    }

    // === Validation helpers ===

    fn require_ready(&self) -> GameResult<()> {
        if !self.ready {
            return Err(GameError::validation(format!(
                "{} is not ready; both decks must be loaded",
                self.id
            )));
        }
        Ok(())
    }

    fn require_priority(&self, seat: Seat) -> GameResult<()> {
        if self.priority != seat {
            return Err(GameError::validation(format!(
                "{seat} does not hold priority"
            )));
        }
        Ok(())
    }

    /// Pending casts, selections, and owed triggers must be settled
    /// before normal priority actions continue.
    fn require_no_open_substates(&self, seat: Seat) -> GameResult<()> {
        if self.seats[seat].pending_cast.is_some() {
            return Err(GameError::validation(format!(
                "{seat} has a cast awaiting parameters"
            )));
        }
        if self.seats[seat].pending_selection.is_some() {
            return Err(GameError::validation(format!(
                "{seat} has a selection awaiting submission"
            )));
        }
        if self.any_owed_triggers() {
            return Err(GameError::validation(
                "pending triggers must be ordered first",
            ));
        }
        Ok(())
    }

    fn any_owed_triggers(&self) -> bool {
        Seat::both()
            .iter()
            .any(|&s| !self.seats[s].pending_triggers.is_empty())
    }

    fn require_owned(&self, seat: Seat, uid: CardUid, zone: Zone) -> GameResult<()> {
        let card = self.card(uid)?;
        if card.owner != seat {
            return Err(GameError::validation(format!("{uid} is not owned by {seat}")));
        }
        if card.zone != zone {
            return Err(GameError::validation(format!(
                "{uid} is in {}, expected {zone}",
                card.zone
            )));
        }
        Ok(())
    }

    fn require_combat_actor(&self, rules: &dyn RulesEngine, seat: Seat) -> GameResult<()> {
        self.require_ready()?;
        if self.phase != self.schedule.combat() {
            return Err(GameError::validation(
                "combat actions are only legal during the combat phase",
            ));
        }
        if !rules.can_declare_attacks(self, seat) {
            return Err(GameError::validation(format!(
                "{seat} may not declare attacks now"
            )));
        }
        Ok(())
    }

    fn require_known_uids(&self, uids: &[CardUid]) -> GameResult<()> {
        for &uid in uids {
            self.card(uid)?;
        }
        Ok(())
    }

    fn pending_cast(&self, seat: Seat) -> GameResult<&PendingCast> {
        self.seats[seat]
            .pending_cast
            .as_ref()
            .ok_or_else(|| GameError::validation(format!("{seat} has no pending cast")))
    }

    fn require_choice_set(chosen: &[CardUid], legal: &[CardUid], what: &str) -> GameResult<()> {
        for (i, &uid) in chosen.iter().enumerate() {
            if !legal.contains(&uid) {
                return Err(GameError::validation(format!("{uid} is not a legal {what}")));
            }
            if chosen[..i].contains(&uid) {
                return Err(GameError::validation(format!("{uid} chosen twice as {what}")));
            }
        }
        Ok(())
    }

    /// A seat's in-progress attack declaration.
    #[must_use]
    pub fn attack_plan(&self, seat: Seat) -> &AttackPlan {
        &self.seats[seat].attacks
    }
}
