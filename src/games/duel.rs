//! A small concrete rules engine for exercising the match core.
//!
//! `DuelRules` is not a real game: it implements just enough card
//! semantics (creatures with power, targeted removal, tributes, X
//! costs, on-resolve triggers, a scry-style selection, power-based
//! combat) to drive every protocol path through the state machine. The
//! integration tests run on it; production deployments supply their own
//! `RulesEngine`.

use rustc_hash::FxHashMap;

use crate::cards::Zone;
use crate::core::{CardId, CardUid, GameError, GameResult, Seat};
use crate::events::MatchEvent;
use crate::game::{
    DestinationSpec, MatchState, PendingSelection, PhaseId, PhaseSchedule, StackEntry, StackSource,
};
use crate::rules::{CastRequirements, ResolutionOutcome, RulesEngine, TriggerSpawn};

/// The duel phase ring.
pub mod phases {
    use crate::game::PhaseId;

    pub const UNTAP: PhaseId = PhaseId::new(0);
    pub const DRAW: PhaseId = PhaseId::new(1);
    pub const MAIN: PhaseId = PhaseId::new(2);
    pub const COMBAT: PhaseId = PhaseId::new(3);
    pub const END: PhaseId = PhaseId::new(4);
}

/// Static description of one card definition.
#[derive(Clone, Debug, Default)]
pub struct CardSpec {
    /// Combat power.
    pub power: i64,

    /// Targets required when cast (destroyed on resolution).
    pub min_targets: usize,
    pub max_targets: usize,

    /// Field cards that must be tributed to cast this.
    pub tribute_count: usize,

    /// X bounds; the opponent loses X life on resolution.
    pub x_bounds: Option<(i64, i64)>,

    /// Whether resolving this card owes its controller a trigger
    /// (the trigger draws a card when it resolves).
    pub triggers_on_resolve: bool,

    /// Look at this many top deck cards on resolution: up to one goes
    /// to hand, the rest to the bottom of the deck in chosen order.
    pub scry: usize,
}

impl CardSpec {
    /// A plain creature with the given power.
    #[must_use]
    pub fn creature(power: i64) -> Self {
        Self {
            power,
            ..Self::default()
        }
    }

    /// Require targets on cast.
    #[must_use]
    pub fn with_targets(mut self, min: usize, max: usize) -> Self {
        self.min_targets = min;
        self.max_targets = max;
        self
    }

    /// Require tributes on cast.
    #[must_use]
    pub fn with_tributes(mut self, count: usize) -> Self {
        self.tribute_count = count;
        self
    }

    /// Require an X on cast.
    #[must_use]
    pub fn with_x(mut self, lo: i64, hi: i64) -> Self {
        self.x_bounds = Some((lo, hi));
        self
    }

    /// Owe the controller a trigger on resolution.
    #[must_use]
    pub fn with_trigger(mut self) -> Self {
        self.triggers_on_resolve = true;
        self
    }

    /// Scry on resolution.
    #[must_use]
    pub fn with_scry(mut self, count: usize) -> Self {
        self.scry = count;
        self
    }
}

/// Reference rules engine over a static card catalog.
pub struct DuelRules {
    schedule: PhaseSchedule,
    catalog: FxHashMap<CardId, CardSpec>,
}

impl DuelRules {
    /// Create an engine with an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schedule: PhaseSchedule::new(
                vec![
                    phases::UNTAP,
                    phases::DRAW,
                    phases::MAIN,
                    phases::COMBAT,
                    phases::END,
                ],
                phases::MAIN,
                phases::COMBAT,
            ),
            catalog: FxHashMap::default(),
        }
    }

    /// Register a card definition.
    pub fn define(&mut self, id: CardId, spec: CardSpec) -> &mut Self {
        self.catalog.insert(id, spec);
        self
    }

    fn spec_for(&self, state: &MatchState, uid: CardUid) -> GameResult<&CardSpec> {
        let card_id = state.card(uid)?.card_id;
        self.catalog.get(&card_id).ok_or_else(|| {
            GameError::validation(format!("no card definition for {uid}"))
        })
    }

    fn power_of(&self, state: &MatchState, uid: CardUid) -> i64 {
        self.spec_for(state, uid).map(|s| s.power).unwrap_or(0)
    }
}

impl Default for DuelRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for DuelRules {
    fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    fn cast_requirements(
        &self,
        state: &MatchState,
        seat: Seat,
        card: CardUid,
    ) -> GameResult<CastRequirements> {
        let spec = self.spec_for(state, card)?;

        let own_field = state.participant(seat).field.clone();
        if own_field.len() < spec.tribute_count {
            return Err(GameError::validation(format!(
                "{card} needs {} tributes, only {} available",
                spec.tribute_count,
                own_field.len()
            )));
        }

        let mut req = CastRequirements::none();
        if spec.max_targets > 0 {
            req.legal_targets = state.participant(seat.other()).field.clone();
            req.min_targets = spec.min_targets;
            req.max_targets = spec.max_targets;
            if req.legal_targets.len() < spec.min_targets {
                return Err(GameError::validation(format!(
                    "{card} needs {} targets, none legal",
                    spec.min_targets
                )));
            }
        }
        if spec.tribute_count > 0 {
            req.tribute_choices = own_field;
            req.tribute_count = spec.tribute_count;
        }
        req.x_bounds = spec.x_bounds;
        Ok(req)
    }

    fn activation_requirements(
        &self,
        state: &MatchState,
        _seat: Seat,
        card: CardUid,
    ) -> GameResult<CastRequirements> {
        self.spec_for(state, card)?;
        Ok(CastRequirements::none())
    }

    fn on_phase_begin(&self, state: &mut MatchState, phase: PhaseId) -> Vec<MatchEvent> {
        if phase == phases::DRAW {
            let turn_owner = state.turn_owner();
            return state.draw_card(turn_owner).into_iter().collect();
        }
        Vec::new()
    }

    fn resolve_entry(&self, state: &mut MatchState, entry: &StackEntry) -> ResolutionOutcome {
        let mut outcome = ResolutionOutcome::default();
        let controller = entry.controller;

        match entry.source {
            StackSource::Cast { card } => {
                for &tribute in &entry.tributes {
                    if let Ok(event) = state.move_card(tribute, Zone::Graveyard) {
                        outcome.events.push(event);
                    }
                }
                for &target in &entry.targets {
                    if let Ok(event) = state.move_card(target, Zone::Graveyard) {
                        outcome.events.push(event);
                    }
                }
                if let Ok(event) = state.move_card(card, Zone::Field) {
                    outcome.events.push(event);
                }
                if let Some(x) = entry.x {
                    outcome.events.push(state.change_life(controller.other(), -x));
                }

                let spec = self.spec_for(state, card).cloned().unwrap_or_default();
                if spec.triggers_on_resolve {
                    outcome.triggers.push(TriggerSpawn {
                        controller,
                        source: card,
                    });
                }
                if spec.scry > 0 {
                    let deck = &state.participant(controller).deck;
                    let count = spec.scry.min(deck.len());
                    if count > 0 {
                        let pool: Vec<CardUid> =
                            deck[deck.len() - count..].iter().rev().copied().collect();
                        outcome.selection = Some((
                            controller,
                            PendingSelection {
                                pool,
                                destinations: vec![
                                    DestinationSpec {
                                        zone: Zone::Hand,
                                        min: 0,
                                        max: 1,
                                    },
                                    DestinationSpec {
                                        zone: Zone::Deck,
                                        min: count - 1,
                                        max: count,
                                    },
                                ],
                            },
                        ));
                    }
                }
            }
            StackSource::Activation { .. } => {
                // Simple activated ability: the opponent loses one life.
                outcome.events.push(state.change_life(controller.other(), -1));
            }
            StackSource::Trigger { .. } => {
                if let Some(event) = state.draw_card(controller) {
                    outcome.events.push(event);
                }
            }
        }
        outcome
    }

    fn attackable_defenders(
        &self,
        state: &MatchState,
        seat: Seat,
        attacker: CardUid,
    ) -> GameResult<Vec<CardUid>> {
        self.spec_for(state, attacker)?;
        Ok(state.participant(seat.other()).field.clone())
    }

    fn resolve_combat(&self, state: &mut MatchState, seat: Seat) -> ResolutionOutcome {
        let mut outcome = ResolutionOutcome::default();

        let assignments: Vec<(CardUid, CardUid, Vec<CardUid>)> = state
            .attack_plan(seat)
            .iter()
            .map(|(attacker, a)| (attacker, a.defender, a.secondary.to_vec()))
            .collect();

        for (attacker, defender, secondary) in assignments {
            let mut attack_power = self.power_of(state, attacker);
            for &extra in &secondary {
                attack_power += self.power_of(state, extra);
            }
            let defense_power = self.power_of(state, defender);

            if attack_power >= defense_power {
                if let Ok(event) = state.move_card(defender, Zone::Graveyard) {
                    outcome.events.push(event);
                }
            }
            if defense_power >= attack_power {
                if let Ok(event) = state.move_card(attacker, Zone::Graveyard) {
                    outcome.events.push(event);
                }
            }
        }
        outcome
    }
}
