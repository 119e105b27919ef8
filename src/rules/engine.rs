//! Rules engine trait: the opaque boundary to card-effect semantics.
//!
//! The server core owns the match lifecycle, the priority protocol, and
//! the stack; it knows nothing about what individual cards do. Games
//! implement `RulesEngine` to answer legality questions (can this be
//! cast, who can this attack) and to carry out resolution, reporting
//! every state change back as events the core fans out to both
//! participants' outboxes.

use serde::{Deserialize, Serialize};

use crate::core::{CardUid, GameResult, Seat};
use crate::events::MatchEvent;
use crate::game::{MatchState, PendingSelection, PhaseId, PhaseSchedule, StackEntry};

/// Open parameters a pending cast/activation must collect before it can
/// be pushed onto the stack, as reported by the rules engine at
/// announce time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRequirements {
    /// Uids that may be chosen as targets.
    pub legal_targets: Vec<CardUid>,

    /// Minimum number of targets.
    pub min_targets: usize,

    /// Maximum number of targets. Zero means the action is untargeted.
    pub max_targets: usize,

    /// Uids that may be chosen as cost payment.
    pub cost_choices: Vec<CardUid>,

    /// Exact number of cost cards required. Zero means no card cost.
    pub cost_count: usize,

    /// Uids that may be chosen as tributes.
    pub tribute_choices: Vec<CardUid>,

    /// Exact number of tributes required. Zero means no tribute.
    pub tribute_count: usize,

    /// Inclusive bounds for a required X, if the action has one.
    pub x_bounds: Option<(i64, i64)>,

    /// Inclusive bounds for a required amount, if the action has one.
    pub amount_bounds: Option<(i64, i64)>,
}

impl CastRequirements {
    /// Requirements for an action with no open parameters.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// A triggered ability spawned during resolution, owed to a seat and
/// awaiting that seat's ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpawn {
    /// Who controls (and must order) the trigger.
    pub controller: Seat,

    /// The card whose ability triggered.
    pub source: CardUid,
}

/// Everything a resolution step produced, for the core to package into
/// outboxes and pending sub-states.
#[derive(Clone, Debug, Default)]
pub struct ResolutionOutcome {
    /// State changes, in application order.
    pub events: Vec<MatchEvent>,

    /// Triggered abilities owed after this resolution.
    pub triggers: Vec<TriggerSpawn>,

    /// A multi-destination selection now awaited from a seat.
    pub selection: Option<(Seat, PendingSelection)>,
}

impl ResolutionOutcome {
    /// An outcome carrying only events.
    #[must_use]
    pub fn with_events(events: Vec<MatchEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }
}

/// The opaque rules engine a match delegates legality and resolution to.
///
/// Implementations must be deterministic: the core replays no actions,
/// so a resolution's outcome is applied exactly once.
pub trait RulesEngine: Send + Sync {
    /// The phase ring for matches run under this engine.
    fn schedule(&self) -> &PhaseSchedule;

    /// Legality check and open-parameter report for casting a card from
    /// hand. Errors reject the cast attempt with no state change.
    fn cast_requirements(
        &self,
        state: &MatchState,
        seat: Seat,
        card: CardUid,
    ) -> GameResult<CastRequirements>;

    /// Legality check and open-parameter report for activating an
    /// ability of a card in play.
    fn activation_requirements(
        &self,
        state: &MatchState,
        seat: Seat,
        card: CardUid,
    ) -> GameResult<CastRequirements>;

    /// Hook invoked after the match enters a phase (untap, draw, ...).
    fn on_phase_begin(&self, _state: &mut MatchState, _phase: PhaseId) -> Vec<MatchEvent> {
        Vec::new()
    }

    /// Resolve one popped stack entry, mutating the match state through
    /// its helpers and reporting what happened.
    fn resolve_entry(&self, state: &mut MatchState, entry: &StackEntry) -> ResolutionOutcome;

    /// Whether a seat may declare or retract attacks right now. The
    /// default grants only the turn owner; engines with effects that
    /// open combat to the defender override this.
    fn can_declare_attacks(&self, state: &MatchState, seat: Seat) -> bool {
        state.turn_owner() == seat
    }

    /// Legal defenders for one attacker, combat-phase rules applied.
    fn attackable_defenders(
        &self,
        state: &MatchState,
        seat: Seat,
        attacker: CardUid,
    ) -> GameResult<Vec<CardUid>>;

    /// Resolve the turn owner's locked-in attack declaration.
    fn resolve_combat(&self, state: &mut MatchState, seat: Seat) -> ResolutionOutcome;
}
