//! Phases and priority-pass targets.
//!
//! The exact phase enumeration is a parameter of the rules engine, not
//! this core: a match is constructed with a `PhaseSchedule` and the
//! engine only walks it in order, rolling the turn when it wraps.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameResult};

/// Identifier for a game phase, opaque to the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u8);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw phase value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Phase({})", self.0)
    }
}

/// The ordered phase ring for one game, supplied by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    phases: Vec<PhaseId>,

    /// The phase the `PassTarget::MyMain` sentinel fast-forwards to.
    main: PhaseId,

    /// The phase during which combat declarations are legal.
    combat: PhaseId,
}

impl PhaseSchedule {
    /// Create a schedule from an ordered phase list plus its main and
    /// combat phases.
    ///
    /// Panics if the list is empty or a marker is not in the list; a
    /// schedule is engine configuration, so a bad one is a programming
    /// error, not a runtime condition.
    #[must_use]
    pub fn new(phases: Vec<PhaseId>, main: PhaseId, combat: PhaseId) -> Self {
        assert!(!phases.is_empty(), "phase schedule must be non-empty");
        assert!(
            phases.contains(&main),
            "main phase must appear in the schedule"
        );
        assert!(
            phases.contains(&combat),
            "combat phase must appear in the schedule"
        );
        Self {
            phases,
            main,
            combat,
        }
    }

    /// The first phase of every turn.
    #[must_use]
    pub fn first(&self) -> PhaseId {
        self.phases[0]
    }

    /// The main phase.
    #[must_use]
    pub fn main(&self) -> PhaseId {
        self.main
    }

    /// The combat phase.
    #[must_use]
    pub fn combat(&self) -> PhaseId {
        self.combat
    }

    /// All phases in turn order.
    #[must_use]
    pub fn phases(&self) -> &[PhaseId] {
        &self.phases
    }

    /// Whether a phase exists in this schedule.
    #[must_use]
    pub fn contains(&self, phase: PhaseId) -> bool {
        self.phases.contains(&phase)
    }

    /// The phase after `current`. Returns `None` when the turn ends
    /// (caller rolls the turn and re-enters at `first()`).
    #[must_use]
    pub fn next(&self, current: PhaseId) -> Option<PhaseId> {
        let pos = self.phases.iter().position(|&p| p == current)?;
        self.phases.get(pos + 1).copied()
    }
}

/// Fast-forward target for a priority pass.
///
/// A plain pass stops at the very next priority window. A target asks
/// the engine to keep auto-passing intermediate windows (empty stack
/// only) until the target is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassTarget {
    /// Pass until the named phase is reached.
    Phase(PhaseId),

    /// Reserved sentinel: pass until it is this seat's own turn and the
    /// main phase again.
    MyMain,
}

impl PassTarget {
    /// Validate the target against a schedule.
    pub fn validate(self, schedule: &PhaseSchedule) -> GameResult<()> {
        match self {
            PassTarget::Phase(phase) if !schedule.contains(phase) => Err(GameError::validation(
                format!("{phase} is not in the phase schedule"),
            )),
            _ => Ok(()),
        }
    }
}
