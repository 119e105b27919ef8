//! The per-match state machine: phases, priority, the action stack,
//! combat assignment, and pending selections.

mod combat;
mod participant;
mod phase;
mod selection;
mod snapshot;
mod stack;
mod state;

pub use combat::{AttackAssignment, AttackPlan};
pub use participant::{OwedTrigger, Participant, DEFAULT_LIFE};
pub use phase::{PassTarget, PhaseId, PhaseSchedule};
pub use selection::{CastKind, DestinationSpec, PendingCast, PendingSelection};
pub use snapshot::{CardView, MatchSnapshot, ParticipantView};
pub use stack::{ActionStack, StackEntry, StackEntryId, StackSource};
pub use state::MatchState;
