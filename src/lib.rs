//! # ccg-server
//!
//! Authoritative server core for a two-player, turn-based card game.
//!
//! The server pairs waiting players into matches, holds the only
//! authoritative copy of game state, and serializes every
//! state-mutating action. Clients never compute rules: they submit
//! intents (cast, pass priority, select targets, order triggers,
//! assign attacks) and poll for the resulting state delta.
//!
//! ## Architecture
//!
//! - **Matchmaking rendezvous**: a two-slot protocol pairing exactly
//!   two queuing accounts into one match, with no double-booking under
//!   concurrent polling.
//! - **Match registry**: monotonic match ids mapped to live matches;
//!   each match has its own lock, so unrelated matches never block
//!   each other.
//! - **Match state machine**: the turn/phase/priority engine, the LIFO
//!   action stack, combat assignment, and pending-selection flows.
//!   Card-effect semantics live behind the [`rules::RulesEngine`]
//!   trait.
//! - **Event outbox**: per-participant append-only event queues,
//!   drained on state fetch - the delivery mechanism for polling
//!   clients.
//! - **Action gateway**: [`server::MatchServer`], the dependency-
//!   injected service object validating membership and executing one
//!   action at a time under the match lock.
//!
//! ## Modules
//!
//! - `core`: identifiers, seats, errors, RNG
//! - `cards`: card instances and zones
//! - `events`: match events and the outbox
//! - `game`: the per-match state machine
//! - `rules`: the opaque rules-engine boundary
//! - `games`: a reference rules implementation for tests
//! - `server`: registry, rendezvous, gateway

pub mod cards;
pub mod core;
pub mod events;
pub mod game;
pub mod games;
pub mod rules;
pub mod server;

// Re-export commonly used types
pub use crate::core::{
    AccountId, AccountRef, CardId, CardUid, DeckId, GameError, GameResult, MatchId, MatchRng,
    Seat, SeatMap, TriggerId,
};

pub use crate::cards::{CardInstance, Zone};

pub use crate::events::{MatchEvent, Outbox};

pub use crate::game::{
    ActionStack, AttackPlan, CardView, MatchSnapshot, MatchState, ParticipantView, PassTarget,
    PendingSelection, PhaseId, PhaseSchedule, StackEntry, StackEntryId, StackSource,
};

pub use crate::rules::{CastRequirements, ResolutionOutcome, RulesEngine, TriggerSpawn};

pub use crate::server::{
    DeckSource, EnqueueOutcome, MatchHandle, MatchRegistry, MatchServer, PlayerAction,
    ServerConfig,
};
