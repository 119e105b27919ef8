//! Pending sub-states: casts collecting parameters and
//! multi-destination card selections.
//!
//! A cast/activation attempt does not resolve immediately. It opens a
//! `PendingCast` holding the requirements the rules engine reported;
//! the controller narrows the open parameters one call at a time and
//! the entry is only pushed onto the stack once everything required is
//! satisfied. Nothing is committed before the push, so cancelling is a
//! pure rollback.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Zone;
use crate::core::{CardUid, GameError, GameResult};
use crate::rules::CastRequirements;

/// Whether a pending action is a cast from hand or an activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastKind {
    /// Casting a card from hand.
    Cast,
    /// Activating an ability of a card in play.
    Activation,
}

/// A cast/activation attempt still collecting its open parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCast {
    /// The card being cast or whose ability is being activated.
    pub card: CardUid,

    /// Cast or activation.
    pub kind: CastKind,

    /// Requirements reported by the rules engine at announce time.
    pub requirements: CastRequirements,

    /// Chosen targets so far.
    pub targets: Option<SmallVec<[CardUid; 3]>>,

    /// Chosen cost payment.
    pub cost: Option<SmallVec<[CardUid; 3]>>,

    /// Chosen tributes.
    pub tributes: Option<SmallVec<[CardUid; 3]>>,

    /// Chosen X.
    pub x: Option<i64>,

    /// Chosen amount.
    pub amount: Option<i64>,
}

impl PendingCast {
    /// Open a pending cast with nothing chosen yet.
    #[must_use]
    pub fn new(card: CardUid, kind: CastKind, requirements: CastRequirements) -> Self {
        Self {
            card,
            kind,
            requirements,
            targets: None,
            cost: None,
            tributes: None,
            x: None,
            amount: None,
        }
    }

    /// Whether every required parameter has been supplied.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        let req = &self.requirements;
        let targets_ok = req.max_targets == 0 || self.targets.is_some();
        let cost_ok = req.cost_count == 0 || self.cost.is_some();
        let tributes_ok = req.tribute_count == 0 || self.tributes.is_some();
        let x_ok = req.x_bounds.is_none() || self.x.is_some();
        let amount_ok = req.amount_bounds.is_none() || self.amount.is_some();
        targets_ok && cost_ok && tributes_ok && x_ok && amount_ok
    }
}

/// One destination slot of a pending multi-destination selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSpec {
    /// Where cards assigned to this slot go.
    pub zone: Zone,

    /// Minimum cards that must be assigned here.
    pub min: usize,

    /// Maximum cards that may be assigned here.
    pub max: usize,
}

/// A resolution-time request for the participant to distribute a pool
/// of cards across declared destinations (e.g. "look at the top three,
/// put some in hand, the rest on the bottom in chosen order").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    /// The cards being distributed.
    pub pool: Vec<CardUid>,

    /// Positional destination slots.
    pub destinations: Vec<DestinationSpec>,
}

impl PendingSelection {
    /// Validate a positional grouping against this selection.
    ///
    /// The groups must match the destination count, respect each
    /// destination's min/max, reference only pool cards, contain no
    /// duplicates, and cover the entire pool.
    pub fn validate_groups(&self, groups: &[Vec<CardUid>]) -> GameResult<()> {
        if groups.len() != self.destinations.len() {
            return Err(GameError::validation(format!(
                "expected {} destination groups, got {}",
                self.destinations.len(),
                groups.len()
            )));
        }

        let mut seen: Vec<CardUid> = Vec::with_capacity(self.pool.len());
        for (group, dest) in groups.iter().zip(&self.destinations) {
            if group.len() < dest.min || group.len() > dest.max {
                return Err(GameError::validation(format!(
                    "destination {} accepts {}..={} cards, got {}",
                    dest.zone,
                    dest.min,
                    dest.max,
                    group.len()
                )));
            }
            for &uid in group {
                if !self.pool.contains(&uid) {
                    return Err(GameError::validation(format!("{uid} is not in the selection pool")));
                }
                if seen.contains(&uid) {
                    return Err(GameError::validation(format!("{uid} assigned to more than one destination")));
                }
                seen.push(uid);
            }
        }

        if seen.len() != self.pool.len() {
            return Err(GameError::validation(
                "every card in the selection pool must be assigned a destination",
            ));
        }

        Ok(())
    }
}
