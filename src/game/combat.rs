//! Combat assignment tracking.
//!
//! During the combat phase the turn owner builds an attacker → defender
//! map, optionally attaching secondary attackers to an existing
//! assignment, then locks the declaration in with a submit. Legality of
//! each pairing is rules-engine-derived; this module only tracks the
//! assignments.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardUid, GameError, GameResult};

/// One attacker's declared assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackAssignment {
    /// The defender this attacker is assigned to.
    pub defender: CardUid,

    /// Additional attackers attached to this assignment (effects
    /// granting extra simultaneous attacks).
    pub secondary: SmallVec<[CardUid; 2]>,
}

/// The turn owner's in-progress attack declaration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AttackPlan {
    assignments: FxHashMap<CardUid, AttackAssignment>,
}

impl AttackPlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no attacks are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of primary attackers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Look up one attacker's assignment.
    #[must_use]
    pub fn get(&self, attacker: CardUid) -> Option<&AttackAssignment> {
        self.assignments.get(&attacker)
    }

    /// Iterate over (attacker, assignment) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CardUid, &AttackAssignment)> {
        self.assignments.iter().map(|(&k, v)| (k, v))
    }

    /// Whether a card already participates in the plan, as primary or
    /// secondary attacker.
    #[must_use]
    pub fn involves(&self, card: CardUid) -> bool {
        self.assignments.contains_key(&card)
            || self
                .assignments
                .values()
                .any(|a| a.secondary.contains(&card))
    }

    /// Assign an attacker to a defender, replacing any prior assignment
    /// for that attacker.
    pub fn assign(&mut self, attacker: CardUid, defender: CardUid) {
        self.assignments.insert(
            attacker,
            AttackAssignment {
                defender,
                secondary: SmallVec::new(),
            },
        );
    }

    /// Remove an attacker's assignment (including its secondaries).
    pub fn unassign(&mut self, attacker: CardUid) -> GameResult<()> {
        if self.assignments.remove(&attacker).is_none() {
            return Err(GameError::validation(format!(
                "{attacker} has no attack assignment"
            )));
        }
        Ok(())
    }

    /// Attach a secondary attacker to an existing primary assignment.
    pub fn add_secondary(&mut self, attacker: CardUid, primary: CardUid) -> GameResult<()> {
        if self.involves(attacker) {
            return Err(GameError::validation(format!(
                "{attacker} already participates in an attack"
            )));
        }
        let assignment = self.assignments.get_mut(&primary).ok_or_else(|| {
            GameError::validation(format!("{primary} has no attack assignment"))
        })?;
        assignment.secondary.push(attacker);
        Ok(())
    }

    /// Clear the plan (after combat resolves or the phase ends).
    pub fn clear(&mut self) {
        self.assignments.clear();
    }
}
