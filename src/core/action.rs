//! Action representation.
//!
//! An `Action` is one atomic move a player hands to the executor. Payloads
//! carry card ids and sorted card-id selections; bitmask or index
//! encodings for bots and training harnesses are a host concern, mapped
//! to these ids at the boundary.
//!
//! Actions are compared structurally (the executor checks membership in
//! the enumerated legal set), so selections are kept in canonical sorted
//! order - `canonical` normalizes an action built by a host.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardId;

/// A set of selected cards (block or pitch choice).
///
/// Kept sorted by card id; `Action::canonical` enforces this.
pub type CardSelection = SmallVec<[CardId; 4]>;

/// One atomic player move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Leave the Start phase.
    Continue,

    /// Declare an attack with a card from hand, pitching `pitch` for its cost.
    PlayAttack { card: CardId, pitch: CardSelection },

    /// Declare an attack with the arsenal card, pitching from hand.
    PlayArsenalAttack { card: CardId, pitch: CardSelection },

    /// Declare an attack with the equipped weapon, pitching from hand.
    WeaponAttack { pitch: CardSelection },

    /// Play one attack reaction (hand or arsenal) during the Reaction step.
    PlayAttackReaction { card: CardId, pitch: CardSelection },

    /// Declare blockers at the Defend step, or play one defense reaction
    /// during the Reaction step.
    Defend { cards: CardSelection },

    /// Stage a hand card into the empty arsenal slot during the End phase.
    SetArsenal { card: CardId },

    /// Pass priority / decline to act in the current phase or step.
    Pass,
}

impl Action {
    /// Normalize selections to canonical sorted order.
    #[must_use]
    pub fn canonical(mut self) -> Self {
        match &mut self {
            Action::PlayAttack { pitch, .. }
            | Action::PlayArsenalAttack { pitch, .. }
            | Action::WeaponAttack { pitch }
            | Action::PlayAttackReaction { pitch, .. } => pitch.sort_unstable(),
            Action::Defend { cards } => cards.sort_unstable(),
            Action::Continue | Action::SetArsenal { .. } | Action::Pass => {}
        }
        self
    }

    /// Whether this is a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }
}

/// A recorded action with metadata, for replay and training data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_canonical_sorts_selections() {
        let action = Action::PlayAttack {
            card: CardId::new(1),
            pitch: smallvec![CardId::new(9), CardId::new(3), CardId::new(7)],
        };

        let canonical = action.canonical();
        match canonical {
            Action::PlayAttack { pitch, .. } => {
                assert_eq!(pitch.as_slice(), &[CardId::new(3), CardId::new(7), CardId::new(9)]);
            }
            _ => panic!("variant changed"),
        }
    }

    #[test]
    fn test_canonical_actions_compare_equal() {
        let a = Action::Defend {
            cards: smallvec![CardId::new(2), CardId::new(1)],
        }
        .canonical();
        let b = Action::Defend {
            cards: smallvec![CardId::new(1), CardId::new(2)],
        }
        .canonical();

        assert_eq!(a, b);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::PlayAttackReaction {
            card: CardId::new(4),
            pitch: smallvec![CardId::new(5)],
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
