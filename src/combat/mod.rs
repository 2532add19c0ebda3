//! Combat sub-state machine data.
//!
//! A declared attack opens one `CombatState`, which walks the six steps:
//!
//! ```text
//! Idle -> Layer -> Attack -> Defend -> Reaction -> Damage -> Resolution -> Idle
//! ```
//!
//! Layer, Defend and Reaction wait for player actions. Attack, Damage and
//! Resolution are automatic: the executor runs them to completion inside
//! the `apply` call that entered them, so a caller only ever observes
//! Idle, Layer, Defend or Reaction between calls.
//!
//! ## Priority and passes
//!
//! Layer and Reaction both close on exactly two consecutive passes. Any
//! non-pass action resets the pass counter to 0, which also bounds the
//! number of exchanges: progress is always made or the window closes.
//!
//! One deliberate asymmetry in Reaction: an attacker pass with the counter
//! at 0 leaves it at 0 and hands priority back to the defender. Only a
//! defender pass starts a closing pair.
//!
//! ## Invariant
//!
//! `step == Idle` implies every other field is cleared; `clear` is the
//! only way back to Idle.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{CardSelection, PlayerId};

/// Where a declared attack or reaction came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackSource {
    Hand,
    Arsenal,
    Weapon,
}

/// The six combat steps, plus Idle between combats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatStep {
    /// No combat pending.
    #[default]
    Idle,
    /// Priority window before the attack is paid for.
    Layer,
    /// Automatic: cost payment, card movement, modifier hook.
    Attack,
    /// Defender declares one block.
    Defend,
    /// Alternating reaction window.
    Reaction,
    /// Automatic: damage computation and life loss.
    Damage,
    /// Automatic: resolution event, go-again refund, teardown.
    Resolution,
}

/// The attack chosen at declaration, held until the Attack step pays it.
///
/// The Layer step admits only passes, so the hand cannot change between
/// declaration and payment; the recorded pitch selection stays valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDeclaration {
    /// Where the attack comes from.
    pub source: AttackSource,

    /// The attacking card; None for a weapon attack.
    pub card: Option<CardId>,

    /// Hand cards to pitch for the cost.
    pub pitch: CardSelection,
}

/// State of the active combat, if any.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    /// Current step.
    pub step: CombatStep,

    /// The attacking player; None when idle.
    pub attacker: Option<PlayerId>,

    /// Priority holder during Layer.
    pub priority: Option<PlayerId>,

    /// Consecutive passes in the current window; always 0 or 1.
    pub passes: u8,

    /// The declared attack, consumed by the Attack step.
    pub declared: Option<AttackDeclaration>,

    /// Attack total after the modifier hook and any attack reactions.
    pub pending_attack: i64,

    /// Damage computed at the Damage step; max(0, attack - block).
    pub pending_damage: i64,

    /// Defense total from the block and defense reactions.
    pub reaction_block: i64,

    /// Whose turn it is to act during Reaction.
    pub reaction_actor: Option<PlayerId>,

    /// Defense reactions played from arsenal this combat.
    pub arsenal_reactions: Vec<CardId>,

    /// The card that attacked; None while idle or for weapon attacks.
    pub last_attack_card: Option<CardId>,

    /// Pitch total paid for the attack.
    pub last_pitch_sum: i64,

    /// Whether the attack refunds an action point at Resolution.
    pub go_again: bool,

    /// Whether the attack dealt damage; recorded at the Damage step.
    pub hit: bool,
}

impl CombatState {
    /// An idle combat state.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Whether no combat is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.step == CombatStep::Idle
    }

    /// Open combat at the Layer step for a declared attack.
    ///
    /// Priority starts with the attacker; the pass counter starts at 0.
    pub fn open(&mut self, attacker: PlayerId, declaration: AttackDeclaration) {
        *self = Self {
            step: CombatStep::Layer,
            attacker: Some(attacker),
            priority: Some(attacker),
            passes: 0,
            declared: Some(declaration),
            ..Self::default()
        };
    }

    /// Tear down after Resolution, returning to Idle with every field
    /// cleared.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The defending player; None when idle.
    #[must_use]
    pub fn defender(&self) -> Option<PlayerId> {
        self.attacker.map(PlayerId::opponent)
    }
}
