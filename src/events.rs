//! The event contract.
//!
//! Every applied action yields a sequence of events describing exactly
//! what happened: combat flow, numeric totals, remaining life, actor ids.
//! Downstream consumers (renderers, loggers, bots, feature encoders)
//! read these instead of diffing state.
//!
//! Field shapes and the serde tag names are a stable contract; additions
//! are fine, renames are breaking.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::combat::AttackSource;
use crate::core::{CardSelection, PlayerId};

/// Something that happened while applying an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The active player entered the Action phase: cards drawn, one
    /// action point granted.
    TurnStart { player: PlayerId, turn: u32, drawn: u32 },

    /// A player passed priority during the Layer step.
    LayerPass { player: PlayerId },

    /// Two consecutive passes closed the Layer step.
    LayerEnd,

    /// The attack was paid for and finalized at the Attack step.
    DeclareAttack {
        player: PlayerId,
        /// The attacking card; None for a weapon attack.
        card: Option<CardId>,
        name: String,
        /// Final attack value after the modifier hook.
        attack: i64,
        cost: i64,
        /// Pitch total paid.
        pitch: i64,
        source: AttackSource,
    },

    /// The defender declared a block at the Defend step.
    BlockPlay {
        player: PlayerId,
        cards: CardSelection,
        block: i64,
    },

    /// The defender declined to block.
    BlockPass { player: PlayerId },

    /// The defender played one defense reaction.
    DefenseReactPlay {
        player: PlayerId,
        card: CardId,
        block: i64,
        source: AttackSource,
    },

    /// The attacker played one attack reaction.
    AttackReact {
        player: PlayerId,
        card: CardId,
        bonus: i64,
        pitch: i64,
        source: AttackSource,
    },

    /// A player passed during the Reaction step.
    ReactionPass { player: PlayerId },

    /// Combat resolved: damage applied, combat state torn down.
    DefenseResolve {
        /// Total defense declared against the attack.
        block: i64,
        /// Damage dealt, max(0, attack - block).
        damage: i64,
        /// Defender's life after damage.
        life_after: i64,
        /// Defense reactions that came from the arsenal.
        arsenal_reactions: Vec<CardId>,
        /// Whether an action point was refunded.
        go_again: bool,
        /// Whether any damage got through.
        hit: bool,
    },

    /// The active player left the Action phase for the End phase.
    EndPhase { player: PlayerId },

    /// A card was staged into the arsenal slot.
    SetArsenal { player: PlayerId, card: CardId },

    /// The player declined to stage an arsenal card.
    ArsenalPass { player: PlayerId },

    /// End-of-turn cleanup ran and the active player flipped.
    TurnEnd { player: PlayerId, next: PlayerId, turn: u32 },
}
