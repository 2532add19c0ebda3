//! # duel-engine
//!
//! A deterministic rules engine for a two-player turn-based dueling card
//! game, built for human play, scripted bots and automated training
//! rollouts alike.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: `GameState` is a value threaded through
//!    `apply_action`, never ambient. Independent matches advance safely
//!    in parallel.
//!
//! 2. **Enumerate, then apply**: `enumerate_legal_actions` is the single
//!    source of truth for legality; the executor accepts exactly that set
//!    and nothing else.
//!
//! 3. **Deterministic**: identical (state, action, seed) always produce
//!    identical results. Randomness exists only in setup shuffles.
//!
//! 4. **Atomic mutation**: an applied action either fully happens, with
//!    its events and history entry, or the caller's state is untouched.
//!
//! ## The turn and combat machines
//!
//! Phases cycle Start -> Action -> End -> Start. Declaring an attack
//! during Action opens the six-step combat machine: Layer -> Attack ->
//! Defend -> Reaction -> Damage -> Resolution, with Layer and Reaction
//! closing on two consecutive passes. Attack, Damage and Resolution are
//! automatic and run inside the `apply` call that reaches them.
//!
//! ## Modules
//!
//! - `cards`: static card, weapon and hero data
//! - `zones`: per-player zones and card movement
//! - `core`: players, actions, configuration, state, RNG
//! - `combat`: the combat sub-state machine
//! - `rules`: the attack-modifier hook and its rule data
//! - `engine`: enumeration, execution, resources, errors
//! - `events`: the emitted-event contract
//! - `setup`: match construction

pub mod cards;
pub mod combat;
pub mod core;
pub mod engine;
pub mod events;
pub mod rules;
pub mod setup;
pub mod zones;

// Re-export commonly used types
pub use crate::cards::{Card, CardId, Hero, Keyword, Weapon};

pub use crate::combat::{AttackDeclaration, AttackSource, CombatState, CombatStep};

pub use crate::core::{
    Action, ActionRecord, CardSelection, GameConfig, GameRng, GameState, Phase, Player, PlayerId,
};

pub use crate::engine::{
    apply_action, apply_action_with, consume, current_actor, enumerate_legal_actions,
    ActionEnumerator, Applied, EngineError, PitchReceipt,
};

pub use crate::events::Event;

pub use crate::rules::{
    AttackContext, AttackModifier, AttackOutcome, Condition, ModifierRule, RuleModifiers,
};

pub use crate::setup::{demo_deck, demo_deck_with_reactions, GameBuilder};

pub use crate::zones::{Zone, ZoneSet};
