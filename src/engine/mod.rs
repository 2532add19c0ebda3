//! The rules engine: enumeration, execution, resources, errors.
//!
//! Two entrypoints drive a match:
//!
//! - [`enumerate_legal_actions`] - pure query, state to legal actions.
//! - [`apply_action`] - validates one action and atomically applies it,
//!   returning the new state, a terminal flag and the emitted events.
//!
//! A driver loop looks like:
//!
//! ```
//! use duel_engine::engine::{apply_action, enumerate_legal_actions};
//! use duel_engine::setup::GameBuilder;
//!
//! let mut state = GameBuilder::new().build(42);
//! for _ in 0..50 {
//!     let actions = enumerate_legal_actions(&state);
//!     if actions.is_empty() {
//!         break; // Terminal
//!     }
//!     let applied = apply_action(&state, &actions[0]).unwrap();
//!     state = applied.state;
//!     if applied.terminal {
//!         break;
//!     }
//! }
//! ```

mod enumerate;
mod error;
mod execute;
mod resources;
mod turn;

pub use enumerate::{current_actor, enumerate_legal_actions, ActionEnumerator};
pub use error::EngineError;
pub use execute::{apply_action, apply_action_with, Applied};
pub use resources::{consume, PitchReceipt};
