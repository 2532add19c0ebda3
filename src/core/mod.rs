//! Core types: players, actions, configuration, state, RNG.

mod action;
mod config;
mod player;
mod rng;
mod state;

pub use action::{Action, ActionRecord, CardSelection};
pub use config::GameConfig;
pub use player::{Player, PlayerId};
pub use rng::GameRng;
pub use state::{GameState, Phase};
