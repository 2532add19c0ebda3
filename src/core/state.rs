//! The threaded-through game state.
//!
//! `GameState` is an explicit value: the executor takes one in and hands a
//! new one back, never touching ambient globals. That keeps independent
//! matches safe to advance in parallel and makes replay a fold over the
//! recorded actions.
//!
//! ## Contents
//!
//! - Rule constants (`GameConfig`)
//! - Both players (life, resources, zones, weapon, hero)
//! - Turn counter, phase, active player
//! - The single `CombatState`
//! - The card table: id -> static card data
//! - The deterministic RNG (used only for setup shuffles)
//! - The action history (`im::Vector`, O(1) to clone)
//!
//! ## Snapshots
//!
//! `snapshot` / `restore` round-trip the whole state through bincode for
//! in-memory checkpoints (rollout buffers, undo). No file format is
//! defined or promised.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{Card, CardId};
use crate::combat::CombatState;

/// Top-level turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Start of turn; only CONTINUE is legal.
    #[default]
    Start,
    /// Main phase; attacks are declared and combat plays out here.
    Action,
    /// Arsenal staging and end-of-turn cleanup.
    End,
}

/// Complete state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Rule constants.
    pub config: GameConfig,

    /// Both players, indexed by `PlayerId`.
    players: [Player; 2],

    /// Whose turn it is.
    pub active: PlayerId,

    /// Turn counter, starting at 1.
    pub turn: u32,

    /// Current phase.
    pub phase: Phase,

    /// The single combat state machine.
    pub combat: CombatState,

    /// Static data for every physical card in the match.
    cards: FxHashMap<CardId, Card>,

    /// Deterministic RNG; only setup shuffles consume it.
    pub rng: GameRng,

    /// Applied-action history for replay and training data.
    pub history: Vector<ActionRecord>,

    /// Action sequence within the current turn.
    sequence: u32,

    /// Next card id to allocate.
    next_card_id: u32,
}

impl GameState {
    /// Create an empty match state at Start of turn 1.
    ///
    /// Players begin at the configured starting life with empty zones;
    /// use `setup::GameBuilder` to populate decks and deal hands.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            players: [Player::new(config.starting_life), Player::new(config.starting_life)],
            active: PlayerId::new(0),
            turn: 1,
            phase: Phase::Start,
            combat: CombatState::idle(),
            cards: FxHashMap::default(),
            rng: GameRng::new(seed),
            history: Vector::new(),
            sequence: 0,
            next_card_id: 0,
        }
    }

    // === Players ===

    /// Get a player's state.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Get a player's state mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// The active player's state.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    // === Card table ===

    /// Register a physical card, allocating its id.
    ///
    /// The caller is responsible for placing the id into a zone.
    pub fn register_card(&mut self, card: Card) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        self.cards.insert(id, card);
        id
    }

    /// Look up a card's static data.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Number of physical cards registered in the match.
    #[must_use]
    pub fn card_table_size(&self) -> usize {
        self.cards.len()
    }

    // === Termination ===

    /// Whether the match is over (either player at 0 or less life).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.players.iter().any(|p| !p.is_alive())
    }

    /// The winner, if exactly one player is still alive.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match (self.players[0].is_alive(), self.players[1].is_alive()) {
            (true, false) => Some(PlayerId::new(0)),
            (false, true) => Some(PlayerId::new(1)),
            _ => None,
        }
    }

    // === History ===

    /// Record an applied action.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history.push_back(ActionRecord {
            player,
            action,
            turn: self.turn,
            sequence,
        });
    }

    /// Reset the per-turn action sequence; called when the turn advances.
    pub(crate) fn reset_sequence(&mut self) {
        self.sequence = 0;
    }

    // === Snapshots ===

    /// Serialize the full state to an in-memory snapshot.
    pub fn snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a state from a snapshot produced by `snapshot`.
    pub fn restore(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default(), 42);

        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, Phase::Start);
        assert_eq!(state.active, PlayerId::new(0));
        assert!(state.combat.is_idle());
        assert!(!state.is_terminal());
        assert_eq!(state.player(PlayerId::new(0)).life, 20);
    }

    #[test]
    fn test_register_and_lookup_card() {
        let mut state = GameState::new(GameConfig::default(), 42);

        let id1 = state.register_card(Card::new("Strike", 1, 4, 3, 2));
        let id2 = state.register_card(Card::new("Strike", 1, 4, 3, 2));

        assert_ne!(id1, id2); // Same printing, distinct physical cards
        assert_eq!(state.card(id1).unwrap().name, "Strike");
        assert_eq!(state.card_table_size(), 2);
        assert!(state.card(CardId::new(99)).is_none());
    }

    #[test]
    fn test_winner() {
        let mut state = GameState::new(GameConfig::default(), 42);
        assert_eq!(state.winner(), None);

        state.player_mut(PlayerId::new(1)).life = 0;
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(PlayerId::new(0)));

        // Both down: a draw, no winner
        state.player_mut(PlayerId::new(0)).life = -2;
        assert!(state.is_terminal());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_record_action_sequence() {
        let mut state = GameState::new(GameConfig::default(), 42);

        state.record_action(PlayerId::new(0), Action::Continue);
        state.record_action(PlayerId::new(0), Action::Pass);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].sequence, 0);
        assert_eq!(state.history[1].sequence, 1);

        state.reset_sequence();
        state.record_action(PlayerId::new(1), Action::Continue);
        assert_eq!(state.history[2].sequence, 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = GameState::new(GameConfig::default(), 42);
        let id = state.register_card(Card::new("Strike", 1, 4, 3, 2));
        state.player_mut(PlayerId::new(0)).zones.deck.push(id);
        state.player_mut(PlayerId::new(1)).life = 13;

        let bytes = state.snapshot().unwrap();
        let restored = GameState::restore(&bytes).unwrap();

        assert_eq!(restored.player(PlayerId::new(1)).life, 13);
        assert_eq!(restored.player(PlayerId::new(0)).zones.deck, vec![id]);
        assert_eq!(restored.card(id).unwrap().name, "Strike");
        assert_eq!(restored.turn, state.turn);
    }
}
