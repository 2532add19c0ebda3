//! Player identification and per-player state.

use serde::{Deserialize, Serialize};

use crate::cards::{Hero, Weapon};
use crate::zones::ZoneSet;

/// Player identifier. Exactly two players: 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a player ID. Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "two-player game: player id must be 0 or 1");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both player IDs in order.
    #[must_use]
    pub const fn both() -> [PlayerId; 2] {
        [PlayerId(0), PlayerId(1)]
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One player's mutable match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Life total. The match ends when either player reaches 0 or less.
    pub life: i64,

    /// Floating resources, spent before pitching; reset to 0 at cleanup.
    pub floating: i64,

    /// Action points. Granted at start of turn, spent on attack
    /// declarations, refunded only by Go Again at Resolution.
    pub action_points: u32,

    /// The player's five zones.
    pub zones: ZoneSet,

    /// Equipped weapon, if any.
    pub weapon: Option<Weapon>,

    /// Hero identity.
    pub hero: Hero,

    /// Attacks declared this turn; feeds the modifier hook, reset at cleanup.
    pub attacks_this_turn: u32,
}

impl Player {
    /// Create a player at the given starting life with empty zones.
    #[must_use]
    pub fn new(life: i64) -> Self {
        Self {
            life,
            floating: 0,
            action_points: 0,
            zones: ZoneSet::new(),
            weapon: None,
            hero: Hero::default(),
            attacks_this_turn: 0,
        }
    }

    /// Whether this player is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    }

    #[test]
    fn test_player_new() {
        let player = Player::new(20);
        assert_eq!(player.life, 20);
        assert_eq!(player.floating, 0);
        assert_eq!(player.action_points, 0);
        assert!(player.is_alive());
        assert_eq!(player.zones.card_count(), 0);
    }

    #[test]
    fn test_is_alive() {
        let mut player = Player::new(1);
        assert!(player.is_alive());
        player.life = 0;
        assert!(!player.is_alive());
        player.life = -3;
        assert!(!player.is_alive());
    }
}
