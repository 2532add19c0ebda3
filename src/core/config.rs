//! Match configuration.
//!
//! Rule constants a match is created with. These never change once the
//! game is built; the enumerator and executor read them from `GameState`.

use serde::{Deserialize, Serialize};

/// Rule constants for one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting life total per player.
    pub starting_life: i64,

    /// Hand-size limit drawn up to at start of turn and at cleanup.
    pub hand_size: usize,

    /// Maximum cards in a single block declaration.
    pub defend_max: usize,

    /// Cap on cards per enumerated pitch selection; None means unlimited.
    pub max_pitch_cards: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            hand_size: 4,
            defend_max: 2,
            max_pitch_cards: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.starting_life, 20);
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.defend_max, 2);
        assert_eq!(config.max_pitch_cards, None);
    }
}
