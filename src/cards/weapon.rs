//! Equipped weapons.
//!
//! A weapon is a standing attack source. Unlike a card it never changes
//! zone when declared: it stays equipped and only its used-this-turn flag
//! toggles. The flag resets during end-of-turn cleanup.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Keyword;

/// An equipped weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Weapon name (display/debugging and event payloads).
    pub name: String,

    /// Base attack value.
    pub attack: i64,

    /// Resource cost per swing.
    pub cost: i64,

    /// Keyword set.
    pub keywords: SmallVec<[Keyword; 2]>,

    /// Whether the weapon is limited to one swing per turn.
    pub once_per_turn: bool,

    /// Set when the weapon has attacked this turn; cleared at cleanup.
    pub used_this_turn: bool,
}

impl Weapon {
    /// Create a once-per-turn weapon.
    #[must_use]
    pub fn new(name: impl Into<String>, attack: i64, cost: i64) -> Self {
        Self {
            name: name.into(),
            attack,
            cost,
            keywords: SmallVec::new(),
            once_per_turn: true,
            used_this_turn: false,
        }
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Check for a keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Whether the weapon refunds an action point on resolution.
    #[must_use]
    pub fn has_go_again(&self) -> bool {
        self.has_keyword(Keyword::GoAgain)
    }

    /// Whether the weapon may be declared right now.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !(self.once_per_turn && self.used_this_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_once_per_turn() {
        let mut weapon = Weapon::new("Dawnblade", 3, 1);
        assert!(weapon.can_attack());

        weapon.used_this_turn = true;
        assert!(!weapon.can_attack());

        weapon.once_per_turn = false;
        assert!(weapon.can_attack());
    }

    #[test]
    fn test_weapon_go_again() {
        let weapon = Weapon::new("Twin Daggers", 1, 0).with_keyword(Keyword::GoAgain);
        assert!(weapon.has_go_again());
    }
}
