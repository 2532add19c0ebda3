//! Static card data.
//!
//! A `Card` holds the unchanging, pre-validated attributes of one physical
//! card in a match: cost, attack, defense, pitch value, keywords, and the
//! closed `on_declare` modifier rules distilled from its ability payload.
//!
//! Cards carry no identity of their own. The match assigns each physical
//! copy a `CardId` when the game is built, and zones track those ids; two
//! copies of the same printing are two ids pointing at equal `Card` data.
//!
//! The external loader is responsible for parsing and validating raw card
//! definitions. By the time a `Card` reaches this crate, every field is
//! closed and typed - the engine never interprets untyped payloads.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::rules::ModifierRule;

/// Unique identifier for one physical card in a match.
///
/// Identifies a specific copy, not a printing: two copies of the same
/// card in a deck get distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Keywords the engine interprets.
///
/// The loader maps raw keyword strings into this closed set; anything the
/// engine does not act on is dropped at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    /// Refunds the attacker's action point when the attack resolves.
    GoAgain,
    /// Playable by the defender during the Reaction step.
    DefenseReaction,
    /// Playable by the attacker during the Reaction step.
    AttackReaction,
}

/// Static attributes of one card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (display/debugging and event payloads).
    pub name: String,

    /// Resource cost to play.
    pub cost: i64,

    /// Base attack value; 0 means the card cannot attack.
    pub attack: i64,

    /// Defense value; 0 means the card cannot block.
    pub defense: i64,

    /// Resource value gained when pitched.
    pub pitch: i64,

    /// Keyword set.
    pub keywords: SmallVec<[Keyword; 2]>,

    /// Attack-declaration modifier rules, validated by the loader.
    pub on_declare: Vec<ModifierRule>,
}

impl Card {
    /// Create a card with the given combat statistics and no keywords.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i64, attack: i64, defense: i64, pitch: i64) -> Self {
        Self {
            name: name.into(),
            cost,
            attack,
            defense,
            pitch,
            keywords: SmallVec::new(),
            on_declare: Vec::new(),
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

    /// Add an attack-declaration modifier rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: ModifierRule) -> Self {
        self.on_declare.push(rule);
        self
    }

    /// Check for a keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Whether the card can be declared as an attack.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.attack > 0
    }

    /// Whether the card can contribute defense.
    #[must_use]
    pub fn is_defense(&self) -> bool {
        self.defense > 0
    }

    /// Whether the card is a defense reaction.
    #[must_use]
    pub fn is_defense_reaction(&self) -> bool {
        self.has_keyword(Keyword::DefenseReaction)
    }

    /// Whether the card is an attack reaction.
    #[must_use]
    pub fn is_attack_reaction(&self) -> bool {
        self.has_keyword(Keyword::AttackReaction)
    }

    /// Whether the card refunds an action point on resolution.
    #[must_use]
    pub fn has_go_again(&self) -> bool {
        self.has_keyword(Keyword::GoAgain)
    }

    /// Whether the card may be declared as a block at the Defend step.
    ///
    /// Reactions block during the Reaction step instead.
    #[must_use]
    pub fn is_blocker(&self) -> bool {
        self.is_defense() && !self.is_defense_reaction()
    }
}
