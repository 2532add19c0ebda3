//! Hero identity.
//!
//! A hero contributes a name and a validated list of attack-declaration
//! modifier rules. Hero data arrives pre-validated from the external
//! loader, like card data.

use serde::{Deserialize, Serialize};

use crate::rules::ModifierRule;

/// A player's hero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Hero name.
    pub name: String,

    /// Attack-declaration modifier rules.
    pub on_declare: Vec<ModifierRule>,
}

impl Hero {
    /// Create a hero with no modifier rules.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_declare: Vec::new(),
        }
    }

    /// Add an attack-declaration modifier rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: ModifierRule) -> Self {
        self.on_declare.push(rule);
        self
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new("Generic Hero")
    }
}
