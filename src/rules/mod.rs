//! Attack-modifier rules: the combat machine's extension point.

mod modifiers;

pub use modifiers::{
    AttackContext, AttackModifier, AttackOutcome, Condition, ModifierRule, RuleModifiers,
};
