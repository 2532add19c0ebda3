//! Attack-declaration modifier rules and the modifier hook.
//!
//! Heroes and cards can adjust a declared attack. Rather than authored
//! scripts, abilities arrive as closed `ModifierRule` data: a guard
//! `Condition` plus an attack bonus. The external loader validates raw
//! ability payloads into this form; the core only evaluates it.
//!
//! ## The hook
//!
//! `AttackModifier` is the single polymorphic extension point of the
//! combat machine. The executor invokes it exactly once per declared
//! attack, during the automatic Attack step, with an `AttackContext`
//! describing the declaration. The returned `AttackOutcome` feeds the
//! final pending attack, the go-again flag, and any extra events back
//! into combat state. New heroes or cards that outgrow the rule form
//! implement this trait without touching the state machine.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Hero, Weapon};
use crate::core::PlayerId;
use crate::events::Event;

/// Guard for a modifier rule.
///
/// Conditions are evaluated against the attack being declared. Combinators
/// allow the loader to express compound guards without any scripting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Always true.
    Always,

    /// This is the attacker's first attack this turn.
    FirstAttack,

    /// This is the attacker's second attack this turn.
    SecondAttack,

    /// This is the attacker's third or later attack this turn.
    ThirdOrLaterAttack,

    /// The attacker has declared at least this many attacks before this one.
    AttacksThisTurnAtLeast(u32),

    /// The declared source is a weapon.
    IsWeapon,

    /// The declared source is a card (hand or arsenal).
    IsCard,

    /// The pitch paid for this attack totals at least this much.
    PitchSumAtLeast(i64),

    /// All conditions must hold.
    All(Vec<Condition>),

    /// At least one condition must hold.
    Any(Vec<Condition>),

    /// Condition must not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Evaluate against an attack declaration.
    #[must_use]
    pub fn eval(&self, ctx: &AttackContext<'_>) -> bool {
        match self {
            Condition::Always => true,
            Condition::FirstAttack => ctx.attacks_this_turn == 0,
            Condition::SecondAttack => ctx.attacks_this_turn == 1,
            Condition::ThirdOrLaterAttack => ctx.attacks_this_turn >= 2,
            Condition::AttacksThisTurnAtLeast(n) => ctx.attacks_this_turn >= *n,
            Condition::IsWeapon => ctx.weapon.is_some(),
            Condition::IsCard => ctx.card.is_some(),
            Condition::PitchSumAtLeast(n) => ctx.pitch_sum >= *n,
            Condition::All(conds) => conds.iter().all(|c| c.eval(ctx)),
            Condition::Any(conds) => conds.iter().any(|c| c.eval(ctx)),
            Condition::Not(cond) => !cond.eval(ctx),
        }
    }
}

/// One validated attack-declaration rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifierRule {
    /// Guard; the bonus applies only when it holds.
    pub when: Condition,

    /// Attack bonus (may be negative).
    pub add_attack: i64,
}

impl ModifierRule {
    /// Create an unconditional attack bonus.
    #[must_use]
    pub fn add_attack(amount: i64) -> Self {
        Self {
            when: Condition::Always,
            add_attack: amount,
        }
    }

    /// Create a guarded attack bonus.
    #[must_use]
    pub fn when(condition: Condition, amount: i64) -> Self {
        Self {
            when: condition,
            add_attack: amount,
        }
    }
}

/// Everything a modifier may inspect about the declared attack.
///
/// Exactly one of `card` / `weapon` is set.
#[derive(Debug)]
pub struct AttackContext<'a> {
    /// The attacking player.
    pub attacker: PlayerId,

    /// The attacker's hero.
    pub hero: &'a Hero,

    /// The attacking card, when the source is hand or arsenal.
    pub card: Option<&'a Card>,

    /// The attacking weapon, when the source is a weapon.
    pub weapon: Option<&'a Weapon>,

    /// Printed attack value of the source.
    pub base_attack: i64,

    /// Total pitch value paid for this attack.
    pub pitch_sum: i64,

    /// Attacks the attacker declared this turn before this one.
    pub attacks_this_turn: u32,
}

/// Result of the modifier hook.
#[derive(Clone, Debug, Default)]
pub struct AttackOutcome {
    /// Final attack value; the executor clamps it at 0.
    pub attack: i64,

    /// Whether the attack refunds an action point on resolution.
    pub go_again: bool,

    /// Extra events to append after `declare_attack`.
    pub events: Vec<Event>,
}

/// The attack-modifier hook.
pub trait AttackModifier {
    /// Called exactly once per declared attack, at the Attack step.
    fn on_declare(&self, ctx: &AttackContext<'_>) -> AttackOutcome;
}

/// Default hook: applies the hero's rules, then the card's, and reads
/// go-again from the source's keywords.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleModifiers;

impl AttackModifier for RuleModifiers {
    fn on_declare(&self, ctx: &AttackContext<'_>) -> AttackOutcome {
        let mut attack = ctx.base_attack;

        for rule in &ctx.hero.on_declare {
            if rule.when.eval(ctx) {
                attack += rule.add_attack;
            }
        }
        if let Some(card) = ctx.card {
            for rule in &card.on_declare {
                if rule.when.eval(ctx) {
                    attack += rule.add_attack;
                }
            }
        }

        let go_again = match (ctx.card, ctx.weapon) {
            (Some(card), _) => card.has_go_again(),
            (None, Some(weapon)) => weapon.has_go_again(),
            (None, None) => false,
        };

        AttackOutcome {
            attack,
            go_again,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Keyword;

    fn ctx<'a>(hero: &'a Hero, card: Option<&'a Card>, weapon: Option<&'a Weapon>) -> AttackContext<'a> {
        let base = card.map(|c| c.attack).or(weapon.map(|w| w.attack)).unwrap_or(0);
        AttackContext {
            attacker: PlayerId::new(0),
            hero,
            card,
            weapon,
            base_attack: base,
            pitch_sum: 0,
            attacks_this_turn: 0,
        }
    }

    #[test]
    fn test_rules_pass_through_base_attack() {
        let hero = Hero::default();
        let card = Card::new("Strike", 0, 4, 3, 1);

        let out = RuleModifiers.on_declare(&ctx(&hero, Some(&card), None));
        assert_eq!(out.attack, 4);
        assert!(!out.go_again);
    }

    #[test]
    fn test_hero_rule_applies_when_condition_holds() {
        let hero = Hero::new("Ember").with_rule(ModifierRule::when(Condition::AttacksThisTurnAtLeast(1), 1));
        let card = Card::new("Strike", 0, 4, 3, 1);

        let mut context = ctx(&hero, Some(&card), None);
        let out = RuleModifiers.on_declare(&context);
        assert_eq!(out.attack, 4); // First attack: no bonus

        context.attacks_this_turn = 1;
        let out = RuleModifiers.on_declare(&context);
        assert_eq!(out.attack, 5);
    }

    #[test]
    fn test_card_rule_stacks_on_hero_rule() {
        let hero = Hero::new("Ember").with_rule(ModifierRule::add_attack(1));
        let card = Card::new("Strike", 0, 4, 3, 1).with_rule(ModifierRule::when(Condition::PitchSumAtLeast(2), 2));

        let mut context = ctx(&hero, Some(&card), None);
        context.pitch_sum = 2;
        let out = RuleModifiers.on_declare(&context);
        assert_eq!(out.attack, 7);
    }

    #[test]
    fn test_go_again_from_keywords() {
        let hero = Hero::default();
        let card = Card::new("Surge", 0, 3, 0, 1).with_keyword(Keyword::GoAgain);
        assert!(RuleModifiers.on_declare(&ctx(&hero, Some(&card), None)).go_again);

        let weapon = Weapon::new("Daggers", 1, 0).with_keyword(Keyword::GoAgain);
        assert!(RuleModifiers.on_declare(&ctx(&hero, None, Some(&weapon))).go_again);
    }

    #[test]
    fn test_condition_combinators() {
        let hero = Hero::default();
        let card = Card::new("Strike", 0, 4, 3, 1);
        let mut context = ctx(&hero, Some(&card), None);
        context.attacks_this_turn = 2;
        context.pitch_sum = 3;

        assert!(Condition::All(vec![Condition::ThirdOrLaterAttack, Condition::PitchSumAtLeast(3)]).eval(&context));
        assert!(Condition::Any(vec![Condition::FirstAttack, Condition::IsCard]).eval(&context));
        assert!(Condition::Not(Box::new(Condition::IsWeapon)).eval(&context));
        assert!(!Condition::SecondAttack.eval(&context));
    }
}
