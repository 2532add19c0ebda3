//! Atomic action application.
//!
//! `apply_action` is the sole mutation entrypoint. It validates the
//! action by membership in the enumerated legal set, clones the state,
//! mutates the clone, verifies the state invariants, and only then hands
//! the new state back. Every failure leaves the caller's value untouched
//! and every success is all-or-nothing.
//!
//! The automatic combat steps (Attack, Damage, Resolution) run to
//! completion inside the `apply` call that reaches them: the pass that
//! closes the Layer pays for and finalizes the attack; the pass that
//! closes Reaction computes damage and resolves. Between calls the
//! machine only ever rests in Idle, Layer, Defend or Reaction.

use crate::cards::CardId;
use crate::combat::{AttackDeclaration, AttackSource, CombatState, CombatStep};
use crate::core::{Action, CardSelection, GameState, Phase, PlayerId};
use crate::events::Event;
use crate::rules::{AttackContext, AttackModifier, RuleModifiers};
use crate::zones::Zone;

use super::enumerate::{current_actor, enumerate_legal_actions};
use super::error::EngineError;
use super::resources;

/// Result of one applied action.
#[derive(Clone, Debug)]
pub struct Applied {
    /// The state after the action.
    pub state: GameState,

    /// Whether the match is over (either player at 0 or less life).
    pub terminal: bool,

    /// Everything that happened, in order.
    pub events: Vec<Event>,
}

/// Apply one action with the default attack-modifier hook.
pub fn apply_action(state: &GameState, action: &Action) -> Result<Applied, EngineError> {
    apply_action_with(state, action, &RuleModifiers)
}

/// Apply one action with a caller-supplied attack-modifier hook.
///
/// The hook is invoked exactly once per declared attack, at the Attack
/// step. Fails with `IllegalAction` (state untouched) when the action is
/// not in the enumerated legal set.
pub fn apply_action_with(
    state: &GameState,
    action: &Action,
    modifier: &dyn AttackModifier,
) -> Result<Applied, EngineError> {
    let action = action.clone().canonical();

    if !enumerate_legal_actions(state).contains(&action) {
        return Err(EngineError::illegal(format!(
            "action not legal in phase {:?}, combat step {:?}",
            state.phase, state.combat.step
        )));
    }

    let actor = current_actor(state);
    let mut next = state.clone();
    let mut events = Vec::new();

    // Record first so the history entry carries the turn the action was
    // taken in; end-of-turn cleanup advances the counter.
    next.record_action(actor, action.clone());

    match state.phase {
        Phase::Start => {
            // Membership guarantees the action is Continue.
            super::turn::begin_action_phase(&mut next, &mut events);
        }
        Phase::End => match &action {
            Action::SetArsenal { card } => {
                set_arsenal(&mut next, actor, *card, &mut events)?;
                super::turn::end_turn(&mut next, &mut events);
            }
            Action::Pass => {
                events.push(Event::ArsenalPass { player: actor });
                super::turn::end_turn(&mut next, &mut events);
            }
            _ => return Err(EngineError::invariant("non-end action survived end-phase validation".to_string())),
        },
        Phase::Action => match state.combat.step {
            CombatStep::Idle => match &action {
                Action::PlayAttack { card, pitch } => {
                    declare_attack(&mut next, actor, AttackSource::Hand, Some(*card), pitch.clone())?;
                }
                Action::PlayArsenalAttack { card, pitch } => {
                    declare_attack(&mut next, actor, AttackSource::Arsenal, Some(*card), pitch.clone())?;
                }
                Action::WeaponAttack { pitch } => {
                    declare_attack(&mut next, actor, AttackSource::Weapon, None, pitch.clone())?;
                }
                Action::Pass => {
                    next.phase = Phase::End;
                    events.push(Event::EndPhase { player: actor });
                }
                _ => return Err(EngineError::invariant("non-idle action survived validation".to_string())),
            },
            CombatStep::Layer => {
                layer_pass(&mut next, actor, modifier, &mut events)?;
            }
            CombatStep::Defend => match &action {
                Action::Defend { cards } => block_play(&mut next, actor, cards, &mut events)?,
                Action::Pass => block_pass(&mut next, actor, &mut events),
                _ => return Err(EngineError::invariant("non-defend action survived validation".to_string())),
            },
            CombatStep::Reaction => {
                if next.combat.defender() == Some(actor) {
                    match &action {
                        Action::Defend { cards } => defense_react(&mut next, actor, cards, &mut events)?,
                        Action::Pass => defender_reaction_pass(&mut next, actor, &mut events),
                        _ => return Err(EngineError::invariant("bad defender reaction survived validation".to_string())),
                    }
                } else {
                    match &action {
                        Action::PlayAttackReaction { card, pitch } => {
                            attack_react(&mut next, actor, *card, pitch, &mut events)?;
                        }
                        Action::Pass => attacker_reaction_pass(&mut next, actor, &mut events)?,
                        _ => return Err(EngineError::invariant("bad attacker reaction survived validation".to_string())),
                    }
                }
            }
            CombatStep::Attack | CombatStep::Damage | CombatStep::Resolution => {
                return Err(EngineError::invariant("automatic combat step persisted between calls".to_string()));
            }
        },
    }

    verify_invariants(state, &next)?;

    Ok(Applied {
        terminal: next.is_terminal(),
        state: next,
        events,
    })
}

// === Declaration ===

/// Spend the action point and open combat at the Layer step. Cost
/// payment and card movement wait for the automatic Attack step.
fn declare_attack(
    next: &mut GameState,
    attacker: PlayerId,
    source: AttackSource,
    card: Option<CardId>,
    pitch: CardSelection,
) -> Result<(), EngineError> {
    let player = next.player_mut(attacker);
    if player.action_points == 0 {
        return Err(EngineError::illegal("no action points remaining"));
    }
    player.action_points -= 1;
    next.combat.open(attacker, AttackDeclaration { source, card, pitch });
    Ok(())
}

// === Layer ===

fn layer_pass(
    next: &mut GameState,
    actor: PlayerId,
    modifier: &dyn AttackModifier,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    next.combat.passes += 1;
    next.combat.priority = Some(actor.opponent());
    events.push(Event::LayerPass { player: actor });

    if next.combat.passes >= 2 {
        events.push(Event::LayerEnd);
        run_attack_step(next, modifier, events)?;
    }
    Ok(())
}

// === Attack (automatic) ===

fn run_attack_step(
    next: &mut GameState,
    modifier: &dyn AttackModifier,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    next.combat.step = CombatStep::Attack;

    let attacker = next
        .combat
        .attacker
        .ok_or_else(|| EngineError::invariant("attack step with no attacker"))?;
    let declaration = next
        .combat
        .declared
        .take()
        .ok_or_else(|| EngineError::invariant("attack step with no declaration"))?;

    let (cost, name) = match declaration.source {
        AttackSource::Hand | AttackSource::Arsenal => {
            let id = declaration
                .card
                .ok_or_else(|| EngineError::invariant("card attack with no card id"))?;
            let card = next
                .card(id)
                .ok_or_else(|| EngineError::invariant(format!("attack card {id} missing from card table")))?;
            (card.cost, card.name.clone())
        }
        AttackSource::Weapon => {
            let weapon = next
                .player(attacker)
                .weapon
                .as_ref()
                .ok_or_else(|| EngineError::invariant("weapon attack with no weapon equipped"))?;
            (weapon.cost, weapon.name.clone())
        }
    };

    let receipt = resources::consume(next, attacker, &declaration.pitch, cost)?;

    // The attack source leaves play: cards to the graveyard, weapons
    // only flip their used flag.
    match (declaration.source, declaration.card) {
        (AttackSource::Hand, Some(id)) | (AttackSource::Arsenal, Some(id)) => {
            let from = match declaration.source {
                AttackSource::Hand => Zone::Hand,
                _ => Zone::Arsenal,
            };
            if !next.player_mut(attacker).zones.transfer(id, from, Zone::Graveyard) {
                return Err(EngineError::invariant(format!("attack card {id} left its zone before payment")));
            }
        }
        (AttackSource::Weapon, _) => {
            if let Some(weapon) = &mut next.player_mut(attacker).weapon {
                weapon.used_this_turn = true;
            }
        }
        (_, None) => {
            return Err(EngineError::invariant("card attack with no card id"));
        }
    }

    let attacks_before = next.player(attacker).attacks_this_turn;
    let outcome = {
        let player = next.player(attacker);
        let card = declaration.card.and_then(|id| next.card(id));
        let weapon = match declaration.source {
            AttackSource::Weapon => player.weapon.as_ref(),
            _ => None,
        };
        let base_attack = card.map(|c| c.attack).or_else(|| weapon.map(|w| w.attack)).unwrap_or(0);
        modifier.on_declare(&AttackContext {
            attacker,
            hero: &player.hero,
            card,
            weapon,
            base_attack,
            pitch_sum: receipt.pitch_sum,
            attacks_this_turn: attacks_before,
        })
    };

    next.player_mut(attacker).attacks_this_turn += 1;

    let combat = &mut next.combat;
    combat.pending_attack = outcome.attack.max(0);
    combat.go_again = outcome.go_again;
    combat.last_attack_card = match declaration.source {
        AttackSource::Weapon => None,
        _ => declaration.card,
    };
    combat.last_pitch_sum = receipt.pitch_sum;

    // Fresh reaction bookkeeping before the Defend step.
    combat.reaction_block = 0;
    combat.pending_damage = 0;
    combat.arsenal_reactions.clear();
    combat.passes = 0;
    combat.priority = None;
    combat.reaction_actor = Some(attacker.opponent());
    combat.step = CombatStep::Defend;

    events.push(Event::DeclareAttack {
        player: attacker,
        card: next.combat.last_attack_card,
        name,
        attack: next.combat.pending_attack,
        cost,
        pitch: receipt.pitch_sum,
        source: declaration.source,
    });
    events.extend(outcome.events);
    Ok(())
}

// === Defend ===

fn block_play(
    next: &mut GameState,
    defender: PlayerId,
    cards: &CardSelection,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    let mut block = 0;
    for &id in cards {
        block += next
            .card(id)
            .ok_or_else(|| EngineError::invariant(format!("blocker {id} missing from card table")))?
            .defense;
    }
    for &id in cards {
        if !next.player_mut(defender).zones.transfer(id, Zone::Hand, Zone::Graveyard) {
            return Err(EngineError::invariant(format!("blocker {id} not in hand")));
        }
    }

    enter_reaction(&mut next.combat, defender, block);
    events.push(Event::BlockPlay {
        player: defender,
        cards: cards.clone(),
        block,
    });
    Ok(())
}

fn block_pass(next: &mut GameState, defender: PlayerId, events: &mut Vec<Event>) {
    enter_reaction(&mut next.combat, defender, 0);
    events.push(Event::BlockPass { player: defender });
}

/// Defend -> Reaction with the given block total; the defender acts first.
fn enter_reaction(combat: &mut CombatState, defender: PlayerId, block: i64) {
    combat.reaction_block = block;
    combat.pending_damage = 0;
    combat.arsenal_reactions.clear();
    combat.step = CombatStep::Reaction;
    combat.reaction_actor = Some(defender);
    combat.passes = 0;
    combat.priority = None;
}

// === Reaction ===

fn defense_react(
    next: &mut GameState,
    defender: PlayerId,
    cards: &CardSelection,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    // One defense reaction per action.
    let id = match cards.as_slice() {
        [id] => *id,
        _ => return Err(EngineError::invariant("multi-card defense reaction survived validation")),
    };

    let block = next
        .card(id)
        .ok_or_else(|| EngineError::invariant(format!("reaction {id} missing from card table")))?
        .defense;
    let zones = &mut next.player_mut(defender).zones;
    let source = if zones.transfer(id, Zone::Hand, Zone::Graveyard) {
        AttackSource::Hand
    } else if zones.transfer(id, Zone::Arsenal, Zone::Graveyard) {
        AttackSource::Arsenal
    } else {
        return Err(EngineError::invariant(format!("reaction {id} in neither hand nor arsenal")));
    };

    let combat = &mut next.combat;
    if source == AttackSource::Arsenal {
        combat.arsenal_reactions.push(id);
    }
    combat.reaction_block += block;
    combat.passes = 0;
    // The defender keeps priority after acting.
    combat.reaction_actor = Some(defender);

    events.push(Event::DefenseReactPlay {
        player: defender,
        card: id,
        block,
        source,
    });
    Ok(())
}

fn defender_reaction_pass(next: &mut GameState, defender: PlayerId, events: &mut Vec<Event>) {
    next.combat.passes = 1;
    next.combat.reaction_actor = Some(defender.opponent());
    events.push(Event::ReactionPass { player: defender });
}

fn attack_react(
    next: &mut GameState,
    attacker: PlayerId,
    id: CardId,
    pitch: &CardSelection,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    let (cost, bonus) = {
        let card = next
            .card(id)
            .ok_or_else(|| EngineError::invariant(format!("reaction {id} missing from card table")))?;
        (card.cost, card.attack)
    };

    let receipt = resources::consume(next, attacker, pitch, cost)?;

    let zones = &mut next.player_mut(attacker).zones;
    let source = if zones.transfer(id, Zone::Hand, Zone::Graveyard) {
        AttackSource::Hand
    } else if zones.transfer(id, Zone::Arsenal, Zone::Graveyard) {
        AttackSource::Arsenal
    } else {
        return Err(EngineError::invariant(format!("reaction {id} in neither hand nor arsenal")));
    };

    let combat = &mut next.combat;
    combat.pending_attack += bonus;
    combat.passes = 0;
    combat.reaction_actor = Some(attacker.opponent());

    events.push(Event::AttackReact {
        player: attacker,
        card: id,
        bonus,
        pitch: receipt.pitch_sum,
        source,
    });
    Ok(())
}

fn attacker_reaction_pass(
    next: &mut GameState,
    attacker: PlayerId,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    events.push(Event::ReactionPass { player: attacker });

    if next.combat.passes >= 1 {
        // Second consecutive pass closes the window.
        resolve_combat(next, events)
    } else {
        // A first-pass from the attacker makes no progress toward
        // closing: the counter stays 0 and the defender acts again.
        next.combat.reaction_actor = Some(attacker.opponent());
        Ok(())
    }
}

// === Damage + Resolution (automatic) ===

fn resolve_combat(next: &mut GameState, events: &mut Vec<Event>) -> Result<(), EngineError> {
    let combat = &mut next.combat;
    combat.step = CombatStep::Damage;

    let attacker = combat
        .attacker
        .ok_or_else(|| EngineError::invariant("damage step with no attacker"))?;
    let defender = attacker.opponent();

    let damage = (combat.pending_attack - combat.reaction_block).max(0);
    combat.pending_damage = damage;
    combat.hit = damage > 0;
    combat.step = CombatStep::Resolution;

    let block = combat.reaction_block;
    let go_again = combat.go_again;
    let hit = combat.hit;
    let arsenal_reactions = combat.arsenal_reactions.clone();

    next.player_mut(defender).life -= damage;
    let life_after = next.player(defender).life;
    if go_again {
        next.player_mut(attacker).action_points += 1;
    }

    events.push(Event::DefenseResolve {
        block,
        damage,
        life_after,
        arsenal_reactions,
        go_again,
        hit,
    });

    next.combat.clear();
    Ok(())
}

// === End phase ===

fn set_arsenal(
    next: &mut GameState,
    player: PlayerId,
    card: CardId,
    events: &mut Vec<Event>,
) -> Result<(), EngineError> {
    let zones = &mut next.player_mut(player).zones;
    if !zones.arsenal.is_empty() {
        return Err(EngineError::illegal("arsenal slot is occupied"));
    }
    if !zones.transfer(card, Zone::Hand, Zone::Arsenal) {
        return Err(EngineError::invariant(format!("arsenal card {card} not in hand")));
    }
    events.push(Event::SetArsenal { player, card });
    Ok(())
}

// === Invariants ===

/// Check the state invariants that must hold after every application.
fn verify_invariants(before: &GameState, after: &GameState) -> Result<(), EngineError> {
    for id in PlayerId::both() {
        let counted_before = before.player(id).zones.card_count();
        let counted_after = after.player(id).zones.card_count();
        if counted_before != counted_after {
            return Err(EngineError::invariant(format!(
                "{id} zone card count changed {counted_before} -> {counted_after}"
            )));
        }
        if after.player(id).floating < 0 {
            return Err(EngineError::invariant(format!("{id} floating resources negative")));
        }
        if after.player(id).zones.arsenal.len() > 1 {
            return Err(EngineError::invariant(format!("{id} arsenal holds more than one card")));
        }
    }

    let combat = &after.combat;
    if combat.passes > 1 {
        return Err(EngineError::invariant("pass counter above 1"));
    }
    if combat.pending_damage < 0 {
        return Err(EngineError::invariant("negative pending damage"));
    }
    if combat.is_idle() && *combat != CombatState::idle() {
        return Err(EngineError::invariant("idle combat with residual fields"));
    }
    if matches!(combat.step, CombatStep::Attack | CombatStep::Damage | CombatStep::Resolution) {
        return Err(EngineError::invariant("automatic combat step persisted"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::GameConfig;

    fn action_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 0);
        state.phase = Phase::Action;
        state.player_mut(PlayerId::new(0)).action_points = 1;
        state
    }

    fn add_to_hand(state: &mut GameState, player: PlayerId, card: Card) -> CardId {
        let id = state.register_card(card);
        state.player_mut(player).zones.hand.push(id);
        id
    }

    #[test]
    fn test_illegal_action_leaves_state_untouched() {
        let state = GameState::new(GameConfig::default(), 0);
        let snapshot = state.snapshot().unwrap();

        let err = apply_action(&state, &Action::Pass).unwrap_err();

        assert!(matches!(err, EngineError::IllegalAction { .. }));
        assert_eq!(state.snapshot().unwrap(), snapshot);
    }

    #[test]
    fn test_continue_enters_action_phase() {
        let state = GameState::new(GameConfig::default(), 0);

        let applied = apply_action(&state, &Action::Continue).unwrap();

        assert_eq!(applied.state.phase, Phase::Action);
        assert_eq!(applied.state.active_player().action_points, 1);
        assert!(!applied.terminal);
    }

    #[test]
    fn test_declaration_opens_layer_without_payment() {
        let mut state = action_state();
        let attack = add_to_hand(&mut state, PlayerId::new(0), Card::new("Strike", 1, 4, 0, 1));
        let res = add_to_hand(&mut state, PlayerId::new(0), Card::new("Res", 0, 0, 2, 2));

        let action = Action::PlayAttack { card: attack, pitch: CardSelection::from_slice(&[res]) };
        let applied = apply_action(&state, &action).unwrap();

        let next = &applied.state;
        assert_eq!(next.combat.step, CombatStep::Layer);
        assert_eq!(next.combat.priority, Some(PlayerId::new(0)));
        assert_eq!(next.active_player().action_points, 0);
        // Nothing paid or moved yet
        assert_eq!(next.player(PlayerId::new(0)).zones.hand.len(), 2);
        assert!(applied.events.is_empty());
    }

    #[test]
    fn test_layer_close_pays_and_reaches_defend() {
        let mut state = action_state();
        let attack = add_to_hand(&mut state, PlayerId::new(0), Card::new("Strike", 1, 4, 0, 1));
        let res = add_to_hand(&mut state, PlayerId::new(0), Card::new("Res", 0, 0, 2, 2));

        let declared = apply_action(
            &state,
            &Action::PlayAttack { card: attack, pitch: CardSelection::from_slice(&[res]) },
        )
        .unwrap()
        .state;
        let after_first = apply_action(&declared, &Action::Pass).unwrap().state;
        let applied = apply_action(&after_first, &Action::Pass).unwrap();

        let next = &applied.state;
        assert_eq!(next.combat.step, CombatStep::Defend);
        assert_eq!(next.combat.pending_attack, 4);
        assert_eq!(next.combat.last_pitch_sum, 2);
        // Attack card in graveyard, pitch card in pitched, overpitch floats
        assert_eq!(next.player(PlayerId::new(0)).zones.graveyard, vec![attack]);
        assert_eq!(next.player(PlayerId::new(0)).zones.pitched, vec![res]);
        assert_eq!(next.player(PlayerId::new(0)).floating, 1);
        assert!(applied.events.contains(&Event::LayerEnd));
    }

    #[test]
    fn test_action_pass_moves_to_end_phase() {
        let state = action_state();

        let applied = apply_action(&state, &Action::Pass).unwrap();

        assert_eq!(applied.state.phase, Phase::End);
        assert_eq!(applied.events, vec![Event::EndPhase { player: PlayerId::new(0) }]);
    }

    #[test]
    fn test_set_arsenal_then_turn_flips() {
        let mut state = action_state();
        state.phase = Phase::End;
        let id = add_to_hand(&mut state, PlayerId::new(0), Card::new("Held", 0, 3, 0, 1));

        let applied = apply_action(&state, &Action::SetArsenal { card: id }).unwrap();

        let next = &applied.state;
        assert_eq!(next.player(PlayerId::new(0)).zones.arsenal, vec![id]);
        assert_eq!(next.active, PlayerId::new(1));
        assert_eq!(next.phase, Phase::Start);
        assert_eq!(next.turn, 2);
    }

    #[test]
    fn test_history_records_actions() {
        let state = GameState::new(GameConfig::default(), 0);

        let applied = apply_action(&state, &Action::Continue).unwrap();

        assert_eq!(applied.state.history.len(), 1);
        assert_eq!(applied.state.history[0].action, Action::Continue);
        assert_eq!(applied.state.history[0].player, PlayerId::new(0));
    }
}
