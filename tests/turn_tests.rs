//! Turn phase controller integration tests.
//!
//! Cover the Start -> Action -> End -> Start cycle: start-of-turn draw
//! and action point grant, leaving the Action phase, arsenal staging,
//! and end-of-turn cleanup.

use duel_engine::{
    apply_action, enumerate_legal_actions, Action, Card, CardId, CardSelection, EngineError,
    Event, GameConfig, GameState, Phase, PlayerId, Weapon,
};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn add_deck(state: &mut GameState, player: PlayerId, card: Card) -> CardId {
    let id = state.register_card(card);
    state.player_mut(player).zones.deck.push(id);
    id
}

fn add_hand(state: &mut GameState, player: PlayerId, card: Card) -> CardId {
    let id = state.register_card(card);
    state.player_mut(player).zones.hand.push(id);
    id
}

fn apply(state: &GameState, action: Action) -> (GameState, Vec<Event>) {
    let applied = apply_action(state, &action).expect("legal action");
    (applied.state, applied.events)
}

// =============================================================================
// Start Phase
// =============================================================================

/// Start of turn admits only CONTINUE.
#[test]
fn test_start_phase_continue_only() {
    let state = GameState::new(GameConfig::default(), 0);

    assert_eq!(enumerate_legal_actions(&state), vec![Action::Continue]);

    let err = apply_action(&state, &Action::Pass).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
}

/// CONTINUE draws up to the hand-size limit and grants one action point.
#[test]
fn test_continue_draws_and_grants_point() {
    let mut state = GameState::new(GameConfig::default(), 0);
    for _ in 0..6 {
        add_deck(&mut state, P0, Card::new("Filler", 0, 0, 2, 1));
    }

    let (state, events) = apply(&state, Action::Continue);

    assert_eq!(state.phase, Phase::Action);
    assert_eq!(state.player(P0).zones.hand.len(), 4);
    assert_eq!(state.player(P0).zones.deck.len(), 2);
    assert_eq!(state.player(P0).action_points, 1);
    assert!(state.combat.is_idle());
    assert_eq!(events, vec![Event::TurnStart { player: P0, turn: 1, drawn: 4 }]);
}

/// A short deck just draws what it can.
#[test]
fn test_continue_with_short_deck() {
    let mut state = GameState::new(GameConfig::default(), 0);
    add_deck(&mut state, P0, Card::new("Last", 0, 0, 2, 1));

    let (state, _) = apply(&state, Action::Continue);

    assert_eq!(state.player(P0).zones.hand.len(), 1);
    assert!(state.player(P0).zones.deck.is_empty());
}

// =============================================================================
// Action Phase exit
// =============================================================================

/// PASS with combat idle leaves the Action phase for End.
#[test]
fn test_action_pass_enters_end_phase() {
    let mut state = GameState::new(GameConfig::default(), 0);
    state.phase = Phase::Action;
    state.player_mut(P0).action_points = 1;

    let (state, events) = apply(&state, Action::Pass);

    assert_eq!(state.phase, Phase::End);
    assert_eq!(events, vec![Event::EndPhase { player: P0 }]);
}

/// Zero action points forbids declaring; the enumeration offers only
/// PASS even with attackable cards in hand.
#[test]
fn test_no_action_points_no_declaration() {
    let mut state = GameState::new(GameConfig::default(), 0);
    state.phase = Phase::Action;
    let attack = add_hand(&mut state, P0, Card::new("Strike", 0, 4, 0, 1));

    assert_eq!(enumerate_legal_actions(&state), vec![Action::Pass]);

    let err = apply_action(&state, &Action::PlayAttack { card: attack, pitch: CardSelection::new() }).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
}

// =============================================================================
// End Phase
// =============================================================================

fn end_phase_state() -> GameState {
    let mut state = GameState::new(GameConfig::default(), 0);
    state.phase = Phase::End;
    state
}

/// SET_ARSENAL stages a hand card into the empty slot and ends the turn.
#[test]
fn test_set_arsenal_stages_card() {
    let mut state = end_phase_state();
    let kept = add_hand(&mut state, P0, Card::new("Held Strike", 0, 4, 0, 1));

    let (state, events) = apply(&state, Action::SetArsenal { card: kept });

    assert_eq!(state.player(P0).zones.arsenal, vec![kept]);
    assert!(state.player(P0).zones.hand.is_empty());
    assert_eq!(state.active, P1);
    assert_eq!(state.phase, Phase::Start);
    assert!(events.contains(&Event::SetArsenal { player: P0, card: kept }));
}

/// An occupied slot cannot be set again this turn.
#[test]
fn test_set_arsenal_once_only() {
    let mut state = end_phase_state();
    let held = state.register_card(Card::new("Old", 0, 3, 0, 1));
    state.player_mut(P0).zones.arsenal.push(held);
    let candidate = add_hand(&mut state, P0, Card::new("New", 0, 4, 0, 1));

    assert_eq!(enumerate_legal_actions(&state), vec![Action::Pass]);

    let err = apply_action(&state, &Action::SetArsenal { card: candidate }).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction { .. }));
}

/// Cleanup: pitched cards go to the deck bottom in pitch order, the hand
/// refills, floating resets, weapon flags reset, and the turn flips.
#[test]
fn test_end_turn_cleanup() {
    let mut state = end_phase_state();
    let deep = add_deck(&mut state, P0, Card::new("Deep", 0, 0, 2, 1));
    let pitched_first = state.register_card(Card::new("First Pitch", 0, 0, 2, 1));
    let pitched_second = state.register_card(Card::new("Second Pitch", 0, 0, 2, 1));
    state.player_mut(P0).zones.pitched.push(pitched_first);
    state.player_mut(P0).zones.pitched.push(pitched_second);
    state.player_mut(P0).floating = 2;
    state.player_mut(P0).attacks_this_turn = 1;
    state.player_mut(P0).weapon = Some(Weapon::new("Blade", 3, 0));
    state.player_mut(P0).weapon.as_mut().unwrap().used_this_turn = true;

    let (state, events) = apply(&state, Action::Pass);

    assert_eq!(state.turn, 2);
    assert_eq!(state.active, P1);
    assert_eq!(state.phase, Phase::Start);

    let p0 = state.player(P0);
    assert_eq!(p0.floating, 0);
    assert_eq!(p0.attacks_this_turn, 0);
    assert!(!p0.weapon.as_ref().unwrap().used_this_turn);
    assert!(p0.zones.pitched.is_empty());
    // Bottomed pitched cards then drew back up to the limit: all three
    // cards end in hand, and the bottoming order put first-pitched deepest.
    assert_eq!(p0.zones.hand, vec![deep, pitched_second, pitched_first]);

    assert!(events.contains(&Event::ArsenalPass { player: P0 }));
    assert!(events.contains(&Event::TurnEnd { player: P0, next: P1, turn: 2 }));
}

/// The active player flips only on the End -> Start edge.
#[test]
fn test_full_turn_cycle_alternates_players() {
    let mut state = GameState::new(GameConfig::default(), 0);
    for _ in 0..4 {
        add_deck(&mut state, P0, Card::new("Filler", 0, 0, 2, 1));
        add_deck(&mut state, P1, Card::new("Filler", 0, 0, 2, 1));
    }

    assert_eq!(state.active, P0);
    let (state, _) = apply(&state, Action::Continue);
    assert_eq!(state.active, P0);
    let (state, _) = apply(&state, Action::Pass); // Action -> End
    assert_eq!(state.active, P0);
    let (state, _) = apply(&state, Action::Pass); // End -> Start, flip
    assert_eq!(state.active, P1);
    assert_eq!(state.turn, 2);

    let (state, _) = apply(&state, Action::Continue);
    let (state, _) = apply(&state, Action::Pass);
    let (state, _) = apply(&state, Action::Pass);
    assert_eq!(state.active, P0);
    assert_eq!(state.turn, 3);
}

/// Out-of-phase actions fail without mutating anything.
#[test]
fn test_out_of_phase_actions_rejected() {
    let mut state = GameState::new(GameConfig::default(), 0);
    let card = add_hand(&mut state, P0, Card::new("Guard", 0, 0, 2, 1));
    let snapshot = state.snapshot().unwrap();

    for action in [
        Action::Pass,
        Action::Defend { cards: CardSelection::from_slice(&[card]) },
        Action::SetArsenal { card },
        Action::PlayAttack { card, pitch: CardSelection::new() },
    ] {
        let err = apply_action(&state, &action).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
    }

    assert_eq!(state.snapshot().unwrap(), snapshot);
}
