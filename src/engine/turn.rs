//! Turn phase transitions.
//!
//! The phase machine cycles Start -> Action -> End -> Start; the active
//! player flips only on the End -> Start edge. The executor dispatches
//! here for the two transitions that touch more than the phase field.

use crate::core::{GameState, Phase};
use crate::events::Event;

/// Start -> Action: draw up to the hand-size limit, grant one action
/// point, make sure no combat is pending.
pub(crate) fn begin_action_phase(state: &mut GameState, events: &mut Vec<Event>) {
    let active = state.active;
    let limit = state.config.hand_size;

    let drawn = state.player_mut(active).zones.draw_up_to(limit);
    state.player_mut(active).action_points = 1;
    state.phase = Phase::Action;
    state.combat.clear();

    events.push(Event::TurnStart {
        player: active,
        turn: state.turn,
        drawn,
    });
}

/// End -> Start: end-of-turn cleanup, then flip the active player.
///
/// Cleanup order: pitched cards to the deck bottom (pitch order
/// preserved), draw up to the hand-size limit, floating reset, weapon and
/// attack counters reset, reaction bookkeeping cleared.
pub(crate) fn end_turn(state: &mut GameState, events: &mut Vec<Event>) {
    let current = state.active;
    let next = current.opponent();
    let limit = state.config.hand_size;

    let player = state.player_mut(current);
    player.zones.bottom_pitched_to_deck();
    player.zones.draw_up_to(limit);
    player.floating = 0;
    player.action_points = 0;
    player.attacks_this_turn = 0;
    if let Some(weapon) = &mut player.weapon {
        weapon.used_this_turn = false;
    }

    state.combat.clear();
    state.player_mut(next).floating = 0;
    state.turn += 1;
    state.active = next;
    state.phase = Phase::Start;
    state.reset_sequence();

    events.push(Event::TurnEnd {
        player: current,
        next,
        turn: state.turn,
    });
}
