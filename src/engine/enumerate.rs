//! Legal-action enumeration.
//!
//! `enumerate_legal_actions` is a pure query: it branches only on the
//! current phase, combat step and priority holder, and never mutates
//! anything. It is sound and exhaustive with respect to the executor:
//! every returned action is accepted, and the executor accepts nothing
//! else (it checks membership in this set before mutating).
//!
//! ## Selection enumeration
//!
//! Pitch choices enumerate every *minimal cover*: a set of hand cards
//! whose pitch value meets the cost left after floating resources, and
//! from which no card could be dropped while still meeting it. Block
//! choices enumerate every subset of eligible blockers up to the
//! configured cap. Both are exponential in hand size by nature; hands are
//! bounded by the hand-size limit.

use smallvec::smallvec;

use crate::cards::CardId;
use crate::combat::CombatStep;
use crate::core::{Action, CardSelection, GameState, Phase, PlayerId};

/// Enumerate every legal action in the current state.
///
/// Returns an empty vec once the match is terminal.
#[must_use]
pub fn enumerate_legal_actions(state: &GameState) -> Vec<Action> {
    ActionEnumerator::new(state).enumerate()
}

/// The player the enumerated actions belong to.
#[must_use]
pub fn current_actor(state: &GameState) -> PlayerId {
    let active = state.active;
    match state.phase {
        Phase::Start | Phase::End => active,
        Phase::Action => match state.combat.step {
            CombatStep::Idle => active,
            CombatStep::Layer => state.combat.priority.unwrap_or(active),
            CombatStep::Defend => state.combat.defender().unwrap_or_else(|| active.opponent()),
            CombatStep::Reaction => state.combat.reaction_actor.unwrap_or_else(|| active.opponent()),
            // Automatic steps never persist between calls.
            CombatStep::Attack | CombatStep::Damage | CombatStep::Resolution => active,
        },
    }
}

/// Branching logic for legal-action generation.
pub struct ActionEnumerator<'a> {
    state: &'a GameState,
}

impl<'a> ActionEnumerator<'a> {
    /// Create an enumerator over a state.
    #[must_use]
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Generate all legal actions.
    #[must_use]
    pub fn enumerate(&self) -> Vec<Action> {
        if self.state.is_terminal() {
            return Vec::new();
        }

        match self.state.phase {
            Phase::Start => vec![Action::Continue],
            Phase::End => self.end_actions(),
            Phase::Action => match self.state.combat.step {
                CombatStep::Idle => self.attacker_actions(),
                CombatStep::Layer => vec![Action::Pass],
                CombatStep::Defend => self.block_actions(),
                CombatStep::Reaction => self.reaction_actions(),
                // Automatic steps resolve inside the apply call that
                // entered them; no state is ever enumerable here.
                CombatStep::Attack | CombatStep::Damage | CombatStep::Resolution => Vec::new(),
            },
        }
    }

    // === Action phase, combat idle ===

    fn attacker_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        let player = self.state.active_player();

        if player.action_points > 0 {
            let floating = player.floating;
            let hand = &player.zones.hand;

            for &id in hand {
                let card = match self.state.card(id) {
                    Some(c) if c.is_attack() => c,
                    _ => continue,
                };
                let pool: Vec<CardId> = hand.iter().copied().filter(|&c| c != id).collect();
                for pitch in self.pitch_selections(&pool, card.cost, floating) {
                    actions.push(Action::PlayAttack { card: id, pitch });
                }
            }

            for &id in &player.zones.arsenal {
                let card = match self.state.card(id) {
                    Some(c) if c.is_attack() => c,
                    _ => continue,
                };
                for pitch in self.pitch_selections(hand, card.cost, floating) {
                    actions.push(Action::PlayArsenalAttack { card: id, pitch });
                }
            }

            if let Some(weapon) = &player.weapon {
                if weapon.can_attack() {
                    for pitch in self.pitch_selections(hand, weapon.cost, floating) {
                        actions.push(Action::WeaponAttack { pitch });
                    }
                }
            }
        }

        actions.push(Action::Pass);
        actions
    }

    // === Defend step ===

    fn block_actions(&self) -> Vec<Action> {
        let defender = match self.state.combat.defender() {
            Some(d) => d,
            None => return vec![Action::Pass],
        };

        let eligible: Vec<CardId> = self
            .state
            .player(defender)
            .zones
            .hand
            .iter()
            .copied()
            .filter(|&id| self.state.card(id).is_some_and(|c| c.is_blocker()))
            .collect();

        let mut actions = vec![Action::Pass];
        for cards in subsets_up_to(&eligible, self.state.config.defend_max) {
            actions.push(Action::Defend { cards });
        }
        actions
    }

    // === Reaction step ===

    fn reaction_actions(&self) -> Vec<Action> {
        let combat = &self.state.combat;
        let actor = match combat.reaction_actor {
            Some(a) => a,
            None => return vec![Action::Pass],
        };

        if combat.defender() == Some(actor) {
            self.defense_reaction_actions(actor)
        } else {
            self.attack_reaction_actions(actor)
        }
    }

    fn defense_reaction_actions(&self, actor: PlayerId) -> Vec<Action> {
        let zones = &self.state.player(actor).zones;
        let mut actions = Vec::new();

        for &id in zones.hand.iter().chain(&zones.arsenal) {
            if self
                .state
                .card(id)
                .is_some_and(|c| c.is_defense() && c.is_defense_reaction())
            {
                actions.push(Action::Defend { cards: smallvec![id] });
            }
        }

        actions.push(Action::Pass);
        actions
    }

    fn attack_reaction_actions(&self, actor: PlayerId) -> Vec<Action> {
        // Attack reactions chain onto an attack card; a weapon swing
        // offers nothing to react onto.
        if self.state.combat.last_attack_card.is_none() {
            return vec![Action::Pass];
        }

        let player = self.state.player(actor);
        let floating = player.floating;
        let hand = &player.zones.hand;
        let mut actions = Vec::new();

        for &id in hand {
            let card = match self.state.card(id) {
                Some(c) if c.is_attack_reaction() => c,
                _ => continue,
            };
            let pool: Vec<CardId> = hand.iter().copied().filter(|&c| c != id).collect();
            for pitch in self.pitch_selections(&pool, card.cost, floating) {
                actions.push(Action::PlayAttackReaction { card: id, pitch });
            }
        }

        for &id in &player.zones.arsenal {
            let card = match self.state.card(id) {
                Some(c) if c.is_attack_reaction() => c,
                _ => continue,
            };
            for pitch in self.pitch_selections(hand, card.cost, floating) {
                actions.push(Action::PlayAttackReaction { card: id, pitch });
            }
        }

        actions.push(Action::Pass);
        actions
    }

    // === End phase ===

    fn end_actions(&self) -> Vec<Action> {
        let player = self.state.active_player();
        let mut actions = Vec::new();

        if player.zones.arsenal.is_empty() {
            for &id in &player.zones.hand {
                actions.push(Action::SetArsenal { card: id });
            }
        }

        actions.push(Action::Pass);
        actions
    }

    // === Pitch selection ===

    /// All minimal pitch selections from `pool` covering `cost` after
    /// floating resources. A zero remaining cost yields one empty
    /// selection; an uncoverable cost yields none, which is what keeps
    /// unaffordable attacks out of the legal set.
    fn pitch_selections(&self, pool: &[CardId], cost: i64, floating: i64) -> Vec<CardSelection> {
        let needed = (cost - floating).max(0);
        if needed == 0 {
            return vec![CardSelection::new()];
        }

        let cap = self.state.config.max_pitch_cards.unwrap_or(pool.len()).min(pool.len());
        let pitches: Vec<i64> = pool
            .iter()
            .map(|&id| self.state.card(id).map_or(0, |c| c.pitch))
            .collect();

        let mut selections = Vec::new();
        for mask in 1u32..(1u32 << pool.len()) {
            if mask.count_ones() as usize > cap {
                continue;
            }
            let sum: i64 = pitches
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &p)| p)
                .sum();
            if sum < needed {
                continue;
            }
            // Minimal cover: dropping any selected card must break it.
            let minimal = (0..pool.len())
                .filter(|&i| mask & (1 << i) != 0)
                .all(|i| sum - pitches[i] < needed);
            if !minimal {
                continue;
            }
            let mut selection: CardSelection = (0..pool.len())
                .filter(|&i| mask & (1 << i) != 0)
                .map(|i| pool[i])
                .collect();
            selection.sort_unstable();
            selections.push(selection);
        }
        selections
    }
}

/// Non-empty subsets of `pool` with at most `cap` elements, each in
/// canonical sorted order.
fn subsets_up_to(pool: &[CardId], cap: usize) -> Vec<CardSelection> {
    let cap = cap.min(pool.len());
    let mut subsets = Vec::new();
    if cap == 0 {
        return subsets;
    }
    for mask in 1u32..(1u32 << pool.len()) {
        if mask.count_ones() as usize > cap {
            continue;
        }
        let mut subset: CardSelection = (0..pool.len())
            .filter(|&i| mask & (1 << i) != 0)
            .map(|i| pool[i])
            .collect();
        subset.sort_unstable();
        subsets.push(subset);
    }
    subsets
}
