//! Match setup.
//!
//! `GameBuilder` assembles an initial `GameState` from pre-validated
//! decks, heroes and weapons: cards get their physical ids, each deck is
//! shuffled with the match seed, opening hands are dealt, and the state
//! starts at the Start phase of turn 1 with player 0 active.
//!
//! `demo_deck` generates the small attack/defense deck used by self-play
//! smoke tests; real decks come from the external loader.

use crate::cards::{Card, Hero, Keyword, Weapon};
use crate::core::{GameConfig, GameRng, GameState, PlayerId};

/// Builder for an initial match state.
pub struct GameBuilder {
    config: GameConfig,
    decks: [Vec<Card>; 2],
    heroes: [Hero; 2],
    weapons: [Option<Weapon>; 2],
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    /// Start from the default configuration with empty decks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            decks: [Vec::new(), Vec::new()],
            heroes: [Hero::default(), Hero::default()],
            weapons: [None, None],
        }
    }

    /// Set the starting life total.
    #[must_use]
    pub fn starting_life(mut self, life: i64) -> Self {
        self.config.starting_life = life;
        self
    }

    /// Set the hand-size limit.
    #[must_use]
    pub fn hand_size(mut self, limit: usize) -> Self {
        self.config.hand_size = limit;
        self
    }

    /// Set the block-size cap.
    #[must_use]
    pub fn defend_max(mut self, cap: usize) -> Self {
        self.config.defend_max = cap;
        self
    }

    /// Cap enumerated pitch selections at this many cards.
    #[must_use]
    pub fn max_pitch_cards(mut self, cap: usize) -> Self {
        self.config.max_pitch_cards = Some(cap);
        self
    }

    /// Set a player's deck.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, cards: Vec<Card>) -> Self {
        self.decks[player.index()] = cards;
        self
    }

    /// Set a player's hero.
    #[must_use]
    pub fn hero(mut self, player: PlayerId, hero: Hero) -> Self {
        self.heroes[player.index()] = hero;
        self
    }

    /// Equip a player's weapon.
    #[must_use]
    pub fn weapon(mut self, player: PlayerId, weapon: Weapon) -> Self {
        self.weapons[player.index()] = Some(weapon);
        self
    }

    /// Build the initial state: register and shuffle decks, deal opening
    /// hands, start at turn 1 with player 0 active.
    #[must_use]
    pub fn build(self, seed: u64) -> GameState {
        let mut state = GameState::new(self.config, seed);
        let hand_size = self.config.hand_size;

        let [deck0, deck1] = self.decks;
        let [hero0, hero1] = self.heroes;
        let [weapon0, weapon1] = self.weapons;

        for (player, deck, hero, weapon) in [
            (PlayerId::new(0), deck0, hero0, weapon0),
            (PlayerId::new(1), deck1, hero1, weapon1),
        ] {
            state.player_mut(player).hero = hero;
            state.player_mut(player).weapon = weapon;

            for card in deck {
                let id = state.register_card(card);
                state.player_mut(player).zones.deck.push(id);
            }

            // Split the deck out so the state's own RNG can shuffle it.
            let mut deck_ids = std::mem::take(&mut state.player_mut(player).zones.deck);
            state.rng.shuffle(&mut deck_ids);
            state.player_mut(player).zones.deck = deck_ids;

            state.player_mut(player).zones.draw_up_to(hand_size);
        }

        state
    }
}

/// Generate a small shuffled test deck: eight attack cards and eight
/// defense cards with varied costs, values and pitch.
#[must_use]
pub fn demo_deck(rng: &mut GameRng) -> Vec<Card> {
    const COSTS: [i64; 3] = [1, 2, 3];
    const ATTACKS: [i64; 4] = [3, 4, 5, 6];
    const DEFENSES: [i64; 2] = [2, 3];
    const PITCHES: [i64; 3] = [1, 2, 3];

    let mut deck = Vec::with_capacity(16);

    for _ in 0..8 {
        let cost = *rng.choose(&COSTS).expect("non-empty");
        let attack = *rng.choose(&ATTACKS).expect("non-empty");
        let defense = *rng.choose(&DEFENSES).expect("non-empty");
        let pitch = *rng.choose(&PITCHES).expect("non-empty");
        deck.push(Card::new(
            format!("Assault {cost}c{attack}a"),
            cost,
            attack,
            defense,
            pitch,
        ));
    }

    for i in 0..8 {
        let defense = *rng.choose(&DEFENSES).expect("non-empty");
        let pitch = *rng.choose(&PITCHES).expect("non-empty");
        deck.push(Card::new(format!("Guard {}", i + 1), 0, 0, defense, pitch));
    }

    rng.shuffle(&mut deck);
    deck
}

/// A demo deck with a couple of reaction cards mixed in, for exercising
/// the Reaction step in tests.
#[must_use]
pub fn demo_deck_with_reactions(rng: &mut GameRng) -> Vec<Card> {
    let mut deck = demo_deck(rng);
    deck.truncate(12);
    deck.push(Card::new("Counterguard", 0, 0, 3, 1).with_keyword(Keyword::DefenseReaction));
    deck.push(Card::new("Counterguard", 0, 0, 3, 1).with_keyword(Keyword::DefenseReaction));
    deck.push(Card::new("Followthrough", 0, 2, 0, 1).with_keyword(Keyword::AttackReaction));
    deck.push(Card::new("Followthrough", 0, 2, 0, 1).with_keyword(Keyword::AttackReaction));
    rng.shuffle(&mut deck);
    deck
}
