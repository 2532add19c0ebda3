//! Per-player zones and card movement.
//!
//! Each player owns five ordered zones. Zones hold `CardId`s only; the
//! card data itself lives in the match's card table.
//!
//! - **Deck**: face-down draw pile. Index 0 is the bottom, the last index
//!   is the top.
//! - **Hand**: private hand.
//! - **Arsenal**: single face-down staging slot, settable once per turn.
//! - **Graveyard**: discard pile for played and blocked cards.
//! - **Pitched**: cards pitched this turn; returned to the deck bottom at
//!   end-of-turn cleanup, order preserved.
//!
//! Card movement between zones conserves the per-player card count. The
//! executor verifies that after every applied action.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A zone a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Deck,
    Hand,
    Arsenal,
    Graveyard,
    Pitched,
}

/// One player's five zones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSet {
    /// Draw pile; top of deck is the end of the vec.
    pub deck: Vec<CardId>,
    pub hand: Vec<CardId>,
    /// Single slot; at most one card.
    pub arsenal: Vec<CardId>,
    pub graveyard: Vec<CardId>,
    /// Pitched this turn, in pitch order.
    pub pitched: Vec<CardId>,
}

impl ZoneSet {
    /// Create an empty zone set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cards in a zone, in order.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &[CardId] {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Arsenal => &self.arsenal,
            Zone::Graveyard => &self.graveyard,
            Zone::Pitched => &self.pitched,
        }
    }

    fn zone_mut(&mut self, zone: Zone) -> &mut Vec<CardId> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Arsenal => &mut self.arsenal,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Pitched => &mut self.pitched,
        }
    }

    /// Find which zone holds a card.
    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<Zone> {
        const ALL: [Zone; 5] = [Zone::Deck, Zone::Hand, Zone::Arsenal, Zone::Graveyard, Zone::Pitched];
        ALL.into_iter().find(|&z| self.zone(z).contains(&card))
    }

    /// Remove a card from a zone.
    ///
    /// Returns false if the card was not there; the zone is unchanged.
    pub fn remove(&mut self, zone: Zone, card: CardId) -> bool {
        let cards = self.zone_mut(zone);
        if let Some(pos) = cards.iter().position(|&c| c == card) {
            cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Append a card to the end of a zone.
    pub fn push(&mut self, zone: Zone, card: CardId) {
        self.zone_mut(zone).push(card);
    }

    /// Move a card between two zones of this set.
    ///
    /// Returns false (and changes nothing) if the card is not in `from`.
    pub fn transfer(&mut self, card: CardId, from: Zone, to: Zone) -> bool {
        if self.remove(from, card) {
            self.push(to, card);
            true
        } else {
            false
        }
    }

    /// Draw the top card of the deck into hand.
    ///
    /// Returns the drawn card, or None if the deck is empty.
    pub fn draw(&mut self) -> Option<CardId> {
        let card = self.deck.pop()?;
        self.hand.push(card);
        Some(card)
    }

    /// Draw until the hand holds `limit` cards or the deck runs out.
    ///
    /// Returns the number of cards drawn.
    pub fn draw_up_to(&mut self, limit: usize) -> u32 {
        let mut drawn = 0;
        while self.hand.len() < limit && self.draw().is_some() {
            drawn += 1;
        }
        drawn
    }

    /// Return all pitched cards to the bottom of the deck, preserving
    /// pitch order (first pitched ends up deepest).
    pub fn bottom_pitched_to_deck(&mut self) {
        for (i, card) in self.pitched.drain(..).enumerate() {
            self.deck.insert(i, card);
        }
    }

    /// Total cards across all five zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.hand.len() + self.arsenal.len() + self.graveyard.len() + self.pitched.len()
    }
}
