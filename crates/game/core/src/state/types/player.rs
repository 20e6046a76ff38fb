use std::collections::BTreeSet;

use super::{CardId, PlayerId, TerritoryId};

/// Mutable state of a single player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,

    /// Troops granted but not yet placed on the board.
    pub troops_remaining: u32,

    /// Cards in hand, in the order they were acquired.
    pub cards: Vec<CardId>,

    pub alive: bool,

    /// Territories the next placement must reinforce, set by a card redemption
    /// whose cards matched territories this player occupies.
    pub must_place_territory_bonus: BTreeSet<TerritoryId>,
}

impl PlayerState {
    pub fn new(id: PlayerId, troops_remaining: u32) -> Self {
        Self {
            id,
            troops_remaining,
            cards: Vec::new(),
            alive: true,
            must_place_territory_bonus: BTreeSet::new(),
        }
    }

    pub fn holds(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Removes every card in `cards` from the hand, keeping the order of the rest.
    pub fn discard_cards(&mut self, cards: &[CardId]) {
        self.cards.retain(|held| !cards.contains(held));
    }
}
