//! Ordered FIFO deck of shared cards.
//!
//! Cards are drawn from the front and won cards are appended to the back.
//! The backing store is a persistent `im::Vector`, so cloning a deck is O(1)
//! and the lookahead search can branch freely without touching live state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameResult};

use super::definition::{Card, CardId};

/// One side's deck.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use trunfo::cards::{Card, CardId, Deck};
///
/// let a = Arc::new(Card::new(CardId::new(1), "A"));
/// let b = Arc::new(Card::new(CardId::new(2), "B"));
///
/// let mut deck = Deck::from_cards([a.clone()]);
/// deck.append([b]);
///
/// assert_eq!(deck.draw().unwrap().id, CardId::new(1));
/// assert_eq!(deck.peek_front().map(|c| c.id), Some(CardId::new(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: im::Vector<Arc<Card>>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck whose front is the first card yielded.
    pub fn from_cards(cards: impl IntoIterator<Item = Arc<Card>>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// The card that would be drawn next.
    #[must_use]
    pub fn peek_front(&self) -> Option<&Arc<Card>> {
        self.cards.front()
    }

    /// Remove and return the front card.
    pub fn draw(&mut self) -> GameResult<Arc<Card>> {
        self.cards.pop_front().ok_or(GameError::EmptyDeck)
    }

    /// Push cards to the back, preserving argument order.
    pub fn append(&mut self, cards: impl IntoIterator<Item = Arc<Card>>) {
        for card in cards {
            self.cards.push_back(card);
        }
    }

    /// Take a specific card out of the deck, wherever it sits.
    pub fn remove(&mut self, id: CardId) -> Option<Arc<Card>> {
        let index = self.position(id)?;
        Some(self.cards.remove(index))
    }

    /// Index of a card counted from the front.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Card>> {
        self.cards.iter()
    }

    /// Card ids from front to back.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }
}
