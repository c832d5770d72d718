#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use level::*;
pub use scores::*;
pub use symbols::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod level;
mod scores;
mod symbols;
mod types;

/// Ordered sequence of cards, every symbol present exactly twice.
///
/// Serialized as the plain symbol sequence, deserializing goes through [`Deck::from_symbols`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
        if symbols.is_empty() || symbols.len() > usize::from(CardIndex::MAX) + 1 {
            return Err(GameError::InvalidDeck);
        }

        let mut counts: BTreeMap<Symbol, u8> = BTreeMap::new();
        for &symbol in symbols {
            let count = counts.entry(symbol).or_default();
            *count = count.saturating_add(1);
        }
        if counts.values().any(|&count| count != 2) {
            return Err(GameError::InvalidDeck);
        }

        Ok(Self::new_unchecked(symbols))
    }

    pub(crate) fn new_unchecked(symbols: &[Symbol]) -> Self {
        let cards = symbols
            .iter()
            .zip(0..=CardIndex::MAX)
            .map(|(&symbol, id)| Card { id, symbol })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2).try_into().unwrap_or(PairCount::MAX)
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if usize::from(index) < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }
}

impl TryFrom<Vec<Symbol>> for Deck {
    type Error = GameError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self> {
        Self::from_symbols(&symbols)
    }
}

impl From<Deck> for Vec<Symbol> {
    fn from(deck: Deck) -> Self {
        deck.cards.into_iter().map(|card| card.symbol).collect()
    }
}

impl Index<CardIndex> for Deck {
    type Output = Card;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[usize::from(index)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Matched,
    Mismatched,
    Won,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Two cards were compared, so a move was counted.
    pub const fn is_resolution(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatched | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    TimedOut,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            NoChange => false,
            Ticked => true,
            TimedOut => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(ids: &[u8]) -> Vec<Symbol> {
        ids.iter().copied().map(Symbol).collect()
    }

    #[test]
    fn deck_assigns_positions_as_ids() {
        let deck = Deck::from_symbols(&symbols(&[1, 0, 0, 1])).unwrap();

        assert_eq!(deck.len(), 4);
        assert_eq!(deck.pair_count(), 2);
        for (pos, card) in deck.cards().iter().enumerate() {
            assert_eq!(usize::from(card.id), pos);
        }
        assert_eq!(deck[0].symbol, Symbol(1));
        assert_eq!(deck[2].symbol, Symbol(0));
    }

    #[test]
    fn deck_rejects_symbols_not_appearing_exactly_twice() {
        assert_eq!(Deck::from_symbols(&[]), Err(GameError::InvalidDeck));
        assert_eq!(
            Deck::from_symbols(&symbols(&[0, 0, 1])),
            Err(GameError::InvalidDeck)
        );
        assert_eq!(
            Deck::from_symbols(&symbols(&[0, 0, 0, 0])),
            Err(GameError::InvalidDeck)
        );
        assert_eq!(
            Deck::from_symbols(&symbols(&[0, 1, 2, 0, 1, 3])),
            Err(GameError::InvalidDeck)
        );
    }

    #[test]
    fn deck_validates_indices() {
        let deck = Deck::from_symbols(&symbols(&[0, 0])).unwrap();

        assert_eq!(deck.validate_index(1), Ok(1));
        assert_eq!(deck.validate_index(2), Err(GameError::InvalidIndex));
    }

    #[test]
    fn deck_deserializes_through_validation() {
        let deck = Deck::from_symbols(&symbols(&[1, 0, 0, 1])).unwrap();
        let json = serde_json::to_string(&deck).unwrap();
        assert_eq!(json, "[1,0,0,1]");
        assert_eq!(serde_json::from_str::<Deck>(&json).unwrap(), deck);

        assert!(serde_json::from_str::<Deck>("[0,5,5,7]").is_err());
        assert!(serde_json::from_str::<Deck>("[]").is_err());
        assert!(
            serde_json::from_str::<Deck>(r#"{"cards":[{"id":0,"symbol":0},{"id":0,"symbol":0}]}"#)
                .is_err()
        );
    }

    #[test]
    fn only_comparisons_count_as_resolutions() {
        assert!(!FlipOutcome::NoChange.is_resolution());
        assert!(!FlipOutcome::Flipped.is_resolution());
        assert!(FlipOutcome::Mismatched.is_resolution());
        assert!(FlipOutcome::Won.is_resolution());
        assert!(!TickOutcome::NoChange.has_update());
    }
}
