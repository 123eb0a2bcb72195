//! Board layout: generation from a theme and reshuffling of unmatched cards.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, MemoryError, Result};
use crate::themes::{Theme, SYMBOLS_PER_BOARD};

use super::card::{Card, CardId, PairId};

/// Cards on a full board.
pub const BOARD_SIZE: usize = SYMBOLS_PER_BOARD * 2;

/// An ordered sequence of 16 cards, 8 pairs.
///
/// Backed by `im::Vector` so snapshots are O(1) clones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vector<Card>,
}

impl Board {
    /// Build a board from explicit cards, checking the pairing invariant.
    ///
    /// Mostly useful for fixed layouts in tests and replays.
    pub fn from_cards(cards: Vec<Card>) -> Option<Self> {
        let board = Self {
            cards: cards.into_iter().collect(),
        };
        board.is_well_formed().then_some(board)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a board position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Card with a given id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Board position of a card.
    #[must_use]
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Card ids in board order.
    #[must_use]
    pub fn order(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// Positions of both cards of a pair.
    #[must_use]
    pub fn positions_of_pair(&self, pair: PairId) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.pair == pair)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check the pairing invariant: every pair id in `[0, 8)` appears
    /// exactly twice, card ids are unique and agree with their pair.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.cards.len() != BOARD_SIZE {
            return false;
        }
        let mut pair_counts = [0u8; SYMBOLS_PER_BOARD];
        let mut seen = [false; BOARD_SIZE];
        for card in &self.cards {
            let pair = card.pair.raw() as usize;
            let id = card.id.raw() as usize;
            if pair >= SYMBOLS_PER_BOARD || id >= BOARD_SIZE || seen[id] || card.id.pair() != card.pair {
                return false;
            }
            seen[id] = true;
            pair_counts[pair] += 1;
        }
        pair_counts.iter().all(|&n| n == 2)
    }

    /// Permute the cards at unmatched positions; matched positions stay put.
    ///
    /// When at least two cards are unmatched, at least one of them moves.
    /// Returns whether the layout changed.
    pub fn reshuffle_unmatched(&mut self, matched: &ImHashSet<CardId>, rng: &mut GameRng) -> bool {
        let positions: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| !matched.contains(&c.id))
            .map(|(i, _)| i)
            .collect();
        if positions.len() < 2 {
            return false;
        }

        let unmatched: Vec<Card> = positions.iter().map(|&i| self.cards[i].clone()).collect();
        for (position, card) in positions.into_iter().zip(rng.shuffle_moved(unmatched)) {
            self.cards.set(position, card);
        }
        true
    }
}

/// Build a shuffled board from the first eight symbols of a theme.
///
/// Fails with `InsufficientSymbols` when the theme has fewer than eight.
pub fn generate_board(theme: &Theme, rng: &mut GameRng) -> Result<Board> {
    if !theme.can_fill_board() {
        return Err(MemoryError::InsufficientSymbols {
            theme: theme.id.clone(),
            found: theme.symbols.len(),
            required: SYMBOLS_PER_BOARD,
        });
    }

    let mut cards: Vec<Card> = theme
        .board_symbols()
        .iter()
        .enumerate()
        .flat_map(|(i, symbol)| {
            let pair = PairId::new(i as u8);
            [Card::new(pair, 0, symbol.clone()), Card::new(pair, 1, symbol.clone())]
        })
        .collect();

    rng.shuffle(&mut cards);

    Ok(Board {
        cards: cards.into_iter().collect(),
    })
}
