//! Card identifiers and card instances.

use serde::{Deserialize, Serialize};

use crate::themes::Symbol;

/// Grouping key shared by exactly two partner cards.
///
/// Equals the index of the card's symbol within the theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u8);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Unique card token within a board.
///
/// Encodes the pair and which of the two partners this is:
/// `CardId(2 * pair + side)`. Displays as `"<pair>-a"` / `"<pair>-b"`.
///
/// ```
/// use memory_match::board::{CardId, PairId};
///
/// let card = CardId::for_pair(PairId::new(3), 1);
/// assert_eq!(card.to_string(), "3-b");
/// assert_eq!(card.partner().to_string(), "3-a");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The id of one side (0 or 1) of a pair.
    ///
    /// Pairs above 127 do not fit and wrap; boards only use pairs 0..8.
    #[must_use]
    pub const fn for_pair(pair: PairId, side: u8) -> Self {
        Self(pair.0.wrapping_mul(2) | (side & 1))
    }

    /// The pair this card belongs to.
    #[must_use]
    pub const fn pair(self) -> PairId {
        PairId(self.0 / 2)
    }

    /// The id of the partner card.
    #[must_use]
    pub const fn partner(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = if self.0 & 1 == 0 { 'a' } else { 'b' };
        write!(f, "{}-{}", self.0 / 2, side)
    }
}

/// A tile on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique token.
    pub id: CardId,
    /// Face shown when revealed.
    pub symbol: Symbol,
    /// Shared with the partner card.
    pub pair: PairId,
}

impl Card {
    /// Create one side of a pair.
    #[must_use]
    pub fn new(pair: PairId, side: u8, symbol: Symbol) -> Self {
        Self {
            id: CardId::for_pair(pair, side),
            symbol,
            pair,
        }
    }

    /// Whether two cards are partners.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.pair == other.pair
    }
}
