//! Board generation.
//!
//! A board is 16 cards: two per symbol for the first eight symbols of a
//! theme, in uniformly random order.

pub mod card;
pub mod generator;

pub use card::{Card, CardId, PairId};
pub use generator::{generate_board, Board, BOARD_SIZE};
