//! Read-only view of a session for renderers.
//!
//! Symbols are exposed only for face-up and matched cards. Card ids still
//! encode their pair (`CardId::pair`), so a snapshot hides faces from a
//! renderer but does not hide the layout from an untrusted client.

use serde::{Deserialize, Serialize};

use crate::board::CardId;
use crate::core::{PlayerId, PlayerIdentity};
use crate::engine::{CardFace, Phase, SessionState};
use crate::themes::{Symbol, Theme};
use crate::turns::TurnCoordinator;

/// One board position as seen by the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub position: usize,
    pub face: CardFace,
    /// `None` while the card is face down.
    pub symbol: Option<Symbol>,
}

/// One seat in a two-player game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: PlayerId,
    pub player: PlayerIdentity,
    pub score: u32,
    pub active: bool,
}

/// Everything a renderer needs to draw the current frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub theme_id: String,
    pub theme_name: String,
    pub gradient: String,
    pub cards: Vec<CardView>,
    pub phase: Phase,
    pub move_count: u32,
    pub elapsed: u64,
    pub consecutive_misses: u32,
    pub input_locked: bool,
    pub pairs_found: usize,
    /// Empty in solo play.
    pub seats: Vec<SeatView>,
}

impl SessionSnapshot {
    /// Capture the current state.
    pub fn capture(session: &SessionState, theme: &Theme, turns: Option<&TurnCoordinator>) -> Self {
        let cards = session
            .board()
            .iter()
            .enumerate()
            .map(|(position, card)| {
                let face = session.face_of(card.id);
                CardView {
                    id: card.id,
                    position,
                    face,
                    symbol: (face != CardFace::Hidden).then(|| card.symbol.clone()),
                }
            })
            .collect();

        let seats = turns
            .map(|turns| {
                turns
                    .players()
                    .iter()
                    .map(|(seat, player)| SeatView {
                        seat,
                        player: player.clone(),
                        score: turns.score(seat),
                        active: seat == turns.active(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            theme_id: theme.id.clone(),
            theme_name: theme.name.clone(),
            gradient: theme.gradient.clone(),
            cards,
            phase: session.phase(),
            move_count: session.move_count(),
            elapsed: session.elapsed(),
            consecutive_misses: session.consecutive_misses(),
            input_locked: session.input_locked(),
            pairs_found: session.pairs_found(),
            seats,
        }
    }

    /// Seat whose turn it is, in two-player games.
    #[must_use]
    pub fn active_seat(&self) -> Option<PlayerId> {
        self.seats.iter().find(|s| s.active).map(|s| s.seat)
    }

    /// Elapsed time as `m:ss`.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

/// Format timer units (seconds at the default tick interval) as `m:ss`.
///
/// ```
/// use memory_match::session::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "0:00");
/// assert_eq!(format_elapsed(75), "1:15");
/// ```
#[must_use]
pub fn format_elapsed(units: u64) -> String {
    format!("{}:{:02}", units / 60, units % 60)
}
