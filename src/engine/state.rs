//! Session state owned by the match engine.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, CardId};

/// Where the engine is in the flip / resolve cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No session.
    Idle,
    /// Board dealt, nothing face up.
    Ready,
    /// One card face up.
    OneFlipped,
    /// Two cards face up, waiting for the settle delay.
    Resolving,
    /// Unmatched cards are being repositioned.
    Reshuffling,
    /// Every card matched. Terminal until reset.
    Won,
}

/// How a card currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down.
    Hidden,
    /// Face up, pending comparison.
    Revealed,
    /// Paired and out of play.
    Matched,
}

/// State of one playthrough.
///
/// Mutated only by `MatchEngine`. The matched set and board use `im`
/// structures so cloning for a snapshot is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) board: Board,
    pub(crate) flipped: SmallVec<[CardId; 2]>,
    pub(crate) matched: ImHashSet<CardId>,
    pub(crate) move_count: u32,
    pub(crate) consecutive_misses: u32,
    pub(crate) elapsed: u64,
    pub(crate) input_locked: bool,
    pub(crate) phase: Phase,
}

impl SessionState {
    pub(crate) fn new(board: Board) -> Self {
        Self {
            board,
            flipped: SmallVec::new(),
            matched: ImHashSet::new(),
            move_count: 0,
            consecutive_misses: 0,
            elapsed: 0,
            input_locked: false,
            phase: Phase::Ready,
        }
    }

    /// The board in its current layout.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Face-up cards awaiting comparison, in flip order (at most two).
    #[must_use]
    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    /// Cards already paired.
    #[must_use]
    pub fn matched(&self) -> &ImHashSet<CardId> {
        &self.matched
    }

    /// Completed two-card comparisons.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Misses since the last match or reshuffle.
    #[must_use]
    pub fn consecutive_misses(&self) -> u32 {
        self.consecutive_misses
    }

    /// Timer units elapsed.
    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Whether new flips are currently refused.
    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the board is cleared.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    /// Matched pairs so far.
    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }

    /// How a card currently shows.
    #[must_use]
    pub fn face_of(&self, card: CardId) -> CardFace {
        if self.matched.contains(&card) {
            CardFace::Matched
        } else if self.flipped.contains(&card) {
            CardFace::Revealed
        } else {
            CardFace::Hidden
        }
    }
}
