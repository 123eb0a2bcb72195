//! The match engine: flip, compare, score, reshuffle, win.
//!
//! ## Time
//!
//! The engine runs on a virtual millisecond clock driven by `advance`.
//! Comparisons resolve after the settle delay, reshuffles take two
//! reshuffle delays, and the session timer ticks once per tick interval.
//! Hosts call `advance` from their frame loop or a real timer; tests call
//! it directly. Within one `advance` every due step runs in deadline
//! order, and a pending step wins a tie with a timer tick.
//!
//! ## Illegal input
//!
//! Flips that are not allowed never fail and never change state. They
//! come back as a single `GameEvent::FlipRejected`.

use log::{debug, info, warn};

use crate::board::{generate_board, Board, CardId};
use crate::core::{FlipRejection, GameRng, MatchConfig, ReshufflePolicy, Result};
use crate::themes::Theme;

use super::event::GameEvent;
use super::state::{Phase, SessionState};

/// Work scheduled for a later instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Compare the two face-up cards.
    Resolve,
    /// Reposition unmatched cards.
    ApplyReshuffle,
    /// Unlock input after a reshuffle.
    FinishReshuffle,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    step: Step,
    due_ms: u64,
}

/// Single-session memory game state machine.
///
/// ```
/// use memory_match::board::{CardId, PairId};
/// use memory_match::core::MatchConfig;
/// use memory_match::engine::{GameEvent, MatchEngine, Phase};
/// use memory_match::themes::ThemeCatalog;
///
/// let catalog = ThemeCatalog::default();
/// let mut engine = MatchEngine::new(MatchConfig::default().with_seed(1));
/// engine.initialize(catalog.resolve("animals")).unwrap();
///
/// engine.flip(CardId::for_pair(PairId::new(0), 0));
/// engine.flip(CardId::for_pair(PairId::new(0), 1));
/// assert_eq!(engine.phase(), Phase::Resolving);
///
/// let events = engine.advance(1000);
/// assert!(events.iter().any(|e| matches!(e, GameEvent::Match { .. })));
/// assert_eq!(engine.phase(), Phase::Ready);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    rng: GameRng,
    theme: Option<Theme>,
    session: Option<SessionState>,
    clock_ms: u64,
    next_tick_ms: u64,
    pending: Option<Pending>,
}

impl MatchEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let rng = GameRng::from_optional_seed(config.seed);
        Self {
            config,
            rng,
            theme: None,
            session: None,
            clock_ms: 0,
            next_tick_ms: 0,
            pending: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Theme of the current session.
    #[must_use]
    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    /// Current session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Current phase; `Idle` without a session.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    /// Virtual clock reading in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Whether a delayed step is waiting to run.
    #[must_use]
    pub fn has_pending_step(&self) -> bool {
        self.pending.is_some()
    }

    /// Deal a fresh board from `theme` and start a session.
    ///
    /// Fails without touching the current session when the theme has fewer
    /// than eight symbols.
    pub fn initialize(&mut self, theme: &Theme) -> Result<Vec<GameEvent>> {
        let board = generate_board(theme, &mut self.rng)?;
        self.theme = Some(theme.clone());
        Ok(self.start(board))
    }

    /// Start a session on a prepared board (replays, fixed layouts).
    pub fn initialize_with_board(&mut self, theme: &Theme, board: Board) -> Vec<GameEvent> {
        self.theme = Some(theme.clone());
        self.start(board)
    }

    /// Deal a new board for the current theme, dropping any pending step.
    ///
    /// No-op without a session.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let Some(theme) = self.theme.clone() else {
            return Vec::new();
        };
        match generate_board(&theme, &mut self.rng) {
            Ok(board) => self.start(board),
            Err(err) => {
                warn!("Reset failed: {}", err);
                Vec::new()
            }
        }
    }

    fn start(&mut self, board: Board) -> Vec<GameEvent> {
        let order = board.order();
        self.session = Some(SessionState::new(board));
        self.pending = None;
        self.next_tick_ms = self.clock_ms + self.tick_interval();

        let theme_id = self.theme.as_ref().map(|t| t.id.clone()).unwrap_or_default();
        info!("Session started with theme '{}'", theme_id);

        vec![
            GameEvent::Initialized { theme_id },
            GameEvent::BoardUpdated { order },
        ]
    }

    /// Turn a card face up.
    ///
    /// The second flip locks input, counts a move, and schedules the
    /// comparison after the settle delay.
    pub fn flip(&mut self, card: CardId) -> Vec<GameEvent> {
        if let Err(reason) = self.check_flip(card) {
            debug!("Rejected flip of {}: {}", card, reason);
            return vec![GameEvent::FlipRejected { card, reason }];
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        session.flipped.push(card);
        let position = session.board.position_of(card).unwrap_or_default();
        debug!("Flipped {} at {}", card, position);

        if session.flipped.len() == 2 {
            session.phase = Phase::Resolving;
            session.input_locked = true;
            session.move_count += 1;
            self.pending = Some(Pending {
                step: Step::Resolve,
                due_ms: self.clock_ms + self.config.settle_delay_ms,
            });
        } else {
            session.phase = Phase::OneFlipped;
        }

        vec![GameEvent::CardFlipped { card, position }]
    }

    /// Why `card` cannot be flipped right now, if it cannot.
    pub fn check_flip(&self, card: CardId) -> std::result::Result<(), FlipRejection> {
        let session = self.session.as_ref().ok_or(FlipRejection::NoSession)?;

        if session.phase == Phase::Won {
            return Err(FlipRejection::GameOver);
        }
        if session.input_locked || session.flipped.len() >= 2 {
            return Err(FlipRejection::InputLocked);
        }
        if session.board.card(card).is_none() {
            return Err(FlipRejection::UnknownCard);
        }
        if session.matched.contains(&card) {
            return Err(FlipRejection::AlreadyMatched);
        }
        if session.flipped.contains(&card) {
            return Err(FlipRejection::AlreadyFlipped);
        }
        Ok(())
    }

    /// Move the virtual clock forward by `delta_ms`, running every step
    /// and timer tick that falls due.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<GameEvent> {
        let target = self.clock_ms.saturating_add(delta_ms);
        let mut events = Vec::new();

        while let Some(session) = self.session.as_ref() {
            let step_due = self.pending.map(|p| p.due_ms).filter(|&due| due <= target);
            let tick_due = (session.phase != Phase::Won)
                .then_some(self.next_tick_ms)
                .filter(|&due| due <= target);

            match (step_due, tick_due) {
                (Some(step), Some(tick)) if tick < step => self.run_tick(tick, &mut events),
                (Some(step), _) => self.run_step(step, &mut events),
                (None, Some(tick)) => self.run_tick(tick, &mut events),
                (None, None) => break,
            }
        }

        self.clock_ms = target;
        events
    }

    fn tick_interval(&self) -> u64 {
        self.config.tick_interval_ms.max(1)
    }

    fn run_tick(&mut self, at: u64, events: &mut Vec<GameEvent>) {
        self.clock_ms = at;
        self.next_tick_ms = at + self.tick_interval();
        if let Some(session) = self.session.as_mut() {
            session.elapsed += 1;
            events.push(GameEvent::Tick {
                elapsed: session.elapsed,
            });
        }
    }

    fn run_step(&mut self, at: u64, events: &mut Vec<GameEvent>) {
        self.clock_ms = at;
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.step {
            Step::Resolve => self.resolve(events),
            Step::ApplyReshuffle => self.apply_reshuffle(events),
            Step::FinishReshuffle => self.finish_reshuffle(events),
        }
    }

    fn resolve(&mut self, events: &mut Vec<GameEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (first, second) = match session.flipped.as_slice() {
            &[first, second] => (first, second),
            _ => return,
        };
        session.flipped.clear();
        session.input_locked = false;
        session.phase = Phase::Ready;

        let first_pair = session.board.card(first).map(|c| c.pair);
        let second_pair = session.board.card(second).map(|c| c.pair);

        let reshuffle = match (first_pair, second_pair) {
            (Some(pair), Some(other)) if pair == other => {
                session.matched.insert(first);
                session.matched.insert(second);
                session.consecutive_misses = 0;
                debug!("Match {} / {} ({})", first, second, pair);
                events.push(GameEvent::Match { first, second, pair });

                if session.matched.len() == session.board.len() {
                    session.phase = Phase::Won;
                    info!(
                        "Board cleared in {} moves, {} ticks",
                        session.move_count, session.elapsed
                    );
                    events.push(GameEvent::Won {
                        moves: session.move_count,
                        elapsed: session.elapsed,
                    });
                    return;
                }
                self.config.reshuffle == ReshufflePolicy::EveryMove
            }
            _ => {
                session.consecutive_misses += 1;
                debug!(
                    "Miss {} / {} ({} in a row)",
                    first, second, session.consecutive_misses
                );
                events.push(GameEvent::Miss { first, second });

                match self.config.reshuffle {
                    ReshufflePolicy::Never => false,
                    ReshufflePolicy::EveryMove => true,
                    ReshufflePolicy::AfterConsecutiveMisses(threshold) => {
                        session.consecutive_misses >= threshold.max(1)
                    }
                }
            }
        };

        if reshuffle {
            self.begin_reshuffle(events);
        }
    }

    fn begin_reshuffle(&mut self, events: &mut Vec<GameEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.phase = Phase::Reshuffling;
        session.input_locked = true;
        info!(
            "Reshuffling {} unmatched cards",
            session.board.len() - session.matched.len()
        );
        events.push(GameEvent::ReshuffleStarted);

        self.pending = Some(Pending {
            step: Step::ApplyReshuffle,
            due_ms: self.clock_ms + self.config.reshuffle_delay_ms,
        });
    }

    fn apply_reshuffle(&mut self, events: &mut Vec<GameEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.board.reshuffle_unmatched(&session.matched, &mut self.rng);
        events.push(GameEvent::BoardUpdated {
            order: session.board.order(),
        });

        self.pending = Some(Pending {
            step: Step::FinishReshuffle,
            due_ms: self.clock_ms + self.config.reshuffle_delay_ms,
        });
    }

    fn finish_reshuffle(&mut self, events: &mut Vec<GameEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.consecutive_misses = 0;
        session.input_locked = false;
        session.phase = Phase::Ready;
        events.push(GameEvent::ReshuffleFinished);
    }
}
