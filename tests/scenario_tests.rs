//! End-to-end scenarios for a solo session.
//!
//! Each test drives the engine purely through `flip` and `advance`, the way
//! a host frame loop would.

use memory_match::board::{CardId, PairId};
use memory_match::core::{FlipRejection, MatchConfig, PlayerIdentity, ReshufflePolicy};
use memory_match::engine::{GameEvent, MatchEngine, Phase};
use memory_match::session::MemoryGame;
use memory_match::storage::MemoryStorage;
use memory_match::themes::{ThemeCatalog, DEFAULT_THEME_ID};

fn card(pair: u8, side: u8) -> CardId {
    CardId::for_pair(PairId::new(pair), side)
}

fn started(seed: u64) -> MatchEngine {
    let catalog = ThemeCatalog::default();
    let mut engine = MatchEngine::new(MatchConfig::default().with_seed(seed));
    engine.initialize(catalog.resolve("animals")).unwrap();
    engine
}

fn miss(engine: &mut MatchEngine) -> Vec<GameEvent> {
    engine.flip(card(0, 0));
    engine.flip(card(1, 0));
    engine.advance(1000)
}

/// Matching pair 0 right after dealing.
#[test]
fn test_first_pair_matches() {
    let mut engine = started(11);

    let flipped = engine.flip(card(0, 0));
    assert!(matches!(flipped[0], GameEvent::CardFlipped { card: c, .. } if c == card(0, 0)));
    engine.flip(card(0, 1));
    let events = engine.advance(1000);

    assert!(events.contains(&GameEvent::Match {
        first: card(0, 0),
        second: card(0, 1),
        pair: PairId::new(0),
    }));
    let session = engine.session().unwrap();
    assert_eq!(session.matched().len(), 2);
    assert_eq!(session.move_count(), 1);
}

/// Three misses in a row start and then finish a reshuffle.
#[test]
fn test_three_misses_reshuffle() {
    let mut engine = started(12);
    let before = engine.session().unwrap().board().clone();

    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(miss(&mut engine));
    }
    events.extend(engine.advance(600));

    let names: Vec<_> = events.iter().filter(|e| !e.is_tick()).map(GameEvent::name).collect();
    assert_eq!(
        names,
        vec![
            "miss",
            "miss",
            "miss",
            "reshuffle-started",
            "board-updated",
            "reshuffle-finished"
        ]
    );
    let session = engine.session().unwrap();
    assert_eq!(session.consecutive_misses(), 0);
    assert_eq!(session.phase(), Phase::Ready);
    assert_ne!(session.board().order(), before.order());
    assert!(session.board().is_well_formed());
}

/// A flip while locked changes nothing and reports only the rejection.
#[test]
fn test_flip_while_locked() {
    let mut engine = started(13);
    engine.flip(card(2, 0));
    engine.flip(card(3, 1));
    assert!(engine.session().unwrap().input_locked());
    let before = engine.session().unwrap().clone();

    let events = engine.flip(card(4, 0));

    assert_eq!(
        events,
        vec![GameEvent::FlipRejected {
            card: card(4, 0),
            reason: FlipRejection::InputLocked,
        }]
    );
    assert_eq!(engine.session().unwrap(), &before);
}

/// Matched cards stay in place across a reshuffle.
#[test]
fn test_reshuffle_keeps_matched_positions() {
    let mut engine = started(14);
    engine.flip(card(5, 0));
    engine.flip(card(5, 1));
    engine.advance(1000);
    let positions = engine.session().unwrap().board().positions_of_pair(PairId::new(5));

    for _ in 0..3 {
        miss(&mut engine);
    }
    engine.advance(600);

    assert_eq!(
        engine.session().unwrap().board().positions_of_pair(PairId::new(5)),
        positions
    );
}

/// Winning locks the board until reset.
#[test]
fn test_win_then_reset() {
    let mut engine = started(15);
    engine.advance(4200);
    for pair in 0..8 {
        engine.flip(card(pair, 0));
        engine.flip(card(pair, 1));
        engine.advance(1000);
    }
    assert_eq!(engine.phase(), Phase::Won);
    assert!(matches!(
        engine.flip(card(0, 0))[0],
        GameEvent::FlipRejected {
            reason: FlipRejection::GameOver,
            ..
        }
    ));

    engine.reset();
    engine.reset();
    let session = engine.session().unwrap();
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.elapsed(), 0);
    assert!(session.matched().is_empty());
}

/// Unknown theme ids fall back to the default theme.
#[test]
fn test_unknown_theme_falls_back() {
    let catalog = ThemeCatalog::default();
    let mut game = MemoryGame::new(MatchConfig::default().with_seed(16), MemoryStorage::new());

    let events = game
        .start(&catalog, "no-such-theme", vec![PlayerIdentity::new("u1", "Ada")])
        .unwrap();

    assert_eq!(
        events[0],
        GameEvent::Initialized {
            theme_id: DEFAULT_THEME_ID.to_string()
        }
    );
}

/// With the every-move policy a miss reshuffles straight away.
#[test]
fn test_every_move_policy() {
    let theme = ThemeCatalog::default().resolve("ocean").clone();
    let config = MatchConfig::default()
        .with_seed(17)
        .with_reshuffle(ReshufflePolicy::EveryMove);
    let mut engine = MatchEngine::new(config);
    engine.initialize(&theme).unwrap();

    let events = miss(&mut engine);

    assert!(events.contains(&GameEvent::ReshuffleStarted));
    assert_eq!(engine.phase(), Phase::Reshuffling);
}

/// Custom delays are honoured.
#[test]
fn test_custom_delays() {
    let config = MatchConfig::default()
        .with_seed(18)
        .with_settle_delay_ms(250)
        .with_tick_interval_ms(100);
    let mut engine = MatchEngine::new(config);
    engine.initialize(ThemeCatalog::default().default_theme()).unwrap();

    engine.flip(card(0, 0));
    engine.flip(card(0, 1));
    let events = engine.advance(250);

    let ticks = events.iter().filter(|e| e.is_tick()).count();
    assert_eq!(ticks, 2);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Match { .. })));
}
