//! Persistence through the `Storage` port: scores, leaderboards, custom
//! themes and failure handling.

use memory_match::board::{CardId, PairId};
use memory_match::core::{MatchConfig, MemoryError, PlayerIdentity, Result};
use memory_match::engine::{GameEvent, Phase};
use memory_match::session::MemoryGame;
use memory_match::storage::{MemoryStorage, ScoreBook, Storage, ThemeStore, SCORES_KEY};
use memory_match::themes::{ImageUpload, ThemeCatalog, CUSTOM_THEME_GRADIENT};

/// Storage that refuses every write.
struct ReadOnlyStorage;

impl Storage for ReadOnlyStorage {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, key: &str, _value: String) -> Result<()> {
        Err(MemoryError::Persistence(format!("quota exceeded writing {}", key)))
    }
}

fn play_perfect<S: Storage>(game: &mut MemoryGame<S>, extra_misses: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..extra_misses {
        game.flip(CardId::for_pair(PairId::new(0), 0), None);
        game.flip(CardId::for_pair(PairId::new(1), 0), None);
        events.extend(game.advance(1000));
    }
    for pair in 0..8 {
        game.flip(CardId::for_pair(PairId::new(pair), 0), None);
        game.flip(CardId::for_pair(PairId::new(pair), 1), None);
        events.extend(game.advance(1000));
    }
    events
}

fn uploads(count: usize) -> Vec<ImageUpload> {
    (0..count)
        .map(|i| ImageUpload {
            name: format!("photo{}.webp", i),
            mime_type: "image/webp".to_string(),
            size_bytes: 200_000,
            reference: format!("blob:photo{}", i),
        })
        .collect()
}

/// A failed save is reported but the win stands.
#[test]
fn test_save_failure_keeps_result() {
    let catalog = ThemeCatalog::default();
    let mut game = MemoryGame::new(MatchConfig::default().with_seed(31), ReadOnlyStorage);
    game.start(&catalog, "food", vec![PlayerIdentity::new("u1", "Ada")])
        .unwrap();

    let events = play_perfect(&mut game, 0);

    let reason = events
        .iter()
        .find_map(|e| match e {
            GameEvent::SaveFailed { reason } => Some(reason.clone()),
            _ => None,
        })
        .unwrap();
    assert!(reason.contains("quota exceeded"));
    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.last_record().map(|r| r.move_count), Some(8));
}

/// Scores from several games rank by moves, then time.
#[test]
fn test_leaderboard_across_games() {
    let catalog = ThemeCatalog::default();
    let mut storage = MemoryStorage::new();

    for (player, misses) in [("ada", 2), ("bob", 0), ("cy", 1)] {
        let mut game = MemoryGame::new(MatchConfig::default().with_seed(32), &mut storage);
        game.start(&catalog, "animals", vec![PlayerIdentity::new(player, player)])
            .unwrap();
        play_perfect(&mut game, misses);
    }

    let book = ScoreBook::new(&mut storage);
    let board = book.leaderboard("animals", 10).unwrap();
    let names: Vec<_> = board.iter().map(|r| r.record.player_id.as_str()).collect();
    assert_eq!(names, vec!["bob", "cy", "ada"]);
    assert_eq!(board[0].record.move_count, 8);
    assert_eq!(board[2].record.move_count, 10);
    assert_eq!(book.for_player("cy").unwrap().len(), 1);
    assert!(book.leaderboard("space", 10).unwrap().is_empty());
}

/// Corrupt score data is an error, not an empty list.
#[test]
fn test_corrupt_scores() {
    let mut storage = MemoryStorage::new();
    storage.write(SCORES_KEY, "not json".to_string()).unwrap();

    let book = ScoreBook::new(storage);
    assert!(matches!(book.all(), Err(MemoryError::Serialization(_))));
}

/// Custom themes survive a restart and are playable.
#[test]
fn test_custom_theme_roundtrip() {
    let mut storage = MemoryStorage::new();

    let created = {
        let mut catalog = ThemeCatalog::default();
        let mut store = ThemeStore::new(&mut storage);
        catalog
            .create_custom("  Holiday  ", &uploads(10), &mut store)
            .unwrap()
    };
    assert_eq!(created.name, "Holiday");
    assert!(created.id.starts_with("custom-"));
    assert_eq!(created.gradient, CUSTOM_THEME_GRADIENT);
    assert!(created.is_custom);

    let mut catalog = ThemeCatalog::default();
    let store = ThemeStore::new(&mut storage);
    assert_eq!(catalog.load_custom(&store).unwrap(), 1);
    let theme = catalog.get(&created.id).unwrap().clone();
    assert_eq!(theme.symbols.len(), 10);

    let mut game = MemoryGame::new(MatchConfig::default().with_seed(33), MemoryStorage::new());
    game.initialize(&theme, vec![PlayerIdentity::new("u1", "Ada")])
        .unwrap();
    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.theme_id, created.id);
    assert_eq!(snapshot.cards.len(), 16);
}

/// Invalid uploads never reach storage.
#[test]
fn test_custom_theme_rejections() {
    let mut catalog = ThemeCatalog::default();
    let mut store = ThemeStore::new(MemoryStorage::new());

    assert!(matches!(
        catalog.create_custom("   ", &uploads(8), &mut store),
        Err(MemoryError::InvalidThemeName)
    ));
    assert!(matches!(
        catalog.create_custom("Few", &uploads(7), &mut store),
        Err(MemoryError::InsufficientSymbols { found: 7, .. })
    ));
    assert!(matches!(
        catalog.create_custom("Many", &uploads(19), &mut store),
        Err(MemoryError::TooManySymbols { found: 19, max: 18 })
    ));

    let mut bad = uploads(8);
    bad[3].mime_type = "image/gif".to_string();
    assert!(matches!(
        catalog.create_custom("Gif", &bad, &mut store),
        Err(MemoryError::InvalidUpload { .. })
    ));

    let mut big = uploads(8);
    big[0].size_bytes = 3 * 1024 * 1024;
    assert!(matches!(
        catalog.create_custom("Big", &big, &mut store),
        Err(MemoryError::InvalidUpload { .. })
    ));

    assert!(store.load().unwrap().is_empty());
    assert_eq!(catalog.custom_themes().count(), 0);
}
