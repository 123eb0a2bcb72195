//! Property-based tests for board and engine invariants.
//!
//! Random flip / advance scripts are replayed against a seeded engine and
//! the observable state is checked after every step.

use im::HashSet as ImHashSet;
use memory_match::board::{generate_board, CardId, PairId, BOARD_SIZE};
use memory_match::core::{GameRng, MatchConfig, ReshufflePolicy};
use memory_match::engine::{GameEvent, MatchEngine, Phase};
use memory_match::themes::builtin_themes;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Input {
    Flip(u8),
    Advance(u64),
    Reset,
}

// Mostly flips and time, with an occasional reset.
fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => (0u8..18).prop_map(Input::Flip),
        3 => (0u64..1500).prop_map(Input::Advance),
        1 => Just(Input::Reset),
    ]
}

fn policy_strategy() -> impl Strategy<Value = ReshufflePolicy> {
    prop_oneof![
        Just(ReshufflePolicy::Never),
        Just(ReshufflePolicy::EveryMove),
        (1u32..5).prop_map(ReshufflePolicy::AfterConsecutiveMisses),
    ]
}

fn pair_counts(order: &[CardId]) -> Vec<usize> {
    let mut counts = vec![0; BOARD_SIZE / 2];
    for card in order {
        counts[card.pair().raw() as usize] += 1;
    }
    counts
}

proptest! {
    #[test]
    fn prop_generated_boards_are_well_formed(seed in any::<u64>(), theme_idx in 0usize..6) {
        let theme = builtin_themes().remove(theme_idx);
        let mut rng = GameRng::new(seed);

        let board = generate_board(&theme, &mut rng).unwrap();

        prop_assert_eq!(board.len(), BOARD_SIZE);
        prop_assert!(board.is_well_formed());
        prop_assert!(pair_counts(&board.order()).iter().all(|&n| n == 2));
        for card in board.iter() {
            let partner = board.card(card.id.partner()).unwrap();
            prop_assert_eq!(&partner.symbol, &card.symbol);
        }
    }

    #[test]
    fn prop_reshuffle_moves_only_unmatched(seed in any::<u64>(), matched_pairs in 0u8..7) {
        let theme = builtin_themes().remove(0);
        let mut rng = GameRng::new(seed);
        let mut board = generate_board(&theme, &mut rng).unwrap();
        let matched: ImHashSet<CardId> = (0..matched_pairs)
            .flat_map(|p| [CardId::for_pair(PairId::new(p), 0), CardId::for_pair(PairId::new(p), 1)])
            .collect();
        let before = board.order();

        prop_assert!(board.reshuffle_unmatched(&matched, &mut rng));

        let after = board.order();
        prop_assert_eq!(pair_counts(&after), pair_counts(&before));
        let mut moved = 0;
        for (position, (old, new)) in before.iter().zip(after.iter()).enumerate() {
            if matched.contains(old) {
                prop_assert_eq!(old, new, "matched card moved from {}", position);
            } else if old != new {
                moved += 1;
            }
        }
        prop_assert!(moved >= 2);
    }

    #[test]
    fn prop_engine_invariants_hold(
        seed in any::<u64>(),
        policy in policy_strategy(),
        inputs in prop::collection::vec(input_strategy(), 1..120),
    ) {
        let config = MatchConfig::default().with_seed(seed).with_reshuffle(policy);
        let mut engine = MatchEngine::new(config);
        engine.initialize(&builtin_themes()[0]).unwrap();
        let mut matched_before = 0;

        for input in inputs {
            let events = match input {
                Input::Flip(raw) => engine.flip(CardId::new(raw)),
                Input::Advance(ms) => engine.advance(ms),
                Input::Reset => {
                    matched_before = 0;
                    engine.reset()
                }
            };

            let session = engine.session().unwrap();
            prop_assert!(session.flipped().len() <= 2);
            prop_assert!(session.matched().len() >= matched_before);
            prop_assert!(session.matched().len() % 2 == 0);
            prop_assert!(session.board().is_well_formed());
            prop_assert_eq!(session.is_won(), session.matched().len() == BOARD_SIZE);
            if session.phase() == Phase::Resolving || session.phase() == Phase::Reshuffling {
                prop_assert!(session.input_locked());
            }
            for card in session.matched() {
                prop_assert!(session.matched().contains(&card.partner()));
            }
            for event in &events {
                if let GameEvent::Match { first, second, .. } = event {
                    prop_assert_eq!(first.pair(), second.pair());
                }
            }
            matched_before = session.matched().len();
        }
    }

    #[test]
    fn prop_rejected_flips_change_nothing(
        seed in any::<u64>(),
        setup in prop::collection::vec(0u8..16, 0..6),
        target in 0u8..20,
    ) {
        let mut engine = MatchEngine::new(MatchConfig::default().with_seed(seed));
        engine.initialize(&builtin_themes()[1]).unwrap();
        for raw in setup {
            engine.flip(CardId::new(raw));
        }
        let before = engine.session().unwrap().clone();

        let events = engine.flip(CardId::new(target));

        if matches!(events.as_slice(), [GameEvent::FlipRejected { .. }]) {
            prop_assert_eq!(engine.session().unwrap(), &before);
        } else {
            prop_assert_eq!(engine.session().unwrap().flipped().len(), before.flipped().len() + 1);
        }
    }
}
