//! Property tests for scoring and round invariants.

use std::collections::HashSet;

use cribbage_engine::cards::Card;
use cribbage_engine::core::{GameConfig, PlayerId, HAND_SIZE, MAX_COUNT};
use cribbage_engine::game::CribbageGame;
use cribbage_engine::mcts::{FinalSelection, MCTSConfig};
use cribbage_engine::scoring::{score_hand, HandKind};
use proptest::prelude::*;

/// Five distinct cards in random order: four for the hand, one starter.
fn five_cards() -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence((0u8..52).collect::<Vec<_>>(), 5)
        .prop_shuffle()
        .prop_map(|ids| ids.into_iter().filter_map(Card::from_id).collect())
}

fn visible_total(game: &CribbageGame) -> (usize, usize) {
    let mut seen: HashSet<Card> = HashSet::new();
    let mut total = game.draw_pile_len();
    for pid in PlayerId::all(game.player_count()) {
        for card in game.hand(pid).unwrap().iter().chain(game.played_cards(pid).unwrap().iter()) {
            seen.insert(card);
            total += 1;
        }
    }
    for card in game.crib().iter().chain(game.starter()) {
        seen.insert(card);
        total += 1;
    }
    (seen.len() + game.draw_pile_len(), total)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: no hand scores 19, 25, 26 or 27, and none beats 29
    #[test]
    fn prop_impossible_scores(cards in five_cards()) {
        let score = score_hand(&cards[..HAND_SIZE], cards[HAND_SIZE], HandKind::Hand).unwrap();

        prop_assert!(score.total <= 29);
        prop_assert!(![19, 25, 26, 27].contains(&score.total),
            "{:?} scored {}", cards, score.total);
        prop_assert_eq!(
            score.total,
            score.fifteens + score.runs + score.pairs + score.flush + score.nobs
        );
    }

    /// Property: the same cards never score more as a crib than as a hand
    #[test]
    fn prop_crib_flush_is_stricter(cards in five_cards()) {
        let hand = score_hand(&cards[..HAND_SIZE], cards[HAND_SIZE], HandKind::Hand).unwrap();
        let crib = score_hand(&cards[..HAND_SIZE], cards[HAND_SIZE], HandKind::Crib).unwrap();

        prop_assert!(crib.total <= hand.total);
        prop_assert!(crib.flush == 0 || crib.flush == 5);
        prop_assert!(crib.total <= 29);
        prop_assert!(![19, 25, 26, 27].contains(&crib.total),
            "{:?} scored {} as a crib", cards, crib.total);
        prop_assert_eq!(crib.total - crib.flush, hand.total - hand.flush);
    }

    /// Property: hand order never changes the score
    #[test]
    fn prop_score_ignores_order(cards in five_cards()) {
        let forward = score_hand(&cards[..HAND_SIZE], cards[HAND_SIZE], HandKind::Hand).unwrap();
        let mut reversed = cards[..HAND_SIZE].to_vec();
        reversed.reverse();
        let backward = score_hand(&reversed, cards[HAND_SIZE], HandKind::Hand).unwrap();

        prop_assert_eq!(forward, backward);
    }

    /// Property: through a whole round the 52 cards stay partitioned and the
    /// count never passes 31
    #[test]
    fn prop_round_keeps_partition(
        seed in any::<u64>(),
        player_count in 2usize..=3,
        pick in any::<usize>(),
    ) {
        let config = GameConfig::new(player_count).unwrap().with_seed(seed);
        let mut game = CribbageGame::new(config).unwrap();
        game.cut_for_dealer().unwrap();
        game.deal_hands().unwrap();
        prop_assert_eq!(visible_total(&game), (52, 52));

        for pid in PlayerId::all(player_count) {
            let hand = game.hand(pid).unwrap();
            for card in hand.iter().skip(HAND_SIZE) {
                game.send_card_to_crib(pid, card).unwrap();
            }
        }
        game.pick_starter_card().unwrap();
        prop_assert_eq!(visible_total(&game), (52, 52));

        let mut turn = pick;
        while !game.round_over() && !game.game_over() {
            if !game.move_possible() {
                game.reset_count();
                continue;
            }
            let pid = game.next_to_play().unwrap();
            let playable = game.playable_cards(pid).unwrap();
            let card = playable[turn % playable.len()];
            turn = turn.wrapping_mul(31).wrapping_add(7);
            game.play_card(pid, card).unwrap();

            prop_assert!(game.count() <= MAX_COUNT);
            prop_assert_eq!(visible_total(&game), (52, 52));
        }

        game.clear_round_state().unwrap();
        prop_assert_eq!(game.draw_pile_len(), 52);
    }

    /// Property: configurations survive a JSON round trip
    #[test]
    fn prop_config_serde(
        seed in any::<u64>(),
        iterations in 0u32..100_000,
        exploration in 0.0f64..4.0,
        highest in any::<bool>(),
        limit in proptest::option::of(1u64..10_000),
    ) {
        let mut mcts = MCTSConfig::default()
            .with_seed(seed)
            .with_iterations(iterations)
            .with_exploration(exploration)
            .with_final_selection(if highest {
                FinalSelection::HighestValue
            } else {
                FinalSelection::MostVisited
            });
        if let Some(ms) = limit {
            mcts = mcts.with_time_limit_ms(ms);
        }
        let json = serde_json::to_string(&mcts).unwrap();
        prop_assert_eq!(serde_json::from_str::<MCTSConfig>(&json).unwrap(), mcts);

        let game = GameConfig::new(2).unwrap().with_seed(seed);
        let json = serde_json::to_string(&game).unwrap();
        prop_assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), game);
    }
}
