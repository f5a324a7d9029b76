//! Strategy tests: discard selection and whole games between AIs.

use cribbage_engine::ai::{expected_value, select_keep, CribbageAI, RandomPlayer, SmartPlayer};
use cribbage_engine::cards::{Card, Hand};
use cribbage_engine::core::{CribbageError, GameConfig, PlayerId};
use cribbage_engine::game::{CribbageGame, Table};
use cribbage_engine::mcts::MCTSConfig;

fn cards(s: &str) -> Vec<Card> {
    s.parse::<Hand>().unwrap().as_slice().to_vec()
}

// =============================================================================
// Discard Selection
// =============================================================================

#[test]
fn test_keeps_the_perfect_hand_shape() {
    let dealt: Hand = "JH 5D 5S 5C 9C 2D".parse().unwrap();
    let keep = select_keep(&dealt, false).unwrap();
    assert_eq!(keep.to_string(), "JH 5D 5S 5C");
}

#[test]
fn test_keep_value_is_the_maximum() {
    let dealt: Hand = "3C 4D 6H 8S 9C KD".parse().unwrap();
    let keep = select_keep(&dealt, true).unwrap();
    let discards: Vec<Card> = dealt.iter().filter(|&c| !keep.contains(c)).collect();
    let best = expected_value(keep.as_slice(), &discards, true);

    let all = dealt.as_slice();
    for i in 0..all.len() {
        for j in i + 1..all.len() {
            let thrown = [all[i], all[j]];
            let kept: Vec<Card> = all.iter().copied().filter(|c| !thrown.contains(c)).collect();
            assert!(expected_value(&kept, &thrown, true) <= best + 1e-9);
        }
    }
}

#[test]
fn test_pone_avoids_feeding_the_crib() {
    // Throwing the fives would hand the dealer a pair plus fifteens.
    let keep = cards("AC 2D 3H KS");
    let fives = cards("5H 5D");
    let alt_keep = cards("AC 2D 5H 5D");
    let alt_throw = cards("3H KS");

    let pone_fives = expected_value(&keep, &fives, false);
    let dealer_fives = expected_value(&keep, &fives, true);
    assert!(dealer_fives > pone_fives);
    assert!(expected_value(&alt_keep, &alt_throw, false) > pone_fives);
}

#[test]
fn test_select_keep_rejects_short_hand() {
    let dealt: Hand = "AC 2D 3H".parse().unwrap();
    assert_eq!(
        select_keep(&dealt, false).unwrap_err(),
        CribbageError::WrongCardCount {
            expected: "5 or 6",
            actual: 3
        }
    );
}

// =============================================================================
// Whole Games
// =============================================================================

fn play(players: Vec<Box<dyn CribbageAI>>, seed: u64) -> Vec<u32> {
    let game = CribbageGame::new(GameConfig::new(players.len()).unwrap().with_seed(seed)).unwrap();
    let mut table = Table::new(game, players).unwrap();
    let summary = table.play_game().unwrap();
    assert!(summary.winner.is_some());
    summary.scores
}

#[test]
fn test_smart_beats_random_on_average() {
    let games = 12;
    let mut margin = 0i64;

    for g in 0..games {
        let smart = Box::new(SmartPlayer::new(
            MCTSConfig::default().with_iterations(150).with_seed(g),
        ));
        let random = Box::new(RandomPlayer::new(1000 + g));
        // Alternate seats so neither side always cuts first.
        let (players, smart_seat): (Vec<Box<dyn CribbageAI>>, usize) = if g % 2 == 0 {
            (vec![smart, random], 0)
        } else {
            (vec![random, smart], 1)
        };

        let scores = play(players, g);
        margin += i64::from(scores[smart_seat]) - i64::from(scores[1 - smart_seat]);
    }

    assert!(margin > 0, "smart player margin over random was {margin}");
}

#[test]
fn test_three_player_game_with_mixed_strategies() {
    let players: Vec<Box<dyn CribbageAI>> = vec![
        Box::new(SmartPlayer::new(MCTSConfig::default().with_iterations(50))),
        Box::new(RandomPlayer::new(1)),
        Box::new(RandomPlayer::new(2)),
    ];
    let scores = play(players, 5);

    assert_eq!(scores.len(), 3);
    assert_eq!(scores.iter().filter(|&&s| s == 121).count(), 1);
}

#[test]
fn test_smart_player_keeps_from_its_own_deal() {
    let mut game = CribbageGame::new(GameConfig::default().with_seed(4)).unwrap();
    game.set_dealer(PlayerId::new(0)).unwrap();
    game.deal_hands().unwrap();
    let mut player = SmartPlayer::with_seed(4);

    for seat in PlayerId::all(2) {
        let dealt = game.hand(seat).unwrap();
        let keep = player.select_keep(&game, seat).unwrap();
        assert_eq!(keep.len(), 4);
        assert!(keep.iter().all(|c| dealt.contains(c)));
        // The MCTS player discards exactly like the standalone selector.
        assert_eq!(keep, select_keep(&dealt, seat == PlayerId::new(0)).unwrap());
    }
}
