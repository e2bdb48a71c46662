//! Property tests for hand evaluation, the strategy tables and the count.

use blackjack_lib::count::MIN_DECKS_REMAINING;
use blackjack_lib::prelude::*;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn rank() -> impl Strategy<Value = CardRank> {
    prop::sample::select(CardRank::ALL.to_vec())
}

fn non_ace_rank() -> impl Strategy<Value = CardRank> {
    prop::sample::select(
        CardRank::ALL
            .iter()
            .copied()
            .filter(|r| !r.is_ace())
            .collect::<Vec<_>>(),
    )
}

fn base_sum(cards: &[CardRank]) -> u32 {
    cards.iter().map(|c| c.base_value() as u32).sum()
}

proptest! {
    #[test]
    fn hands_without_aces_are_hard(cards in prop::collection::vec(non_ace_rank(), 1..8)) {
        let evaluation = evaluate(&cards).unwrap();
        prop_assert!(!evaluation.is_soft);
        prop_assert_eq!(evaluation.total, base_sum(&cards));
    }

    #[test]
    fn single_ace_with_small_remainder_is_soft(others in prop::collection::vec(non_ace_rank(), 0..4)) {
        prop_assume!(base_sum(&others) <= 10);
        let mut cards = others.clone();
        cards.push(CardRank::Ace);
        let evaluation = evaluate(&cards).unwrap();
        prop_assert!(evaluation.is_soft);
        prop_assert_eq!(evaluation.total, base_sum(&others) + 11);
    }

    #[test]
    fn soft_hands_never_exceed_twenty_one(cards in prop::collection::vec(rank(), 1..8)) {
        let evaluation = evaluate(&cards).unwrap();
        if evaluation.is_soft {
            prop_assert!(evaluation.total <= 21);
            prop_assert!(cards.iter().any(|c| c.is_ace()));
            prop_assert_eq!(evaluation.total, base_sum(&cards) + 10);
        } else {
            prop_assert_eq!(evaluation.total, base_sum(&cards));
        }
    }

    #[test]
    fn evaluation_is_idempotent(cards in prop::collection::vec(rank(), 1..8)) {
        prop_assert_eq!(evaluate(&cards).unwrap(), evaluate(&cards).unwrap());
        let hand = Hand::new(cards.clone()).unwrap();
        prop_assert_eq!(hand.evaluation(), evaluate(&cards).unwrap());
    }

    #[test]
    fn evaluation_ignores_card_order(cards in prop::collection::vec(rank(), 1..8), seed in any::<u64>()) {
        let mut shuffled = cards.clone();
        shuffled.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed));
        let original = evaluate(&cards).unwrap();
        let reordered = evaluate(&shuffled).unwrap();
        prop_assert_eq!(original.total, reordered.total);
        prop_assert_eq!(original.is_soft, reordered.is_soft);
    }

    #[test]
    fn pairs_are_rank_identity(first in rank(), second in rank()) {
        let evaluation = evaluate(&[first, second]).unwrap();
        prop_assert_eq!(evaluation.is_pair, first == second);
    }

    #[test]
    fn strategy_table_is_total(cards in prop::collection::vec(rank(), 1..6), dealer in rank(), h17 in any::<bool>()) {
        let hand = Hand::new(cards).unwrap();
        let engine = StrategyEngine::new(RulesetConfig::new(h17));
        let action = engine.recommend(&hand, dealer);
        // Splits are only ever offered on a pair
        if action == Action::Split {
            prop_assert!(hand.is_pair());
        }
    }

    #[test]
    fn eights_split_against_anything(dealer in rank(), h17 in any::<bool>()) {
        let hand = Hand::new(vec![CardRank::Eight, CardRank::Eight]).unwrap();
        let engine = StrategyEngine::new(RulesetConfig::new(h17));
        prop_assert_eq!(engine.recommend(&hand, dealer), Action::Split);
    }

    #[test]
    fn count_state_invariants(total_decks in 1i64..=8, cards in prop::collection::vec(rank(), 0..500)) {
        let mut tracker = CountTracker::new(total_decks).unwrap();
        let mut expected_running = 0;
        for (i, card) in cards.iter().enumerate() {
            tracker.observe(*card);
            expected_running += blackjack_lib::count::hi_lo_value(*card);
            prop_assert_eq!(tracker.cards_seen() as usize, i + 1);
        }
        prop_assert_eq!(tracker.running_count(), expected_running);

        let expected_decks = f64::max(
            MIN_DECKS_REMAINING,
            (total_decks as f64 * 52.0 - cards.len() as f64) / 52.0,
        );
        prop_assert!((tracker.decks_remaining() - expected_decks).abs() < 1e-9);
        prop_assert!(tracker.decks_remaining() >= MIN_DECKS_REMAINING);
        prop_assert_eq!(
            tracker.true_count(),
            (expected_running as f64 / expected_decks).round() as i32
        );
    }

    #[test]
    fn bet_advice_is_total(true_count in any::<i32>()) {
        let advice = BettingAdvisor::default().advise(true_count);
        prop_assert!(advice.multiplier >= 1 && advice.multiplier <= 8);
        match advice.action {
            BetAction::IncreaseBet => prop_assert!(true_count >= 2),
            BetAction::MinBet => prop_assert!(true_count <= -2),
            BetAction::NormalBet => prop_assert!((-1..=1).contains(&true_count)),
        }
    }
}
