//! Drives one player's advice session: the live round that feeds the strategy engine and the
//! count that carries across rounds until the shoe is reset.

use crate::betting::{BetAdvice, BettingAdvisor, BettingStrategy};
use crate::count::{CountState, CountTracker, CountingStrategy};
use crate::outcome::{dealer_must_hit, Outcome, RoundStats};
use crate::strategy::{Action, AdviceNote, DecisionStrategy, StrategyEngine};
use crate::{AdvisorError, CardRank, Hand, HandEvaluation, RulesetConfig};
use log::{info, warn};
use serde::Serialize;

/// Most player cards the card picker accepts for one hand.
pub const DEFAULT_MAX_PLAYER_CARDS: usize = 5;

/// Deck sizes offered by the deck picker. Any positive count is accepted.
pub const SUPPORTED_DECK_SIZES: [u32; 5] = [1, 2, 4, 6, 8];

/// A recommendation together with what it was derived from. `action` is always the table's
/// answer, `notes` carry anything the player should know before acting on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub player_cards: Vec<CardRank>,
    pub dealer_up_card: CardRank,
    pub hand: HandEvaluation,
    pub action: Action,
    pub description: String,
    pub busted: bool,
    pub notes: Vec<AdviceNote>,
}

impl Recommendation {
    /// The action that can actually be played: a double after hitting becomes a hit.
    pub fn playable_action(&self) -> Action {
        if self.notes.contains(&AdviceNote::NoDoubleAfterHit) {
            Action::Hit
        } else {
            self.action
        }
    }
}

/// How a settled round ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub player_total: u32,
    pub dealer_cards: Vec<CardRank>,
    pub dealer_total: u32,
    pub bet_advice: BetAdvice,
    pub stats: RoundStats,
}

/// Everything a front end needs to render the current session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub count: CountState,
    pub true_count: i32,
    pub player_cards: Vec<CardRank>,
    pub dealer_up_card: Option<CardRank>,
    pub recommendation: Option<Recommendation>,
    pub bet_advice: BetAdvice,
    pub stats: RoundStats,
}

/// One advice session. Every card entered through it is observed by the count exactly once.
#[derive(Debug, Clone)]
pub struct AdvisorSession {
    engine: StrategyEngine,
    tracker: CountTracker,
    betting: BettingAdvisor,
    max_player_cards: usize,
    player_cards: Vec<CardRank>,
    dealer_up_card: Option<CardRank>,
    rounds_played: u32,
    stats: RoundStats,
}

impl AdvisorSession {
    /// Associated method for starting a session over `total_decks` decks with the default rules.
    pub fn new(total_decks: i64) -> Result<AdvisorSession, AdvisorError> {
        let tracker = CountTracker::new(total_decks)?;
        warn_unusual_shoe(tracker.total_decks());
        info!("new session over {} deck(s)", tracker.total_decks());
        Ok(AdvisorSession {
            engine: StrategyEngine::default(),
            tracker,
            betting: BettingAdvisor::default(),
            max_player_cards: DEFAULT_MAX_PLAYER_CARDS,
            player_cards: vec![],
            dealer_up_card: None,
            rounds_played: 0,
            stats: RoundStats::default(),
        })
    }

    pub fn ruleset(mut self, ruleset: RulesetConfig) -> Self {
        self.engine = StrategyEngine::new(ruleset);
        self
    }

    pub fn betting(mut self, betting: BettingAdvisor) -> Self {
        self.betting = betting;
        self
    }

    pub fn max_player_cards(mut self, max: usize) -> Self {
        self.max_player_cards = max.max(2);
        self
    }

    pub fn player_cards(&self) -> &[CardRank] {
        &self.player_cards
    }

    pub fn dealer_up_card(&self) -> Option<CardRank> {
        self.dealer_up_card
    }

    pub fn count(&self) -> &CountState {
        self.tracker.state()
    }

    pub fn true_count(&self) -> i32 {
        self.tracker.true_count()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn stats(&self) -> &RoundStats {
        &self.stats
    }

    pub fn rules(&self) -> RulesetConfig {
        self.engine.ruleset()
    }

    /// Adds a card to the player's hand and counts it. Returns the recommendation once the
    /// hand and the dealer's up card are both known.
    pub fn add_player_card(
        &mut self,
        card: CardRank,
    ) -> Result<Option<Recommendation>, AdvisorError> {
        if self.player_cards.len() >= self.max_player_cards {
            return Err(AdvisorError::HandFull {
                max: self.max_player_cards,
            });
        }
        self.tracker.observe(card);
        self.player_cards.push(card);
        Ok(self.recommendation().ok())
    }

    /// Sets the dealer's up card and counts it. The up card cannot be replaced within a round,
    /// it has already been counted.
    pub fn set_dealer_card(
        &mut self,
        card: CardRank,
    ) -> Result<Option<Recommendation>, AdvisorError> {
        if self.dealer_up_card.is_some() {
            return Err(AdvisorError::DealerCardAlreadySet);
        }
        self.tracker.observe(card);
        self.dealer_up_card = Some(card);
        Ok(self.recommendation().ok())
    }

    pub fn recommendation(&self) -> Result<Recommendation, AdvisorError> {
        if self.player_cards.len() < 2 {
            return Err(AdvisorError::MissingPlayerCards);
        }
        let dealer_up_card = self.dealer_up_card.ok_or(AdvisorError::MissingDealerCard)?;
        let hand = Hand::new(self.player_cards.clone())?;
        let action = self.engine.recommend(&hand, dealer_up_card);
        let busted = hand.is_busted();

        let mut notes = vec![];
        if busted {
            notes.push(AdviceNote::Busted);
        } else {
            if action == Action::Double && hand.cards().len() > 2 {
                notes.push(AdviceNote::NoDoubleAfterHit);
            }
            if dealer_up_card.is_ace() {
                notes.push(AdviceNote::Insurance);
            }
        }

        Ok(Recommendation {
            player_cards: self.player_cards.clone(),
            dealer_up_card,
            hand: hand.evaluation(),
            action,
            description: action.description().to_string(),
            busted,
            notes,
        })
    }

    pub fn bet_advice(&self) -> BetAdvice {
        self.betting.advise(self.tracker.true_count())
    }

    /// Ends the round. `revealed` holds the cards exposed after the player's decision that were not
    /// entered through the hand: the dealer's hole card, dealer draws and other players' cards.
    /// Returns the bet advice for the next round.
    pub fn finish_round(&mut self, revealed: &[CardRank]) -> BetAdvice {
        self.close_round(revealed)
    }

    /// Ends the round and settles the hand. `dealer_cards` are the dealer's hole card and draws,
    /// `revealed` any other cards exposed during the round. Nothing is counted unless the dealer's
    /// hand, with the up card, is complete under the table's soft 17 rule.
    pub fn settle_round(
        &mut self,
        dealer_cards: &[CardRank],
        revealed: &[CardRank],
    ) -> Result<RoundResult, AdvisorError> {
        if self.player_cards.len() < 2 {
            return Err(AdvisorError::MissingPlayerCards);
        }
        let up_card = self.dealer_up_card.ok_or(AdvisorError::MissingDealerCard)?;
        let player = Hand::new(self.player_cards.clone())?;

        let mut dealer = Hand::new(vec![up_card])?;
        for card in dealer_cards {
            dealer.add_card(*card);
        }
        if dealer_must_hit(&dealer, &self.engine.ruleset()) {
            return Err(AdvisorError::DealerHandIncomplete {
                total: dealer.total(),
            });
        }

        let outcome = Outcome::settle(&player, &dealer);
        self.stats.record(outcome);
        info!("hand {} against dealer {}: {}", player, dealer, outcome);

        let mut exposed = dealer_cards.to_vec();
        exposed.extend_from_slice(revealed);
        let bet_advice = self.close_round(&exposed);
        Ok(RoundResult {
            outcome,
            player_total: player.total(),
            dealer_cards: dealer.cards().to_vec(),
            dealer_total: dealer.total(),
            bet_advice,
            stats: self.stats,
        })
    }

    fn close_round(&mut self, revealed: &[CardRank]) -> BetAdvice {
        for card in revealed {
            self.tracker.observe(*card);
        }
        self.clear_hand();
        self.rounds_played += 1;
        let advice = self.bet_advice();
        info!(
            "round {} finished: running count {}, true count {}, {:?} x{}",
            self.rounds_played,
            self.tracker.running_count(),
            self.tracker.true_count(),
            advice.action,
            advice.multiplier
        );
        advice
    }

    /// Drops the live hand without touching the count, the cards stay counted.
    pub fn clear_hand(&mut self) {
        self.player_cards.clear();
        self.dealer_up_card = None;
    }

    /// New shoe of the same size.
    pub fn reset_count(&mut self) {
        self.tracker.restart();
        self.clear_hand();
        info!("count reset for {} deck(s)", self.tracker.total_decks());
    }

    /// New shoe of a different size.
    pub fn change_decks(&mut self, total_decks: i64) -> Result<(), AdvisorError> {
        self.tracker.reset(total_decks)?;
        warn_unusual_shoe(self.tracker.total_decks());
        self.clear_hand();
        info!("deck size changed to {}", self.tracker.total_decks());
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            count: *self.tracker.state(),
            true_count: self.tracker.true_count(),
            player_cards: self.player_cards.clone(),
            dealer_up_card: self.dealer_up_card,
            recommendation: self.recommendation().ok(),
            bet_advice: self.bet_advice(),
            stats: self.stats,
        }
    }
}

fn warn_unusual_shoe(total_decks: u32) {
    if !SUPPORTED_DECK_SIZES.contains(&total_decks) {
        warn!("{} deck(s) is not a standard shoe size", total_decks);
    }
}
