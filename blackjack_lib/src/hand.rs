use crate::{AdvisorError, CardRank};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Everything the strategy tables need to know about a hand, derived from its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub total: u32,
    pub is_soft: bool,
    pub is_pair: bool,
}

/// Evaluate a sequence of ranks. At most one ace is ever promoted to 11, two aces at 11 would bust.
/// Pair status is rank identity, a ten and a king are not a pair even though both are worth ten.
pub fn evaluate(cards: &[CardRank]) -> Result<HandEvaluation, AdvisorError> {
    if cards.is_empty() {
        return Err(AdvisorError::EmptyHand);
    }
    Ok(evaluate_cards(cards))
}

fn evaluate_cards(cards: &[CardRank]) -> HandEvaluation {
    let mut total: u32 = 0;
    let mut aces = 0;
    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.base_value() as u32;
    }

    let is_soft = aces > 0 && total + 10 <= 21;
    if is_soft {
        total += 10;
    }

    let is_pair = cards.len() == 2 && cards[0] == cards[1];

    HandEvaluation {
        total,
        is_soft,
        is_pair,
    }
}

/// A player's hand at a single decision point. Only the cards are stored, the evaluation is
/// recomputed from them every time it is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hand {
    cards: Vec<CardRank>,
}

impl Hand {
    /// Associated method for building a new hand, rejects an empty card list.
    pub fn new(cards: Vec<CardRank>) -> Result<Hand, AdvisorError> {
        if cards.is_empty() {
            return Err(AdvisorError::EmptyHand);
        }
        Ok(Hand { cards })
    }

    pub fn cards(&self) -> &[CardRank] {
        &self.cards
    }

    pub fn add_card(&mut self, card: CardRank) {
        self.cards.push(card);
    }

    pub fn evaluation(&self) -> HandEvaluation {
        evaluate_cards(&self.cards)
    }

    pub fn total(&self) -> u32 {
        self.evaluation().total
    }

    pub fn is_soft(&self) -> bool {
        self.evaluation().is_soft
    }

    pub fn is_pair(&self) -> bool {
        self.evaluation().is_pair
    }

    /// Two cards totalling 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.total() == 21
    }

    pub fn is_busted(&self) -> bool {
        self.total() > 21
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let evaluation = self.evaluation();
        let cards = self
            .cards
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<&str>>()
            .join(", ");
        let kind = if self.is_blackjack() {
            " blackjack"
        } else if evaluation.is_pair {
            " pair"
        } else if evaluation.is_soft {
            " soft"
        } else if evaluation.total > 21 {
            " busted"
        } else {
            ""
        };
        write!(f, "{} ({}{})", cards, evaluation.total, kind)
    }
}
