use crate::{CardRank, Hand, HandEvaluation, RulesetConfig};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The four playing decisions the advisor can recommend. Serialized with the short codes the
/// card picker has always displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "H")]
    Hit,
    #[serde(rename = "ST")]
    Stand,
    #[serde(rename = "D")]
    Double,
    #[serde(rename = "SP")]
    Split,
}

impl Action {
    pub fn code(&self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "ST",
            Action::Double => "D",
            Action::Split => "SP",
        }
    }

    /// Text shown next to the recommendation.
    pub fn description(&self) -> &'static str {
        match self {
            Action::Hit => "Hit - Take another card",
            Action::Stand => "Stand - Keep current hand",
            Action::Double => "Double Down - Double bet, take one card",
            Action::Split => "Split - Separate pair into two hands",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Extra guidance shown alongside a recommendation. The recommended action is never changed by a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdviceNote {
    /// The table says double but the hand has already taken a card.
    NoDoubleAfterHit,
    /// The dealer shows an ace.
    Insurance,
    /// The hand is over 21, there is nothing left to decide.
    Busted,
}

impl AdviceNote {
    pub fn message(&self) -> &'static str {
        match self {
            AdviceNote::NoDoubleAfterHit => "Cannot double after hitting. Recommend Hit instead.",
            AdviceNote::Insurance => {
                "Insurance is available but not recommended, it is a side bet with about a 7% house edge. Basic strategy never takes insurance."
            }
            AdviceNote::Busted => "Busted.",
        }
    }
}

impl Display for AdviceNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Trait for a generic decision strategy. Takes the player's hand and the dealer's up card and
/// returns the action to play. Every input yields exactly one action.
pub trait DecisionStrategy {
    fn recommend(&self, hand: &Hand, dealers_up_card: CardRank) -> Action;
}

/// Basic strategy for a multi-deck shoe where the dealer hits soft 17 and surrender is not offered.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyEngine {
    ruleset: RulesetConfig,
}

impl StrategyEngine {
    /// Associated method for building a new engine for the given rules.
    pub fn new(ruleset: RulesetConfig) -> StrategyEngine {
        StrategyEngine { ruleset }
    }

    pub fn ruleset(&self) -> RulesetConfig {
        self.ruleset
    }

    /// Decide from an already computed evaluation. `pair_rank` is the rank of the paired cards and
    /// is only consulted when `evaluation.is_pair` is set.
    pub fn recommend_evaluated(
        &self,
        evaluation: HandEvaluation,
        pair_rank: CardRank,
        dealers_up_card: CardRank,
    ) -> Action {
        let dealer = dealers_up_card.dealer_value();

        // Pairs first, then soft totals, then hard totals
        if evaluation.is_pair {
            pair_action(pair_rank, dealer)
        } else if evaluation.is_soft {
            soft_action(evaluation.total, dealer)
        } else {
            hard_action(evaluation.total, dealer)
        }
    }
}

impl DecisionStrategy for StrategyEngine {
    fn recommend(&self, hand: &Hand, dealers_up_card: CardRank) -> Action {
        let evaluation = hand.evaluation();
        let action = self.recommend_evaluated(evaluation, hand.cards()[0], dealers_up_card);
        debug!(
            "recommend {} vs dealer {}: {}",
            hand,
            dealers_up_card,
            action.code()
        );
        action
    }
}

/// Pair splitting table, keyed on the paired rank and the dealer's up card value (ace is 11).
pub fn pair_action(rank: CardRank, dealer: u8) -> Action {
    use CardRank::*;
    match rank {
        Ace | Eight => Action::Split,
        Nine => match dealer {
            7 | 10 | 11 => Action::Stand,
            _ => Action::Split,
        },
        Seven => match dealer {
            2..=7 => Action::Split,
            _ => Action::Hit,
        },
        Six => match dealer {
            2..=6 => Action::Split,
            _ => Action::Hit,
        },
        // Never split fives, play them as a hard ten
        Five => match dealer {
            2..=9 => Action::Double,
            _ => Action::Hit,
        },
        Four => match dealer {
            5 | 6 => Action::Split,
            _ => Action::Hit,
        },
        Two | Three => match dealer {
            2..=7 => Action::Split,
            _ => Action::Hit,
        },
        Ten | Jack | Queen | King => Action::Stand,
    }
}

/// Soft totals table, the total counts one ace as 11.
pub fn soft_action(total: u32, dealer: u8) -> Action {
    match total {
        19..=u32::MAX => Action::Stand,
        18 => match dealer {
            3..=6 => Action::Double,
            2 | 7 | 8 => Action::Stand,
            _ => Action::Hit,
        },
        _ => match dealer {
            5 | 6 => Action::Double,
            _ => Action::Hit,
        },
    }
}

/// Hard totals table.
pub fn hard_action(total: u32, dealer: u8) -> Action {
    match total {
        17..=u32::MAX => Action::Stand,
        13..=16 => match dealer {
            2..=6 => Action::Stand,
            _ => Action::Hit,
        },
        12 => match dealer {
            4..=6 => Action::Stand,
            _ => Action::Hit,
        },
        11 => Action::Double,
        10 => match dealer {
            2..=9 => Action::Double,
            _ => Action::Hit,
        },
        9 => match dealer {
            3..=6 => Action::Double,
            _ => Action::Hit,
        },
        _ => Action::Hit,
    }
}
