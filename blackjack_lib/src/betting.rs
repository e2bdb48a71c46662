use serde::{Deserialize, Serialize};

/// True count at or above which the advisor raises the bet.
pub const FAVORABLE_TRUE_COUNT: i32 = 2;
/// True count at or below which the advisor drops to the table minimum.
pub const UNFAVORABLE_TRUE_COUNT: i32 = -2;
/// Largest bet multiplier recommended by default.
pub const DEFAULT_MAX_MULTIPLIER: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetAction {
    IncreaseBet,
    MinBet,
    NormalBet,
}

/// Bet sizing directive, `multiplier` is in units of the player's base bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetAdvice {
    pub action: BetAction,
    pub multiplier: u32,
    pub message: String,
}

/// Trait for a generic betting strategy, turns a true count into a bet sizing directive.
pub trait BettingStrategy {
    fn advise(&self, true_count: i32) -> BetAdvice;
}

/// Spread the bet with the true count, capped at `max_multiplier` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingAdvisor {
    max_multiplier: u32,
}

impl BettingAdvisor {
    pub fn new(max_multiplier: u32) -> BettingAdvisor {
        BettingAdvisor {
            max_multiplier: max_multiplier.max(1),
        }
    }

    pub fn max_multiplier(&self) -> u32 {
        self.max_multiplier
    }
}

impl Default for BettingAdvisor {
    fn default() -> Self {
        BettingAdvisor::new(DEFAULT_MAX_MULTIPLIER)
    }
}

impl BettingStrategy for BettingAdvisor {
    fn advise(&self, true_count: i32) -> BetAdvice {
        if true_count >= FAVORABLE_TRUE_COUNT {
            let multiplier = u32::min(true_count.unsigned_abs(), self.max_multiplier);
            BetAdvice {
                action: BetAction::IncreaseBet,
                multiplier,
                message: format!(
                    "True count is +{}, the shoe favors the player. Bet {}x your base unit.",
                    true_count, multiplier
                ),
            }
        } else if true_count <= UNFAVORABLE_TRUE_COUNT {
            BetAdvice {
                action: BetAction::MinBet,
                multiplier: 1,
                message: format!(
                    "True count is {}, the shoe favors the house. Bet the table minimum.",
                    true_count
                ),
            }
        } else {
            BetAdvice {
                action: BetAction::NormalBet,
                multiplier: 1,
                message: format!(
                    "True count is {}, the shoe is neutral. Keep your normal bet.",
                    true_count
                ),
            }
        }
    }
}
