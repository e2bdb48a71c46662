//! Settling a finished hand against the dealer's final hand, and the running tally of results.

use crate::{Hand, RulesetConfig};
use serde::Serialize;
use std::fmt::Display;

/// Whether the dealer must draw another card. Below 17 always, soft 17 only when the dealer hits it.
pub fn dealer_must_hit(dealer: &Hand, rules: &RulesetConfig) -> bool {
    let evaluation = dealer.evaluation();
    evaluation.total < 17
        || (evaluation.total == 17 && evaluation.is_soft && rules.dealer_hits_soft_17)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    BlackjackWin,
    Win,
    Push,
    Loss,
    BustLoss,
    DealerBlackjackLoss,
}

impl Outcome {
    /// Associated method for settling `player` against the dealer's final hand. A busted player
    /// loses before the dealer's hand is looked at.
    pub fn settle(player: &Hand, dealer: &Hand) -> Outcome {
        if player.is_busted() {
            return Outcome::BustLoss;
        }
        if dealer.is_busted() {
            return Outcome::Win;
        }
        match (player.is_blackjack(), dealer.is_blackjack()) {
            (true, true) => return Outcome::Push,
            (true, false) => return Outcome::BlackjackWin,
            (false, true) => return Outcome::DealerBlackjackLoss,
            (false, false) => {}
        }
        match player.total().cmp(&dealer.total()) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Push,
        }
    }

    /// Net result in base bet units, blackjack pays 3 to 2.
    pub fn net_units(&self) -> f64 {
        match self {
            Outcome::BlackjackWin => 1.5,
            Outcome::Win => 1.0,
            Outcome::Push => 0.0,
            Outcome::Loss | Outcome::BustLoss | Outcome::DealerBlackjackLoss => -1.0,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::BlackjackWin | Outcome::Win)
    }

    pub fn is_loss(&self) -> bool {
        matches!(
            self,
            Outcome::Loss | Outcome::BustLoss | Outcome::DealerBlackjackLoss
        )
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Outcome::BlackjackWin => "BLACKJACK WIN",
            Outcome::Win => "WIN",
            Outcome::Push => "PUSH",
            Outcome::Loss => "LOSS",
            Outcome::BustLoss => "BUST LOSS",
            Outcome::DealerBlackjackLoss => "DEALER BLACKJACK LOSS",
        };
        write!(f, "{}", text)
    }
}

/// Wins, losses and pushes over the settled hands of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RoundStats {
    pub hands: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub net_units: f64,
}

impl RoundStats {
    pub fn record(&mut self, outcome: Outcome) {
        self.hands += 1;
        if outcome.is_win() {
            self.wins += 1;
        } else if outcome.is_loss() {
            self.losses += 1;
        } else {
            self.pushes += 1;
        }
        self.net_units += outcome.net_units();
    }

    /// Share of settled hands won, in percent. Zero before any hand is settled.
    pub fn win_percentage(&self) -> f64 {
        if self.hands == 0 {
            return 0.0;
        }
        self.wins as f64 / self.hands as f64 * 100.0
    }
}
