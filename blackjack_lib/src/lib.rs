//! Core of the blackjack advisor: hand evaluation, the basic strategy tables, the Hi-Lo count and
//! bet sizing. Everything here is synchronous and free of I/O; the front ends in
//! `blackjack_advisor` feed it one card at a time.

pub mod betting;
pub mod card;
pub mod count;
mod error;
pub mod hand;
pub mod outcome;
pub mod rules;
pub mod session;
pub mod strategy;

pub use betting::{BetAction, BetAdvice, BettingAdvisor, BettingStrategy};
pub use card::CardRank;
pub use count::{CountState, CountTracker, CountingStrategy};
pub use error::AdvisorError;
pub use hand::{evaluate, Hand, HandEvaluation};
pub use outcome::{Outcome, RoundStats};
pub use rules::RulesetConfig;
pub use session::{AdvisorSession, Recommendation, RoundResult, SessionSnapshot};
pub use strategy::{Action, AdviceNote, DecisionStrategy, StrategyEngine};

pub mod prelude {
    pub use super::{
        evaluate, Action, AdviceNote, AdvisorError, AdvisorSession, BetAction, BetAdvice,
        BettingAdvisor, BettingStrategy, CardRank, CountState, CountTracker, CountingStrategy,
        DecisionStrategy, Hand, HandEvaluation, Outcome, Recommendation, RoundResult, RoundStats,
        RulesetConfig, SessionSnapshot, StrategyEngine,
    };
}
