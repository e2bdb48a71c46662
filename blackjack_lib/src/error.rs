use thiserror::Error;

/// Errors raised when a caller hands the core something it cannot evaluate.
/// The decision tables themselves never fail, only the boundary that feeds them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("unrecognized card rank: {0:?}")]
    InvalidCardRank(String),
    #[error("a hand needs at least one card")]
    EmptyHand,
    #[error("invalid deck count: {0}, at least one deck is required")]
    InvalidDeckCount(i64),
    #[error("hand is full, at most {max} player cards may be entered")]
    HandFull { max: usize },
    #[error("no dealer up card has been selected")]
    MissingDealerCard,
    #[error("at least two player cards are required for a recommendation")]
    MissingPlayerCards,
    #[error("the dealer up card has already been selected for this round")]
    DealerCardAlreadySet,
    #[error("the dealer's hand totals {total} and must still draw")]
    DealerHandIncomplete { total: u32 },
}
