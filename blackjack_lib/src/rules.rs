use serde::{Deserialize, Serialize};

/// Table rules the strategy engine is built for. Fixed for the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Dealer hits on soft 17. Recorded for the caller's benefit, the decision tables are the
    /// hit-soft-17 tables whatever this is set to.
    pub dealer_hits_soft_17: bool,
}

impl RulesetConfig {
    pub fn new(dealer_hits_soft_17: bool) -> Self {
        RulesetConfig {
            dealer_hits_soft_17,
        }
    }
}

impl Default for RulesetConfig {
    /// Multi-deck shoe, dealer hits soft 17, no surrender.
    fn default() -> Self {
        RulesetConfig {
            dealer_hits_soft_17: true,
        }
    }
}
