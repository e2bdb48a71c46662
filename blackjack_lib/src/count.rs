use crate::{AdvisorError, CardRank};
use lazy_static::lazy_static;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

/// Cards in a single deck.
pub const CARDS_PER_DECK: u32 = 52;

/// Decks remaining never drops below half a deck, so the true count stays finite near the end of a shoe.
pub const MIN_DECKS_REMAINING: f64 = 0.5;

lazy_static! {
    /// Hi-Lo tags: low cards +1, neutral cards 0, tens and aces -1.
    static ref HI_LO: HashMap<CardRank, i32> = {
        let mut lookup_table = HashMap::new();
        for rank in CardRank::ALL {
            let tag = match rank {
                CardRank::Two
                | CardRank::Three
                | CardRank::Four
                | CardRank::Five
                | CardRank::Six => 1,
                CardRank::Seven | CardRank::Eight | CardRank::Nine => 0,
                _ => -1,
            };
            lookup_table.insert(rank, tag);
        }
        lookup_table
    };
}

/// The Hi-Lo tag for a single card.
pub fn hi_lo_value(card: CardRank) -> i32 {
    HI_LO[&card]
}

/// Validates a deck count handed in from outside, at least one deck is required.
pub fn validate_decks(total_decks: i64) -> Result<u32, AdvisorError> {
    if total_decks < 1 {
        return Err(AdvisorError::InvalidDeckCount(total_decks));
    }
    u32::try_from(total_decks).map_err(|_| AdvisorError::InvalidDeckCount(total_decks))
}

/// The counting state for one shoe. Lives from the moment a deck size is chosen until the
/// count is reset or the deck size changes. A tracker only takes one in through
/// `CountTracker::from_state`, which checks it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountState {
    pub running_count: i32,
    pub cards_seen: u32,
    pub decks_remaining: f64,
    pub total_decks: u32,
}

impl CountState {
    /// Associated method for a fresh count over `total_decks` decks.
    pub fn new(total_decks: u32) -> CountState {
        CountState {
            running_count: 0,
            cards_seen: 0,
            decks_remaining: total_decks as f64,
            total_decks,
        }
    }

    /// `max(0.5, (total_decks * 52 - cards_seen) / 52)`
    pub fn estimate_decks_remaining(total_decks: u32, cards_seen: u32) -> f64 {
        let cards_left = (total_decks as f64) * (CARDS_PER_DECK as f64) - (cards_seen as f64);
        f64::max(MIN_DECKS_REMAINING, cards_left / CARDS_PER_DECK as f64)
    }
}

/// Trait for a specific counting strategy. Observes every card that is exposed and turns the
/// running count into a true count.
pub trait CountingStrategy {
    fn observe(&mut self, card: CardRank);
    fn running_count(&self) -> i32;
    fn true_count(&self) -> i32;
    fn reset(&mut self, total_decks: i64) -> Result<(), AdvisorError>;
}

/// Hi-Lo card counter. Each observed card must be fed in exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct CountTracker {
    state: CountState,
}

impl CountTracker {
    /// Associated method for building a new tracker over `total_decks` decks.
    pub fn new(total_decks: i64) -> Result<CountTracker, AdvisorError> {
        let total_decks = validate_decks(total_decks)?;
        Ok(CountTracker {
            state: CountState::new(total_decks),
        })
    }

    /// Resume counting from a state carried by the caller. The deck count is validated and
    /// decks remaining is recomputed from the cards seen, the carried value is not trusted.
    pub fn from_state(state: CountState) -> Result<CountTracker, AdvisorError> {
        let total_decks = validate_decks(i64::from(state.total_decks))?;
        Ok(CountTracker {
            state: CountState {
                running_count: state.running_count,
                cards_seen: state.cards_seen,
                decks_remaining: CountState::estimate_decks_remaining(total_decks, state.cards_seen),
                total_decks,
            },
        })
    }

    /// Starts a fresh count over the same number of decks.
    pub fn restart(&mut self) {
        self.state = CountState::new(self.state.total_decks);
    }

    pub fn state(&self) -> &CountState {
        &self.state
    }

    pub fn into_state(self) -> CountState {
        self.state
    }

    pub fn cards_seen(&self) -> u32 {
        self.state.cards_seen
    }

    pub fn decks_remaining(&self) -> f64 {
        self.state.decks_remaining
    }

    pub fn total_decks(&self) -> u32 {
        self.state.total_decks
    }
}

impl CountingStrategy for CountTracker {
    fn observe(&mut self, card: CardRank) {
        self.state.running_count += hi_lo_value(card);
        self.state.cards_seen += 1;
        self.state.decks_remaining =
            CountState::estimate_decks_remaining(self.state.total_decks, self.state.cards_seen);
        debug!(
            "observed {}: running count {}, cards seen {}, decks remaining {:.3}",
            card, self.state.running_count, self.state.cards_seen, self.state.decks_remaining
        );
    }

    fn running_count(&self) -> i32 {
        self.state.running_count
    }

    /// Running count per deck remaining, rounded half away from zero.
    fn true_count(&self) -> i32 {
        if self.state.decks_remaining <= 0.0 {
            return 0;
        }
        ((self.state.running_count as f64) / self.state.decks_remaining).round() as i32
    }

    fn reset(&mut self, total_decks: i64) -> Result<(), AdvisorError> {
        let total_decks = validate_decks(total_decks)?;
        self.state = CountState::new(total_decks);
        Ok(())
    }
}

impl Display for CountTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = "total cards counted:".len() + 2;
        write!(
            f,
            "{:<width$}{:>8}\n{:<width$}{:>8}\n{:<width$}{:>8.2}\n{:<width$}{:>8}",
            "running count:",
            self.state.running_count,
            "total cards counted:",
            self.state.cards_seen,
            "decks remaining:",
            self.state.decks_remaining,
            "true count:",
            self.true_count(),
        )
    }
}
