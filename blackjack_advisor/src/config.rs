use blackjack_lib::prelude::*;
use serde::Deserialize;

/// Struct for configuring an advice session and the front ends that host it.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub num_decks: i64,
    pub dealer_hits_soft_17: bool,
    pub max_bet_multiplier: u32,
    pub max_player_cards: usize,
    pub max_sessions: usize,
    pub address: String,
    pub port: u16,
}

impl AdvisorConfig {
    /// Associated method for returning a new `AdvisorConfigBuilder` object. Every setting is optional,
    /// anything left unset takes the standard multi-deck value on `build()`.
    pub fn new() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Method for starting an `AdvisorSession` with these configurations.
    pub fn session(&self) -> Result<AdvisorSession, AdvisorError> {
        Ok(AdvisorSession::new(self.num_decks)?
            .ruleset(RulesetConfig::new(self.dealer_hits_soft_17))
            .betting(BettingAdvisor::new(self.max_bet_multiplier))
            .max_player_cards(self.max_player_cards))
    }
}

impl Default for AdvisorConfig {
    /// Returns the standard configurations: six decks, dealer hits soft 17.
    fn default() -> Self {
        AdvisorConfig::new().build()
    }
}

/// Struct to implement builder pattern for `AdvisorConfig`
#[derive(Debug, Clone, Default)]
pub struct AdvisorConfigBuilder {
    num_decks: Option<i64>,
    dealer_hits_soft_17: Option<bool>,
    max_bet_multiplier: Option<u32>,
    max_player_cards: Option<usize>,
    max_sessions: Option<usize>,
    address: Option<String>,
    port: Option<u16>,
}

impl AdvisorConfigBuilder {
    /// Method for choosing the number of decks in the shoe
    pub fn num_decks(&mut self, decks: i64) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the flag that records whether the dealer hits soft seventeen, default is true
    pub fn dealer_hits_soft_17(&mut self, hits: bool) -> &mut Self {
        self.dealer_hits_soft_17 = Some(hits);
        self
    }

    /// Method for capping the bet spread recommended at high counts
    pub fn max_bet_multiplier(&mut self, multiplier: u32) -> &mut Self {
        self.max_bet_multiplier = Some(multiplier);
        self
    }

    /// Method for setting how many cards the player may enter for one hand
    pub fn max_player_cards(&mut self, cards: usize) -> &mut Self {
        self.max_player_cards = Some(cards);
        self
    }

    /// Method for capping how many sessions the server keeps open at once
    pub fn max_sessions(&mut self, sessions: usize) -> &mut Self {
        self.max_sessions = Some(sessions);
        self
    }

    pub fn address(&mut self, address: impl Into<String>) -> &mut Self {
        self.address = Some(address.into());
        self
    }

    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Method for building an `AdvisorConfig` object from the given `AdvisorConfigBuilder` object.
    pub fn build(&mut self) -> AdvisorConfig {
        AdvisorConfig {
            num_decks: self.num_decks.unwrap_or(6),
            dealer_hits_soft_17: self.dealer_hits_soft_17.unwrap_or(true),
            max_bet_multiplier: self
                .max_bet_multiplier
                .unwrap_or(blackjack_lib::betting::DEFAULT_MAX_MULTIPLIER),
            max_player_cards: self
                .max_player_cards
                .unwrap_or(blackjack_lib::session::DEFAULT_MAX_PLAYER_CARDS),
            max_sessions: self
                .max_sessions
                .unwrap_or(crate::store::DEFAULT_MAX_SESSIONS),
            address: self
                .address
                .take()
                .unwrap_or_else(|| String::from("127.0.0.1")),
            port: self.port.unwrap_or(8080),
        }
    }
}

/// Session settings as they arrive in a JSON request body.
#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    pub num_decks: Option<i64>,
    pub dealer_hits_soft_17: Option<bool>,
    pub max_bet_multiplier: Option<u32>,
}

impl SessionParams {
    /// Layers the request's settings over the server's defaults.
    pub fn apply(&self, defaults: &AdvisorConfig) -> AdvisorConfig {
        AdvisorConfig {
            num_decks: self.num_decks.unwrap_or(defaults.num_decks),
            dealer_hits_soft_17: self
                .dealer_hits_soft_17
                .unwrap_or(defaults.dealer_hits_soft_17),
            max_bet_multiplier: self
                .max_bet_multiplier
                .unwrap_or(defaults.max_bet_multiplier),
            ..defaults.clone()
        }
    }
}
