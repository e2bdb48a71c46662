pub mod api;
pub mod config;
pub mod display;
pub mod interactive;
pub mod store;

pub mod prelude {
    pub use super::{
        api::{configure, AppState, UserError},
        config::{AdvisorConfig, AdvisorConfigBuilder, SessionParams},
        display::{format_count, format_recommendation, format_round_result, format_snapshot},
        interactive::InteractiveAdvisor,
        store::{SessionId, SessionStore, StoreError},
    };
    pub use blackjack_lib::prelude::*;
}

/// Initializes logging for the binaries, `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
