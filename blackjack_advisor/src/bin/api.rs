use actix_web::{web, App, HttpServer};
use blackjack_advisor::prelude::*;
use clap::Parser;
use log::info;

/// HTTP server hosting one advice session per client.
#[derive(Debug, Parser)]
#[command(name = "api", about = "Serve basic strategy and count advice over HTTP")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    address: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Default number of decks for new sessions
    #[arg(long, default_value_t = 6)]
    decks: i64,
    /// Largest bet multiplier recommended
    #[arg(long, default_value_t = 8)]
    max_bet_multiplier: u32,
    /// Most sessions kept open at once
    #[arg(long, default_value_t = 1024)]
    max_sessions: usize,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    blackjack_advisor::init_logging();
    let args = Args::parse();
    let config = AdvisorConfig::new()
        .address(args.address)
        .port(args.port)
        .num_decks(args.decks)
        .max_bet_multiplier(args.max_bet_multiplier)
        .max_sessions(args.max_sessions)
        .build();

    let (address, port) = (config.address.clone(), config.port);
    info!("listening at {}:{}...", address, port);

    let app_state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind((address, port))?
    .run()
    .await
}
