use blackjack_advisor::prelude::*;
use clap::{Parser, Subcommand};
use log::error;
use std::io;
use std::process;

/// Basic strategy and Hi-Lo count advice from the command line.
#[derive(Debug, Parser)]
#[command(name = "blackjack_advisor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend an action for a single hand, e.g. `advise --player 10,6 --dealer 10`
    Advise {
        /// Number of decks in the shoe
        #[arg(long, default_value_t = 6)]
        decks: i64,
        /// Player cards, comma or space separated
        #[arg(long)]
        player: String,
        /// Dealer up card
        #[arg(long)]
        dealer: String,
        /// Record that the dealer stands on soft 17
        #[arg(long)]
        stand_soft_17: bool,
    },
    /// Advise round after round, keeping the count across rounds
    Interactive {
        /// Number of decks in the shoe
        #[arg(long, default_value_t = 6)]
        decks: i64,
        /// Largest bet multiplier recommended
        #[arg(long, default_value_t = 8)]
        max_bet_multiplier: u32,
    },
}

/// One-shot advice. Fails unless at least two player cards and a dealer card were given.
fn advise(config: &AdvisorConfig, player: &str, dealer: &str) -> Result<String, AdvisorError> {
    let player_cards = CardRank::parse_list(player)?;
    let dealer_card: CardRank = dealer.parse()?;

    let mut session = config.session()?;
    for card in player_cards {
        session.add_player_card(card)?;
    }
    session.set_dealer_card(dealer_card)?;
    session.recommendation()?;
    Ok(format_snapshot(&session.snapshot()))
}

fn main() {
    blackjack_advisor::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Advise {
            decks,
            player,
            dealer,
            stand_soft_17,
        } => {
            let config = AdvisorConfig::new()
                .num_decks(decks)
                .dealer_hits_soft_17(!stand_soft_17)
                .build();
            match advise(&config, &player, &dealer) {
                Ok(text) => print!("{}", text),
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            }
        }
        Command::Interactive {
            decks,
            max_bet_multiplier,
        } => {
            let config = AdvisorConfig::new()
                .num_decks(decks)
                .max_bet_multiplier(max_bet_multiplier)
                .build();
            let session = match config.session() {
                Ok(session) => session,
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            };
            let stdin = io::stdin();
            let mut advisor = InteractiveAdvisor::new(session, stdin.lock(), io::stdout());
            if let Err(e) = advisor.run() {
                error!("terminal closed: {}", e);
                process::exit(1);
            }
        }
    }
}
