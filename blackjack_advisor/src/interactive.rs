//! Round by round advice over a line based terminal.

use crate::display::{format_count, format_recommendation, format_round_result};
use blackjack_lib::prelude::*;
use log::warn;
use std::io::{self, BufRead, Write};

/// What the loop should do after a prompt was answered.
enum Input {
    Cards(Vec<CardRank>),
    Empty,
    Quit,
}

/// Drives an `AdvisorSession` from `reader`, writing prompts and advice to `writer`.
pub struct InteractiveAdvisor<R: BufRead, W: Write> {
    session: AdvisorSession,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> InteractiveAdvisor<R, W> {
    pub fn new(session: AdvisorSession, reader: R, writer: W) -> Self {
        InteractiveAdvisor {
            session,
            reader,
            writer,
        }
    }

    pub fn session(&self) -> &AdvisorSession {
        &self.session
    }

    /// Runs rounds until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.writer,
            "cards: 2-10, J, Q, K, A. commands: count, reset, decks N, quit"
        )?;
        while self.play_round()? {}
        Ok(())
    }

    /// Plays one round. Returns false once the user is done.
    fn play_round(&mut self) -> io::Result<bool> {
        let player_cards = loop {
            match self.prompt("player cards> ")? {
                Input::Quit => return Ok(false),
                Input::Cards(cards) if cards.len() >= 2 => break cards,
                Input::Cards(_) => writeln!(self.writer, "enter at least two cards")?,
                Input::Empty => {}
            }
        };
        let dealer_card = loop {
            match self.prompt("dealer up card> ")? {
                Input::Quit => return Ok(false),
                Input::Cards(cards) if cards.len() == 1 => break cards[0],
                _ => writeln!(self.writer, "enter exactly one card")?,
            }
        };

        for card in player_cards {
            self.add_player_card(card)?;
        }
        if let Err(e) = self.session.set_dealer_card(dealer_card) {
            writeln!(self.writer, "error: {}", e)?;
        }
        self.write_recommendation()?;

        // Cards dealt to the player after the first decision
        loop {
            match self.prompt("next player card (blank when done)> ")? {
                Input::Quit => return Ok(false),
                Input::Empty => break,
                Input::Cards(cards) => {
                    for card in cards {
                        self.add_player_card(card)?;
                    }
                    if self.session.player_cards().len() >= 2 {
                        self.write_recommendation()?;
                    }
                    if Hand::new(self.session.player_cards().to_vec())
                        .map(|h| h.is_busted())
                        .unwrap_or(false)
                    {
                        break;
                    }
                }
            }
        }

        // With the dealer's cards the hand is settled, without them the round just closes
        let advice = loop {
            let dealer_cards = match self.prompt("dealer hole card and draws (blank to skip)> ")? {
                Input::Quit => return Ok(false),
                Input::Empty => vec![],
                Input::Cards(cards) => cards,
            };
            let revealed = match self.prompt("other revealed cards (blank for none)> ")? {
                Input::Quit => return Ok(false),
                Input::Empty => vec![],
                Input::Cards(cards) => cards,
            };
            if dealer_cards.is_empty() {
                break self.session.finish_round(&revealed);
            }
            match self.session.settle_round(&dealer_cards, &revealed) {
                Ok(result) => {
                    let text = format_round_result(&result);
                    write!(self.writer, "{}", text)?;
                    break result.bet_advice;
                }
                Err(e) => writeln!(self.writer, "error: {}", e)?,
            }
        };
        let count = *self.session.count();
        let text = format_count(&count, self.session.true_count(), &advice);
        write!(self.writer, "{}", text)?;
        Ok(true)
    }

    fn add_player_card(&mut self, card: CardRank) -> io::Result<()> {
        if let Err(e) = self.session.add_player_card(card) {
            warn!("card {} not added: {}", card, e);
            writeln!(self.writer, "error: {}", e)?;
        }
        Ok(())
    }

    fn write_recommendation(&mut self) -> io::Result<()> {
        match self.session.recommendation() {
            Ok(recommendation) => {
                let text = format_recommendation(&recommendation);
                write!(self.writer, "{}", text)
            }
            Err(e) => writeln!(self.writer, "error: {}", e),
        }
    }

    /// Prompts until a line of cards, a blank line or `quit` arrives. Commands are handled here.
    fn prompt(&mut self, prompt: &str) -> io::Result<Input> {
        loop {
            write!(self.writer, "{}", prompt)?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(Input::Quit);
            }
            let line = line.trim();
            let lower = line.to_ascii_lowercase();
            let mut words = lower.split_whitespace();

            match (words.next(), words.next()) {
                (None, _) => return Ok(Input::Empty),
                (Some("quit"), _) | (Some("exit"), _) => return Ok(Input::Quit),
                (Some("count"), _) => {
                    let snapshot = self.session.snapshot();
                    let text =
                        format_count(&snapshot.count, snapshot.true_count, &snapshot.bet_advice);
                    write!(self.writer, "{}", text)?;
                }
                (Some("reset"), _) => {
                    self.session.reset_count();
                    writeln!(self.writer, "count reset, hand cleared")?;
                }
                (Some("decks"), Some(n)) => match n.parse::<i64>() {
                    Ok(n) => match self.session.change_decks(n) {
                        Ok(()) => writeln!(self.writer, "now counting {} deck(s)", n)?,
                        Err(e) => writeln!(self.writer, "error: {}", e)?,
                    },
                    Err(_) => writeln!(self.writer, "error: {:?} is not a deck count", n)?,
                },
                _ => match CardRank::parse_list(line) {
                    Ok(cards) => return Ok(Input::Cards(cards)),
                    Err(e) => writeln!(self.writer, "error: {}", e)?,
                },
            }
        }
    }
}
