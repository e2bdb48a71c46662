use blackjack_lib::prelude::*;

const WIDTH: usize = 60;
const TEXT_WIDTH: usize = "recommended action:".len() + 10;
const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;

/// Formats a recommendation as a block of labelled lines.
pub fn format_recommendation(recommendation: &Recommendation) -> String {
    let cards = recommendation
        .player_cards
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<&str>>()
        .join(", ");
    let kind = if recommendation.hand.is_pair {
        "pair"
    } else if recommendation.hand.is_soft {
        "soft"
    } else {
        "hard"
    };
    let (action, description) = if recommendation.busted {
        ("BUSTED", "Busted - Nothing left to play")
    } else {
        (
            recommendation.action.code(),
            recommendation.description.as_str(),
        )
    };
    let mut out = format!(
        "{:-^WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {}\n",
        "recommendation",
        "player cards:",
        cards,
        "hand:",
        format!("{} {}", kind, recommendation.hand.total),
        "dealer up card:",
        recommendation.dealer_up_card.as_str(),
        "recommended action:",
        action,
        description,
    );
    for note in recommendation.notes.iter().filter(|n| **n != AdviceNote::Busted) {
        out.push_str(&format!("note: {}\n", note));
    }
    out
}

/// Formats a settled round with the session's running tally.
pub fn format_round_result(result: &RoundResult) -> String {
    let dealer_cards = result
        .dealer_cards
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<&str>>()
        .join(", ");
    format!(
        "{:-^WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.1}\n",
        "result",
        "dealer cards:",
        format!("{} ({})", dealer_cards, result.dealer_total),
        "your total:",
        result.player_total,
        "outcome:",
        result.outcome.to_string(),
        "hands won/lost/pushed:",
        format!(
            "{}/{}/{}",
            result.stats.wins, result.stats.losses, result.stats.pushes
        ),
        "win rate %:",
        result.stats.win_percentage(),
    )
}

/// Formats the count and the bet advice that goes with it.
pub fn format_count(count: &CountState, true_count: i32, advice: &BetAdvice) -> String {
    format!(
        "{:-^WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
        {}\n\
        {}\n",
        "count",
        "running count:",
        count.running_count,
        "cards seen:",
        count.cards_seen,
        "decks remaining:",
        count.decks_remaining,
        "true count:",
        true_count,
        "bet multiplier:",
        format!("{}x", advice.multiplier),
        advice.message,
        "-".repeat(WIDTH),
    )
}

/// Formats a whole session snapshot.
pub fn format_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    if let Some(recommendation) = &snapshot.recommendation {
        out.push_str(&format_recommendation(recommendation));
    }
    out.push_str(&format_count(
        &snapshot.count,
        snapshot.true_count,
        &snapshot.bet_advice,
    ));
    out
}
