use crate::AdvisorError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The thirteen ranks a card can take. Suits never matter to the advisor, so a card is just its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CardRank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl CardRank {
    /// Every rank in the order the card picker shows them.
    pub const ALL: [CardRank; 13] = [
        CardRank::Two,
        CardRank::Three,
        CardRank::Four,
        CardRank::Five,
        CardRank::Six,
        CardRank::Seven,
        CardRank::Eight,
        CardRank::Nine,
        CardRank::Ten,
        CardRank::Jack,
        CardRank::Queen,
        CardRank::King,
        CardRank::Ace,
    ];

    /// Base point value used when totalling a hand, aces count 1 here and are promoted by the evaluator.
    pub fn base_value(&self) -> u8 {
        match self {
            CardRank::Two => 2,
            CardRank::Three => 3,
            CardRank::Four => 4,
            CardRank::Five => 5,
            CardRank::Six => 6,
            CardRank::Seven => 7,
            CardRank::Eight => 8,
            CardRank::Nine => 9,
            CardRank::Ten | CardRank::Jack | CardRank::Queen | CardRank::King => 10,
            CardRank::Ace => 1,
        }
    }

    /// Value of the card when it is the dealer's up card, the strategy tables read an ace as 11.
    pub fn dealer_value(&self) -> u8 {
        match self {
            CardRank::Ace => 11,
            _ => self.base_value(),
        }
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, CardRank::Ace)
    }

    /// The literal shown on the card face and used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardRank::Two => "2",
            CardRank::Three => "3",
            CardRank::Four => "4",
            CardRank::Five => "5",
            CardRank::Six => "6",
            CardRank::Seven => "7",
            CardRank::Eight => "8",
            CardRank::Nine => "9",
            CardRank::Ten => "10",
            CardRank::Jack => "J",
            CardRank::Queen => "Q",
            CardRank::King => "K",
            CardRank::Ace => "A",
        }
    }

    /// Parses a comma or whitespace separated list of ranks such as `"10, 6"` or `"A 7"`.
    pub fn parse_list(input: &str) -> Result<Vec<CardRank>, AdvisorError> {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(CardRank::from_str)
            .collect()
    }
}

impl FromStr for CardRank {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "2" => CardRank::Two,
            "3" => CardRank::Three,
            "4" => CardRank::Four,
            "5" => CardRank::Five,
            "6" => CardRank::Six,
            "7" => CardRank::Seven,
            "8" => CardRank::Eight,
            "9" => CardRank::Nine,
            "10" => CardRank::Ten,
            "J" => CardRank::Jack,
            "Q" => CardRank::Queen,
            "K" => CardRank::King,
            "A" => CardRank::Ace,
            _ => return Err(AdvisorError::InvalidCardRank(s.to_string())),
        };
        Ok(rank)
    }
}

impl TryFrom<String> for CardRank {
    type Error = AdvisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardRank> for String {
    fn from(value: CardRank) -> Self {
        value.as_str().to_string()
    }
}

impl Display for CardRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_literal() {
        for rank in CardRank::ALL {
            assert_eq!(rank.as_str().parse::<CardRank>(), Ok(rank));
        }
    }

    #[test]
    fn test_parse_lowercase_and_whitespace() {
        assert_eq!(" a ".parse::<CardRank>(), Ok(CardRank::Ace));
        assert_eq!("q".parse::<CardRank>(), Ok(CardRank::Queen));
    }

    #[test]
    fn test_parse_rejects_unknown_ranks() {
        for bad in ["", "1", "11", "T", "Joker", "0"] {
            assert_eq!(
                bad.parse::<CardRank>(),
                Err(AdvisorError::InvalidCardRank(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_face_cards_are_worth_ten() {
        assert_eq!(CardRank::Jack.base_value(), 10);
        assert_eq!(CardRank::Queen.base_value(), 10);
        assert_eq!(CardRank::King.base_value(), 10);
        assert_eq!(CardRank::Ten.base_value(), 10);
    }

    #[test]
    fn test_ace_values() {
        assert_eq!(CardRank::Ace.base_value(), 1);
        assert_eq!(CardRank::Ace.dealer_value(), 11);
        assert_eq!(CardRank::Seven.dealer_value(), 7);
    }

    #[test]
    fn test_parse_list() {
        let cards = CardRank::parse_list("10, 6").unwrap();
        assert_eq!(cards, vec![CardRank::Ten, CardRank::Six]);
        let cards = CardRank::parse_list("A 7").unwrap();
        assert_eq!(cards, vec![CardRank::Ace, CardRank::Seven]);
        assert!(CardRank::parse_list("A, X").is_err());
    }

    #[test]
    fn test_serde_uses_card_literal() {
        let json = serde_json::to_string(&CardRank::Ten).unwrap();
        assert_eq!(json, "\"10\"");
        let rank: CardRank = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(rank, CardRank::King);
        assert!(serde_json::from_str::<CardRank>("\"Z\"").is_err());
    }
}
