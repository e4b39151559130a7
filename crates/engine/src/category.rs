//! Keyword-based market categorisation

use crate::types::Market;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Crypto,
    Sports,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Politics => "politics",
            Self::Crypto => "crypto",
            Self::Sports => "sports",
            Self::Other => "other",
        }
    }
}

/// Matching order matters: the first category with a hit wins.
pub const CATEGORY_KEYWORDS: [(Category, &[&str]); 3] = [
    (
        Category::Politics,
        &[
            "trump",
            "biden",
            "president",
            "congress",
            "senate",
            "democrat",
            "republican",
            "election",
        ],
    ),
    (
        Category::Crypto,
        &["bitcoin", "btc", "ethereum", "eth", "solana", "crypto"],
    ),
    (
        Category::Sports,
        &["nfl", "nba", "mlb", "championship", "playoffs", "game"],
    ),
];

/// Plain substring match, so "eth" also hits inside "whether".
pub fn match_category_text(text: &str) -> Category {
    let text = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

pub fn match_category(market: &Market) -> Category {
    let text = format!(
        "{} {}",
        market.question,
        market.description.as_deref().unwrap_or("")
    );
    match_category_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_matches() {
        assert_eq!(match_category_text("Will the Senate pass the bill?"), Category::Politics);
        assert_eq!(match_category_text("Solana above $200 by March?"), Category::Crypto);
        assert_eq!(match_category_text("NBA Finals: Celtics vs Lakers"), Category::Sports);
        assert_eq!(match_category_text("Will it rain in Paris tomorrow?"), Category::Other);
    }

    #[test]
    fn test_table_order_breaks_ties() {
        // politics and crypto keywords both present: politics comes first
        assert_eq!(
            match_category_text("Will Trump launch a bitcoin reserve?"),
            Category::Politics
        );
        // crypto before sports
        assert_eq!(match_category_text("BTC price after the NFL game?"), Category::Crypto);
    }

    #[test]
    fn test_substring_semantics() {
        assert_eq!(match_category_text("Whether the merger closes"), Category::Crypto);
        assert_eq!(match_category_text("New video game release date"), Category::Sports);
    }

    #[test]
    fn test_description_is_searched() {
        let market = Market {
            id: "1".into(),
            question: "Who will win?".into(),
            description: Some("Resolves per the official MLB standings.".into()),
            ..Default::default()
        };
        assert_eq!(match_category(&market), Category::Sports);
    }

    #[test]
    fn test_always_one_tag() {
        for text in ["", "   ", "ELECTION", "ethereum", "playoffs"] {
            let c = match_category_text(text);
            assert!(matches!(
                c,
                Category::Politics | Category::Crypto | Category::Sports | Category::Other
            ));
        }
        assert_eq!(match_category_text("ELECTION"), Category::Politics);
    }
}
