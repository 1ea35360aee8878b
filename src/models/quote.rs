use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuoteCategory {
    Sfw,
    Nsfw,
}

impl QuoteCategory {
    /// Table holding quotes of this category. Only ever built from the enum,
    /// never from request input.
    pub fn table(self) -> &'static str {
        match self {
            QuoteCategory::Sfw => "sfw_quotes",
            QuoteCategory::Nsfw => "nsfw_quotes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuoteCategory::Sfw => "SFW",
            QuoteCategory::Nsfw => "NSFW",
        }
    }
}

/// Raw row from a quotes table. Older tables only carry the `quote` column,
/// and it may be NULL.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteRow {
    pub quote: Option<String>,
    #[sqlx(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: String,
    pub source: Option<String>,
    pub category: QuoteCategory,
}

impl Quote {
    /// `None` when the row has no quote text
    pub fn from_row(row: QuoteRow, category: QuoteCategory) -> Option<Self> {
        Some(Self {
            text: row.quote?,
            source: row.source.filter(|s| !s.trim().is_empty()),
            category,
        })
    }

    /// Text sent to the board
    pub fn display_text(&self) -> String {
        match &self.source {
            Some(source) => format!("{} - {}", self.text, source),
            None => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tables() {
        assert_eq!(QuoteCategory::Sfw.table(), "sfw_quotes");
        assert_eq!(QuoteCategory::Nsfw.table(), "nsfw_quotes");
    }

    #[test]
    fn test_display_text_with_source() {
        let quote = Quote::from_row(
            QuoteRow {
                quote: Some("Stay hungry".to_string()),
                source: Some("Brand".to_string()),
            },
            QuoteCategory::Sfw,
        )
        .unwrap();
        assert_eq!(quote.display_text(), "Stay hungry - Brand");
    }

    #[test]
    fn test_blank_source_is_dropped() {
        let quote = Quote::from_row(
            QuoteRow {
                quote: Some("Just text".to_string()),
                source: Some("   ".to_string()),
            },
            QuoteCategory::Nsfw,
        )
        .unwrap();
        assert!(quote.source.is_none());
        assert_eq!(quote.display_text(), "Just text");
        assert_eq!(quote.category, QuoteCategory::Nsfw);
    }

    #[test]
    fn test_null_quote_is_no_quote() {
        let row = QuoteRow {
            quote: None,
            source: Some("Someone".to_string()),
        };
        assert!(Quote::from_row(row, QuoteCategory::Sfw).is_none());
    }

    #[test]
    fn test_category_serializes_uppercase() {
        let json = serde_json::to_string(&QuoteCategory::Nsfw).unwrap();
        assert_eq!(json, "\"NSFW\"");
    }
}
