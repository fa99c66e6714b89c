//! Data models for flashcards and the card-type filter.

use serde::{Deserialize, Serialize};

/// The two kinds of card a learner can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Sentence,
    Vocabulary,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Vocabulary => "vocabulary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sentence => "Sentences",
            Self::Vocabulary => "Vocabulary",
        }
    }

    /// Parse a recognized type tag. Anything else is not filterable.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sentence" => Some(Self::Sentence),
            "vocabulary" => Some(Self::Vocabulary),
            _ => None,
        }
    }

    pub fn all() -> &'static [CardType] {
        &[CardType::Sentence, CardType::Vocabulary]
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Sentence => Self::Vocabulary,
            Self::Vocabulary => Self::Sentence,
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.to_lowercase())
            .ok_or_else(|| format!("unknown card type '{}' (expected sentence or vocabulary)", s))
    }
}

/// A single Chinese/English pair.
///
/// `kind` keeps the raw `type` tag from the source so that records with an
/// unrecognized tag survive a load untouched; they just never match a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub chinese: String,
    pub english: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
impl Flashcard {
    pub fn new(chinese: &str, english: &str, kind: CardType) -> Self {
        Self {
            chinese: chinese.to_string(),
            english: english.to_string(),
            kind: kind.as_str().to_string(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

impl Flashcard {
    pub fn card_type(&self) -> Option<CardType> {
        CardType::parse(&self.kind)
    }

    pub fn is(&self, kind: CardType) -> bool {
        self.kind == kind.as_str()
    }
}

/// Per-type record counts for a loaded collection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub sentences: usize,
    pub vocabulary: usize,
    pub unrecognized: usize,
}

impl CollectionStats {
    pub fn from_cards(cards: &[Flashcard]) -> Self {
        let mut stats = Self {
            total: cards.len(),
            ..Default::default()
        };

        for card in cards {
            match card.card_type() {
                Some(CardType::Sentence) => stats.sentences += 1,
                Some(CardType::Vocabulary) => stats.vocabulary += 1,
                None => stats.unrecognized += 1,
            }
        }

        stats
    }

    pub fn count(&self, kind: CardType) -> usize {
        match kind {
            CardType::Sentence => self.sentences,
            CardType::Vocabulary => self.vocabulary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_type_parse_is_exact() {
        assert_eq!(CardType::parse("sentence"), Some(CardType::Sentence));
        assert_eq!(CardType::parse("vocabulary"), Some(CardType::Vocabulary));
        assert_eq!(CardType::parse("Sentence"), None);
        assert_eq!(CardType::parse("idiom"), None);
    }

    #[test]
    fn test_card_type_from_str_is_case_insensitive() {
        assert_eq!("Vocabulary".parse::<CardType>(), Ok(CardType::Vocabulary));
        assert!("grammar".parse::<CardType>().is_err());
    }

    #[test]
    fn test_toggle_flips_between_kinds() {
        assert_eq!(CardType::Sentence.toggle(), CardType::Vocabulary);
        assert_eq!(CardType::Vocabulary.toggle(), CardType::Sentence);
    }

    #[test]
    fn test_flashcard_keeps_unknown_type() {
        let card: Flashcard = serde_json::from_str(
            r#"{"chinese": "成语", "english": "idiom", "type": "idiom"}"#,
        )
        .unwrap();

        assert_eq!(card.kind, "idiom");
        assert_eq!(card.card_type(), None);
        assert!(!card.is(CardType::Sentence));
        assert!(!card.is(CardType::Vocabulary));
    }

    #[test]
    fn test_category_null_is_absent() {
        let card: Flashcard = serde_json::from_str(
            r#"{"chinese": "你好", "english": "Hello", "type": "vocabulary", "category": null}"#,
        )
        .unwrap();

        assert_eq!(card.category, None);
        assert!(!serde_json::to_string(&card).unwrap().contains("category"));
    }

    #[test]
    fn test_collection_stats() {
        let cards = vec![
            Flashcard::new("你好", "Hello", CardType::Vocabulary),
            Flashcard::new("你好吗？", "How are you?", CardType::Sentence),
            Flashcard::new("谢谢", "Thanks", CardType::Vocabulary),
            Flashcard {
                kind: "idiom".to_string(),
                ..Flashcard::new("马马虎虎", "So-so", CardType::Vocabulary)
            },
        ];

        let stats = CollectionStats::from_cards(&cards);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(CardType::Sentence), 1);
        assert_eq!(stats.count(CardType::Vocabulary), 2);
        assert_eq!(stats.unrecognized, 1);
    }
}
