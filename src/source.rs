//! Loading the flashcard collection from its JSON file.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::models::Flashcard;

/// Bundled sample collection, installed by `zhixiao init`.
const BUNDLED_SAMPLE: &str = include_str!("../data/flashcards.json");

/// A loaded collection. Shared read-only between sessions.
pub type Collection = Arc<[Flashcard]>;

/// Why a collection could not be loaded.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("flashcard file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("flashcard file {} is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// Handles reading the flashcard file.
pub struct CardSource {
    path: PathBuf,
    cache: Mutex<Option<Collection>>,
}

impl CardSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    /// Get default data file location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zhixiao")
            .join("flashcards.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, bypassing the cache.
    pub fn load(&self) -> Result<Collection, LoadError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::Missing {
                path: self.path.clone(),
            },
            _ => LoadError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            },
        })?;

        let cards = parse_collection(&text).map_err(|reason| LoadError::Malformed {
            path: self.path.clone(),
            reason,
        })?;

        tracing::info!(path = %self.path.display(), cards = cards.len(), "loaded flashcards");
        Ok(cards.into())
    }

    /// Load once per process. Failed loads are not remembered, so the next
    /// call reads the file again.
    pub fn load_cached(&self) -> Result<Collection, LoadError> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(ref cards) = *cache {
            return Ok(Arc::clone(cards));
        }

        let cards = self.load()?;
        *cache = Some(Arc::clone(&cards));
        Ok(cards)
    }

    /// Write the bundled sample collection to the data path.
    /// Returns false without touching anything if a file is already there.
    pub fn install_sample(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {:?}", parent))?;
        }

        fs::write(&self.path, BUNDLED_SAMPLE)
            .with_context(|| format!("Failed to write sample data: {:?}", self.path))?;

        tracing::info!(path = %self.path.display(), "installed sample flashcards");
        Ok(true)
    }
}

/// Parse a document that is either a bare array of records or an object
/// with a `flashcards` array. Order is preserved.
pub fn parse_collection(text: &str) -> std::result::Result<Vec<Flashcard>, String> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| format!("not valid JSON: {}", e))?;

    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("flashcards") {
            Some(Value::Array(records)) => records,
            Some(_) => return Err("`flashcards` is not an array".to_string()),
            None => return Err("object has no `flashcards` array".to_string()),
        },
        _ => {
            return Err(
                "expected an array of flashcards or an object with a `flashcards` array"
                    .to_string(),
            )
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let card: Flashcard =
                serde_json::from_value(record).map_err(|e| format!("record {}: {}", i, e))?;

            if card.chinese.trim().is_empty() {
                return Err(format!("record {}: `chinese` is empty", i));
            }
            if card.english.trim().is_empty() {
                return Err(format!("record {}: `english` is empty", i));
            }

            Ok(card)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardType, CollectionStats};

    fn source_with(contents: &str) -> (tempfile::TempDir, CardSource) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, contents).unwrap();
        (dir, CardSource::new(path))
    }

    #[test]
    fn test_bare_array() {
        let cards = parse_collection(
            r#"[
                {"chinese": "你好", "english": "Hello", "type": "vocabulary"},
                {"chinese": "你好吗？", "english": "How are you?", "type": "sentence", "category": "Greetings"}
            ]"#,
        )
        .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].chinese, "你好");
        assert_eq!(cards[1].category.as_deref(), Some("Greetings"));
    }

    #[test]
    fn test_wrapped_object() {
        let cards = parse_collection(
            r#"{"flashcards": [{"chinese": "谢谢", "english": "Thank you", "type": "vocabulary"}]}"#,
        )
        .unwrap();

        assert_eq!(cards.len(), 1);
        assert!(cards[0].is(CardType::Vocabulary));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_collection("[]").unwrap().is_empty());
        assert!(parse_collection(r#"{"flashcards": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(parse_collection("not json").unwrap_err().contains("not valid JSON"));
        assert!(parse_collection(r#"{"cards": []}"#).is_err());
        assert!(parse_collection(r#"{"flashcards": {}}"#).is_err());
        assert!(parse_collection(r#""flashcards""#).is_err());
        assert!(parse_collection("[1, 2]").unwrap_err().starts_with("record 0"));
    }

    #[test]
    fn test_rejects_incomplete_records() {
        let err = parse_collection(
            r#"[
                {"chinese": "你好", "english": "Hello", "type": "vocabulary"},
                {"chinese": "再见", "type": "vocabulary"}
            ]"#,
        )
        .unwrap_err();
        assert!(err.starts_with("record 1"), "{}", err);

        let err = parse_collection(r#"[{"chinese": " ", "english": "Hi", "type": "sentence"}]"#)
            .unwrap_err();
        assert!(err.contains("`chinese` is empty"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = CardSource::new(dir.path().join("absent.json"));

        let err = source.load().unwrap_err();
        assert!(err.is_missing());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_file() {
        let (_dir, source) = source_with("{ oops");

        let err = source.load().unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_load_preserves_order() {
        let (_dir, source) = source_with(
            r#"[
                {"chinese": "一", "english": "one", "type": "vocabulary"},
                {"chinese": "二", "english": "two", "type": "vocabulary"},
                {"chinese": "三", "english": "three", "type": "vocabulary"}
            ]"#,
        );

        let cards = source.load().unwrap();
        let english: Vec<&str> = cards.iter().map(|c| c.english.as_str()).collect();
        assert_eq!(english, ["one", "two", "three"]);
    }

    #[test]
    fn test_cache_shares_collection() {
        let (_dir, source) = source_with(
            r#"[{"chinese": "你好", "english": "Hello", "type": "vocabulary"}]"#,
        );

        let first = source.load_cached().unwrap();
        fs::remove_file(source.path()).unwrap();
        let second = source.load_cached().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_retries_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let source = CardSource::new(path.clone());

        assert!(source.load_cached().unwrap_err().is_missing());

        fs::write(&path, r#"[{"chinese": "你好", "english": "Hello", "type": "vocabulary"}]"#)
            .unwrap();
        assert_eq!(source.load_cached().unwrap().len(), 1);
    }

    #[test]
    fn test_install_sample_does_not_overwrite() {
        let (_dir, source) = source_with("[]");

        assert!(!source.install_sample().unwrap());
        assert_eq!(fs::read_to_string(source.path()).unwrap(), "[]");
    }

    #[test]
    fn test_install_sample_creates_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = CardSource::new(dir.path().join("nested").join("flashcards.json"));

        assert!(source.install_sample().unwrap());

        let stats = CollectionStats::from_cards(&source.load().unwrap());
        assert!(stats.sentences > 0);
        assert!(stats.vocabulary > 0);
    }
}
