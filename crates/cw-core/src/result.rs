//! Parsed generation output.

use serde::{Deserialize, Deserializer, Serialize};

/// Clues, synonyms and antonyms returned for one query.
///
/// Missing or `null` fields deserialize to empty sequences. Elements are
/// passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clues: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub antonyms: Vec<String>,
}

impl GenerationResult {
    /// Clue at a zero-based index.
    #[must_use]
    pub fn clue(&self, index: usize) -> Option<&str> {
        self.clues.get(index).map(String::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: GenerationResult = serde_json::from_str(r#"{"clues":["a"]}"#).unwrap();
        assert_eq!(result.clues, vec!["a"]);
        assert!(result.synonyms.is_empty());
        assert!(result.antonyms.is_empty());
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let result: GenerationResult =
            serde_json::from_str(r#"{"clues":null,"synonyms":["s"],"antonyms":null}"#).unwrap();
        assert!(result.clues.is_empty());
        assert_eq!(result.synonyms, vec!["s"]);
    }

    #[test]
    fn test_clue_lookup() {
        let result = GenerationResult {
            clues: vec!["first".into(), "second".into()],
            ..Default::default()
        };
        assert_eq!(result.clue(1), Some("second"));
        assert_eq!(result.clue(2), None);
    }
}
