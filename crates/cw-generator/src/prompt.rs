//! Prompt and output schema construction.
//!
//! The prompt states what is wanted (N clues for the word at a difficulty,
//! plus synonyms and antonyms) and forbids revealing the word. The schema
//! pins the reply to three string arrays.

use cw_core::{GenerationRequest, Query, ThinkingLevel};
use serde_json::{json, Value};

/// Names of the three required reply fields, in schema order.
pub const RESULT_FIELDS: [&str; 3] = ["clues", "synonyms", "antonyms"];

/// Builds the request sent to the generation service.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt, effort hint and schema for one query.
    #[must_use]
    pub fn build(query: &Query) -> GenerationRequest {
        GenerationRequest {
            prompt: Self::build_prompt(query),
            thinking_level: ThinkingLevel::Low,
            response_schema: Self::response_schema(),
        }
    }

    /// The natural-language instruction.
    #[must_use]
    pub fn build_prompt(query: &Query) -> String {
        debug_assert!(!query.word().trim().is_empty(), "Query word must not be blank");

        format!(
            "أعطني {count} تلميحات كلمات متقاطعة لكلمة \"{word}\". الصعوبة: {difficulty}. \
             لا تذكر الكلمة. الإجابة الوحيدة هي الكلمة. أعطني أيضاً مرادفات وأضداد.",
            count = query.hint_count(),
            word = query.word(),
            difficulty = query.difficulty().descriptor(),
        )
    }

    /// OBJECT with three required ARRAY-of-STRING properties.
    #[must_use]
    pub fn response_schema() -> Value {
        let string_array = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

        let properties: serde_json::Map<String, Value> = RESULT_FIELDS
            .iter()
            .map(|field| (field.to_string(), string_array.clone()))
            .collect();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": RESULT_FIELDS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::{Difficulty, HintCount};

    fn query() -> Query {
        Query::new("بحر", HintCount::Five, Difficulty::Hard).unwrap()
    }

    #[test]
    fn test_prompt_embeds_parameters() {
        let prompt = PromptBuilder::build_prompt(&query());
        assert!(prompt.starts_with("أعطني 5 تلميحات"));
        assert!(prompt.contains("\"بحر\""));
        assert!(prompt.contains("الصعوبة: صعب ويحتاج لتفكير."));
    }

    #[test]
    fn test_prompt_forbids_revealing_word_and_asks_for_related_words() {
        let prompt = PromptBuilder::build_prompt(&query());
        assert!(prompt.contains("لا تذكر الكلمة."));
        assert!(prompt.contains("مرادفات وأضداد"));
    }

    #[test]
    fn test_prompt_uses_trimmed_word() {
        let query = Query::new("  شمس  ", HintCount::One, Difficulty::VeryEasy).unwrap();
        let prompt = PromptBuilder::build_prompt(&query);
        assert!(prompt.contains("لكلمة \"شمس\"."));
        assert!(prompt.contains("الصعوبة: سهل جداً ومباشر."));
    }

    #[test]
    fn test_schema_requires_three_string_arrays() {
        let schema = PromptBuilder::response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"], json!(["clues", "synonyms", "antonyms"]));
        for field in RESULT_FIELDS {
            assert_eq!(schema["properties"][field]["type"], "ARRAY");
            assert_eq!(schema["properties"][field]["items"]["type"], "STRING");
        }
    }

    #[test]
    fn test_build_requests_low_effort() {
        let request = PromptBuilder::build(&query());
        assert_eq!(request.thinking_level, ThinkingLevel::Low);
        assert_eq!(request.response_schema, PromptBuilder::response_schema());
    }
}
