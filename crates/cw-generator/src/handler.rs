//! Response handling: payload parsing and failure classification.

use cw_core::{GenerationError, GenerationResult, TransportError};
use serde::Deserialize;

/// Marker the service puts in the error body for a rejected key.
pub const CREDENTIAL_MARKER: &str = "API_KEY_INVALID";
/// Marker for an exhausted usage quota.
pub const QUOTA_MARKER: &str = "QUOTA_EXCEEDED";
/// Markers for a caller region the service does not serve.
pub const REGION_MARKERS: [&str; 2] = ["location not supported", "location is not supported"];

/// Map a transport failure to the error taxonomy.
///
/// Checks run in a fixed order; the first marker found wins.
#[must_use]
pub fn classify_transport_error(error: &TransportError) -> GenerationError {
    let message = error.message.as_str();

    if message.contains(CREDENTIAL_MARKER) {
        GenerationError::Credential
    } else if message.contains(QUOTA_MARKER) {
        GenerationError::Quota
    } else if REGION_MARKERS.iter().any(|marker| message.contains(marker)) {
        GenerationError::Region
    } else {
        GenerationError::Generic(message.to_string())
    }
}

/// Parse the text payload of a successful call.
///
/// Absent or empty text is [`GenerationError::EmptyResult`]. Anything else
/// must be a JSON object; missing arrays default to empty.
pub fn parse_payload(text: Option<&str>) -> Result<GenerationResult, GenerationError> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(GenerationError::EmptyResult),
    };

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| GenerationError::Parse(e.to_string()))?;

    if !value.is_object() {
        return Err(GenerationError::Parse(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    GenerationResult::deserialize(value).map_err(|e| GenerationError::Parse(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::{ErrorKind, Locale};

    fn transport(message: &str) -> TransportError {
        TransportError::new(message)
    }

    #[test]
    fn test_credential_marker() {
        let error = classify_transport_error(&transport(
            r#"[400 Bad Request] {"error":{"details":[{"reason":"API_KEY_INVALID"}]}}"#,
        ));
        assert_eq!(error, GenerationError::Credential);
        assert_eq!(
            error.user_message(Locale::Ar),
            "مفتاح API غير صالح. يرجى التأكد من صحة المفتاح في إعدادات Netlify."
        );
    }

    #[test]
    fn test_quota_marker() {
        let error = classify_transport_error(&transport("429: QUOTA_EXCEEDED for project"));
        assert_eq!(error, GenerationError::Quota);
        assert_eq!(
            error.user_message(Locale::Ar),
            "تم تجاوز حصة الاستخدام (Quota). يرجى الانتظار قليلاً ثم المحاولة مرة أخرى."
        );
    }

    #[test]
    fn test_region_markers() {
        for message in [
            "User location not supported",
            "User location is not supported for the API use.",
        ] {
            assert_eq!(
                classify_transport_error(&transport(message)),
                GenerationError::Region
            );
        }
    }

    #[test]
    fn test_marker_order() {
        let error = classify_transport_error(&transport("QUOTA_EXCEEDED and API_KEY_INVALID"));
        assert_eq!(error, GenerationError::Credential);
    }

    #[test]
    fn test_unknown_failure_is_generic_with_raw_text() {
        let error = classify_transport_error(&transport("dns error: no such host"));
        assert_eq!(error, GenerationError::Generic("dns error: no such host".to_string()));
        assert_eq!(error.user_message(Locale::Ar), "خطأ: dns error: no such host");
    }

    #[test]
    fn test_parse_conformant_payload() {
        let result =
            parse_payload(Some(r#"{"clues":["a","b"],"synonyms":["c"],"antonyms":[]}"#)).unwrap();
        assert_eq!(result.clues, vec!["a", "b"]);
        assert_eq!(result.synonyms, vec!["c"]);
        assert!(result.antonyms.is_empty());
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let result = parse_payload(Some(r#"{"clues":["only"]}"#)).unwrap();
        assert_eq!(result.clues, vec!["only"]);
        assert!(result.synonyms.is_empty());
        assert!(result.antonyms.is_empty());

        assert_eq!(parse_payload(Some("{}")).unwrap(), GenerationResult::default());
    }

    #[test]
    fn test_parse_passes_elements_through() {
        let result = parse_payload(Some(r#"{"clues":["", "  "]}"#)).unwrap();
        assert_eq!(result.clues, vec!["", "  "]);
    }

    #[test]
    fn test_empty_payload_is_empty_result() {
        assert_eq!(parse_payload(None), Err(GenerationError::EmptyResult));
        assert_eq!(parse_payload(Some("")), Err(GenerationError::EmptyResult));
        assert_eq!(
            GenerationError::EmptyResult.user_message(Locale::Ar),
            "لم يتم إرجاع أي نتيجة. حاول مرة أخرى."
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let error = parse_payload(Some("{\"clues\": [")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(error.user_message(Locale::Ar).starts_with("خطأ: "));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        let error = parse_payload(Some("[1, 2]")).unwrap_err();
        assert_eq!(
            error,
            GenerationError::Parse("expected a JSON object, found an array".to_string())
        );
    }

    #[test]
    fn test_wrong_element_type_is_parse_error() {
        let error = parse_payload(Some(r#"{"clues":[1,2]}"#)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse);
    }
}
