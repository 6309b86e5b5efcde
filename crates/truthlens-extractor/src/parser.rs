//! Parse LLM output into claims

use crate::error::ExtractorError;
use serde_json::Value;
use tracing::debug;
use truthlens_domain::Claim;
use truthlens_llm::strip_code_fence;

/// Parse an LLM JSON response into claims
///
/// The response must be a JSON array of objects, optionally wrapped in a
/// Markdown code fence. Records with a missing or empty `claim` are
/// skipped; any other claim text is kept verbatim, surrounding whitespace
/// included. A missing `context` becomes the empty string.
///
/// # Errors
///
/// Returns an error if the response is not JSON, is not an array, or
/// contains an element that is not an object.
pub fn parse_llm_response(response: &str) -> Result<Vec<Claim>, ExtractorError> {
    let json: Value = serde_json::from_str(strip_code_fence(response))?;

    let claims_array = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut claims = Vec::with_capacity(claims_array.len());
    for (idx, item) in claims_array.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            ExtractorError::InvalidFormat(format!("Claim {} is not a JSON object", idx))
        })?;

        let text = match obj.get("claim").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!("Skipping claim {} with missing or empty text", idx);
                continue;
            }
        };
        let context = obj.get("context").and_then(Value::as_str).unwrap_or("");

        claims.push(Claim::new(text, context));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"[
            {"claim": "Alice works at Acme", "context": "Employment"}
        ]"#;

        let claims = parse_llm_response(response).unwrap();
        assert_eq!(claims, vec![Claim::new("Alice works at Acme", "Employment")]);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n[{\"claim\": \"Bob lives in Seattle\", \"context\": \"Residence\"}]\n```";

        let claims = parse_llm_response(response).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].text, "Bob lives in Seattle");
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let response = r#"[
            {"claim": "B", "context": ""},
            {"claim": "A", "context": ""},
            {"claim": "B", "context": ""}
        ]"#;

        let texts: Vec<_> = parse_llm_response(response)
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_llm_response("This is not JSON");
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_parse_json_not_array() {
        let result = parse_llm_response(r#"{"claim": "x"}"#);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_array_of_non_objects() {
        let result = parse_llm_response(r#"["just a string"]"#);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_skips_missing_or_empty_claim() {
        let response = r#"[
            {"context": "no claim"},
            {"claim": "", "context": "empty"},
            {"claim": "Charlie lives in Portland"}
        ]"#;

        let claims = parse_llm_response(response).unwrap();
        assert_eq!(claims, vec![Claim::new("Charlie lives in Portland", "")]);
    }

    #[test]
    fn test_parse_keeps_claim_text_verbatim() {
        let response = r#"[
            {"claim": "  Dana runs a bakery ", "context": "Work"},
            {"claim": "   ", "context": "blank"}
        ]"#;

        let claims = parse_llm_response(response).unwrap();
        assert_eq!(
            claims,
            vec![
                Claim::new("  Dana runs a bakery ", "Work"),
                Claim::new("   ", "blank"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_llm_response("[]").unwrap().is_empty());
    }
}
