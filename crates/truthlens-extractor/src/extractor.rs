//! Core ClaimExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::{PromptBuilder, SYSTEM_PROMPT};
use std::fmt::Display;
use tracing::{debug, info, warn};
use truthlens_domain::traits::LlmProvider;
use truthlens_domain::Claim;

/// The ClaimExtractor converts unstructured text into atomic claims
pub struct ClaimExtractor<L> {
    llm_provider: L,
    config: ExtractorConfig,
}

impl<L> ClaimExtractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new ClaimExtractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract claims from text
    ///
    /// Never fails: if the model path errors, the degraded sentence
    /// splitter is used instead. Empty or whitespace-only text yields no
    /// claims and makes no model call.
    pub fn extract(&self, text: &str) -> Vec<Claim> {
        match self.extract_with_model(text) {
            Ok(claims) => {
                info!("Extracted {} claims", claims.len());
                claims
            }
            Err(e) => {
                warn!("Model extraction failed, using sentence fallback: {}", e);
                let claims = self.fallback_extract(text);
                info!("Fallback extracted {} claims", claims.len());
                claims
            }
        }
    }

    /// Extract claims with the language model only
    pub fn extract_with_model(&self, text: &str) -> Result<Vec<Claim>, ExtractorError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let text = self.truncate(text);
        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .llm_provider
            .generate(&prompt, Some(SYSTEM_PROMPT))
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;
        debug!("LLM response length: {} chars", response.len());

        parse_llm_response(&response)
    }

    /// Degraded extraction by sentence splitting
    ///
    /// Splits on `.`, keeps trimmed fragments longer than
    /// `fallback_min_fragment_chars` that contain a digit character (any
    /// Unicode numeric, so `١٩٩٩` and `²` count), and
    /// returns at most `fallback_max_claims` of them in source order.
    pub fn fallback_extract(&self, text: &str) -> Vec<Claim> {
        text.split('.')
            .map(str::trim)
            .filter(|fragment| fragment.chars().count() > self.config.fallback_min_fragment_chars)
            .filter(|fragment| fragment.chars().any(char::is_numeric))
            .take(self.config.fallback_max_claims)
            .map(|fragment| Claim::new(fragment, self.config.fallback_context.as_str()))
            .collect()
    }

    /// Cut `text` to `max_text_length` characters
    fn truncate<'t>(&self, text: &'t str) -> &'t str {
        match text.char_indices().nth(self.config.max_text_length) {
            Some((byte_idx, _)) => {
                warn!(
                    "Text exceeds {} chars; truncating before extraction",
                    self.config.max_text_length
                );
                &text[..byte_idx]
            }
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthlens_llm::MockProvider;

    fn create_test_extractor(response: &str) -> (ClaimExtractor<MockProvider>, MockProvider) {
        let llm = MockProvider::new(response);
        let extractor = ClaimExtractor::new(llm.clone(), ExtractorConfig::default());
        (extractor, llm)
    }

    #[test]
    fn test_extract_empty_response() {
        let (extractor, _) = create_test_extractor("[]");
        assert!(extractor.extract("Some text").is_empty());
    }

    #[test]
    fn test_blank_input_skips_model() {
        let (extractor, llm) = create_test_extractor("[]");
        assert!(extractor.extract("   \n\t").is_empty());
        assert!(extractor.extract("").is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_system_prompt_is_sent() {
        let (extractor, llm) = create_test_extractor("[]");
        extractor.extract("Paris is in France.");
        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert!(calls[0].prompt.contains("Paris is in France."));
    }

    #[test]
    fn test_long_text_is_truncated_on_char_boundary() {
        let llm = MockProvider::new("[]");
        let config = ExtractorConfig {
            max_text_length: 3,
            ..ExtractorConfig::default()
        };
        let extractor = ClaimExtractor::new(llm.clone(), config);

        extractor.extract("éééééé");
        let prompt = &llm.calls()[0].prompt;
        assert!(prompt.contains("Text to analyze:\nééé\n"));
        assert!(!prompt.contains("éééé"));
    }

    #[test]
    fn test_fallback_rules() {
        let (extractor, _) = create_test_extractor("[]");
        let claims = extractor.fallback_extract(
            "Event A. In 1999 it happened. Too short. Another fact with 42 in it.",
        );
        let texts: Vec<_> = claims.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["In 1999 it happened", "Another fact with 42 in it"]);
        assert!(claims.iter().all(|c| c.context == "Extracted from text"));
    }

    #[test]
    fn test_fallback_counts_non_ascii_digits() {
        let (extractor, _) = create_test_extractor("not json");
        let claims =
            extractor.extract("Founded in the year ١٩٩٩ by them. The square is ² units wide.");
        let texts: Vec<_> = claims.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Founded in the year ١٩٩٩ by them", "The square is ² units wide"]
        );
        assert!(claims.iter().all(|c| c.context == "Extracted from text"));
    }

    #[test]
    fn test_fallback_length_is_strict() {
        let (extractor, _) = create_test_extractor("[]");
        // Exactly 10 characters is dropped, 11 is kept.
        assert!(extractor.fallback_extract("abcdefghi1").is_empty());
        assert_eq!(extractor.fallback_extract("abcdefghij1").len(), 1);
    }

    #[test]
    fn test_fallback_caps_claim_count() {
        let (extractor, _) = create_test_extractor("[]");
        let text: String = (0..15).map(|i| format!("Sentence number {} here. ", i)).collect();
        let claims = extractor.fallback_extract(&text);
        assert_eq!(claims.len(), 10);
        assert_eq!(claims[0].text, "Sentence number 0 here");
        assert_eq!(claims[9].text, "Sentence number 9 here");
    }

    #[test]
    fn test_extract_with_model_reports_parse_errors() {
        let (extractor, _) = create_test_extractor("not json");
        assert!(matches!(
            extractor.extract_with_model("Some text 123"),
            Err(ExtractorError::JsonParse(_))
        ));
    }

    #[test]
    fn test_extract_with_model_reports_generation_errors() {
        let mut llm = MockProvider::new("[]");
        llm.add_error_containing("Text to analyze:");
        let extractor = ClaimExtractor::new(llm, ExtractorConfig::default());
        assert!(matches!(
            extractor.extract_with_model("Some text 123"),
            Err(ExtractorError::Llm(_))
        ));
    }
}
