//! LLM prompt engineering for claim extraction

/// System prompt sent with every extraction request
pub const SYSTEM_PROMPT: &str =
    "You are a precise fact extraction system. Extract only verifiable factual claims.";

/// Builds prompts for the LLM to extract claims
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for `text`
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + OUTPUT_FORMAT_REMINDER.len() + self.text.len() + 32,
        );

        // 1. What counts as a claim
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The text to analyze
        prompt.push_str("Text to analyze:\n");
        prompt.push_str(self.text);
        prompt.push_str("\n\n");

        // 3. Output format and example
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract all atomic factual claims from the following text.
A factual claim is a statement that can be verified as true or false.

For each claim, provide:
1. The specific factual statement
2. The context (what it refers to)"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Format your response as a JSON array, where each item has:
- "claim": the specific factual statement
- "context": brief context about what this claim refers to

Example format:
[
  {"claim": "Beethoven met Mozart in Vienna", "context": "Historical meeting between composers"},
  {"claim": "The meeting occurred in 1787", "context": "Year of the meeting"}
]

Return ONLY the JSON array, no other text."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("Alice works at Acme Corp").build();
        assert!(prompt.contains("Text to analyze:\nAlice works at Acme Corp"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = PromptBuilder::new("Test text").build();
        assert!(prompt.contains("Extract all atomic factual claims"));
        assert!(prompt.contains("\"claim\""));
        assert!(prompt.contains("\"context\""));
        assert!(prompt.ends_with("Return ONLY the JSON array, no other text."));
    }

    #[test]
    fn test_instructions_precede_text() {
        let prompt = PromptBuilder::new("UNIQUE_MARKER").build();
        let instructions = prompt.find("Extract all atomic").unwrap();
        let text = prompt.find("UNIQUE_MARKER").unwrap();
        let example = prompt.find("Example format").unwrap();
        assert!(instructions < text && text < example);
    }
}
