//! Cleanup of raw model output before parsing

/// Strip Markdown code-fence markers from a model response
///
/// Removes a leading ```` ```json ```` or ```` ``` ```` marker and a
/// trailing ```` ``` ````, then trims surrounding whitespace. Text without
/// fences is only trimmed.
///
/// # Examples
///
/// ```
/// use truthlens_llm::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n[1, 2]\n```"), "[1, 2]");
/// assert_eq!(strip_code_fence("  {}  "), "{}");
/// ```
pub fn strip_code_fence(response: &str) -> &str {
    let mut text = response.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_trimmed() {
        assert_eq!(strip_code_fence("\n  [\"a\"]\n"), "[\"a\"]");
    }

    #[test]
    fn test_json_tagged_fence() {
        let raw = "```json\n[{\"claim\": \"x\", \"context\": \"y\"}]\n```";
        assert_eq!(strip_code_fence(raw), "[{\"claim\": \"x\", \"context\": \"y\"}]");
    }

    #[test]
    fn test_untagged_fence() {
        assert_eq!(strip_code_fence("```\n{\"supported\": true}\n```"), "{\"supported\": true}");
    }

    #[test]
    fn test_only_leading_fence() {
        assert_eq!(strip_code_fence("```json {\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_inner_backticks_untouched() {
        assert_eq!(strip_code_fence("say `hi`"), "say `hi`");
    }
}
