//! Model-based verification: prompt construction and judgment parsing

use crate::error::ScorerError;
use serde_json::Value;
use truthlens_domain::EvidenceSnippet;
use truthlens_llm::strip_code_fence;

/// System prompt sent with every verification request
pub const SYSTEM_PROMPT: &str = "You are a fact-checking system. Be precise and objective.";

/// The model's verdict on one claim
#[derive(Debug, Clone, PartialEq)]
pub struct Judgment {
    /// Whether the evidence supports the claim
    pub supported: bool,

    /// Model-reported confidence; passed through unclamped
    pub confidence: f64,

    /// Short explanation
    pub reasoning: String,

    /// Whether the evidence contradicts the claim
    pub contradiction: bool,
}

/// Build the verification prompt for `claim` using the first
/// `max_evidence` snippets
pub fn build_verification_prompt(
    claim: &str,
    evidence: &[EvidenceSnippet],
    max_evidence: usize,
) -> String {
    let evidence_text = evidence
        .iter()
        .take(max_evidence)
        .map(|snippet| format!("Source: {}\n{}", snippet.source, snippet.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Evaluate whether the following claim is supported by the provided evidence.

Claim: {claim}

Evidence:
{evidence_text}

Respond with a JSON object containing:
- "supported": true/false (is the claim supported by evidence?)
- "confidence": 0.0-1.0 (how confident are you?)
- "reasoning": brief explanation
- "contradiction": true/false (does evidence contradict the claim?)

Return ONLY the JSON object, no other text."#
    )
}

/// Parse the model's JSON judgment
///
/// Missing `confidence` becomes `default_confidence`; missing `supported`
/// and `contradiction` become `false`; missing `reasoning` becomes empty.
///
/// # Errors
///
/// Returns an error if the response is not a JSON object or a field has
/// the wrong type.
pub fn parse_judgment(response: &str, default_confidence: f64) -> Result<Judgment, ScorerError> {
    let json: Value = serde_json::from_str(strip_code_fence(response))?;
    let obj = json
        .as_object()
        .ok_or_else(|| ScorerError::InvalidJudgment("Expected JSON object".to_string()))?;

    let confidence = match obj.get("confidence") {
        None | Some(Value::Null) => default_confidence,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default_confidence),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            ScorerError::InvalidJudgment(format!("confidence '{}' is not a number", s))
        })?,
        Some(other) => {
            return Err(ScorerError::InvalidJudgment(format!(
                "confidence has unexpected type: {}",
                other
            )))
        }
    };

    let reasoning = match obj.get("reasoning") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(Judgment {
        supported: flag(obj.get("supported"), "supported")?,
        confidence,
        reasoning,
        contradiction: flag(obj.get("contradiction"), "contradiction")?,
    })
}

fn flag(value: Option<&Value>, name: &str) -> Result<bool, ScorerError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ScorerError::InvalidJudgment(format!(
            "{} must be a boolean, got {}",
            name, other
        ))),
    }
}
