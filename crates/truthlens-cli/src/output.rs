//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Alignment, Modify, Style, Width,
    },
};
use truthlens_domain::{EvaluationResult, Tone};

/// Column width for claim text and reasoning in tables
const TEXT_COLUMN_WIDTH: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an evaluation result.
    pub fn format_evaluation(&self, result: &EvaluationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_evaluation_json(result),
            OutputFormat::Table => Ok(self.format_evaluation_table(result)),
            OutputFormat::Quiet => Ok(self.format_evaluation_quiet(result)),
        }
    }

    /// Format an evaluation as JSON.
    fn format_evaluation_json(&self, result: &EvaluationResult) -> Result<String> {
        let claim_results: Vec<serde_json::Value> = result
            .claim_results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "claim": r.claim,
                    "context": r.context,
                    "score": r.score,
                    "verdict": r.verdict.as_str(),
                    "confidence": r.confidence,
                    "reasoning": r.reasoning,
                })
            })
            .collect();

        let claims: Vec<serde_json::Value> = result
            .claims
            .iter()
            .map(|c| serde_json::json!({ "claim": c.text, "context": c.context }))
            .collect();

        let mut value = serde_json::json!({
            "overall_score": result.overall_score,
            "percentage_score": result.percentage_score,
            "verdict": result.verdict.as_str(),
            "total_claims": result.total_claims,
            "claim_results": claim_results,
            "original_text": result.original_text,
            "claims": claims,
        });
        if let (Some(query), Some(answer)) = (&result.query, &result.answer) {
            value["query"] = serde_json::json!(query);
            value["answer"] = serde_json::json!(answer);
        }

        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Format an evaluation as a summary line plus a claim table.
    fn format_evaluation_table(&self, result: &EvaluationResult) -> String {
        let mut out = String::new();

        if let (Some(query), Some(answer)) = (&result.query, &result.answer) {
            out.push_str(&format!("{} {}\n", self.bold("Question:"), query));
            out.push_str(&format!("{} {}\n\n", self.bold("Answer:"), answer.trim()));
        }

        let summary = format!(
            "{} ({:.1}%)",
            result.verdict.label(),
            result.percentage_score
        );
        out.push_str(&format!(
            "{} {}\n",
            self.bold("Verdict:"),
            self.tone(&summary, result.verdict.tone())
        ));

        if result.claim_results.is_empty() {
            out.push_str(&self.tone("No checkable claims found.", Tone::Cautionary));
            return out;
        }

        out.push_str(&format!("Claims checked: {}\n", result.total_claims));

        let mut builder = Builder::default();
        builder.push_record(["#", "Claim", "Verdict", "Score", "Confidence", "Reasoning"]);
        for (index, claim) in result.claim_results.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                claim.claim.clone(),
                self.tone(claim.verdict.label(), claim.verdict.tone()),
                format!("{:.2}", claim.score),
                format!("{:.2}", claim.confidence),
                claim.reasoning.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Modify::new(Columns::single(1)).with(Width::wrap(TEXT_COLUMN_WIDTH)))
            .with(Modify::new(Columns::single(5)).with(Width::wrap(TEXT_COLUMN_WIDTH)));

        out.push_str(&table.to_string());
        out
    }

    /// Format an evaluation in quiet mode (verdict and percentage).
    fn format_evaluation_quiet(&self, result: &EvaluationResult) -> String {
        format!("{} {:.1}", result.verdict.as_str(), result.percentage_score)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.tone(&format!("✓ {}", message), Tone::Positive)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        if self.color_enabled {
            format!("ℹ {}", message).blue().to_string()
        } else {
            format!("ℹ {}", message)
        }
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.tone(&format!("⚠ {}", message), Tone::Cautionary)
    }

    /// Color text by verdict tone if color is enabled.
    fn tone(&self, text: &str, tone: Tone) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match tone {
            Tone::Positive => text.green().to_string(),
            Tone::Cautionary => text.yellow().to_string(),
            Tone::Negative => text.red().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthlens_domain::{Claim, ClaimResult, ClaimVerdict};

    fn scored_result() -> EvaluationResult {
        let claims = vec![
            Claim::new("The capital of France is Paris", "Capital of France"),
            Claim::new("The Moon is made of cheese", "Composition of the Moon"),
        ];
        let results = vec![
            ClaimResult::new(&claims[0], 1.0, ClaimVerdict::Supported, 0.95, "Matches the article"),
            ClaimResult::new(&claims[1], 0.0, ClaimVerdict::Contradicted, 0.9, "Rock, not cheese"),
        ];
        EvaluationResult::from_claim_results(
            "The capital of France is Paris. The Moon is made of cheese.",
            claims,
            results,
        )
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_evaluation(&scored_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["verdict"], "uncertain");
        assert_eq!(value["total_claims"], 2);
        assert_eq!(value["claim_results"][1]["verdict"], "contradicted");
        assert_eq!(value["claims"][0]["claim"], "The capital of France is Paris");
        assert_eq!(value["claims"][0]["context"], "Capital of France");
        assert!(value["claims"][0].get("text").is_none());
        assert!(value.get("query").is_none());
    }

    #[test]
    fn test_json_includes_query() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = EvaluationResult::no_claims("Hi").with_query("Say hi", "Hi");
        let output = formatter.format_evaluation(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["query"], "Say hi");
        assert_eq!(value["verdict"], "no_claims");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_evaluation(&scored_result()).unwrap();
        assert_eq!(output, "uncertain 50.0");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_evaluation(&scored_result()).unwrap();
        assert!(output.contains("Verdict: Uncertain (50.0%)"));
        assert!(output.contains("Claims checked: 2"));
        assert!(output.contains("Contradicted"));
        assert!(output.contains("Reasoning"));
    }

    #[test]
    fn test_table_without_claims() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_evaluation(&EvaluationResult::no_claims("Hello"))
            .unwrap();
        assert!(output.contains("No Claims"));
        assert!(output.contains("No checkable claims found."));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
