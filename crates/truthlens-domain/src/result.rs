//! Result types produced by the scorer and the pipeline

use crate::aggregate::aggregate;
use crate::{Claim, ClaimVerdict, OverallVerdict};

/// Outcome of scoring one claim against its evidence
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimResult {
    /// The claim text that was scored
    pub claim: String,

    /// Display context carried over from the claim
    pub context: String,

    /// Truthfulness score, nominally in [0.0, 1.0]
    pub score: f64,

    /// Discrete verdict
    pub verdict: ClaimVerdict,

    /// Confidence reported by the scoring strategy
    pub confidence: f64,

    /// Short explanation of the verdict
    pub reasoning: String,
}

impl ClaimResult {
    /// Build a result for `claim`
    pub fn new(
        claim: &Claim,
        score: f64,
        verdict: ClaimVerdict,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            claim: claim.text.clone(),
            context: claim.context.clone(),
            score,
            verdict,
            confidence,
            reasoning: reasoning.into(),
        }
    }
}

/// Final structured result of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Mean of the per-claim scores
    pub overall_score: f64,

    /// `overall_score * 100`
    pub percentage_score: f64,

    /// Overall verdict
    pub verdict: OverallVerdict,

    /// Per-claim results, in extraction order
    pub claim_results: Vec<ClaimResult>,

    /// Always equal to `claim_results.len()`
    pub total_claims: usize,

    /// The evaluated text
    pub original_text: String,

    /// Claims as extracted, before scoring
    pub claims: Vec<Claim>,

    /// Question that produced `answer`, for generate-then-evaluate runs
    pub query: Option<String>,

    /// Generated answer, for generate-then-evaluate runs
    pub answer: Option<String>,
}

impl EvaluationResult {
    /// Result for text in which no claims were found
    pub fn no_claims(original_text: impl Into<String>) -> Self {
        Self {
            overall_score: 0.0,
            percentage_score: 0.0,
            verdict: OverallVerdict::NoClaims,
            claim_results: Vec::new(),
            total_claims: 0,
            original_text: original_text.into(),
            claims: Vec::new(),
            query: None,
            answer: None,
        }
    }

    /// Aggregate scored claims into a result
    ///
    /// `claim_results` must be in the same order as `claims`.
    pub fn from_claim_results(
        original_text: impl Into<String>,
        claims: Vec<Claim>,
        claim_results: Vec<ClaimResult>,
    ) -> Self {
        let summary = aggregate(&claim_results);
        Self {
            overall_score: summary.overall_score,
            percentage_score: summary.percentage_score,
            verdict: summary.verdict,
            total_claims: summary.total_claims,
            claim_results,
            original_text: original_text.into(),
            claims,
            query: None,
            answer: None,
        }
    }

    /// Attach the question and generated answer of a generate-then-evaluate run
    pub fn with_query(mut self, query: impl Into<String>, answer: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self.answer = Some(answer.into());
        self
    }
}
