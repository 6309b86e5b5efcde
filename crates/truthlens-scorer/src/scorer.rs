//! Core ClaimScorer implementation

use crate::config::ScorerConfig;
use crate::error::ScorerError;
use crate::similarity::{cosine_similarity, SimilarityScore};
use crate::verification::{build_verification_prompt, parse_judgment, Judgment, SYSTEM_PROMPT};
use std::fmt::Display;
use tracing::{debug, error, warn};
use truthlens_domain::traits::{EmbeddingProvider, LlmProvider};
use truthlens_domain::{Claim, ClaimResult, ClaimVerdict, EvidenceSnippet};

/// Reasoning attached to claims without evidence
pub const NO_EVIDENCE_REASONING: &str = "No evidence found to verify this claim";

/// How claims are judged against evidence
#[derive(Debug, Clone)]
pub enum ScoringStrategy<L> {
    /// Ask a language model, falling back to embedding similarity
    ModelVerification(L),
    /// Embedding similarity only
    EmbeddingSimilarity,
}

/// Scores claims against retrieved evidence
pub struct ClaimScorer<L, E> {
    strategy: ScoringStrategy<L>,
    embedder: Option<E>,
    config: ScorerConfig,
}

impl<L, E> ClaimScorer<L, E>
where
    L: LlmProvider,
    L::Error: Display,
    E: EmbeddingProvider,
    E::Error: Display,
{
    /// Create a scorer
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::Config` if the configuration is invalid or the
    /// embedding strategy is selected without an embedding backend.
    pub fn new(
        strategy: ScoringStrategy<L>,
        embedder: Option<E>,
        config: ScorerConfig,
    ) -> Result<Self, ScorerError> {
        config.validate().map_err(ScorerError::Config)?;
        if matches!(strategy, ScoringStrategy::EmbeddingSimilarity) && embedder.is_none() {
            return Err(ScorerError::Config(
                "embedding similarity scoring requires an embedding backend".to_string(),
            ));
        }
        Ok(Self {
            strategy,
            embedder,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score `claim` against `evidence`
    ///
    /// Never fails; a terminal failure yields an `error` verdict.
    pub fn score(&self, claim: &Claim, evidence: &[EvidenceSnippet]) -> ClaimResult {
        if evidence.is_empty() {
            return ClaimResult::new(claim, 0.0, ClaimVerdict::NoEvidence, 0.0, NO_EVIDENCE_REASONING);
        }

        if let ScoringStrategy::ModelVerification(llm) = &self.strategy {
            match self.verify_with_model(llm, &claim.text, evidence) {
                Ok(judgment) => return self.result_from_judgment(claim, judgment),
                Err(e) => warn!("Model verification failed, using embedding similarity: {}", e),
            }
        }

        match self.score_by_similarity(&claim.text, evidence) {
            Ok(similarity) => {
                let verdict = self.config.similarity_verdict(similarity.score);
                debug!(score = similarity.score, %verdict, "similarity score");
                ClaimResult::new(
                    claim,
                    similarity.score,
                    verdict,
                    similarity.max_similarity,
                    format!("Embedding similarity: {:.2}", similarity.score),
                )
            }
            Err(e) => {
                error!("Embedding evaluation failed: {}", e);
                ClaimResult::new(
                    claim,
                    0.0,
                    ClaimVerdict::Error,
                    0.0,
                    format!("Evaluation error: {}", e),
                )
            }
        }
    }

    /// Ask the model for a judgment on `claim`
    pub fn verify_with_model(
        &self,
        llm: &L,
        claim: &str,
        evidence: &[EvidenceSnippet],
    ) -> Result<Judgment, ScorerError> {
        let prompt = build_verification_prompt(claim, evidence, self.config.max_evidence_in_prompt);
        let response = llm
            .generate(&prompt, Some(SYSTEM_PROMPT))
            .map_err(|e| ScorerError::Llm(e.to_string()))?;
        parse_judgment(&response, self.config.default_confidence)
    }

    /// Score `claim` by embedding similarity against every snippet
    pub fn score_by_similarity(
        &self,
        claim: &str,
        evidence: &[EvidenceSnippet],
    ) -> Result<SimilarityScore, ScorerError> {
        let embedder = self.embedder.as_ref().ok_or(ScorerError::NoEmbedder)?;
        let embed = |text: &str| {
            embedder
                .embed(text)
                .map_err(|e| ScorerError::Embedding(e.to_string()))
        };

        let claim_embedding = embed(claim)?;
        let similarities = evidence
            .iter()
            .map(|snippet| cosine_similarity(&claim_embedding, &embed(&snippet.text)?))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SimilarityScore::from_similarities(&similarities, &self.config))
    }

    fn result_from_judgment(&self, claim: &Claim, judgment: Judgment) -> ClaimResult {
        let (score, verdict) = if judgment.contradiction {
            (0.0, ClaimVerdict::Contradicted)
        } else if judgment.supported {
            (judgment.confidence, ClaimVerdict::Supported)
        } else {
            (self.config.unsupported_score, ClaimVerdict::Uncertain)
        };
        debug!(score, %verdict, "model judgment");
        ClaimResult::new(claim, score, verdict, judgment.confidence, judgment.reasoning)
    }
}
