//! Pipeline orchestration

use crate::config::MeterConfig;
use crate::error::MeterError;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info};
use truthlens_domain::traits::{EmbeddingProvider, EncyclopediaLookup, LlmProvider};
use truthlens_domain::{Claim, ClaimResult, EvaluationResult};
use truthlens_extractor::ClaimExtractor;
use truthlens_retrieval::EvidenceSource;
use truthlens_scorer::{ClaimScorer, ScoringStrategy};

/// Estimates how truthful a text is
///
/// Generic over the language model `L`, the embedding backend `E` and the
/// encyclopedia lookup `W`. The model is shared by the extractor and the
/// scorer; the scorer embeds through the evidence source, which owns the
/// embedder. No state survives between evaluations.
pub struct HallucinationMeter<L, E, W> {
    llm: Arc<L>,
    extractor: ClaimExtractor<Arc<L>>,
    evidence: Arc<EvidenceSource<W, E>>,
    scorer: ClaimScorer<Arc<L>, Arc<EvidenceSource<W, E>>>,
    config: MeterConfig,
}

impl<L, E, W> HallucinationMeter<L, E, W>
where
    L: LlmProvider + Send + Sync,
    L::Error: Display,
    E: EmbeddingProvider + Send + Sync,
    E::Error: Display,
    W: EncyclopediaLookup + Send + Sync,
    W::Error: Display,
{
    /// Assemble a meter from its backends
    ///
    /// # Errors
    ///
    /// Returns `MeterError::Config` if any configuration is invalid, or if
    /// embedding similarity scoring is selected without an embedder.
    pub fn new(
        llm: L,
        lookup: W,
        embedder: Option<E>,
        config: MeterConfig,
    ) -> Result<Self, MeterError> {
        config.validate().map_err(MeterError::Config)?;

        let llm = Arc::new(llm);
        let has_embedder = embedder.is_some();
        let evidence = Arc::new(EvidenceSource::new(
            lookup,
            embedder,
            config.retrieval.clone(),
        ));

        let strategy = if config.use_llm_verification {
            ScoringStrategy::ModelVerification(Arc::clone(&llm))
        } else {
            ScoringStrategy::EmbeddingSimilarity
        };
        let scorer = ClaimScorer::new(
            strategy,
            has_embedder.then(|| Arc::clone(&evidence)),
            config.scorer.clone(),
        )
        .map_err(|e| MeterError::Config(e.to_string()))?;

        Ok(Self {
            extractor: ClaimExtractor::new(Arc::clone(&llm), config.extractor.clone()),
            evidence,
            scorer,
            llm,
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Evaluate `text` for hallucinations
    ///
    /// Never fails: extraction, retrieval and scoring each degrade rather
    /// than abort.
    pub fn evaluate(&self, text: &str) -> EvaluationResult {
        info!(chars = text.chars().count(), "Starting evaluation");

        let claims = self.extractor.extract(text);
        if claims.is_empty() {
            info!("No claims found");
            return EvaluationResult::no_claims(text);
        }

        let claim_results = if self.config.claim_workers > 1 && claims.len() > 1 {
            self.check_claims_parallel(&claims)
        } else {
            claims.iter().map(|claim| self.check_claim(claim)).collect()
        };

        let result = EvaluationResult::from_claim_results(text, claims, claim_results);
        info!(
            claims = result.total_claims,
            score = result.overall_score,
            verdict = %result.verdict,
            "Evaluation complete"
        );
        result
    }

    /// Generate an answer to `query`, then evaluate it
    ///
    /// # Errors
    ///
    /// Returns `MeterError::Generation` if the model cannot answer.
    pub fn evaluate_query(&self, query: &str) -> Result<EvaluationResult, MeterError> {
        info!("Generating answer for query");
        let answer = self
            .llm
            .generate(query, None)
            .map_err(|e| MeterError::Generation(e.to_string()))?;

        Ok(self.evaluate(&answer).with_query(query, answer))
    }

    /// Retrieve evidence for one claim and score it
    fn check_claim(&self, claim: &Claim) -> ClaimResult {
        let evidence = self
            .evidence
            .retrieve(&claim.text, self.config.evidence_per_claim);
        debug!(claim = %claim.text, snippets = evidence.len(), "Retrieved evidence");

        let result = self.scorer.score(claim, &evidence);
        debug!(claim = %claim.text, score = result.score, verdict = %result.verdict, "Scored claim");
        result
    }

    /// Score claims on scoped worker threads, keeping extraction order
    fn check_claims_parallel(&self, claims: &[Claim]) -> Vec<ClaimResult> {
        let chunk_size = claims.len().div_ceil(self.config.claim_workers);

        std::thread::scope(|scope| {
            let handles: Vec<_> = claims
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|claim| self.check_claim(claim))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}
