//! Evidence source: the encyclopedic retrieval algorithm

use crate::config::{RetrievalConfig, RetrievalMode};
use crate::error::RetrievalError;
use std::fmt::Display;
use tracing::{debug, warn};
use truthlens_domain::traits::{EmbeddingProvider, EncyclopediaLookup};
use truthlens_domain::EvidenceSnippet;

/// Retrieves ranked evidence snippets for claims
///
/// `W` is the encyclopedia backend and `E` the optional embedding backend
/// used by similarity scoring.
pub struct EvidenceSource<W, E> {
    lookup: W,
    embedder: Option<E>,
    config: RetrievalConfig,
}

impl<W, E> EvidenceSource<W, E>
where
    W: EncyclopediaLookup,
    W::Error: Display,
    E: EmbeddingProvider,
    E::Error: Display,
{
    /// Create an evidence source
    pub fn new(lookup: W, embedder: Option<E>, config: RetrievalConfig) -> Self {
        Self {
            lookup,
            embedder,
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Whether an embedding backend is configured
    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    /// Retrieve up to `top_k` snippets for `claim`, best first
    ///
    /// Never fails: ambiguous and missing pages are skipped, and a service
    /// failure ends the batch with whatever was collected.
    pub fn retrieve(&self, claim: &str, top_k: usize) -> Vec<EvidenceSnippet> {
        match self.config.mode {
            RetrievalMode::Wikipedia => {}
            mode => debug!(%mode, "mode served by encyclopedic lookup"),
        }
        self.retrieve_encyclopedic(claim, top_k)
    }

    fn retrieve_encyclopedic(&self, claim: &str, top_k: usize) -> Vec<EvidenceSnippet> {
        let mut evidence = Vec::with_capacity(top_k);
        if top_k == 0 {
            return evidence;
        }

        let titles = match self.lookup.search(claim, top_k) {
            Ok(titles) => titles,
            Err(e) => {
                warn!("Evidence search failed for claim '{}': {}", claim, e);
                return evidence;
            }
        };

        for title in titles.iter().take(top_k) {
            match self.lookup.fetch(title) {
                Ok(page) => {
                    debug!(title = %title, "collected evidence");
                    evidence.push(
                        EvidenceSnippet::new(
                            evidence_text(&page.content, self.config.sentence_limit),
                            format!("Wikipedia: {}", title),
                        )
                        .with_url(page.url),
                    );
                    if evidence.len() >= top_k {
                        break;
                    }
                }
                Err(e) if e.is_skippable() => {
                    warn!("Skipping evidence candidate: {}", e);
                }
                Err(e) => {
                    warn!(
                        "Evidence retrieval stopped after {} snippets: {}",
                        evidence.len(),
                        e
                    );
                    break;
                }
            }
        }

        evidence
    }

    /// Embed `text` with the configured embedding backend
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::Config` if no embedding backend was
    /// configured, or `RetrievalError::Embedding` if the backend fails.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, RetrievalError> {
        let embedder = self.embedder.as_ref().ok_or_else(|| {
            RetrievalError::Config("No embedding backend configured".to_string())
        })?;
        embedder
            .embed(text)
            .map_err(|e| RetrievalError::Embedding(e.to_string()))
    }
}

/// The evidence source embeds on behalf of similarity scoring
impl<W, E> EmbeddingProvider for EvidenceSource<W, E>
where
    W: EncyclopediaLookup,
    W::Error: Display,
    E: EmbeddingProvider,
    E::Error: Display,
{
    type Error = RetrievalError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        EvidenceSource::embed(self, text)
    }
}

/// Evidence text for a page: the first `sentence_limit` `.`-separated
/// segments rejoined with `". "` plus a trailing `"."`
///
/// # Examples
///
/// ```
/// use truthlens_retrieval::evidence_text;
///
/// assert_eq!(evidence_text("A. B. C", 2), "A.  B.");
/// ```
pub fn evidence_text(content: &str, sentence_limit: usize) -> String {
    let mut text = content
        .split('.')
        .take(sentence_limit)
        .collect::<Vec<_>>()
        .join(". ");
    text.push('.');
    text
}
