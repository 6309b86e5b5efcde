//! Meter construction from a profile, and off-runtime execution.
//!
//! The providers use blocking HTTP clients, which must be built, used and
//! dropped outside the async runtime. Everything here therefore runs
//! inside [`run_blocking`].

use crate::config::Profile;
use crate::error::{CliError, Result};
use std::time::Duration;
use tracing::{debug, info};
use truthlens_llm::{EmbeddingBackend, LlmBackend};
use truthlens_meter::{HallucinationMeter, MeterConfig};
use truthlens_retrieval::WikipediaClient;

/// The meter as assembled from real backends.
pub type Meter = HallucinationMeter<LlmBackend, EmbeddingBackend, WikipediaClient>;

/// Build a meter for `profile` with `config`.
///
/// # Errors
///
/// Fails when a provider name is unknown, an API key is missing, or the
/// pipeline configuration is rejected.
pub fn build_meter(profile: &Profile, config: MeterConfig) -> Result<Meter> {
    let endpoint = profile.endpoint.as_deref();
    let llm_kind = profile.llm_kind()?;
    let llm = LlmBackend::from_env(llm_kind, profile.model.as_deref(), endpoint)?;

    let embedder = match profile.embedding_kind()? {
        Some(kind) => {
            // The endpoint override belongs to the generation provider.
            let embedding_endpoint = if kind == llm_kind { endpoint } else { None };
            Some(EmbeddingBackend::from_env(
                kind,
                profile.embedding_model.as_deref(),
                embedding_endpoint,
            )?)
        }
        None => None,
    };

    let lookup = WikipediaClient::new(&config.retrieval)?;
    info!(
        provider = llm.name(),
        embeddings = embedder.is_some(),
        retrieval = %config.retrieval.mode,
        "Assembled meter"
    );

    Ok(HallucinationMeter::new(llm, lookup, embedder, config)?)
}

/// Run `job` on the blocking thread pool, bounded by `timeout_secs`.
///
/// On timeout the worker thread is abandoned, not interrupted.
pub async fn run_blocking<T, F>(timeout_secs: u64, job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);
    match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(CliError::Worker(e.to_string())),
        Err(_) => {
            debug!(timeout_secs, "Evaluation exceeded its time budget");
            Err(CliError::Timeout(timeout_secs))
        }
    }
}
