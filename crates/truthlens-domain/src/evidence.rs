//! Evidence module - retrieved support for a claim

/// A retrieved text fragment plus its provenance
///
/// Snippets carry no reference back to the claim that triggered their
/// retrieval; the orchestrator pairs claims and evidence lists by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceSnippet {
    /// Evidence text
    pub text: String,

    /// Human-readable provenance label (e.g. "Wikipedia: Paris")
    pub source: String,

    /// Canonical URL of the source page, when known
    pub url: Option<String>,
}

impl EvidenceSnippet {
    /// Create a snippet without a URL
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            url: None,
        }
    }

    /// Attach the canonical URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
