//! Wikipedia lookup over the MediaWiki Action API
//!
//! Two calls are used: `list=search` to find candidate titles and
//! `prop=extracts|info|pageprops` to fetch a page as plain text together
//! with its canonical URL and disambiguation flag.

use crate::config::RetrievalConfig;
use crate::error::RetrievalError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;
use truthlens_domain::traits::{EncyclopediaLookup, EncyclopediaPage, LookupError};

/// Blocking Wikipedia client
#[derive(Debug)]
pub struct WikipediaClient {
    endpoint: String,
    client: Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Deserialize)]
struct PageResponse {
    query: Option<PageQuery>,
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: String,
    fullurl: Option<String>,
    pageprops: Option<PageProps>,
}

#[derive(Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

impl WikipediaClient {
    /// Create a client from retrieval settings
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::Config` if the settings are invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &RetrievalConfig) -> Result<Self, RetrievalError> {
        config.validate().map_err(RetrievalError::Config)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RetrievalError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.resolved_endpoint(),
            client,
            min_interval: config.min_request_interval(),
            last_request: Mutex::new(None),
        })
    }

    /// API endpoint in use
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sleep until `min_interval` has passed since the previous request
    fn throttle(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }

    fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, RetrievalError> {
        self.throttle();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Http(format!("HTTP {}", status)));
        }
        Ok(response.json::<T>()?)
    }
}

impl EncyclopediaLookup for WikipediaClient {
    type Error = RetrievalError;

    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, Self::Error> {
        let limit = limit.to_string();
        let response: SearchResponse = self.get(&[
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", &limit),
            ("srprop", ""),
        ])?;

        let titles: Vec<String> = response
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default();
        debug!(query, found = titles.len(), "wikipedia search");
        Ok(titles)
    }

    fn fetch(&self, title: &str) -> Result<EncyclopediaPage, LookupError<Self::Error>> {
        let response: PageResponse = self
            .get(&[
                ("prop", "extracts|info|pageprops"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .map_err(LookupError::Service)?;

        let page = response
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| LookupError::NotFound {
                title: title.to_string(),
            })?;

        page_from_response(title, page)
    }
}

fn page_from_response(
    requested: &str,
    page: Page,
) -> Result<EncyclopediaPage, LookupError<RetrievalError>> {
    if page.missing || page.invalid {
        return Err(LookupError::NotFound {
            title: requested.to_string(),
        });
    }
    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some())
    {
        return Err(LookupError::Disambiguation {
            title: requested.to_string(),
            options: disambiguation_options(&page.extract),
        });
    }

    let url = page.fullurl.unwrap_or_else(|| {
        format!("https://en.wikipedia.org/wiki/{}", page.title.replace(' ', "_"))
    });
    Ok(EncyclopediaPage {
        title: page.title,
        content: page.extract,
        url,
    })
}

/// Candidate topics listed on a disambiguation page, one per line
fn disambiguation_options(extract: &str) -> Vec<String> {
    extract
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('='))
        .map(|line| line.split(',').next().unwrap_or(line).trim().to_string())
        .collect()
}
