//! In-memory encyclopedia for tests

use crate::error::RetrievalError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use truthlens_domain::traits::{EncyclopediaLookup, EncyclopediaPage, LookupError};

#[derive(Debug, Clone)]
enum Entry {
    Page(EncyclopediaPage),
    Ambiguous(Vec<String>),
    Missing,
    Failing(String),
}

#[derive(Debug, Default)]
struct Counters {
    search: usize,
    fetch: usize,
}

/// Mock encyclopedia lookup
///
/// Titles are returned by `search` in registration order unless a query
/// has explicit results. Clones share call counters.
///
/// # Examples
///
/// ```
/// use truthlens_retrieval::MockLookup;
/// use truthlens_domain::traits::EncyclopediaLookup;
///
/// let mut lookup = MockLookup::new();
/// lookup.add_page("Paris", "Paris is a city.", "https://en.wikipedia.org/wiki/Paris");
/// lookup.add_ambiguous("Mercury", &["Mercury (planet)"]);
///
/// assert_eq!(lookup.search("anything", 5).unwrap(), vec!["Paris", "Mercury"]);
/// assert!(lookup.fetch("Mercury").is_err());
/// assert_eq!(lookup.fetch_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockLookup {
    entries: Vec<(String, Entry)>,
    search_results: HashMap<String, Vec<String>>,
    search_error: Option<String>,
    counters: Arc<Mutex<Counters>>,
}

impl MockLookup {
    /// Create an empty lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page
    pub fn add_page(&mut self, title: &str, content: &str, url: &str) {
        self.entries.push((
            title.to_string(),
            Entry::Page(EncyclopediaPage {
                title: title.to_string(),
                content: content.to_string(),
                url: url.to_string(),
            }),
        ));
    }

    /// Register a title that resolves to a disambiguation page
    pub fn add_ambiguous(&mut self, title: &str, options: &[&str]) {
        self.entries.push((
            title.to_string(),
            Entry::Ambiguous(options.iter().map(|o| o.to_string()).collect()),
        ));
    }

    /// Register a title that search returns but fetch cannot find
    pub fn add_missing(&mut self, title: &str) {
        self.entries.push((title.to_string(), Entry::Missing));
    }

    /// Register a title whose fetch fails with a service error
    pub fn add_failing(&mut self, title: &str, message: &str) {
        self.entries
            .push((title.to_string(), Entry::Failing(message.to_string())));
    }

    /// Fix the titles returned for one query
    pub fn set_search_results(&mut self, query: &str, titles: &[&str]) {
        self.search_results.insert(
            query.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
    }

    /// Make every search fail
    pub fn fail_search(&mut self, message: &str) {
        self.search_error = Some(message.to_string());
    }

    /// Number of `search` calls so far
    pub fn search_count(&self) -> usize {
        self.counters().search
    }

    /// Number of `fetch` calls so far
    pub fn fetch_count(&self) -> usize {
        self.counters().fetch
    }

    fn counters(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EncyclopediaLookup for MockLookup {
    type Error = RetrievalError;

    fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, Self::Error> {
        self.counters().search += 1;

        if let Some(message) = &self.search_error {
            return Err(RetrievalError::Http(message.clone()));
        }

        let titles = match self.search_results.get(query) {
            Some(titles) => titles.iter().take(limit).cloned().collect(),
            None => self
                .entries
                .iter()
                .take(limit)
                .map(|(title, _)| title.clone())
                .collect(),
        };
        Ok(titles)
    }

    fn fetch(&self, title: &str) -> Result<EncyclopediaPage, LookupError<Self::Error>> {
        self.counters().fetch += 1;

        let entry = self
            .entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, entry)| entry);

        match entry {
            Some(Entry::Page(page)) => Ok(page.clone()),
            Some(Entry::Ambiguous(options)) => Err(LookupError::Disambiguation {
                title: title.to_string(),
                options: options.clone(),
            }),
            Some(Entry::Failing(message)) => {
                Err(LookupError::Service(RetrievalError::Http(message.clone())))
            }
            Some(Entry::Missing) | None => Err(LookupError::NotFound {
                title: title.to_string(),
            }),
        }
    }
}
