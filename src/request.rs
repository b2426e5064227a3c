//! Search request representation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Query fragment restricting results to public LinkedIn profile pages.
pub const SITE_FILTER: &str = "site:linkedin.com/in";

/// Parameters for one collection run.
///
/// A request is immutable once a run starts; the collector only ever
/// borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The user's search terms.
    pub query: String,
    /// Number of pages to fetch (10 results per page).
    pub page_count: u32,
    /// Pause between consecutive page requests.
    pub delay: Duration,
}

impl SearchRequest {
    /// Creates a new request fetching a single page with no delay.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_count: 1,
            delay: Duration::ZERO,
        }
    }

    /// Sets the number of pages to fetch.
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    /// Sets the inter-page delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the inter-page delay from fractional seconds.
    ///
    /// Rejects negative or non-finite values.
    pub fn with_delay_seconds(mut self, seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(SearchError::InvalidRequest(format!(
                "delay must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        self.delay = Duration::from_secs_f64(seconds);
        Ok(self)
    }

    /// Validates the request before any page is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidRequest(
                "query cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the query with the site-restriction clause appended exactly once.
    ///
    /// Any copy of the clause the user already typed is removed first, so the
    /// effective query always ends with a single `site:linkedin.com/in`.
    pub fn effective_query(&self) -> String {
        let stripped = self.query.replace(SITE_FILTER, "");
        let mut terms: Vec<&str> = stripped.split_whitespace().collect();
        terms.push(SITE_FILTER);
        terms.join(" ")
    }
}
