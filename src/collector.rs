//! The paginated search-and-collect loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::provider::PAGE_SIZE;
use crate::{Result, ResultSet, SearchError, SearchProvider, SearchRequest};

/// What to do when a page request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Record the failure and continue with the next page.
    #[default]
    Continue,
    /// Record the failure and stop issuing further requests.
    Abort,
}

/// Cooperative cancellation flag checked between pages.
///
/// Cloning shares the flag, so a UI thread can hold one handle while the
/// collector polls the other. An in-flight request is not interrupted;
/// cancellation takes effect before the next request is issued.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the collector to stop before its next page request.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation was signalled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Incremental progress, reported before the first page and after each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Pages fully processed so far (including failed ones).
    pub pages_completed: u32,
    /// Total pages requested.
    pub page_count: u32,
    /// Rows collected so far.
    pub rows_collected: usize,
}

/// A failed page request, kept with its page index.
#[derive(Debug)]
pub struct PageFailure {
    /// Zero-based page index.
    pub page: u32,
    /// The underlying cause.
    pub error: SearchError,
}

/// The outcome of one collection run.
///
/// Per-page failures never discard rows that were already collected; the
/// worst outcome is an incomplete set.
#[derive(Debug, Default)]
pub struct Collection {
    /// All collected rows, in page order then in-page order.
    pub rows: ResultSet,
    /// Number of page requests actually issued.
    pub pages_attempted: u32,
    /// Pages whose request failed.
    pub page_failures: Vec<PageFailure>,
    /// Items skipped because they were missing required fields.
    pub skipped_items: u32,
    /// Whether the run stopped early (cancellation or abort-on-error).
    pub aborted: bool,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

impl Collection {
    /// Returns whether every requested page was fetched without failures.
    pub fn is_complete(&self) -> bool {
        !self.aborted && self.page_failures.is_empty()
    }
}

/// Sequentially fetches pages from a provider and accumulates rows.
///
/// One collection run at a time per collector; there is no shared mutable
/// state between runs.
pub struct Collector {
    provider: Arc<dyn SearchProvider>,
    error_policy: ErrorPolicy,
}

impl Collector {
    /// Creates a collector over the given provider.
    pub fn new<P: SearchProvider + 'static>(provider: P) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    /// Creates a collector over a shared provider.
    pub fn from_arc(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            error_policy: ErrorPolicy::default(),
        }
    }

    /// Sets the error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Runs a full collection without cancellation or progress reporting.
    pub async fn collect(&self, request: &SearchRequest) -> Result<Collection> {
        self.collect_with(request, &CancelToken::new(), |_| {}).await
    }

    /// Runs a collection, checking `cancel` between pages and invoking
    /// `on_progress` before the first page and after every page.
    ///
    /// Fails only on an invalid request, before any network activity; page
    /// failures are recorded in the returned [`Collection`].
    pub async fn collect_with(
        &self,
        request: &SearchRequest,
        cancel: &CancelToken,
        mut on_progress: impl FnMut(&Progress),
    ) -> Result<Collection> {
        request.validate()?;

        let start = Instant::now();
        let query = request.effective_query();
        let mut collection = Collection::default();

        info!(query = %query, pages = request.page_count, "starting collection");
        on_progress(&Progress {
            pages_completed: 0,
            page_count: request.page_count,
            rows_collected: 0,
        });

        for page in 0..request.page_count {
            // Inter-page delay; none before the first page.
            if page > 0 && !request.delay.is_zero() {
                debug!(delay = ?request.delay, "waiting before next page");
                sleep(request.delay).await;
            }

            if cancel.is_cancelled() {
                info!(page, "collection cancelled");
                collection.aborted = true;
                break;
            }

            let offset = page * PAGE_SIZE + 1;
            debug!(page, offset, "fetching page");
            collection.pages_attempted += 1;

            let failed = match self.provider.fetch_page(&query, offset, PAGE_SIZE).await {
                Ok(items) => {
                    if items.is_empty() {
                        info!(page, "empty result page");
                    }
                    for item in items {
                        match item.into_row() {
                            Some(row) => collection.rows.add_row(row),
                            None => {
                                warn!(page, "skipping item with missing title or link");
                                collection.skipped_items += 1;
                            }
                        }
                    }
                    false
                }
                Err(error) => {
                    warn!(page, %error, "page request failed");
                    collection.page_failures.push(PageFailure { page, error });
                    true
                }
            };

            on_progress(&Progress {
                pages_completed: page + 1,
                page_count: request.page_count,
                rows_collected: collection.rows.len(),
            });

            if failed && self.error_policy == ErrorPolicy::Abort {
                collection.aborted = true;
                break;
            }
        }

        collection.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            rows = collection.rows.len(),
            pages = collection.pages_attempted,
            failures = collection.page_failures.len(),
            skipped = collection.skipped_items,
            "collection finished"
        );
        Ok(collection)
    }
}
