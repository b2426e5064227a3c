//! # linkscout
//!
//! A paginated search collector for public LinkedIn profiles, built on the
//! Google Custom Search JSON API.
//!
//! The collector appends a site-restriction clause to the query, fetches one
//! page of results at a time with a configurable delay between pages, and
//! accumulates normalized rows. Rows can be exported as CSV or refined into
//! structured profile records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use linkscout::{Collector, GoogleCse, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = GoogleCse::new("api-key", "engine-id");
//!     let collector = Collector::new(provider);
//!
//!     let request = SearchRequest::new("facility managers united kingdom")
//!         .with_page_count(3)
//!         .with_delay_seconds(5.0)?;
//!
//!     let collection = collector.collect(&request).await?;
//!     for row in collection.rows.items() {
//!         println!("{}: {}", row.title, row.url);
//!     }
//!     Ok(())
//! }
//! ```

mod collector;
mod error;
mod provider;
mod request;
mod result;

pub mod export;
pub mod profile;

pub use collector::{
    CancelToken, Collection, Collector, ErrorPolicy, PageFailure, Progress,
};
pub use error::{Result, SearchError};
pub use provider::{CseImage, GoogleCse, Pagemap, ProviderItem, SearchProvider, PAGE_SIZE};
pub use request::{SearchRequest, SITE_FILTER};
pub use result::{ResultRow, ResultSet};
