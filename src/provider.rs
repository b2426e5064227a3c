//! Search provider seam and the Google Custom Search implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Result, ResultRow, SearchError};

/// Number of results per page, the provider's pagination unit.
pub const PAGE_SIZE: u32 = 10;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Trait for fetching one page of search results.
///
/// The collector only talks to this seam, so tests can substitute a
/// scripted provider for the real API.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetches up to `page_size` items for `query` starting at the 1-based
    /// result `offset`.
    async fn fetch_page(&self, query: &str, offset: u32, page_size: u32)
        -> Result<Vec<ProviderItem>>;
}

/// One raw item as returned by the provider.
///
/// All fields are optional on the wire; items missing `title` or `link`
/// are treated as malformed and skipped by the collector.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
    #[serde(default)]
    pub pagemap: Option<Pagemap>,
}

/// Structured page metadata attached to an item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagemap {
    #[serde(default)]
    pub cse_image: Vec<CseImage>,
    #[serde(default)]
    pub metatags: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CseImage {
    pub src: Option<String>,
}

impl ProviderItem {
    /// Returns the item's thumbnail URL, preferring `cse_image` over the
    /// `og:image` metatag.
    pub fn thumbnail(&self) -> Option<String> {
        let pagemap = self.pagemap.as_ref()?;
        if let Some(src) = pagemap.cse_image.first().and_then(|img| img.src.clone()) {
            return Some(src);
        }
        pagemap
            .metatags
            .first()
            .and_then(|tags| tags.get("og:image"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    /// Converts the item into a normalized row.
    ///
    /// Returns `None` when `title` or `link` is missing. A missing snippet
    /// maps to an empty string.
    pub fn into_row(self) -> Option<ResultRow> {
        let thumbnail = self.thumbnail();
        let title = self.title?;
        let url = self.link?;
        let mut row = ResultRow::new(title, url, self.snippet.unwrap_or_default());
        if let Some(thumbnail) = thumbnail {
            row = row.with_thumbnail(thumbnail);
        }
        Some(row)
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    items: Option<Vec<ProviderItem>>,
}

/// Google Custom Search JSON API client.
///
/// Credentials are plain constructor parameters; nothing here reads the
/// environment.
pub struct GoogleCse {
    client: Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

impl GoogleCse {
    /// Creates a new client with the given API key and search engine id.
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("Mozilla/5.0 (compatible; linkscout/0.1)")
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Uses a custom reqwest client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Overrides the API endpoint (for tests or staging gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn page_url(&self, query: &str, offset: u32, page_size: u32) -> String {
        format!(
            "{}?key={}&cx={}&q={}&start={}&num={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.engine_id),
            urlencoding::encode(query),
            offset,
            page_size
        )
    }
}

#[async_trait]
impl SearchProvider for GoogleCse {
    async fn fetch_page(
        &self,
        query: &str,
        offset: u32,
        page_size: u32,
    ) -> Result<Vec<ProviderItem>> {
        let url = self.page_url(query, offset, page_size);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let payload: CseResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Parse(format!("invalid search payload: {e}")))?;
        Ok(payload.items.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_parameters() {
        let cse = GoogleCse::new("KEY", "CX123");
        let url = cse.page_url("data scientist site:linkedin.com/in", 11, 10);
        assert!(url.starts_with("https://www.googleapis.com/customsearch/v1?"));
        assert!(url.contains("key=KEY"));
        assert!(url.contains("cx=CX123"));
        assert!(url.contains("q=data%20scientist%20site%3Alinkedin.com%2Fin"));
        assert!(url.contains("start=11"));
        assert!(url.contains("num=10"));
    }

    #[test]
    fn test_with_base_url() {
        let cse = GoogleCse::new("k", "c").with_base_url("http://127.0.0.1:9999/search");
        let url = cse.page_url("q", 1, 10);
        assert!(url.starts_with("http://127.0.0.1:9999/search?"));
    }

    #[test]
    fn test_with_client() {
        let client = Client::builder().user_agent("test-agent").build().unwrap();
        let _cse = GoogleCse::new("k", "c").with_client(client);
    }

    #[test]
    fn test_response_deserialization_with_items() {
        let json = r#"{
            "items": [
                {
                    "title": "Jane Doe - Facility Manager | LinkedIn",
                    "link": "https://linkedin.com/in/janedoe",
                    "snippet": "Facility Manager at Acme.",
                    "pagemap": {
                        "cse_image": [{"src": "https://img.example.com/jane.jpg"}]
                    }
                },
                {"title": "Other", "link": "https://linkedin.com/in/other"}
            ]
        }"#;
        let response: CseResponse = serde_json::from_str(json).unwrap();
        let items = response.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("Jane Doe - Facility Manager | LinkedIn"));
        assert_eq!(
            items[0].thumbnail().as_deref(),
            Some("https://img.example.com/jane.jpg")
        );
        assert!(items[1].snippet.is_none());
    }

    #[test]
    fn test_response_deserialization_no_items() {
        let response: CseResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_none());
    }

    #[test]
    fn test_thumbnail_falls_back_to_og_image() {
        let json = r#"{
            "title": "t",
            "link": "u",
            "pagemap": {
                "metatags": [{"og:image": "https://img.example.com/og.jpg", "og:type": "profile"}]
            }
        }"#;
        let item: ProviderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.thumbnail().as_deref(), Some("https://img.example.com/og.jpg"));
    }

    #[test]
    fn test_thumbnail_missing() {
        let item: ProviderItem = serde_json::from_str(r#"{"title":"t","link":"u"}"#).unwrap();
        assert!(item.thumbnail().is_none());
    }

    #[test]
    fn test_into_row_complete_item() {
        let json = r#"{
            "title": "Jane Doe | LinkedIn",
            "link": "https://linkedin.com/in/janedoe",
            "snippet": "A snippet.",
            "pagemap": {"cse_image": [{"src": "img"}]}
        }"#;
        let item: ProviderItem = serde_json::from_str(json).unwrap();
        let row = item.into_row().unwrap();
        assert_eq!(row.title, "Jane Doe | LinkedIn");
        assert_eq!(row.url, "https://linkedin.com/in/janedoe");
        assert_eq!(row.snippet, "A snippet.");
        assert_eq!(row.thumbnail.as_deref(), Some("img"));
    }

    #[test]
    fn test_into_row_missing_snippet_defaults_empty() {
        let item: ProviderItem = serde_json::from_str(r#"{"title":"t","link":"u"}"#).unwrap();
        let row = item.into_row().unwrap();
        assert_eq!(row.snippet, "");
    }

    #[test]
    fn test_into_row_missing_title_is_malformed() {
        let item: ProviderItem = serde_json::from_str(r#"{"link":"u"}"#).unwrap();
        assert!(item.into_row().is_none());
    }

    #[test]
    fn test_into_row_missing_link_is_malformed() {
        let item: ProviderItem = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert!(item.into_row().is_none());
    }
}
