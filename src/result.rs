//! Collected result types.

use serde::{Deserialize, Serialize};

/// A single normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Result description/snippet.
    pub snippet: String,
    /// Thumbnail URL recovered from the provider's pagemap, if any.
    pub thumbnail: Option<String>,
}

impl ResultRow {
    /// Creates a new result row.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            thumbnail: None,
        }
    }

    /// Sets the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// Ordered container for the rows of one collection run.
///
/// Insertion order is page order, then in-page order. Duplicate URLs are
/// preserved; no deduplication happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
}

impl ResultSet {
    /// Creates a new empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn add_row(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Appends all rows from an iterator, keeping their order.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = ResultRow>) {
        self.rows.extend(rows);
    }

    /// Returns the rows in insertion order.
    pub fn items(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRow;
    type IntoIter = std::vec::IntoIter<ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<ResultRow> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_row_new() {
        let row = ResultRow::new("Title", "https://example.com", "Snippet");
        assert_eq!(row.title, "Title");
        assert_eq!(row.url, "https://example.com");
        assert_eq!(row.snippet, "Snippet");
        assert!(row.thumbnail.is_none());
    }

    #[test]
    fn test_result_row_with_thumbnail() {
        let row = ResultRow::new("t", "u", "s").with_thumbnail("https://example.com/img.jpg");
        assert_eq!(row.thumbnail, Some("https://example.com/img.jpg".to_string()));
    }

    #[test]
    fn test_result_set_new() {
        let set = ResultSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.items().is_empty());
    }

    #[test]
    fn test_result_set_preserves_insertion_order() {
        let mut set = ResultSet::new();
        set.add_row(ResultRow::new("first", "url1", "s1"));
        set.add_row(ResultRow::new("second", "url2", "s2"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.items()[0].title, "first");
        assert_eq!(set.items()[1].title, "second");
    }

    #[test]
    fn test_result_set_keeps_duplicate_urls() {
        let mut set = ResultSet::new();
        set.add_row(ResultRow::new("a", "https://same.com", "s"));
        set.add_row(ResultRow::new("b", "https://same.com", "s"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_result_set_extend() {
        let mut set = ResultSet::new();
        set.extend(vec![
            ResultRow::new("a", "u1", "s"),
            ResultRow::new("b", "u2", "s"),
        ]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_result_set_from_iterator() {
        let set: ResultSet = (0..3)
            .map(|i| ResultRow::new(format!("t{i}"), format!("u{i}"), ""))
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.items()[2].title, "t2");
    }

    #[test]
    fn test_result_set_into_iterator() {
        let mut set = ResultSet::new();
        set.add_row(ResultRow::new("a", "u", "s"));
        let rows: Vec<ResultRow> = set.into_iter().collect();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_result_row_serialization() {
        let row = ResultRow::new("Title", "https://example.com", "Snippet");
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"title\":\"Title\""));
        assert!(json.contains("\"url\":\"https://example.com\""));
    }

    #[test]
    fn test_result_set_serialization_round_trip() {
        let mut set = ResultSet::new();
        set.add_row(ResultRow::new("a", "u", "s").with_thumbnail("img"));
        let json = serde_json::to_string(&set).unwrap();
        let back: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
