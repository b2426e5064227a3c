//! Profile extraction from LinkedIn search results.
//!
//! Search result titles for public profiles usually look like
//! `"Name - Professional Title | LinkedIn"`; the extractor recovers the
//! structured fields from that shape, falling back to snippet heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ResultRow, ResultSet};

const LINKEDIN_SUFFIX: &str = " | LinkedIn";
const NOT_AVAILABLE: &str = "N/A";

static HONORIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Dr\.?|Mr\.?|Ms\.?|Mrs\.?)\s+").expect("honorific regex is valid")
});

const TITLE_KEYWORDS: [&str; 10] = [
    "manager",
    "director",
    "engineer",
    "analyst",
    "specialist",
    "coordinator",
    "executive",
    "consultant",
    "senior",
    "lead",
];

/// A structured profile derived from one search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Person's name.
    pub name: String,
    /// Professional title.
    pub title: String,
    /// Profile URL.
    pub link: String,
    /// Cleaned snippet text.
    pub description: String,
    /// Profile image URL, empty when unavailable.
    pub image: String,
}

impl ProfileRecord {
    /// Extracts a profile from a collected row.
    pub fn from_row(row: &ResultRow) -> Self {
        Self {
            name: extract_name(&row.title),
            title: extract_title(&row.title, &row.snippet),
            link: row.url.clone(),
            description: clean_description(&row.snippet),
            image: row.thumbnail.clone().unwrap_or_default(),
        }
    }
}

/// Extracts profiles from every row of a result set, keeping row order.
pub fn profiles_from_rows(rows: &ResultSet) -> Vec<ProfileRecord> {
    rows.items().iter().map(ProfileRecord::from_row).collect()
}

fn extract_name(title: &str) -> String {
    if title.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    let title = title.replace(LINKEDIN_SUFFIX, "");
    let name = title
        .split(" - ")
        .next()
        .unwrap_or(&title)
        .trim();
    let name = HONORIFIC.replace(name, "").trim().to_string();

    if name.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        name
    }
}

fn extract_title(title: &str, snippet: &str) -> String {
    // Prefer the second " - " segment of the result title.
    if let Some(segment) = title.split(" - ").nth(1) {
        let professional = segment.replace(LINKEDIN_SUFFIX, "");
        let professional = professional.trim();
        if !professional.is_empty() {
            return professional.to_string();
        }
    }

    // Scan snippet segments for a line that reads like a job title.
    for line in snippet.split(" · ") {
        let line = line.trim();
        let lower = line.to_lowercase();
        if TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return line.to_string();
        }
    }

    // Fall back to the snippet's first sentence.
    let first = snippet.split('.').next().unwrap_or("").trim();
    if first.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        first.to_string()
    }
}

fn clean_description(snippet: &str) -> String {
    if snippet.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    let decoded = snippet.replace("&amp;", "&").replace("&nbsp;", " ");
    let normalized = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized.chars().count() > 300 {
        let truncated: String = normalized.chars().take(300).collect();
        format!("{truncated}...")
    } else {
        normalized
    }
}
