//! CSV export of collected rows and extracted profiles.
//!
//! Encoding follows RFC 4180: fields containing the delimiter, a quote or a
//! line break are quoted, quotes are doubled, records end with `\n`. Output
//! is deterministic, so exporting the same set twice is byte-identical.

use crate::profile::ProfileRecord;
use crate::{Result, ResultRow, ResultSet, SearchError};

const ROW_HEADER: [&str; 3] = ["title", "url", "snippet"];
const PROFILE_HEADER: [&str; 5] = ["Name", "Title", "Link", "Description", "Image"];

/// Encodes a result set as a CSV document with a `title,url,snippet` header.
pub fn rows_to_csv(rows: &ResultSet) -> Vec<u8> {
    let mut out = String::new();
    write_record(&mut out, &ROW_HEADER);
    for row in rows.items() {
        write_record(
            &mut out,
            &[row.title.as_str(), row.url.as_str(), row.snippet.as_str()],
        );
    }
    out.into_bytes()
}

/// Decodes a CSV document produced by [`rows_to_csv`] back into rows.
pub fn rows_from_csv(bytes: &[u8]) -> Result<ResultSet> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SearchError::Parse(format!("CSV is not valid UTF-8: {e}")))?;
    let mut records = parse_records(text)?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| SearchError::Parse("CSV document is empty".to_string()))?;
    if header != ROW_HEADER {
        return Err(SearchError::Parse(format!(
            "unexpected CSV header: {:?}",
            header
        )));
    }

    let mut rows = ResultSet::new();
    for (i, record) in records.enumerate() {
        if record.len() != 3 {
            return Err(SearchError::Parse(format!(
                "record {} has {} fields, expected 3",
                i + 1,
                record.len()
            )));
        }
        let mut fields = record.into_iter();
        let title = fields.next().unwrap_or_default();
        let url = fields.next().unwrap_or_default();
        let snippet = fields.next().unwrap_or_default();
        rows.add_row(ResultRow::new(title, url, snippet));
    }
    Ok(rows)
}

/// Encodes extracted profiles with the `Name,Title,Link,Description,Image`
/// header used by the downloadable report.
pub fn profiles_to_csv(profiles: &[ProfileRecord]) -> Vec<u8> {
    let mut out = String::new();
    write_record(&mut out, &PROFILE_HEADER);
    for profile in profiles {
        write_record(
            &mut out,
            &[
                profile.name.as_str(),
                profile.title.as_str(),
                profile.link.as_str(),
                profile.description.as_str(),
                profile.image.as_str(),
            ],
        );
    }
    out.into_bytes()
}

fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quoting(field) {
            out.push('"');
            for c in field.chars() {
                if c == '"' {
                    out.push('"');
                }
                out.push(c);
            }
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

fn needs_quoting(field: &str) -> bool {
    field.contains(&[',', '"', '\n', '\r'][..])
}

fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() && !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '"' => {
                return Err(SearchError::Parse(
                    "quote inside unquoted field".to_string(),
                ));
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {
                // consumed with the following newline
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                field_started = false;
            }
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(SearchError::Parse("unterminated quoted field".to_string()));
    }
    if field_started || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
