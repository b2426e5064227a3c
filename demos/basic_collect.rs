//! Basic collection example.
//!
//! Reads credentials from GOOGLE_API_KEY / GOOGLE_CSE_ID and fetches two
//! pages of results for a sample query.
//!
//! Run with: `cargo run --example basic_collect`

use linkscout::{Collector, GoogleCse, SearchRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("GOOGLE_API_KEY")?;
    let engine_id = std::env::var("GOOGLE_CSE_ID")?;

    let collector = Collector::new(GoogleCse::new(api_key, engine_id));
    let request = SearchRequest::new("facility managers united kingdom")
        .with_page_count(2)
        .with_delay_seconds(2.0)?;

    let collection = collector.collect(&request).await?;

    println!("Collected {} rows:", collection.rows.len());
    for row in collection.rows.items() {
        println!("- {} ({})", row.title, row.url);
    }

    Ok(())
}
