//! linkscout CLI - paginated LinkedIn profile search with CSV export.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use linkscout::{
    export, profile, CancelToken, Collector, ErrorPolicy, GoogleCse, SearchRequest,
};

/// linkscout - search Google for public LinkedIn profiles and export them
#[derive(Parser)]
#[command(name = "linkscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a paginated profile search
    Search(SearchArgs),
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query (the site:linkedin.com/in clause is appended automatically)
    query: String,

    /// Number of pages to fetch (10 results per page)
    #[arg(short, long, default_value = "3")]
    pages: u32,

    /// Delay between pages in seconds
    #[arg(short, long, default_value = "5.0")]
    delay: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of results to display in text format
    #[arg(short, long, default_value = "30")]
    limit: usize,

    /// Stop at the first failed page instead of continuing
    #[arg(long)]
    abort_on_error: bool,

    /// Google API key (falls back to GOOGLE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Custom search engine id (falls back to GOOGLE_CSE_ID)
    #[arg(long)]
    engine_id: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// CSV with title,url,snippet columns
    Csv,
    /// CSV of extracted profiles (Name,Title,Link,Description,Image)
    Profiles,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Search(args) => run_search(args).await,
    }
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let api_key = resolve_credential(args.api_key.clone(), "GOOGLE_API_KEY", "--api-key")?;
    let engine_id = resolve_credential(args.engine_id.clone(), "GOOGLE_CSE_ID", "--engine-id")?;

    let request = SearchRequest::new(&args.query)
        .with_page_count(args.pages)
        .with_delay_seconds(args.delay)?;

    let policy = if args.abort_on_error {
        ErrorPolicy::Abort
    } else {
        ErrorPolicy::Continue
    };
    let collector = Collector::new(GoogleCse::new(api_key, engine_id)).with_error_policy(policy);

    // Ctrl-C stops the run between pages; collected rows are still written.
    let cancel = CancelToken::new();
    let cancel_handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted, finishing current page...");
            cancel_handle.cancel();
        }
    });

    let collection = collector
        .collect_with(&request, &cancel, |progress| {
            eprintln!(
                "Fetched {}/{} pages · {} rows",
                progress.pages_completed, progress.page_count, progress.rows_collected
            );
        })
        .await?;

    for failure in &collection.page_failures {
        eprintln!("Warning: page {} failed: {}", failure.page, failure.error);
    }
    if collection.skipped_items > 0 {
        eprintln!(
            "Warning: skipped {} malformed result(s)",
            collection.skipped_items
        );
    }
    if collection.aborted {
        eprintln!("Run stopped early; exporting partial results.");
    }

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nResults for \"{}\" ({} rows from {} pages in {}ms):\n",
                args.query,
                collection.rows.len(),
                collection.pages_attempted,
                collection.duration_ms
            );
            for (i, row) in collection.rows.items().iter().take(args.limit).enumerate() {
                println!("{}. {}", i + 1, row.title);
                println!("   URL: {}", row.url);
                if !row.snippet.is_empty() {
                    println!("   {}", truncate(&row.snippet, 150));
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(collection.rows.items())?;
            write_output(args.output.as_deref(), json.as_bytes())?;
        }
        OutputFormat::Csv => {
            let csv = export::rows_to_csv(&collection.rows);
            write_output(args.output.as_deref(), &csv)?;
        }
        OutputFormat::Profiles => {
            let profiles = profile::profiles_from_rows(&collection.rows);
            let csv = export::profiles_to_csv(&profiles);
            write_output(args.output.as_deref(), &csv)?;
        }
    }

    Ok(())
}

fn resolve_credential(flag: Option<String>, env_var: &str, flag_name: &str) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => anyhow::bail!("Missing credential: set {} or pass {}", env_var, flag_name),
    }
}

fn write_output(path: Option<&std::path::Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes)?;
            eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            std::io::stdout().write_all(bytes)?;
        }
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
