use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::DocumentStatus;
use searchctl::{build_server, run_match, run_query, run_replay};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "searchctl")]
#[command(about = "Query an in-memory TF-IDF document index", long_about = None)]
struct Cli {
    /// Input path (file or directory of .json/.jsonl documents)
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    /// Space separated stop words; falls back to SEARCH_STOP_WORDS
    #[arg(long, global = true)]
    stop_words: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Query {
        query: String,
        /// Only documents with this status
        #[arg(long, default_value_t = DocumentStatus::Actual)]
        status: DocumentStatus,
        /// Results per page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show which query terms a document matches
    Match {
        query: String,
        #[arg(long)]
        id: i32,
    },
    /// Run every line of a file as a query and report empty-result requests
    Replay { queries: PathBuf },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let stop_words = cli
        .stop_words
        .or_else(|| std::env::var("SEARCH_STOP_WORDS").ok())
        .unwrap_or_default();
    let server = build_server(&stop_words, cli.input.as_deref())?;

    let out = match cli.command {
        Commands::Query { query, status, page_size, json } => run_query(&server, &query, status, page_size, json)?,
        Commands::Match { query, id } => run_match(&server, &query, id)?,
        Commands::Replay { queries } => run_replay(&server, &queries)?,
    };
    print!("{out}");
    Ok(())
}
