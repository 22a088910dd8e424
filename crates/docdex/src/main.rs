//! # docdex CLI
//!
//! Command-line interface for docdex, the document indexing and
//! similarity-search engine.
//!
//! Uploads are converted into fixed-shape fingerprints (bag-of-words for
//! text-bearing formats, color histograms for images) and stored in a
//! SQLite-backed index that answers metadata and similarity queries.
//!
//! ## Commands
//!
//! - `docdex add <FILE>` - index a PDF, DOCX, image or SVG file
//! - `docdex search <QUERY>` - metadata search over filenames and types
//! - `docdex search --mode vector <QUERY>` - similarity search by text
//! - `docdex search --mode vector --image <FILE>` - similarity search by image
//! - `docdex status` - show index statistics
//! - `docdex config show|init` - inspect configuration
//!
//! ## Examples
//!
//! ```bash
//! docdex add report.pdf
//! docdex search "report"
//! docdex search --mode vector "quarterly revenue" --format json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use docdex_core::{DocumentMatch, DocumentStore, MediaType, QueryInput, SearchRequest};
use docdex_index::{Indexer, SearchEngine, SqliteStore};
use docdex_vector::Vectorizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "docdex")]
#[command(about = "Document indexing and similarity search")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file
    #[arg(long, global = true, default_value = "docdex.db")]
    db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum SearchMode {
    #[default]
    Metadata,
    Vector,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a file
    Add {
        /// File to index (type inferred from the extension)
        file: PathBuf,
    },

    /// Query the index
    Search {
        /// Query text
        query: Option<String>,

        /// Search mode
        #[arg(short, long, default_value = "metadata")]
        mode: SearchMode,

        /// Query image for vector mode
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show index statistics
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Add { file } => add(&cli.db, &config, &file).await,
        Commands::Search { query, mode, image } => {
            search(&cli.db, &config, mode, query, image, cli.format).await
        }
        Commands::Status => status(&cli.db).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init => {
                println!("{}", Config::sample()?);
                Ok(())
            }
        },
    }
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn open_store(db: &Path) -> Result<Arc<SqliteStore>> {
    let store = Arc::new(SqliteStore::open(db)?);
    store.init().await?;
    Ok(store)
}

async fn add(db: &Path, config: &Config, file: &Path) -> Result<()> {
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let Some(media_type) = MediaType::from_extension(ext) else {
        bail!("unsupported file type: {ext:?} (expected pdf, docx, jpg, jpeg, png or svg)");
    };

    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("file has no name")?;
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    let store = open_store(db).await?;
    let indexer = Indexer::new(
        store,
        Vectorizer::new(config.vectorizer.clone()),
        config.ingest.clone(),
    );

    let doc = indexer.ingest(filename, media_type, &bytes).await?;
    println!(
        "indexed {} as document {} ({} fingerprint components)",
        doc.filename,
        doc.id,
        doc.fingerprint.len()
    );
    Ok(())
}

async fn search(
    db: &Path,
    config: &Config,
    mode: SearchMode,
    query: Option<String>,
    image: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let request = match mode {
        SearchMode::Metadata => {
            let Some(query) = query else {
                bail!("metadata search requires a query");
            };
            SearchRequest::Metadata { query }
        }
        SearchMode::Vector => match (query, image) {
            (_, Some(path)) => {
                let bytes =
                    std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                SearchRequest::Vector {
                    input: QueryInput::ImageBytes(bytes),
                }
            }
            (Some(query), None) => SearchRequest::Vector {
                input: QueryInput::Text(query),
            },
            (None, None) => bail!("vector search requires query text or --image"),
        },
    };

    let store = open_store(db).await?;
    let engine = SearchEngine::new(
        store,
        Vectorizer::new(config.vectorizer.clone()),
        config.search.clone(),
    );

    let matches = engine.search(request).await?;
    print_matches(&matches, format)?;
    Ok(())
}

fn print_matches(matches: &[DocumentMatch], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(matches)?),
        OutputFormat::Text => {
            if matches.is_empty() {
                println!("no matching documents");
                return Ok(());
            }
            for m in matches {
                match m.score {
                    Some(score) => println!(
                        "#{:<4} {:<40} {:<6} score {:.4}",
                        m.id, m.filename, m.media_type, score
                    ),
                    None => println!("#{:<4} {:<40} {:<6}", m.id, m.filename, m.media_type),
                }
            }
        }
    }
    Ok(())
}

async fn status(db: &Path) -> Result<()> {
    let store = open_store(db).await?;
    let stats = store.stats().await?;
    println!("documents:      {}", stats.total_documents);
    println!("fingerprinted:  {}", stats.fingerprinted_documents);
    match stats.last_insert {
        Some(ts) => println!("last insert:    {ts}"),
        None => println!("last insert:    never"),
    }
    Ok(())
}
