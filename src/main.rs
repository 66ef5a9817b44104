use anyhow::Context;
use clap::{Parser, Subcommand};
use famdir::StoreOverride;
use famdir_core::config::Config;
use famdir_core::{FilterCriteria, SearchEngine};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "famdir", about = "Family directory search")]
struct Cli {
    /// Config file to use instead of ~/.config/famdir/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to stderr (filter with RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the directory and print ranked matches.
    Search {
        /// Free-text query; words are joined with spaces.
        query: Vec<String>,
        #[arg(long)]
        parish: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        blood_group: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Read families from this JSON file.
        #[arg(long, conflicts_with = "store_url")]
        store_file: Option<PathBuf>,
        /// Query this document API root (e.g. http://127.0.0.1:8080).
        #[arg(long)]
        store_url: Option<String>,
        /// Maximum results to print; 0 prints all. Defaults to config.
        #[arg(long)]
        limit: Option<usize>,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the search tokens derived for each family in a document file.
    Tokens { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("famdir debug logging enabled");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Config::defaults()
        }),
    };

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Search {
            query,
            parish,
            region,
            blood_group,
            gender,
            store_file,
            store_url,
            limit,
            json,
        } => {
            let store = famdir::build_store(
                &mut config,
                &StoreOverride {
                    file: store_file,
                    url: store_url,
                },
            )?;
            let engine = SearchEngine::new(store);
            let filters = FilterCriteria {
                parish,
                region,
                blood_group,
                gender,
            };
            let limit = limit.unwrap_or(config.search.max_results);

            let matches = famdir::run_search(&engine, &query.join(" "), &filters, limit).await?;
            if matches.is_empty() {
                eprintln!("no matches");
            }
            if json {
                famdir::render_json(&mut stdout, &matches)?;
            } else {
                famdir::render_table(&mut stdout, &matches)?;
            }
        }
        Command::Tokens { file } => famdir::print_tokens(&mut stdout, &file).await?,
    }

    Ok(())
}
