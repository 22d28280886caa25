use anyhow::Result;
use clap::{Parser, Subcommand};
use docdex::index::stats;
use docdex::utils::{AppConfig, remove_index};
use docdex::{Engine, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docdex")]
#[command(about = "TF-IDF keyword search over a directory of text documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index, or sync an existing one with the directory
    Index {
        /// Directory of text documents
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Discard the stored index and rebuild from scratch
        #[arg(short, long)]
        force: bool,
    },
    /// Rank documents for a search term
    Search {
        /// Term to search for
        query: String,

        /// Directory of text documents
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Maximum number of results to print
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show index statistics
    Stats {
        /// Directory of text documents
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Remove the stored index for a directory
    Remove {
        /// Directory of text documents
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Index { path, force } => {
            if force && remove_index(&path)? {
                println!("Removed existing index");
            }
            let engine = Engine::open_with_config(&path, config.index_config())?;
            println!(
                "Indexed {} documents ({} unique terms)",
                engine.total_documents(),
                engine.unique_terms()
            );
            println!("Index stored at: {}", engine.artifact_path().display());
        }
        Commands::Search {
            query,
            path,
            limit,
            no_color,
        } => {
            let mut index_config = config.index_config();
            index_config.show_progress = false;
            let engine = Engine::open_with_config(&path, index_config)?;
            let hits = engine.search(&query);
            output::print_hits(&query, &hits, limit, !no_color)?;
        }
        Commands::Stats { path } => {
            stats::show_stats(&path, config.index_config())?;
        }
        Commands::Remove { path } => {
            if remove_index(&path)? {
                println!("Removed index for: {}", path.display());
            } else {
                println!("No index found for: {}", path.display());
            }
        }
    }

    Ok(())
}
