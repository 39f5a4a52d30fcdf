use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "worklens")]
#[command(version, about = "Project a view over project-management records")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project records through a view configuration and print the result
    Project {
        /// Path to a JSON array of records
        #[arg(long)]
        records: PathBuf,
        /// Path to a JSON view configuration (filters + display)
        #[arg(long)]
        view: PathBuf,
        /// Anchor date for relative date filters (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,
        /// Only include records flagged as favorite
        #[arg(long)]
        favorites: bool,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },
    /// Compute a fractional sort key for a drag-and-drop move
    Reorder {
        /// Current sort keys in bucket order, comma-separated
        #[arg(long, value_delimiter = ',')]
        keys: Vec<f64>,
        /// Index the item is moving from
        #[arg(long)]
        source: usize,
        /// Index the item is moving to
        #[arg(long)]
        destination: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Project {
            records,
            view,
            today,
            favorites,
            search,
        } => cmd::project(&records, &view, today.as_deref(), favorites, search),
        Commands::Reorder {
            keys,
            source,
            destination,
        } => cmd::reorder(&keys, source, destination),
    }
}
