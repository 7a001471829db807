use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doxy-search")]
#[command(about = "Query Doxygen search indexes from the command line", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/doxy-search/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find entries whose label contains the query text
    Query {
        /// A search data file or a generated search/ directory
        path: PathBuf,
        text: String,
        #[arg(short, long, default_value = "all")]
        section: String,
        /// Match label prefixes instead of substrings
        #[arg(short, long)]
        prefix: bool,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a search data file or directory
    Check { path: PathBuf },
    /// Print per-section shard, entry and target counts
    Stats { path: PathBuf },
}
