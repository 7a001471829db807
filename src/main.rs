use anyhow::Context;
use clap::Parser;
use doxy_search::cli::{Cli, Commands};
use doxy_search::commands::{
    QueryRequest, execute_check, execute_query, execute_stats, load_index, section_filter,
};
use doxy_search::error::Result;
use doxy_search::{MatchMode, QueryOptions, SearchConfig, SearchIndexSet};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    doxy_search::tracing::init(cli.verbose);

    let config = SearchConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!("Using config: {:?}", config);

    let output = match cli.command {
        Commands::Query {
            path,
            text,
            section,
            prefix,
            limit,
            json,
        } => {
            let set = load(&path, config.query_options())?;
            let request = QueryRequest {
                text,
                section: section_filter(&path, &section),
                mode: if prefix {
                    MatchMode::Prefix
                } else {
                    config.match_mode
                },
                limit,
                json,
                suggestions: config.suggestions,
            };
            execute_query(&set, &request)?
        }
        Commands::Check { path } => execute_check(&load(&path, config.query_options())?),
        Commands::Stats { path } => execute_stats(&load(&path, config.query_options())?),
    };

    println!("{}", output);
    Ok(())
}

fn load(path: &Path, options: QueryOptions) -> Result<SearchIndexSet> {
    load_index(path, options)
        .with_context(|| format!("Failed to load search index from {}", path.display()))
}
