//! catmatch - approximate taxonomy matching from the command line
//!
//! Maps noisy category paths to the closest node of a product taxonomy.

use anyhow::{Context as _, Result};
use catmatch_matcher::Matcher;
use catmatch_taxonomy::Taxonomy;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod output;

use commands::{bench, check, matching, resolve, stats, Context};
use config::Config;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const NO_MATCH: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

/// Approximate taxonomy matcher
#[derive(Parser)]
#[command(name = "catmatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .catmatch.toml, catmatch.toml or .config/catmatch.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Taxonomy file in `<id> - <path>` format
    #[arg(short, long, global = true, env = "CATMATCH_TAXONOMY")]
    taxonomy: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `catmatch_matcher=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match queries to taxonomy categories
    Match {
        /// Category paths, segments separated by `>`
        #[arg(required = true)]
        queries: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Reject matches scoring below `min_score`
        #[arg(long)]
        strict: bool,
    },

    /// Look up a category by id or exact display path
    Resolve {
        /// Numeric id or full display path
        id_or_path: String,

        /// Print result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Match every category's own path and report mismatches
    Check {
        /// Print report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Measure match latency for a query
    Bench {
        /// Query to match
        query: String,

        /// Number of iterations
        #[arg(short = 'n', long, default_value = "1000")]
        iterations: usize,

        /// Print stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show taxonomy and index statistics
    Stats {
        /// Print stats as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fail(&e, exit_codes::CONFIG_ERROR),
    };

    let mut logging = config.schema.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.log_level = level.clone();
    }
    logging.json |= cli.json_logs;
    if let Err(e) = catmatch_telemetry::init_with_config(logging) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let ctx = match build_context(&cli, &config) {
        Ok(ctx) => ctx,
        Err(e) => return fail(&e, exit_codes::CONFIG_ERROR),
    };

    let result = match cli.command {
        Commands::Match { queries, json, strict } => matching::run(&ctx, &queries, strict, json),
        Commands::Resolve { id_or_path, json } => resolve::run(&ctx, &id_or_path, json),
        Commands::Check { json } => check::run(&ctx, json),
        Commands::Bench { query, iterations, json } => bench::run(&ctx, &query, iterations, json),
        Commands::Stats { json } => stats::run(&ctx, json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => fail(&e, exit_codes::FAILURE),
    }
}

/// Load the taxonomy and build the matcher
fn build_context(cli: &Cli, config: &Config) -> Result<Context> {
    let path = cli
        .taxonomy
        .clone()
        .or_else(|| config.taxonomy_path())
        .context("No taxonomy file given (use --taxonomy, CATMATCH_TAXONOMY or [taxonomy] path)")?;

    let taxonomy = Taxonomy::load(&path)
        .with_context(|| format!("Failed to load taxonomy {}", path.display()))?;

    let matcher = Matcher::from_taxonomy(&taxonomy, config.schema.matcher)
        .context("Invalid [matcher] configuration")?;

    Ok(Context {
        taxonomy,
        matcher,
        taxonomy_path: path,
    })
}

fn fail(err: &anyhow::Error, code: u8) -> ExitCode {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
    ExitCode::from(code)
}
