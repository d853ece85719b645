//! Command line search for closed-form expressions.
//!
//! Usage:
//!   closedform [OPTIONS] <TARGET>...
//!
//! The target is a number with an optional unit, e.g. `6.2832` or
//! `9.8 m/s^2`. Results are printed to stdout, logs go to stderr.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use closedform::constants::{self, DEFAULT_CONSTANTS_FILE};
use closedform::prelude::*;
use tracing::{info, warn};

mod fingerprint;

use fingerprint::Fingerprint;

#[derive(Parser, Debug)]
#[command(
    name = "closedform",
    version,
    about = "Search for closed-form expressions that approximate a dimensioned number"
)]
struct Args {
    /// Target value with an optional unit (e.g. 9.8 m/s^2)
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    target: Vec<String>,

    /// Significant decimal digits of the arithmetic and the output
    #[arg(short, long, default_value_t = Precision::DEFAULT_DIGITS)]
    digits: u32,

    /// Maximum number of binary operations in an expression
    #[arg(short = 'n', long, default_value_t = 1)]
    max_expr_size: usize,

    /// Largest integer literal to use (0 disables integer literals)
    #[arg(short = 'm', long, default_value_t = 0)]
    max_int: usize,

    /// Constants file (defaults to constants.conf if present)
    #[arg(short, long, conflicts_with = "builtins")]
    constants: Option<PathBuf>,

    /// Use only the built-in constants
    #[arg(long)]
    builtins: bool,

    /// Number of results to print
    #[arg(short, long, default_value_t = closedform::search::DEFAULT_TOP)]
    top: usize,

    /// Worker threads (defaults to rayon's global pool)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Skip candidates the simplifier would rewrite
    #[arg(long)]
    prune: bool,

    /// Print results as generated, without simplification
    #[arg(long)]
    no_simplify: bool,

    /// Directory to record the run fingerprint in
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn precision(&self) -> Precision {
        Precision::new(self.digits)
    }

    fn target_text(&self) -> String {
        self.target.join(" ")
    }

    fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::new(self.max_expr_size, self.max_int)
            .with_precision(self.precision())
            .with_top(self.top)
            .with_simplify_results(!self.no_simplify)
            .with_prune_trivial(self.prune);
        match self.threads {
            Some(threads) => config.with_threads(threads),
            None => config,
        }
    }

    fn constant_set(&self) -> Result<ConstantSet> {
        let precision = self.precision();
        if self.builtins {
            return Ok(ConstantSet::builtins(precision));
        }
        match &self.constants {
            Some(path) => load_constants(path, precision),
            None if Path::new(DEFAULT_CONSTANTS_FILE).exists() => {
                load_constants(Path::new(DEFAULT_CONSTANTS_FILE), precision)
            }
            None => {
                info!("no {DEFAULT_CONSTANTS_FILE} found, using built-in constants");
                Ok(ConstantSet::builtins(precision))
            }
        }
    }
}

fn load_constants(path: &Path, precision: Precision) -> Result<ConstantSet> {
    constants::load(path, precision)
        .with_context(|| format!("failed to load constants from {}", path.display()))
}

fn run(args: &Args) -> Result<()> {
    let precision = args.precision();
    let target_text = args.target_text();
    let target = DimValue::parse(&target_text, precision)
        .with_context(|| format!("invalid target '{target_text}'"))?;
    let constants = args.constant_set()?;
    let config = args.search_config();

    let fingerprint = Fingerprint::new(&constants, &config);
    info!(descriptor = %fingerprint.descriptor, hash = %fingerprint.hash, "run fingerprint");
    if let Some(dir) = &args.save_dir {
        let path = fingerprint.save(dir)?;
        info!("saved fingerprint to {}", path.display());
    }

    let start = Instant::now();
    let outcome = Search::new(&constants, &target, config)
        .run()
        .context("search failed")?;
    info!("search took {:?}", start.elapsed());

    if outcome.is_empty() {
        warn!("no expression has the dimension of {target}");
    }
    let digits = precision.digits() as usize;
    for result in &outcome.results {
        println!("{} | err: {}", result.display, result.error.to_string_sig(digits));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&args)
}
