use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use jread::config::Config;
use jread::file::loader::load_json;
use jread::harness::bench::{
    generate_users, long_test, speed_test, write_long_report, write_speed_report,
};
use jread::harness::demo::{describe, run_examples};
use jread::query::{self, Evaluator};

/// jread - locate elements of a JSON document in place
#[derive(Parser)]
#[command(name = "jread")]
#[command(version)]
#[command(about = "Locate elements of a JSON document in place", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/jread/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a query against a JSON file and print the element found
    Query {
        /// JSON file to read ("-" for stdin, .gz files are decompressed)
        file: PathBuf,

        /// Query such as "{'anArray' [2 {'two.1'"
        query: String,

        /// Values for the query's `*` selectors, in order
        #[arg(short, long = "param")]
        params: Vec<usize>,
    },

    /// Run the built-in example queries
    Demo,

    /// Time a fixed nested query
    Speed {
        /// Number of repetitions (default from config)
        #[arg(long)]
        runs: Option<u64>,
    },

    /// Compare indexed access with array stepping over a long array
    Long {
        /// JSON file holding a top-level array (generated if omitted)
        file: Option<PathBuf>,

        /// Number of stepping passes (default from config)
        #[arg(long)]
        iterations: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    log::debug!("using {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Query {
            file,
            query,
            params,
        } => {
            // Report query syntax problems precisely before touching the input.
            if let Err(err) = query::Parser::parse(&query) {
                bail!("invalid query \"{}\": {}", query, err);
            }
            let json = load_json(&file, config.max_file_size)?;
            let evaluator = Evaluator::new(&json).with_max_depth(config.max_depth);
            describe(&mut out, &evaluator, &query, &params)?;
        }
        Command::Demo => {
            run_examples(&mut out, config.string_capacity)?;
        }
        Command::Speed { runs } => {
            let report = speed_test(runs.unwrap_or(config.speed_runs));
            write_speed_report(&mut out, &report)?;
        }
        Command::Long { file, iterations } => {
            let json = match file {
                Some(path) => load_json(&path, config.max_file_size)?,
                None => generate_users(config.long_elements).into_bytes(),
            };
            let iterations = iterations.unwrap_or(config.long_iterations);
            let report = long_test(&json, iterations, config.max_depth)
                .context("long test needs a JSON array of objects")?;
            write_long_report(&mut out, &report)?;
        }
    }

    out.flush()?;
    Ok(())
}
