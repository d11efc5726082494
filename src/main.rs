// SPDX-License-Identifier: PMPL-1.0-or-later

//! day-memory: render calendar dates as sentences in a chosen locale
//!
//! Locale data lives in a directory of `ll-RR.txt` canonical sources and
//! optional `ll-RR.snap` snapshots (see `day-memory snapshot`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use day_memory::{diagnostics, logging, storage, CachePolicy, Config, Translator};
use std::path::PathBuf;
use std::process::ExitCode;

/// Dates rendered by `show` and `demo`.
const SAMPLE_DATES: [(i32, i32, i64); 2] = [(1, 1, 2003), (12, 31, -1000)];

const DEMO_GOOD_CODES: [&str; 4] = ["el-GR", "en-US", "es-BO", "hu-HU"];
const DEMO_BAD_CODES: [&str; 6] = ["", "en-Us", "Es-BO", "ess-BO", "en-USS", "es US"];

/// Exit status for a missing locale code. clap uses 2 for its own usage
/// errors, so this one stays distinguishable.
const MISSING_CODE_EXIT: u8 = 3;

#[derive(Parser)]
#[command(name = "day-memory")]
#[command(version)]
#[command(about = "Render calendar dates as sentences in a chosen locale")]
#[command(long_about = None)]
struct Cli {
    /// Locale data directory (default: ./locales, or $DAY_MEMORY_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Configuration file (YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Load the text source when a snapshot exists but is unusable
    #[arg(long, global = true)]
    lenient_cache: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the sample dates (1 Jan 2003 and 31 Dec 1000 BCE)
    Show {
        /// Locale code, e.g. en-US
        #[arg(value_name = "CODE")]
        code: Option<String>,
    },

    /// Render one date
    Translate {
        /// Locale code, e.g. en-US
        #[arg(value_name = "CODE")]
        code: String,

        /// Month, 1-12
        month: i32,

        /// Day of the month, 1-31
        day: i32,

        /// Year; negative for BCE
        #[arg(allow_negative_numbers = true)]
        year: i64,
    },

    /// Write the snapshot for a locale, replacing any existing one
    Snapshot {
        /// Locale code, e.g. en-US
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// List locales in the data directory
    List,

    /// Render sample dates for the bundled locales, write one snapshot and
    /// show how malformed codes are rejected
    Demo,

    /// Check the data directory
    Doctor,
}

#[derive(Debug, thiserror::Error)]
enum HarnessError {
    #[error("no locale code given (e.g. `day-memory show en-US`)")]
    CommandArgumentNotProvided,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(exit_status(&err))
        }
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<HarnessError>() {
        Some(HarnessError::CommandArgumentNotProvided) => MISSING_CODE_EXIT,
        None => 1,
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if cli.lenient_cache {
        config.cache_policy = CachePolicy::Lenient;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    let command = cli.command.ok_or(HarnessError::CommandArgumentNotProvided)?;

    match command {
        Commands::Show { code } => {
            let code = code.ok_or(HarnessError::CommandArgumentNotProvided)?;
            let translator = Translator::with_config(&code, config)?;
            if cli.verbose {
                println!(
                    "{} loaded from {}",
                    translator.locale(),
                    translator.source()
                );
            }
            for (month, day, year) in SAMPLE_DATES {
                println!("{}", translator.translate(month, day, year)?);
            }
        }

        Commands::Translate {
            code,
            month,
            day,
            year,
        } => {
            let translator = Translator::with_config(&code, config)?;
            println!("{}", translator.translate(month, day, year)?);
        }

        Commands::Snapshot { code } => {
            let translator = Translator::with_config(&code, config)?;
            let path = translator
                .write_snapshot()
                .with_context(|| format!("snapshotting {}", code))?;
            println!("Snapshot saved to: {}", path.display());
        }

        Commands::List => {
            let entries = storage::available_locales(&config.data_dir)?;
            if entries.is_empty() {
                println!("No locales in {}", config.data_dir.display());
            }
            for entry in &entries {
                println!(
                    "  {}  text: {}  snapshot: {}",
                    entry.code.to_string().bold(),
                    presence(entry.text.is_some()),
                    presence(entry.snapshot.is_some())
                );
            }
        }

        Commands::Demo => run_demo(&config)?,

        Commands::Doctor => diagnostics::run_self_diagnostics(&config)?,
    }

    Ok(())
}

fn presence(present: bool) -> colored::ColoredString {
    if present {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

fn run_demo(config: &Config) -> Result<()> {
    println!("\n{}", "Good locale codes:".bold());
    for code in DEMO_GOOD_CODES {
        println!("\n{}", code);
        match Translator::with_config(code, config.clone()) {
            Ok(translator) => {
                for (month, day, year) in SAMPLE_DATES {
                    println!("  {}", translator.translate(month, day, year)?);
                }
            }
            Err(err) => println!("  {} {}", "failed:".red(), err),
        }
    }

    println!("\n{}", "Snapshot round trip:".bold());
    let first = Translator::with_config(DEMO_GOOD_CODES[0], config.clone())?;
    let path = first.write_snapshot()?;
    println!("  wrote {}", path.display());
    let reloaded = Translator::with_config(DEMO_GOOD_CODES[0], config.clone())?;
    println!("  reloaded from {}", reloaded.source());
    for (month, day, year) in SAMPLE_DATES {
        println!("  {}", reloaded.translate(month, day, year)?);
    }

    println!("\n{}", "Bad locale codes:".bold());
    for code in DEMO_BAD_CODES {
        println!("\n{:?}", code);
        match Translator::with_config(code, config.clone()) {
            Ok(translator) => println!("  unexpectedly accepted as {}", translator.locale()),
            Err(err) => println!("  {}", err),
        }
    }

    Ok(())
}
