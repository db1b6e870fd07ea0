//! PrimRust CLI - primality testing and factorization from the shell.
//!
//! A command-line interface for the `primrust-core` library. Supports
//! primality classification (deterministic or fast probabilistic mode) and
//! trial-division factorization.

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use primrust_core::{classify, factors, Natural, Verdict};

/// CLI arguments structure.
#[derive(Parser)]
#[command(
    name = "primrust",
    version,
    about = "Arbitrary-precision primality testing and factorization",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Classify this decimal number (positional argument).
    number: Option<String>,

    /// Use the fast probabilistic mode for numbers beyond the deterministic
    /// witness tables.
    #[arg(short, long)]
    fast: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Factorize a decimal number by trial division.
    Factor {
        /// The number to factorize.
        number: String,

        /// Use the fast probabilistic mode for the primality pre-check.
        #[arg(short, long)]
        fast: bool,
    },
}

fn parse_number(raw: &str) -> anyhow::Result<Natural> {
    Natural::from_str(raw)
        .ok()
        .with_context(|| format!("'{}' is not a non-negative integer", raw))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Factor { number, fast }) => run_factor(&number, fast),
        None => match cli.number {
            Some(number) => run_classify(&number, cli.fast),
            None => {
                use clap::CommandFactory;
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}

fn run_classify(raw: &str, fast: bool) -> anyhow::Result<()> {
    let n = parse_number(raw)?;

    let t0 = Instant::now();
    let verdict = classify(&n, fast);
    let elapsed = t0.elapsed();

    let mode = if fast {
        "near-deterministic"
    } else {
        "deterministic"
    };
    println!("{} is {} ({}, {})", n, verdict, mode, format_duration(elapsed));
    Ok(())
}

fn run_factor(raw: &str, fast: bool) -> anyhow::Result<()> {
    let n = parse_number(raw)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("factoring...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let t0 = Instant::now();
    let verdict = classify(&n, fast);
    let factor_list = if verdict == Verdict::Composite {
        factors(&n)
    } else {
        Vec::new()
    };
    let elapsed = t0.elapsed();
    spinner.finish_and_clear();

    if factor_list.is_empty() {
        println!("{} is {} - no proper factors", n, verdict);
    } else {
        let rendered: Vec<String> = factor_list.iter().map(|f| f.to_string()).collect();
        println!("{} = {}", n, rendered.join(" x "));
    }
    println!("({})", format_duration(elapsed));
    Ok(())
}

fn format_duration(duration: Duration) -> String {
    let msecs = 1e3 * duration.as_secs_f64();
    if msecs >= 1_000.0 {
        format!("{:.2} s", msecs / 1e3)
    } else {
        format!("{:.3} ms", msecs)
    }
}
