mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::borrowing::{BorrowArgs, ReverseBorrowArgs};
use commands::investment::{ReturnsArgs, TargetReturnArgs};

/// Staking return and borrowed-funds estimates
#[derive(Parser)]
#[command(
    name = "nestcalc",
    version,
    about = "Staking return and borrowed-funds estimates",
    long_about = "Estimate returns over fixed-rate investment periods with decimal precision. \
                  Projects simple and compound returns, back-solves the principal for a \
                  target return, nets loan interest and fees off borrowed-fund returns, and \
                  back-solves the borrowing needed to sustain a periodic withdrawal."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file with a custom rate table
    #[arg(long, env = "NESTCALC_RATES", global = true)]
    rates: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project simple or compound returns on a principal
    Returns(ReturnsArgs),
    /// Principal needed to earn a target return in one period
    TargetReturn(TargetReturnArgs),
    /// Net profit from investing borrowed funds
    Borrow(BorrowArgs),
    /// Borrowing needed to sustain a periodic withdrawal
    ReverseBorrow(ReverseBorrowArgs),
    /// Show the active rate table
    Rates,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("nestcalc {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = commands::rates::load_rates(cli.rates.as_deref())
        .and_then(|rates| run(cli.command, &rates));

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn run(
    command: Commands,
    rates: &nest_calc_core::RateTable,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    match command {
        Commands::Returns(args) => commands::investment::run_returns(args, rates),
        Commands::TargetReturn(args) => commands::investment::run_target_return(args, rates),
        Commands::Borrow(args) => commands::borrowing::run_borrow(args, rates),
        Commands::ReverseBorrow(args) => commands::borrowing::run_reverse_borrow(args, rates),
        Commands::Rates => commands::rates::run_rates(rates),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    }
}
