use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use datainfo::core::log::init_logging;
use datainfo::core::period::PeriodLabel;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for datainfo::AppCommand {
    fn from(cmd: Commands) -> datainfo::AppCommand {
        match cmd {
            Commands::Quotes => datainfo::AppCommand::Quotes,
            Commands::Rates => datainfo::AppCommand::Rates,
            Commands::Inflation => datainfo::AppCommand::Inflation,
            Commands::Convert { amount, from, to } => {
                datainfo::AppCommand::Convert { amount, from, to }
            }
            Commands::Deposit { amount, bank, days } => {
                datainfo::AppCommand::Deposit { amount, bank, days }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the example configuration (to --config-path when given)
    Setup,
    /// Display latest dollar quotes and their recent evolution
    Quotes,
    /// Display fixed-term deposit rates per bank
    Rates,
    /// Display INDEC inflation statistics
    Inflation,
    /// Restate an amount between two months using the inflation index
    Convert {
        /// Amount in pesos of the origin month
        amount: Decimal,
        /// Origin month (YYYY-MM or MM/YYYY), defaults to twelve months back
        #[arg(long)]
        from: Option<PeriodLabel>,
        /// Destination month, defaults to the latest published
        #[arg(long)]
        to: Option<PeriodLabel>,
    },
    /// Project fixed-term deposit income
    Deposit {
        /// Amount to invest in pesos
        amount: Decimal,
        /// Bank name as listed by `rates`, defaults to the best rate
        #[arg(short, long)]
        bank: Option<String>,
        /// Holding period in days
        #[arg(short, long)]
        days: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => datainfo::cli::setup::setup(cli.config_path.as_deref()),
        Some(cmd) => datainfo::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
