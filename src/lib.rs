pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::{AppConfig, RateSourceKind};
use crate::core::period::PeriodLabel;
use crate::core::source::RateSource;
use crate::providers::{ArgentinaDatosProvider, BcraRatesProvider, CachingSource};
use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Quotes,
    Rates,
    Inflation,
    Convert {
        amount: Decimal,
        from: Option<PeriodLabel>,
        to: Option<PeriodLabel>,
    },
    Deposit {
        amount: Decimal,
        bank: Option<String>,
        days: Option<u32>,
    },
}

/// Runs one command against freshly built providers.
///
/// The providers and their caches live only for this call, so the configured
/// TTLs never get a chance to reuse a fetch here. Library callers that keep a
/// [`providers::CachingSource`] alive across calls get the reuse.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("DataInfo starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let timeout = config.timeout();
    let api = CachingSource::new(
        ArgentinaDatosProvider::new(config.argentinadatos_url(), timeout)?,
        config.cache.clone(),
    );
    let rate_source: Box<dyn RateSource> = match config.rate_source {
        RateSourceKind::ArgentinaDatos => Box::new(CachingSource::new(
            ArgentinaDatosProvider::new(config.argentinadatos_url(), timeout)?,
            config.cache.clone(),
        )),
        RateSourceKind::Bcra => Box::new(CachingSource::new(
            BcraRatesProvider::new(config.bcra_url(), timeout)?,
            config.cache.clone(),
        )),
    };
    let today = chrono::Utc::now().date_naive();

    match command {
        AppCommand::Quotes => cli::quotes::run(&api, &config.currencies, today).await,
        AppCommand::Rates => cli::rates::run(rate_source.as_ref()).await,
        AppCommand::Inflation => {
            let years = config.comparison_years(today.year());
            cli::inflation::run(&api, today.year(), &years).await
        }
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&api, amount, from, to).await
        }
        AppCommand::Deposit { amount, bank, days } => {
            let days = days.unwrap_or(config.deposit_days);
            cli::deposit::run(rate_source.as_ref(), amount, bank.as_deref(), days).await
        }
    }
}
