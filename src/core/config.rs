use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_ARGENTINADATOS_URL: &str = "https://api.argentinadatos.com";
pub const DEFAULT_BCRA_URL: &str = "https://www.bcra.gob.ar/BCRAyVos/Plazos_fijos_online.asp";

/// A currency to track: display label and the source path segment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackedCurrency {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ArgentinaDatosConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BcraConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub argentinadatos: Option<ArgentinaDatosConfig>,
    pub bcra: Option<BcraConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            argentinadatos: Some(ArgentinaDatosConfig {
                base_url: DEFAULT_ARGENTINADATOS_URL.to_string(),
            }),
            bcra: Some(BcraConfig {
                url: DEFAULT_BCRA_URL.to_string(),
            }),
        }
    }
}

/// Where deposit rates come from.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateSourceKind {
    #[default]
    ArgentinaDatos,
    Bcra,
}

/// Time-to-live per data source, in seconds.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub quotes_ttl_secs: u64,
    pub rates_ttl_secs: u64,
    pub inflation_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            quotes_ttl_secs: 10 * 60,
            rates_ttl_secs: 10 * 60,
            inflation_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl CacheConfig {
    pub fn quotes_ttl(&self) -> Duration {
        Duration::from_secs(self.quotes_ttl_secs)
    }

    pub fn rates_ttl(&self) -> Duration {
        Duration::from_secs(self.rates_ttl_secs)
    }

    pub fn inflation_ttl(&self) -> Duration {
        Duration::from_secs(self.inflation_ttl_secs)
    }
}

fn default_currencies() -> Vec<TrackedCurrency> {
    [
        ("Dólar Billete", "oficial"),
        ("Dólar Blue", "blue"),
        ("Dólar Divisa", "mayorista"),
    ]
    .into_iter()
    .map(|(label, path)| TrackedCurrency {
        label: label.to_string(),
        path: path.to_string(),
    })
    .collect()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_deposit_days() -> u32 {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub rate_source: RateSourceKind,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<TrackedCurrency>,
    #[serde(default = "default_deposit_days")]
    pub deposit_days: u32,
    /// Years shown as full-year figures; the two years before the current
    /// one when absent.
    pub comparison_years: Option<Vec<i32>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            rate_source: RateSourceKind::default(),
            timeout_secs: default_timeout_secs(),
            cache: CacheConfig::default(),
            currencies: default_currencies(),
            deposit_days: default_deposit_days(),
            comparison_years: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to the
    /// built-in defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ar", "datainfo", "datainfo")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn argentinadatos_url(&self) -> &str {
        self.providers
            .argentinadatos
            .as_ref()
            .map_or(DEFAULT_ARGENTINADATOS_URL, |p| &p.base_url)
    }

    pub fn bcra_url(&self) -> &str {
        self.providers
            .bcra
            .as_ref()
            .map_or(DEFAULT_BCRA_URL, |p| &p.url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn comparison_years(&self, current_year: i32) -> Vec<i32> {
        self.comparison_years
            .clone()
            .unwrap_or_else(|| vec![current_year - 1, current_year - 2])
    }
}
