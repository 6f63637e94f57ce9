//! Configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Venue entries wire mock
//! adapters for demo runs; a deployment swaps in real adapters at the same
//! registration point.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use crate::arbitrage::ArbitrageAnalyzer;
use crate::collector::CollectorConfig;
use crate::domain::{Price, Rate, VenueId};
use crate::error::{ConfigError, Result};
use crate::venue::{MockVenue, MockVenueConfig, VenueRegistry};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub market: MarketConfig,
    #[serde(default)]
    pub collector: CollectorSettings,
    #[serde(default)]
    pub arbitrage: ArbitrageSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub venues: Vec<VenueSettings>,
}

#[derive(Debug, Deserialize)]
pub struct MarketConfig {
    /// Token pair routed by this instance, e.g. "TKN/JPY".
    pub symbol: String,
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
}

fn default_quote_currency() -> String {
    "JPY".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CollectorSettings {
    #[serde(default = "default_venue_timeout_ms")]
    pub venue_timeout_ms: u64,
    #[serde(default = "default_book_depth")]
    pub book_depth: usize,
    #[serde(default = "default_synthetic_spread_rate")]
    pub synthetic_spread_rate: Rate,
}

fn default_venue_timeout_ms() -> u64 {
    2000
}

fn default_book_depth() -> usize {
    10
}

fn default_synthetic_spread_rate() -> Rate {
    Decimal::new(2, 3) // 0.2%
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            venue_timeout_ms: default_venue_timeout_ms(),
            book_depth: default_book_depth(),
            synthetic_spread_rate: default_synthetic_spread_rate(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ArbitrageSettings {
    #[serde(default = "default_min_profit_rate")]
    pub min_profit_rate: Rate,
    #[serde(default = "default_max_spread_rate")]
    pub max_spread_rate: Rate,
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
}

fn default_min_profit_rate() -> Rate {
    Decimal::new(1, 2) // 1%
}

fn default_max_spread_rate() -> Rate {
    Decimal::new(10, 2) // 10%
}

fn default_scan_interval_secs() -> u64 {
    30
}

impl Default for ArbitrageSettings {
    fn default() -> Self {
        Self {
            min_profit_rate: default_min_profit_rate(),
            max_spread_rate: default_max_spread_rate(),
            scan_interval_secs: default_scan_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// One venue's wiring, backing a mock adapter in demo runs.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueSettings {
    pub id: VenueId,
    pub seed: u64,
    #[serde(default = "default_initial_price")]
    pub initial_price: Price,
    #[serde(default = "default_min_price")]
    pub min_price: Price,
    #[serde(default = "default_max_price")]
    pub max_price: Price,
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Rate,
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub halted: bool,
}

fn default_initial_price() -> Price {
    Decimal::new(14850, 2)
}

fn default_min_price() -> Price {
    Decimal::from(100)
}

fn default_max_price() -> Price {
    Decimal::from(200)
}

fn default_fee_rate() -> Rate {
    Decimal::new(1, 3)
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.market.symbol.is_empty() {
            return Err(ConfigError::MissingField { field: "market.symbol" }.into());
        }
        if self.venues.is_empty() {
            return Err(ConfigError::MissingField { field: "venues" }.into());
        }
        for v in &self.venues {
            if v.fee_rate < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "venues.fee_rate",
                    reason: format!("negative fee rate for {}", v.id),
                }
                .into());
            }
            if v.min_price > v.max_price {
                return Err(ConfigError::InvalidValue {
                    field: "venues.min_price",
                    reason: format!("min above max for {}", v.id),
                }
                .into());
            }
        }
        if self.collector.venue_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collector.venue_timeout_ms",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.arbitrage.min_profit_rate < Decimal::ZERO
            || self.arbitrage.max_spread_rate < self.arbitrage.min_profit_rate
        {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage",
                reason: "thresholds must satisfy 0 <= min_profit_rate <= max_spread_rate".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            quote_currency: self.market.quote_currency.clone(),
            venue_timeout: Duration::from_millis(self.collector.venue_timeout_ms),
            book_depth: self.collector.book_depth,
            synthetic_spread_rate: self.collector.synthetic_spread_rate,
        }
    }

    pub fn analyzer(&self) -> ArbitrageAnalyzer {
        ArbitrageAnalyzer::new(self.arbitrage.min_profit_rate, self.arbitrage.max_spread_rate)
    }

    /// Build the venue registry from the configured venues, one mock adapter
    /// each. Resolved once at startup; duplicate ids fail here.
    pub fn build_registry(&self) -> Result<VenueRegistry> {
        let mut registry = VenueRegistry::new();
        for v in &self.venues {
            let mut mock = MockVenueConfig::new(v.id, self.market.symbol.clone(), v.seed);
            mock.initial_price = v.initial_price;
            mock.min_price = v.min_price;
            mock.max_price = v.max_price;
            mock.fee_rate = v.fee_rate;
            mock.latency = Duration::from_millis(v.latency_ms);
            mock.halted = v.halted;
            registry.register(Arc::new(MockVenue::new(mock)))?;
        }
        Ok(registry)
    }
}
