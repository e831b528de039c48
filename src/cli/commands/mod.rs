//! CLI command implementations.

pub mod cat;
pub mod entries;
pub mod export;
pub mod init_config;
pub mod validate;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use datacache_config::AppConfig;
use datacache_core::types::{Resolution, SubscriptionConfig, TickType};
use datacache_zip::{FileDataProvider, ZipArchiveCache};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Load the configuration file, falling back to defaults when it does not
/// exist.
pub(crate) fn load_or_default(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        Ok(datacache_config::load_config(path)?)
    } else {
        Ok(AppConfig::default())
    }
}

/// Build an archive cache over the configured data folder.
pub(crate) fn build_cache(config: &AppConfig, data: Option<&Path>) -> Arc<ZipArchiveCache> {
    let folder = data
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.data.folder));
    let provider = Arc::new(FileDataProvider::new(folder));
    Arc::new(ZipArchiveCache::with_policy(
        provider,
        Duration::from_secs(config.cache.ttl_secs),
        Duration::from_secs(config.cache.sweep_interval_secs),
    ))
}

/// Build a subscription config from CLI arguments.
pub(crate) fn parse_subscription(
    symbol: &str,
    resolution: &str,
    tick_type: &str,
    price_scale: Option<f64>,
) -> Result<SubscriptionConfig> {
    let resolution: Resolution = resolution.parse().map_err(anyhow::Error::msg)?;
    let tick_type: TickType = tick_type.parse().map_err(anyhow::Error::msg)?;

    let mut config = SubscriptionConfig::new(symbol, resolution, tick_type);
    if let Some(scale) = price_scale {
        let scale = Decimal::try_from(scale).context("Invalid price scale")?;
        config = config.with_price_scale(scale);
    }
    Ok(config)
}

/// Parse a YYYY-MM-DD trading date.
pub(crate) fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}
