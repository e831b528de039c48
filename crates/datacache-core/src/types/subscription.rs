//! Subscription metadata for archived market data.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolution of archived market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Individual trades/quotes
    Tick,
    /// 1 second bars
    Second,
    /// 1 minute bars
    #[default]
    Minute,
    /// 1 hour bars
    Hour,
    /// Daily bars
    Daily,
}

impl Resolution {
    /// Whether rows of this resolution carry a milliseconds-since-midnight
    /// time column instead of a full datetime.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Resolution::Tick | Resolution::Second | Resolution::Minute)
    }

    /// Get all available resolutions.
    pub fn all() -> &'static [Resolution] {
        &[
            Resolution::Tick,
            Resolution::Second,
            Resolution::Minute,
            Resolution::Hour,
            Resolution::Daily,
        ]
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resolution::Tick => "tick",
            Resolution::Second => "second",
            Resolution::Minute => "minute",
            Resolution::Hour => "hour",
            Resolution::Daily => "daily",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tick" => Ok(Resolution::Tick),
            "second" | "1s" => Ok(Resolution::Second),
            "minute" | "1m" => Ok(Resolution::Minute),
            "hour" | "1h" => Ok(Resolution::Hour),
            "daily" | "day" | "1d" => Ok(Resolution::Daily),
            _ => Err(format!("Invalid resolution: {}", s)),
        }
    }
}

/// The kind of market event a data file records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TickType {
    /// Executed trades
    #[default]
    Trade,
    /// Bid/ask quotes
    Quote,
}

impl fmt::Display for TickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TickType::Trade => "trade",
            TickType::Quote => "quote",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TickType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trade" => Ok(TickType::Trade),
            "quote" => Ok(TickType::Quote),
            _ => Err(format!("Invalid tick type: {}", s)),
        }
    }
}

/// Describes one archived data stream: which symbol it belongs to, how it is
/// shaped, and how stored prices map to real prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionConfig {
    /// Symbol the data belongs to
    pub symbol: String,
    /// Bar resolution of the file
    pub resolution: Resolution,
    /// Trade or quote data
    pub tick_type: TickType,
    /// Divisor applied to stored prices. Equity files store prices as
    /// integers scaled by 10000.
    pub price_scale: Decimal,
}

impl SubscriptionConfig {
    /// Create a config with the default equity price scale.
    pub fn new(symbol: impl Into<String>, resolution: Resolution, tick_type: TickType) -> Self {
        Self {
            symbol: symbol.into(),
            resolution,
            tick_type,
            price_scale: dec!(10000),
        }
    }

    /// Override the price scale, e.g. `Decimal::ONE` for unscaled files.
    pub fn with_price_scale(mut self, price_scale: Decimal) -> Self {
        self.price_scale = price_scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_parse() {
        assert_eq!(Resolution::from_str("minute").unwrap(), Resolution::Minute);
        assert_eq!(Resolution::from_str("1d").unwrap(), Resolution::Daily);
        assert_eq!(Resolution::from_str("Tick").unwrap(), Resolution::Tick);
        assert!(Resolution::from_str("fortnight").is_err());
    }

    #[test]
    fn test_resolution_display() {
        assert_eq!(Resolution::Minute.to_string(), "minute");
        assert_eq!(Resolution::Daily.to_string(), "daily");
    }

    #[test]
    fn test_is_intraday() {
        assert!(Resolution::Tick.is_intraday());
        assert!(Resolution::Minute.is_intraday());
        assert!(!Resolution::Hour.is_intraday());
        assert!(!Resolution::Daily.is_intraday());
    }

    #[test]
    fn test_subscription_defaults() {
        let config = SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade);
        assert_eq!(config.price_scale, dec!(10000));

        let unscaled = config.with_price_scale(Decimal::ONE);
        assert_eq!(unscaled.price_scale, Decimal::ONE);
    }
}
