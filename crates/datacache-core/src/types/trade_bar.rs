//! Trade bar record type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLCV bar built from executed trades.
///
/// Prices use `Decimal` for exact arithmetic; archived files store them as
/// scaled integers and the factory divides by the subscription's price
/// scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeBar {
    /// Symbol the bar belongs to
    pub symbol: String,
    /// Bar start time
    pub time: DateTime<Utc>,
    /// Opening price
    pub open: Decimal,
    /// Highest price
    pub high: Decimal,
    /// Lowest price
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Trading volume
    pub volume: Decimal,
}

impl fmt::Display for TradeBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} O:{} H:{} L:{} C:{} V:{}",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.symbol,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume
        )
    }
}
