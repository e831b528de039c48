//! Tick record type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed trade from a tick-resolution archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Symbol the tick belongs to
    pub symbol: String,
    /// Trade time
    pub time: DateTime<Utc>,
    /// Trade price
    pub price: Decimal,
    /// Trade size
    pub quantity: Decimal,
    /// Exchange code the trade printed on
    pub exchange: String,
    /// Raw sale condition flags
    pub sale_condition: String,
    /// Whether the feed marked the trade as suspicious
    pub suspicious: bool,
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} x {} @{}",
            self.time.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.symbol,
            self.quantity,
            self.price,
            self.exchange
        )
    }
}
