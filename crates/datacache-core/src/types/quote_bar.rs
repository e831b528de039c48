//! Quote bar record type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OHLC for one side of the book over a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSide {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// One bar built from bid/ask quotes.
///
/// Either side may be absent when the file recorded no quotes for it inside
/// the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBar {
    /// Symbol the bar belongs to
    pub symbol: String,
    /// Bar start time
    pub time: DateTime<Utc>,
    /// Bid OHLC, if the bar saw any bids
    pub bid: Option<QuoteSide>,
    /// Size of the last bid inside the bar
    pub last_bid_size: Decimal,
    /// Ask OHLC, if the bar saw any asks
    pub ask: Option<QuoteSide>,
    /// Size of the last ask inside the bar
    pub last_ask_size: Decimal,
}

impl fmt::Display for QuoteBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} bid:{} ask:{}",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.symbol,
            self.bid
                .as_ref()
                .map_or_else(|| "-".to_string(), |b| b.close.to_string()),
            self.ask
                .as_ref()
                .map_or_else(|| "-".to_string(), |a| a.close.to_string()),
        )
    }
}
