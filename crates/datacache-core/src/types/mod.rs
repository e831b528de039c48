//! Core data types for the cache subsystem.

mod quote_bar;
mod subscription;
mod tick;
mod trade_bar;

pub use quote_bar::{QuoteBar, QuoteSide};
pub use subscription::{Resolution, SubscriptionConfig, TickType};
pub use tick::Tick;
pub use trade_bar::TradeBar;
