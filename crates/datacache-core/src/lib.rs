//! Core types and traits for the market data cache subsystem.
//!
//! This crate provides the foundational building blocks including:
//! - Composite cache keys (archive path plus optional entry name)
//! - Market record types (TradeBar, Tick)
//! - Core traits for byte providers, cache providers, and record factories
//! - The shared error taxonomy

pub mod error;
pub mod key;
pub mod traits;
pub mod types;

pub use error::{DataError, DataResult};
pub use key::ArchiveKey;
pub use traits::*;
pub use types::*;
