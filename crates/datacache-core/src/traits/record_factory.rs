//! Record factory trait definition.

use crate::error::DataError;
use crate::types::SubscriptionConfig;
use chrono::NaiveDate;

/// Trait for turning one raw line of market data text into a typed record.
///
/// Factories are stateless from the reader's point of view; any internal
/// state belongs to the factory itself.
pub trait RecordFactory: Send + Sync {
    /// The record type this factory produces.
    type Record;

    /// Build one record from a raw line.
    ///
    /// # Arguments
    /// * `config` - The subscription the line belongs to
    /// * `line` - One line of decompressed text, without the terminator
    /// * `date` - The trading date of the source file
    /// * `live` - Whether the line came from a live stream rather than an
    ///   archived file
    fn create(
        &self,
        config: &SubscriptionConfig,
        line: &str,
        date: NaiveDate,
        live: bool,
    ) -> Result<Self::Record, DataError>;
}
