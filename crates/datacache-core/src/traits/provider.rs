//! Data provider trait definitions.

use crate::error::DataError;
use std::io::Read;

/// A readable stream of raw data bytes.
///
/// Streams handed out by providers and caches are independently owned;
/// reading or dropping one has no effect on any shared state.
pub type DataStream = Box<dyn Read + Send>;

/// Trait for raw byte retrieval by key.
///
/// Implementations must be safe to call from multiple threads. Absence of
/// data is signaled by `Ok(None)`, never by an error; errors indicate an
/// infrastructure failure and propagate to the caller.
pub trait DataProvider: Send + Sync {
    /// Fetch the bytes stored under `key`.
    fn fetch(&self, key: &str) -> Result<Option<DataStream>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Trait for caching layers that sit between record readers and a
/// [`DataProvider`].
///
/// `fetch` accepts composite keys (`archive.zip#entry`) and resolves them
/// through whatever caching the implementation maintains.
pub trait DataCacheProvider: Send + Sync {
    /// Fetch the bytes for a composite key, consulting the cache first.
    fn fetch(&self, key: &str) -> Result<Option<DataStream>, DataError>;

    /// Store data under `key`.
    ///
    /// Read-through implementations may ignore writes entirely; `store`
    /// never fails.
    fn store(&self, key: &str, data: &[u8]);
}
