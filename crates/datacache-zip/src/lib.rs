//! Zip archive caching for market data files.
//!
//! Historical market data lives in many small zip archives, one per
//! security per day per resolution, and a running algorithm reads entries
//! from the same archive over and over inside a short window. This crate
//! keeps opened archives in a bounded-lifetime, thread-safe cache so each
//! read costs one entry decompression instead of a full open-and-parse.

mod cache;
mod file_source;

pub use cache::ZipArchiveCache;
pub use file_source::FileDataProvider;
