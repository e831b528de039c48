//! Lazy record reading from archived market data.
//!
//! A [`RecordReader`] pulls one data file through a [`DataCacheProvider`]
//! and hands each line to a [`RecordFactory`], yielding typed records in
//! file order without materializing the whole file as records up front.

mod factories;

pub use factories::{QuoteBarFactory, TickFactory, TradeBarFactory};

use chrono::NaiveDate;
use datacache_core::error::{DataError, DataResult};
use datacache_core::key::ArchiveKey;
use datacache_core::traits::{DataCacheProvider, DataStream, RecordFactory};
use datacache_core::types::SubscriptionConfig;
use std::io::{BufRead, BufReader, Lines};
use std::sync::Arc;

/// Reads one archived data file through a cache and yields typed records.
pub struct RecordReader<F> {
    cache: Arc<dyn DataCacheProvider>,
    factory: F,
    config: SubscriptionConfig,
    date: NaiveDate,
    key: ArchiveKey,
}

impl<F: RecordFactory> RecordReader<F> {
    /// Create a reader for the file selected by `key`.
    ///
    /// `date` is the trading date the file covers; intraday rows carry only
    /// a millisecond offset and are resolved against it.
    pub fn new(
        cache: Arc<dyn DataCacheProvider>,
        factory: F,
        config: SubscriptionConfig,
        date: NaiveDate,
        key: ArchiveKey,
    ) -> Self {
        Self {
            cache,
            factory,
            config,
            date,
            key,
        }
    }

    /// Fetch the backing stream and return a lazy iterator over records.
    ///
    /// The iterator is forward-only and single-pass; a missing archive,
    /// missing entry, or corrupt archive yields an empty iterator, while
    /// byte-source failures propagate. Call `records` again for a fresh
    /// pass, which re-fetches through the cache (cheap on a hit).
    pub fn records(&self) -> DataResult<Records<'_, F>> {
        let stream = self.cache.fetch(&self.key.to_string())?;
        Ok(Records {
            lines: stream.map(|stream| BufReader::new(stream).lines()),
            reader: self,
        })
    }
}

/// Lazy iterator over the records of one archived data file.
///
/// Each non-blank line goes through the record factory exactly once, in
/// file order. The backing stream is an independent copy and is released
/// when the iterator drops.
pub struct Records<'a, F> {
    lines: Option<Lines<BufReader<DataStream>>>,
    reader: &'a RecordReader<F>,
}

impl<F: RecordFactory> Iterator for Records<'_, F> {
    type Item = DataResult<F::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines.as_mut()?;
        loop {
            match lines.next()? {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(self.reader.factory.create(
                        &self.reader.config,
                        &line,
                        self.reader.date,
                        false,
                    ));
                }
                Err(err) => return Some(Err(DataError::Io(err))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datacache_core::types::{Resolution, TickType};
    use datacache_zip::{FileDataProvider, ZipArchiveCache};
    use rust_decimal_macros::dec;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn write_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) {
        let file = File::create(dir.join(name)).unwrap();
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (entry, contents) in entries {
            writer.start_file(*entry, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    fn cache_for(dir: &Path) -> Arc<dyn DataCacheProvider> {
        Arc::new(ZipArchiveCache::new(Arc::new(FileDataProvider::new(dir))))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn test_reads_all_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        // 09:31, 09:32, 09:33 minute bars with prices scaled by 10000
        let csv = "34260000,1000000,1010000,995000,1005000,1200\n\
                   34320000,1005000,1015000,1000000,1010000,800\n\
                   34380000,1010000,1020000,1005000,1015000,950\n";
        write_zip(dir.path(), "20240102_trade.zip", &[("20240102_spy_minute_trade.csv", csv)]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade),
            date(),
            ArchiveKey::parse("20240102_trade.zip#20240102_spy_minute_trade.csv"),
        );

        let bars: Vec<_> = reader
            .records()
            .unwrap()
            .collect::<DataResult<Vec<_>>>()
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(
            bars[0].time,
            date().and_hms_opt(9, 31, 0).unwrap().and_utc()
        );
        assert_eq!(bars[0].open, dec!(100));
        assert_eq!(bars[0].high, dec!(101));
        assert_eq!(bars[0].volume, dec!(1200));
        assert_eq!(
            bars[2].time,
            date().and_hms_opt(9, 33, 0).unwrap().and_utc()
        );
        assert_eq!(bars[2].close, dec!(101.5));
    }

    #[test]
    fn test_missing_archive_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade),
            date(),
            ArchiveKey::parse("absent.zip#entry.csv"),
        );

        assert_eq!(reader.records().unwrap().count(), 0);
    }

    #[test]
    fn test_missing_entry_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_zip(dir.path(), "day.zip", &[("real.csv", "34260000,1,1,1,1,1\n")]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade),
            date(),
            ArchiveKey::parse("day.zip#other.csv"),
        );

        assert_eq!(reader.records().unwrap().count(), 0);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "34260000,1000000,1010000,995000,1005000,1200\n\n34320000,1005000,1015000,1000000,1010000,800\n";
        write_zip(dir.path(), "day.zip", &[("bars.csv", csv)]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade),
            date(),
            ArchiveKey::parse("day.zip#bars.csv"),
        );

        assert_eq!(reader.records().unwrap().count(), 2);
    }

    #[test]
    fn test_malformed_line_surfaces_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "34260000,1000000,1010000,995000,1005000,1200\nnot,a,bar\n";
        write_zip(dir.path(), "day.zip", &[("bars.csv", csv)]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade),
            date(),
            ArchiveKey::parse("day.zip#bars.csv"),
        );

        let results: Vec<_> = reader.records().unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(DataError::Parse(_))));
    }

    #[test]
    fn test_second_pass_rereads_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "34260000,1000000,1010000,995000,1005000,1200\n";
        write_zip(dir.path(), "day.zip", &[("bars.csv", csv)]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Minute, TickType::Trade),
            date(),
            ArchiveKey::parse("day.zip#bars.csv"),
        );

        assert_eq!(reader.records().unwrap().count(), 1);
        assert_eq!(reader.records().unwrap().count(), 1);
    }

    #[test]
    fn test_daily_bars() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "20240102 00:00,1000000,1020000,990000,1010000,123456\n";
        write_zip(dir.path(), "spy.zip", &[("spy.csv", csv)]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TradeBarFactory,
            SubscriptionConfig::new("SPY", Resolution::Daily, TickType::Trade),
            date(),
            ArchiveKey::parse("spy.zip#spy.csv"),
        );

        let bars: Vec<_> = reader
            .records()
            .unwrap()
            .collect::<DataResult<Vec<_>>>()
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(
            bars[0].time,
            date().and_hms_opt(0, 0, 0).unwrap().and_utc()
        );
        assert_eq!(bars[0].low, dec!(99));
    }

    #[test]
    fn test_tick_records() {
        let dir = tempfile::tempdir().unwrap();
        let csv = "34260123,1000000,100,P,@,0\n34260456,1000500,50,Q,@,1\n";
        write_zip(dir.path(), "ticks.zip", &[("ticks.csv", csv)]);

        let reader = RecordReader::new(
            cache_for(dir.path()),
            TickFactory,
            SubscriptionConfig::new("SPY", Resolution::Tick, TickType::Trade),
            date(),
            ArchiveKey::parse("ticks.zip#ticks.csv"),
        );

        let ticks: Vec<_> = reader
            .records()
            .unwrap()
            .collect::<DataResult<Vec<_>>>()
            .unwrap();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].price, dec!(100));
        assert_eq!(ticks[0].exchange, "P");
        assert!(!ticks[0].suspicious);
        assert!(ticks[1].suspicious);
    }
}
