//! Export command implementation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use datacache_core::key::ArchiveKey;
use datacache_core::traits::{DataCacheProvider, RecordFactory};
use datacache_core::types::{QuoteBar, Resolution, TickType};
use datacache_reader::{QuoteBarFactory, RecordReader, TickFactory, TradeBarFactory};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cli::ExportArgs;

use super::{build_cache, load_or_default, parse_date, parse_subscription};

/// Flattened quote bar shape for CSV output.
#[derive(Serialize)]
struct QuoteRow {
    time: DateTime<Utc>,
    symbol: String,
    bid_open: Option<Decimal>,
    bid_high: Option<Decimal>,
    bid_low: Option<Decimal>,
    bid_close: Option<Decimal>,
    last_bid_size: Decimal,
    ask_open: Option<Decimal>,
    ask_high: Option<Decimal>,
    ask_low: Option<Decimal>,
    ask_close: Option<Decimal>,
    last_ask_size: Decimal,
}

impl From<QuoteBar> for QuoteRow {
    fn from(bar: QuoteBar) -> Self {
        Self {
            time: bar.time,
            symbol: bar.symbol,
            bid_open: bar.bid.as_ref().map(|b| b.open),
            bid_high: bar.bid.as_ref().map(|b| b.high),
            bid_low: bar.bid.as_ref().map(|b| b.low),
            bid_close: bar.bid.as_ref().map(|b| b.close),
            last_bid_size: bar.last_bid_size,
            ask_open: bar.ask.as_ref().map(|a| a.open),
            ask_high: bar.ask.as_ref().map(|a| a.high),
            ask_low: bar.ask.as_ref().map(|a| a.low),
            ask_close: bar.ask.as_ref().map(|a| a.close),
            last_ask_size: bar.last_ask_size,
        }
    }
}

pub fn run(args: ExportArgs, config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path)?;
    let cache: std::sync::Arc<dyn DataCacheProvider> = build_cache(&config, args.data.as_deref());

    let subscription =
        parse_subscription(&args.symbol, &args.resolution, &args.tick_type, args.price_scale)?;
    let date = parse_date(&args.date)?;
    let key = ArchiveKey::parse(&args.key);

    let count = match (subscription.tick_type, subscription.resolution) {
        (TickType::Trade, Resolution::Tick) => {
            let reader = RecordReader::new(cache, TickFactory, subscription, date, key);
            write_records(&reader, &args.output, |tick| tick)?
        }
        (TickType::Quote, Resolution::Tick) => {
            anyhow::bail!("quote tick files are not supported")
        }
        (TickType::Trade, _) => {
            let reader = RecordReader::new(cache, TradeBarFactory, subscription, date, key);
            write_records(&reader, &args.output, |bar| bar)?
        }
        (TickType::Quote, _) => {
            let reader = RecordReader::new(cache, QuoteBarFactory, subscription, date, key);
            write_records(&reader, &args.output, QuoteRow::from)?
        }
    };

    info!("Exported {} records to {:?}", count, args.output);
    Ok(())
}

fn write_records<F, R>(
    reader: &RecordReader<F>,
    output: &Path,
    to_row: impl Fn(F::Record) -> R,
) -> Result<usize>
where
    F: RecordFactory,
    R: Serialize,
{
    let mut writer = csv::Writer::from_path(output)?;
    let mut count = 0usize;
    for record in reader.records()? {
        writer.serialize(to_row(record?))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
