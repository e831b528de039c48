//! Cat command implementation.

use anyhow::Result;
use datacache_core::key::ArchiveKey;
use datacache_core::traits::{DataCacheProvider, RecordFactory};
use datacache_core::types::{Resolution, TickType};
use datacache_reader::{QuoteBarFactory, RecordReader, TickFactory, TradeBarFactory};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::info;

use crate::cli::CatArgs;

use super::{build_cache, load_or_default, parse_date, parse_subscription};

pub fn run(args: CatArgs, config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path)?;
    let cache: std::sync::Arc<dyn DataCacheProvider> = build_cache(&config, args.data.as_deref());

    let subscription =
        parse_subscription(&args.symbol, &args.resolution, &args.tick_type, args.price_scale)?;
    let date = parse_date(&args.date)?;
    let key = ArchiveKey::parse(&args.key);

    match (subscription.tick_type, subscription.resolution) {
        (TickType::Trade, Resolution::Tick) => {
            let reader = RecordReader::new(cache, TickFactory, subscription, date, key);
            print_records(&reader, args.json, args.limit)
        }
        (TickType::Quote, Resolution::Tick) => {
            anyhow::bail!("quote tick files are not supported")
        }
        (TickType::Trade, _) => {
            let reader = RecordReader::new(cache, TradeBarFactory, subscription, date, key);
            print_records(&reader, args.json, args.limit)
        }
        (TickType::Quote, _) => {
            let reader = RecordReader::new(cache, QuoteBarFactory, subscription, date, key);
            print_records(&reader, args.json, args.limit)
        }
    }
}

fn print_records<F>(reader: &RecordReader<F>, json: bool, limit: Option<usize>) -> Result<()>
where
    F: RecordFactory,
    F::Record: Serialize + Display,
{
    let mut count = 0usize;
    for record in reader.records()? {
        let record = record?;
        if json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", record);
        }
        count += 1;
        if limit.is_some_and(|limit| count >= limit) {
            break;
        }
    }
    info!("Printed {} records", count);
    Ok(())
}
