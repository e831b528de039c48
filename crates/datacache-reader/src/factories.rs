//! Record factories for the on-disk CSV formats.
//!
//! Archived files store one record per line. Intraday files carry a
//! milliseconds-since-midnight time column resolved against the file's
//! trading date; hour and daily files carry a full `yyyyMMdd HH:mm`
//! timestamp. Prices are stored as integers scaled by the subscription's
//! price scale.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use datacache_core::error::DataError;
use datacache_core::traits::RecordFactory;
use datacache_core::types::{QuoteBar, QuoteSide, SubscriptionConfig, Tick, TradeBar};
use rust_decimal::Decimal;

const DAILY_TIME_FORMAT: &str = "%Y%m%d %H:%M";

/// Builds [`TradeBar`] records from trade bar files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeBarFactory;

impl RecordFactory for TradeBarFactory {
    type Record = TradeBar;

    fn create(
        &self,
        config: &SubscriptionConfig,
        line: &str,
        date: NaiveDate,
        _live: bool,
    ) -> Result<TradeBar, DataError> {
        let mut fields = line.split(',');
        let time = parse_time(next_field(&mut fields, line)?, config, date)?;
        let open = parse_price(next_field(&mut fields, line)?, config)?;
        let high = parse_price(next_field(&mut fields, line)?, config)?;
        let low = parse_price(next_field(&mut fields, line)?, config)?;
        let close = parse_price(next_field(&mut fields, line)?, config)?;
        let volume = parse_decimal(next_field(&mut fields, line)?)?;

        Ok(TradeBar {
            symbol: config.symbol.clone(),
            time,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Builds [`Tick`] records from tick trade files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickFactory;

impl RecordFactory for TickFactory {
    type Record = Tick;

    fn create(
        &self,
        config: &SubscriptionConfig,
        line: &str,
        date: NaiveDate,
        _live: bool,
    ) -> Result<Tick, DataError> {
        let mut fields = line.split(',');
        let time = parse_time(next_field(&mut fields, line)?, config, date)?;
        let price = parse_price(next_field(&mut fields, line)?, config)?;
        let quantity = parse_decimal(next_field(&mut fields, line)?)?;
        let exchange = next_field(&mut fields, line)?.to_string();
        let sale_condition = next_field(&mut fields, line)?.to_string();
        let suspicious = next_field(&mut fields, line)?.trim() == "1";

        Ok(Tick {
            symbol: config.symbol.clone(),
            time,
            price,
            quantity,
            exchange,
            sale_condition,
            suspicious,
        })
    }
}

/// Builds [`QuoteBar`] records from quote bar files.
///
/// Quote files carry eleven columns: time, bid OHLC, last bid size, ask
/// OHLC, last ask size. A side whose columns are empty was not quoted
/// inside the bar and comes back as `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteBarFactory;

impl RecordFactory for QuoteBarFactory {
    type Record = QuoteBar;

    fn create(
        &self,
        config: &SubscriptionConfig,
        line: &str,
        date: NaiveDate,
        _live: bool,
    ) -> Result<QuoteBar, DataError> {
        let cols: Vec<&str> = line.split(',').collect();
        if cols.len() < 11 {
            return Err(DataError::Parse(format!(
                "Expected 11 quote columns, got {}: {}",
                cols.len(),
                line
            )));
        }

        Ok(QuoteBar {
            symbol: config.symbol.clone(),
            time: parse_time(cols[0], config, date)?,
            bid: parse_side(&cols[1..5], config)?,
            last_bid_size: parse_size(cols[5])?,
            ask: parse_side(&cols[6..10], config)?,
            last_ask_size: parse_size(cols[10])?,
        })
    }
}

fn parse_side(cols: &[&str], config: &SubscriptionConfig) -> Result<Option<QuoteSide>, DataError> {
    if cols[0].trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(QuoteSide {
        open: parse_price(cols[0], config)?,
        high: parse_price(cols[1], config)?,
        low: parse_price(cols[2], config)?,
        close: parse_price(cols[3], config)?,
    }))
}

fn parse_size(raw: &str) -> Result<Decimal, DataError> {
    if raw.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(raw)
}

fn next_field<'a>(
    fields: &mut std::str::Split<'a, char>,
    line: &str,
) -> Result<&'a str, DataError> {
    fields
        .next()
        .ok_or_else(|| DataError::Parse(format!("Missing field in line: {}", line)))
}

fn parse_decimal(raw: &str) -> Result<Decimal, DataError> {
    raw.trim()
        .parse()
        .map_err(|err| DataError::Parse(format!("Invalid number '{}': {}", raw, err)))
}

fn parse_price(raw: &str, config: &SubscriptionConfig) -> Result<Decimal, DataError> {
    Ok(parse_decimal(raw)? / config.price_scale)
}

/// Resolve the time column of a row.
///
/// Intraday rows store milliseconds since midnight of the file's date;
/// hour and daily rows store a full timestamp.
fn parse_time(
    raw: &str,
    config: &SubscriptionConfig,
    date: NaiveDate,
) -> Result<DateTime<Utc>, DataError> {
    let raw = raw.trim();
    if config.resolution.is_intraday() {
        let millis: i64 = raw
            .parse()
            .map_err(|err| DataError::Parse(format!("Invalid time offset '{}': {}", raw, err)))?;
        Ok((date.and_time(NaiveTime::MIN) + Duration::milliseconds(millis)).and_utc())
    } else {
        let time = NaiveDateTime::parse_from_str(raw, DAILY_TIME_FORMAT)
            .map_err(|err| DataError::Parse(format!("Invalid timestamp '{}': {}", raw, err)))?;
        Ok(time.and_utc())
    }
}
