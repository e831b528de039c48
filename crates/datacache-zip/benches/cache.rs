//! Benchmarks for the archive cache hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datacache_core::error::DataResult;
use datacache_core::traits::{DataProvider, DataStream};
use datacache_zip::ZipArchiveCache;
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serves one fixed archive from memory.
struct StaticProvider {
    bytes: Vec<u8>,
}

impl DataProvider for StaticProvider {
    fn fetch(&self, _key: &str) -> DataResult<Option<DataStream>> {
        Ok(Some(Box::new(Cursor::new(self.bytes.clone()))))
    }

    fn name(&self) -> &str {
        "static"
    }
}

fn minute_file_zip() -> Vec<u8> {
    let mut csv = String::new();
    for minute in 0..390 {
        let millis = 34_200_000 + minute * 60_000;
        csv.push_str(&format!(
            "{},5437500,5440000,5435000,5438000,1200\n",
            millis
        ));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer
        .start_file("20240102_spy_minute_trade.csv", options)
        .unwrap();
    writer.write_all(csv.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn bench_fetch(c: &mut Criterion) {
    let provider = Arc::new(StaticProvider {
        bytes: minute_file_zip(),
    });
    let cache = ZipArchiveCache::new(provider);
    let key = "20240102_trade.zip#20240102_spy_minute_trade.csv";

    // warm the cache so the loop measures the hit path
    cache.fetch(key).unwrap().unwrap();

    c.bench_function("fetch_cached_entry", |b| {
        b.iter(|| {
            let stream = cache.fetch(black_box(key)).unwrap().unwrap();
            black_box(stream);
        })
    });
}

criterion_group!(benches, bench_fetch);
criterion_main!(benches);
