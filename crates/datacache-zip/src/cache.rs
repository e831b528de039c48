//! Zip archive cache with time-based eviction.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use datacache_core::error::{DataError, DataResult};
use datacache_core::key::ArchiveKey;
use datacache_core::traits::{DataCacheProvider, DataProvider, DataStream};
use tracing::{debug, error};
use zip::result::ZipError;
use zip::ZipArchive;

/// How long an opened archive stays cached, counted from first use.
const DEFAULT_TTL: Duration = Duration::from_secs(10);

/// Minimum interval between opportunistic eviction sweeps.
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(3);

type Archive = ZipArchive<Cursor<Vec<u8>>>;

/// One opened archive together with the time it entered the cache.
///
/// The zip reader is not safe for concurrent extraction, so it sits behind
/// its own mutex; every decompression of an entry happens under that lock.
struct CachedArchive {
    archive: Mutex<Archive>,
    cached_at: Instant,
}

impl CachedArchive {
    fn new(archive: Archive) -> Self {
        Self {
            archive: Mutex::new(archive),
            cached_at: Instant::now(),
        }
    }

    /// True when this archive entered the cache before `cutoff`.
    ///
    /// The timestamp is fixed at creation and never refreshed on access, so
    /// a hot archive is re-opened on a fixed schedule from first use.
    fn is_stale(&self, cutoff: Instant) -> bool {
        self.cached_at < cutoff
    }
}

/// Thread-safe cache of opened zip archives keyed by archive path.
///
/// Archives are opened through the wrapped [`DataProvider`] on first use and
/// held for a fixed time-to-live, so repeated reads of entries from the same
/// archive skip the open-and-parse cost. Requested entries are decompressed
/// into freestanding in-memory streams with no reference back to the cached
/// reader, which is how a non-thread-safe resource turns into thread-safe
/// values. Keys without a `.zip` extension pass straight through to the
/// provider.
///
/// Dropping the cache releases every cached archive.
pub struct ZipArchiveCache {
    provider: Arc<dyn DataProvider>,
    archives: RwLock<HashMap<String, Arc<CachedArchive>>>,
    last_sweep: Mutex<Option<Instant>>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl ZipArchiveCache {
    /// Create a cache over `provider` with the default eviction policy.
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self::with_policy(provider, DEFAULT_TTL, DEFAULT_SWEEP_INTERVAL)
    }

    /// Create a cache with an explicit time-to-live and sweep interval.
    pub fn with_policy(
        provider: Arc<dyn DataProvider>,
        ttl: Duration,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            provider,
            archives: RwLock::new(HashMap::new()),
            last_sweep: Mutex::new(None),
            ttl,
            sweep_interval,
        }
    }

    /// Fetch the bytes for a composite key.
    ///
    /// Returns `Ok(None)` when the provider has no data for the path, when
    /// a valid archive has no matching entry, or when the archive turns out
    /// to be corrupt; corruption is additionally logged at error severity.
    /// Provider failures propagate untouched.
    pub fn fetch(&self, key: &str) -> DataResult<Option<DataStream>> {
        let key = ArchiveKey::parse(key);
        if !key.is_archive() {
            // the cache is transparent to plain file reads
            return self.provider.fetch(key.path());
        }

        self.maybe_sweep(Instant::now());

        if let Some(cached) = self.lookup(key.path()) {
            return absorb_corrupt(self.extract(&cached, &key));
        }

        let opened: DataResult<Option<DataStream>> = (|| {
            let Some(cached) = self.open_archive(&key)? else {
                return Ok(None);
            };
            let stream = self.extract(&cached, &key)?;
            // publish only after open and extract succeeded; when two
            // threads race on the same miss the first insert wins and the
            // loser's handle is dropped
            self.publish(key.path(), cached);
            Ok(stream)
        })();
        absorb_corrupt(opened)
    }

    /// List the entry names of the archive at `path`, opening and caching
    /// it on first use.
    ///
    /// Non-archive paths, missing archives, and corrupt archives all come
    /// back as `Ok(None)`.
    pub fn entry_names(&self, path: &str) -> DataResult<Option<Vec<String>>> {
        let key = ArchiveKey::parse(path);
        if !key.is_archive() {
            return Ok(None);
        }

        self.maybe_sweep(Instant::now());

        let cached = match self.lookup(key.path()) {
            Some(cached) => cached,
            None => match self.open_archive(&key) {
                Ok(Some(cached)) => {
                    self.publish(key.path(), Arc::clone(&cached));
                    cached
                }
                Ok(None) => return Ok(None),
                Err(err @ DataError::CorruptArchive { .. }) => {
                    error!("{}", err);
                    return Ok(None);
                }
                Err(err) => return Err(err),
            },
        };

        let archive = cached.archive.lock().unwrap();
        Ok(Some(archive.file_names().map(str::to_owned).collect()))
    }

    /// Remove every archive cached before `now - ttl` and stamp the sweep.
    ///
    /// Staleness is re-checked under the write lock so each removal is an
    /// atomic take; a handle still in use by a concurrent fetch stays alive
    /// until that fetch drops its reference.
    pub fn evict_stale(&self, now: Instant) {
        if let Some(cutoff) = now.checked_sub(self.ttl) {
            let stale: Vec<String> = {
                let archives = self.archives.read().unwrap();
                archives
                    .iter()
                    .filter(|(_, cached)| cached.is_stale(cutoff))
                    .map(|(path, _)| path.clone())
                    .collect()
            };

            if !stale.is_empty() {
                let mut archives = self.archives.write().unwrap();
                for path in stale {
                    if archives
                        .get(&path)
                        .is_some_and(|cached| cached.is_stale(cutoff))
                    {
                        archives.remove(&path);
                        debug!("Evicted cached archive: {}", path);
                    }
                }
            }
        }

        *self.last_sweep.lock().unwrap() = Some(now);
    }

    /// Number of archives currently cached.
    pub fn len(&self) -> usize {
        self.archives.read().unwrap().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an archive is currently cached under `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.archives.read().unwrap().contains_key(path)
    }

    /// Run an eviction sweep if the sweep interval has elapsed.
    fn maybe_sweep(&self, now: Instant) {
        let due = match *self.last_sweep.lock().unwrap() {
            Some(last) => now.duration_since(last) >= self.sweep_interval,
            None => true,
        };
        if due {
            self.evict_stale(now);
        }
    }

    fn lookup(&self, path: &str) -> Option<Arc<CachedArchive>> {
        self.archives.read().unwrap().get(path).cloned()
    }

    /// Insert-if-absent; an archive already published under `path` wins.
    fn publish(&self, path: &str, cached: Arc<CachedArchive>) {
        let mut archives = self.archives.write().unwrap();
        archives.entry(path.to_owned()).or_insert(cached);
    }

    /// Pull the raw bytes for `key` from the provider and open them as a
    /// zip archive. Does not publish the result.
    fn open_archive(&self, key: &ArchiveKey) -> DataResult<Option<Arc<CachedArchive>>> {
        let Some(mut stream) = self.provider.fetch(key.path())? else {
            return Ok(None);
        };

        let mut bytes = Vec::new();
        // provider failures mid-read are infrastructure errors, not
        // corruption, and propagate
        stream.read_to_end(&mut bytes)?;

        match ZipArchive::new(Cursor::new(bytes)) {
            Ok(archive) => Ok(Some(Arc::new(CachedArchive::new(archive)))),
            Err(err) => Err(classify_zip(key, err)),
        }
    }

    /// Decompress the entry selected by `key` into an independent stream.
    ///
    /// An unset entry name selects the archive's first entry; matching is
    /// ASCII case-insensitive. A valid archive without the requested entry
    /// is absence, not an error.
    fn extract(&self, cached: &CachedArchive, key: &ArchiveKey) -> DataResult<Option<DataStream>> {
        let mut archive = cached.archive.lock().unwrap();

        let name = match key.entry() {
            Some(wanted) => archive
                .file_names()
                .find(|name| name.eq_ignore_ascii_case(wanted))
                .map(str::to_owned),
            None => archive.file_names().next().map(str::to_owned),
        };
        let Some(name) = name else {
            return Ok(None);
        };

        let mut entry = match archive.by_name(&name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(classify_zip(key, err)),
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|err| classify_io(key, err))?;
        Ok(Some(Box::new(Cursor::new(bytes))))
    }
}

impl DataCacheProvider for ZipArchiveCache {
    fn fetch(&self, key: &str) -> DataResult<Option<DataStream>> {
        ZipArchiveCache::fetch(self, key)
    }

    /// No-op: this cache is read-through only. Callers that need write-back
    /// go to the provider directly.
    fn store(&self, _key: &str, _data: &[u8]) {}
}

/// Corrupt archives are an expected condition in historical data; log them
/// and report the key as missing instead of failing the fetch.
fn absorb_corrupt(result: DataResult<Option<DataStream>>) -> DataResult<Option<DataStream>> {
    match result {
        Err(err @ DataError::CorruptArchive { .. }) => {
            error!("{}", err);
            Ok(None)
        }
        other => other,
    }
}

fn classify_zip(key: &ArchiveKey, err: ZipError) -> DataError {
    match err {
        ZipError::Io(io) => classify_io(key, io),
        other => DataError::CorruptArchive {
            key: key.to_string(),
            reason: other.to_string(),
        },
    }
}

/// A mangled deflate stream surfaces from the decompressor as `InvalidData`
/// or `UnexpectedEof`; any other IO kind is infrastructure failure.
fn classify_io(key: &ArchiveKey, err: io::Error) -> DataError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => DataError::CorruptArchive {
            key: key.to_string(),
            reason: err.to_string(),
        },
        _ => DataError::Io(err),
    }
}
