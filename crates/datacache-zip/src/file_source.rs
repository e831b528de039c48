//! Filesystem data provider.

use datacache_core::error::DataResult;
use datacache_core::traits::{DataProvider, DataStream};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Reads raw data files from beneath a root data folder.
///
/// A missing file is absence, not an error; anything else that goes wrong
/// opening the file propagates as an IO error.
pub struct FileDataProvider {
    root: PathBuf,
}

impl FileDataProvider {
    /// Create a provider rooted at `root`. Absolute keys bypass the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root data folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> PathBuf {
        let path = Path::new(key);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DataProvider for FileDataProvider {
    fn fetch(&self, key: &str) -> DataResult<Option<DataStream>> {
        let path = self.resolve(key);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(path)?;
        Ok(Some(Box::new(file)))
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}
