//! Clean-Table Cache Module
//! Explicit memoization of cleaned tables keyed by source identity.

use polars::prelude::DataFrame;
use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::cleaner::{CleanError, DataCleaner};
use super::loader::{DatasetLoader, LoaderError};

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read source: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanError),
}

/// A CSV-formatted tabular resource: a file on disk or an uploaded buffer.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    Path(PathBuf),
    Memory { name: String, bytes: Vec<u8> },
}

impl DatasetSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DatasetSource::Path(path.into())
    }

    pub fn memory(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        DatasetSource::Memory {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Cache identity of the source. Paths and uploads share a namespace,
    /// which matches how the presentation layer labels its inputs.
    pub fn identity(&self) -> String {
        match self {
            DatasetSource::Path(path) => path.display().to_string(),
            DatasetSource::Memory { name, .. } => name.clone(),
        }
    }

    fn read_bytes(&self) -> io::Result<Cow<'_, [u8]>> {
        match self {
            DatasetSource::Path(path) => Ok(Cow::Owned(std::fs::read(path)?)),
            DatasetSource::Memory { bytes, .. } => Ok(Cow::Borrowed(bytes)),
        }
    }
}

/// SHA-256 fingerprint of raw source bytes, as a hex string.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

struct CacheEntry {
    fingerprint: String,
    table: DataFrame,
}

/// Caches cleaned tables per source identity.
///
/// A hit requires the stored fingerprint to match the current bytes, so
/// reusing a path with different content re-parses instead of returning a
/// stale table.
#[derive(Default)]
pub struct CleanCache {
    entries: HashMap<String, CacheEntry>,
}

impl CleanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cleaned table for `source`, parsing and cleaning only
    /// when the identity is new or its content changed.
    pub fn get_or_clean(&mut self, source: &DatasetSource) -> Result<DataFrame, CacheError> {
        let bytes = source.read_bytes()?;
        let fingerprint = fingerprint(&bytes);
        let identity = source.identity();

        if let Some(entry) = self.entries.get(&identity) {
            if entry.fingerprint == fingerprint {
                log::debug!("cache hit for '{}'", identity);
                return Ok(entry.table.clone());
            }
            log::info!("content changed for '{}', re-cleaning", identity);
        }

        let parsed = DatasetLoader::read_csv_bytes(&bytes)?;
        let table = DataCleaner::clean(&parsed)?;
        self.entries.insert(
            identity,
            CacheEntry {
                fingerprint,
                table: table.clone(),
            },
        );
        Ok(table)
    }

    /// Drop the entry for one source identity. Returns whether it existed.
    pub fn invalidate(&mut self, identity: &str) -> bool {
        self.entries.remove(identity).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV_A: &str = "City,Country,AQI Value\nHanoi,Viet Nam,150\nOslo,Norway,20\n";
    const CSV_B: &str = "City,Country,AQI Value\nDelhi,India,300\n";

    #[test]
    fn test_fingerprint_is_stable_and_content_sensitive() {
        assert_eq!(fingerprint(b"abc"), fingerprint(b"abc"));
        assert_ne!(fingerprint(b"abc"), fingerprint(b"abd"));
    }

    #[test]
    fn test_repeated_loads_hit_the_cache() {
        let mut cache = CleanCache::new();
        let source = DatasetSource::memory("upload.csv", CSV_A.as_bytes());

        let first = cache.get_or_clean(&source).unwrap();
        let second = cache.get_or_clean(&source).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(first.height(), second.height());
    }

    #[test]
    fn test_changed_file_content_is_re_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("air.csv");
        std::fs::write(&path, CSV_A).unwrap();

        let mut cache = CleanCache::new();
        let source = DatasetSource::path(&path);

        let before = cache.get_or_clean(&source).unwrap();
        assert_eq!(before.height(), 2);

        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CSV_B.as_bytes()).unwrap();

        let after = cache.get_or_clean(&source).unwrap();
        assert_eq!(after.height(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = CleanCache::new();
        let source = DatasetSource::memory("upload.csv", CSV_A.as_bytes());
        cache.get_or_clean(&source).unwrap();

        assert!(cache.invalidate("upload.csv"));
        assert!(!cache.invalidate("upload.csv"));
        assert!(cache.is_empty());

        cache.get_or_clean(&source).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
