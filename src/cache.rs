//! Reference-data cache.
//!
//! Fetches the four reference lists from the remote API and persists
//! them locally, one CSV per category. A persisted table younger than
//! the freshness window is served without touching the network; once it
//! ages out, the next load refetches and overwrites it wholesale. A
//! failed refetch is fatal even when a stale copy exists; stale data is
//! never served silently.
//!
//! Storage and clock are injected so cache policy is testable with an
//! in-memory store and a fake clock.

use crate::api::RemoteSource;
use crate::error::Result;
use crate::models::{Category, ReferenceEntry};
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persisted tables older than this are refetched.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 5;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A persisted reference table together with its freshness timestamp.
#[derive(Debug, Clone)]
pub struct StoredTable {
    pub entries: Vec<ReferenceEntry>,
    pub fetched_at: DateTime<Utc>,
}

/// Persistence seam for reference tables.
///
/// `store` receives the fetch time; backends that derive freshness from
/// their own medium (file mtime) are free to ignore it.
pub trait ReferenceStore {
    fn load(&self, category: Category) -> Result<Option<StoredTable>>;
    fn store(
        &self,
        category: Category,
        entries: &[ReferenceEntry],
        fetched_at: DateTime<Utc>,
    ) -> Result<()>;
}

/// One CSV file per category under a directory. Freshness is the file's
/// modification time; writes go through a temp file in the same
/// directory and replace the target atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, category: Category) -> PathBuf {
        self.dir.join(category.file_name())
    }

    fn write_csv(entries: &[ReferenceEntry], to: impl Write) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(to);
        for entry in entries {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReferenceStore for FileStore {
    fn load(&self, category: Category) -> Result<Option<StoredTable>> {
        let path = self.path(category);
        let meta = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let fetched_at: DateTime<Utc> = meta.modified()?.into();

        let mut rdr = csv::Reader::from_path(&path)?;
        let mut entries = Vec::new();
        for row in rdr.deserialize() {
            entries.push(row?);
        }
        Ok(Some(StoredTable {
            entries,
            fetched_at,
        }))
    }

    fn store(
        &self,
        category: Category,
        entries: &[ReferenceEntry],
        _fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        Self::write_csv(entries, tmp.as_file())?;
        tmp.persist(self.path(category)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory store for tests; freshness is the timestamp handed to
/// `store`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<Category, StoredTable>>,
}

impl ReferenceStore for MemoryStore {
    fn load(&self, category: Category) -> Result<Option<StoredTable>> {
        Ok(self.tables.borrow().get(&category).cloned())
    }

    fn store(
        &self,
        category: Category,
        entries: &[ReferenceEntry],
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        self.tables.borrow_mut().insert(
            category,
            StoredTable {
                entries: entries.to_vec(),
                fetched_at,
            },
        );
        Ok(())
    }
}

/// The cache itself: remote source, store, and clock injected once per
/// process.
pub struct ReferenceCache {
    remote: Box<dyn RemoteSource>,
    store: Box<dyn ReferenceStore>,
    clock: Box<dyn Clock>,
    max_age: TimeDelta,
}

impl ReferenceCache {
    pub fn new(remote: impl RemoteSource + 'static, store: impl ReferenceStore + 'static) -> Self {
        Self::with_clock(remote, store, SystemClock)
    }

    pub fn with_clock(
        remote: impl RemoteSource + 'static,
        store: impl ReferenceStore + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            remote: Box::new(remote),
            store: Box::new(store),
            clock: Box::new(clock),
            max_age: TimeDelta::days(DEFAULT_MAX_AGE_DAYS),
        }
    }

    /// Adjust the freshness window.
    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = max_age;
        self
    }

    /// Load one reference table.
    ///
    /// A persisted copy strictly younger than the freshness window is
    /// returned as-is. Otherwise the remote list is fetched, persisted
    /// (overwriting any prior copy) and returned; a remote failure
    /// propagates even if a stale copy exists.
    pub fn load(&self, category: Category) -> Result<Vec<ReferenceEntry>> {
        if let Some(stored) = self.store.load(category)? {
            let age = self.clock.now() - stored.fetched_at;
            if age < self.max_age {
                debug!(
                    "{category} reference served from cache (age {}h)",
                    age.num_hours()
                );
                return Ok(stored.entries);
            }
            info!(
                "{category} reference stale (age {}d), refetching",
                age.num_days()
            );
        }

        let entries = self.remote.reference(category)?;
        self.store.store(category, &entries, self.clock.now())?;
        info!("{category} reference refreshed ({} entries)", entries.len());
        Ok(entries)
    }
}

/// Default location of the persisted reference tables.
pub fn default_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("idm-rs")
}
