//! Persistence port for the drink history.
//!
//! The engine never touches storage directly — it talks to a [`StoragePort`],
//! so the file backend can be swapped for [`MemoryStorage`] in tests. Both
//! failure modes of the taxonomy ([`StorageError::Unavailable`] and
//! [`StorageError::Malformed`]) are recovered by the caller with safe
//! defaults; nothing here reaches the user as an error dialog.

use crate::event::DrinkEvent;
use fs2::FileExt;
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a load or save failed. The tracker logs these and falls back to an
/// empty history (load) or keeps the in-memory state authoritative (save).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying storage could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] io::Error),

    /// Persisted data exists but is not decodable drink history.
    #[error("malformed persisted data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load/save boundary between the engine and persistent storage.
pub trait StoragePort {
    /// Deserialize the full history. A backend with nothing persisted yet
    /// returns an empty vec, not an error.
    fn load(&mut self) -> Result<Vec<DrinkEvent>, StorageError>;

    /// Serialize and write the full history, replacing whatever was there.
    fn save(&mut self, events: &[DrinkEvent]) -> Result<(), StorageError>;
}

/// Persisted shapes accepted on load. The canonical form is a bare array of
/// events; earlier revisions wrapped it in an object under a `drinkHistory`
/// key. Saves always emit the canonical form, so legacy files are rewritten
/// on the first mutation.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedHistory {
    Events(Vec<DrinkEvent>),
    Keyed {
        #[serde(rename = "drinkHistory")]
        drink_history: Vec<DrinkEvent>,
    },
}

fn decode(contents: &str) -> Result<Vec<DrinkEvent>, serde_json::Error> {
    serde_json::from_str::<PersistedHistory>(contents).map(|history| match history {
        PersistedHistory::Events(events) => events,
        PersistedHistory::Keyed { drink_history } => drink_history,
    })
}

/// File-backed storage: `drink_history.json` inside a data directory.
///
/// Saves are atomic (write to `.tmp`, sync, rename), so a crash mid-write
/// leaves the previous snapshot intact — the data-loss window is exactly one
/// mutation. Opening takes an exclusive advisory lock on `drink_history.lock`
/// held for the lifetime of the storage; a second open of the same directory
/// fails with [`io::ErrorKind::AlreadyExists`], enforcing single-writer
/// ownership of the history.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    _lock: File,
}

impl JsonFileStorage {
    /// Open (creating if needed) the data directory and acquire the writer
    /// lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or with kind
    /// [`io::ErrorKind::AlreadyExists`] if another instance holds the lock.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let path = dir.join("drink_history.json");
        let lock_path = dir.join("drink_history.lock");

        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)?;
        lock.try_lock_exclusive().map_err(|_| {
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "another instance holds the lock on {}",
                    path.display()
                ),
            )
        })?;

        Ok(JsonFileStorage { path, _lock: lock })
    }

    /// Path to the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoragePort for JsonFileStorage {
    fn load(&mut self) -> Result<Vec<DrinkEvent>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(decode(&contents)?)
    }

    fn save(&mut self, events: &[DrinkEvent]) -> Result<(), StorageError> {
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string(events)?;

        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_data()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// In-memory storage holding the serialized JSON string.
///
/// Events round-trip through the same serializer as the file backend, and the
/// `fail_loads` / `fail_saves` switches let tests exercise the fail-soft
/// recovery paths.
///
/// # Examples
///
/// ```
/// use nightcap::{MemoryStorage, StoragePort};
///
/// // Legacy entries carrying a `count` field still decode
/// let mut storage = MemoryStorage::with_contents(r#"[{"timestamp": 1000, "count": 1}]"#);
/// let events = storage.load().unwrap();
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
    /// When set, every `load` fails as if storage were disabled.
    pub fail_loads: bool,
    /// When set, every `save` fails as if the write quota were exceeded.
    pub fail_saves: bool,
}

impl MemoryStorage {
    /// Empty storage — the first `load` returns no events.
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Storage pre-seeded with a raw JSON string, as if persisted by an
    /// earlier session (or an earlier schema revision).
    pub fn with_contents(json: impl Into<String>) -> Self {
        MemoryStorage {
            contents: Some(json.into()),
            ..MemoryStorage::default()
        }
    }

    /// The currently persisted JSON, if any save has happened.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl StoragePort for MemoryStorage {
    fn load(&mut self) -> Result<Vec<DrinkEvent>, StorageError> {
        if self.fail_loads {
            return Err(StorageError::Unavailable(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage disabled",
            )));
        }
        match &self.contents {
            None => Ok(Vec::new()),
            Some(contents) => Ok(decode(contents)?),
        }
    }

    fn save(&mut self, events: &[DrinkEvent]) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Unavailable(io::Error::new(
                io::ErrorKind::OutOfMemory,
                "storage quota exceeded",
            )));
        }
        self.contents = Some(serde_json::to_string(events)?);
        Ok(())
    }
}
