//! Whole-file JSON documents.
//!
//! A [`JsonDocument`] is read and written in one piece. Reads never fail: a
//! missing, unreadable or malformed file yields the type's default value and
//! a log line. Writes go to a sibling temp file which is then renamed over
//! the target.
//!
//! Mutations should go through [`JsonDocument::lock`] (or
//! [`JsonDocument::update`]) so two requests cannot interleave their
//! load-modify-save cycles on the same document. A locked load of a file
//! that exists but did not parse cleanly first copies it to
//! `<name>.json.corrupt`, so the next save never destroys the only copy.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

use crate::StoreError;

/// Turns file content into a value plus the number of entries dropped on
/// the way.
pub type Parser<T> = fn(&str) -> serde_json::Result<(T, usize)>;

pub struct JsonDocument<T> {
    path: PathBuf,
    lock: Mutex<()>,
    parse: Parser<T>,
    _marker: PhantomData<fn() -> T>,
}

/// Result of reading the file. `intact` is false when the file exists but
/// its content was not fully carried into `value`.
struct Loaded<T> {
    value: T,
    intact: bool,
}

fn parse_whole<T: DeserializeOwned>(raw: &str) -> serde_json::Result<(T, usize)> {
    serde_json::from_str(raw).map(|value| (value, 0))
}

/// Parse a JSON array element by element, skipping elements that do not fit
/// `T` instead of failing the whole list.
pub fn parse_records<T: DeserializeOwned>(raw: &str) -> serde_json::Result<(Vec<T>, usize)> {
    let items: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = items.len();

    let mut records = Vec::with_capacity(total);
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(index, error = %e, "Skipping unreadable record"),
        }
    }

    let dropped = total - records.len();
    Ok((records, dropped))
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_parser(path, parse_whole::<T>)
    }

    pub fn with_parser(path: impl Into<PathBuf>, parse: Parser<T>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            parse,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document, falling back to `T::default()`.
    pub async fn load(&self) -> T {
        self.read().await.value
    }

    async fn read(&self) -> Loaded<T> {
        let damaged = || Loaded {
            value: T::default(),
            intact: false,
        };

        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Document missing, using empty value");
                return Loaded {
                    value: T::default(),
                    intact: true,
                };
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read document");
                return damaged();
            }
        };

        match (self.parse)(&raw) {
            Ok((value, 0)) => Loaded {
                value,
                intact: true,
            },
            Ok((value, dropped)) => {
                tracing::warn!(path = %self.path.display(), dropped, "Document loaded partially");
                Loaded {
                    value,
                    intact: false,
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to parse document");
                damaged()
            }
        }
    }

    /// Path of the copy kept when a damaged document is about to be rewritten.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    async fn set_aside(&self) -> Result<(), StoreError> {
        let backup = self.corrupt_path();
        tokio::fs::copy(&self.path, &backup).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to copy damaged document");
            StoreError::Persistence(format!(
                "{} is damaged and could not be backed up: {e}",
                self.path.display()
            ))
        })?;
        tracing::warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            "Damaged document copied aside before rewrite",
        );
        Ok(())
    }

    /// Serialize `value` as pretty JSON and replace the file.
    pub async fn save(&self, value: &T) -> Result<(), StoreError> {
        self.write(value).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to save document");
            StoreError::Persistence(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write(&self, value: &T) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(value)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await
    }

    /// Take the document's write lock.
    ///
    /// Holding the returned guard serializes all mutations of this document.
    pub async fn lock(&self) -> DocumentGuard<'_, T> {
        DocumentGuard {
            doc: self,
            _guard: self.lock.lock().await,
        }
    }

    /// Load, apply `f`, and save while holding the lock.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn update<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut T) -> Result<R, StoreError>,
    {
        let guard = self.lock().await;
        let mut value = guard.load().await?;
        let result = f(&mut value)?;
        guard.save(&value).await?;
        Ok(result)
    }
}

/// Exclusive access to a [`JsonDocument`] for one load-modify-save cycle.
pub struct DocumentGuard<'a, T> {
    doc: &'a JsonDocument<T>,
    _guard: MutexGuard<'a, ()>,
}

impl<T> DocumentGuard<'_, T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Load for modification.
    ///
    /// Fails if the file is damaged and could not be copied aside, so a
    /// following save cannot drop content that was never read.
    pub async fn load(&self) -> Result<T, StoreError> {
        let loaded = self.doc.read().await;
        if !loaded.intact {
            self.doc.set_aside().await?;
        }
        Ok(loaded.value)
    }

    pub async fn save(&self, value: &T) -> Result<(), StoreError> {
        self.doc.save(value).await
    }
}
