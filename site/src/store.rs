//! Flat JSON file store.
//!
//! The whole catalogue lives in one file. Reads parse the entire file;
//! admin actions load it, run the [`AdminReducer`] over the in-memory copy
//! and execute the returned effects, which for a successful action means
//! rewriting the whole file.
//!
//! Writes go to `<path>.tmp` first and are renamed over the file, so a
//! reader never sees a half-written database. Mutations are serialized by
//! an async mutex held for the whole load/reduce/save cycle. Nothing guards
//! against a second process writing the same file.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use symposium_core::effect::Effect;
use symposium_core::reducer::Reducer;
use symposium_core::{AdminAction, AdminOutcome, AdminReducer, Database};
use thiserror::Error;
use tokio::sync::Mutex;

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming the file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a valid database
    #[error("malformed database file {path}: {source}")]
    Malformed {
        /// File involved
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory database could not be serialized
    #[error("failed to serialize database: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// JSON file backed database
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the database file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file.
    ///
    /// A missing file is an empty database.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file exists but cannot be read
    /// - [`StoreError::Malformed`] if it is not a valid database
    pub async fn load(&self) -> Result<Database, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Database file missing, starting empty");
                return Ok(Database::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrite the whole file with `db`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the temporary file cannot be written or
    /// renamed into place.
    pub async fn save(&self, db: &Database) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(db).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(parent, source))?;
        }

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| self.io_error(&tmp, source))?;
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(err) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!(path = %tmp.display(), error = %err, "Failed to remove temporary database file");
            }
            return Err(self.io_error(&self.path, source));
        }

        tracing::debug!(
            path = %self.path.display(),
            departments = db.departments.len(),
            events = db.events.len(),
            "Database saved"
        );
        Ok(())
    }

    /// Apply one admin action: load, reduce, then run the effects.
    ///
    /// A rejected action is not an error; its outcome says why.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures. When saving fails the file keeps
    /// its previous contents.
    pub async fn update(&self, action: AdminAction) -> Result<AdminOutcome, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut db = self.load().await?;
        let (outcome, effects) = AdminReducer.reduce(&mut db, action);

        for effect in effects {
            match effect {
                Effect::Persist => self.save(&db).await?,
                Effect::None => {}
            }
        }

        Ok(outcome)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, path: &Path, source: io::Error) -> StoreError {
        tracing::debug!(store = %self.path.display(), path = %path.display(), error = %source, "Store I/O failed");
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
