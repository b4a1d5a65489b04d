use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error};
use tempfile::NamedTempFile;

use crate::book::Collection;

use super::{RecordStore, StoreError};

/// Record store holding the collection as one pretty-printed JSON document.
///
/// Saves go to a temporary file in the same directory which is flushed and
/// then renamed over the target, so a failed or interrupted save leaves the
/// previous document in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::unavailable(Some(self.path.clone()), err)
    }
}

/// Encode a collection the way it is laid out on disk.
pub fn encode_collection(collection: &Collection) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(collection)
}

/// Decode a collection from its on-disk bytes.
pub fn decode_collection(bytes: &[u8]) -> Result<Collection, serde_json::Error> {
    serde_json::from_slice(bytes)
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Collection, StoreError> {
        let bytes = fs::read(&self.path).map_err(|err| {
            error!(
                "event=collection_load module=store status=error path={} reason=io error={}",
                self.path.display(),
                err
            );
            self.unavailable(err)
        })?;

        decode_collection(&bytes).map_err(|err| {
            error!(
                "event=collection_load module=store status=error path={} reason=corrupt error={}",
                self.path.display(),
                err
            );
            StoreError::corrupt(Some(self.path.clone()), err)
        })
    }

    fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let bytes = encode_collection(collection).map_err(|err| self.unavailable(err))?;

        let mut staged = NamedTempFile::new_in(self.directory()).map_err(|err| self.unavailable(err))?;
        staged.write_all(&bytes).map_err(|err| self.unavailable(err))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.unavailable(err))?;
        staged.persist(&self.path).map_err(|err| {
            error!(
                "event=collection_save module=store status=error path={} error={}",
                self.path.display(),
                err.error
            );
            self.unavailable(err.error)
        })?;

        debug!(
            "event=collection_save module=store status=ok path={} books={} bytes={}",
            self.path.display(),
            collection.len(),
            bytes.len()
        );
        Ok(())
    }
}
