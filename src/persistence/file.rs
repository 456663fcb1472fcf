use super::{SNAPSHOT_VERSION, SessionSnapshot, Store};
use crate::error::PersistError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use log::info;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Stores the snapshot as a single bincode file.
///
/// Writes go to a sibling temporary file that is renamed over the target, so a crash
/// mid-write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }

    /// Deserializes a snapshot from a byte slice.
    pub fn decode(bytes: &[u8]) -> Result<SessionSnapshot, PersistError> {
        let snapshot: SessionSnapshot = decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| PersistError::Decode(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistError::Decode(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}

impl Store for FileStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistError> {
        let bytes =
            encode_to_vec(snapshot, standard()).map_err(|e| PersistError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&bytes).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        info!(
            "Saved session snapshot ({} bytes) to '{}'",
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>, PersistError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        Self::decode(&bytes).map(Some)
    }
}
