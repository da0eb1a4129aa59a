use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use paste_types::FullId;

use crate::error::{StoreError, StoreResult};
use crate::traits::BlobBackend;

/// File extension of a stored paste.
pub const PASTE_EXTENSION: &str = "txt";

/// Directory-backed storage: one file per paste, named `<fullid>.txt`.
///
/// Writes land in a temp file inside the same directory and are published
/// with a no-clobber rename, so a reader sees either the whole paste or no
/// file at all. Temp files carry a leading dot and a `.tmp` suffix and are
/// never reported by [`enumerate_keys`](BlobBackend::enumerate_keys).
#[derive(Debug, Clone)]
pub struct FsBackend {
    dir: PathBuf,
}

impl FsBackend {
    /// Open the pastes directory, creating it if it does not exist.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened pastes directory");
        Ok(Self { dir })
    }

    /// The directory holding the paste files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that holds (or would hold) `id`.
    pub fn path_for(&self, id: &FullId) -> PathBuf {
        self.dir.join(format!("{id}.{PASTE_EXTENSION}"))
    }

    /// Parse a directory entry name back into an id. Only canonical
    /// `<64 lowercase hex>.txt` names qualify.
    fn parse_file_name(name: &str) -> Option<FullId> {
        let stem = name.strip_suffix(PASTE_EXTENSION)?.strip_suffix('.')?;
        let id = FullId::from_hex(stem).ok()?;
        (id.to_hex() == stem).then_some(id)
    }
}

impl BlobBackend for FsBackend {
    fn exists(&self, id: &FullId) -> StoreResult<bool> {
        Ok(self.path_for(id).try_exists()?)
    }

    fn write_if_absent(&self, id: &FullId, data: &[u8]) -> StoreResult<bool> {
        let path = self.path_for(id);
        if path.try_exists()? {
            return Ok(false);
        }

        let mut tmp = tempfile::Builder::new()
            .prefix(".paste-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => Ok(true),
            // Lost the race to a concurrent writer of the same content; the
            // temp file is removed when the error is dropped.
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(StoreError::Persist {
                id: *id,
                reason: e.error.to_string(),
            }),
        }
    }

    fn read(&self, id: &FullId) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path_for(id)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn enumerate_keys(&self) -> StoreResult<Vec<FullId>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(Self::parse_file_name) {
                Some(id) => keys.push(id),
                None => debug!(entry = ?name, "skipping non-paste directory entry"),
            }
        }
        Ok(keys)
    }
}
