use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::io::interchange::InterchangeError;
use crate::ops::store::Store;

/// Error type for reading and writing the interchange file
#[derive(Debug, thiserror::Error)]
pub enum StoreFileError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("{path}: {source}")]
    Interchange {
        path: PathBuf,
        source: InterchangeError,
    },
}

/// Import `path` into `store`. On any failure the store is left as it was.
/// Returns the number of groups loaded.
pub fn load_file(store: &mut Store, path: &Path) -> Result<usize, StoreFileError> {
    let text = fs::read_to_string(path).map_err(|e| StoreFileError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    match store.import_str(&text) {
        Ok(count) => {
            info!(path = %path.display(), groups = count, "imported task groups");
            Ok(count)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "import rejected");
            Err(StoreFileError::Interchange {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
}

/// Like [`load_file`], but a file that does not exist yet yields an empty
/// store instead of an error.
pub fn load_or_empty(path: &Path) -> Result<Store, StoreFileError> {
    let mut store = Store::new();
    if path.exists() {
        load_file(&mut store, path)?;
    }
    Ok(store)
}

/// Export `store` to `path` and mark it clean
pub fn save_file(store: &mut Store, path: &Path) -> Result<(), StoreFileError> {
    let text = store
        .export_string()
        .map_err(|e| StoreFileError::Interchange {
            path: path.to_path_buf(),
            source: e,
        })?;
    atomic_write(path, text.as_bytes()).map_err(|e| StoreFileError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    store.mark_clean();
    info!(path = %path.display(), groups = store.groups().len(), "exported task groups");
    Ok(())
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taskGroups.json");

        let mut store = Store::new();
        store.add_group("Home").unwrap();
        store.add_task(0, "Buy milk", "errand").unwrap();
        save_file(&mut store, &path).unwrap();
        assert!(!store.is_dirty());

        let loaded = load_or_empty(&path).unwrap();
        assert_eq!(loaded.groups(), store.groups());
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = load_or_empty(&dir.path().join("nope.json")).unwrap();
        assert!(store.groups().is_empty());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::new();
        let err = load_file(&mut store, &dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreFileError::ReadError { .. }));
    }

    #[test]
    fn malformed_file_leaves_store_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json {{{").unwrap();

        let mut store = Store::new();
        store.add_group("Keep me").unwrap();
        let before = store.clone();
        let err = load_file(&mut store, &path).unwrap_err();
        assert!(matches!(err, StoreFileError::Interchange { .. }));
        assert_eq!(store, before);
        assert!(load_or_empty(&path).is_err());
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
