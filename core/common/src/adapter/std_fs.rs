//! 標準ファイルシステム実装（std::fs を委譲）

use crate::error::Error;
use crate::ports::outbound::{FileMetadata, FileSystem};
use std::io::Write;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// 標準ライブラリの fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::storage(format!("Failed to read '{}': {}", path.display(), e))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        std::fs::write(path, contents).map_err(|e| {
            Error::storage(format!("Failed to write '{}': {}", path.display(), e))
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        std::fs::rename(from, to).map_err(|e| {
            Error::storage(format!(
                "Failed to rename '{}' to '{}': {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::storage(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, Error> {
        let m = std::fs::metadata(path).map_err(|e| {
            Error::storage(format!(
                "Failed to get metadata for '{}': {}",
                path.display(),
                e
            ))
        })?;
        let modified_ms = m
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64);
        Ok(FileMetadata::new(m.is_file(), modified_ms))
    }

    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        std::fs::remove_file(path).map_err(|e| {
            Error::storage(format!("Failed to remove file '{}': {}", path.display(), e))
        })
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::storage(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }

    fn create_new(&self, path: &Path, contents: &str) -> Result<bool, Error> {
        let mut f = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(Error::storage(format!(
                    "Failed to create '{}': {}",
                    path.display(),
                    e
                )))
            }
        };
        f.write_all(contents.as_bytes()).map_err(|e| {
            Error::storage(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_new_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.lock");
        let fs = StdFileSystem;
        assert!(fs.create_new(&path, "1").unwrap());
        assert!(!fs.create_new(&path, "2").unwrap());
        assert_eq!(fs.read_to_string(&path).unwrap(), "1");
    }

    #[test]
    fn test_read_missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StdFileSystem
            .read_to_string(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_metadata_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        StdFileSystem.write(&path, "abc").unwrap();
        let m = StdFileSystem.metadata(&path).unwrap();
        assert!(m.is_file());
        assert!(!StdFileSystem.metadata(dir.path()).unwrap().is_file());
        assert!(m.modified_ms().is_some());
    }
}
