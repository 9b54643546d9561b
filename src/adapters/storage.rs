use crate::domain::ports::Storage;
use crate::utils::error::{Result, TrackerError};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Storage rooted at the process working directory.
    pub fn working_dir() -> Self {
        Self::new(".")
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_file()
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.full_path(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// In-process storage. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.lock().insert(path.to_string(), data.into());
        self
    }

    pub fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().get(path).cloned()
    }

    /// Makes every later `write_file` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.lock().get(path).cloned().ok_or_else(|| {
            TrackerError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("Writes disabled for: {}", path),
            )));
        }
        self.lock().insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(!storage.exists("saves/SaveFile.json"));
        storage.write_file("saves/SaveFile.json", b"{}").unwrap();

        assert!(storage.exists("saves/SaveFile.json"));
        assert_eq!(storage.read_file("saves/SaveFile.json").unwrap(), b"{}");
    }

    #[test]
    fn test_memory_storage_write_failure_switch() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(storage.write_file("a.json", b"1").is_err());
        assert!(!storage.exists("a.json"));

        storage.set_fail_writes(false);
        storage.write_file("a.json", b"1").unwrap();
        assert_eq!(storage.get_file("a.json").unwrap(), b"1");
    }

    #[test]
    fn test_memory_storage_missing_file_is_not_found() {
        let storage = MemoryStorage::new();
        match storage.read_file("nope.json") {
            Err(TrackerError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
