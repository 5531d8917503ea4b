use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{validate_key, BlobStore};
use crate::error::{StoreError, StoreResult};

/// Blobs as files under a root directory; the key is the relative path.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(FsStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        Ok(self.root.join(validate_key(path)?))
    }
}

impl BlobStore for FsStore {
    fn get(&self, path: &str) -> StoreResult<Option<Vec<u8>>> {
        let file = self.resolve(path)?;
        match fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(file, e)),
        }
    }

    fn put(&self, path: &str, bytes: &[u8], _content_type: &str) -> StoreResult<()> {
        let file = self.resolve(path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(&file, bytes).map_err(|e| StoreError::io(file, e))
    }

    fn delete(&self, path: &str) -> StoreResult<bool> {
        let file = self.resolve(path)?;
        match fs::remove_file(&file) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(file, e)),
        }
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                StoreError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, path: &str) -> StoreResult<bool> {
        Ok(self.resolve(path)?.is_file())
    }
}

#[cfg(test)]
pub(crate) fn temp_root(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pagesmith-{}-{}", label, uuid::Uuid::new_v4()))
}
