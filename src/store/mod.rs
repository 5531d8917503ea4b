pub mod fs;
pub mod sqlite;

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::config::{Backend, Settings};
use crate::error::{StoreError, StoreResult};

pub use fs::FsStore;
pub use sqlite::SqliteStore;

pub const VERSIONS_PREFIX: &str = "versions/";

/// Keyed blob storage for documents, themes and generated output.
///
/// Keys are relative `/`-separated paths. Writes are last-write-wins per key.
pub trait BlobStore: Send + Sync {
    fn get(&self, path: &str) -> StoreResult<Option<Vec<u8>>>;

    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<()>;

    /// Returns whether something was removed.
    fn delete(&self, path: &str) -> StoreResult<bool>;

    /// Every key starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;

    fn exists(&self, path: &str) -> StoreResult<bool> {
        Ok(self.get(path)?.is_some())
    }

    /// Copy the current bytes at `path` to `versions/<path>-<timestamp>`.
    /// Nothing to copy yields `None`.
    fn snapshot(&self, path: &str) -> StoreResult<Option<String>> {
        let Some(bytes) = self.get(path)? else {
            return Ok(None);
        };
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let key = format!("{}{}-{}", VERSIONS_PREFIX, path, stamp);
        self.put(&key, &bytes, content_type_for(path))?;
        debug!(source = path, version = %key, "snapshot written");
        Ok(Some(key))
    }
}

/// One entry under `versions/`.
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    /// Key relative to `versions/`.
    pub file: String,
    /// Key the snapshot was taken from.
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl Version {
    /// Split a `versions/` key back into source key and timestamp.
    pub fn from_key(key: &str) -> Option<Version> {
        let file = key.strip_prefix(VERSIONS_PREFIX)?;
        file.match_indices('-').find_map(|(at, _)| {
            let stamp = DateTime::parse_from_rfc3339(&file[at + 1..]).ok()?;
            Some(Version {
                file: file.to_string(),
                source: file[..at].to_string(),
                timestamp: stamp.with_timezone(&Utc),
            })
        })
    }
}

/// Reject keys that could escape the store root or alias another key.
pub fn validate_key(path: &str) -> StoreResult<&str> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.contains('\0')
        || path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if bad {
        return Err(StoreError::InvalidKey(path.to_string()));
    }
    Ok(path)
}

pub fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Open the content store selected by the settings.
pub fn open(settings: &Settings) -> StoreResult<Arc<dyn BlobStore>> {
    Ok(match settings.backend {
        Backend::Fs => Arc::new(FsStore::new(&settings.content_dir)?),
        Backend::Sqlite => Arc::new(SqliteStore::open(&settings.database_path)?),
    })
}

/// Behaviour every backend has to share; run against each implementation.
#[cfg(test)]
pub(crate) fn check_contract(store: &dyn BlobStore) {
    assert_eq!(store.get("pages/home.json").unwrap(), None);
    assert!(!store.exists("pages/home.json").unwrap());

    store.put("pages/home.json", b"{\"title\":\"a\"}", "application/json").unwrap();
    store.put("pages/home.json", b"{\"title\":\"b\"}", "application/json").unwrap();
    assert_eq!(store.get("pages/home.json").unwrap().unwrap(), b"{\"title\":\"b\"}");
    assert!(store.exists("pages/home.json").unwrap());

    store.put("pages/about.json", b"{}", "application/json").unwrap();
    store.put("structure.json", b"{}", "application/json").unwrap();
    assert_eq!(
        store.list("pages/").unwrap(),
        vec!["pages/about.json".to_string(), "pages/home.json".to_string()]
    );
    assert_eq!(store.list("").unwrap().len(), 3);

    let version = store.snapshot("pages/home.json").unwrap().unwrap();
    assert!(version.starts_with("versions/pages/home.json-"));
    assert_eq!(store.get(&version).unwrap().unwrap(), b"{\"title\":\"b\"}");
    assert_eq!(store.snapshot("pages/missing.json").unwrap(), None);

    assert!(store.delete("pages/about.json").unwrap());
    assert!(!store.delete("pages/about.json").unwrap());
    assert_eq!(store.list("pages/").unwrap(), vec!["pages/home.json".to_string()]);

    assert!(matches!(
        store.put("../escape.json", b"x", "application/json"),
        Err(StoreError::InvalidKey(_))
    ));
    assert!(matches!(store.get("/etc/passwd"), Err(StoreError::InvalidKey(_))));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_keys_round_trip() {
        let v = Version::from_key("versions/themes/zen-theme.json-2026-03-01T10:20:30.123456Z").unwrap();
        assert_eq!(v.source, "themes/zen-theme.json");
        assert_eq!(v.file, "themes/zen-theme.json-2026-03-01T10:20:30.123456Z");
        assert_eq!(v.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true), "2026-03-01T10:20:30Z");
        assert!(Version::from_key("versions/no-stamp.json").is_none());
        assert!(Version::from_key("pages/home.json").is_none());
    }

    #[test]
    fn key_validation() {
        assert!(validate_key("pages/home.json").is_ok());
        assert!(validate_key("a").is_ok());
        for bad in ["", "/abs", "a//b", "a/../b", "./a", "a\\b", "dir/"] {
            assert!(validate_key(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("css/main.css"), "text/css; charset=utf-8");
        assert_eq!(content_type_for("pages/home.JSON"), "application/json");
        assert_eq!(content_type_for("sitemap.xml"), "application/xml");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }
}
