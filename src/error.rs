use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("input is not an HTML document: {0}")]
    Unparseable(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid key {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("unknown block type {0:?}")]
    UnknownBlockType(String),

    #[error("invalid JSON in {key}: {source}")]
    InvalidJson {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ContentError {
    pub fn invalid_json(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            key: key.into(),
            source,
        }
    }
}

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("site structure unavailable: {0}")]
    Manifest(#[source] ContentError),

    #[error("active theme unavailable: {0}")]
    Theme(#[source] ContentError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("sitemap could not be written: {0}")]
    Sitemap(String),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
