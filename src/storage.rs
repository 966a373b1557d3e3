// src/storage.rs
// =============================================================================
// Saves fetched HTML pages to disk.
//
// Each page becomes one file in the output directory, named after its host
// and path:
//   http://example.com/            -> example.com_index.html
//   http://example.com/docs/intro  -> example.com_docs_intro.html
//   http://example.com:8080/a/     -> example.com_8080_a_index.html
//
// Names only contain [A-Za-z0-9._-] and are at most 200 characters long.
// Crawled URLs carry no query string (normalize() drops it), so one file
// name stands for one page.
// =============================================================================

use crate::crawl::site_of;
use crate::error::StorageError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use url::Url;

const MAX_FILE_NAME: usize = 200;
const EXTENSION: &str = ".html";

#[async_trait]
pub trait PageStore: Send + Sync {
    /// Writes `body` somewhere durable and returns a token (a path) that
    /// identifies where it went.
    async fn persist(&self, url: &str, body: &[u8]) -> Result<String, StorageError>;
}

pub struct FsPageStore {
    dir: PathBuf,
}

impl FsPageStore {
    // Creates the output directory if needed
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl PageStore for FsPageStore {
    async fn persist(&self, url: &str, body: &[u8]) -> Result<String, StorageError> {
        let path = self.dir.join(file_name_for(url));
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Saved {} ({} bytes) to {}", url, body.len(), path.display());
        Ok(path.display().to_string())
    }
}

pub fn file_name_for(url: &str) -> String {
    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_default();

    let mut stem = format!("{}{}", site_of(url), path.replace('/', "_"));
    if stem.is_empty() || stem.ends_with('_') {
        stem.push_str("index");
    }

    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // all ASCII now, so byte truncation can't split a character
    name.truncate(MAX_FILE_NAME - EXTENSION.len());
    name.push_str(EXTENSION);
    name
}
