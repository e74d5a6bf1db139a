use crate::io::{verify_root_relative, DocumentFetcher, FetchError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

// serves documents straight off the filesystem under a fixed root
pub struct LocalDocumentFetcher {
    pub root_path: PathBuf,
}

impl LocalDocumentFetcher {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }
}

#[async_trait]
impl DocumentFetcher for LocalDocumentFetcher {
    async fn fetch_document(&self, path_from_root: &str) -> Result<Value, FetchError> {
        let verified = verify_root_relative(path_from_root)?;
        let full = self.root_path.join(verified);

        let raw = std::fs::read_to_string(&full).map_err(|e| FetchError::Retrieval {
            path: path_from_root.to_string(),
            status: e.kind().to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|_| FetchError::Parse {
            path: path_from_root.to_string(),
        })
    }
}
