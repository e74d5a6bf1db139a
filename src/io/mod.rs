use async_trait::async_trait;
use derive_more::derive::Display;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};

pub mod local;
pub mod remote;

// failures a fetch can surface. handlers catch these at the view boundary
// and turn them into inline error cards; nothing here is fatal to the page.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[display("failed to load {} ({})", path, status)]
    Retrieval { path: String, status: String },
    #[display("failed to parse {}: invalid JSON", path)]
    Parse { path: String },
}

impl std::error::Error for FetchError {}

// one JSON document per call, addressed by a root-relative path like
// "data/devlog/index.json". no retries, no header games.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_document(&self, path_from_root: &str) -> Result<Value, FetchError>;
}

// entry src values come straight out of user-authored JSON and out of the
// query string, so they are never allowed to climb out of the data root
pub fn verify_root_relative(path_from_root: &str) -> Result<PathBuf, FetchError> {
    let clean = path_from_root.trim_start_matches('/');
    let candidate = Path::new(clean);

    let mut verified = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => verified.push(part),
            Component::CurDir => {}
            _ => {
                return Err(FetchError::Retrieval {
                    path: path_from_root.to_string(),
                    status: "path escapes data root".to_string(),
                })
            }
        }
    }

    if verified.as_os_str().is_empty() {
        return Err(FetchError::Retrieval {
            path: path_from_root.to_string(),
            status: "empty path".to_string(),
        });
    }

    Ok(verified)
}
