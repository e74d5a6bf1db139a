use crate::io::{DocumentFetcher, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

// for setups where the data tree lives behind another web server instead of
// on local disk. same contract as the local fetcher: one GET, no retries.
pub struct RemoteDocumentFetcher {
    base_url: String,
    client: Client,
}

impl RemoteDocumentFetcher {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl DocumentFetcher for RemoteDocumentFetcher {
    async fn fetch_document(&self, path_from_root: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, path_from_root.trim_start_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Retrieval {
                path: path_from_root.to_string(),
                status: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Retrieval {
                path: path_from_root.to_string(),
                status: response.status().to_string(),
            });
        }

        let raw = response.text().await.map_err(|e| FetchError::Retrieval {
            path: path_from_root.to_string(),
            status: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|_| FetchError::Parse {
            path: path_from_root.to_string(),
        })
    }
}
