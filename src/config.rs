use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct QuipuConfig {
    // the directory the whole archive hangs off; documents are addressed by
    // root-relative paths like "data/devlog/index.json"
    pub site_root: PathBuf,
    // when set, documents are fetched from this base URL instead of disk
    pub data_base_url: Option<String>,
    pub static_dir: PathBuf,
    pub bind_addr: String,
    pub site_title: String,
    pub feed_limit: usize,
    pub reindex_on_start: bool,
    pub watch_items: bool,
}

impl QuipuConfig {
    pub fn from_env() -> Self {
        let site_root = std::fs::canonicalize(
            std::env::var("SITE_ROOT").unwrap_or_else(|_| ".".to_string()),
        )
        .expect("Failed to resolve SITE_ROOT to an absolute path. Does the directory exist?");

        let data_base_url = std::env::var("DATA_BASE_URL").ok().filter(|s| !s.is_empty());

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string()));

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let site_title = std::env::var("SITE_TITLE").unwrap_or_else(|_| "archive".to_string());

        let feed_limit = std::env::var("FEED_LIMIT")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(12);

        let reindex_on_start = std::env::var("REINDEX_ON_START")
            .unwrap_or_else(|_| "true".to_string())
            == "true";

        let watch_items = std::env::var("WATCH_ITEMS")
            .unwrap_or_else(|_| "true".to_string())
            == "true";

        Self {
            site_root,
            data_base_url,
            static_dir,
            bind_addr,
            site_title,
            feed_limit,
            reindex_on_start,
            watch_items,
        }
    }
}
