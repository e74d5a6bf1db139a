use crate::config::QuipuConfig;
use crate::features::archive::archive_router;
use crate::features::reindex::rebuild_indexes;
use crate::features::watcher::start_directory_watcher;
use crate::io::local::LocalDocumentFetcher;
use crate::io::remote::RemoteDocumentFetcher;
use crate::io::DocumentFetcher;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub mod config;
pub mod domain;
pub mod features;
pub mod io;
pub mod render;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub config: Arc<QuipuConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    // load centralized config
    let config = QuipuConfig::from_env();
    let shared_config = Arc::new(config.clone());

    let fetcher: Arc<dyn DocumentFetcher> = match &config.data_base_url {
        Some(base) => {
            println!("Fetching documents from {}.", base);
            Arc::new(RemoteDocumentFetcher::new(base.clone()))
        }
        None => Arc::new(LocalDocumentFetcher::new(config.site_root.clone())),
    };

    // reindex and watch only make sense when the data tree is on local disk
    if config.data_base_url.is_none() {
        if config.reindex_on_start {
            match rebuild_indexes(&config.site_root) {
                Ok(report) => println!(
                    "Reindex complete: {} of {} indexes rewritten ({} entries).",
                    report.indexes_written, report.indexes_total, report.entries_total
                ),
                Err(e) => eprintln!("Reindex failed: {:#}", e),
            }
        }

        if config.watch_items {
            start_directory_watcher(shared_config.clone());
        }
    }

    println!("Starting server...");

    let app_state = AppState {
        fetcher,
        config: shared_config.clone(),
    };

    let app = Router::new()
        .merge(archive_router())
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    println!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
