pub mod feed;
pub mod filter;
pub mod present;

use crate::domain::{Entry, Index, SiteManifest, SITE_MANIFEST_PATH};
use crate::io::{DocumentFetcher, FetchError};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use feed::merge_recent;
use filter::filter_entries;
use present::{page_shell, render_entry_card, render_error_card, render_hint_card};
use std::collections::HashMap;

pub fn archive_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/s/{section}", get(list_handler))
        .route("/view", get(view_handler))
}

// fetch the manifest, then every index it lists, in manifest order. one
// broken index loses only its own contribution; the failure travels back so
// the handler can report it inline.
async fn load_indexes(
    fetcher: &dyn DocumentFetcher,
) -> Result<(Vec<Index>, Vec<FetchError>), FetchError> {
    let manifest_value = fetcher.fetch_document(SITE_MANIFEST_PATH).await?;
    let manifest: SiteManifest =
        serde_json::from_value(manifest_value).map_err(|_| FetchError::Parse {
            path: SITE_MANIFEST_PATH.to_string(),
        })?;

    let mut indexes = Vec::new();
    let mut failures = Vec::new();

    for path in &manifest.indexes {
        match fetcher.fetch_document(path).await {
            Ok(value) => match serde_json::from_value::<Index>(value) {
                Ok(index) => indexes.push(index),
                Err(_) => failures.push(FetchError::Parse { path: path.clone() }),
            },
            Err(e) => failures.push(e),
        }
    }

    Ok((indexes, failures))
}

// GET / — recent updates across every section
async fn home_handler(State(state): State<AppState>) -> Html<String> {
    let body = match load_indexes(state.fetcher.as_ref()).await {
        Err(e) => render_error_card("Failed to load recent updates", &e.to_string()),
        Ok((indexes, failures)) => {
            let mut parts: Vec<String> = failures
                .iter()
                .map(|f| render_error_card("Failed to load a section index", &f.to_string()))
                .collect();

            let recent = merge_recent(&indexes, state.config.feed_limit);
            if recent.is_empty() && parts.is_empty() {
                parts.push(render_hint_card(
                    "No entries yet. Add JSON documents under data/ to get started.",
                ));
            }
            for item in &recent {
                parts.push(render_entry_card(&item.entry, item.meta.label()));
            }
            parts.join("\n")
        }
    };

    Html(page_shell(&state.config.site_title, &body))
}

// GET /s/{section}?q= — one section's listing, optionally filtered
async fn list_handler(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let query = params.get("q").map(String::as_str).unwrap_or("");

    let body = match load_indexes(state.fetcher.as_ref()).await {
        Err(e) => render_error_card("Failed to load listing", &e.to_string()),
        Ok((indexes, _failures)) => match indexes.iter().find(|i| i.section == section) {
            None => render_error_card(
                "Failed to load listing",
                &format!("unknown section: {}", section),
            ),
            Some(index) => {
                let filtered = filter_entries(&index.entries, query);
                let mut parts = vec![format!(
                    r#"<div class="muted">{} entries</div>"#,
                    filtered.len()
                )];
                if filtered.is_empty() {
                    parts.push(render_hint_card("No matching entries."));
                } else {
                    for entry in &filtered {
                        parts.push(render_entry_card(entry, index.label()));
                    }
                }
                parts.join("\n")
            }
        },
    };

    Html(page_shell(&state.config.site_title, &body))
}

// GET /view?src=data/.../items/xxx.json — one entry's detail page. axum
// percent-decodes the parameter; the cards percent-encode it when linking.
async fn view_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let src = match params.get("src").filter(|s| !s.is_empty()) {
        Some(src) => src,
        None => {
            let body = render_hint_card(
                "Missing src parameter. (expected: view?src=data/devlog/items/xxx.json)",
            );
            return Html(page_shell(&state.config.site_title, &body));
        }
    };

    let (title, body) = match state.fetcher.fetch_document(src).await {
        Err(e) => (
            state.config.site_title.clone(),
            render_error_card("Failed to load entry", &e.to_string()),
        ),
        Ok(value) => match serde_json::from_value::<Entry>(value) {
            Err(_) => (
                state.config.site_title.clone(),
                render_error_card(
                    "Failed to load entry",
                    &FetchError::Parse { path: src.clone() }.to_string(),
                ),
            ),
            Ok(entry) => (
                format!("{} - {}", entry.display_title(), state.config.site_title),
                present::render_detail(&entry),
            ),
        },
    };

    Html(page_shell(&title, &body))
}
