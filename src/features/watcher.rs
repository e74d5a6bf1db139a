use crate::config::QuipuConfig;
use crate::features::reindex::rebuild_indexes;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const DEBOUNCE_MS: u64 = 1500;

// only item documents count: *.json inside an items/ directory. this also
// keeps the watcher from firing on the index files the reindexer writes.
pub(crate) fn is_item_document(path: &Path) -> bool {
    let filename = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if filename.starts_with('.') || filename.ends_with('~') {
        return false;
    }
    if path.extension().and_then(|s| s.to_str()) != Some("json") {
        return false;
    }
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        == Some("items")
}

/// Spawns a background task that watches the data tree and regenerates the
/// section indexes whenever an item document is added, edited or removed.
pub fn start_directory_watcher(config: Arc<QuipuConfig>) {
    // the conveyor belt; dropping on overflow is fine, a queued signal
    // already forces a full rebuild
    let (tx, rx) = mpsc::channel::<()>(100);

    let mut watcher = match notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let relevant = matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            );
            if relevant && event.paths.iter().any(|p| is_item_document(p)) {
                let _ = tx.try_send(());
            }
        }
    }) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Watcher: failed to create OS watcher: {}", e);
            return;
        }
    };

    let watch_root = config.site_root.join("data");
    if let Err(e) = watcher.watch(&watch_root, RecursiveMode::Recursive) {
        eprintln!(
            "Watcher: failed to watch {}: {}",
            watch_root.display(),
            e
        );
        return;
    }

    println!("Watcher: watching {} for item changes.", watch_root.display());

    tokio::spawn(async move {
        let _keep_alive = watcher;
        run_watcher_worker(config, rx).await;
    });
}

// the async half: debounce a burst of editor events down to one rebuild.
// runs until the sender side is dropped.
pub(crate) async fn run_watcher_worker(config: Arc<QuipuConfig>, mut rx: mpsc::Receiver<()>) {
    while rx.recv().await.is_some() {
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)).await;
        while rx.try_recv().is_ok() {}

        let root = config.site_root.clone();
        let result = tokio::task::spawn_blocking(move || rebuild_indexes(&root)).await;

        match result {
            Ok(Ok(report)) => println!(
                "Watcher: reindexed {} of {} indexes ({} entries).",
                report.indexes_written, report.indexes_total, report.entries_total
            ),
            Ok(Err(e)) => eprintln!("Watcher: reindex failed: {:#}", e),
            Err(e) => eprintln!("Watcher: reindex task panicked: {}", e),
        }
    }
}
