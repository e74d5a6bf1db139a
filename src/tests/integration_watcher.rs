use crate::config::QuipuConfig;
use crate::features::watcher::{is_item_document, run_watcher_worker};
use crate::tests::integration_reindex::{read_json, setup_site, write_json};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn watch_config(root: &Path) -> Arc<QuipuConfig> {
    Arc::new(QuipuConfig {
        site_root: root.to_path_buf(),
        data_base_url: None,
        static_dir: "./static".into(),
        bind_addr: "127.0.0.1:0".to_string(),
        site_title: "archive".to_string(),
        feed_limit: 12,
        reindex_on_start: false,
        watch_items: false,
    })
}

// only *.json files inside an items/ directory count as item changes
#[test]
fn test_watcher_filters_item_documents() {
    assert!(is_item_document(Path::new("data/devlog/items/post.json")));
    assert!(is_item_document(Path::new(
        "/abs/site/data/art/items/piece.json"
    )));

    // the files the reindexer itself writes must not re-trigger it
    assert!(!is_item_document(Path::new("data/devlog/index.json")));
    assert!(!is_item_document(Path::new("data/site.json")));

    // editor droppings and non-documents
    assert!(!is_item_document(Path::new("data/devlog/items/.hidden.json")));
    assert!(!is_item_document(Path::new("data/devlog/items/post.json~")));
    assert!(!is_item_document(Path::new("data/devlog/items/notes.md")));
    assert!(!is_item_document(Path::new("data/devlog/items")));
}

// a burst of change signals collapses into a single rebuild once the
// debounce window has passed
#[tokio::test]
async fn test_worker_debounces_burst_into_one_rebuild() {
    let tmp = setup_site();
    let (tx, rx) = mpsc::channel::<()>(100);
    let worker = tokio::spawn(run_watcher_worker(watch_config(tmp.path()), rx));

    for _ in 0..50 {
        let _ = tx.try_send(());
    }

    // outwait the 1500ms debounce
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let index_path = tmp.path().join("data/devlog/index.json");
    let index = read_json(&index_path);
    assert_eq!(index["entries"].as_array().unwrap().len(), 2);
    assert_eq!(index["entries"][0]["id"], "newer");

    // the whole burst was drained by that one rebuild: nothing further
    // happens to the file
    let first = fs::read_to_string(&index_path).unwrap();
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(fs::read_to_string(&index_path).unwrap(), first);

    drop(tx);
    worker.await.unwrap();
}

// edits landing between signals are picked up by the next rebuild
#[tokio::test]
async fn test_worker_picks_up_edits_between_signals() {
    let tmp = setup_site();
    let (tx, rx) = mpsc::channel::<()>(100);
    let worker = tokio::spawn(run_watcher_worker(watch_config(tmp.path()), rx));

    tx.try_send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;

    write_json(
        &tmp.path().join("data/devlog/items/older.json"),
        &json!({
            "id": "older",
            "type": "devlog",
            "title": "Older post",
            "date": "2030-01-01"
        }),
    );
    tx.try_send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let index = read_json(&tmp.path().join("data/devlog/index.json"));
    assert_eq!(index["entries"][0]["id"], "older");

    drop(tx);
    worker.await.unwrap();
}
