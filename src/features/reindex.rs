use crate::domain::SITE_MANIFEST_PATH;
use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

// regenerates each index's entries[] from the individual documents in its
// sibling items/ directory. hand-authored indexes that have no items/
// directory are left alone.

pub struct ReindexReport {
    pub indexes_total: usize,
    pub indexes_written: usize,
    pub entries_total: usize,
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn string_or<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

// the listing projection of one item document. keys the item doesn't carry
// are dropped rather than written as null, so regenerated indexes parse the
// same as hand-authored ones.
fn project_item(item: &Value, src_rel: String) -> Value {
    let mut out = Map::new();

    for key in ["id", "type", "title", "date"] {
        if let Some(v) = item.get(key) {
            if !v.is_null() {
                out.insert(key.to_string(), v.clone());
            }
        }
    }

    let tags = item
        .get("tags")
        .filter(|v| v.is_array())
        .cloned()
        .unwrap_or_else(|| json!([]));
    out.insert("tags".to_string(), tags);

    let visibility = item
        .get("visibility")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("private");
    out.insert("visibility".to_string(), json!(visibility));

    let summary = item.get("summary").and_then(Value::as_str).unwrap_or("");
    out.insert("summary".to_string(), json!(summary));

    out.insert("src".to_string(), json!(src_rel));

    Value::Object(out)
}

fn posix_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn rebuild_indexes(root: &Path) -> Result<ReindexReport> {
    let manifest = read_json(&root.join(SITE_MANIFEST_PATH))?;
    let index_paths: Vec<String> = manifest
        .get("indexes")
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if index_paths.is_empty() {
        bail!("{} lists no indexes", SITE_MANIFEST_PATH);
    }

    let mut report = ReindexReport {
        indexes_total: index_paths.len(),
        indexes_written: 0,
        entries_total: 0,
    };

    for index_rel in &index_paths {
        let index_abs = root.join(index_rel.trim_start_matches('/'));
        let index_dir = index_abs
            .parent()
            .with_context(|| format!("Index path has no parent directory: {}", index_rel))?
            .to_path_buf();
        let items_dir = index_dir.join("items");

        if !items_dir.is_dir() {
            println!(
                "[skip] no items directory for {}",
                posix_relative(&items_dir, root)
            );
            continue;
        }

        let index_value = read_json(&index_abs)?;

        let mut files: Vec<PathBuf> = WalkDir::new(&items_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path().extension().and_then(|s| s.to_str()) == Some("json")
            })
            .map(|e| e.into_path())
            .collect();
        files.sort();

        let mut entries: Vec<Value> = Vec::new();
        for file in &files {
            let item = read_json(file)?;
            entries.push(project_item(&item, posix_relative(file, root)));
        }

        // newest first, raw date string comparison (same rule the feed uses)
        entries.sort_by(|a, b| string_or(b, "date").cmp(string_or(a, "date")));

        let entry_count = entries.len();
        report.entries_total += entry_count;

        // skip the rewrite (and the updated-stamp churn) when nothing changed
        let new_blob = serde_json::to_string(&entries)?;
        let empty = Value::Array(Vec::new());
        let old_blob = serde_json::to_string(index_value.get("entries").unwrap_or(&empty))?;
        if xxh3_64(new_blob.as_bytes()) == xxh3_64(old_blob.as_bytes()) {
            println!("[ok] {} unchanged ({} entries)", index_rel, entry_count);
            continue;
        }

        let section = string_or(&index_value, "section");
        let short = match string_or(&index_value, "short") {
            "" => section,
            s => s,
        };
        let rebuilt = json!({
            "section": section,
            "title": string_or(&index_value, "title"),
            "short": short,
            "listPage": string_or(&index_value, "listPage"),
            "updated": today(),
            "entries": entries,
        });

        fs::write(
            &index_abs,
            format!("{}\n", serde_json::to_string_pretty(&rebuilt)?),
        )
        .with_context(|| format!("Failed to write {}", index_abs.display()))?;

        report.indexes_written += 1;
        println!("[ok] {} ({} entries)", index_rel, entry_count);
    }

    Ok(report)
}
