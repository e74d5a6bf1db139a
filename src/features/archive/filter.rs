use crate::domain::Entry;

// free-text filtering over a section listing. pure substring containment,
// no tokenization, no ranking; entries keep their original relative order.
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| haystack(entry).contains(&q))
        .collect()
}

// the searchable text for one entry: title, summary, tags and kind, with
// empty fields skipped
pub fn haystack(entry: &Entry) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(title) = entry.title.as_deref() {
        if !title.is_empty() {
            parts.push(title);
        }
    }
    if let Some(summary) = entry.summary.as_deref() {
        if !summary.is_empty() {
            parts.push(summary);
        }
    }
    for tag in &entry.tags {
        if !tag.is_empty() {
            parts.push(tag);
        }
    }
    if !entry.kind.is_empty() {
        parts.push(&entry.kind);
    }
    parts.join(" ").to_lowercase()
}
