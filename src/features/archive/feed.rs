use crate::domain::{Entry, Index};

// display metadata carried from the source index onto each merged entry
#[derive(Debug, Clone, Default)]
pub struct SectionMeta {
    pub section: String,
    pub short: String,
    pub list_page: String,
}

impl SectionMeta {
    pub fn from_index(index: &Index) -> Self {
        Self {
            section: index.section.clone(),
            short: index.label().to_string(),
            list_page: index.list_page.clone(),
        }
    }

    pub fn label(&self) -> &str {
        if self.short.is_empty() {
            &self.section
        } else {
            &self.short
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub entry: Entry,
    pub meta: SectionMeta,
}

// merge every section's entries into one recency feed. the sort is
// lexicographic on the raw date string, descending: correct for the
// zero-padded ISO-ish dates the authoring convention uses, unpredictable for
// anything else. known limitation, kept on purpose.
pub fn merge_recent(indexes: &[Index], limit: usize) -> Vec<FeedEntry> {
    let mut merged: Vec<FeedEntry> = Vec::new();

    for index in indexes {
        let meta = SectionMeta::from_index(index);
        for entry in &index.entries {
            merged.push(FeedEntry {
                entry: entry.clone(),
                meta: meta.clone(),
            });
        }
    }

    // stable sort, so equal dates keep manifest order
    merged.sort_by(|a, b| {
        b.entry
            .date
            .as_deref()
            .unwrap_or("")
            .cmp(a.entry.date.as_deref().unwrap_or(""))
    });

    merged.truncate(limit);
    merged
}
