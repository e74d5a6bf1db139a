use crate::domain::{Entry, Index};
use crate::features::archive::feed::merge_recent;
use crate::features::archive::filter::{filter_entries, haystack};

fn entry(title: &str, date: &str, tags: &[&str], kind: &str) -> Entry {
    Entry {
        title: Some(title.to_string()),
        date: Some(date.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        kind: kind.to_string(),
        ..Entry::default()
    }
}

// an empty query is a no-op: same entries, same order
#[test]
fn test_filter_empty_query_is_identity() {
    let entries = vec![
        entry("b", "2024-01-02", &[], "devlog"),
        entry("a", "2024-01-01", &[], "devlog"),
    ];

    let out = filter_entries(&entries, "");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].title.as_deref(), Some("b"));
    assert_eq!(out[1].title.as_deref(), Some("a"));

    // whitespace-only counts as empty too
    assert_eq!(filter_entries(&entries, "   ").len(), 2);
}

// matching is case-insensitive substring containment over title, summary,
// tags and kind
#[test]
fn test_filter_matches_across_fields() {
    let mut with_summary = entry("untouched", "2024-01-01", &[], "memo");
    with_summary.summary = Some("notes about Rust traits".to_string());

    let entries = vec![
        entry("Engine Devlog", "2024-01-03", &[], "devlog"),
        entry("sketch", "2024-01-02", &["rust", "wip"], "illustration"),
        with_summary,
        entry("unrelated", "2024-01-01", &[], "memo"),
    ];

    let out = filter_entries(&entries, "RUST");
    assert_eq!(out.len(), 2);
    // original relative order is preserved
    assert_eq!(out[0].title.as_deref(), Some("sketch"));
    assert_eq!(out[1].title.as_deref(), Some("untouched"));

    // every survivor actually contains the query
    for e in &out {
        assert!(haystack(e).contains("rust"));
    }

    // kind is part of the haystack
    assert_eq!(filter_entries(&entries, "illus").len(), 1);
    // no tokenization: a phrase only matches as a literal substring
    assert_eq!(filter_entries(&entries, "rust traits").len(), 1);
}

#[test]
fn test_filter_no_match() {
    let entries = vec![entry("a", "2024-01-01", &[], "devlog")];
    assert!(filter_entries(&entries, "zzz").is_empty());
}

fn index(section: &str, short: &str, entries: Vec<Entry>) -> Index {
    Index {
        section: section.to_string(),
        short: short.to_string(),
        entries,
        ..Index::default()
    }
}

// the feed merges every section, sorts newest first and truncates
#[test]
fn test_merge_recent_orders_and_truncates() {
    let mut devlog = index(
        "devlog",
        "log",
        vec![
            entry("old", "2023-05-01", &[], "devlog"),
            entry("newest", "2024-06-01", &[], "devlog"),
        ],
    );
    devlog.list_page = "devlog/".to_string();

    let indexes = vec![
        devlog,
        index(
            "art",
            "",
            vec![entry("middle", "2024-01-15", &[], "illustration")],
        ),
    ];

    let feed = merge_recent(&indexes, 2);
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].entry.title.as_deref(), Some("newest"));
    assert_eq!(feed[1].entry.title.as_deref(), Some("middle"));

    // dates are non-increasing under string comparison
    for pair in feed.windows(2) {
        assert!(pair[0].entry.date >= pair[1].entry.date);
    }

    // source index display metadata rides along; short falls back to section
    assert_eq!(feed[0].meta.label(), "log");
    assert_eq!(feed[1].meta.label(), "art");
    assert_eq!(feed[0].meta.section, "devlog");
    assert_eq!(feed[0].meta.list_page, "devlog/");
}

// equal dates keep manifest order (the sort is stable)
#[test]
fn test_merge_recent_stable_for_equal_dates() {
    let indexes = vec![
        index("a", "", vec![entry("first", "2024-01-01", &[], "x")]),
        index("b", "", vec![entry("second", "2024-01-01", &[], "x")]),
    ];

    let feed = merge_recent(&indexes, 10);
    assert_eq!(feed[0].entry.title.as_deref(), Some("first"));
    assert_eq!(feed[1].entry.title.as_deref(), Some("second"));
}

// entries with no date sort last (empty string compares lowest)
#[test]
fn test_merge_recent_missing_dates_sort_last() {
    let mut dateless = entry("dateless", "", &[], "x");
    dateless.date = None;

    let indexes = vec![index("a", "", vec![dateless, entry("dated", "2020-01-01", &[], "x")])];

    let feed = merge_recent(&indexes, 10);
    assert_eq!(feed[0].entry.title.as_deref(), Some("dated"));
    assert_eq!(feed[1].entry.title.as_deref(), Some("dateless"));
}

#[test]
fn test_merge_recent_limit_zero() {
    let indexes = vec![index("a", "", vec![entry("x", "2024-01-01", &[], "x")])];
    assert!(merge_recent(&indexes, 0).is_empty());
}
