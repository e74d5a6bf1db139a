use serde::Deserialize;
use serde_json::{Map, Value};

// one content record, parsed leniently: writers hand-author these JSON files,
// so every field is optional or defaulted and nothing here is allowed to
// fail deserialization just because a field is missing
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Entry {
    pub id: Option<String>,
    // "type" in the JSON; category tag like "devlog" or "illustration"
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub visibility: Option<String>,
    pub summary: Option<String>,
    // root-relative path to this entry's own JSON document; the detail-view key
    pub src: Option<String>,

    // body content, at most one is used: bodyHtml > bodyMd > body
    #[serde(rename = "bodyHtml")]
    pub body_html: Option<String>,
    #[serde(rename = "bodyMd")]
    pub body_md: Option<String>,
    pub body: Option<String>,

    // aux metadata for the detail table; authors write strings, numbers or
    // booleans here depending on the entry kind, so keep the raw JSON value
    pub medium: Value,
    pub topic: Value,
    pub format: Value,
    #[serde(rename = "seriesId")]
    pub series_id: Value,
    #[serde(rename = "episodeNo")]
    pub episode_no: Value,
    pub rating: Value,
    pub spoiler: Value,

    pub images: Vec<ImageRef>,
    pub links: Vec<LinkRef>,
    pub related: Vec<RelatedRef>,

    // anything we don't know about is carried along but never interpreted
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "(untitled)",
        }
    }
}

// images can be a bare path or an object with alt text and a caption
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ImageRef {
    Path(String),
    Figure {
        #[serde(default)]
        src: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        caption: String,
    },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum LinkRef {
    Url(String),
    Titled {
        #[serde(default)]
        url: String,
        #[serde(default)]
        title: String,
    },
}

impl LinkRef {
    pub fn url(&self) -> &str {
        match self {
            LinkRef::Url(u) => u,
            LinkRef::Titled { url, .. } => url,
        }
    }

    // display text falls back to the url itself
    pub fn label(&self) -> &str {
        match self {
            LinkRef::Url(u) => u,
            LinkRef::Titled { url, title } => {
                if title.is_empty() {
                    url
                } else {
                    title
                }
            }
        }
    }
}

// related items: a bare identifier renders as code, an object with a src
// becomes a navigable link, otherwise just a label
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RelatedRef {
    Id(String),
    Item {
        #[serde(default)]
        id: String,
        #[serde(default)]
        label: String,
        #[serde(default)]
        src: String,
    },
}

// one section of the archive: display metadata plus its entry listing.
// the producer sorts entries, but consumers must not count on it.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Index {
    pub section: String,
    pub title: String,
    pub short: String,
    #[serde(rename = "listPage")]
    pub list_page: String,
    pub updated: String,
    pub entries: Vec<Entry>,
}

impl Index {
    // the badge label for cards out of this section
    pub fn label(&self) -> &str {
        if self.short.is_empty() {
            &self.section
        } else {
            &self.short
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SiteManifest {
    pub indexes: Vec<String>,
}
