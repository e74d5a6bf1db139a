use crate::domain::{Entry, ImageRef, LinkRef, RelatedRef};
use crate::render::markup::render_markup;
use crate::render::sanitize::{escape_html, text_with_line_breaks};
use serde_json::Value;

// cards show at most this many tag badges
pub const TAG_DISPLAY_LIMIT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    Stack,
    GridTwo,
}

fn has_iso_date_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(|c| c.is_ascii_digit())
        && b[4] == b'-'
        && b[5..7].iter().all(|c| c.is_ascii_digit())
        && b[7] == b'-'
        && b[8..10].iter().all(|c| c.is_ascii_digit())
}

// "YYYY-MM-DD" or an extended timestamp; only the date part is shown.
// anything that doesn't look like a date passes through verbatim.
pub fn format_date(date: Option<&str>) -> String {
    let s = date.unwrap_or("");
    if has_iso_date_prefix(s) {
        s[..10].to_string()
    } else {
        s.to_string()
    }
}

// the detail link carries the entry's own document path as a query parameter
pub fn view_href(src: &str) -> String {
    format!("/view?src={}", urlencoding::encode(src))
}

pub fn render_tag_badges(tags: &[String]) -> String {
    tags.iter()
        .take(TAG_DISPLAY_LIMIT)
        .map(|t| format!(r##"<span class="badge">#{}</span>"##, escape_html(t)))
        .collect::<Vec<_>>()
        .join(" ")
}

// one list/feed item. `label` is the source index's display label; an entry
// outside any index falls back to its own kind.
pub fn render_entry_card(entry: &Entry, label: &str) -> String {
    let badge_label = if label.is_empty() { &entry.kind } else { label };
    let title = escape_html(entry.display_title());
    let date = format_date(entry.date.as_deref());
    let href = view_href(entry.src.as_deref().unwrap_or(""));

    let visibility = entry
        .visibility
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| format!(r#" <span class="badge">{}</span>"#, escape_html(v)))
        .unwrap_or_default();

    let tags = render_tag_badges(&entry.tags);
    let tags_row = if tags.is_empty() {
        String::new()
    } else {
        format!("\n  <div class=\"meta\">{}</div>", tags)
    };

    let summary = entry
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("\n  <p class=\"item-summary muted\">{}</p>", escape_html(s)))
        .unwrap_or_default();

    format!(
        r#"<div class="card">
  <div class="meta"><span class="badge">{}</span> <span class="muted">{}</span>{}</div>
  <h3 class="item-title"><a class="link" href="{}">{}</a></h3>{}{}
</div>"#,
        escape_html(badge_label),
        escape_html(&date),
        visibility,
        href,
        title,
        tags_row,
        summary,
    )
}

// how one aux metadata value shows up in the detail table. None means the
// row is omitted: absent, empty, false, or structured values have no place
// in a flat key-value sheet.
fn meta_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(a) if a.is_empty() => None,
        Value::Array(a) => Some(
            a.iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => None,
    }
}

pub fn render_meta_rows(entry: &Entry) -> String {
    let fields: [(&str, &Value); 7] = [
        ("medium", &entry.medium),
        ("topic", &entry.topic),
        ("format", &entry.format),
        ("seriesId", &entry.series_id),
        ("episodeNo", &entry.episode_no),
        ("rating", &entry.rating),
        ("spoiler", &entry.spoiler),
    ];

    let rows: Vec<String> = fields
        .iter()
        .filter_map(|(key, value)| {
            meta_cell(value).map(|cell| {
                format!(
                    "<tr><th>{}</th><td>{}</td></tr>",
                    escape_html(key),
                    escape_html(&cell)
                )
            })
        })
        .collect();

    if rows.is_empty() {
        return String::new();
    }

    format!(
        r#"<div class="table-wrap"><table class="sheetlike simple-table"><tbody>
{}
</tbody></table></div>"#,
        rows.join("\n")
    )
}

// body precedence: pre-rendered html (trusted, authored by us) wins, then
// markup source, then plain text. empty string when the entry has no body.
pub fn render_body(entry: &Entry) -> String {
    if let Some(html) = entry.body_html.as_deref().filter(|s| !s.is_empty()) {
        return html.to_string();
    }
    if let Some(md) = entry.body_md.as_deref().filter(|s| !s.is_empty()) {
        return render_markup(md);
    }
    if let Some(text) = entry.body.as_deref().filter(|s| !s.is_empty()) {
        return format!("<p>{}</p>", text_with_line_breaks(text));
    }
    String::new()
}

pub fn render_images(images: &[ImageRef], layout: ImageLayout) -> String {
    if images.is_empty() {
        return String::new();
    }

    let wrap_class = match layout {
        ImageLayout::GridTwo => "grid two",
        ImageLayout::Stack => "grid",
    };

    let items = images
        .iter()
        .map(|image| match image {
            ImageRef::Path(p) => format!(
                r#"<img class="tool-thumb" data-zoomable="1" src="{}" alt="" />"#,
                escape_html(p)
            ),
            ImageRef::Figure { src, alt, caption } => {
                let cap = if caption.is_empty() {
                    String::new()
                } else {
                    format!(
                        "\n  <div class=\"muted local-small\">{}</div>",
                        escape_html(caption)
                    )
                };
                format!(
                    r#"<div>
  <img class="tool-thumb" data-zoomable="1" src="{}" alt="{}" />{}
</div>"#,
                    escape_html(src),
                    escape_html(alt),
                    cap
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(r#"<div class="{}">{}</div>"#, wrap_class, items)
}

fn render_related(related: &[RelatedRef]) -> String {
    if related.is_empty() {
        return String::new();
    }

    let items = related
        .iter()
        .map(|r| match r {
            RelatedRef::Id(id) => {
                format!(r#"<li><code class="inline">{}</code></li>"#, escape_html(id))
            }
            RelatedRef::Item { id, label, src } => {
                let text = if label.is_empty() { id } else { label };
                if src.is_empty() {
                    format!("<li>{}</li>", escape_html(text))
                } else {
                    format!(
                        r#"<li><a class="link" href="{}">{}</a></li>"#,
                        view_href(src),
                        escape_html(text)
                    )
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="card">
<h3 class="local-h3 local-tight">Related</h3>
<ul>
{}
</ul>
</div>"#,
        items
    )
}

fn render_links(links: &[LinkRef]) -> String {
    if links.is_empty() {
        return String::new();
    }

    let items = links
        .iter()
        .map(|link| {
            format!(
                r#"<li><a class="link" href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                escape_html(link.url()),
                escape_html(link.label())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<div class="card">
<h3 class="local-h3 local-tight">Links</h3>
<ul>
{}
</ul>
</div>"#,
        items
    )
}

// the full detail view for one entry. sections with nothing to show are
// omitted entirely, so a sparse entry renders as just its header.
pub fn render_detail(entry: &Entry) -> String {
    let kind_badge = if entry.kind.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="badge">{}</span> "#, escape_html(&entry.kind))
    };
    let date = format_date(entry.date.as_deref());
    let visibility = entry
        .visibility
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| format!(r#" <span class="badge">{}</span>"#, escape_html(v)))
        .unwrap_or_default();
    let tags = render_tag_badges(&entry.tags);
    let tags_row = if tags.is_empty() {
        String::new()
    } else {
        format!("\n<div class=\"meta\">{}</div>", tags)
    };

    let mut sections = vec![format!(
        r#"<section class="section">
<div class="meta">{}<span class="muted">{}</span>{}</div>
<h1>{}</h1>{}
{}
</section>"#,
        kind_badge,
        escape_html(&date),
        visibility,
        escape_html(entry.display_title()),
        tags_row,
        render_meta_rows(entry),
    )];

    let body = render_body(entry);
    if !body.is_empty() {
        sections.push(format!(r#"<section class="section">{}</section>"#, body));
    }

    // illustration sets read better side by side; everything else stacks
    let layout = if entry.kind.contains("illustration") {
        ImageLayout::GridTwo
    } else {
        ImageLayout::Stack
    };
    let images = render_images(&entry.images, layout);
    if !images.is_empty() {
        sections.push(format!(
            r#"<section class="section"><h2 class="local-h2 local-tight">Images</h2>{}</section>"#,
            images
        ));
    }

    let related = render_related(&entry.related);
    if !related.is_empty() {
        sections.push(related);
    }

    let links = render_links(&entry.links);
    if !links.is_empty() {
        sections.push(links);
    }

    sections.join("\n\n")
}

// any failure to load or parse a document ends up here: a human message
// plus the raw error text, escaped. never a blank page.
pub fn render_error_card(context: &str, error_text: &str) -> String {
    format!(
        r#"<div class="card">
<div class="muted">{}</div>
<pre class="codeblock"><code>{}</code></pre>
</div>"#,
        escape_html(context),
        escape_html(error_text)
    )
}

pub fn render_hint_card(message: &str) -> String {
    format!(r#"<div class="muted">{}</div>"#, escape_html(message))
}

// minimal document wrapper; styling and the image modal behavior are served
// out of the static dir. the modal element stays hidden until a zoomable
// image is clicked.
pub fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{}</title>
<link rel="stylesheet" href="/style.css" />
</head>
<body>
<main class="container">
{}
</main>
<div id="img-modal" class="img-modal" hidden>
<div class="img-modal-backdrop" data-close="1"></div>
<img class="img-modal-pic" src="" alt="" />
<button class="img-modal-close" type="button" data-close="1">&times;</button>
</div>
<script src="/image-modal.js" defer></script>
</body>
</html>"#,
        escape_html(title),
        body
    )
}
