use crate::render::sanitize::escape_html;
use regex::Regex;
use std::sync::LazyLock;

// a deliberately thin markup dialect: headings, lists, rules, code fences,
// links, inline code, bold and italic. not CommonMark, and not trying to be.

struct Fence {
    lang: String,
    code: String,
}

// open unordered and open ordered are mutually exclusive, so say so in the type
enum ListState {
    None,
    Unordered,
    Ordered,
}

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

// fence placeholders are NUL-delimited so they can never collide with
// anything a writer can actually type into a JSON string body
fn placeholder(index: usize) -> String {
    format!("\u{0}fence:{}\u{0}", index)
}

fn placeholder_index(line: &str) -> Option<usize> {
    line.strip_prefix("\u{0}fence:")?
        .strip_suffix('\u{0}')?
        .parse()
        .ok()
}

// pull code fences out before anything else looks at the text, so a "#" or
// a "- item" inside a fence is never mistaken for structure. an unclosed
// fence runs to end of input.
fn extract_fences(src: &str) -> (String, Vec<Fence>) {
    let mut text = String::with_capacity(src.len());
    let mut fences = Vec::new();
    let mut rest = src;

    while let Some(start) = rest.find("```") {
        let after = &rest[start + 3..];

        // the opening marker takes an optional language tag, then a newline
        let opener = after.find('\n').map(|nl| (&after[..nl], &after[nl + 1..]));
        let valid = opener.as_ref().is_some_and(|(lang, _)| {
            lang.trim()
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        });

        if !valid {
            // not a fence opener; keep the backticks as literal text
            text.push_str(&rest[..start + 3]);
            rest = &rest[start + 3..];
            continue;
        }

        let (lang, body) = opener.unwrap();
        let (code, remainder) = match body.find("```") {
            Some(end) => (&body[..end], &body[end + 3..]),
            None => (body, ""),
        };

        text.push_str(&rest[..start]);
        text.push_str(&placeholder(fences.len()));
        fences.push(Fence {
            lang: lang.trim().to_string(),
            code: code.to_string(),
        });
        rest = remainder;
    }

    text.push_str(rest);
    (text, fences)
}

// inline pass for heading/list/paragraph text. escape FIRST: after that, any
// markup emitted by the substitutions below is ours, and any angle bracket
// the writer typed is already inert. code spans and link labels are therefore
// not escaped a second time.
fn inline(s: &str) -> String {
    let escaped = escape_html(s);

    // links, restricted to http/https. anything else (javascript:, data:,
    // relative paths) stays literal text.
    let x = LINK_RE.replace_all(&escaped, |caps: &regex::Captures| {
        format!(
            r#"<a class="link" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            &caps[2], &caps[1]
        )
    });

    let x = CODE_RE.replace_all(&x, r#"<code class="inline">$1</code>"#);
    let x = BOLD_RE.replace_all(&x, "<strong>$1</strong>");
    let x = ITALIC_RE.replace_all(&x, "<em>$1</em>");

    x.into_owned()
}

fn close_lists(out: &mut Vec<String>, list: &mut ListState) {
    match list {
        ListState::Unordered => out.push("</ul>".to_string()),
        ListState::Ordered => out.push("</ol>".to_string()),
        ListState::None => {}
    }
    *list = ListState::None;
}

// 1..=4 leading '#' followed by whitespace; everything after the whitespace
// is the heading text. five or more hashes is just a paragraph.
fn heading_line(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=4).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((hashes, rest.trim_start()))
}

fn is_rule_line(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 3 && t.bytes().all(|b| b == b'-')
}

fn unordered_item(line: &str) -> Option<&str> {
    let t = line.trim_start();
    let rest = t.strip_prefix('-').or_else(|| t.strip_prefix('*'))?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn ordered_item(line: &str) -> Option<&str> {
    let t = line.trim_start();
    let digits = t.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = t[digits..].strip_prefix('.')?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn emit_fence(out: &mut Vec<String>, fence: &Fence) {
    let lang_label = if fence.lang.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="muted local-small">language: {}</div>"#,
            escape_html(&fence.lang)
        )
    };
    out.push(format!(
        r#"<div class="card">{}<pre class="codeblock"><code>{}</code></pre></div>"#,
        lang_label,
        escape_html(&fence.code)
    ));
}

// render one markup blob to a pre-sanitized HTML fragment. stateless per
// call; malformed syntax falls through to a paragraph instead of erroring.
pub fn render_markup(input: &str) -> String {
    let src = input.replace("\r\n", "\n");
    if src.trim().is_empty() {
        return String::new();
    }

    let (text, fences) = extract_fences(&src);

    let mut out: Vec<String> = Vec::new();
    let mut list = ListState::None;

    for line in text.split('\n') {
        // extracted code block, emitted verbatim (escaped only here)
        if let Some(idx) = placeholder_index(line) {
            close_lists(&mut out, &mut list);
            if let Some(fence) = fences.get(idx) {
                emit_fence(&mut out, fence);
            }
            continue;
        }

        if let Some((level, rest)) = heading_line(line) {
            close_lists(&mut out, &mut list);
            // four source levels compressed into three visual tiers
            let tag = match level {
                1 => "h2",
                2 => "h3",
                _ => "h4",
            };
            out.push(format!("<{}>{}</{}>", tag, inline(rest), tag));
            continue;
        }

        if is_rule_line(line) {
            close_lists(&mut out, &mut list);
            out.push("<hr />".to_string());
            continue;
        }

        if let Some(rest) = unordered_item(line) {
            match list {
                ListState::Unordered => {}
                ListState::Ordered => {
                    out.push("</ol>".to_string());
                    out.push("<ul>".to_string());
                }
                ListState::None => out.push("<ul>".to_string()),
            }
            list = ListState::Unordered;
            out.push(format!("<li>{}</li>", inline(rest)));
            continue;
        }

        if let Some(rest) = ordered_item(line) {
            match list {
                ListState::Ordered => {}
                ListState::Unordered => {
                    out.push("</ul>".to_string());
                    out.push("<ol>".to_string());
                }
                ListState::None => out.push("<ol>".to_string()),
            }
            list = ListState::Ordered;
            out.push(format!("<li>{}</li>", inline(rest)));
            continue;
        }

        if line.trim().is_empty() {
            close_lists(&mut out, &mut list);
            continue;
        }

        close_lists(&mut out, &mut list);
        out.push(format!("<p>{}</p>", inline(line)));
    }

    close_lists(&mut out, &mut list);
    out.join("\n")
}
