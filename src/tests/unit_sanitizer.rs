use crate::render::sanitize::{escape_html, text_with_line_breaks};

// every markup-significant character must come out as its entity form.
// this is the one function standing between arbitrary JSON strings and the
// rendered page, so be thorough.
#[test]
fn test_escape_covers_all_control_characters() {
    let escaped = escape_html(r#"a & b < c > d " e ' f"#);

    assert_eq!(escaped, "a &amp; b &lt; c &gt; d &quot; e &#39; f");
    // no literal specials survive outside their entity encodings
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
    assert!(!escaped.contains('"'));
    assert!(!escaped.contains('\''));
}

#[test]
fn test_escape_leaves_plain_text_alone() {
    assert_eq!(escape_html("hello world 123"), "hello world 123");
    assert_eq!(escape_html(""), "");
}

// escaping is NOT idempotent: applying it twice double-encodes. that's the
// documented contract; callers escape exactly once at the point of embedding.
#[test]
fn test_escape_twice_double_encodes() {
    let once = escape_html("a < b");
    let twice = escape_html(&once);

    assert_eq!(once, "a &lt; b");
    assert_eq!(twice, "a &amp;lt; b");
}

// free-text bodies have no structure, so newlines become explicit breaks
#[test]
fn test_text_with_line_breaks() {
    assert_eq!(
        text_with_line_breaks("line one\nline <two>"),
        "line one<br />line &lt;two&gt;"
    );
}
