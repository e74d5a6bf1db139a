// every literal value that reaches a rendered fragment goes through here
// exactly once. applying it twice double-encodes (&amp;amp;), so the rule
// across the codebase is: escape at the point of embedding, nowhere else.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// for plain free-text bodies with no other structure: escape, then make
// newlines visible
pub fn text_with_line_breaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br />")
}
