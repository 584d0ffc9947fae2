//! Minimal markup handling for the note body.
//!
//! The only inline markup is `**bold**`. Rich output turns it into `<b>`
//! tags and newlines into `<br>`. Plain output strips the markers.

/// Escape text for inclusion in the HTML rendering.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert `**bold**` spans on a single line to `<b>` tags.
///
/// An unmatched `**` is kept as literal text.
pub fn bold_to_html(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut remaining = line;

    while let Some(start) = remaining.find("**") {
        let after_start = &remaining[start + 2..];
        let Some(end) = after_start.find("**") else {
            break;
        };
        out.push_str(&remaining[..start]);
        out.push_str("<b>");
        out.push_str(&after_start[..end]);
        out.push_str("</b>");
        remaining = &after_start[end + 2..];
    }

    out.push_str(remaining);
    out
}

pub fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}

/// Markdown-ish block to HTML: escape, convert bold per line, join lines
/// with `<br>`.
pub fn to_rich(text: &str) -> String {
    text.split('\n')
        .map(|line| bold_to_html(&escape_html(line)))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn to_plain(text: &str) -> String {
    strip_bold(text)
}
