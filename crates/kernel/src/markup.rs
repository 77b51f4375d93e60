//! HTML helpers for translated strings.
//!
//! Translated strings are plain text. When markup has to be inserted into one
//! (a link around a word, say), the text is escaped and only the named
//! insertions are emitted verbatim.

use crate::error::MarkupError;

/// Escape HTML special characters to prevent XSS.
///
/// Quotes become numeric references (`&#34;`, `&#39;`), so output matches
/// what server-rendered templates produce for the same text.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&#34;")
        .replace('\'', "&#39;")
}

/// Format a text string with HTML inserts.
///
/// `fmt` is escaped; `{name}` placeholders are replaced with the matching
/// value from `args`, which is trusted HTML and inserted unescaped. `{{` and
/// `}}` produce literal braces.
///
/// ```
/// use courseware_kernel::markup::format_html;
///
/// let html = format_html(
///     "Write & send {start}email{end}",
///     &[("start", "<a href='mailto:ned@edx.org'>"), ("end", "</a>")],
/// )
/// .unwrap();
/// assert_eq!(html, "Write &amp; send <a href='mailto:ned@edx.org'>email</a>");
/// ```
pub fn format_html(fmt: &str, args: &[(&str, &str)]) -> Result<String, MarkupError> {
    let mut out = String::with_capacity(fmt.len());
    let mut text = String::new();
    let mut chars = fmt.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                chars.next();
                text.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                chars.next();
                text.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, n) in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                if !closed {
                    return Err(MarkupError::UnbalancedBrace(pos));
                }
                let value = args
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| *v)
                    .ok_or(MarkupError::MissingArgument(name))?;

                out.push_str(&html_escape(&text));
                text.clear();
                out.push_str(value);
            }
            '}' => return Err(MarkupError::UnbalancedBrace(pos)),
            _ => text.push(c),
        }
    }

    out.push_str(&html_escape(&text));
    Ok(out)
}
