//! HTML escaping for text inserted as raw markup.

/// Replace `& < > ' "` with their character references.
///
/// Everything else is copied through. Escaping twice double-escapes, so
/// call this once, right where the text becomes markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(
            escape_html(r#"<script>&"'"#),
            "&lt;script&gt;&amp;&quot;&#39;"
        );
    }

    #[test]
    fn test_escape_leaves_other_text() {
        let text = "plain text\twith\nwhitespace, unicode \u{00e9} and 100% = ok;";
        assert_eq!(escape_html(text), text);
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}
