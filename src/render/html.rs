//! HTML escaping for interpolated record fields.
//!
//! Every field that reaches a fragment goes through `escape`, so untrusted
//! content in a collection document cannot inject markup.

/// Escape the HTML-significant characters in `input`
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape("Knee Pain Basics"), "Knee Pain Basics");
    }

    #[test]
    fn test_markup_characters_escaped() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("Bones & Joints"), "Bones &amp; Joints");
        assert_eq!(escape("it's"), "it&#39;s");
    }
}
