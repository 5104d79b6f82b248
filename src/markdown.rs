//! Markdown-to-HTML conversion. This is a thin wrapper around
//! [`pulldown_cmark`] that fixes the set of enabled extensions so every
//! post body is rendered the same way.

use pulldown_cmark::{html, Options, Parser};

/// Converts markdown to an HTML fragment. Rendering is pure; identical
/// input yields byte-identical output.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::new();
    html::push_html(&mut html, Parser::new_ext(markdown, options));
    html
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading() {
        assert_eq!(to_html("# Hi\n"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_paragraph_order() {
        let html = to_html("first\n\nsecond\n");
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let input = "# Hi\n\nsome *emphasis* and a [link](x.html)\n";
        assert_eq!(to_html(input), to_html(input));
    }
}
