//! Markdown-lite renderer.
//!
//! Converts the small markdown subset the personas are asked to produce into
//! an HTML fragment: `**bold**`, `*italic*`, `- ` list items and line breaks.
//! Passes run in a fixed order and each one works on the output of the one
//! before it.
//!
//! This is not a markdown parser. There are no headings, links, code blocks
//! or nested lists, and HTML-significant characters in the input are passed
//! through untouched. The input is model output and is treated as trusted;
//! anything that inserts the result into a page inherits that injection
//! surface.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| compile(r"\*\*(.*?)\*\*"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| compile(r"\*(.*?)\*"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^- (.*)$"));
static LIST_BLOCK: LazyLock<Regex> = LazyLock::new(|| compile(r"(?ms)^(<li>.*</li>)"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this module; a failure is a programming error.
    Regex::new(pattern).expect("markdown pattern must compile")
}

/// Render markdown-lite text into a single `<p>`-wrapped HTML fragment.
///
/// ```
/// let html = echo_core::markdown::render("**hi**\n- one");
/// assert_eq!(html, "<p><strong>hi</strong><br><ul><li>one</li></ul></p>");
/// ```
pub fn render(markdown: &str) -> String {
    let html = BOLD.replace_all(markdown, "<strong>${1}</strong>");
    let html = ITALIC.replace_all(&html, "<em>${1}</em>");
    let html = LIST_ITEM.replace_all(&html, "<li>${1}</li>");
    // Greedy: one <ul> from the first item-led line to the last </li>.
    let html = LIST_BLOCK.replace_all(&html, "<ul>${1}</ul>");
    let html = html.replace('\n', "<br>");
    format!("<p>{html}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_mixed_inline_and_list() {
        let html = render("**bold** and *italic*\n- item one\n- item two");
        assert_eq!(
            html,
            "<p><strong>bold</strong> and <em>italic</em><br>\
             <ul><li>item one</li><br><li>item two</li></ul></p>"
        );
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn plain_text_is_only_wrapped() {
        assert_eq!(render("hello world"), "<p>hello world</p>");
        assert_eq!(render(""), "<p></p>");
    }

    #[test]
    fn bold_is_non_greedy() {
        assert_eq!(
            render("**a** then **b**"),
            "<p><strong>a</strong> then <strong>b</strong></p>"
        );
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(render("*a\nb*"), "<p>*a<br>b*</p>");
    }

    #[test]
    fn dash_inside_a_line_is_not_a_list_item() {
        assert_eq!(render("well - maybe"), "<p>well - maybe</p>");
    }

    #[test]
    fn interrupted_lists_share_one_block() {
        let html = render("- a\ntext\n- b");
        assert_eq!(html, "<p><ul><li>a</li><br>text<br><li>b</li></ul></p>");
    }

    #[test]
    fn html_in_input_is_not_escaped() {
        assert_eq!(render("<b>x</b>"), "<p><b>x</b></p>");
    }

    #[test]
    fn list_items_keep_inline_formatting() {
        assert_eq!(
            render("- **step** one"),
            "<p><ul><li><strong>step</strong> one</li></ul></p>"
        );
    }
}
