// Integration tests for response rendering
//
// These tests verify markdown conversion, raw-HTML stripping, and the
// escaping plain-text fallback.

use verdant::{Formatter, RenderMode};

#[test]
fn test_markdown_structure_is_rendered() {
    let formatter = Formatter::new(RenderMode::Markdown);

    let out = formatter.format(
        "## Ficus elastica\n\nWater **weekly**.\n\n- Bright light\n- Well-draining soil\n",
    );

    assert!(out.contains("<h2>"), "Heading should render: {out}");
    assert!(out.contains("<strong>weekly</strong>"));
    assert!(out.contains("<li>Bright light</li>"));
    assert!(!out.contains("##"), "No literal markdown syntax in output");
}

#[test]
fn test_markdown_drops_raw_html() {
    let formatter = Formatter::new(RenderMode::Markdown);

    let out = formatter.format("Safe text <script>alert('x')</script> more text");

    assert!(!out.contains("<script>"), "Raw HTML must be stripped: {out}");
    assert!(out.contains("Safe text"));
    assert!(out.contains("more text"));
}

#[test]
fn test_markdown_drops_html_blocks() {
    let formatter = Formatter::new(RenderMode::Markdown);

    let out = formatter.format("<div onclick=\"evil()\">\nhi\n</div>\n\nparagraph");

    assert!(!out.contains("onclick"));
    assert!(out.contains("paragraph"));
}

#[test]
fn test_plain_fallback_escapes_and_keeps_line_breaks() {
    let formatter = Formatter::new(RenderMode::PlainText);

    let out = formatter.format("a < b & \"c\"\nnext line");

    assert_eq!(out, "a &lt; b &amp; &quot;c&quot;<br>\nnext line");
}

#[test]
fn test_plain_fallback_never_interprets_markup() {
    let formatter = Formatter::new(RenderMode::PlainText);

    let out = formatter.format("<script>alert(1)</script>");

    assert_eq!(out, "&lt;script&gt;alert(1)&lt;/script&gt;");
}

#[test]
fn test_empty_input_renders_empty() {
    assert_eq!(Formatter::new(RenderMode::Markdown).format(""), "");
    assert_eq!(Formatter::new(RenderMode::PlainText).format(""), "");
}
