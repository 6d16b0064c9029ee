//! Response text rendering
//!
//! Converts model output into safe displayable markup. The markdown path
//! strips raw HTML events before rendering; the plain-text path escapes
//! everything and preserves line breaks. Neither path can fail.

use pulldown_cmark::{html, Event, Options, Parser};

/// Rendering capability, decided once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Markdown,
    PlainText,
}

/// Formats model output for display
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    mode: RenderMode,
}

impl Formatter {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    /// Convert raw response text into safe HTML
    pub fn format(&self, raw: &str) -> String {
        match self.mode {
            RenderMode::Markdown => render_markdown(raw),
            RenderMode::PlainText => render_plain(raw),
        }
    }
}

fn render_markdown(raw: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    // Safety: drop inline/block raw HTML from model output before rendering.
    let parser = Parser::new_ext(raw, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn render_plain(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>\n"),
            other => out.push(other),
        }
    }

    out
}
