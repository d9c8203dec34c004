//! Markdown prompt renderer using pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

/// A heading found in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain text of the heading.
    pub text: String,
}

/// Markdown renderer for challenge prompts.
///
/// Follows CommonMark plus the GFM extensions prompt authors rely on: tables,
/// strikethrough and task lists. GFM autolinking of bare URLs is not available
/// in pulldown-cmark, so `https://...` outside `<...>` or `[..](..)` stays
/// plain text. Heading attributes stay disabled so that a trailing `{...}` in
/// a heading is rendered as text.
#[derive(Debug, Clone, Copy)]
pub struct PromptRenderer {
    options: Options,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    /// Create a renderer with the GFM extensions enabled.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Create a renderer that only follows plain CommonMark.
    pub fn commonmark() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    /// Render a markdown prompt to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    /// Collect the headings of a prompt in document order.
    pub fn outline(&self, markdown: &str) -> Vec<Heading> {
        let mut headings = Vec::new();
        let mut current: Option<Heading> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some(Heading {
                        level: level as u8,
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(mut heading) = current.take() {
                        heading.text = heading.text.trim().to_string();
                        headings.push(heading);
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(ref mut heading) = current {
                        heading.text.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(ref mut heading) = current {
                        heading.text.push(' ');
                    }
                }
                _ => {}
            }
        }

        headings
    }
}
