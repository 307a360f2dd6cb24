//! Markdown-to-HTML rendering for timeline entry bodies.
//!
//! Every record body goes through the same [`MarkdownRenderer`], built once
//! from [`MarkdownOptions`], so all entries share one dialect and one set of
//! extensions. Rendering is backed by `pulldown-cmark` (CommonMark).

use pulldown_cmark::{Event, Options, Parser, html};
use tracing::trace;

use timelinegen_shared::AppConfig;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Extensions and filters applied when rendering Markdown.
///
/// The default is plain CommonMark with raw HTML passed through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// GitHub-style pipe tables.
    pub tables: bool,
    /// `~~struck~~` text.
    pub strikethrough: bool,
    /// `[^1]` footnote references and definitions.
    pub footnotes: bool,
    /// Curly quotes, en/em dashes and ellipses.
    pub smart_punctuation: bool,
    /// Drop raw HTML blocks and inline tags from the content.
    pub filter_html: bool,
}

impl From<&AppConfig> for MarkdownOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            tables: config.markdown.tables,
            strikethrough: config.markdown.strikethrough,
            footnotes: config.markdown.footnotes,
            smart_punctuation: config.markdown.smart_punctuation,
            filter_html: config.markdown.filter_html,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// A configured Markdown-to-HTML renderer.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
    filter_html: bool,
}

impl MarkdownRenderer {
    pub fn new(opts: &MarkdownOptions) -> Self {
        let mut options = Options::empty();
        if opts.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if opts.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if opts.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if opts.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }

        Self {
            options,
            filter_html: opts.filter_html,
        }
    }

    /// Render Markdown source to an HTML string.
    ///
    /// Block elements end with a newline, as CommonMark renderers emit them.
    pub fn render(&self, md: &str) -> String {
        let filter_html = self.filter_html;
        let parser = Parser::new_ext(md, self.options)
            .filter(|event| !(filter_html && is_raw_html(event)));

        let mut out = String::with_capacity(md.len() * 3 / 2);
        html::push_html(&mut out, parser);

        trace!(input_len = md.len(), output_len = out.len(), "rendered markdown");
        out
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(&MarkdownOptions::default())
    }
}

fn is_raw_html(event: &Event<'_>) -> bool {
    matches!(event, Event::Html(_) | Event::InlineHtml(_))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
