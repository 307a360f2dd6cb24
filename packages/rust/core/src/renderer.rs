//! Timeline renderer: [`Timeline`] + [`TagSet`] → HTML fragment.
//!
//! The fragment is framed by the `BEGIN`/`END TIMELINE CONTENT` sentinel
//! comments so that it can be spliced back into a document repeatedly.
//! Headlines, dates and tag names are interpolated verbatim (no escaping);
//! record bodies go through the shared [`MarkdownRenderer`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use timelinegen_markdown::MarkdownRenderer;
use timelinegen_shared::{AppConfig, Record, TagSet, Timeline};

/// Opening sentinel line written at the top of every fragment.
pub const BEGIN_SENTINEL: &str = "<!-- BEGIN TIMELINE CONTENT -->";

/// Closing sentinel line written at the bottom of every fragment.
pub const END_SENTINEL: &str = "<!-- END TIMELINE CONTENT -->";

/// Options controlling the fragment layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit the tag switch legend and the per-tag CSS classes.
    pub emit_tag_legend: bool,
    /// Appended to the lowercased tag to form its class (`Politics` → `politics-tag`).
    pub tag_class_suffix: String,
    /// Collapse characters outside `[a-z0-9_-]` to `-` when deriving classes.
    pub sanitize_tag_classes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            emit_tag_legend: true,
            tag_class_suffix: "-tag".into(),
            sanitize_tag_classes: false,
        }
    }
}

impl From<&AppConfig> for RenderOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            emit_tag_legend: config.render.emit_tag_legend,
            tag_class_suffix: config.render.tag_class_suffix.clone(),
            sanitize_tag_classes: config.render.sanitize_tag_classes,
        }
    }
}

/// Render the full fragment, sentinels included.
#[instrument(skip_all, fields(groups = timeline.group_count(), tags = tags.len()))]
pub fn render_timeline(
    timeline: &Timeline,
    tags: &TagSet,
    opts: &RenderOptions,
    markdown: &MarkdownRenderer,
) -> String {
    let mut html = String::new();

    html.push('\n');
    html.push_str(BEGIN_SENTINEL);
    html.push('\n');

    if opts.emit_tag_legend {
        html.push_str(&render_legend(tags));
    }

    html.push_str("\n  <div id=\"timelineContainer\" class=\"timelineContainer\">\n");
    for (date, records) in timeline.groups() {
        html.push_str(&render_group(date, records, opts, markdown));
    }
    html.push_str("  </div>\n");

    html.push_str(END_SENTINEL);
    html.push('\n');

    debug!(len = html.len(), "timeline fragment rendered");
    html
}

/// CSS class for a single tag component.
pub fn tag_class(tag: &str, opts: &RenderOptions) -> String {
    static UNSAFE_CLASS_CHARS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^a-z0-9_-]+").expect("valid regex"));

    let lowered = tag.to_lowercase();
    if opts.sanitize_tag_classes {
        let cleaned = UNSAFE_CLASS_CHARS.replace_all(&lowered, "-");
        format!("{}{}", cleaned.trim_matches('-'), opts.tag_class_suffix)
    } else {
        format!("{lowered}{}", opts.tag_class_suffix)
    }
}

/// Classes contributed by one record. Empty in the simple (untagged) variant.
pub fn record_classes(record: &Record, opts: &RenderOptions) -> Vec<String> {
    if !opts.emit_tag_legend {
        return Vec::new();
    }
    record
        .tag_components()
        .map(|tag| tag_class(tag, opts))
        .collect()
}

/// `[A] [B]` marker for a record's tag path; empty when untagged.
pub fn tag_markers(record: &Record) -> String {
    record
        .tag_components()
        .map(|tag| format!("[{tag}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn render_legend(tags: &TagSet) -> String {
    let mut html = String::from("  <div class=\"tag_switch_container\">\n");
    for tag in tags.iter() {
        html.push_str(&format!("    <span class=\"tag_switch\">{tag}</span>\n"));
    }
    html.push_str("  </div>\n");
    html
}

fn render_group(
    date: &str,
    records: &[Record],
    opts: &RenderOptions,
    markdown: &MarkdownRenderer,
) -> String {
    let mut html = format!(
        "    <div class=\"{}\">\n      <h2 class=\"timelineMajorMarker\"><span>{date}</span></h2>\n",
        class_attr("timelineMajor", &group_classes(records, opts))
    );

    for record in records {
        html.push_str(&render_entry(record, opts, markdown));
    }

    html.push_str("    </div>\n    <br class=\"clear\">\n\n");
    html
}

fn render_entry(record: &Record, opts: &RenderOptions, markdown: &MarkdownRenderer) -> String {
    let markers = tag_markers(record);
    let anchor = if markers.is_empty() {
        record.headline.clone()
    } else {
        format!("{markers} {}", record.headline)
    };
    let body = markdown.render(&record.content);

    format!(
        "      <dl class=\"{}\">\n        <dt><a>{anchor}</a></dt>\n        \
         <dd class=\"timelineEvent\" style=\"display: none;\">\n          {}\n        \
         </dd>\n      </dl>\n",
        class_attr("timelineMinor", &record_classes(record, opts)),
        body.trim_end()
    )
}

/// Union of the record classes of a group, first-seen order, no duplicates.
fn group_classes(records: &[Record], opts: &RenderOptions) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for class in records.iter().flat_map(|r| record_classes(r, opts)) {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes
}

fn class_attr(base: &str, classes: &[String]) -> String {
    if classes.is_empty() {
        base.to_string()
    } else {
        format!("{base} {}", classes.join(" "))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
