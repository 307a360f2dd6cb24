//! End-to-end `generate` pipeline: table → timeline → fragment → document.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use timelinegen_markdown::{MarkdownOptions, MarkdownRenderer};
use timelinegen_shared::{AppConfig, Result};

use crate::reader::{self, ReadOptions};
use crate::renderer::{self, RenderOptions};
use crate::splicer;

/// Configuration for the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Input table path.
    pub input: PathBuf,
    /// Document to splice the timeline into.
    pub output: PathBuf,
    /// Table parsing options.
    pub read: ReadOptions,
    /// Fragment layout options.
    pub render: RenderOptions,
    /// Markdown body options.
    pub markdown: MarkdownOptions,
    /// Fail when the document has no timeline region.
    pub strict: bool,
}

impl GenerateConfig {
    /// Build a pipeline config for two paths, taking options from `config`.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, config: &AppConfig) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            read: ReadOptions::from(config),
            render: RenderOptions::from(config),
            markdown: MarkdownOptions::from(config),
            strict: config.splice.strict,
        }
    }
}

/// Result of the `generate` pipeline.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of input rows rendered.
    pub record_count: usize,
    /// Number of distinct dates.
    pub group_count: usize,
    /// Number of distinct tag components.
    pub tag_count: usize,
    /// Whether a timeline region was found and replaced.
    pub replaced: bool,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, message: &str);
    /// Called when the pipeline completes.
    fn done(&self, summary: &RunSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _message: &str) {}
    fn done(&self, _summary: &RunSummary) {}
}

/// Run the full `generate` pipeline.
///
/// 1. Parse the input table into a timeline
/// 2. Render the timeline fragment
/// 3. Splice the fragment into the output document and write it back
#[instrument(skip_all, fields(input = %config.input.display(), output = %config.output.display()))]
pub fn generate(config: &GenerateConfig, progress: &dyn ProgressReporter) -> Result<RunSummary> {
    let start = Instant::now();

    // --- Phase 1: Read ---
    progress.phase(&format!("Parsing {}...", config.input.display()));
    let (timeline, tags) = reader::read_table(&config.input, &config.read)?;

    info!(
        records = timeline.record_count(),
        groups = timeline.group_count(),
        tags = tags.len(),
        "table loaded"
    );
    if timeline.is_empty() {
        warn!(input = %config.input.display(), "table has no rows, rendering an empty timeline");
    }

    // --- Phase 2: Render ---
    let markdown = MarkdownRenderer::new(&config.markdown);
    let fragment = renderer::render_timeline(&timeline, &tags, &config.render, &markdown);

    // --- Phase 3: Splice ---
    progress.phase(&format!("Writing to {}...", config.output.display()));
    let outcome = splicer::splice_file(&config.output, &fragment, config.strict)?;

    let summary = RunSummary {
        record_count: timeline.record_count(),
        group_count: timeline.group_count(),
        tag_count: tags.len(),
        replaced: outcome.replaced,
        elapsed: start.elapsed(),
    };

    info!(
        replaced = summary.replaced,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "generate pipeline complete"
    );
    progress.done(&summary);

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
