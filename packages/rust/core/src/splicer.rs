//! Document splicer: swap the sentinel-delimited region of a document.
//!
//! The region starts at the first line containing `<!-- BEGIN TIMELINE CONTENT`
//! (trailing text on that line is tolerated) and ends at the first later line
//! that is exactly `<!-- END TIMELINE CONTENT -->`. Whitespace touching either
//! end of the region is consumed, so the fragment fully controls the spacing
//! around it and repeated splices are byte-identical.

use std::path::Path;

use tracing::{debug, instrument, warn};

use timelinegen_shared::{Result, TimelineError};

/// Text that marks the opening sentinel line.
pub const BEGIN_MARKER: &str = "<!-- BEGIN TIMELINE CONTENT";

/// Exact (trimmed) content of the closing sentinel line.
pub const END_MARKER: &str = "<!-- END TIMELINE CONTENT -->";

/// Result of splicing a fragment into document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// The new document text.
    pub content: String,
    /// Whether a sentinel region was found and replaced.
    pub replaced: bool,
}

/// Byte range of the marked region, including adjacent whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

/// Locate the sentinel region in `document`.
pub fn find_region(document: &str) -> Option<Region> {
    let mut offset = 0;
    let mut begin: Option<usize> = None;

    for line in document.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        match begin {
            None => {
                if let Some(idx) = line.find(BEGIN_MARKER) {
                    begin = Some(line_start + idx);
                }
            }
            Some(start) => {
                if line.trim() == END_MARKER {
                    let marker_idx = line.find(END_MARKER).unwrap_or_default();
                    let end = line_start + marker_idx + END_MARKER.len();
                    return Some(widen(document, start, end));
                }
            }
        }
    }

    None
}

/// Replace the sentinel region of `document` with `fragment`.
///
/// When no region exists the document is returned unchanged.
pub fn splice(document: &str, fragment: &str) -> SpliceOutcome {
    match find_region(document) {
        Some(region) => {
            let mut content =
                String::with_capacity(document.len() - (region.end - region.start) + fragment.len());
            content.push_str(&document[..region.start]);
            content.push_str(fragment);
            content.push_str(&document[region.end..]);
            SpliceOutcome {
                content,
                replaced: true,
            }
        }
        None => SpliceOutcome {
            content: document.to_string(),
            replaced: false,
        },
    }
}

/// Read the document at `path`, splice `fragment` into it, and write it back.
///
/// A missing region is logged and the file is rewritten unchanged, unless
/// `strict` is set, in which case [`TimelineError::NoMarkerFound`] is returned
/// and nothing is written.
#[instrument(skip_all, fields(path = %path.display(), fragment_len = fragment.len(), strict = strict))]
pub fn splice_file(path: &Path, fragment: &str, strict: bool) -> Result<SpliceOutcome> {
    let document = std::fs::read_to_string(path).map_err(|e| TimelineError::write(path, e))?;

    let outcome = splice(&document, fragment);
    if !outcome.replaced {
        if strict {
            return Err(TimelineError::NoMarkerFound {
                path: path.to_path_buf(),
            });
        }
        warn!(
            path = %path.display(),
            "no timeline region found, document left unchanged"
        );
    }

    std::fs::write(path, with_trailing_newline(&outcome.content))
        .map_err(|e| TimelineError::write(path, e))?;

    debug!(replaced = outcome.replaced, "document written");
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extend `[start, end)` over ASCII whitespace on both sides. Other Unicode
/// spaces (e.g. U+00A0) belong to the surrounding document.
fn widen(document: &str, start: usize, end: usize) -> Region {
    let start = document[..start].trim_end_matches(is_layout_space).len();
    let end = document.len() - document[end..].trim_start_matches(is_layout_space).len();
    Region { start, end }
}

fn is_layout_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Append a newline unless the text already ends with one.
fn with_trailing_newline(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{content}\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
