//! Table reader: delimited input file → [`Timeline`] + [`TagSet`].
//!
//! The input is a header-bearing table with the columns `Date`, `Headline`,
//! `Content`, and optionally `Tag`. Column names are matched exactly; extra
//! columns are ignored.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, instrument};

use timelinegen_shared::{AppConfig, Record, Result, TagSet, Timeline, TimelineError};

const DATE_COLUMN: &str = "Date";
const HEADLINE_COLUMN: &str = "Headline";
const CONTENT_COLUMN: &str = "Content";
const TAG_COLUMN: &str = "Tag";

/// Options for parsing the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl From<&AppConfig> for ReadOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            delimiter: config.input.delimiter,
        }
    }
}

/// Read and group the table at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_table(path: &Path, opts: &ReadOptions) -> Result<(Timeline, TagSet)> {
    let data = std::fs::read(path)
        .map_err(|e| TimelineError::read(path, format!("cannot open file: {e}")))?;

    read_records(&data, opts).map_err(|message| TimelineError::read(path, message))
}

/// Read and group a table from any byte source (e.g. an in-memory buffer).
pub fn read_table_from<R: Read>(mut reader: R, opts: &ReadOptions) -> Result<(Timeline, TagSet)> {
    let source = PathBuf::from("<reader>");
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| TimelineError::read(&source, format!("cannot read input: {e}")))?;

    read_records(&data, opts).map_err(|message| TimelineError::read(&source, message))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Positions of the known columns in the header row.
struct Columns {
    date: usize,
    headline: usize,
    content: usize,
    tag: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> std::result::Result<Self, String> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| format!("missing required column `{name}`"))
        };

        Ok(Self {
            date: require(DATE_COLUMN)?,
            headline: require(HEADLINE_COLUMN)?,
            content: require(CONTENT_COLUMN)?,
            tag: find(TAG_COLUMN),
        })
    }

    /// Build a record from a row. Short rows read missing cells as empty.
    fn record(&self, row: &StringRecord) -> Record {
        let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();

        Record {
            date: cell(self.date),
            headline: cell(self.headline),
            content: cell(self.content),
            tag: self
                .tag
                .and_then(|idx| row.get(idx))
                .filter(|tag| !tag.is_empty())
                .map(String::from),
        }
    }
}

/// Escaped quotes are doubled, so a well-formed table has an even count.
fn has_balanced_quotes(data: &[u8]) -> bool {
    data.iter().filter(|&&b| b == b'"').count() % 2 == 0
}

fn read_records(
    data: &[u8],
    opts: &ReadOptions,
) -> std::result::Result<(Timeline, TagSet), String> {
    if !opts.delimiter.is_ascii() {
        return Err(format!(
            "delimiter {:?} is not a single ASCII character",
            opts.delimiter
        ));
    }
    if !has_balanced_quotes(data) {
        return Err("unbalanced quoting".to_string());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(opts.delimiter as u8)
        .from_reader(io::Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| format!("malformed header row: {e}"))?
        .clone();

    let mut timeline = Timeline::new();
    let mut tags = TagSet::new();
    let mut rows = rdr.records().peekable();

    // No header and no rows: an empty table, not a malformed one.
    if headers.is_empty() && rows.peek().is_none() {
        debug!("table is empty");
        return Ok((timeline, tags));
    }
    let columns = Columns::locate(&headers)?;

    for row in rows {
        let row = row.map_err(|e| format!("malformed row: {e}"))?;
        let record = columns.record(&row);

        if let Some(tag) = record.tag.as_deref() {
            tags.insert_path(tag);
        }
        timeline.push(record);
    }

    debug!(
        records = timeline.record_count(),
        groups = timeline.group_count(),
        tags = tags.len(),
        "table parsed"
    );

    Ok((timeline, tags))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
