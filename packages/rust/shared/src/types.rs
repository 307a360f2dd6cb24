//! Core domain types for timelinegen.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Separator between components of a multi-tag value (`"Politics/Economy"`).
pub const TAG_SEPARATOR: char = '/';

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One row of the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Grouping key. Kept verbatim, never parsed as a calendar date.
    pub date: String,
    /// Anchor text of the entry.
    pub headline: String,
    /// Raw Markdown body.
    pub content: String,
    /// Optional tag, possibly a `/`-separated path.
    pub tag: Option<String>,
}

impl Record {
    /// Individual tag components, in the order they appear in the tag path.
    ///
    /// Empty components (`"A//B"`, trailing `/`) are skipped.
    pub fn tag_components(&self) -> impl Iterator<Item = &str> {
        self.tag
            .as_deref()
            .into_iter()
            .flat_map(|tag| tag.split(TAG_SEPARATOR))
            .filter(|component| !component.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Records grouped by date, in first-encounter order of the dates.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    groups: IndexMap<String, Vec<Record>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its date group, creating the group on first sight.
    pub fn push(&mut self, record: Record) {
        self.groups
            .entry(record.date.clone())
            .or_default()
            .push(record);
    }

    /// Date groups in first-encounter order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.groups
            .iter()
            .map(|(date, records)| (date.as_str(), records.as_slice()))
    }

    pub fn get(&self, date: &str) -> Option<&[Record]> {
        self.groups.get(date).map(Vec::as_slice)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TagSet
// ---------------------------------------------------------------------------

/// Distinct tag components seen across all records. Iterates sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every component of a `/`-separated tag path.
    pub fn insert_path(&mut self, tag: &str) {
        for component in tag.split(TAG_SEPARATOR).filter(|c| !c.is_empty()) {
            if !self.0.contains(component) {
                self.0.insert(component.to_string());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, headline: &str, tag: Option<&str>) -> Record {
        Record {
            date: date.into(),
            headline: headline.into(),
            content: String::new(),
            tag: tag.map(String::from),
        }
    }

    #[test]
    fn timeline_keeps_first_encounter_order() {
        let mut timeline = Timeline::new();
        timeline.push(record("2021", "a", None));
        timeline.push(record("1999", "b", None));
        timeline.push(record("2021", "c", None));
        timeline.push(record("2005", "d", None));

        let dates: Vec<&str> = timeline.groups().map(|(date, _)| date).collect();
        assert_eq!(dates, vec!["2021", "1999", "2005"]);
        assert_eq!(timeline.group_count(), 3);
        assert_eq!(timeline.record_count(), 4);
    }

    #[test]
    fn timeline_keeps_record_order_within_group() {
        let mut timeline = Timeline::new();
        timeline.push(record("2020", "first", None));
        timeline.push(record("2019", "other", None));
        timeline.push(record("2020", "second", None));

        let headlines: Vec<&str> = timeline
            .get("2020")
            .expect("group exists")
            .iter()
            .map(|r| r.headline.as_str())
            .collect();
        assert_eq!(headlines, vec!["first", "second"]);
    }

    #[test]
    fn empty_date_is_its_own_group() {
        let mut timeline = Timeline::new();
        timeline.push(record("", "undated", None));
        timeline.push(record("2020", "dated", None));
        assert_eq!(timeline.get("").map(<[Record]>::len), Some(1));
    }

    #[test]
    fn tag_components_split_on_slash() {
        let r = record("2020", "x", Some("Politics/Economy"));
        let parts: Vec<&str> = r.tag_components().collect();
        assert_eq!(parts, vec!["Politics", "Economy"]);

        let r = record("2020", "x", Some("A//B/"));
        assert_eq!(r.tag_components().collect::<Vec<_>>(), vec!["A", "B"]);

        let r = record("2020", "x", None);
        assert_eq!(r.tag_components().count(), 0);
    }

    #[test]
    fn tag_set_is_sorted_and_deduplicated() {
        let mut tags = TagSet::new();
        tags.insert_path("Science/Politics");
        tags.insert_path("Art");
        tags.insert_path("Politics");

        let sorted: Vec<&str> = tags.iter().collect();
        assert_eq!(sorted, vec!["Art", "Politics", "Science"]);
        assert_eq!(tags.len(), 3);
        assert!(tags.contains("Science"));
    }
}
