use serde::{Deserialize, Serialize};

/// The six recognized tracklist columns, with their exact header labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Start,
    End,
    Artists,
    TrackTitle,
    Id,
    Albums,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Start,
        Field::End,
        Field::Artists,
        Field::TrackTitle,
        Field::Id,
        Field::Albums,
    ];

    /// Header label as it appears in the tab-delimited export.
    pub fn label(self) -> &'static str {
        match self {
            Field::Start => "Start",
            Field::End => "End",
            Field::Artists => "Artists",
            Field::TrackTitle => "Track Title",
            Field::Id => "Id",
            Field::Albums => "Albums",
        }
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// One row of the input tracklist.
///
/// `start` and `end` stay raw strings here; they are only converted to
/// seconds when slices get merged, so a bad value surfaces at that point.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    pub start: String,
    pub end: String,
    pub artist: String,
    pub track_title: String,
    pub track_id: String,
    pub album: String,
}

/// One continuous play of a track, after collapsing adjacent slices.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub start: i64, // seconds offset from broadcast start
    pub end: i64,
    pub artist: String,
    pub track_title: String,
    pub track_id: String,
    pub album: String,
}

/// Result of aggregating merged records under one artist or album name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CountGroup {
    pub key: String,
    pub count: usize,
    pub tracks: Vec<String>, // ordered; repeated titles are meaningful
}

/// Insertion-ordered collection of [`CountGroup`]s keyed by `key`.
///
/// Iteration follows first-insertion order. Re-inserting an existing key
/// replaces the group's count and tracks but keeps its original position:
/// last write wins. Recurring consecutive runs rely on this contract.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CountGroups {
    groups: Vec<CountGroup>,
}

impl CountGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the group for `key` (last write wins).
    pub fn insert(&mut self, key: String, count: usize, tracks: Vec<String>) {
        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(existing) => {
                existing.count = count;
                existing.tracks = tracks;
            }
            None => self.groups.push(CountGroup { key, count, tracks }),
        }
    }

    /// Append one track to the group for `key`, creating the group if needed.
    pub fn push_track(&mut self, key: &str, title: String) {
        match self.groups.iter_mut().find(|g| g.key == key) {
            Some(g) => {
                g.tracks.push(title);
                g.count = g.tracks.len();
            }
            None => self.groups.push(CountGroup {
                key: key.to_string(),
                count: 1,
                tracks: vec![title],
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CountGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keep only groups matching the predicate, preserving order.
    pub fn retain(&mut self, f: impl FnMut(&CountGroup) -> bool) {
        self.groups.retain(f);
    }
}

/// Titles duplicated inside a violating group, keyed by the group's artist
/// or album name. Repeats across collections are kept; display-side
/// deduplication happens in the report formatter.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    entries: Vec<(String, Vec<String>)>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, title: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, titles)) => titles.push(title),
            None => self.entries.push((key.to_string(), vec![title])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
