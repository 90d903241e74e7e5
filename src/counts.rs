use serde::{Deserialize, Serialize};

use crate::models::{CountGroups, MergedRecord};

/// An artist violates with this many total tracks (inclusive).
pub const MAX_TRACKS_BY_ARTIST: usize = 5;
/// An album violates with this many total tracks (inclusive).
pub const MAX_TRACKS_FROM_ALBUM: usize = 4;
/// An artist run violates when strictly longer than this.
pub const MAX_CONSECUTIVE_BY_ARTIST: usize = 3;
/// An album run violates when strictly longer than this.
pub const MAX_CONSECUTIVE_FROM_ALBUM: usize = 2;

/// The four violation collections produced by one analysis.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Restrictions {
    pub artist_totals: CountGroups,
    pub album_totals: CountGroups,
    pub artist_runs: CountGroups,
    pub album_runs: CountGroups,
}

impl Restrictions {
    pub fn is_empty(&self) -> bool {
        self.artist_totals.is_empty()
            && self.album_totals.is_empty()
            && self.artist_runs.is_empty()
            && self.album_runs.is_empty()
    }

    /// Whether `key` names a violating album (total or consecutive). Used to
    /// label conflict-warning entries.
    pub fn is_album_key(&self, key: &str) -> bool {
        self.album_totals.contains(key) || self.album_runs.contains(key)
    }
}

/// Apply the fixed rotation policy to a merged tracklist.
pub fn restrictions(merged: &[MergedRecord]) -> Restrictions {
    let mut artist_totals = totals(merged, |r| r.artist.as_str());
    artist_totals.retain(|g| g.count >= MAX_TRACKS_BY_ARTIST);
    let mut album_totals = totals(merged, |r| r.album.as_str());
    album_totals.retain(|g| g.count >= MAX_TRACKS_FROM_ALBUM);

    Restrictions {
        artist_totals,
        album_totals,
        artist_runs: consecutive(merged, |r| r.artist.as_str(), MAX_CONSECUTIVE_BY_ARTIST),
        album_runs: consecutive(merged, |r| r.album.as_str(), MAX_CONSECUTIVE_FROM_ALBUM),
    }
}

/// Group all merged records by key, first-seen order, position-independent.
fn totals<'a>(merged: &'a [MergedRecord], key: impl Fn(&'a MergedRecord) -> &'a str) -> CountGroups {
    let mut groups = CountGroups::new();
    for record in merged {
        groups.push_track(key(record), record.track_title.clone());
    }
    groups
}

/// Record maximal runs of adjacent records sharing a key, keeping only runs
/// strictly longer than `min`. A key recurring in a later qualifying run
/// overwrites its earlier run (last run wins, via `CountGroups`).
fn consecutive<'a>(
    merged: &'a [MergedRecord],
    key: impl Fn(&'a MergedRecord) -> &'a str,
    min: usize,
) -> CountGroups {
    let mut groups = CountGroups::new();
    let mut current: Option<(&str, Vec<String>)> = None;

    for record in merged {
        let record_key = key(record);
        match current.as_mut() {
            Some((run_key, tracks)) if *run_key == record_key => {
                tracks.push(record.track_title.clone());
            }
            _ => {
                close_run(&mut groups, current.take(), min);
                current = Some((record_key, vec![record.track_title.clone()]));
            }
        }
    }
    close_run(&mut groups, current, min);

    groups
}

fn close_run(groups: &mut CountGroups, run: Option<(&str, Vec<String>)>, min: usize) {
    if let Some((key, tracks)) = run {
        if tracks.len() > min {
            groups.insert(key.to_string(), tracks.len(), tracks);
        }
    }
}
