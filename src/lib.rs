//! Tracklist rotation-rule checker.
//!
//! Takes a tab-delimited tracklist export (one row per fixed-length time
//! slice), merges slices into continuous plays, and reports artists or
//! albums that break the rotation policy: too many tracks overall or too
//! many in a row. The presentation shell feeds raw text into the
//! `analyze_*` functions and renders the returned text; all errors
//! propagate to the shell as [`FormatError`].

pub mod conflicts;
pub mod counts;
pub mod error;
pub mod merge;
pub mod models;
pub mod parser;
pub mod report;

use serde::{Deserialize, Serialize};
use tracing::debug;

use counts::Restrictions;
pub use error::{FormatError, Result};
use models::{ConflictReport, Field, MergedRecord};

/// Full structured result of one analysis, serializable so a shell can
/// consume it over IPC instead of (or alongside) the text reports.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TracklistAnalysis {
    pub columns: Vec<Field>,
    pub merged: Vec<MergedRecord>,
    pub restrictions: Restrictions,
    pub conflicts: ConflictReport,
}

/// Run the whole pipeline on raw tracklist text.
pub fn analyze(raw: &str) -> Result<TracklistAnalysis> {
    let tracklist = parser::parse(raw)?;
    let merged = merge::merge(&tracklist.records)?;
    debug!(
        records = tracklist.records.len(),
        merged = merged.len(),
        "merged tracklist"
    );

    let restrictions = counts::restrictions(&merged);
    let conflicts = conflicts::find_conflicts(&restrictions);
    debug!(
        artist_totals = restrictions.artist_totals.len(),
        album_totals = restrictions.album_totals.len(),
        artist_runs = restrictions.artist_runs.len(),
        album_runs = restrictions.album_runs.len(),
        conflicted_keys = conflicts.iter().count(),
        "evaluated restrictions"
    );

    Ok(TracklistAnalysis {
        columns: tracklist.columns,
        merged,
        restrictions,
        conflicts,
    })
}

/// Cleaned-up tracklist: merged plays as a fixed-width grid table.
pub fn analyze_clean(raw: &str) -> Result<String> {
    let analysis = analyze(raw)?;
    Ok(report::clean_tracklist(&analysis.columns, &analysis.merged))
}

/// Itemized restriction reasons plus the conflict warning ("" when none).
pub fn analyze_reasons(raw: &str) -> Result<(String, String)> {
    let analysis = analyze(raw)?;
    Ok((
        report::reasons(&analysis.restrictions),
        report::conflict_warning(&analysis.conflicts, &analysis.restrictions),
    ))
}

/// Narrative macro report plus the conflict warning ("" when none).
pub fn analyze_macro(raw: &str) -> Result<(String, String)> {
    let analysis = analyze(raw)?;
    Ok((
        report::macro_info(&analysis.restrictions),
        report::conflict_warning(&analysis.conflicts, &analysis.restrictions),
    ))
}
