use crate::error::{FormatError, Result};
use crate::models::{MergedRecord, PlayRecord};

/// Collapse adjacent slices of the same track into single continuous plays.
///
/// Two adjacent records merge when artist, track title, id, and album all
/// match; start/end are not part of the key. Merging extends the surviving
/// record's `end` to the incoming record's `end` (last wins, not max — an
/// out-of-order input can shrink the span and is not rejected, same as gaps
/// and zero- or negative-duration spans).
pub fn merge(records: &[PlayRecord]) -> Result<Vec<MergedRecord>> {
    let mut merged: Vec<MergedRecord> = Vec::with_capacity(records.len());
    let mut current: Option<MergedRecord> = None;

    for record in records {
        match current.as_mut() {
            Some(acc) if same_track(acc, record) => {
                acc.end = seconds(&record.end, "End")?;
            }
            _ => {
                if let Some(done) = current.take() {
                    merged.push(done);
                }
                current = Some(MergedRecord {
                    start: seconds(&record.start, "Start")?,
                    end: seconds(&record.end, "End")?,
                    artist: record.artist.clone(),
                    track_title: record.track_title.clone(),
                    track_id: record.track_id.clone(),
                    album: record.album.clone(),
                });
            }
        }
    }
    if let Some(done) = current.take() {
        merged.push(done);
    }

    Ok(merged)
}

fn same_track(acc: &MergedRecord, record: &PlayRecord) -> bool {
    acc.artist == record.artist
        && acc.track_title == record.track_title
        && acc.track_id == record.track_id
        && acc.album == record.album
}

/// Start/End reach this point as raw strings; the first non-numeric value
/// fails the whole analysis.
fn seconds(value: &str, field: &'static str) -> Result<i64> {
    value.parse().map_err(|_| FormatError::InvalidSeconds {
        field,
        value: value.to_string(),
    })
}
