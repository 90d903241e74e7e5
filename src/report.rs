use std::fmt::Write;

use crate::counts::Restrictions;
use crate::models::{ConflictReport, Field, MergedRecord};

/// Wrap width for the long text columns in the clean table.
const WRAP_WIDTH: usize = 20;

pub const NO_RESTRICTIONS: &str = "No restrictions found.";
pub const NOT_RESTRICTED: &str = "The show is not being restricted.";

/// Render merged records as a fixed-width grid table in header order.
/// Start/End are shown as HH:MM:SS; artist, title, and album cells wrap at
/// 20 columns. Zero records renders the header-only table.
pub fn clean_tracklist(columns: &[Field], merged: &[MergedRecord]) -> String {
    let headers: Vec<&str> = columns.iter().map(|f| f.label()).collect();
    let rows: Vec<Vec<String>> = merged
        .iter()
        .map(|record| columns.iter().map(|f| cell(*f, record)).collect())
        .collect();
    render_grid(&headers, &rows)
}

fn cell(field: Field, record: &MergedRecord) -> String {
    match field {
        Field::Start => seconds_to_time(record.start),
        Field::End => seconds_to_time(record.end),
        Field::Artists => wrap(&record.artist, WRAP_WIDTH),
        Field::TrackTitle => wrap(&record.track_title, WRAP_WIDTH),
        Field::Id => record.track_id.clone(),
        Field::Albums => wrap(&record.album, WRAP_WIDTH),
    }
}

/// Itemized listing of every non-empty violation collection. All four empty
/// yields the "no restrictions" sentinel instead of empty text.
pub fn reasons(restrictions: &Restrictions) -> String {
    if restrictions.is_empty() {
        return NO_RESTRICTIONS.to_string();
    }

    let mut text = String::new();
    let sections = [
        ("Max Tracks By Artist:", &restrictions.artist_totals),
        ("Max Consecutive Tracks By Artist:", &restrictions.artist_runs),
        ("Max Tracks From Album:", &restrictions.album_totals),
        ("Max Consecutive Tracks From Album:", &restrictions.album_runs),
    ];
    for (heading, collection) in sections {
        if collection.is_empty() {
            continue;
        }
        let _ = writeln!(text, "{heading}");
        for group in collection.iter() {
            let _ = writeln!(text, "{}: {} tracks", group.key, group.count);
            for track in &group.tracks {
                let _ = writeln!(text, "\t- {track}");
            }
        }
        text.push('\n');
    }
    text
}

/// Narrative form of the four collections, each followed by the fixed
/// sentence naming the rule that was exceeded.
pub fn macro_info(restrictions: &Restrictions) -> String {
    if restrictions.is_empty() {
        return NOT_RESTRICTED.to_string();
    }

    let mut text = String::from("Our audio fingerprinter has detected that this show contains:\n\n");

    if !restrictions.artist_totals.is_empty() {
        for group in restrictions.artist_totals.iter() {
            let _ = writeln!(text, "\t\t- {} tracks by {}:", group.count, group.key);
            macro_tracks(&mut text, &group.tracks);
        }
        text.push_str("\t\tThis exceeds the limit set for the number of total tracks by one recording artist.\n\n");
    }
    if !restrictions.artist_runs.is_empty() {
        for group in restrictions.artist_runs.iter() {
            let _ = writeln!(text, "\t\t - {} consecutive tracks by {}:", group.count, group.key);
            macro_tracks(&mut text, &group.tracks);
        }
        text.push_str("\t\tThis exceeds the limit set for the number of consecutive tracks by one recording artist.\n\n");
    }
    if !restrictions.album_totals.is_empty() {
        for group in restrictions.album_totals.iter() {
            let _ = writeln!(text, "\t\t- {} tracks from the album \"{}\":", group.count, group.key);
            macro_tracks(&mut text, &group.tracks);
        }
        text.push_str("\t\tThis exceeds the limit set for the number of total tracks from the same album.\n\n");
    }
    if !restrictions.album_runs.is_empty() {
        for group in restrictions.album_runs.iter() {
            let _ = writeln!(
                text,
                "\t\t- {} consecutive tracks from the album \"{}\":",
                group.count, group.key
            );
            macro_tracks(&mut text, &group.tracks);
        }
        text.push_str("\t\tThis exceeds the limit set for the number of consecutive tracks from the same album.\n\n");
    }
    text
}

fn macro_tracks(text: &mut String, tracks: &[String]) {
    for track in tracks {
        let _ = writeln!(text, "\t\t\t\t- {track}");
    }
}

/// Secondary warning block listing conflicted tracks, or "" when the report
/// is empty. Duplicated titles are shown once per key, first-seen order.
pub fn conflict_warning(report: &ConflictReport, restrictions: &Restrictions) -> String {
    if report.is_empty() {
        return String::new();
    }

    let mut text = String::from("The following track(s) are causing more than one restriction:\n");
    for (key, titles) in report.iter() {
        let label = if restrictions.is_album_key(key) {
            "Album"
        } else {
            "Artist"
        };
        let _ = write!(text, "\n({label}) {key}:\n");
        let mut shown: Vec<&str> = Vec::new();
        for title in titles {
            if !shown.contains(&title.as_str()) {
                shown.push(title);
                let _ = writeln!(text, "\t  - {title}");
            }
        }
    }
    text.push_str("\nPlease review manually.");
    text
}

/// Seconds offset to zero-padded HH:MM:SS (hours unbounded).
fn seconds_to_time(seconds: i64) -> String {
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Greedy word wrap; words longer than `width` are broken. Lines are joined
/// with newlines so they end up as multi-line grid cells.
fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let needed = if line.is_empty() { 0 } else { 1 };
            if line.chars().count() + needed + word.chars().count() <= width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                break;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                continue;
            }
            // a single word longer than the width gets broken
            let split = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split].to_string());
            word = &word[split..];
            if word.is_empty() {
                break;
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

/// Box-drawing grid with one-space padding, left-aligned columns, row
/// separators between data rows, and multi-line cell support.
fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&border(&widths, '╒', '═', '╤', '╕'));
    push_cells(&mut out, &widths, &header_cells);
    out.push_str(&border(&widths, '╞', '═', '╪', '╡'));
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str(&border(&widths, '├', '─', '┼', '┤'));
        }
        push_cells(&mut out, &widths, row);
    }
    out.push_str(&border(&widths, '╘', '═', '╧', '╛'));
    out.pop(); // no trailing newline
    out
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            for line in cell.split('\n') {
                widths[i] = widths[i].max(line.chars().count());
            }
        }
    }
    widths
}

fn border(widths: &[usize], left: char, fill: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(mid);
        }
        for _ in 0..width + 2 {
            line.push(fill);
        }
    }
    line.push(right);
    line.push('\n');
    line
}

/// Emit one logical row, spreading multi-line cells over visual lines.
fn push_cells(out: &mut String, widths: &[usize], cells: &[String]) {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| c.split('\n').collect()).collect();
    let height = split.iter().map(|lines| lines.len()).max().unwrap_or(1);

    for line_no in 0..height {
        out.push('│');
        for (i, lines) in split.iter().enumerate() {
            let content = lines.get(line_no).copied().unwrap_or("");
            let pad = widths[i] - content.chars().count();
            out.push(' ');
            out.push_str(content);
            for _ in 0..pad + 1 {
                out.push(' ');
            }
            out.push('│');
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountGroups;

    fn play(start: i64, end: i64, artist: &str, title: &str, id: &str, album: &str) -> MergedRecord {
        MergedRecord {
            start,
            end,
            artist: artist.into(),
            track_title: title.into(),
            track_id: id.into(),
            album: album.into(),
        }
    }

    fn one_violation() -> Restrictions {
        let mut artist_totals = CountGroups::new();
        artist_totals.insert(
            "Hank Locklin".into(),
            5,
            vec!["T1".into(), "T2".into(), "T3".into(), "T4".into(), "T5".into()],
        );
        Restrictions {
            artist_totals,
            ..Default::default()
        }
    }

    #[test]
    fn seconds_format_zero_pads() {
        assert_eq!(seconds_to_time(0), "00:00:00");
        assert_eq!(seconds_to_time(90), "00:01:30");
        assert_eq!(seconds_to_time(3661), "01:01:01");
        assert_eq!(seconds_to_time(90000), "25:00:00");
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        assert_eq!(wrap("Cults Hits Novelty Classics, Vol. 1", 20), "Cults Hits Novelty\nClassics, Vol. 1");
        assert_eq!(wrap("short", 20), "short");
        assert_eq!(wrap("", 20), "");
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let wrapped = wrap("Supercalifragilisticexpialidocious", 20);
        assert_eq!(wrapped, "Supercalifragilistic\nexpialidocious");
    }

    #[test]
    fn clean_table_shape() {
        let merged = vec![play(0, 30, "Mack Fields", "Bowling Ball Blues", "3530145", "Novelty Classics")];
        let table = clean_tracklist(&Field::ALL, &merged);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with('╒') && lines[0].ends_with('╕'));
        assert!(lines[1].contains("│ Start"));
        assert!(lines[1].contains("│ Track Title"));
        assert!(lines[2].starts_with('╞'));
        assert!(lines[3].contains("│ 00:00:00 │ 00:00:30 │"));
        assert!(lines.last().unwrap().starts_with('╘'));
        // every visual line spans the same width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn clean_table_wraps_long_cells_across_visual_lines() {
        let merged = vec![play(
            0,
            30,
            "Mack Fields",
            "Bowling Ball Blues",
            "3530145",
            "Cults Hits Novelty Classics, Vol. 1",
        )];
        let table = clean_tracklist(&Field::ALL, &merged);
        assert!(table.contains("Cults Hits Novelty"));
        assert!(table.contains("Classics, Vol. 1"));
        // wrapped album spills onto a second visual line with empty siblings
        let spill: Vec<&str> = table.lines().filter(|l| l.contains("Classics, Vol. 1")).collect();
        assert_eq!(spill.len(), 1);
        assert!(spill[0].starts_with("│          │"));
    }

    #[test]
    fn clean_table_with_zero_records_is_header_only() {
        let table = clean_tracklist(&Field::ALL, &[]);
        assert!(table.contains("│ Start │ End │ Artists │ Track Title │ Id │ Albums │"));
        assert!(table.lines().count() == 4);
    }

    #[test]
    fn reasons_lists_groups_and_tracks() {
        let text = reasons(&one_violation());
        assert!(text.starts_with("Max Tracks By Artist:\n"));
        assert!(text.contains("Hank Locklin: 5 tracks\n"));
        assert!(text.contains("\t- T3\n"));
        assert!(!text.contains("Max Tracks From Album"));
    }

    #[test]
    fn reasons_sentinel_when_empty() {
        assert_eq!(reasons(&Restrictions::default()), NO_RESTRICTIONS);
    }

    #[test]
    fn macro_sentinel_when_empty() {
        assert_eq!(macro_info(&Restrictions::default()), NOT_RESTRICTED);
    }

    #[test]
    fn macro_names_the_exceeded_rule() {
        let text = macro_info(&one_violation());
        assert!(text.starts_with("Our audio fingerprinter has detected that this show contains:\n\n"));
        assert!(text.contains("\t\t- 5 tracks by Hank Locklin:\n"));
        assert!(text.contains("\t\t\t\t- T1\n"));
        assert!(text.contains("the number of total tracks by one recording artist.\n"));
    }

    #[test]
    fn conflict_warning_dedupes_titles_and_labels_albums() {
        let mut album_totals = CountGroups::new();
        album_totals.insert(
            "Queen Of Hearts".into(),
            4,
            vec!["Song".into(), "Song".into(), "Other".into(), "Song".into()],
        );
        let restrictions = Restrictions {
            album_totals,
            ..Default::default()
        };
        let report = crate::conflicts::find_conflicts(&restrictions);
        let warning = conflict_warning(&report, &restrictions);

        assert!(warning.starts_with("The following track(s) are causing more than one restriction:\n"));
        assert!(warning.contains("\n(Album) Queen Of Hearts:\n"));
        assert_eq!(warning.matches("\t  - Song\n").count(), 1);
        assert!(warning.ends_with("\nPlease review manually."));
    }

    #[test]
    fn conflict_warning_empty_when_no_conflicts() {
        let report = ConflictReport::new();
        assert_eq!(conflict_warning(&report, &Restrictions::default()), "");
    }
}
