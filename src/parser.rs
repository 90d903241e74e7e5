use crate::error::{FormatError, Result};
use crate::models::{Field, PlayRecord};

/// A parsed tracklist: the header's column order plus one record per data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracklist {
    /// Column order from the header row, preserved for display.
    pub columns: Vec<Field>,
    pub records: Vec<PlayRecord>,
}

/// Parse a raw tab-delimited tracklist into ordered play records.
///
/// The first row must be a header naming all six known columns, in any
/// order. Data rows are zipped against the header; a row shorter than the
/// header leaves its trailing fields empty, and extra cells are dropped.
/// Start/End are not validated numerically here.
pub fn parse(raw: &str) -> Result<Tracklist> {
    let mut lines = raw.trim().lines();
    let header = lines.next().unwrap_or("");
    let columns = parse_header(header)?;

    let records = lines
        .map(|line| parse_row(&columns, line))
        .collect::<Vec<_>>();

    Ok(Tracklist { columns, records })
}

fn parse_header(header: &str) -> Result<Vec<Field>> {
    let mut columns = Vec::new();
    if !header.trim().is_empty() {
        for cell in header.split('\t') {
            let label = cell.trim();
            let field = Field::from_label(label)
                .ok_or_else(|| FormatError::UnknownColumn(label.to_string()))?;
            if columns.contains(&field) {
                return Err(FormatError::DuplicateColumn(label.to_string()));
            }
            columns.push(field);
        }
    }
    for field in Field::ALL {
        if !columns.contains(&field) {
            return Err(FormatError::MissingColumn(field.label()));
        }
    }
    Ok(columns)
}

fn parse_row(columns: &[Field], line: &str) -> PlayRecord {
    let mut record = PlayRecord {
        start: String::new(),
        end: String::new(),
        artist: String::new(),
        track_title: String::new(),
        track_id: String::new(),
        album: String::new(),
    };

    // Short rows leave trailing fields empty; extra cells fall off the end.
    for (field, value) in columns.iter().zip(line.split('\t')) {
        let value = value.trim().to_string();
        match field {
            Field::Start => record.start = value,
            Field::End => record.end = value,
            Field::Artists => record.artist = value,
            Field::TrackTitle => record.track_title = value,
            Field::Id => record.track_id = value,
            Field::Albums => record.album = value,
        }
    }
    record
}
