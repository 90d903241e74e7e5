use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

/// Malformed tracklist input. The shell is responsible for turning these
/// into user-visible messages; the core only raises.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// The header row contains a column name outside the known set.
    #[error("Unknown column in header: {0:?}")]
    UnknownColumn(String),

    /// The same column name appears twice in the header row.
    #[error("Duplicate column in header: {0:?}")]
    DuplicateColumn(String),

    /// A Start/End value could not be read as whole seconds.
    #[error("Invalid {field} value {value:?}: expected whole seconds")]
    InvalidSeconds { field: &'static str, value: String },
}
