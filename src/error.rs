//! Error types for loading delimited tables.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for table loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Structural failures that abort a load. Bad cells never end up here; they
/// become `NaN` in the resulting series.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file has no non-blank line (or no non-empty record).
    #[error("File is empty: {}", .path.display())]
    EmptyFile { path: PathBuf },

    /// No delimiter could be deduced from content or extension.
    #[error("Unable to deduce file type: {}", .path.display())]
    UndeterminedDelimiter { path: PathBuf },

    /// A data row is missing a selected column.
    #[error("Line {line}: column {} requested but the row has only {fields} field(s)", .column + 1)]
    RowTooShort {
        line: u64,
        column: usize,
        fields: usize,
    },

    /// Failed to open or read the file.
    #[error("Cannot open file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed record (e.g. invalid UTF-8 inside a field).
    #[error("Cannot parse file {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Create an Io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Csv error. I/O failures surfaced by the reader stay `Io`.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        let path = path.into();
        if source.is_io_error() {
            return Self::Io {
                path,
                source: source.into(),
            };
        }
        Self::Csv { path, source }
    }

    /// Short dialog title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            LoadError::EmptyFile { .. } => "Empty File",
            LoadError::UndeterminedDelimiter { .. } => "Unknown File Type",
            LoadError::RowTooShort { .. } => "Malformed Row",
            LoadError::Io { .. } | LoadError::Csv { .. } => "Cannot Open File",
        }
    }
}
