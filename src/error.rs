//! Error handling for the reorder pipeline

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for reorder operations
#[derive(Error, Debug)]
pub enum ReorderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Configuration errors, raised before any file is touched
    #[error("at least one sort column is required")]
    EmptySortColumns,

    #[error("sort column name is empty")]
    BlankColumnName,

    #[error("categorical sorting requires a column name")]
    BlankCategoricalColumn,

    #[error("categorical sorting requires a non-empty priority order")]
    EmptyCategoricalOrder,

    #[error("unsupported encoding label: {label}")]
    UnsupportedEncoding { label: String },

    // Input errors
    #[error("input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("input path is not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("no header row in {}", .path.display())]
    NoHeaderRow { path: PathBuf },

    #[error("no data rows in {}", .path.display())]
    NoDataRows { path: PathBuf },

    #[error("could not detect a field delimiter in {}", .path.display())]
    DelimiterDetectionFailed { path: PathBuf },

    #[error("cannot decode {} as {encoding}", .path.display())]
    EncodingError { path: PathBuf, encoding: String },

    #[error("malformed row {record}: {message}")]
    MalformedRow { record: u64, message: String },

    #[error("duplicate column name in header: {name}")]
    DuplicateColumn { name: String },

    // Schema errors
    #[error("input has no columns")]
    EmptySchema,

    #[error("sort columns missing from input: {}", .names.join(", "))]
    MissingSortColumns { names: Vec<String> },

    #[error("categorical column missing from input: {name}")]
    MissingCategoricalColumn { name: String },

    // Output errors
    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("value cannot be encoded as {encoding}: {value:?}")]
    UnencodableValue { encoding: String, value: String },

    // Internal errors: contract violations, not user-recoverable conditions
    #[error("internal error: column '{column}' not present in row schema")]
    MissingColumn { column: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ReorderError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReorderError::Io(_)
            | ReorderError::InputNotFound { .. }
            | ReorderError::NotAFile { .. }
            | ReorderError::CreateDirFailed { .. }
            | ReorderError::WriteFailed { .. } => crate::IO_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create an input not found error
    pub fn input_not_found(path: &Path) -> Self {
        ReorderError::InputNotFound {
            path: path.to_path_buf(),
        }
    }

    /// Create a not-a-regular-file error
    pub fn not_a_file(path: &Path) -> Self {
        ReorderError::NotAFile {
            path: path.to_path_buf(),
        }
    }

    /// Create a missing header error
    pub fn no_header_row(path: &Path) -> Self {
        ReorderError::NoHeaderRow {
            path: path.to_path_buf(),
        }
    }

    /// Create an empty data error
    pub fn no_data_rows(path: &Path) -> Self {
        ReorderError::NoDataRows {
            path: path.to_path_buf(),
        }
    }

    /// Create a delimiter detection error
    pub fn delimiter_detection_failed(path: &Path) -> Self {
        ReorderError::DelimiterDetectionFailed {
            path: path.to_path_buf(),
        }
    }

    /// Create a decode error
    pub fn encoding_error(path: &Path, encoding: &str) -> Self {
        ReorderError::EncodingError {
            path: path.to_path_buf(),
            encoding: encoding.to_string(),
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(record: u64, message: &str) -> Self {
        ReorderError::MalformedRow {
            record,
            message: message.to_string(),
        }
    }

    /// Create a duplicate column error
    pub fn duplicate_column(name: &str) -> Self {
        ReorderError::DuplicateColumn {
            name: name.to_string(),
        }
    }

    /// Create a missing sort columns error
    pub fn missing_sort_columns(names: Vec<String>) -> Self {
        ReorderError::MissingSortColumns { names }
    }

    /// Create a missing categorical column error
    pub fn missing_categorical_column(name: &str) -> Self {
        ReorderError::MissingCategoricalColumn {
            name: name.to_string(),
        }
    }

    /// Create an unsupported encoding error
    pub fn unsupported_encoding(label: &str) -> Self {
        ReorderError::UnsupportedEncoding {
            label: label.to_string(),
        }
    }

    /// Create a directory creation error
    pub fn create_dir_failed(path: &Path, source: io::Error) -> Self {
        ReorderError::CreateDirFailed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a write error
    pub fn write_failed(path: &Path, source: io::Error) -> Self {
        ReorderError::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an unencodable value error
    pub fn unencodable_value(encoding: &str, value: &str) -> Self {
        ReorderError::UnencodableValue {
            encoding: encoding.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: &str) -> Self {
        ReorderError::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(message: &str) -> Self {
        ReorderError::Internal {
            message: message.to_string(),
        }
    }
}

/// Result type for reorder operations
pub type ReorderResult<T> = Result<T, ReorderError>;

/// Context trait for attaching a file path to raw I/O errors
pub trait IoContext<T> {
    fn with_path_context(self, path: &Path) -> ReorderResult<T>;
}

impl<T> IoContext<T> for Result<T, io::Error> {
    fn with_path_context(self, path: &Path) -> ReorderResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::NotFound => ReorderError::input_not_found(path),
            _ => ReorderError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", path.display(), io_err),
            )),
        })
    }
}
