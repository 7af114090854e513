//! Reorder rows of delimited text files by composite sort keys
//!
//! This crate reads a delimited text file (comma, semicolon, tab or pipe
//! separated), sorts its data rows by one or more columns and writes the
//! result next to the original under a configurable prefix. Columns can be
//! compared as plain text, as dates in a range of common formats, or through
//! a categorical priority list. Values that fail to parse as dates fall back
//! to text ordering after all parsed dates, so a run always completes.

#![warn(clippy::all)]

pub mod config;
pub mod dates;
pub mod diag;
pub mod engine;
pub mod error;
pub mod key;
pub mod reader;
pub mod table;
pub mod writer;

// Re-export commonly used types
pub use config::{SortColumn, SortSpec, SortSpecBuilder};
pub use diag::{DiagnosticSink, MemorySink, NullSink, Severity, StderrSink};
pub use engine::Reorderer;
pub use error::{ReorderError, ReorderResult};

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const IO_FAILURE: i32 = 2;

/// Reorder one file with the given sort spec, discarding diagnostics
///
/// Convenience wrapper over [`Reorderer`] for callers that do not need
/// progress or warning events. Returns the path of the written output file.
pub fn reorder(
    spec: &SortSpec,
    input: &std::path::Path,
    output_dir: &std::path::Path,
) -> ReorderResult<std::path::PathBuf> {
    let engine = Reorderer::new(spec.clone());
    engine.reorder(input, output_dir)
}
