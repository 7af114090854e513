//! Pipeline orchestration: schema validation and the reorder run

use crate::config::SortSpec;
use crate::diag::{DiagnosticSink, NullSink};
use crate::error::{ReorderError, ReorderResult};
use crate::key::KeyBuilder;
use crate::{reader, writer};
use std::path::{Path, PathBuf};

/// Check that every column the sort spec references exists in the header
///
/// All missing sort columns are reported together, not just the first; the
/// categorical column is checked after them.
pub fn validate_columns(columns: &[String], spec: &SortSpec) -> ReorderResult<()> {
    if columns.is_empty() {
        return Err(ReorderError::EmptySchema);
    }

    let missing: Vec<String> = spec
        .columns
        .iter()
        .filter(|column| !columns.contains(&column.name))
        .map(|column| column.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ReorderError::missing_sort_columns(missing));
    }

    if spec.use_categorical && !columns.contains(&spec.categorical_column) {
        return Err(ReorderError::missing_categorical_column(
            &spec.categorical_column,
        ));
    }

    Ok(())
}

/// Orchestrates one read → validate → sort → write run
///
/// Owns the sort spec and the diagnostic sink for the duration of the run;
/// holds no state between runs.
pub struct Reorderer {
    spec: SortSpec,
    sink: Box<dyn DiagnosticSink>,
}

impl Reorderer {
    /// Engine with the no-op sink
    pub fn new(spec: SortSpec) -> Self {
        Self::with_sink(spec, Box::new(NullSink))
    }

    /// Engine reporting diagnostics to the given sink
    pub fn with_sink(spec: SortSpec, sink: Box<dyn DiagnosticSink>) -> Self {
        Self { spec, sink }
    }

    pub fn spec(&self) -> &SortSpec {
        &self.spec
    }

    /// Run the pipeline for one file and return the output path
    ///
    /// Every step is a hard gate: on any failure nothing has been written and
    /// the typed error is returned as-is for the caller to surface.
    pub fn reorder(&self, input: &Path, output_dir: &Path) -> ReorderResult<PathBuf> {
        self.sink.info(&format!("reordering {}", input.display()));

        if !input.exists() {
            return Err(ReorderError::input_not_found(input));
        }
        if !input.is_file() {
            return Err(ReorderError::not_a_file(input));
        }

        let encoding = self.spec.resolved_encoding()?;
        let mut table = reader::read(input, encoding)?;
        self.sink
            .info(&format!("read {} rows from {}", table.len(), input.display()));

        validate_columns(&table.columns, &self.spec)?;

        let key_builder = KeyBuilder::new(&self.spec, &table.columns)?;
        self.sink.info("sorting rows");
        table
            .rows
            .sort_by_cached_key(|row| key_builder.key_for(row, self.sink.as_ref()));
        if self.spec.reverse {
            table.rows.reverse();
        }

        let output_path = self.output_path(input, output_dir)?;
        writer::write(&output_path, &table, encoding)?;
        self.sink.info(&format!(
            "wrote {} rows to {}",
            table.len(),
            output_path.display()
        ));
        Ok(output_path)
    }

    /// Output path: the prefixed input file name inside the output directory
    fn output_path(&self, input: &Path, output_dir: &Path) -> ReorderResult<PathBuf> {
        let name = input
            .file_name()
            .ok_or_else(|| ReorderError::not_a_file(input))?;
        let file_name = format!("{}{}", self.spec.output_prefix, name.to_string_lossy());
        Ok(output_dir.join(file_name))
    }
}
