//! Composite sort keys over heterogeneous cell values

use crate::config::SortSpec;
use crate::dates::{self, ParsedDate};
use crate::diag::DiagnosticSink;
use crate::error::{ReorderError, ReorderResult};
use crate::table::Row;
use chrono::NaiveDate;

/// One comparable atom of a composite key
///
/// Variant declaration order fixes the ordering across value classes:
/// Rank < Date < Text. Rank atoms only ever meet other Rank atoms (the
/// categorical slot is the same in every key), so the visible consequence is
/// the date-column tie-break: parsed dates sort before fallback text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyAtom {
    /// Categorical rank: position in the priority order, unknowns last
    Rank(usize),
    /// Successfully parsed date, compared chronologically
    Date(NaiveDate),
    /// Lowercased cell text or date-parse fallback, compared by code point
    Text(String),
}

/// Totally ordered composite key; comparison is lexicographic over the atoms
///
/// Keys are only comparable when built by the same [`KeyBuilder`], which
/// guarantees a fixed atom count and per-position atom semantics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeKey(pub Vec<KeyAtom>);

/// Builds composite keys for the rows of one table
///
/// Referenced column names are resolved to header positions once, at
/// construction; building a key afterwards cannot fail.
pub struct KeyBuilder<'a> {
    spec: &'a SortSpec,
    categorical_index: Option<usize>,
    column_indices: Vec<(usize, bool)>,
}

impl<'a> KeyBuilder<'a> {
    /// Resolve the configured sort columns against a table header
    ///
    /// The validator runs earlier in the pipeline, so a `MissingColumn`
    /// failure here means a contract was broken upstream.
    pub fn new(spec: &'a SortSpec, columns: &[String]) -> ReorderResult<Self> {
        let position = |name: &str| -> ReorderResult<usize> {
            columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| ReorderError::missing_column(name))
        };

        let categorical_index = if spec.use_categorical {
            Some(position(&spec.categorical_column)?)
        } else {
            None
        };

        let mut column_indices = Vec::with_capacity(spec.columns.len());
        for column in &spec.columns {
            column_indices.push((position(&column.name)?, column.is_date));
        }

        Ok(Self {
            spec,
            categorical_index,
            column_indices,
        })
    }

    /// Build the composite key for one row
    ///
    /// Atom order: categorical rank first when enabled, then one atom per
    /// sort column in declared order. Missing values read as empty strings.
    pub fn key_for(&self, row: &Row, sink: &dyn DiagnosticSink) -> CompositeKey {
        let mut atoms = Vec::with_capacity(self.spec.key_len());

        if let Some(index) = self.categorical_index {
            let value = row.get(index).trim();
            let rank = self
                .spec
                .categorical_order
                .iter()
                .position(|category| category == value)
                .unwrap_or(self.spec.categorical_order.len());
            atoms.push(KeyAtom::Rank(rank));
        }

        for &(index, is_date) in &self.column_indices {
            let value = row.get(index);
            if is_date && !value.is_empty() {
                atoms.push(match dates::parse(value, sink) {
                    ParsedDate::Date(date) => KeyAtom::Date(date),
                    ParsedDate::Fallback(text) => KeyAtom::Text(text),
                });
            } else {
                atoms.push(KeyAtom::Text(value.to_lowercase()));
            }
        }

        CompositeKey(atoms)
    }
}
