//! In-memory representation of a delimited file

/// One data row, cell values index-aligned to the owning table's columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Value at a column index; positions past the end read as empty
    pub fn get(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A delimited file loaded in memory
///
/// Created by the reader, reordered in place by the engine, persisted by the
/// writer. Nothing is retained between runs.
#[derive(Debug, Clone)]
pub struct Table {
    /// Header names in file order, unique
    pub columns: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<Row>,
    /// Field delimiter detected at read time, reused at write time
    pub delimiter: u8,
}

impl Table {
    /// Position of a named column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
