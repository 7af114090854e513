//! Sort specification types and validation

use crate::error::{ReorderError, ReorderResult};
use encoding_rs::Encoding;

/// One column of the composite sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortColumn {
    /// Column name as it appears in the header row
    pub name: String,
    /// Parse values as dates before comparing
    pub is_date: bool,
}

impl SortColumn {
    /// Create a sort column, trimming the name
    pub fn new(name: &str, is_date: bool) -> ReorderResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ReorderError::BlankColumnName);
        }
        Ok(Self {
            name: name.to_string(),
            is_date,
        })
    }

    /// Parse a sort column from a keydef like "title" or "year:date"
    ///
    /// The split is taken from the right, so a column whose name contains a
    /// colon still parses as long as it does not end in ":date".
    pub fn parse(keydef: &str) -> ReorderResult<Self> {
        match keydef.rsplit_once(':') {
            Some((name, "date")) => Self::new(name, true),
            _ => Self::new(keydef, false),
        }
    }
}

/// Full description of one reorder run
///
/// Immutable once validated; the engine holds it for the duration of a run.
#[derive(Debug, Clone)]
pub struct SortSpec {
    /// Composite key columns, most significant first (at least one)
    pub columns: Vec<SortColumn>,
    /// Reverse the fully sorted order, tie groups included
    pub reverse: bool,
    /// Rank rows by a priority column ahead of the key columns
    pub use_categorical: bool,
    /// Column holding the categorical value
    pub categorical_column: String,
    /// Priority order; values not listed rank after every listed one
    pub categorical_order: Vec<String>,
    /// Prefix prepended to the input file name to form the output file name
    pub output_prefix: String,
    /// Text encoding label used for both reading and writing
    pub encoding: String,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            reverse: false,
            use_categorical: false,
            categorical_column: "language".to_string(),
            categorical_order: vec!["EN".to_string(), "CN".to_string()],
            output_prefix: "sorted_".to_string(),
            encoding: "utf-8".to_string(),
        }
    }
}

impl SortSpec {
    /// Create a specification with default settings and no key columns yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validated specification from (name, is_date) pairs
    pub fn from_pairs(pairs: &[(&str, bool)]) -> ReorderResult<Self> {
        let mut columns = Vec::with_capacity(pairs.len());
        for (name, is_date) in pairs {
            columns.push(SortColumn::new(name, *is_date)?);
        }
        let spec = Self {
            columns,
            ..Self::default()
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Enable reverse ordering
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enable categorical ranking on the configured column
    pub fn with_categorical(mut self, use_categorical: bool) -> Self {
        self.use_categorical = use_categorical;
        self
    }

    /// Set the output filename prefix
    pub fn with_output_prefix(mut self, prefix: &str) -> Self {
        self.output_prefix = prefix.to_string();
        self
    }

    /// Set the text encoding label
    pub fn with_encoding(mut self, label: &str) -> Self {
        self.encoding = label.to_string();
        self
    }

    /// Validate the combined settings for consistency
    ///
    /// Runs eagerly at construction, before any file is opened; nothing here
    /// is deferred to the pipeline.
    pub fn validate(&self) -> ReorderResult<()> {
        if self.columns.is_empty() {
            return Err(ReorderError::EmptySortColumns);
        }

        for column in &self.columns {
            if column.name.trim().is_empty() {
                return Err(ReorderError::BlankColumnName);
            }
        }

        if self.use_categorical {
            if self.categorical_column.trim().is_empty() {
                return Err(ReorderError::BlankCategoricalColumn);
            }
            if self.categorical_order.is_empty() {
                return Err(ReorderError::EmptyCategoricalOrder);
            }
        }

        self.resolved_encoding()?;
        Ok(())
    }

    /// Resolve the configured encoding label to an encoding
    ///
    /// The same encoding serves reading and writing, so labels that cannot be
    /// encoded to (the UTF-16 family) are rejected here, eagerly.
    pub fn resolved_encoding(&self) -> ReorderResult<&'static Encoding> {
        let encoding = Encoding::for_label(self.encoding.as_bytes())
            .ok_or_else(|| ReorderError::unsupported_encoding(&self.encoding))?;
        if encoding.output_encoding() != encoding {
            return Err(ReorderError::unsupported_encoding(&self.encoding));
        }
        Ok(encoding)
    }

    /// Number of atoms in every composite key built from this specification
    pub fn key_len(&self) -> usize {
        self.columns.len() + usize::from(self.use_categorical)
    }
}

/// Builder pattern for creating specifications
pub struct SortSpecBuilder {
    spec: SortSpec,
}

impl SortSpecBuilder {
    /// Start building a new specification
    pub fn new() -> Self {
        Self {
            spec: SortSpec::default(),
        }
    }

    /// Add a key column
    pub fn key(mut self, column: SortColumn) -> Self {
        self.spec.columns.push(column);
        self
    }

    /// Enable reverse ordering
    pub fn reverse(mut self) -> Self {
        self.spec.reverse = true;
        self
    }

    /// Enable categorical ranking with the current column and order
    pub fn categorical(mut self) -> Self {
        self.spec.use_categorical = true;
        self
    }

    /// Enable categorical ranking on a specific column
    pub fn categorical_column(mut self, name: &str) -> Self {
        self.spec.use_categorical = true;
        self.spec.categorical_column = name.to_string();
        self
    }

    /// Set the categorical priority order
    pub fn categorical_order(mut self, order: Vec<String>) -> Self {
        self.spec.categorical_order = order;
        self
    }

    /// Set the output filename prefix
    pub fn output_prefix(mut self, prefix: &str) -> Self {
        self.spec.output_prefix = prefix.to_string();
        self
    }

    /// Set the text encoding label
    pub fn encoding(mut self, label: &str) -> Self {
        self.spec.encoding = label.to_string();
        self
    }

    /// Build the final specification
    pub fn build(self) -> ReorderResult<SortSpec> {
        self.spec.validate()?;
        Ok(self.spec)
    }
}

impl Default for SortSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = SortSpec::default();
        assert!(spec.columns.is_empty());
        assert!(!spec.reverse);
        assert!(!spec.use_categorical);
        assert_eq!(spec.categorical_column, "language");
        assert_eq!(spec.categorical_order, vec!["EN", "CN"]);
        assert_eq!(spec.output_prefix, "sorted_");
        assert_eq!(spec.encoding, "utf-8");
    }

    #[test]
    fn test_column_name_trimmed() {
        let column = SortColumn::new(" year ", true).expect("Failed to build column");
        assert_eq!(column.name, "year");
        assert!(column.is_date);
    }

    #[test]
    fn test_blank_column_name_rejected() {
        assert!(matches!(
            SortColumn::new("   ", false),
            Err(ReorderError::BlankColumnName)
        ));
    }

    #[test]
    fn test_parse_keydef() {
        let column = SortColumn::parse("title").expect("Failed to parse keydef");
        assert_eq!(column.name, "title");
        assert!(!column.is_date);

        let column = SortColumn::parse("year:date").expect("Failed to parse keydef");
        assert_eq!(column.name, "year");
        assert!(column.is_date);

        let column = SortColumn::parse("a:b").expect("Failed to parse keydef");
        assert_eq!(column.name, "a:b");
        assert!(!column.is_date);

        assert!(SortColumn::parse(":date").is_err());
    }

    #[test]
    fn test_spec_builder() {
        let spec = SortSpecBuilder::new()
            .key(SortColumn::new("year", true).expect("Failed to build column"))
            .key(SortColumn::new("title", false).expect("Failed to build column"))
            .reverse()
            .categorical()
            .build()
            .expect("Failed to build test spec");

        assert_eq!(spec.columns.len(), 2);
        assert!(spec.reverse);
        assert!(spec.use_categorical);
        assert_eq!(spec.key_len(), 3);
    }

    #[test]
    fn test_empty_columns_rejected() {
        assert!(matches!(
            SortSpecBuilder::new().build(),
            Err(ReorderError::EmptySortColumns)
        ));
    }

    #[test]
    fn test_categorical_invariants() {
        let mut spec = SortSpec::from_pairs(&[("title", false)]).expect("Failed to build spec");
        spec.use_categorical = true;
        spec.categorical_column = "  ".to_string();
        assert!(matches!(
            spec.validate(),
            Err(ReorderError::BlankCategoricalColumn)
        ));

        spec.categorical_column = "language".to_string();
        spec.categorical_order.clear();
        assert!(matches!(
            spec.validate(),
            Err(ReorderError::EmptyCategoricalOrder)
        ));
    }

    #[test]
    fn test_unsupported_encoding_rejected() {
        let result = SortSpecBuilder::new()
            .key(SortColumn::new("title", false).expect("Failed to build column"))
            .encoding("no-such-encoding")
            .build();
        assert!(matches!(
            result,
            Err(ReorderError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn test_known_encodings_resolve() {
        for label in ["utf-8", "windows-1252", "latin1", "gbk"] {
            let spec = SortSpec::from_pairs(&[("title", false)])
                .expect("Failed to build spec")
                .with_encoding(label);
            assert!(spec.resolved_encoding().is_ok(), "label {label} rejected");
        }
    }

    #[test]
    fn test_decode_only_encodings_rejected() {
        // UTF-16 can be decoded but not encoded to, and the same encoding
        // serves reading and writing
        let spec = SortSpec::from_pairs(&[("title", false)])
            .expect("Failed to build spec")
            .with_encoding("utf-16le");
        assert!(matches!(
            spec.validate(),
            Err(ReorderError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn test_from_pairs() {
        let spec =
            SortSpec::from_pairs(&[("year", true), ("title", false)]).expect("Failed to build spec");
        assert_eq!(spec.columns.len(), 2);
        assert!(spec.columns[0].is_date);
        assert!(!spec.columns[1].is_date);
        assert!(SortSpec::from_pairs(&[]).is_err());
    }
}
