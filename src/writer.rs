//! Table writing: serialization, transcoding, atomic publication

use crate::error::{ReorderError, ReorderResult};
use crate::table::Table;
use encoding_rs::Encoding;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize header and rows with the table's delimiter into UTF-8 bytes
fn serialize(table: &Table) -> ReorderResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(table.delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(&table.columns)
        .map_err(|err| ReorderError::internal(&err.to_string()))?;
    for row in &table.rows {
        writer
            .write_record(row.values())
            .map_err(|err| ReorderError::internal(&err.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|err| ReorderError::internal(&err.to_string()))
}

/// First field that cannot be represented in the target encoding
fn first_unencodable<'t>(table: &'t Table, encoding: &'static Encoding) -> Option<&'t str> {
    table
        .columns
        .iter()
        .map(String::as_str)
        .chain(
            table
                .rows
                .iter()
                .flat_map(|row| row.values().iter().map(String::as_str)),
        )
        .find(|value| encoding.encode(value).2)
}

/// Persist a table to `path` in the given encoding
///
/// The whole document is serialized and transcoded in memory first, then
/// published with a rename, so a failed run leaves nothing at `path`. An
/// unmappable character is a typed error, never a silent substitution.
/// Parent directories are created as needed.
pub fn write(path: &Path, table: &Table, encoding: &'static Encoding) -> ReorderResult<()> {
    let bytes = serialize(table)?;
    let text =
        String::from_utf8(bytes).map_err(|err| ReorderError::internal(&err.to_string()))?;

    let (encoded, _, had_errors) = encoding.encode(&text);
    if had_errors {
        let value = first_unencodable(table, encoding).unwrap_or("");
        return Err(ReorderError::unencodable_value(encoding.name(), value));
    }

    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(|err| ReorderError::create_dir_failed(dir, err))?;
    }

    let dir = parent.unwrap_or_else(|| Path::new("."));
    let mut temp =
        NamedTempFile::new_in(dir).map_err(|err| ReorderError::write_failed(path, err))?;
    temp.write_all(&encoded)
        .map_err(|err| ReorderError::write_failed(path, err))?;
    temp.persist(path)
        .map_err(|err| ReorderError::write_failed(path, err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader;
    use crate::table::Row;
    use encoding_rs::{UTF_8, WINDOWS_1252};
    use tempfile::TempDir;

    fn table(delimiter: u8, columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            columns: columns.iter().map(|name| name.to_string()).collect(),
            rows: rows
                .iter()
                .map(|values| Row::new(values.iter().map(|value| value.to_string()).collect()))
                .collect(),
            delimiter,
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("out.csv");
        let original = table(
            b';',
            &["year", "title"],
            &[&["2019", "Beta"], &["2020", "Alpha"]],
        );

        write(&path, &original, UTF_8).expect("Failed to write table");

        let reread = reader::read(&path, UTF_8).expect("Failed to read back");
        assert_eq!(reread.columns, original.columns);
        assert_eq!(reread.rows, original.rows);
        assert_eq!(reread.delimiter, b';');
    }

    #[test]
    fn test_write_quotes_embedded_delimiter() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("quoted.csv");
        let original = table(b',', &["a", "b"], &[&["x, y", "2"]]);

        write(&path, &original, UTF_8).expect("Failed to write table");

        let contents = fs::read_to_string(&path).expect("Failed to read raw output");
        assert!(contents.contains("\"x, y\""));

        let reread = reader::read(&path, UTF_8).expect("Failed to read back");
        assert_eq!(reread.rows[0].get(0), "x, y");
    }

    #[test]
    fn test_write_windows_1252() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("latin.csv");
        let original = table(b',', &["name", "city"], &[&["Ren\u{e9}", "Lyon"]]);

        write(&path, &original, WINDOWS_1252).expect("Failed to write table");

        let bytes = fs::read(&path).expect("Failed to read raw output");
        assert!(bytes.contains(&0xE9));

        let reread = reader::read(&path, WINDOWS_1252).expect("Failed to read back");
        assert_eq!(reread.rows[0].get(0), "Ren\u{e9}");
    }

    #[test]
    fn test_write_unencodable_value_leaves_no_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("strict.csv");
        let original = table(b',', &["name"], &[&["\u{65e5}\u{672c}\u{8a9e}"]]);

        match write(&path, &original, WINDOWS_1252) {
            Err(ReorderError::UnencodableValue { encoding, value }) => {
                assert_eq!(encoding, "windows-1252");
                assert_eq!(value, "\u{65e5}\u{672c}\u{8a9e}");
            }
            other => panic!("expected UnencodableValue, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("deep").join("out.csv");
        let original = table(b',', &["a", "b"], &[&["1", "2"]]);

        write(&path, &original, UTF_8).expect("Failed to write table");
        assert!(path.is_file());
    }
}
