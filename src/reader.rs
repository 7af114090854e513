//! Table reading: decoding, delimiter detection, header and record parsing

use crate::error::{IoContext, ReorderError, ReorderResult};
use crate::table::{Row, Table};
use encoding_rs::Encoding;
use itertools::Itertools;
use std::fs;
use std::path::Path;

/// Candidate delimiters in priority order; ties go to the earlier candidate
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Sample size for delimiter detection
const SNIFF_SAMPLE_BYTES: usize = 1024;

/// Maximum sample lines scored per candidate
const SNIFF_SAMPLE_LINES: usize = 10;

/// Count the fields of one line under a candidate delimiter
///
/// Counting goes through the csv parser, so a delimiter inside a quoted field
/// does not split it.
fn field_count(line: &str, delimiter: u8) -> usize {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    reader
        .records()
        .next()
        .and_then(|record| record.ok())
        .map(|record| record.len())
        .unwrap_or(0)
}

/// Leading lines of the content, capped by bytes and line count
///
/// When the byte cap cuts a line short, that partial tail line is dropped so
/// it cannot skew the consistency score.
fn sample_lines(content: &str) -> Vec<&str> {
    let mut end = SNIFF_SAMPLE_BYTES.min(content.len());
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let truncated = end < content.len();
    let mut lines: Vec<&str> = content[..end].lines().take(SNIFF_SAMPLE_LINES).collect();
    if truncated && lines.len() > 1 {
        lines.pop();
    }
    lines
}

/// Infer the field delimiter from the leading ~1KB of decoded content
///
/// Each candidate is scored as `consistent_lines * field_count`, where a line
/// is consistent when it yields the same field count as the header line; a
/// candidate is viable only if the header line splits into more than one
/// field. Returns `None` when no candidate is viable.
pub fn sniff_delimiter(content: &str) -> Option<u8> {
    let sample = sample_lines(content);
    if sample.is_empty() {
        return None;
    }

    let mut best: Option<(usize, u8)> = None;
    for &candidate in &DELIMITER_CANDIDATES {
        let header_fields = field_count(sample[0], candidate);
        if header_fields < 2 {
            continue;
        }
        let consistent = sample
            .iter()
            .filter(|line| field_count(line, candidate) == header_fields)
            .count();
        let score = consistent * header_fields;
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Load a delimited file into a [`Table`]
///
/// Decodes with the declared encoding (a byte-order mark is honored and
/// stripped), detects the delimiter, parses the header, and stages the data
/// rows in file order. Records shorter than the header are padded with empty
/// strings; records longer than the header are rejected.
pub fn read(path: &Path, encoding: &'static Encoding) -> ReorderResult<Table> {
    let bytes = fs::read(path).with_path_context(path)?;

    let (content, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ReorderError::encoding_error(path, encoding.name()));
    }
    if content.trim().is_empty() {
        return Err(ReorderError::no_header_row(path));
    }

    let delimiter = sniff_delimiter(&content)
        .ok_or_else(|| ReorderError::delimiter_detection_failed(path))?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(|_| ReorderError::no_header_row(path))?
        .iter()
        .map(|name| name.to_string())
        .collect();

    if let Some(name) = columns.iter().duplicates().next() {
        return Err(ReorderError::duplicate_column(name));
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record_number = (index + 1) as u64;
        let record = record
            .map_err(|err| ReorderError::malformed_row(record_number, &err.to_string()))?;
        if record.len() > columns.len() {
            return Err(ReorderError::malformed_row(
                record_number,
                &format!(
                    "{} fields where the header has {}",
                    record.len(),
                    columns.len()
                ),
            ));
        }
        let mut values: Vec<String> = record.iter().map(|field| field.to_string()).collect();
        values.resize(columns.len(), String::new());
        rows.push(Row::new(values));
    }

    if rows.is_empty() {
        return Err(ReorderError::no_data_rows(path));
    }

    Ok(Table {
        columns,
        rows,
        delimiter,
    })
}
