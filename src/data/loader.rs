use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{Column, ColumnKey, ColumnType, Table};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a comma-separated file into a [`Table`].
///
/// The first line is a header and is skipped: column names and types come
/// from `schema`, which must list the file's columns in order.
pub fn load_table(path: &Path, schema: &[ColumnKey]) -> Result<Table, AnalysisError> {
    let file = File::open(path).map_err(|source| AnalysisError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_from(file, schema, path)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

/// Same as [`load_table`] for any in-memory or streamed source.
pub fn read_table<R: Read>(reader: R, schema: &[ColumnKey]) -> Result<Table, AnalysisError> {
    read_from(reader, schema, Path::new("<input>"))
}

// ---------------------------------------------------------------------------
// CSV → column-major
// ---------------------------------------------------------------------------

fn read_from<R: Read>(
    reader: R,
    schema: &[ColumnKey],
    origin: &Path,
) -> Result<Table, AnalysisError> {
    let csv_err = |source| AnalysisError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    // Flexible so that ragged rows reach our own shape check instead of
    // surfacing as a generic CSV error.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.len() != schema.len() {
        return Err(AnalysisError::Shape {
            line: 1,
            expected: schema.len(),
            actual: headers.len(),
        });
    }
    for (header, key) in headers.iter().zip(schema) {
        if header.trim() != key.name {
            log::warn!(
                "Header '{header}' does not match declared column '{}'; using '{}'",
                key.name,
                key.name
            );
        }
    }

    // Transpose while reading: raw[i] collects the i-th field of every row.
    let mut raw: Vec<Vec<String>> = schema.iter().map(|_| Vec::new()).collect();
    let mut lines: Vec<u64> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != schema.len() {
            return Err(AnalysisError::Shape {
                line,
                expected: schema.len(),
                actual: record.len(),
            });
        }

        for (column, field) in raw.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
        lines.push(line);
    }

    let columns = schema
        .iter()
        .zip(raw)
        .map(|(key, fields)| Ok((key.clone(), convert_column(key, fields, &lines)?)))
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Table::from_columns(columns)
}

/// Convert one column's raw fields to its declared type.
fn convert_column(
    key: &ColumnKey,
    fields: Vec<String>,
    lines: &[u64],
) -> Result<Column, AnalysisError> {
    let fail = |row: usize, value: &str| AnalysisError::Conversion {
        column: key.name.clone(),
        line: lines.get(row).copied().unwrap_or(0),
        value: value.to_string(),
        expected: key.kind,
    };

    let column = match key.kind {
        ColumnType::Integer => Column::Integer(
            fields
                .iter()
                .enumerate()
                .map(|(row, f)| parse_integer(f).ok_or_else(|| fail(row, f)))
                .collect::<Result<_, _>>()?,
        ),
        ColumnType::Float => Column::Float(
            fields
                .iter()
                .enumerate()
                .map(|(row, f)| parse_float(f).ok_or_else(|| fail(row, f)))
                .collect::<Result<_, _>>()?,
        ),
        ColumnType::Text => Column::Text(fields),
    };
    Ok(column)
}

pub fn parse_integer(field: &str) -> Option<i64> {
    field.trim().parse().ok()
}

pub fn parse_float(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}
