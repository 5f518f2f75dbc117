use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// ColumnType / ColumnKey – how a column is identified
// ---------------------------------------------------------------------------

/// The scalar type a column is declared to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[serde(alias = "int")]
    Integer,
    Float,
    #[serde(alias = "str", alias = "string")]
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// Name plus declared type. Used as the table's lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct ColumnKey {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl ColumnKey {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        ColumnKey {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered column declarations matching the file's column order.
pub type Schema = Vec<ColumnKey>;

// ---------------------------------------------------------------------------
// Column – one typed sequence of values
// ---------------------------------------------------------------------------

/// A column's values, tagged with their type at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Integer(_) => ColumnType::Integer,
            Column::Float(_) => ColumnType::Float,
            Column::Text(_) => ColumnType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Integer(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen a numeric column to `f64`. `None` for text.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Column::Integer(v) => Some(v.iter().map(|&i| i as f64).collect()),
            Column::Float(v) => Some(v.clone()),
            Column::Text(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset, column-major
// ---------------------------------------------------------------------------

/// Column-oriented dataset. Every column has `row_count` entries and row `i`
/// of one column belongs with row `i` of every other.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(ColumnKey, Column)>,
    index: BTreeMap<ColumnKey, usize>,
    row_count: usize,
}

impl Table {
    /// Assemble a table, checking key uniqueness, type tags and lengths.
    pub fn from_columns(columns: Vec<(ColumnKey, Column)>) -> Result<Self, AnalysisError> {
        let row_count = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut index = BTreeMap::new();

        for (i, (key, column)) in columns.iter().enumerate() {
            // Names alone must be unique: the plot lookup ignores types.
            if columns[..i].iter().any(|(k, _)| k.name == key.name) {
                return Err(AnalysisError::DuplicateColumn {
                    name: key.name.clone(),
                });
            }
            index.insert(key.clone(), i);
            if column.column_type() != key.kind {
                return Err(AnalysisError::TypeMismatch {
                    column: key.name.clone(),
                    expected: type_label(key.kind),
                    actual: column.column_type(),
                });
            }
            if column.len() != row_count {
                return Err(AnalysisError::LengthMismatch {
                    left: row_count,
                    right: column.len(),
                });
            }
        }

        Ok(Table {
            columns,
            index,
            row_count,
        })
    }

    /// Number of rows (N).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.columns.iter().map(|(k, _)| k)
    }

    /// Columns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, &Column)> {
        self.columns.iter().map(|(k, c)| (k, c))
    }

    /// Exact lookup by name and type.
    pub fn get(&self, key: &ColumnKey) -> Option<&Column> {
        self.index.get(key).map(|&i| &self.columns[i].1)
    }

    /// Lookup by name only, ignoring the declared type.
    pub fn column_by_name(&self, name: &str) -> Result<(&ColumnKey, &Column), AnalysisError> {
        self.columns
            .iter()
            .find(|(k, _)| k.name == name)
            .map(|(k, c)| (k, c))
            .ok_or_else(|| AnalysisError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// A numeric column widened to `f64`.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, AnalysisError> {
        let (key, column) = self.column_by_name(name)?;
        column.to_f64().ok_or_else(|| AnalysisError::TypeMismatch {
            column: key.name.clone(),
            expected: "numeric",
            actual: key.kind,
        })
    }

    /// An integer column's raw values.
    pub fn integers(&self, name: &str) -> Result<&[i64], AnalysisError> {
        match self.column_by_name(name)? {
            (_, Column::Integer(values)) => Ok(values.as_slice()),
            (key, _) => Err(AnalysisError::TypeMismatch {
                column: key.name.clone(),
                expected: "integer",
                actual: key.kind,
            }),
        }
    }
}

fn type_label(kind: ColumnType) -> &'static str {
    match kind {
        ColumnType::Integer => "integer",
        ColumnType::Float => "float",
        ColumnType::Text => "text",
    }
}
