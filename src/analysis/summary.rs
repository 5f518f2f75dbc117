use std::fmt;
use std::io::Write;

use statrs::statistics::Statistics;

use super::{most_frequent, round_to};
use crate::data::model::{Column, ColumnKey, Table};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Summary values
// ---------------------------------------------------------------------------

/// Five-number description of a numeric column, each rounded to 1 d.p.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (N - 1 denominator).
    pub stdev: f64,
    /// Most frequent value; first encountered wins a tie.
    pub mode: f64,
}

/// Cardinality and mode of a text column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub unique: usize,
    pub most_common: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryKind {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: SummaryKind,
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics for {}:", self.name)?;
        match &self.kind {
            SummaryKind::Numeric(s) => {
                for (label, value) in [
                    ("min:", s.min),
                    ("max:", s.max),
                    ("mean:", s.mean),
                    ("stdev:", s.stdev),
                    ("mode:", s.mode),
                ] {
                    writeln!(f, "{label:>8} {value:>6.1}")?;
                }
            }
            SummaryKind::Categorical(s) => {
                writeln!(f, "{:>24} {}", "Number of unique values:", s.unique)?;
                writeln!(f, "{:>24} {}", "Most common value:", s.most_common)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Write one summary block per column, in table order.
///
/// Stops at the first column that cannot be summarized.
pub fn summarize<W: Write>(table: &Table, out: &mut W) -> Result<(), AnalysisError> {
    for (key, column) in table.iter() {
        let summary = summarize_column(key, column)?;
        write!(out, "{summary}")?;
    }
    Ok(())
}

/// Summarize a single column, dispatching on its type tag.
pub fn summarize_column(key: &ColumnKey, column: &Column) -> Result<ColumnSummary, AnalysisError> {
    let kind = match column {
        Column::Integer(values) => {
            let widened: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            SummaryKind::Numeric(numeric_summary(&key.name, &widened)?)
        }
        Column::Float(values) => SummaryKind::Numeric(numeric_summary(&key.name, values)?),
        Column::Text(values) => SummaryKind::Categorical(categorical_summary(&key.name, values)?),
    };
    Ok(ColumnSummary {
        name: key.name.clone(),
        kind,
    })
}

pub fn numeric_summary(name: &str, values: &[f64]) -> Result<NumericSummary, AnalysisError> {
    if values.len() < 2 {
        return Err(AnalysisError::degenerate(
            format!("summary of '{name}'"),
            format!(
                "standard deviation needs at least 2 values, got {}",
                values.len()
            ),
        ));
    }

    let mode = most_frequent(values.iter().map(|&v| float_key(v)))
        .map(|i| values[i])
        .ok_or_else(|| AnalysisError::degenerate(format!("mode of '{name}'"), "no values"))?;

    Ok(NumericSummary {
        min: round_to(Statistics::min(values), 1),
        max: round_to(Statistics::max(values), 1),
        mean: round_to(Statistics::mean(values), 1),
        stdev: round_to(Statistics::std_dev(values), 1),
        mode: round_to(mode, 1),
    })
}

pub fn categorical_summary(
    name: &str,
    values: &[String],
) -> Result<CategoricalSummary, AnalysisError> {
    let first = most_frequent(values.iter().map(String::as_str)).ok_or_else(|| {
        AnalysisError::degenerate(format!("summary of '{name}'"), "column is empty")
    })?;
    let unique = values
        .iter()
        .map(String::as_str)
        .collect::<std::collections::HashSet<_>>()
        .len();

    Ok(CategoricalSummary {
        unique,
        most_common: values[first].clone(),
    })
}

/// Bit pattern used to count equal floats; folds -0.0 onto 0.0.
fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0f64.to_bits()
    } else {
        value.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnType;

    #[test]
    fn numeric_one_to_five() {
        let s = numeric_summary("x", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.stdev, 1.6);
        // All equally frequent: first encountered.
        assert_eq!(s.mode, 1.0);
    }

    #[test]
    fn numeric_mode_picks_most_frequent() {
        let s = numeric_summary("Fare", &[7.25, 13.0, 13.0, 71.2833, 7.25, 13.0]).unwrap();
        assert_eq!(s.mode, 13.0);
        assert_eq!(s.min, 7.2);
        assert_eq!(s.max, 71.3);
    }

    #[test]
    fn signed_zeros_count_as_one_value() {
        let s = numeric_summary("x", &[5.0, -0.0, 0.0]).unwrap();
        assert_eq!(s.mode, 0.0);
    }

    #[test]
    fn single_value_is_degenerate() {
        let err = numeric_summary("Age", &[22.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::Degenerate { .. }));
    }

    #[test]
    fn text_counts_and_mode() {
        let values: Vec<String> = ["A", "B", "A", "C"].iter().map(|s| s.to_string()).collect();
        let s = categorical_summary("Embarked", &values).unwrap();
        assert_eq!(s.unique, 3);
        assert_eq!(s.most_common, "A");
    }

    #[test]
    fn empty_text_column_is_degenerate() {
        assert!(matches!(
            categorical_summary("Sex", &[]),
            Err(AnalysisError::Degenerate { .. })
        ));
    }

    #[test]
    fn dispatch_follows_type_tag() {
        let key = ColumnKey::new("Pclass", ColumnType::Integer);
        let summary = summarize_column(&key, &Column::Integer(vec![3, 1, 3])).unwrap();
        assert!(matches!(summary.kind, SummaryKind::Numeric(ref s) if s.mode == 3.0));

        let key = ColumnKey::new("Sex", ColumnType::Text);
        let column = Column::Text(vec!["1".into(), "2".into()]);
        let summary = summarize_column(&key, &column).unwrap();
        assert!(matches!(summary.kind, SummaryKind::Categorical(_)));
    }

    #[test]
    fn blocks_are_tabular() {
        let summary = ColumnSummary {
            name: "Age".into(),
            kind: SummaryKind::Numeric(NumericSummary {
                min: 0.4,
                max: 80.0,
                mean: 29.7,
                stdev: 14.5,
                mode: 24.0,
            }),
        };
        let text = summary.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Statistics for Age:");
        assert_eq!(lines[1], "    min:    0.4");
        assert_eq!(lines[2], "    max:   80.0");
        assert_eq!(lines[4], "  stdev:   14.5");

        let summary = ColumnSummary {
            name: "Sex".into(),
            kind: SummaryKind::Categorical(CategoricalSummary {
                unique: 2,
                most_common: "male".into(),
            }),
        };
        assert_eq!(
            summary.to_string(),
            "Statistics for Sex:\nNumber of unique values: 2\n      Most common value: male\n"
        );
    }

    #[test]
    fn summarize_writes_every_column_in_order() {
        let table = Table::from_columns(vec![
            (
                ColumnKey::new("Survived", ColumnType::Integer),
                Column::Integer(vec![0, 1, 1, 0]),
            ),
            (
                ColumnKey::new("Sex", ColumnType::Text),
                Column::Text(vec!["male".into(), "female".into(), "female".into(), "male".into()]),
            ),
        ])
        .unwrap();

        let mut out = Vec::new();
        summarize(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let survived = text.find("Statistics for Survived:").unwrap();
        let sex = text.find("Statistics for Sex:").unwrap();
        assert!(survived < sex);
        assert!(text.contains("   mean:    0.5"));
        assert!(text.contains("Most common value: male"));
    }
}
