use std::fmt;

use statrs::statistics::Statistics;

use super::round_to;
use crate::config::ColumnPair;
use crate::data::model::Table;
use crate::error::AnalysisError;

/// Pearson's r between two named columns, rounded to 2 d.p.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub x: String,
    pub y: String,
    pub r: f64,
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Correlation between {} and {} is {:.2}", self.x, self.y, self.r)
    }
}

/// Pearson correlation coefficient of two equal-length sequences,
/// rounded to 2 decimal places.
///
/// `r = Σ(xᵢ - x̄)(yᵢ - ȳ) / ((n - 1) · sₓ · s_y)` with sample standard
/// deviations. Fails on unequal lengths, fewer than two points, or a
/// constant sequence.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, AnalysisError> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(AnalysisError::degenerate(
            "correlation",
            format!("need at least 2 points, got {n}"),
        ));
    }

    // Checked on the values: the single-pass std-dev of a constant float
    // column is rarely exactly zero.
    if is_constant(x) || is_constant(y) {
        return Err(AnalysisError::degenerate(
            "correlation",
            "a constant sequence has zero variance",
        ));
    }

    let x_mean = Statistics::mean(x);
    let y_mean = Statistics::mean(y);
    let x_std = Statistics::std_dev(x);
    let y_std = Statistics::std_dev(y);

    let sum_xy: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    Ok(round_to(sum_xy / ((n - 1) as f64 * x_std * y_std), 2))
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Correlate each named pair of numeric columns, in order.
pub fn correlate_pairs(
    table: &Table,
    pairs: &[ColumnPair],
) -> Result<Vec<Correlation>, AnalysisError> {
    pairs
        .iter()
        .map(|pair| {
            let x = table.numeric(&pair.x)?;
            let y = table.numeric(&pair.y)?;
            let r = pearson(&x, &y)?;
            log::debug!("r({}, {}) = {r}", pair.x, pair.y);
            Ok(Correlation {
                x: pair.x.clone(),
                y: pair.y.clone(),
                r,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnKey, ColumnType};

    /// Reference value from statrs: sample covariance over the product of
    /// sample standard deviations.
    fn reference(x: &[f64], y: &[f64]) -> f64 {
        let cov = Statistics::covariance(x, y);
        cov / (Statistics::std_dev(x) * Statistics::std_dev(y))
    }

    #[test]
    fn self_correlation_is_one() {
        let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        assert_eq!(pearson(&x, &x).unwrap(), 1.0);
    }

    #[test]
    fn perfect_negative() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(pearson(&x, &y).unwrap(), -1.0);
    }

    #[test]
    fn symmetric() {
        let x = [22.0, 38.0, 26.0, 35.0, 54.0, 2.0];
        let y = [7.25, 71.28, 7.92, 53.1, 51.86, 21.08];
        assert_eq!(pearson(&x, &y).unwrap(), pearson(&y, &x).unwrap());
    }

    #[test]
    fn age_against_survival_matches_reference() {
        let age = [22.0, 38.0, 26.0, 35.0];
        let survived = [0.0, 1.0, 1.0, 0.0];
        let r = pearson(&age, &survived).unwrap();
        assert_eq!(r, 0.27);
        assert!((r - reference(&age, &survived)).abs() < 0.005);
    }

    #[test]
    fn constant_sequence_is_degenerate() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 4.0, 4.0];
        assert!(matches!(
            pearson(&x, &y),
            Err(AnalysisError::Degenerate { .. })
        ));
        assert!(matches!(
            pearson(&y, &x),
            Err(AnalysisError::Degenerate { .. })
        ));
    }

    #[test]
    fn constant_float_column_is_degenerate() {
        // None of these constants is exact in binary, so std-dev drifts off zero.
        for (c, n) in [(0.1, 10), (0.7, 7), (0.3, 20), (29.7, 891)] {
            let x: Vec<f64> = (0..n).map(f64::from).collect();
            let y = vec![c; n as usize];
            assert!(
                matches!(pearson(&x, &y), Err(AnalysisError::Degenerate { .. })),
                "{c} x {n}"
            );
        }
    }

    #[test]
    fn too_few_points_is_degenerate() {
        assert!(matches!(
            pearson(&[1.0], &[2.0]),
            Err(AnalysisError::Degenerate { .. })
        ));
    }

    #[test]
    fn length_mismatch_fails_fast() {
        assert!(matches!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(AnalysisError::LengthMismatch { left: 3, right: 2 })
        ));
    }

    #[test]
    fn pairs_are_reported_in_order() {
        let table = Table::from_columns(vec![
            (
                ColumnKey::new("Survived", ColumnType::Integer),
                Column::Integer(vec![0, 1, 1, 0]),
            ),
            (
                ColumnKey::new("Age", ColumnType::Float),
                Column::Float(vec![22.0, 38.0, 26.0, 35.0]),
            ),
            (
                ColumnKey::new("Sex", ColumnType::Text),
                Column::Text(vec!["m".into(), "f".into(), "f".into(), "m".into()]),
            ),
        ])
        .unwrap();

        let pairs = [
            ColumnPair::new("Age", "Survived"),
            ColumnPair::new("Survived", "Survived"),
        ];
        let results = correlate_pairs(&table, &pairs).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].to_string(),
            "Correlation between Age and Survived is 0.27"
        );
        assert_eq!(results[1].r, 1.0);

        let err = correlate_pairs(&table, &[ColumnPair::new("Sex", "Survived")]).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeMismatch { .. }));
    }
}
