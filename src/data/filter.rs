use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Outcome mask: which rows died, which survived
// ---------------------------------------------------------------------------

/// Row indices split by a binary outcome column (0 = died, 1 = survived).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeGroups {
    pub died: Vec<usize>,
    pub survived: Vec<usize>,
}

impl OutcomeGroups {
    /// Build the mask from the outcome column.
    ///
    /// Any value other than 0 or 1 is a data error; rows are never dropped
    /// silently.
    pub fn from_outcome(column: &str, outcome: &[i64]) -> Result<Self, AnalysisError> {
        let mut groups = OutcomeGroups::default();
        for (row, &value) in outcome.iter().enumerate() {
            match value {
                0 => groups.died.push(row),
                1 => groups.survived.push(row),
                other => {
                    return Err(AnalysisError::InvalidOutcome {
                        column: column.to_string(),
                        row,
                        value: other,
                    })
                }
            }
        }
        Ok(groups)
    }

    /// Split `values` into `(died, survived)` using this mask.
    ///
    /// `values` must be row-aligned with the outcome column.
    pub fn split(&self, values: &[f64]) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
        let rows = self.died.len() + self.survived.len();
        if values.len() != rows {
            return Err(AnalysisError::LengthMismatch {
                left: rows,
                right: values.len(),
            });
        }
        let pick = |indices: &[usize]| -> Vec<f64> { indices.iter().map(|&i| values[i]).collect() };
        Ok((pick(&self.died), pick(&self.survived)))
    }
}
