use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::{ColumnKey, ColumnType, Schema};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Two column names: the x and y of a correlation or scatterplot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnPair {
    pub x: String,
    pub y: String,
}

impl ColumnPair {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        ColumnPair {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// Everything the driver needs: which file, its schema, and which column
/// pairs to correlate and plot.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub dataset: PathBuf,
    pub columns: Schema,
    #[serde(default = "default_outcome")]
    pub outcome: String,
    #[serde(default)]
    pub correlations: Vec<ColumnPair>,
    #[serde(default)]
    pub scatterplots: Vec<ColumnPair>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Show each saved plot in a window and wait for the user to close it.
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_outcome() -> String {
    "Survived".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_interactive() -> bool {
    true
}

fn default_title() -> String {
    "Survival of Titanic Passengers".to_string()
}

impl AnalysisConfig {
    /// The cleaned Titanic dataset with its fixed correlations and plots.
    pub fn titanic() -> Self {
        use ColumnType::{Float, Integer, Text};

        let columns = [
            ("PassengerId", Integer),
            ("Survived", Integer),
            ("Pclass", Integer),
            ("Sex", Text),
            ("Age", Float),
            ("SibSp", Integer),
            ("Parch", Integer),
            ("Fare", Float),
            ("Embarked", Text),
            ("FamilySize", Integer),
            ("age_group", Text),
        ]
        .into_iter()
        .map(|(name, kind)| ColumnKey::new(name, kind))
        .collect();

        AnalysisConfig {
            dataset: PathBuf::from("Titanic-clean.csv"),
            columns,
            outcome: default_outcome(),
            correlations: vec![
                ColumnPair::new("Age", "Survived"),
                ColumnPair::new("Fare", "Survived"),
                ColumnPair::new("FamilySize", "Survived"),
            ],
            scatterplots: vec![
                ColumnPair::new("Age", "Fare"),
                ColumnPair::new("Age", "Pclass"),
                ColumnPair::new("Age", "Parch"),
            ],
            output_dir: default_output_dir(),
            interactive: default_interactive(),
            title: default_title(),
        }
    }

    /// Read a JSON configuration. A relative `dataset` path is resolved
    /// against the config file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: AnalysisConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        if config.dataset.is_relative() {
            if let Some(dir) = path.parent() {
                config.dataset = dir.join(&config.dataset);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that names are unique and every pair refers to a declared
    /// numeric column. With scatterplots, the outcome must be an integer column.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (i, key) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|k| k.name == key.name) {
                return Err(AnalysisError::DuplicateColumn {
                    name: key.name.clone(),
                });
            }
        }

        for pair in self.correlations.iter().chain(&self.scatterplots) {
            for name in [&pair.x, &pair.y] {
                let key = self.declared(name)?;
                if !key.kind.is_numeric() {
                    return Err(AnalysisError::TypeMismatch {
                        column: key.name.clone(),
                        expected: "numeric",
                        actual: key.kind,
                    });
                }
            }
        }

        if !self.scatterplots.is_empty() {
            let key = self.declared(&self.outcome)?;
            if key.kind != ColumnType::Integer {
                return Err(AnalysisError::TypeMismatch {
                    column: key.name.clone(),
                    expected: "integer",
                    actual: key.kind,
                });
            }
        }
        Ok(())
    }

    fn declared(&self, name: &str) -> Result<&ColumnKey, AnalysisError> {
        self.columns
            .iter()
            .find(|k| k.name == name)
            .ok_or_else(|| AnalysisError::ColumnNotFound {
                name: name.to_string(),
            })
    }
}
