use std::path::PathBuf;

use crate::app;
use crate::render;
use crate::config::{AnalysisConfig, ColumnPair};
use crate::data::filter::OutcomeGroups;
use crate::data::model::Table;
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// ScatterFigure – what gets drawn, independent of any window
// ---------------------------------------------------------------------------

/// A two-group scatterplot of one column against another.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Points for rows whose outcome is 1.
    pub survived: Vec<[f64; 2]>,
    /// Points for rows whose outcome is 0.
    pub died: Vec<[f64; 2]>,
}

impl ScatterFigure {
    /// Look up `pair` and the outcome column by name and split the points
    /// into survived / died.
    pub fn from_table(
        table: &Table,
        pair: &ColumnPair,
        outcome: &str,
        title: &str,
    ) -> Result<Self, AnalysisError> {
        let outcome_values = table.integers(outcome)?;
        let x = table.numeric(&pair.x)?;
        let y = table.numeric(&pair.y)?;

        let groups = OutcomeGroups::from_outcome(outcome, outcome_values)?;
        let (died_x, survived_x) = groups.split(&x)?;
        let (died_y, survived_y) = groups.split(&y)?;

        log::debug!(
            "{} vs {}: {} survived, {} died",
            pair.x,
            pair.y,
            survived_x.len(),
            died_x.len()
        );

        Ok(ScatterFigure {
            title: title.to_string(),
            x_label: pair.x.clone(),
            y_label: pair.y.clone(),
            survived: zip_points(&survived_x, &survived_y),
            died: zip_points(&died_x, &died_y),
        })
    }

    /// `scatter-<x>-<y>.png`, with characters unsafe in file names replaced.
    pub fn file_name(&self) -> String {
        format!(
            "scatter-{}-{}.png",
            file_safe(&self.x_label),
            file_safe(&self.y_label)
        )
    }
}

fn zip_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y).map(|(&xi, &yi)| [xi, yi]).collect()
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Visualizer entry-point
// ---------------------------------------------------------------------------

/// Settings shared by every scatterplot of a run.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub outcome: String,
    pub title: String,
    pub output_dir: PathBuf,
    pub interactive: bool,
}

impl From<&AnalysisConfig> for PlotOptions {
    fn from(config: &AnalysisConfig) -> Self {
        PlotOptions {
            outcome: config.outcome.clone(),
            title: config.title.clone(),
            output_dir: config.output_dir.clone(),
            interactive: config.interactive,
        }
    }
}

/// Build the survival scatterplot for `pair` and save it as PNG in the
/// output directory. When interactive, then show it and block until the
/// window is closed. No window is opened otherwise.
pub fn survivor_vis(
    table: &Table,
    pair: &ColumnPair,
    options: &PlotOptions,
) -> Result<ScatterFigure, AnalysisError> {
    let figure = ScatterFigure::from_table(table, pair, &options.outcome, &options.title)?;
    let output = options.output_dir.join(figure.file_name());

    render::save_png(&figure, &output)?;
    log::info!("Saved {}", output.display());

    if options.interactive {
        app::show_figure(figure.clone(), output)?;
    }
    Ok(figure)
}
