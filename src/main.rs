mod analysis;
mod app;
mod color;
mod config;
mod data;
mod error;
mod figure;
mod render;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};

use analysis::correlation::correlate_pairs;
use analysis::summary::summarize;
use config::AnalysisConfig;
use figure::{PlotOptions, survivor_vis};

fn main() -> Result<()> {
    env_logger::init();

    // Optional JSON config; the built-in Titanic run otherwise.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AnalysisConfig::from_path(&path)?,
        None => {
            let config = AnalysisConfig::titanic();
            config.validate()?;
            config
        }
    };

    run(&config)
}

fn run(config: &AnalysisConfig) -> Result<()> {
    log::info!("Loading {}", config.dataset.display());
    let table = data::loader::load_table(&config.dataset, &config.columns)
        .with_context(|| format!("loading {}", config.dataset.display()))?;

    println!("\nSummaries");
    let stdout = std::io::stdout();
    summarize(&table, &mut stdout.lock()).context("summarizing columns")?;

    println!("\nCorrelations");
    for correlation in correlate_pairs(&table, &config.correlations).context("correlating")? {
        println!("{correlation}");
    }

    let options = PlotOptions::from(config);
    std::fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("creating {}", options.output_dir.display()))?;
    for pair in &config.scatterplots {
        survivor_vis(&table, pair, &options)
            .with_context(|| format!("plotting {} against {}", pair.x, pair.y))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_load_is_returned_with_context() {
        let mut config = AnalysisConfig::titanic();
        config.dataset = std::env::temp_dir().join("titanic-survival-absent.csv");
        config.interactive = false;

        let err = run(&config).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.starts_with("loading "));
        assert!(chain.contains("titanic-survival-absent.csv"));
        assert!(matches!(
            err.downcast_ref::<error::AnalysisError>(),
            Some(error::AnalysisError::File { .. })
        ));
    }
}
