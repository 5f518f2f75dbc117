use std::path::PathBuf;

use eframe::egui;

use crate::error::AnalysisError;
use crate::figure::ScatterFigure;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScatterApp {
    pub state: ViewerState,
}

impl ScatterApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title, group sizes, saved file ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.state);
        });

        // ---- Central panel: scatterplot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &self.state.figure);
        });
    }
}

// ---------------------------------------------------------------------------
// Running a window
// ---------------------------------------------------------------------------

/// Open a window showing `figure` and block until the user closes it.
/// `saved` is the PNG already written for it.
pub fn show_figure(figure: ScatterFigure, saved: PathBuf) -> Result<(), AnalysisError> {
    let state = ViewerState::new(figure, saved);
    let window_title = state.window_title();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    log::info!("Showing {window_title}");
    eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(ScatterApp::new(state)))),
    )
    .map_err(|e| AnalysisError::Render(e.to_string()))
}
