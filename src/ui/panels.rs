use eframe::egui::{self, RichText, Ui};

use crate::color::OutcomeColors;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title, group sizes and where the PNG went.
pub fn title_bar(ui: &mut Ui, state: &ViewerState) {
    let figure = &state.figure;
    let colors = OutcomeColors::default();

    ui.horizontal(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());

        ui.separator();

        ui.label(RichText::new(format!("{} survived", figure.survived.len())).color(colors.survived));
        ui.label(RichText::new(format!("{} died", figure.died.len())).color(colors.died));

        ui.separator();

        ui.label(state.status_message());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.label(RichText::new("Close the window to continue").weak());
        });
    });
}
