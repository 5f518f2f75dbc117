use eframe::egui::Ui;
use egui_plot::{Corner, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::OutcomeColors;
use crate::figure::ScatterFigure;

// ---------------------------------------------------------------------------
// Survival scatterplot (central panel)
// ---------------------------------------------------------------------------

/// Render the figure: survivors as filled green circles, the dead as red
/// crosses.
pub fn scatter_plot(ui: &mut Ui, figure: &ScatterFigure) {
    let colors = OutcomeColors::default();

    Plot::new("survival_scatter")
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(figure.x_label.clone())
        .y_axis_label(figure.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let survived: PlotPoints = figure.survived.iter().copied().collect();
            plot_ui.points(
                Points::new(survived)
                    .name("Survived")
                    .color(colors.survived)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.0),
            );

            let died: PlotPoints = figure.died.iter().copied().collect();
            plot_ui.points(
                Points::new(died)
                    .name("Died")
                    .color(colors.died)
                    .shape(MarkerShape::Cross)
                    .radius(4.0),
            );
        });
}
