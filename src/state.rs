use std::path::PathBuf;

use crate::figure::ScatterFigure;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the window needs, independent of rendering.
pub struct ViewerState {
    pub figure: ScatterFigure,
    /// Where the PNG of this figure was written before the window opened.
    pub saved: PathBuf,
}

impl ViewerState {
    pub fn new(figure: ScatterFigure, saved: PathBuf) -> Self {
        Self { figure, saved }
    }

    pub fn window_title(&self) -> String {
        format!(
            "{} – {} vs {}",
            self.figure.title, self.figure.x_label, self.figure.y_label
        )
    }

    /// One-line status for the title bar.
    pub fn status_message(&self) -> String {
        format!("Saved to {}", self.saved.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> ViewerState {
        let figure = ScatterFigure {
            title: "Survival of Titanic Passengers".into(),
            x_label: "Age".into(),
            y_label: "Fare".into(),
            survived: vec![],
            died: vec![],
        };
        ViewerState::new(figure, PathBuf::from("plots").join("scatter-Age-Fare.png"))
    }

    #[test]
    fn window_title_names_both_axes() {
        assert_eq!(
            viewer().window_title(),
            "Survival of Titanic Passengers – Age vs Fare"
        );
    }

    #[test]
    fn status_points_at_the_saved_file() {
        let message = viewer().status_message();
        assert!(message.starts_with("Saved to "));
        assert!(message.ends_with("scatter-Age-Fare.png"));
    }
}
