use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Outcome colours
// ---------------------------------------------------------------------------

const SURVIVED_HUE: f32 = 120.0;
const DIED_HUE: f32 = 0.0;

/// Marker colours for the two outcome groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeColors {
    pub survived: Color32,
    pub died: Color32,
}

impl Default for OutcomeColors {
    fn default() -> Self {
        OutcomeColors {
            survived: hue_to_color(SURVIVED_HUE),
            died: hue_to_color(DIED_HUE),
        }
    }
}

/// Saturated, mid-lightness colour for `hue` in degrees.
pub fn hue_to_color(hue: f32) -> Color32 {
    let hsl: Hsl = Hsl::new(hue, 0.75, 0.45);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
