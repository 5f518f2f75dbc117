//! Off-screen rasterisation of a [`ScatterFigure`] into a PNG.
//!
//! ```text
//!          title
//!                      ● Survived  ✕ Died
//!        ┌───────────────────────────┐
//!   tick ┤   ●     ✕                 │
//!  y     │        ●      ✕           │
//!  label │                           │
//!        └──┬──────┬──────┬──────┬───┘
//!          tick        x label
//! ```

pub mod glyphs;

use std::path::Path;

use eframe::egui::Color32;
use image::{Rgba, RgbaImage};

use crate::color::OutcomeColors;
use crate::error::AnalysisError;
use crate::figure::ScatterFigure;
use glyphs::{ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, text_width};

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 640;

const MARGIN_LEFT: f64 = 100.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 80.0;

const TITLE_SCALE: u32 = 3;
const TEXT_SCALE: u32 = 2;
const TICK_LENGTH: i64 = 6;
const TARGET_TICKS: f64 = 5.0;

const SURVIVED_RADIUS: i64 = 3;
const DIED_RADIUS: i64 = 4;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([40, 40, 40, 255]);
const GRID: Rgba<u8> = Rgba([228, 228, 228, 255]);

// ---------------------------------------------------------------------------
// Data ranges and ticks
// ---------------------------------------------------------------------------

/// Value range shown along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Smallest range holding every finite value, padded by 5 % per side.
    /// A single distinct value is widened around itself; no values at all
    /// give `0..1`.
    fn covering(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return Range { min: 0.0, max: 1.0 };
        }
        let pad = if max > min {
            (max - min) * 0.05
        } else {
            min.abs().max(1.0) * 0.5
        };
        Range {
            min: min - pad,
            max: max + pad,
        }
    }

    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Tick positions on a 1-2-5 step, and the decimals needed to print them.
    fn ticks(&self) -> (Vec<f64>, usize) {
        let raw = (self.max - self.min) / TARGET_TICKS;
        let magnitude = 10f64.powi(raw.log10().floor() as i32);
        let step = [1.0, 2.0, 5.0]
            .into_iter()
            .map(|m| m * magnitude)
            .find(|&s| s >= raw)
            .unwrap_or(10.0 * magnitude);
        let decimals = (-step.log10().floor()).max(0.0) as usize;

        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        ((first..=last).map(|k| k as f64 * step).collect(), decimals)
    }
}

/// Pixel rectangle of the plot area plus the ranges mapped onto it.
#[derive(Debug, Clone, Copy)]
struct Layout {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    x: Range,
    y: Range,
}

impl Layout {
    fn new(figure: &ScatterFigure, width: u32, height: u32) -> Self {
        let points = || figure.survived.iter().chain(&figure.died);
        Layout {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: f64::from(width) - MARGIN_RIGHT,
            bottom: f64::from(height) - MARGIN_BOTTOM,
            x: Range::covering(points().map(|p| p[0])),
            y: Range::covering(points().map(|p| p[1])),
        }
    }

    fn x_pixel(&self, x: f64) -> i64 {
        (self.left + self.x.fraction(x) * (self.right - self.left)).round() as i64
    }

    fn y_pixel(&self, y: f64) -> i64 {
        (self.bottom - self.y.fraction(y) * (self.bottom - self.top)).round() as i64
    }

    /// `None` for points with a missing coordinate.
    fn to_pixel(&self, [x, y]: [f64; 2]) -> Option<(i64, i64)> {
        (x.is_finite() && y.is_finite()).then(|| (self.x_pixel(x), self.y_pixel(y)))
    }
}

// ---------------------------------------------------------------------------
// Canvas – clipped drawing primitives over an RgbaImage
// ---------------------------------------------------------------------------

struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: RgbaImage::from_pixel(width, height, BACKGROUND),
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgba<u8>) {
        for x in x0..=x1 {
            self.put(x, y, color);
        }
    }

    fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgba<u8>) {
        for y in y0..=y1 {
            self.put(x, y, color);
        }
    }

    fn disc(&mut self, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Diagonal cross, two pixels thick.
    fn cross(&mut self, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
        for d in -radius..=radius {
            for thickness in 0..2 {
                self.put(cx + d + thickness, cy + d, color);
                self.put(cx + d + thickness, cy - d, color);
            }
        }
    }

    /// Horizontal text with its top-left corner at `(x, y)`.
    fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgba<u8>) {
        glyph_pixels(text, scale, |gx, gy| {
            self.put(x + gx, y + gy, color);
        });
    }

    /// Text reading bottom to top with its bottom-left corner at `(x, y)`.
    fn text_up(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgba<u8>) {
        glyph_pixels(text, scale, |gx, gy| {
            self.put(x + gy, y - gx, color);
        });
    }
}

/// Calls `plot` with the offset of every lit pixel of `text` laid out
/// left to right.
fn glyph_pixels(text: &str, scale: u32, mut plot: impl FnMut(i64, i64)) {
    let scale = i64::from(scale);
    for (i, c) in text.chars().enumerate() {
        let origin = i as i64 * i64::from(ADVANCE) * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        plot(
                            origin + i64::from(col) * scale + sx,
                            row as i64 * scale + sy,
                        );
                    }
                }
            }
        }
    }
}

fn rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_array())
}

fn text_height(scale: u32) -> i64 {
    i64::from(GLYPH_HEIGHT * scale)
}

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Draw `figure` at `WIDTH`×`HEIGHT`: title, legend, gridded axes with
/// tick labels, survivors as filled green circles and the dead as red
/// crosses.
pub fn render(figure: &ScatterFigure) -> RgbaImage {
    let layout = Layout::new(figure, WIDTH, HEIGHT);
    let colors = OutcomeColors::default();
    let mut canvas = Canvas::new(WIDTH, HEIGHT);

    let (left, top) = (layout.left as i64, layout.top as i64);
    let (right, bottom) = (layout.right as i64, layout.bottom as i64);
    let label_height = text_height(TEXT_SCALE);

    // ---- Grid and tick labels ----
    let (x_ticks, x_decimals) = layout.x.ticks();
    for value in x_ticks {
        let px = layout.x_pixel(value);
        canvas.vline(px, top, bottom, GRID);
        canvas.vline(px, bottom, bottom + TICK_LENGTH, INK);
        let label = format!("{value:.x_decimals$}");
        let width = i64::from(text_width(&label, TEXT_SCALE));
        canvas.text(px - width / 2, bottom + TICK_LENGTH + 4, &label, TEXT_SCALE, INK);
    }

    let (y_ticks, y_decimals) = layout.y.ticks();
    for value in y_ticks {
        let py = layout.y_pixel(value);
        canvas.hline(left, right, py, GRID);
        canvas.hline(left - TICK_LENGTH, left, py, INK);
        let label = format!("{value:.y_decimals$}");
        let width = i64::from(text_width(&label, TEXT_SCALE));
        canvas.text(
            left - TICK_LENGTH - 4 - width,
            py - label_height / 2,
            &label,
            TEXT_SCALE,
            INK,
        );
    }

    // ---- Frame ----
    canvas.hline(left, right, top, INK);
    canvas.hline(left, right, bottom, INK);
    canvas.vline(left, top, bottom, INK);
    canvas.vline(right, top, bottom, INK);

    // ---- Axis labels and title ----
    let x_label_width = i64::from(text_width(&figure.x_label, TEXT_SCALE));
    canvas.text(
        (left + right - x_label_width) / 2,
        i64::from(HEIGHT) - label_height - 16,
        &figure.x_label,
        TEXT_SCALE,
        INK,
    );
    let y_label_width = i64::from(text_width(&figure.y_label, TEXT_SCALE));
    canvas.text_up(16, (top + bottom + y_label_width) / 2, &figure.y_label, TEXT_SCALE, INK);

    let title_width = i64::from(text_width(&figure.title, TITLE_SCALE));
    canvas.text(
        (i64::from(WIDTH) - title_width) / 2,
        14,
        &figure.title,
        TITLE_SCALE,
        INK,
    );

    // ---- Points ----
    let survived = rgba(colors.survived);
    let died = rgba(colors.died);
    for (x, y) in figure.survived.iter().filter_map(|&p| layout.to_pixel(p)) {
        canvas.disc(x, y, SURVIVED_RADIUS, survived);
    }
    for (x, y) in figure.died.iter().filter_map(|&p| layout.to_pixel(p)) {
        canvas.cross(x, y, DIED_RADIUS, died);
    }

    // ---- Legend, right-aligned above the plot area ----
    let legend_y = top - label_height - 10;
    let marker_y = legend_y + label_height / 2;
    let mut cursor = right;
    for (name, is_survived) in [("Died", false), ("Survived", true)] {
        cursor -= i64::from(text_width(name, TEXT_SCALE));
        canvas.text(cursor, legend_y, name, TEXT_SCALE, INK);
        cursor -= 14;
        if is_survived {
            canvas.disc(cursor, marker_y, SURVIVED_RADIUS, survived);
        } else {
            canvas.cross(cursor, marker_y, DIED_RADIUS, died);
        }
        cursor -= 24;
    }

    canvas.image
}

/// Render `figure` and write it to `path` as PNG.
pub fn save_png(figure: &ScatterFigure, path: &Path) -> Result<(), AnalysisError> {
    render(figure)
        .save(path)
        .map_err(|source| AnalysisError::Image {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> ScatterFigure {
        ScatterFigure {
            title: "Survival of Titanic Passengers".into(),
            x_label: "Age".into(),
            y_label: "Fare".into(),
            survived: vec![[38.0, 71.28], [26.0, 7.92]],
            died: vec![[22.0, 7.25], [35.0, 53.1]],
        }
    }

    #[test]
    fn image_has_fixed_size_and_white_background() {
        let image = render(&figure());
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(*image.get_pixel(2, 2), BACKGROUND);
        assert_eq!(*image.get_pixel(WIDTH - 2, HEIGHT - 2), BACKGROUND);
    }

    #[test]
    fn markers_use_outcome_colours() {
        let figure = figure();
        let image = render(&figure);
        let layout = Layout::new(&figure, WIDTH, HEIGHT);
        let colors = OutcomeColors::default();

        for &point in &figure.survived {
            let (x, y) = layout.to_pixel(point).unwrap();
            assert_eq!(*image.get_pixel(x as u32, y as u32), rgba(colors.survived));
        }
        for &point in &figure.died {
            let (x, y) = layout.to_pixel(point).unwrap();
            assert_eq!(*image.get_pixel(x as u32, y as u32), rgba(colors.died));
        }
    }

    #[test]
    fn points_land_inside_the_plot_area() {
        let figure = figure();
        let layout = Layout::new(&figure, WIDTH, HEIGHT);
        for &point in figure.survived.iter().chain(&figure.died) {
            let (x, y) = layout.to_pixel(point).unwrap();
            assert!(x > layout.left as i64 && x < layout.right as i64);
            assert!(y > layout.top as i64 && y < layout.bottom as i64);
        }
    }

    #[test]
    fn title_is_drawn_above_the_plot() {
        let image = render(&figure());
        let title_rows = 14..14 + GLYPH_HEIGHT * TITLE_SCALE;
        let inked = title_rows
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| *image.get_pixel(x, y) == INK)
            .count();
        assert!(inked > 200, "only {inked} ink pixels in the title");
    }

    #[test]
    fn constant_and_empty_axes_still_render() {
        let figure = ScatterFigure {
            title: "t".into(),
            x_label: "Pclass".into(),
            y_label: "Parch".into(),
            survived: vec![[3.0, 0.0], [3.0, 0.0]],
            died: vec![[3.0, f64::NAN]],
        };
        let layout = Layout::new(&figure, WIDTH, HEIGHT);
        assert_eq!(layout.x, Range { min: 1.5, max: 4.5 });
        assert!(layout.to_pixel([3.0, f64::NAN]).is_none());
        assert_eq!(render(&figure).dimensions(), (WIDTH, HEIGHT));

        let empty = ScatterFigure {
            survived: vec![],
            died: vec![],
            ..figure
        };
        assert_eq!(Layout::new(&empty, WIDTH, HEIGHT).y, Range { min: 0.0, max: 1.0 });
        assert_eq!(render(&empty).dimensions(), (WIDTH, HEIGHT));
    }

    #[test]
    fn ticks_follow_round_steps() {
        let (ticks, decimals) = Range { min: -4.0, max: 84.0 }.ticks();
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0]);
        assert_eq!(decimals, 0);

        let (ticks, decimals) = Range { min: -0.05, max: 1.05 }.ticks();
        assert_eq!(ticks.len(), 3);
        assert!((ticks[1] - 0.5).abs() < 1e-12);
        assert!((ticks[2] - 1.0).abs() < 1e-12);
        assert_eq!(decimals, 1);
    }

    #[test]
    fn saved_png_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "titanic-survival-{}-render.png",
            std::process::id()
        ));
        save_png(&figure(), &path).unwrap();

        let written = image::open(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!((written.width(), written.height()), (WIDTH, HEIGHT));
    }

    #[test]
    fn unwritable_path_is_an_image_error() {
        let path = std::env::temp_dir()
            .join("titanic-survival-missing-dir")
            .join("nested")
            .join("x.png");
        assert!(matches!(
            save_png(&figure(), &path),
            Err(AnalysisError::Image { .. })
        ));
    }
}
