use indexmap::IndexMap;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::chart::glyphs::{self, ADVANCE_COLS, GLYPH_COLS};
use crate::core::constants::{chart, palette, palette::Rgb};
use crate::core::error::{ReportError, Result};

/// Two-tier bar coloring: the sign of the value decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTone {
    Positive,
    Negative,
}

impl BarTone {
    pub fn fill(self) -> Rgb {
        match self {
            BarTone::Positive => palette::POSITIVE,
            BarTone::Negative => palette::NEGATIVE,
        }
    }

    pub fn border(self) -> Rgb {
        match self {
            BarTone::Positive => palette::POSITIVE_DARK,
            BarTone::Negative => palette::NEGATIVE_DARK,
        }
    }
}

/// Classify a correlation for the chart. Zero counts as positive.
pub fn bar_tone(value: f64) -> BarTone {
    if value >= 0.0 {
        BarTone::Positive
    } else {
        BarTone::Negative
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A label anchored at `x` with its baseline at `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub px: f32,
    pub bold: bool,
    pub align: Align,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f32,
    pub label: Label,
}

/// Geometry of a single bar. `y` is the top edge, so negative bars start at the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub metric: String,
    pub value: f64,
    pub tone: BarTone,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub value_label: Label,
    pub metric_label: Label,
}

impl BarGeometry {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Everything the painter draws, computed without touching a pixmap.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub gridlines: Vec<GridLine>,
    pub bars: Vec<BarGeometry>,
}

impl ChartLayout {
    /// Lay out one bar per metric in map order.
    ///
    /// Heights are `|value| * PLOT_HEIGHT` with no clamping, so values beyond
    /// the nominal domain run past the plot band.
    pub fn plan(correlations: &IndexMap<String, f64>) -> Self {
        let spacing = chart::PLOT_HEIGHT / (chart::GRID_LINES - 1) as f32;
        let gridlines = chart::AXIS_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let y = chart::PLOT_TOP + spacing * i as f32;
                GridLine {
                    y,
                    label: Label {
                        text: (*label).to_string(),
                        x: chart::AXIS_LABEL_RIGHT,
                        y: y + chart::AXIS_FONT_PX / 2.0,
                        px: chart::AXIS_FONT_PX,
                        bold: false,
                        align: Align::Right,
                        color: palette::MUTED,
                    },
                }
            })
            .collect();

        let bars = correlations
            .iter()
            .enumerate()
            .map(|(index, (metric, &value))| {
                let x = chart::FIRST_BAR_X + index as f32 * chart::BAR_PITCH;
                let height = value.abs() as f32 * chart::PLOT_HEIGHT;
                let tone = bar_tone(value);
                let y = match tone {
                    BarTone::Positive => chart::BASELINE_Y - height,
                    BarTone::Negative => chart::BASELINE_Y,
                };
                let center = x + chart::BAR_WIDTH / 2.0;

                BarGeometry {
                    metric: metric.clone(),
                    value,
                    tone,
                    x,
                    y,
                    width: chart::BAR_WIDTH,
                    height,
                    value_label: Label {
                        text: format!("{value:.3}"),
                        x: center,
                        y: y - chart::VALUE_LABEL_GAP,
                        px: chart::VALUE_FONT_PX,
                        bold: true,
                        align: Align::Center,
                        color: palette::INK,
                    },
                    metric_label: Label {
                        text: metric.to_uppercase(),
                        x: center,
                        y: chart::BASELINE_Y + chart::METRIC_LABEL_OFFSET,
                        px: chart::METRIC_FONT_PX,
                        bold: false,
                        align: Align::Center,
                        color: palette::INK,
                    },
                }
            })
            .collect();

        Self {
            width: chart::WIDTH,
            height: chart::HEIGHT,
            gridlines,
            bars,
        }
    }
}

/// Encoded chart image ready to be embedded in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Turns a correlation map into a PNG bar chart.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartRasterizer;

impl ChartRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Render the chart for `correlations`. Identical input yields identical bytes.
    pub fn render(&self, correlations: &IndexMap<String, f64>) -> Result<RasterImage> {
        let layout = ChartLayout::plan(correlations);
        self.paint(&layout)
    }

    /// Paint a precomputed layout and encode it as PNG.
    pub fn paint(&self, layout: &ChartLayout) -> Result<RasterImage> {
        let mut pixmap = Pixmap::new(layout.width, layout.height).ok_or_else(|| {
            ReportError::Render(format!(
                "cannot allocate a {}x{} canvas",
                layout.width, layout.height
            ))
        })?;
        pixmap.fill(Color::WHITE);

        for line in &layout.gridlines {
            stroke_line(
                &mut pixmap,
                (chart::GRID_LEFT, line.y),
                (chart::GRID_RIGHT, line.y),
                palette::BORDER,
                1.0,
            );
        }

        for bar in &layout.bars {
            paint_bar(&mut pixmap, bar);
            draw_label(&mut pixmap, &bar.value_label);
            draw_label(&mut pixmap, &bar.metric_label);
        }

        for line in &layout.gridlines {
            draw_label(&mut pixmap, &line.label);
        }

        let png = pixmap
            .encode_png()
            .map_err(|e| ReportError::Render(format!("PNG encoding failed: {e}")))?;

        Ok(RasterImage {
            width: layout.width,
            height: layout.height,
            png,
        })
    }
}

fn solid(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.0, color.1, color.2, 255);
    paint.anti_alias = true;
    paint
}

fn stroke_line(pixmap: &mut Pixmap, from: (f32, f32), to: (f32, f32), color: Rgb, width: f32) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }
}

fn paint_bar(pixmap: &mut Pixmap, bar: &BarGeometry) {
    let stroke = Stroke {
        width: chart::BAR_BORDER,
        ..Stroke::default()
    };

    match Rect::from_xywh(bar.x, bar.y, bar.width, bar.height) {
        Some(rect) if bar.height > 0.0 => {
            let outline = PathBuilder::from_rect(rect);
            pixmap.fill_path(
                &outline,
                &solid(bar.tone.fill()),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
            pixmap.stroke_path(
                &outline,
                &solid(bar.tone.border()),
                &stroke,
                Transform::identity(),
                None,
            );
        }
        // a zero value collapses to its outline
        _ => stroke_line(
            pixmap,
            (bar.x, bar.y),
            (bar.x + bar.width, bar.y),
            bar.tone.border(),
            chart::BAR_BORDER,
        ),
    }
}

fn draw_label(pixmap: &mut Pixmap, label: &Label) {
    let cell = glyphs::cell_size(label.px);
    let width = glyphs::text_width(&label.text, label.px);
    let left = match label.align {
        Align::Left => label.x,
        Align::Center => label.x - width / 2.0,
        Align::Right => label.x - width,
    };
    let top = label.y - label.px;
    // faux bold: widen every stroke by half a cell
    let dot_width = if label.bold { cell * 1.5 } else { cell };
    let mut paint = solid(label.color);
    paint.anti_alias = false;

    for (index, ch) in label.text.chars().enumerate() {
        let Some(rows) = glyphs::glyph_rows(ch) else {
            continue;
        };
        let origin = left + (index * ADVANCE_COLS) as f32 * cell;
        for (row, pattern) in rows.iter().enumerate() {
            for (col, pixel) in pattern.chars().take(GLYPH_COLS).enumerate() {
                if pixel == ' ' {
                    continue;
                }
                if let Some(dot) = snap_dot(
                    origin + col as f32 * cell,
                    top + row as f32 * cell,
                    dot_width,
                    cell,
                ) {
                    pixmap.fill_rect(dot, &paint, Transform::identity(), None);
                }
            }
        }
    }
}

/// Glyph dot aligned to whole pixels, at least one pixel on each side.
fn snap_dot(x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
    let left = x.round();
    let top = y.round();
    let right = (x + width).round().max(left + 1.0);
    let bottom = (y + height).round().max(top + 1.0);
    Rect::from_ltrb(left, top, right, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    fn pixel(image: &RasterImage, x: u32, y: u32) -> (u8, u8, u8) {
        let pixmap = Pixmap::decode_png(&image.png).unwrap();
        let p = pixmap.pixel(x, y).unwrap();
        (p.red(), p.green(), p.blue())
    }

    #[test]
    fn test_bar_tone_two_tiers() {
        assert_eq!(bar_tone(0.0), BarTone::Positive);
        assert_eq!(bar_tone(0.3), BarTone::Positive);
        assert_eq!(bar_tone(-0.0001), BarTone::Negative);
        assert_eq!(BarTone::Positive.fill(), (16, 185, 129));
        assert_eq!(BarTone::Negative.fill(), (220, 38, 38));
    }

    #[test]
    fn test_plan_one_bar_per_metric_in_order() {
        let layout = ChartLayout::plan(&map(&[("sentiment", 0.6), ("volume", -0.4), ("kw", 0.1)]));
        let metrics: Vec<&str> = layout.bars.iter().map(|b| b.metric.as_str()).collect();
        assert_eq!(metrics, vec!["sentiment", "volume", "kw"]);
        let xs: Vec<f32> = layout.bars.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![80.0, 260.0, 440.0]);
        let labels: Vec<&str> = layout
            .bars
            .iter()
            .map(|b| b.metric_label.text.as_str())
            .collect();
        assert_eq!(labels, vec!["SENTIMENT", "VOLUME", "KW"]);
    }

    #[test]
    fn test_plan_bar_direction() {
        let layout = ChartLayout::plan(&map(&[("up", 0.5), ("down", -0.25)]));
        let up = &layout.bars[0];
        assert_eq!(up.height, 100.0);
        assert_eq!(up.y, 150.0);
        assert_eq!(up.bottom(), 250.0);

        let down = &layout.bars[1];
        assert_eq!(down.height, 50.0);
        assert_eq!(down.y, 250.0);
        assert_eq!(down.value_label.y, 240.0);
    }

    #[test]
    fn test_plan_value_labels_three_decimals() {
        let layout = ChartLayout::plan(&map(&[("a", 0.5), ("b", -0.12345)]));
        assert_eq!(layout.bars[0].value_label.text, "0.500");
        assert_eq!(layout.bars[1].value_label.text, "-0.123");
    }

    #[test]
    fn test_plan_does_not_clamp() {
        let layout = ChartLayout::plan(&map(&[("big", 1.5), ("low", -1.2)]));
        assert_eq!(layout.bars[0].height, 300.0);
        assert!(layout.bars[0].y < chart::PLOT_TOP);
        assert!(layout.bars[1].bottom() > chart::BASELINE_Y + chart::PLOT_HEIGHT / 10.0);
    }

    #[test]
    fn test_plan_gridlines() {
        let layout = ChartLayout::plan(&IndexMap::new());
        let ys: Vec<f32> = layout.gridlines.iter().map(|g| g.y).collect();
        assert_eq!(ys, vec![50.0, 100.0, 150.0, 200.0, 250.0]);
        let labels: Vec<&str> = layout.gridlines.iter().map(|g| g.label.text.as_str()).collect();
        assert_eq!(labels, vec!["1.0", "0.5", "0.0", "-0.5", "-1.0"]);
        assert!(layout.bars.is_empty());
    }

    #[test]
    fn test_snap_dot_whole_pixels() {
        let dot = snap_dot(12.4, 7.6, 1.4, 1.4).expect("dot");
        assert_eq!((dot.left(), dot.top(), dot.right(), dot.bottom()), (12.0, 8.0, 14.0, 9.0));

        // a sliver still covers one pixel
        let sliver = snap_dot(3.2, 3.2, 0.2, 0.2).expect("dot");
        assert_eq!((sliver.width(), sliver.height()), (1.0, 1.0));
    }

    #[test]
    fn test_render_every_glyph_at_every_label_size() {
        let text = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-+.,_/:%()<>ÁÉÍÓÚÑ";
        for (px, bold) in [
            (chart::AXIS_FONT_PX, false),
            (chart::METRIC_FONT_PX, false),
            (chart::VALUE_FONT_PX, true),
        ] {
            let mut pixmap = Pixmap::new(800, 40).expect("canvas");
            let label = Label {
                text: text.to_string(),
                x: 3.3,
                y: 20.7,
                px,
                bold,
                align: Align::Left,
                color: palette::INK,
            };
            draw_label(&mut pixmap, &label);
            let inked = pixmap
                .pixels()
                .iter()
                .filter(|p| p.red() == palette::INK.0 && p.alpha() == 255)
                .count();
            assert!(inked > 0, "nothing drawn at {px}px");
        }
    }

    #[test]
    fn test_render_tiny_and_fractional_bars() {
        let image = ChartRasterizer::new()
            .render(&map(&[("a", 0.0013), ("b", -0.0021), ("c", 0.333), ("d", 0.0)]))
            .expect("renders");
        assert_eq!((image.width, image.height), (800, 300));
    }

    #[test]
    fn test_render_dimensions_and_background() {
        let image = ChartRasterizer::new().render(&IndexMap::new()).unwrap();
        assert_eq!((image.width, image.height), (800, 300));
        assert_eq!(&image.png[1..4], b"PNG");
        assert_eq!(pixel(&image, 400, 20), (255, 255, 255));
    }

    #[test]
    fn test_render_bar_colors() {
        let image = ChartRasterizer::new()
            .render(&map(&[("up", 0.8), ("down", -0.2)]))
            .unwrap();
        // inside the positive bar
        assert_eq!(pixel(&image, 130, 200), palette::POSITIVE);
        // inside the negative bar, below the metric label
        assert_eq!(pixel(&image, 265, 285), palette::NEGATIVE);
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = map(&[("sentiment", 0.42), ("volume", -0.77)]);
        let first = ChartRasterizer::new().render(&data).unwrap();
        let second = ChartRasterizer::new().render(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_off_canvas_values_does_not_fail() {
        let data = map(&[("a", 5.0), ("b", -5.0), ("c", 0.1), ("d", 0.2), ("e", 0.3)]);
        assert!(ChartRasterizer::new().render(&data).is_ok());
    }

    #[test]
    fn test_render_zero_value() {
        let image = ChartRasterizer::new().render(&map(&[("flat", 0.0)])).unwrap();
        let (r, g, b) = pixel(&image, 130, 250);
        assert_ne!((r, g, b), palette::WHITE);
        assert!(g > r && g > b);
    }
}
