//! Visualisation: accumulator charts and detected-shape overlays.
//!
//! Charts are drawn with plotters into an in-memory RGB buffer. Text needs a
//! TrueType font registered with plotters; without one the chart keeps its
//! layout, heat cells and colorbar but drops the title, ticks and axis labels.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::grid::{AccumulatorGrid, Grid};
use crate::hough::LineSpace;
use crate::io::{OutputError, normalize_u8};
use crate::pipeline::{CircleDetection, LineDetection};

const OVERLAY_RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Default accumulator chart size in pixels.
pub const CHART_SIZE: (u32, u32) = (800, 600);
const COLORBAR_WIDTH: i32 = 90;
const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_READY: AtomicBool = AtomicBool::new(false);
static FONT_SEARCH: Once = Once::new();

/// Registers a TrueType/OpenType file as the chart font.
pub fn register_chart_font(path: &Path) -> Result<(), OutputError> {
    let bytes: &'static [u8] = Box::leak(fs::read(path)?.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| OutputError::Render(format!("not a usable font: {}", path.display())))?;
    FONT_READY.store(true, Ordering::Release);
    log::debug!("chart font {}", path.display());
    Ok(())
}

/// True once a chart font is registered; tries well-known system fonts on first call.
pub fn chart_font_ready() -> bool {
    FONT_SEARCH.call_once(|| {
        if FONT_READY.load(Ordering::Acquire) {
            return;
        }
        let found = SYSTEM_FONTS
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .any(|p| register_chart_font(p).is_ok());
        if !found {
            log::warn!("no chart font found, accumulator charts are drawn without text");
        }
    });
    FONT_READY.load(Ordering::Acquire)
}

/// "hot" colormap: black → red → yellow → white.
fn hot(t: f64) -> RGBColor {
    const R_END: f64 = 0.365079;
    const G_END: f64 = 0.746032;
    let t = t.clamp(0.0, 1.0);
    let r = (t / R_END).min(1.0);
    let g = ((t - R_END) / (G_END - R_END)).clamp(0.0, 1.0);
    let b = ((t - G_END) / (1.0 - G_END)).clamp(0.0, 1.0);
    RGBColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn render_err<E: std::fmt::Display>(e: E) -> OutputError {
    OutputError::Render(e.to_string())
}

/// Title, axis captions and data extents of an accumulator chart.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapAxes {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    /// Value at the left and right edges.
    pub x_range: (f64, f64),
    /// Value at the bottom and top edges; grid row 0 is at the bottom.
    pub y_range: (f64, f64),
}

impl HeatmapAxes {
    /// Theta in degrees across, rho in pixels upwards.
    pub fn lines(space: &LineSpace) -> Self {
        let thetas = space.theta_axis();
        let rhos = space.rho_axis();
        let span = |axis: &[f64]| (axis[0], axis[axis.len() - 1]);
        let (t0, t1) = span(thetas);
        Self {
            title: "Acumulador de Hough (rectas)".to_string(),
            x_desc: "θ (grados)".to_string(),
            y_desc: "ρ (pixeles)".to_string(),
            x_range: (t0.to_degrees(), t1.to_degrees()),
            y_range: span(rhos),
        }
    }

    /// Centre column `a` across, centre row `b` upwards, in pixels.
    pub fn circles(acc: &AccumulatorGrid) -> Self {
        Self {
            title: "Acumulador de Hough (circunferencias)".to_string(),
            x_desc: "a (pixeles)".to_string(),
            y_desc: "b (pixeles)".to_string(),
            x_range: (0.0, acc.width() as f64),
            y_range: (0.0, acc.height() as f64),
        }
    }
}

fn non_degenerate((lo, hi): (f64, f64)) -> std::ops::Range<f64> {
    if hi > lo { lo..hi } else { lo..lo + 1.0 }
}

/// Fills `area` with the normalised cells, nearest-neighbour, row 0 at the bottom.
fn paint_cells(area: &DrawingArea<BitMapBackend<'_>, Shift>, norm: &Grid<u8>) -> Result<(), OutputError> {
    let (pw, ph) = area.dim_in_pixel();
    if norm.is_empty() || pw == 0 || ph == 0 {
        return Ok(());
    }
    let (cols, rows) = (norm.width(), norm.height());
    let (pw, ph) = (pw as usize, ph as usize);
    for py in 0..ph {
        let row = (ph - 1 - py) * rows / ph;
        for px in 0..pw {
            let v = norm.get(px * cols / pw, row);
            area.draw_pixel((px as i32, py as i32), &hot(v as f64 / 255.0))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

/// Renders the accumulator as a heatmap chart with a colorbar.
///
/// Title, tick labels and axis captions are drawn when [`chart_font_ready`].
pub fn render_accumulator_chart(
    acc: &AccumulatorGrid,
    axes: &HeatmapAxes,
    size: (u32, u32),
) -> Result<RgbImage, OutputError> {
    draw_chart(acc, axes, size, chart_font_ready())
}

fn draw_chart(acc: &AccumulatorGrid, axes: &HeatmapAxes, size: (u32, u32), with_text: bool) -> Result<RgbImage, OutputError> {
    let (w, h) = size;
    let pixels = (w as usize)
        .checked_mul(h as usize)
        .ok_or_else(|| OutputError::Render(format!("chart size {w}x{h} overflows")))?;
    if (w as i32) <= COLORBAR_WIDTH || h == 0 {
        return Err(OutputError::Render(format!("chart size {w}x{h} is too small")));
    }
    let norm = normalize_u8(acc);
    let mut rgb = vec![255u8; pixels * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        let (main, bar) = root.split_horizontally(w as i32 - COLORBAR_WIDTH);

        let mut builder = ChartBuilder::on(&main);
        builder.margin(12);
        if with_text {
            builder
                .caption(&axes.title, (FONT_FAMILY, 22))
                .x_label_area_size(45)
                .y_label_area_size(60);
        }
        let mut chart = builder
            .build_cartesian_2d(non_degenerate(axes.x_range), non_degenerate(axes.y_range))
            .map_err(render_err)?;
        paint_cells(&chart.plotting_area().strip_coord_spec(), &norm)?;
        if with_text {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc(axes.x_desc.as_str())
                .y_desc(axes.y_desc.as_str())
                .label_style((FONT_FAMILY, 14))
                .axis_desc_style((FONT_FAMILY, 16))
                .draw()
                .map_err(render_err)?;
        }

        // Colorbar over the normalised 0-255 range, as in the rendered cells.
        let mut builder = ChartBuilder::on(&bar);
        builder.margin(12).margin_right(8);
        if with_text {
            builder
                .margin_top(12 + 30)
                .x_label_area_size(45)
                .right_y_label_area_size(40);
        }
        let mut colorbar = builder
            .build_cartesian_2d(0f64..1f64, 0f64..256f64)
            .map_err(render_err)?;
        colorbar
            .draw_series((0..=255).map(|v| {
                let v = v as f64;
                Rectangle::new([(0.0, v), (1.0, v + 1.0)], hot(v / 255.0).filled())
            }))
            .map_err(render_err)?;
        if with_text {
            colorbar
                .configure_mesh()
                .disable_mesh()
                .disable_x_axis()
                .y_labels(6)
                .label_style((FONT_FAMILY, 12))
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }

    RgbImage::from_raw(w, h, rgb)
        .ok_or_else(|| OutputError::Render(format!("chart buffer does not fit {w}x{h}")))
}

/// Draws every visible line segment in red, two pixels wide.
pub fn draw_lines_overlay(canvas: &mut RgbImage, lines: &[LineDetection]) {
    for seg in lines.iter().filter_map(|l| l.segment) {
        let (x1, y1) = (seg.start.0 as f32, seg.start.1 as f32);
        let (x2, y2) = (seg.end.0 as f32, seg.end.1 as f32);
        // Second stroke offset across the dominant direction.
        let (ox, oy) = if (x2 - x1).abs() >= (y2 - y1).abs() {
            (0.0, 1.0)
        } else {
            (1.0, 0.0)
        };
        draw_line_segment_mut(canvas, (x1, y1), (x2, y2), OVERLAY_RED);
        draw_line_segment_mut(canvas, (x1 + ox, y1 + oy), (x2 + ox, y2 + oy), OVERLAY_RED);
    }
}

/// Draws a red circle of the run's radius around every detected centre,
/// two pixels wide with the stroke inside the radius.
pub fn draw_circles_overlay(canvas: &mut RgbImage, circles: &[CircleDetection], radius: i32) {
    for c in circles {
        let center = (c.a as i32, c.b as i32);
        draw_hollow_circle_mut(canvas, center, radius, OVERLAY_RED);
        if radius > 1 {
            draw_hollow_circle_mut(canvas, center, radius - 1, OVERLAY_RED);
        }
    }
}

pub fn annotate_lines(source: &DynamicImage, lines: &[LineDetection]) -> RgbImage {
    let mut canvas = source.to_rgb8();
    draw_lines_overlay(&mut canvas, lines);
    canvas
}

pub fn annotate_circles(source: &DynamicImage, circles: &[CircleDetection], radius: i32) -> RgbImage {
    let mut canvas = source.to_rgb8();
    draw_circles_overlay(&mut canvas, circles, radius);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineSegment;
    use crate::grid::Grid;

    #[test]
    fn hot_colormap_endpoints() {
        assert_eq!(hot(0.0), RGBColor(0, 0, 0));
        assert_eq!(hot(1.0), RGBColor(255, 255, 255));
        let mid = hot(0.365079);
        assert_eq!((mid.0, mid.2), (255, 0));
    }

    fn pixels_of(img: &RgbImage, colour: RGBColor, x_range: std::ops::Range<u32>) -> Vec<(u32, u32)> {
        let target = Rgb([colour.0, colour.1, colour.2]);
        img.enumerate_pixels()
            .filter(|&(x, _, p)| x_range.contains(&x) && *p == target)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// Column 1 of `row` holds half the maximum, which sits in column 3.
    fn half_hot_cell(row: usize) -> AccumulatorGrid {
        let mut acc = Grid::new(4, 4);
        acc.set(1, row, 5);
        acc.set(3, row, 10);
        acc
    }

    fn unit_axes() -> HeatmapAxes {
        HeatmapAxes {
            title: String::new(),
            x_desc: String::new(),
            y_desc: String::new(),
            x_range: (0.0, 4.0),
            y_range: (0.0, 4.0),
        }
    }

    #[test]
    fn chart_puts_row_zero_at_the_bottom() {
        let (w, h) = (300, 200);
        let plot_w = w - COLORBAR_WIDTH as u32;
        let half = hot(127.0 / 255.0);
        let bottom = draw_chart(&half_hot_cell(0), &unit_axes(), (w, h), false).unwrap();
        let top = draw_chart(&half_hot_cell(3), &unit_axes(), (w, h), false).unwrap();
        assert_eq!(bottom.dimensions(), (w, h));

        let low = pixels_of(&bottom, half, 0..plot_w);
        let high = pixels_of(&top, half, 0..plot_w);
        assert!(!low.is_empty() && !high.is_empty());
        assert!(low.iter().all(|&(_, y)| y > h / 2));
        assert!(high.iter().all(|&(_, y)| y < h / 2));
        assert!(low.iter().all(|&(x, _)| x > plot_w / 8 && x < plot_w * 5 / 8));
    }

    #[test]
    fn colorbar_spans_black_to_white() {
        let img = draw_chart(&half_hot_cell(2), &unit_axes(), (300, 200), false).unwrap();
        let bar = (300 - COLORBAR_WIDTH as u32)..300;
        for v in [0.0, 127.0 / 255.0, 1.0] {
            assert!(!pixels_of(&img, hot(v), bar.clone()).is_empty(), "no {v} in colorbar");
        }
    }

    #[test]
    fn line_axes_follow_the_space() {
        let space = LineSpace::new(100, 100, 1.0, 1.0).unwrap();
        let axes = HeatmapAxes::lines(&space);
        assert_eq!(axes.y_range, (-142.0, 142.0));
        assert!((axes.x_range.0 + 90.0).abs() < 1e-9);
        assert!((axes.x_range.1 - 89.0).abs() < 1e-9);
        assert_eq!(axes.x_desc, "θ (grados)");
        assert_eq!(axes.y_desc, "ρ (pixeles)");
    }

    #[test]
    fn labelled_chart_renders_whatever_fonts_exist() {
        let acc = half_hot_cell(1);
        let img = render_accumulator_chart(&acc, &HeatmapAxes::circles(&acc), CHART_SIZE).unwrap();
        assert_eq!(img.dimensions(), CHART_SIZE);
    }

    #[test]
    fn tiny_chart_sizes_are_rejected() {
        let acc = half_hot_cell(0);
        assert!(matches!(
            draw_chart(&acc, &unit_axes(), (40, 40), false),
            Err(OutputError::Render(_))
        ));
    }

    #[test]
    fn absent_segments_are_skipped() {
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        let lines = [
            LineDetection {
                rho: 500.0,
                theta: 0.0,
                votes: 60,
                segment: None,
            },
            LineDetection {
                rho: 5.0,
                theta: 0.0,
                votes: 60,
                segment: Some(LineSegment {
                    start: (5, 0),
                    end: (5, 19),
                }),
            },
        ];
        draw_lines_overlay(&mut canvas, &lines);
        assert_eq!(canvas.get_pixel(5, 10), &OVERLAY_RED);
        assert_eq!(canvas.get_pixel(6, 10), &OVERLAY_RED);
        assert_eq!(canvas.get_pixel(12, 10), &Rgb([255, 255, 255]));
    }

    #[test]
    fn circle_overlay_draws_at_the_radius() {
        let mut canvas = RgbImage::from_pixel(40, 40, Rgb([0, 0, 0]));
        draw_circles_overlay(&mut canvas, &[CircleDetection { a: 20, b: 20, votes: 1 }], 8);
        assert_eq!(canvas.get_pixel(28, 20), &OVERLAY_RED);
        assert_eq!(canvas.get_pixel(27, 20), &OVERLAY_RED);
        assert_eq!(canvas.get_pixel(29, 20), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(20, 20), &Rgb([0, 0, 0]));
    }
}
