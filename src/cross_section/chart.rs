//! Rendering of a prepared cross section with plotters.
//!
//! The layout mirrors the reference figure: a pseudocolor temperature fill
//! with a wind-arrow overlay in the main panel, pressure on the left axis and
//! approximate height above ground on the right, a vertical colorbar, and a
//! small locator panel showing the A-A' line.

use crate::{
    cross_section::{CrossSection, CrossSectionConfig},
    error::{ChartError, Result},
};
use log::info;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// Render the cross section to a PNG file.
pub fn plot_cross_section<P: AsRef<Path>>(
    section: &CrossSection,
    config: &CrossSectionConfig,
    title: &str,
    output: P,
) -> Result<()> {
    if section.temperature.is_empty() {
        return Err(ChartError::InvalidInput("cross section holds no data"));
    }

    let output = output.as_ref();
    let root = BitMapBackend::new(output, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (main_area, side_area) = root.split_horizontally(780);
    let side_panels = side_area.split_evenly((3, 1));

    draw_main_panel(&main_area, section, config, title)?;
    draw_locator_panel(&side_panels[0], config)?;
    draw_colorbar(&side_panels[1], config)?;

    root.present().map_err(render_err)?;
    info!("wrote cross-section chart to {}", output.display());

    Ok(())
}

/// An f64 axis with a fixed set of tick positions, each carrying its own
/// label.
///
/// The stock f64 coordinate cannot place ticks at arbitrary positions, so
/// this owns both the tick placement and the tick text.
#[derive(Clone)]
struct LabeledAxis {
    inner: RangedCoordf64,
    ticks: Vec<(f64, String)>,
}

impl LabeledAxis {
    fn new(range: Range<f64>, ticks: Vec<(f64, String)>) -> Self {
        LabeledAxis {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for LabeledAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.iter().map(|(v, _)| *v).collect()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

impl ValueFormatter<f64> for LabeledAxis {
    fn format_ext(&self, value: &f64) -> String {
        self.ticks
            .iter()
            .find(|(v, _)| (v - value).abs() < 1.0e-6)
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| format!("{:.2}", value))
    }
}

// The y axis is plotted as negated pressure so that pressure decreases upward
// while the coordinate still increases, which keeps plotters happy.
fn draw_main_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    section: &CrossSection,
    config: &CrossSectionConfig,
    title: &str,
) -> Result<()> {
    let lons = section.path.lons();
    let x_min = config.start.0.min(config.end.0);
    let x_max = config.start.0.max(config.end.0);

    let x_ticks: Vec<(f64, String)> = section
        .ticks
        .iter()
        .map(|t| (t.lon, t.label_inline()))
        .collect();
    let y_ticks: Vec<(f64, String)> = section
        .height_labels
        .iter()
        .map(|(p, _)| (-p.0, format!("{:.0}", p.0)))
        .collect();
    let y2_ticks: Vec<(f64, String)> = section
        .height_labels
        .iter()
        .map(|(p, h)| (-p.0, h.to_string()))
        .collect();

    let x_axis = LabeledAxis::new(x_min..x_max, x_ticks);
    let y_axis = LabeledAxis::new(-config.pressure_bottom..-config.pressure_top, y_ticks);
    let y2_axis = LabeledAxis::new(-config.pressure_bottom..-config.pressure_top, y2_ticks);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(14)
        .x_label_area_size(44)
        .y_label_area_size(56)
        .right_y_label_area_size(56)
        .build_cartesian_2d(x_axis, y_axis)
        .map_err(render_err)?
        .set_secondary_coord(x_min..x_max, y2_axis);

    chart
        .configure_mesh()
        .x_desc("longitude / latitude")
        .y_desc("pressure (hPa)")
        .light_line_style(BLACK.mix(0.1))
        .draw()
        .map_err(render_err)?;

    chart
        .configure_secondary_axes()
        .y_desc("height AGL (m)")
        .draw()
        .map_err(render_err)?;

    draw_temperature_cells(&mut chart, section, config, &lons)?;
    draw_wind_arrows(&mut chart, section, config, &lons)?;

    Ok(())
}

type DualChart<'a, DB> = plotters::chart::DualCoordChartContext<
    'a,
    DB,
    Cartesian2d<LabeledAxis, LabeledAxis>,
    Cartesian2d<RangedCoordf64, LabeledAxis>,
>;

fn draw_temperature_cells<DB: DrawingBackend>(
    chart: &mut DualChart<'_, DB>,
    section: &CrossSection,
    config: &CrossSectionConfig,
    lons: &[f64],
) -> Result<()> {
    let contour_levels = config.contour_levels();
    let (n_samples, n_levels) = section.temperature.dim();

    let mut cells = Vec::new();
    for i in 0..n_samples {
        let x_lo = edge(lons, i, false);
        let x_hi = edge(lons, i, true);
        for k in 0..n_levels {
            let t = section.temperature[(i, k)];
            if t.is_nan() {
                continue;
            }

            let p_lo = -level_edge(&section.levels, k, false);
            let p_hi = -level_edge(&section.levels, k, true);
            let color = temperature_color(t, &contour_levels);
            cells.push(Rectangle::new([(x_lo, p_lo), (x_hi, p_hi)], color.filled()));
        }
    }

    chart.draw_series(cells).map_err(render_err)?;
    Ok(())
}

fn draw_wind_arrows<DB: DrawingBackend>(
    chart: &mut DualChart<'_, DB>,
    section: &CrossSection,
    config: &CrossSectionConfig,
    lons: &[f64],
) -> Result<()> {
    let (si, sk) = config.quiver_stride;
    let (si, sk) = (si.max(1), sk.max(1));
    let (n_samples, n_levels) = section.tangential_wind.dim();

    // Map wind in m/s onto axis units so quiver_scale m/s spans the plot.
    let x_span = (config.end.0 - config.start.0).abs();
    let y_span = config.pressure_bottom - config.pressure_top;
    let x_per_ms = x_span / config.quiver_scale;
    let y_per_ms = y_span / config.quiver_scale;

    let mut arrows = Vec::new();
    for i in (0..n_samples).step_by(si) {
        for k in (0..n_levels).step_by(sk) {
            let u = section.tangential_wind[(i, k)];
            let w = section.vertical_wind[(i, k)];
            if u.is_nan() || w.is_nan() {
                continue;
            }

            let x = lons[i];
            let y = -section.levels[k].0;
            let dx = u * x_per_ms;
            let dy = w * y_per_ms;

            // Pivot on the middle of the arrow like the reference quiver.
            let tail = (x - dx / 2.0, y - dy / 2.0);
            let head = (x + dx / 2.0, y + dy / 2.0);
            arrows.push(PathElement::new(vec![tail, head], BLACK.mix(0.8)));

            // A short two-stroke head, rotated off the shaft direction.
            let angle = dy.atan2(dx);
            let barb = 0.018 * x_span;
            for offset in [150.0f64, -150.0] {
                let theta = angle + offset.to_radians();
                let tip = (head.0 + barb * theta.cos(), head.1 + barb * theta.sin() * (y_span / x_span));
                arrows.push(PathElement::new(vec![head, tip], BLACK.mix(0.8)));
            }
        }
    }

    chart.draw_series(arrows).map_err(render_err)?;
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    config: &CrossSectionConfig,
) -> Result<()> {
    let contour_levels = config.contour_levels();

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .y_label_area_size(36)
        .build_cartesian_2d(0.0..1.0, config.temp_min..config.temp_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .disable_y_mesh()
        .y_desc("temperature (deg C)")
        .draw()
        .map_err(render_err)?;

    let swatches = contour_levels.windows(2).map(|pair| {
        let color = temperature_color((pair[0] + pair[1]) / 2.0, &contour_levels);
        Rectangle::new([(0.0, pair[0]), (1.0, pair[1])], color.filled())
    });
    chart.draw_series(swatches).map_err(render_err)?;

    Ok(())
}

fn draw_locator_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    config: &CrossSectionConfig,
) -> Result<()> {
    let (lon_min, lon_max, lat_min, lat_max) = config.map_extent;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(22)
        .y_label_area_size(30)
        .build_cartesian_2d(lon_min..lon_max, lat_min..lat_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(5)
        .light_line_style(BLACK.mix(0.1))
        .label_style(("sans-serif", 10))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![config.start, config.end],
            RED.stroke_width(2),
        )))
        .map_err(render_err)?;

    chart
        .draw_series([
            Circle::new(config.start, 3, RED.filled()),
            Circle::new(config.end, 3, RED.filled()),
        ])
        .map_err(render_err)?;

    chart
        .draw_series([
            Text::new("A", config.start, ("sans-serif", 12)),
            Text::new("A'", config.end, ("sans-serif", 12)),
        ])
        .map_err(render_err)?;

    Ok(())
}

/// Boundary of the cell around sample `i`: midway to its neighbour, or the
/// sample itself at the ends of the line.
fn edge(lons: &[f64], i: usize, upper: bool) -> f64 {
    if upper {
        if i + 1 < lons.len() {
            (lons[i] + lons[i + 1]) / 2.0
        } else {
            lons[i]
        }
    } else if i > 0 {
        (lons[i - 1] + lons[i]) / 2.0
    } else {
        lons[i]
    }
}

fn level_edge(levels: &[metfor::HectoPascal], k: usize, upper: bool) -> f64 {
    if upper {
        if k + 1 < levels.len() {
            (levels[k].0 + levels[k + 1].0) / 2.0
        } else {
            levels[k].0
        }
    } else if k > 0 {
        (levels[k - 1].0 + levels[k].0) / 2.0
    } else {
        levels[k].0
    }
}

/// Discrete rainbow-ish ramp over the contour levels, warm colors at the top
/// of the range.
fn temperature_color(value: f64, contour_levels: &[f64]) -> RGBColor {
    let n = contour_levels.len();
    debug_assert!(n >= 2);

    let bucket = contour_levels
        .iter()
        .rposition(|&level| value >= level)
        .unwrap_or(0);
    let frac = bucket as f64 / (n - 1) as f64;

    // Hue from deep blue (240) through green to red (0).
    let hue = 240.0 * (1.0 - frac);
    hsv_to_rgb(hue, 0.85, 0.95)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> RGBColor {
    let c = v * s;
    let h_prime = (h / 60.0) % 6.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    RGBColor(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

fn render_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}
