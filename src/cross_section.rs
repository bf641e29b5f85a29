//! Vertical cross sections of temperature and wind along a fixed line.
//!
//! Given one time step of model output, this module interpolates the 3-D
//! fields onto a line between two (lon, lat) endpoints and a descending set
//! of pressure levels, projects the horizontal wind onto the line, chooses
//! x-axis tick points, and attaches approximate terrain-relative heights for
//! the secondary y axis. The chart itself lives in [`chart`].

use crate::error::{ChartError, Result};
use log::info;
use metfor::HectoPascal;
use ndarray::Array2;
use serde::Deserialize;

pub mod chart;
pub mod grid;
pub mod levels;
pub mod path;
pub mod ticks;
pub mod wind;

pub use self::{
    chart::plot_cross_section,
    grid::ModelGrid,
    levels::approximate_level_heights,
    path::{sample_path, PathPoint, SampledPath},
    ticks::{build_ticks, Tick},
    wind::{path_bearing_deg, tangential_component},
};

/// All the tunables of a cross-section run.
///
/// Pressures are hPa, coordinates are `(lon, lat)` in degrees. The defaults
/// reproduce the reference A-A' section across the Taiwan Strait.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrossSectionConfig {
    /// Start endpoint of the line, `(lon, lat)`.
    pub start: (f64, f64),
    /// End endpoint of the line, `(lon, lat)`.
    pub end: (f64, f64),
    /// Longitude spacing of the x-axis ticks.
    pub tick_interval_lon: f64,
    /// Highest pressure (lowest level) of the section, hPa.
    pub pressure_bottom: f64,
    /// Lowest pressure (highest level) of the section, hPa.
    pub pressure_top: f64,
    /// Spacing between the interpolated slice levels, hPa.
    pub slice_step: f64,
    /// Spacing between the labeled y-axis/height levels, hPa.
    pub height_axis_step: f64,
    /// Multiplier applied to the vertical wind before plotting.
    pub vertical_exaggeration: f64,
    /// Lowest filled temperature contour, degrees C.
    pub temp_min: f64,
    /// Exclusive upper bound of the filled temperature contours, degrees C.
    pub temp_max: f64,
    /// Spacing of the filled temperature contours, degrees C.
    pub temp_step: f64,
    /// Draw a wind arrow every this many (samples, levels).
    pub quiver_stride: (usize, usize),
    /// Arrow length scale: wind speed in m/s that would span the full plot.
    pub quiver_scale: f64,
    /// Extent of the inset locator panel, `(lon_min, lon_max, lat_min, lat_max)`.
    pub map_extent: (f64, f64, f64, f64),
}

impl Default for CrossSectionConfig {
    fn default() -> Self {
        CrossSectionConfig {
            start: (120.2, 22.0),
            end: (121.2, 23.0),
            tick_interval_lon: 0.2,
            pressure_bottom: 1000.0,
            pressure_top: 700.0,
            slice_step: 10.0,
            height_axis_step: 50.0,
            vertical_exaggeration: 200.0,
            temp_min: 10.0,
            temp_max: 40.0,
            temp_step: 2.0,
            quiver_stride: (2, 2),
            quiver_scale: 120.0,
            map_extent: (118.0, 128.0, 20.0, 30.0),
        }
    }
}

impl CrossSectionConfig {
    /// Pressure levels the fields are interpolated onto, descending.
    pub fn slice_levels(&self) -> Vec<HectoPascal> {
        descending_levels(self.pressure_bottom, self.pressure_top, self.slice_step)
    }

    /// Pressure levels that get y-axis labels and height annotations,
    /// descending.
    pub fn height_levels(&self) -> Vec<HectoPascal> {
        descending_levels(self.pressure_bottom, self.pressure_top, self.height_axis_step)
    }

    /// Filled contour boundaries for the temperature shading.
    ///
    /// The upper bound is exclusive, so the default 10..40 range by 2 puts the
    /// last boundary at 38.
    pub fn contour_levels(&self) -> Vec<f64> {
        let mut levels = Vec::new();
        let mut t = self.temp_min;
        while t < self.temp_max - 1.0e-6 {
            levels.push(t);
            t += self.temp_step;
        }
        levels
    }

    fn check(&self) -> Result<()> {
        if self.pressure_bottom <= self.pressure_top {
            return Err(ChartError::InvalidInput(
                "pressure_bottom must be below pressure_top in the atmosphere",
            ));
        }
        if self.slice_step <= 0.0 || self.height_axis_step <= 0.0 {
            return Err(ChartError::InvalidInput("pressure steps must be positive"));
        }
        if self.temp_step <= 0.0 || self.temp_max <= self.temp_min {
            return Err(ChartError::InvalidInput("temperature contour range is empty"));
        }
        Ok(())
    }
}

fn descending_levels(bottom: f64, top: f64, step: f64) -> Vec<HectoPascal> {
    let mut levels = Vec::new();
    let mut p = bottom;
    while p >= top - 1.0e-6 {
        levels.push(HectoPascal(p));
        p -= step;
    }
    levels
}

/// A fully prepared cross section, ready to plot.
///
/// All three field arrays are indexed `(sample, level)` with the same shape;
/// the level axis follows `levels`, which descends from the highest pressure.
#[derive(Debug, Clone)]
pub struct CrossSection {
    /// The sampled line.
    pub path: SampledPath,
    /// The pressure levels of the second axis, descending.
    pub levels: Vec<HectoPascal>,
    /// Air temperature on the section, degrees C.
    pub temperature: Array2<f64>,
    /// Wind component along the line, positive toward the end point, m/s.
    pub tangential_wind: Array2<f64>,
    /// Vertical wind on the section, already exaggerated for plotting.
    pub vertical_wind: Array2<f64>,
    /// X-axis tick points.
    pub ticks: Vec<Tick>,
    /// Labeled pressure levels paired with their approximate height above
    /// ground in meters.
    pub height_labels: Vec<(HectoPascal, i64)>,
    /// Bearing of the line, degrees counterclockwise from east.
    pub bearing_deg: f64,
}

impl CrossSection {
    /// Run the whole data-preparation pipeline for one grid and config.
    pub fn build(model: &ModelGrid, config: &CrossSectionConfig) -> Result<Self> {
        config.check()?;
        model.validate()?;

        let levels = config.slice_levels();
        let line = sample_path(model, config.start, config.end)?;
        info!(
            "cross section: {} samples, {} pressure levels",
            line.len(),
            levels.len()
        );

        let pressure = model.pressure.view();
        let temperature = path::vertical_slice(&model.temperature.view(), &pressure, &line, &levels);
        let u_slice = path::vertical_slice(&model.u.view(), &pressure, &line, &levels);
        let v_slice = path::vertical_slice(&model.v.view(), &pressure, &line, &levels);
        let w_slice = path::vertical_slice(&model.w.view(), &pressure, &line, &levels);

        let bearing_deg = path_bearing_deg(config.start, config.end);
        let tangential_wind = tangential_component(&u_slice.view(), &v_slice.view(), bearing_deg);
        let vertical_wind =
            wind::exaggerate_vertical(&w_slice.view(), config.vertical_exaggeration);

        let ticks = build_ticks(&line, config.start.0, config.end.0, config.tick_interval_lon)?;

        let height_level_set = config.height_levels();
        let heights = approximate_level_heights(model, &height_level_set)?;
        let height_labels = height_level_set.into_iter().zip(heights).collect();

        Ok(CrossSection {
            path: line,
            levels,
            temperature,
            tangential_wind,
            vertical_wind,
            ticks,
            height_labels,
            bearing_deg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_section() {
        let config = CrossSectionConfig::default();
        assert_eq!(config.start, (120.2, 22.0));
        assert_eq!(config.end, (121.2, 23.0));
        assert_eq!(config.height_levels().len(), 7);
        assert_eq!(config.height_levels()[0], HectoPascal(1000.0));
        assert_eq!(config.height_levels()[6], HectoPascal(700.0));
    }

    #[test]
    fn slice_levels_descend() {
        let levels = CrossSectionConfig::default().slice_levels();
        assert!(levels.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(levels.first().copied(), Some(HectoPascal(1000.0)));
        assert_eq!(levels.last().copied(), Some(HectoPascal(700.0)));
    }

    #[test]
    fn contour_levels_exclude_the_upper_bound() {
        let levels = CrossSectionConfig::default().contour_levels();
        assert_eq!(levels.len(), 15); // 10, 12, ... 38
        assert!((levels[0] - 10.0).abs() < 1.0e-12);
        assert!((levels[14] - 38.0).abs() < 1.0e-12);
    }

    #[test]
    fn inverted_pressure_range_is_rejected() {
        let config = CrossSectionConfig {
            pressure_bottom: 700.0,
            pressure_top: 1000.0,
            ..CrossSectionConfig::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: CrossSectionConfig = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(config.tick_interval_lon, 0.2);

        let config: CrossSectionConfig =
            serde_json::from_str(r#"{"vertical_exaggeration": 100.0}"#).expect("should deserialize");
        assert_eq!(config.vertical_exaggeration, 100.0);
        assert_eq!(config.pressure_bottom, 1000.0);
    }
}
