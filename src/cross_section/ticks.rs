//! X-axis tick positions and labels for the cross-section chart.

use crate::{
    cross_section::path::SampledPath,
    error::{ChartError, Result},
};

/// One x-axis tick: a sampled path point chosen to subdivide the longitude
/// span evenly.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Index of the sampled path point this tick sits on.
    pub index: usize,
    /// Longitude of that point, degrees east.
    pub lon: f64,
    /// Latitude of that point, degrees north.
    pub lat: f64,
}

impl Tick {
    /// Two-line display label, longitude over latitude.
    pub fn label(&self) -> String {
        format!("{:.2}°E\n{:.2}°N", self.lon, self.lat)
    }

    /// Single-line display label for backends without multi-line ticks.
    pub fn label_inline(&self) -> String {
        format!("{:.2}°E {:.2}°N", self.lon, self.lat)
    }
}

/// Choose tick points evenly subdividing the longitude span of the path.
///
/// The tick count is `round((end_lon - start_lon) / interval) + 1`; sample
/// indices are spread linearly over the index range, not over longitude, so
/// on a path that is not uniform in longitude the spacing is approximate.
/// When the path has fewer samples than requested ticks, indices repeat; the
/// repeats are passed through untouched.
pub fn build_ticks(
    path: &SampledPath,
    start_lon: f64,
    end_lon: f64,
    interval: f64,
) -> Result<Vec<Tick>> {
    if !(interval > 0.0) {
        return Err(ChartError::InvalidInput("tick interval must be positive"));
    }
    if path.is_empty() {
        return Err(ChartError::InvalidInput("cannot build ticks for an empty path"));
    }

    let n_ticks = ((end_lon - start_lon) / interval).round() as i64 + 1;
    if n_ticks < 1 {
        return Err(ChartError::InvalidInput("tick interval larger than the longitude span"));
    }
    let n_ticks = n_ticks as usize;

    let last = path.len() - 1;
    let ticks = (0..n_ticks)
        .map(|i| {
            let index = if n_ticks == 1 {
                0
            } else {
                // Truncating cast matches an integer linspace.
                (i as f64 * last as f64 / (n_ticks - 1) as f64) as usize
            };
            let point = path.points[index];
            Tick {
                index,
                lon: (point.lon * 100.0).round() / 100.0,
                lat: (point.lat * 100.0).round() / 100.0,
            }
        })
        .collect();

    Ok(ticks)
}
