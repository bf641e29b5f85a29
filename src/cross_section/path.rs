//! Sampling model fields along a fixed line between two (lon, lat) endpoints.
//!
//! The path is a straight line in grid-index space between the grid cells
//! nearest each endpoint, sampled densely enough that neighbouring samples are
//! no more than one grid cell apart. Horizontal values come from bilinear
//! interpolation of the surrounding mass points; the vertical regridding onto
//! the target pressure levels is linear in pressure, per sample column.

use crate::{
    cross_section::grid::ModelGrid,
    error::{ChartError, Result},
    interpolation::interp_descending_column,
};
use log::debug;
use metfor::{HectoPascal, Quantity};
use ndarray::{Array2, ArrayView2, ArrayView3};

/// One sampled (longitude, latitude) position along the cross-section line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Longitude, degrees east.
    pub lon: f64,
    /// Latitude, degrees north.
    pub lat: f64,
}

/// The sampled cross-section line in both geographic and grid coordinates.
#[derive(Debug, Clone)]
pub struct SampledPath {
    /// Geographic position of each sample, start endpoint first.
    pub points: Vec<PathPoint>,
    // Fractional (y, x) grid coordinates of each sample.
    pub(crate) grid_coords: Vec<(f64, f64)>,
}

impl SampledPath {
    /// Number of samples along the line.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the path holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Longitudes of the samples, in path order.
    pub fn lons(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lon).collect()
    }
}

/// Build the sample line for a cross section between two endpoints.
///
/// Endpoints are given as `(lon, lat)`. The line is anchored at the grid cells
/// nearest each endpoint; endpoints far outside the domain therefore snap to
/// the domain edge rather than failing.
pub fn sample_path(grid: &ModelGrid, start: (f64, f64), end: (f64, f64)) -> Result<SampledPath> {
    let (y0, x0) = nearest_cell(&grid.lat.view(), &grid.lon.view(), start)?;
    let (y1, x1) = nearest_cell(&grid.lat.view(), &grid.lon.view(), end)?;

    if (y0, x0) == (y1, x1) {
        return Err(ChartError::InvalidInput(
            "cross-section endpoints fall in the same grid cell",
        ));
    }

    let dy = y1 as f64 - y0 as f64;
    let dx = x1 as f64 - x0 as f64;
    let n = dy.hypot(dx).ceil() as usize + 1;

    let mut points = Vec::with_capacity(n);
    let mut grid_coords = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / (n - 1) as f64;
        let gy = y0 as f64 + t * dy;
        let gx = x0 as f64 + t * dx;

        points.push(PathPoint {
            lon: bilinear(&grid.lon.view(), gy, gx),
            lat: bilinear(&grid.lat.view(), gy, gx),
        });
        grid_coords.push((gy, gx));
    }

    debug!(
        "sampled {} path points from ({}, {}) to ({}, {})",
        n, y0, x0, y1, x1
    );

    Ok(SampledPath { points, grid_coords })
}

/// Interpolate a 3-D field onto the path and the given descending pressure
/// levels.
///
/// Output is indexed `(sample, level)` matching the order of `path.points`
/// and `levels`. Cells where the column's pressure profile does not bracket
/// the target level are NaN.
pub fn vertical_slice(
    field: &ArrayView3<f64>,
    pressure: &ArrayView3<f64>,
    path: &SampledPath,
    levels: &[HectoPascal],
) -> Array2<f64> {
    let nz = field.len_of(ndarray::Axis(0));
    let mut out = Array2::from_elem((path.len(), levels.len()), f64::NAN);

    let mut column_p = vec![0.0; nz];
    let mut column_v = vec![0.0; nz];

    for (i, &(gy, gx)) in path.grid_coords.iter().enumerate() {
        for k in 0..nz {
            column_p[k] = bilinear(&pressure.index_axis(ndarray::Axis(0), k), gy, gx);
            column_v[k] = bilinear(&field.index_axis(ndarray::Axis(0), k), gy, gx);
        }

        for (j, &level) in levels.iter().enumerate() {
            let value = interp_descending_column(&column_p, &column_v, level.unpack());
            if value.is_some() {
                out[(i, j)] = value.unpack();
            }
        }
    }

    out
}

/// Grid indices of the mass point nearest a `(lon, lat)` position.
fn nearest_cell(
    lat: &ArrayView2<f64>,
    lon: &ArrayView2<f64>,
    target: (f64, f64),
) -> Result<(usize, usize)> {
    let (tgt_lon, tgt_lat) = target;

    if !(-90.0..=90.0).contains(&tgt_lat) || !(-180.0..=180.0).contains(&tgt_lon) {
        return Err(ChartError::InvalidInput("endpoint is not a valid coordinate"));
    }

    let mut best = (0usize, 0usize);
    let mut best_dist = f64::INFINITY;
    for ((y, x), (&la, &lo)) in lat.indexed_iter().zip(lon.iter()).map(|((idx, la), lo)| (idx, (la, lo))) {
        let d = (la - tgt_lat).powi(2) + (lo - tgt_lon).powi(2);
        if d < best_dist {
            best_dist = d;
            best = (y, x);
        }
    }

    Ok(best)
}

/// Bilinear interpolation at fractional grid coordinates, clamped to the
/// domain edge.
fn bilinear(field: &ArrayView2<f64>, gy: f64, gx: f64) -> f64 {
    let (ny, nx) = field.dim();

    let gy = gy.max(0.0).min((ny - 1) as f64);
    let gx = gx.max(0.0).min((nx - 1) as f64);

    let y0 = gy.floor() as usize;
    let x0 = gx.floor() as usize;
    let y1 = (y0 + 1).min(ny - 1);
    let x1 = (x0 + 1).min(nx - 1);

    let fy = gy - y0 as f64;
    let fx = gx - x0 as f64;

    let top = field[(y0, x0)] * (1.0 - fx) + field[(y0, x1)] * fx;
    let bottom = field[(y1, x0)] * (1.0 - fx) + field[(y1, x1)] * fx;

    top * (1.0 - fy) + bottom * fy
}
