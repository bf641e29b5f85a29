//! In-memory model state for one time step of a regional model run.
//!
//! To limit IO the whole domain is held in memory as plain arrays, one per
//! variable, with 3-D fields indexed `(level, y, x)` and surface fields
//! `(y, x)`. The optional `netcdf` feature adds a loader that derives these
//! fields from a raw WRF output file.

use crate::error::{ChartError, Result};
use ndarray::{Array2, Array3};

/// Gridded fields for a single model time step.
///
/// Pressure is in hPa, temperature in degrees C, winds in m/s, heights in
/// meters above sea level, and terrain in meters above sea level.
#[derive(Debug, Clone)]
pub struct ModelGrid {
    /// Latitude of each mass point, degrees north.
    pub lat: Array2<f64>,
    /// Longitude of each mass point, degrees east.
    pub lon: Array2<f64>,
    /// Terrain height, meters above sea level.
    pub terrain: Array2<f64>,
    /// Pressure, hPa.
    pub pressure: Array3<f64>,
    /// Air temperature, degrees C.
    pub temperature: Array3<f64>,
    /// Eastward wind component, m/s.
    pub u: Array3<f64>,
    /// Northward wind component, m/s.
    pub v: Array3<f64>,
    /// Vertical wind component, m/s.
    pub w: Array3<f64>,
    /// Geopotential height, meters above sea level.
    pub height: Array3<f64>,
}

impl ModelGrid {
    /// Check that every field agrees on the grid shape.
    pub fn validate(&self) -> Result<()> {
        let (nz, ny, nx) = self.pressure.dim();

        if nz == 0 || ny < 2 || nx < 2 {
            return Err(ChartError::InvalidInput("model grid is too small"));
        }

        let three_d_ok = [&self.temperature, &self.u, &self.v, &self.w, &self.height]
            .iter()
            .all(|field| field.dim() == (nz, ny, nx));
        let two_d_ok = [&self.lat, &self.lon, &self.terrain]
            .iter()
            .all(|field| field.dim() == (ny, nx));

        if three_d_ok && two_d_ok {
            Ok(())
        } else {
            Err(ChartError::InvalidInput("model grid fields disagree on shape"))
        }
    }

    /// Grid shape as `(levels, y, x)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.pressure.dim()
    }

    /// Height above the local ground surface at every grid cell.
    pub fn height_above_terrain(&self) -> Array3<f64> {
        &self.height - &self.terrain
    }
}

#[cfg(feature = "netcdf")]
mod wrf {
    //! WRF output adapter. Derives the diagnostic fields the rest of the
    //! crate consumes from the raw prognostic variables at time index 0.

    use super::ModelGrid;
    use crate::error::{ChartError, Result};
    use log::debug;
    use metfor::{Celsius, HectoPascal, Kelvin, Quantity};
    use ndarray::{ArrayD, Axis, Ix2, Ix3, IxDyn};
    use std::path::Path;

    // WRF's own value, not the WMO standard gravity.
    const G: f64 = 9.81;
    const BASE_THETA_K: f64 = 300.0;

    impl ModelGrid {
        /// Read one time step from a WRF output file.
        pub fn from_wrf<P: AsRef<Path>>(path: P) -> Result<Self> {
            let path = path.as_ref();
            if !path.exists() {
                return Err(ChartError::MissingResource(path.to_path_buf()));
            }

            debug!("opening WRF output {}", path.display());
            let file = netcdf::open(path)?;

            let p = time_zero_3d(&file, "P")?;
            let pb = time_zero_3d(&file, "PB")?;
            // Total pressure in hPa.
            let pressure = (&p + &pb) / 100.0;

            let theta_perturbation = time_zero_3d(&file, "T")?;
            let temperature = ndarray::Zip::from(&theta_perturbation)
                .and(&pressure)
                .map_collect(|&dth, &p_hpa| {
                    let theta = Kelvin(dth + BASE_THETA_K);
                    let t_k = metfor::temperature_from_theta(theta, HectoPascal(p_hpa));
                    Celsius::from(t_k).unpack()
                });

            let ph = time_zero_3d(&file, "PH")?;
            let phb = time_zero_3d(&file, "PHB")?;
            let height = destagger(&(&ph + &phb) / G, Axis(0));

            let u = destagger(time_zero_3d(&file, "U")?, Axis(2));
            let v = destagger(time_zero_3d(&file, "V")?, Axis(1));
            let w = destagger(time_zero_3d(&file, "W")?, Axis(0));

            let lat = time_zero_2d(&file, "XLAT")?;
            let lon = time_zero_2d(&file, "XLONG")?;
            let terrain = time_zero_2d(&file, "HGT")?;

            let grid = ModelGrid {
                lat,
                lon,
                terrain,
                pressure,
                temperature,
                u,
                v,
                w,
                height,
            };
            grid.validate()?;

            Ok(grid)
        }
    }

    fn read_variable(file: &netcdf::File, name: &str) -> Result<ArrayD<f64>> {
        let var = file
            .variable(name)
            .ok_or_else(|| ChartError::Dataset(format!("missing variable {}", name)))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let values = var.get_values::<f64, _>(..)?;

        ArrayD::from_shape_vec(IxDyn(&shape), values)
            .map_err(|err| ChartError::Dataset(format!("variable {}: {}", name, err)))
    }

    /// Read a variable and strip the leading time dimension, keeping index 0.
    fn time_zero_3d(file: &netcdf::File, name: &str) -> Result<ndarray::Array3<f64>> {
        let arr = read_variable(file, name)?;
        let arr = if arr.ndim() == 4 {
            arr.index_axis(Axis(0), 0).to_owned()
        } else {
            arr
        };

        arr.into_dimensionality::<Ix3>()
            .map_err(|_| ChartError::Dataset(format!("variable {} is not 3-D", name)))
    }

    fn time_zero_2d(file: &netcdf::File, name: &str) -> Result<ndarray::Array2<f64>> {
        let arr = read_variable(file, name)?;
        let arr = if arr.ndim() == 3 {
            arr.index_axis(Axis(0), 0).to_owned()
        } else {
            arr
        };

        arr.into_dimensionality::<Ix2>()
            .map_err(|_| ChartError::Dataset(format!("variable {} is not 2-D", name)))
    }

    /// Average a staggered field onto mass points along one axis.
    fn destagger(staggered: ndarray::Array3<f64>, axis: Axis) -> ndarray::Array3<f64> {
        let n = staggered.len_of(axis);
        debug_assert!(n >= 2);

        let lower = staggered.slice_axis(axis, ndarray::Slice::from(..n - 1));
        let upper = staggered.slice_axis(axis, ndarray::Slice::from(1..));

        (&lower + &upper) * 0.5
    }
}
