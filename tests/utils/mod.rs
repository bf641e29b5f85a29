use ndarray::{Array2, Array3};

use weather_charts::cross_section::ModelGrid;

/// A smooth synthetic domain large enough for the default A-A' line.
///
/// Longitudes run 118 to 128, latitudes 20 to 30, on a 0.1 degree grid.
/// Pressure decreases 25 hPa per model level from 1012 at the surface,
/// temperature warms toward the east and cools with height, and the wind blows
/// uniformly from the southwest.
pub fn synthetic_grid() -> ModelGrid {
    let (nz, ny, nx) = (15, 101, 101);

    let lon = Array2::from_shape_fn((ny, nx), |(_, x)| 118.0 + 0.1 * x as f64);
    let lat = Array2::from_shape_fn((ny, nx), |(y, _)| 20.0 + 0.1 * y as f64);
    let terrain = Array2::from_shape_fn((ny, nx), |(y, x)| {
        50.0 + 10.0 * ((x as f64 / 20.0).sin() + (y as f64 / 20.0).cos())
    });

    let pressure = Array3::from_shape_fn((nz, ny, nx), |(k, _, _)| 1012.0 - 25.0 * k as f64);
    let temperature = Array3::from_shape_fn((nz, ny, nx), |(k, _, x)| {
        28.0 - 1.8 * k as f64 + 0.05 * x as f64
    });
    let height = Array3::from_shape_fn((nz, ny, nx), |(k, y, x)| {
        let sfc = 50.0 + 10.0 * ((x as f64 / 20.0).sin() + (y as f64 / 20.0).cos());
        sfc + 220.0 * k as f64
    });

    ModelGrid {
        lat,
        lon,
        terrain,
        pressure,
        temperature,
        u: Array3::from_elem((nz, ny, nx), 6.0),
        v: Array3::from_elem((nz, ny, nx), 6.0),
        w: Array3::from_elem((nz, ny, nx), 0.02),
        height,
    }
}
