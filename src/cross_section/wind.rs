//! Projection of the horizontal wind onto the cross-section line.

use ndarray::{Array2, ArrayView2};

/// Bearing of the cross-section line in degrees.
///
/// This is the plain arctangent of the endpoint deltas in (lon, lat) space,
/// counterclockwise from due east, the same convention as the wind direction
/// below. Endpoints are `(lon, lat)`.
pub fn path_bearing_deg(start: (f64, f64), end: (f64, f64)) -> f64 {
    let dlon = end.0 - start.0;
    let dlat = end.1 - start.1;
    dlat.atan2(dlon).to_degrees()
}

/// The wind component tangential to the cross-section line at every cell.
///
/// Positive values blow from the start endpoint toward the end endpoint. The
/// two input fields must share a shape; the output has the same shape.
pub fn tangential_component(
    u: &ArrayView2<f64>,
    v: &ArrayView2<f64>,
    bearing_deg: f64,
) -> Array2<f64> {
    debug_assert_eq!(u.dim(), v.dim());

    ndarray::Zip::from(u).and(v).map_collect(|&u, &v| {
        let speed = u.hypot(v);
        let direction_deg = v.atan2(u).to_degrees();
        let relative_deg = direction_deg - bearing_deg;
        speed * relative_deg.to_radians().cos()
    })
}

/// Scale the vertical wind so it is visible next to the horizontal component.
///
/// Vertical motion is two to three orders of magnitude weaker than horizontal
/// wind; the quiver overlay multiplies it by a fixed factor before plotting.
pub fn exaggerate_vertical(w: &ArrayView2<f64>, factor: f64) -> Array2<f64> {
    w.mapv(|w| w * factor)
}
