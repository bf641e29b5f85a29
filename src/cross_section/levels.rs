//! Representative terrain-relative heights for a set of pressure levels.
//!
//! The secondary y axis of the cross-section chart labels each pressure level
//! with an approximate height above ground. The approximation interpolates
//! height-above-terrain onto the level over the *whole* horizontal grid and
//! takes the maximum, so it is an upper bound, not the height along the
//! cross-section path itself.

use crate::{
    cross_section::grid::ModelGrid,
    error::{ChartError, Result},
    interpolation::linear_interpolate,
};
use metfor::{HectoPascal, Meters, Quantity};
use optional::{none, some, Optioned};

/// One representative height, rounded to whole meters, per pressure level.
///
/// `levels` must be in descending pressure order. A level that no grid column
/// brackets at all is an interpolation error.
pub fn approximate_level_heights(grid: &ModelGrid, levels: &[HectoPascal]) -> Result<Vec<i64>> {
    if levels.is_empty() {
        return Err(ChartError::InvalidInput("no pressure levels requested"));
    }

    let (nz, ny, nx) = grid.shape();
    let agl = grid.height_above_terrain();

    let mut maxima: Vec<Optioned<Meters>> = vec![none(); levels.len()];
    let mut p_column: Vec<Optioned<HectoPascal>> = Vec::with_capacity(nz);
    let mut h_column: Vec<Optioned<Meters>> = Vec::with_capacity(nz);

    for y in 0..ny {
        for x in 0..nx {
            p_column.clear();
            h_column.clear();
            for k in 0..nz {
                let p = grid.pressure[(k, y, x)];
                let h = agl[(k, y, x)];
                p_column.push(if p.is_nan() { none() } else { some(HectoPascal(p)) });
                h_column.push(if h.is_nan() { none() } else { some(Meters(h)) });
            }

            for (j, &level) in levels.iter().enumerate() {
                let height = linear_interpolate(&p_column, &h_column, level);
                if height.is_some() {
                    let height = height.unpack();
                    let keep = match maxima[j].into_option() {
                        Some(current) if current >= height => current,
                        _ => height,
                    };
                    maxima[j] = some(keep);
                }
            }
        }
    }

    maxima
        .into_iter()
        .map(|max| {
            max.into_option()
                .map(|height| height.unpack().round() as i64)
                .ok_or(ChartError::Interpolation)
        })
        .collect()
}
