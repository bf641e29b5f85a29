//! Linear interpolation helpers used by both the height approximator and the
//! vertical regridding of cross-section columns.
use itertools::{izip, Itertools};
use metfor::Quantity;
use optional::Optioned;
use std::ops::Sub;

/// Interpolate values given two parallel slices of data and a target value.
///
/// Assumes that `xs` is monotonic. Missing values are skipped, so a gap in one
/// slice does not prevent using the points on either side of it.
#[inline]
pub fn linear_interpolate<X, Y>(xs: &[Optioned<X>], ys: &[Optioned<Y>], target_x: X) -> Optioned<Y>
where
    X: Quantity + optional::Noned + PartialOrd + Sub<X>,
    <X as Sub<X>>::Output: Quantity + optional::Noned,
    Y: Quantity + optional::Noned + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_eq!(xs.len(), ys.len());

    enum BracketType<X, Y> {
        Bracket((X, Y), (X, Y)),
        EndEqual((X, Y)),
    }

    let make_bracket = |pnt_0, pnt_1| -> Option<BracketType<X, Y>> {
        let (x0, _) = pnt_0;
        let (x1, _) = pnt_1;

        if (x0 < target_x && x1 > target_x) || (x0 > target_x && x1 < target_x) {
            Some(BracketType::Bracket(pnt_0, pnt_1))
        } else if (x0 - target_x).unpack().abs() < std::f64::EPSILON {
            Some(BracketType::EndEqual(pnt_0))
        } else if (x1 - target_x).unpack().abs() < std::f64::EPSILON {
            Some(BracketType::EndEqual(pnt_1))
        } else {
            None
        }
    };

    let value_opt = izip!(xs, ys)
        // Filter out elements where one of the values is missing.
        .filter(|(x, y)| x.is_some() && y.is_some())
        // Unpack the values from the `Optioned` type
        .map(|(x, y)| (x.unpack(), y.unpack()))
        // Look at them in pairs.
        .tuple_windows::<(_, _)>()
        // Make a bracket and filter out all levels that don't create a bracket.
        .filter_map(|(pnt_0, pnt_1)| make_bracket(pnt_0, pnt_1))
        // Get the first (and only) one that brackets the target value
        .nth(0) // This is an Option<BracketType>
        // Map from the bracket type to the interpolated value
        .map(|val| match val {
            BracketType::Bracket(pnt_0, pnt_1) => {
                let (x0, y0) = pnt_0;
                let (x1, y1) = pnt_1;
                linear_interp(target_x, x0, x1, y0, y1)
            }
            BracketType::EndEqual(pnt) => pnt.1,
        });

    Optioned::from(value_opt)
}

#[inline]
pub(crate) fn linear_interp<X, Y>(x_val: X, x1: X, x2: X, y1: Y, y2: Y) -> Y
where
    X: Sub<X> + Copy + std::fmt::Debug + std::cmp::PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(x1, x2);

    let run = (x2 - x1).unpack();
    let rise = (y2 - y1).unpack();
    let dx = (x_val - x1).unpack();

    Y::pack(y1.unpack() + dx * (rise / run))
}

/// Interpolate a bare `f64` column to a target coordinate value.
///
/// `xs` is assumed to be sorted in descending order, the way pressure decreases
/// up a model column. NaN entries in either slice are skipped. Returns none
/// when the target is not bracketed by the valid data.
#[inline]
pub(crate) fn interp_descending_column(xs: &[f64], ys: &[f64], target_x: f64) -> Optioned<f64> {
    debug_assert_eq!(xs.len(), ys.len());

    let value_opt = izip!(xs, ys)
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .map(|(x, y)| (*x, *y))
        .tuple_windows::<(_, _)>()
        .filter_map(|((x0, y0), (x1, y1))| {
            debug_assert!(x0 >= x1);
            if (x0 - target_x).abs() < std::f64::EPSILON {
                Some(y0)
            } else if (x1 - target_x).abs() < std::f64::EPSILON {
                Some(y1)
            } else if x0 > target_x && x1 < target_x {
                Some(y0 + (target_x - x0) * (y1 - y0) / (x1 - x0))
            } else {
                None
            }
        })
        .next();

    Optioned::from(value_opt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metfor::{HectoPascal, Meters};
    use optional::{none, some};

    #[test]
    fn interpolate_typed_column() {
        let ps = [
            some(HectoPascal(1000.0)),
            some(HectoPascal(900.0)),
            some(HectoPascal(800.0)),
        ];
        let hs = [some(Meters(100.0)), some(Meters(1000.0)), some(Meters(2000.0))];

        let h = linear_interpolate(&ps, &hs, HectoPascal(950.0));
        assert!(h.is_some());
        assert!((h.unpack().unpack() - 550.0).abs() < 1.0e-9);
    }

    #[test]
    fn interpolate_skips_missing() {
        let ps = [
            some(HectoPascal(1000.0)),
            none::<HectoPascal>(),
            some(HectoPascal(800.0)),
        ];
        let hs = [some(Meters(0.0)), some(Meters(500.0)), some(Meters(2000.0))];

        let h = linear_interpolate(&ps, &hs, HectoPascal(900.0));
        assert!(h.is_some());
        assert!((h.unpack().unpack() - 1000.0).abs() < 1.0e-9);
    }

    #[test]
    fn interpolate_out_of_range_is_none() {
        let ps = [some(HectoPascal(1000.0)), some(HectoPascal(900.0))];
        let hs = [some(Meters(0.0)), some(Meters(900.0))];

        assert!(linear_interpolate(&ps, &hs, HectoPascal(1050.0)).is_none());
        assert!(linear_interpolate(&ps, &hs, HectoPascal(850.0)).is_none());
    }

    #[test]
    fn descending_column() {
        let ps = [1000.0, 950.0, 900.0, 850.0];
        let ts = [25.0, 22.0, 19.0, 16.0];

        let t = interp_descending_column(&ps, &ts, 925.0);
        assert!(t.is_some());
        assert!((t.unpack() - 20.5).abs() < 1.0e-9);

        // Exact hit on a level
        let t = interp_descending_column(&ps, &ts, 900.0);
        assert!((t.unpack() - 19.0).abs() < 1.0e-9);

        // Below the lowest level
        assert!(interp_descending_column(&ps, &ts, 1010.0).is_none());
    }

    #[test]
    fn descending_column_skips_nan() {
        let ps = [1000.0, f64::NAN, 900.0];
        let ts = [20.0, 15.0, 10.0];

        let t = interp_descending_column(&ps, &ts, 950.0);
        assert!(t.is_some());
        assert!((t.unpack() - 15.0).abs() < 1.0e-9);
    }
}
