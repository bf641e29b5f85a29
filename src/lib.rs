#![warn(missing_docs)]
//! Short weather analyses that end in a chart.
//!
//! Two independent pipelines share this crate and no code:
//!
//! * [`forecast`] fetches a multi-day city forecast from an HTTP service,
//!   reduces it to date and daily high/low series, and draws a temperature
//!   line chart.
//! * [`cross_section`] takes one time step of regional model output and
//!   builds a vertical cross section of temperature and wind along a fixed
//!   line, then draws it with a pressure axis, an approximate height axis, a
//!   colorbar, and a locator panel.
//!
//! Both pipelines are synchronous and single pass: acquire data, transform it
//! into plotting-ready arrays, render. Any failed stage aborts the run with a
//! [`ChartError`].

//
// API
//
pub use crate::error::{ChartError, Result};
pub use crate::interpolation::linear_interpolate;

pub mod cross_section;
pub mod forecast;

// Modules
mod error;
mod interpolation;
