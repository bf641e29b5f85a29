//! Error types for the weather-charts crate.
use std::path::PathBuf;
use thiserror::Error;

/// Error type for the crate.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A required local file (city directory, dataset, font) is absent.
    #[error("required file not found: {0}")]
    MissingResource(PathBuf),

    /// The requested city name is not in the city directory.
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// The forecast response or a local data file did not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedResponse(String),

    /// The HTTP request failed or returned a non-success status.
    #[error("request failed: {0}")]
    Http(String),

    /// The gridded dataset could not be read or was missing a field.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Missing data during interpolation, or it would have been extrapolation.
    #[error("no bracketing values found during interpolation")]
    Interpolation,

    /// Bad or invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// An error from the chart backend.
    #[error("rendering failed: {0}")]
    Render(String),
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, ChartError>;

impl From<reqwest::Error> for ChartError {
    fn from(err: reqwest::Error) -> Self {
        ChartError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::MalformedResponse(err.to_string())
    }
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for ChartError {
    fn from(err: netcdf::Error) -> Self {
        ChartError::Dataset(err.to_string())
    }
}
