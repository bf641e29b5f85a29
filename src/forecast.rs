//! Fetch a multi-day city forecast and reduce it to plotting-ready series.
//!
//! The provider returns one JSON document per city code shaped as
//! `{"data": {"forecast": [{"ymd": "YYYY-MM-DD", "high": "高温 32℃", ...}]}}`.
//! This module owns the response models and the reduction of that document to
//! dates and integer daily high/low temperatures. The HTTP client lives in
//! [`client`], the city-name directory in [`city`], and the line chart in
//! [`chart`].

use crate::error::{ChartError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

pub mod chart;
pub mod city;
pub mod client;

pub use self::{
    chart::plot_temperature_series,
    city::{CityDirectory, CityLookup},
    client::{ForecastClient, ForecastConfig},
};

/// One day of the forecast, reduced to what the temperature chart needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDay {
    /// Display date, `"MM/DD"`.
    pub date: String,
    /// Daily high in whole degrees Celsius.
    pub high: i32,
    /// Daily low in whole degrees Celsius.
    pub low: i32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    data: ForecastPayload,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    forecast: Vec<ForecastRecord>,
}

#[derive(Debug, Deserialize)]
struct ForecastRecord {
    ymd: String,
    high: String,
    low: String,
}

/// Parse a raw forecast response body into an ordered list of days.
///
/// An empty forecast list is not an error; it parses to an empty vector.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastDay>> {
    let response: ApiResponse = serde_json::from_str(body)?;

    response
        .data
        .forecast
        .iter()
        .map(|record| {
            Ok(ForecastDay {
                date: parse_display_date(&record.ymd)?,
                high: parse_temperature(&record.high)?,
                low: parse_temperature(&record.low)?,
            })
        })
        .collect()
}

/// Split parsed days into the three parallel series the chart consumes.
pub fn split_series(days: &[ForecastDay]) -> (Vec<String>, Vec<i32>, Vec<i32>) {
    let dates = days.iter().map(|d| d.date.clone()).collect();
    let highs = days.iter().map(|d| d.high).collect();
    let lows = days.iter().map(|d| d.low).collect();
    (dates, highs, lows)
}

/// `"YYYY-MM-DD"` becomes `"MM/DD"`; anything else is a malformed response.
fn parse_display_date(ymd: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(ymd, "%Y-%m-%d")
        .map_err(|_| ChartError::MalformedResponse(format!("bad forecast date: {:?}", ymd)))?;

    Ok(date.format("%m/%d").to_string())
}

/// Extract the integer degrees from a temperature string such as `"高温 32℃"`.
///
/// The provider always sends a label, one space, then the value with a `℃`
/// suffix and no other decoration. Any other shape is a malformed response.
fn parse_temperature(text: &str) -> Result<i32> {
    text.split_whitespace()
        .nth(1)
        .and_then(|token| token.strip_suffix('℃'))
        .and_then(|token| token.parse::<i32>().ok())
        .ok_or_else(|| ChartError::MalformedResponse(format!("bad temperature string: {:?}", text)))
}
