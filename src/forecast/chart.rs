//! Line chart of daily high and low temperatures.

use crate::{
    error::{ChartError, Result},
    forecast::ForecastDay,
};
use log::info;
use plotters::prelude::*;
use std::path::Path;

/// Render the high/low series for the given days to a PNG file.
///
/// The x axis is the day index labeled with the `MM/DD` display dates; the y
/// axis spans the data with a little padding.
pub fn plot_temperature_series<P: AsRef<Path>>(
    days: &[ForecastDay],
    title: &str,
    output: P,
) -> Result<()> {
    if days.is_empty() {
        return Err(ChartError::InvalidInput("no forecast days to plot"));
    }

    let output = output.as_ref();
    let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();

    let min_temp = days.iter().map(|d| d.low).min().unwrap_or(0);
    let max_temp = days.iter().map(|d| d.high).max().unwrap_or(0);
    let pad = ((max_temp - min_temp) / 10).max(1);
    let y_range = (min_temp - pad)..(max_temp + pad);

    // Day index on the x axis, one label slot per day.
    let x_range = 0..(days.len() as i32 - 1);

    let root = BitMapBackend::new(output, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("date")
        .y_desc("high/low temp (deg C)")
        .x_labels(days.len())
        .x_label_formatter(&|x| {
            dates
                .get(*x as usize)
                .map(|d| (*d).to_owned())
                .unwrap_or_default()
        })
        .light_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            days.iter().enumerate().map(|(i, d)| (i as i32, d.high)),
            RED.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("daily high")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            days.iter().enumerate().map(|(i, d)| (i as i32, d.low)),
            BLUE.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("daily low")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLUE.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("wrote temperature chart to {}", output.display());

    Ok(())
}

fn render_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_days() -> Vec<ForecastDay> {
        vec![
            ForecastDay {
                date: "09/15".to_owned(),
                high: 32,
                low: 25,
            },
            ForecastDay {
                date: "09/16".to_owned(),
                high: 34,
                low: 25,
            },
            ForecastDay {
                date: "09/17".to_owned(),
                high: 30,
                low: 24,
            },
        ]
    }

    #[test]
    fn writes_a_png() {
        let dir = std::env::temp_dir().join("weather_charts_test_line");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("temps.png");

        plot_temperature_series(&sample_days(), "test city", &path).expect("chart should render");
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn empty_series_is_invalid_input() {
        let dir = std::env::temp_dir();
        let path = dir.join("weather_charts_should_not_exist.png");
        assert!(plot_temperature_series(&[], "empty", &path).is_err());
    }
}
