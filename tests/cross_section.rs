//! End-to-end checks of the cross-section pipeline on a synthetic domain.

use std::fs;

use metfor::HectoPascal;

use weather_charts::cross_section::{plot_cross_section, CrossSection, CrossSectionConfig};
use weather_charts::ChartError;

mod utils;

#[test]
fn build_produces_consistent_shapes() {
    let grid = utils::synthetic_grid();
    let config = CrossSectionConfig::default();

    let section = CrossSection::build(&grid, &config).expect("section should build");

    let n_samples = section.path.len();
    let n_levels = section.levels.len();
    assert!(n_samples > 2);
    assert_eq!(n_levels, 31); // 1000 to 700 hPa every 10 hPa

    assert_eq!(section.temperature.dim(), (n_samples, n_levels));
    assert_eq!(section.tangential_wind.dim(), (n_samples, n_levels));
    assert_eq!(section.vertical_wind.dim(), (n_samples, n_levels));
}

#[test]
fn levels_descend_from_bottom_to_top() {
    let grid = utils::synthetic_grid();
    let section = CrossSection::build(&grid, &CrossSectionConfig::default())
        .expect("section should build");

    assert_eq!(section.levels.first().copied(), Some(HectoPascal(1000.0)));
    assert_eq!(section.levels.last().copied(), Some(HectoPascal(700.0)));
    assert!(section.levels.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn temperatures_are_finite_and_plausible() {
    let grid = utils::synthetic_grid();
    let section = CrossSection::build(&grid, &CrossSectionConfig::default())
        .expect("section should build");

    // Every requested level is bracketed by the synthetic column, so no holes.
    assert!(section.temperature.iter().all(|t| t.is_finite()));
    assert!(section.temperature.iter().all(|&t| t > -5.0 && t < 40.0));

    // Cooling with height: the lowest level is warmer than the highest.
    let surface_mean = section.temperature.column(0).mean().unwrap();
    let top_mean = section
        .temperature
        .column(section.levels.len() - 1)
        .mean()
        .unwrap();
    assert!(surface_mean > top_mean + 5.0);
}

#[test]
fn uniform_southwesterly_projects_fully_onto_the_line() {
    let grid = utils::synthetic_grid();
    let section = CrossSection::build(&grid, &CrossSectionConfig::default())
        .expect("section should build");

    // The default line runs northeast, parallel to the 6/6 m/s wind.
    assert!((section.bearing_deg - 45.0).abs() < 1.0e-9);
    let speed = (2.0_f64 * 6.0 * 6.0).sqrt();
    assert!(section
        .tangential_wind
        .iter()
        .all(|&t| (t - speed).abs() < 1.0e-6));
}

#[test]
fn vertical_wind_carries_the_exaggeration() {
    let grid = utils::synthetic_grid();
    let config = CrossSectionConfig::default();
    let section = CrossSection::build(&grid, &config).expect("section should build");

    let expected = 0.02 * config.vertical_exaggeration;
    assert!(section
        .vertical_wind
        .iter()
        .all(|&w| (w - expected).abs() < 1.0e-9));
}

#[test]
fn ticks_cover_the_longitude_span() {
    let grid = utils::synthetic_grid();
    let section = CrossSection::build(&grid, &CrossSectionConfig::default())
        .expect("section should build");

    // 120.2 to 121.2 every 0.2 degrees.
    assert_eq!(section.ticks.len(), 6);
    assert!(section
        .ticks
        .windows(2)
        .all(|w| w[1].index > w[0].index && w[1].lon > w[0].lon));
    assert!((section.ticks[0].lon - 120.2).abs() < 0.05);
    assert!((section.ticks[5].lon - 121.2).abs() < 0.05);
}

#[test]
fn height_labels_increase_as_pressure_drops() {
    let grid = utils::synthetic_grid();
    let section = CrossSection::build(&grid, &CrossSectionConfig::default())
        .expect("section should build");

    assert_eq!(section.height_labels.len(), 7); // 1000 to 700 every 50 hPa
    assert!(section
        .height_labels
        .windows(2)
        .all(|w| w[0].0 > w[1].0 && w[0].1 < w[1].1));
    // Heights are above ground, so the bottom label sits low.
    assert!(section.height_labels[0].1 < 500);
}

#[test]
fn inverted_pressure_range_is_rejected() {
    let grid = utils::synthetic_grid();
    let config = CrossSectionConfig {
        pressure_bottom: 700.0,
        pressure_top: 1000.0,
        ..CrossSectionConfig::default()
    };

    match CrossSection::build(&grid, &config) {
        Err(ChartError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn degenerate_line_is_rejected() {
    let grid = utils::synthetic_grid();
    let config = CrossSectionConfig {
        end: CrossSectionConfig::default().start,
        ..CrossSectionConfig::default()
    };

    assert!(CrossSection::build(&grid, &config).is_err());
}

#[test]
fn chart_renders_to_png() {
    let grid = utils::synthetic_grid();
    let config = CrossSectionConfig::default();
    let section = CrossSection::build(&grid, &config).expect("section should build");

    let dir = std::env::temp_dir().join("weather_charts_test_cross_section");
    fs::create_dir_all(&dir).expect("temp dir");
    let output = dir.join("section.png");

    plot_cross_section(&section, &config, "A-A' test section", &output)
        .expect("chart should render");

    let meta = fs::metadata(&output).expect("output file");
    assert!(meta.len() > 0);
}
