//! Build and render a vertical cross section from one WRF output file.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use weather_charts::cross_section::{plot_cross_section, CrossSection, CrossSectionConfig, ModelGrid};
use weather_charts::{ChartError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "cross_section_chart",
    about = "Plot a temperature and wind cross section from WRF model output"
)]
struct Args {
    /// Path to the wrfout NetCDF file.
    #[arg(long, short)]
    input: PathBuf,

    /// Optional JSON file overriding the cross section configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chart title.
    #[arg(long, default_value = "Vertical cross section")]
    title: String,

    /// Output PNG path.
    #[arg(long, short, default_value = "cross_section.png")]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match args.config {
        Some(path) => {
            let contents = fs::read_to_string(&path)
                .map_err(|_| ChartError::MissingResource(path.clone()))?;
            serde_json::from_str::<CrossSectionConfig>(&contents)?
        }
        None => CrossSectionConfig::default(),
    };

    log::info!("reading model output from {}", args.input.display());
    let grid = ModelGrid::from_wrf(&args.input)?;

    let section = CrossSection::build(&grid, &config)?;
    log::info!(
        "sampled {} columns between ({:.2}, {:.2}) and ({:.2}, {:.2})",
        section.path.len(),
        config.start.0,
        config.start.1,
        config.end.0,
        config.end.1
    );

    plot_cross_section(&section, &config, &args.title, &args.output)?;
    println!("wrote {}", args.output.display());

    Ok(())
}
