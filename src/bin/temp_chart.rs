//! Fetch a city forecast and render the daily high/low temperature chart.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use weather_charts::forecast::{plot_temperature_series, CityDirectory, ForecastClient, ForecastConfig};
use weather_charts::Result;

#[derive(Debug, Parser)]
#[command(name = "temp_chart", about = "Plot a multi-day temperature forecast for a city")]
struct Args {
    /// City name to look up in the city directory.
    #[arg(long, conflicts_with = "code")]
    city: Option<String>,

    /// Numeric city code, bypassing the directory lookup.
    #[arg(long)]
    code: Option<String>,

    /// Path to the city directory JSON file.
    #[arg(long, default_value = "test_data/cities.json")]
    cities: PathBuf,

    /// Base URL of the forecast service.
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Chart title. Defaults to the city name or code.
    #[arg(long)]
    title: Option<String>,

    /// Output PNG path.
    #[arg(long, short, default_value = "temperature.png")]
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
    let mut config = ForecastConfig::default();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }

    let client = ForecastClient::new(config)?;

    let (days, label) = match (args.city, args.code) {
        (_, Some(code)) => {
            log::info!("fetching forecast for city code {}", code);
            (client.fetch_by_code(&code)?, code)
        }
        (Some(city), None) => {
            let directory = CityDirectory::load(&args.cities)?;
            log::info!(
                "fetching forecast for {} via directory of {} cities",
                city,
                directory.len()
            );
            (client.fetch_by_name(&directory, &city)?, city)
        }
        (None, None) => {
            return Err(weather_charts::ChartError::InvalidInput(
                "pass --city or --code to select a location",
            ));
        }
    };

    let title = args
        .title
        .unwrap_or_else(|| format!("{} temperature forecast", label));

    plot_temperature_series(&days, &title, &args.output)?;
    println!("wrote {}", args.output.display());

    Ok(())
}
