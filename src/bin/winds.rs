use std::path::PathBuf;

use clap::Parser;
use spanwise::{PressureLevelArchive, WindProvider, WindQuery};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Look up a percentile wind speed for a cruise altitude"
)]
struct Cli {
    /// Directory holding wind<level>.csv archives
    #[arg(long, default_value = "data/winds")]
    archive: PathBuf,

    /// Site latitude in degrees
    #[arg(long)]
    latitude: f64,

    /// Percentile column to read (80, 85, 90, ...)
    #[arg(long, default_value_t = 90)]
    percentile: u32,

    /// Cruise altitude in feet
    #[arg(long)]
    altitude_ft: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let archive = PressureLevelArchive::new(&cli.archive);
    let query = WindQuery {
        latitude_deg: cli.latitude,
        percentile: cli.percentile,
        altitude_ft: cli.altitude_ft,
    };
    let sample = archive.wind_speed(&query)?;
    println!(
        "Wind at latitude {:.1} deg, {:.0} ft ({:.1} hPa, {} hPa archive): {:.2} m/s (percentile {})",
        cli.latitude,
        cli.altitude_ft,
        sample.pressure_hpa,
        sample.level_hpa,
        sample.speed_m_s,
        cli.percentile
    );
    Ok(())
}
