//! Percentile wind speeds from pressure-level archive files.
//!
//! An archive directory holds one CSV per pressure level, named
//! `wind<level>.csv`, with a `Latitude` column and one `perc<N>` column per
//! stored percentile. A query names a latitude, a percentile, and a cruise
//! altitude; the altitude is converted to an ISA pressure altitude and the
//! file for the nearest configured level answers the lookup.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use span_core::constants::{
    ISA_PRESSURE_EXPONENT, ISA_PRESSURE_LAPSE_PER_M, ISA_SEA_LEVEL_PRESSURE_PA,
};
use span_core::units::ft_to_m;

/// Pressure levels shipped with the archive, in hPa.
pub const DEFAULT_LEVELS: [u32; 2] = [550, 650];

/// Widest accepted gap between the ISA pressure altitude and a stored level.
pub const LEVEL_TOLERANCE_HPA: f64 = 15.0;

#[derive(Debug, Error)]
pub enum WindError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error(
        "no stored pressure level within {tolerance_hpa} hPa of {pressure_hpa:.1} hPa"
    )]
    NoMatchingLevel {
        pressure_hpa: f64,
        tolerance_hpa: f64,
    },
    #[error("latitude {latitude_deg} not present in {}", .path.display())]
    UnknownLatitude { latitude_deg: f64, path: PathBuf },
    #[error("percentile column {column} not present in {}", .path.display())]
    MissingPercentile { column: String, path: PathBuf },
}

/// One wind lookup request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindQuery {
    pub latitude_deg: f64,
    pub percentile: u32,
    pub altitude_ft: f64,
}

/// Result of a lookup: the speed plus the pressures that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    pub speed_m_s: f64,
    /// ISA pressure altitude of the query, hPa.
    pub pressure_hpa: f64,
    /// Archive level that answered the query, hPa.
    pub level_hpa: u32,
}

/// Source of percentile wind speeds.
pub trait WindProvider {
    fn wind_speed(&self, query: &WindQuery) -> Result<WindSample, WindError>;
}

/// ISA pressure altitude in hPa for a geometric altitude in feet.
pub fn pressure_altitude_hpa(altitude_ft: f64) -> f64 {
    let h = ft_to_m(altitude_ft);
    (ISA_SEA_LEVEL_PRESSURE_PA / 100.0)
        * (1.0 - ISA_PRESSURE_LAPSE_PER_M * h).powf(ISA_PRESSURE_EXPONENT)
}

/// Archive directory of per-level wind CSVs.
#[derive(Debug, Clone)]
pub struct PressureLevelArchive {
    dir: PathBuf,
    levels: Vec<u32>,
    tolerance_hpa: f64,
}

impl PressureLevelArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_levels(dir, DEFAULT_LEVELS.to_vec())
    }

    pub fn with_levels(dir: impl Into<PathBuf>, levels: Vec<u32>) -> Self {
        PressureLevelArchive {
            dir: dir.into(),
            levels,
            tolerance_hpa: LEVEL_TOLERANCE_HPA,
        }
    }

    /// Path of the CSV backing a pressure level.
    pub fn level_path(&self, level_hpa: u32) -> PathBuf {
        self.dir.join(format!("wind{level_hpa}.csv"))
    }

    /// Nearest configured level to the given pressure, within tolerance.
    fn select_level(&self, pressure_hpa: f64) -> Result<u32, WindError> {
        self.levels
            .iter()
            .copied()
            .map(|level| (level, (f64::from(level) - pressure_hpa).abs()))
            .filter(|(_, gap)| *gap < self.tolerance_hpa)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(level, _)| level)
            .ok_or(WindError::NoMatchingLevel {
                pressure_hpa,
                tolerance_hpa: self.tolerance_hpa,
            })
    }
}

impl WindProvider for PressureLevelArchive {
    fn wind_speed(&self, query: &WindQuery) -> Result<WindSample, WindError> {
        let pressure_hpa = pressure_altitude_hpa(query.altitude_ft);
        let level_hpa = self.select_level(pressure_hpa)?;
        let path = self.level_path(level_hpa);
        let speed_m_s = read_speed(&path, query.latitude_deg, query.percentile)?;
        Ok(WindSample {
            speed_m_s,
            pressure_hpa,
            level_hpa,
        })
    }
}

fn read_speed(path: &Path, latitude_deg: f64, percentile: u32) -> Result<f64, WindError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let latitude_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("latitude"))
        .ok_or_else(|| WindError::UnknownLatitude {
            latitude_deg,
            path: path.to_path_buf(),
        })?;
    let column = format!("perc{percentile}");
    let speed_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(&column))
        .ok_or_else(|| WindError::MissingPercentile {
            column: column.clone(),
            path: path.to_path_buf(),
        })?;

    for rec in rdr.records() {
        let r = rec?;
        let row_latitude: f64 = match r.get(latitude_idx).unwrap_or("").parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        if row_latitude == latitude_deg {
            let speed: f64 = r
                .get(speed_idx)
                .unwrap_or("")
                .parse()
                .map_err(|_| WindError::MissingPercentile {
                    column: column.clone(),
                    path: path.to_path_buf(),
                })?;
            return Ok(speed);
        }
    }
    Err(WindError::UnknownLatitude {
        latitude_deg,
        path: path.to_path_buf(),
    })
}
