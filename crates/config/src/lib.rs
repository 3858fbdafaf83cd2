//! Configuration models and loaders for wing and trim-case manifests.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One spanwise wing station in physical units. Lengths share one unit
/// (meters by convention); angles are in degrees.
#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    /// Leading-edge x, positive aft.
    pub xle_m: f64,
    /// Spanwise position, zero at the root.
    pub y_m: f64,
    /// Height above the root chord plane.
    #[serde(default)]
    pub z_m: f64,
    pub chord_m: f64,
    #[serde(default)]
    pub twist_deg: f64,
    /// Section zero-lift angle, negative for cambered sections.
    #[serde(default)]
    pub alpha0_deg: f64,
}

/// Half-span wing definition parsed from wing manifests.
#[derive(Debug, Deserialize, Clone)]
pub struct WingConfig {
    pub name: String,
    pub stations: Vec<StationConfig>,
    /// Target reference area; the chord distribution is rescaled to match.
    #[serde(default)]
    pub reference_area_m2: Option<f64>,
    /// Target tip height; the dihedral distribution is rescaled to match.
    #[serde(default)]
    pub tip_height_m: Option<f64>,
    /// Chordwise fraction of the straightened reference axis.
    #[serde(default)]
    pub axis_fraction: Option<f64>,
}

/// A trim axis in a case manifest: a fixed input or a solver unknown.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "mode")]
pub enum TrimValueConfig {
    #[serde(rename = "specified")]
    Specified { value: f64 },
    #[serde(rename = "solved")]
    Solved,
}

/// Spanwise panel spacing rule.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub enum SpacingConfig {
    #[serde(rename = "uniform")]
    Uniform,
    #[default]
    #[serde(rename = "cosine")]
    Cosine,
}

/// Trim case parsed from case manifests. Defaults hold every rate at zero
/// and solve the conjugate responses, so a minimal case only names an
/// incidence or a lift target.
#[derive(Debug, Deserialize, Clone)]
pub struct CaseConfig {
    pub name: String,
    #[serde(default = "specified_zero")]
    pub alpha_deg: TrimValueConfig,
    #[serde(default = "solved")]
    pub lift: TrimValueConfig,
    #[serde(default)]
    pub sideslip_deg: f64,
    #[serde(default = "specified_zero")]
    pub roll_rate: TrimValueConfig,
    #[serde(default = "solved")]
    pub roll_moment: TrimValueConfig,
    #[serde(default = "specified_zero")]
    pub yaw_rate: TrimValueConfig,
    #[serde(default = "solved")]
    pub yaw_moment: TrimValueConfig,
    #[serde(default = "default_panels")]
    pub panels: usize,
    #[serde(default)]
    pub spacing: SpacingConfig,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_relaxation")]
    pub relaxation: f64,
}

fn specified_zero() -> TrimValueConfig {
    TrimValueConfig::Specified { value: 0.0 }
}

fn solved() -> TrimValueConfig {
    TrimValueConfig::Solved
}

fn default_panels() -> usize {
    24
}

fn default_max_iterations() -> usize {
    20
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_relaxation() -> f64 {
    0.8
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a wing definition from a YAML or TOML manifest.
pub fn load_wing<P: AsRef<Path>>(path: P) -> Result<WingConfig, ConfigError> {
    load_record(path)
}

/// Load a trim case from a YAML or TOML manifest.
pub fn load_case<P: AsRef<Path>>(path: P) -> Result<CaseConfig, ConfigError> {
    load_record(path)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}
