//! Trim case orchestration: manifest types in, a solved case report out.
//!
//! The module is the seam between the serde-facing configuration crates and
//! the domain crates. Conversions live here so the member crates stay free
//! of each other's types.

use span_config::{CaseConfig, SpacingConfig, TrimValueConfig, WingConfig};
use span_core::units::deg_to_rad;
use span_geometry::{GeometryError, NormalizeOptions, NormalizeReport, Planform, Station};
use span_lattice::{
    LatticeError, SolverConfig, SpacingScheme, TrimSolution, TrimTargets, TrimValue, VortexLattice,
};

/// Top-level case error.
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("wing geometry rejected: {0}")]
    Geometry(#[from] GeometryError),
    #[error("trim solve failed: {0}")]
    Lattice(#[from] LatticeError),
}

/// Aggregated output of one trim case.
#[derive(Debug)]
pub struct CaseReport {
    pub wing: String,
    pub case: String,
    pub normalize: NormalizeReport,
    pub panels: usize,
    pub aspect_ratio: f64,
    pub area_ratio: f64,
    pub solution: TrimSolution,
}

/// Convert a wing manifest into the nondimensional planform plus its
/// normalize report.
pub fn planform_from_config(
    config: &WingConfig,
) -> Result<(Planform, NormalizeReport), GeometryError> {
    let stations: Vec<Station> = config
        .stations
        .iter()
        .map(|s| Station {
            xle: s.xle_m,
            y: s.y_m,
            z: s.z_m,
            chord: s.chord_m,
            twist_deg: s.twist_deg,
            alpha0_deg: s.alpha0_deg,
        })
        .collect();
    let options = NormalizeOptions {
        reference_area: config.reference_area_m2,
        tip_height: config.tip_height_m,
        axis_fraction: config.axis_fraction,
    };
    Planform::with_options(&stations, options)
}

/// Convert the trim axes of a case manifest into solver targets. Angle axes
/// carry degrees in manifests and radians in targets.
pub fn targets_from_config(config: &CaseConfig) -> TrimTargets {
    TrimTargets {
        alpha: trim_angle(config.alpha_deg),
        lift: trim_value(config.lift),
        sideslip: TrimValue::Specified(deg_to_rad(config.sideslip_deg)),
        roll_rate: trim_value(config.roll_rate),
        roll_moment: trim_value(config.roll_moment),
        yaw_rate: trim_value(config.yaw_rate),
        yaw_moment: trim_value(config.yaw_moment),
    }
}

pub fn solver_config_from_config(config: &CaseConfig) -> SolverConfig {
    SolverConfig {
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
        relaxation: config.relaxation,
    }
}

pub fn spacing_from_config(config: SpacingConfig) -> SpacingScheme {
    match config {
        SpacingConfig::Uniform => SpacingScheme::Uniform,
        SpacingConfig::Cosine => SpacingScheme::Cosine,
    }
}

fn trim_value(config: TrimValueConfig) -> TrimValue {
    match config {
        TrimValueConfig::Specified { value } => TrimValue::Specified(value),
        TrimValueConfig::Solved => TrimValue::Solved,
    }
}

fn trim_angle(config: TrimValueConfig) -> TrimValue {
    match config {
        TrimValueConfig::Specified { value } => TrimValue::Specified(deg_to_rad(value)),
        TrimValueConfig::Solved => TrimValue::Solved,
    }
}

/// Run one trim case end to end: normalize the wing, build the lattice,
/// solve for the targets.
pub fn run_case(wing: &WingConfig, case: &CaseConfig) -> Result<CaseReport, CaseError> {
    let (planform, normalize) = planform_from_config(wing)?;
    let lattice = VortexLattice::new(&planform, spacing_from_config(case.spacing), case.panels)?;
    let targets = targets_from_config(case);
    let solver = solver_config_from_config(case);
    let solution = lattice.solve(&targets, &solver)?;
    Ok(CaseReport {
        wing: wing.name.clone(),
        case: case.name.clone(),
        normalize,
        panels: case.panels,
        aspect_ratio: lattice.grid().aspect_ratio(),
        area_ratio: lattice.grid().area_ratio(),
        solution,
    })
}
