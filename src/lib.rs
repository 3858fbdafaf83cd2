//! Spanwise loading analysis for flying wings.
//!
//! The heavy lifting lives in the member crates: geometry normalization,
//! the vortex lattice and trim solver, wind archives, and manifest parsing.
//! This crate re-exports their public surface and adds the case orchestration
//! layer, so front-ends (CLI, services) share one entry point.

pub mod case;

pub use span_config::{
    CaseConfig, ConfigError, SpacingConfig, StationConfig, TrimValueConfig, WingConfig, load_case,
    load_wing,
};
pub use span_geometry::{
    GeometryError, NormalizeOptions, NormalizeReport, Planform, Section, Station, elliptical,
    rectangular, tapered,
};
pub use span_lattice::{
    Coefficients, FlightState, Influence, LatticeError, PanelGrid, PanelLoad, SolverConfig,
    SpacingScheme, TrimSolution, TrimTargets, TrimValue, VortexLattice,
};
pub use span_winds::{
    PressureLevelArchive, WindError, WindProvider, WindQuery, WindSample, pressure_altitude_hpa,
};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
