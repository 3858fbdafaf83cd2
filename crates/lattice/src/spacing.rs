//! Spanwise panel distribution schemes.

use crate::LatticeError;

/// How panel edges are distributed across the span. Cosine spacing clusters
/// panels toward the tips where the loading gradient is steepest; uniform
/// spacing is mainly useful for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingScheme {
    Uniform,
    Cosine,
}

/// Panel edge stations over the full span, eta in [-1, 1]. The count must be
/// even so one node sits on the centerline and the two half-spans mirror.
pub fn nodes(scheme: SpacingScheme, panels: usize) -> Result<Vec<f64>, LatticeError> {
    if panels < 2 || panels % 2 != 0 {
        return Err(LatticeError::PanelCount { panels });
    }
    let n = panels as f64;
    let stations = match scheme {
        SpacingScheme::Cosine => (0..=panels)
            .map(|k| -(std::f64::consts::PI * k as f64 / n).cos())
            .collect(),
        SpacingScheme::Uniform => (0..=panels).map(|k| -1.0 + 2.0 * k as f64 / n).collect(),
    };
    Ok(stations)
}

/// Collocation stations, one per panel. Cosine spacing places them at the
/// angular midpoints rather than the arithmetic ones; that choice keeps the
/// staggered downwash quadrature exact for smooth loadings.
pub fn collocation(scheme: SpacingScheme, edges: &[f64]) -> Vec<f64> {
    let panels = edges.len() - 1;
    let n = panels as f64;
    match scheme {
        SpacingScheme::Cosine => (0..panels)
            .map(|k| -(std::f64::consts::PI * (k as f64 + 0.5) / n).cos())
            .collect(),
        SpacingScheme::Uniform => (0..panels)
            .map(|k| 0.5 * (edges[k] + edges[k + 1]))
            .collect(),
    }
}
