//! Weissinger vortex lifting-line solver.
//!
//! The wing is discretized into full-span panels, each carrying one horseshoe
//! vortex: a bound segment on the local quarter-chord line plus two trailing
//! legs running downstream to infinity. Flow tangency at the three-quarter
//! chord control points gives the linear system `A G = rhs` for the
//! nondimensional circulation G; the induced drag follows from a second
//! operator B built from the trailing legs alone, evaluated in the far-wake
//! plane, so that `CDi = (2/area_ratio) G' B G`.
//!
//! A [`VortexLattice`] owns the panel grid, both influence matrices, and the
//! cached LU factorization of A; it is immutable after construction and a
//! single instance serves any number of trim solves over the same geometry.

use nalgebra::{DVector, Dyn};
use thiserror::Error;

pub mod aggregate;
pub mod grid;
pub mod influence;
pub mod spacing;
pub mod trim;

pub use aggregate::{Coefficients, PanelLoad};
pub use grid::PanelGrid;
pub use influence::Influence;
pub use spacing::SpacingScheme;
pub use trim::{FlightState, SolverConfig, TrimSolution, TrimTargets, TrimValue};

use span_geometry::Planform;

/// Errors raised while building a lattice or running a trim solve. Exceeding
/// the iteration cap is not an error; it is reported as a non-converged
/// [`TrimSolution`].
#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("panel count must be an even number of at least two, got {panels}")]
    PanelCount { panels: usize },
    #[error("trim pair {pair} must have exactly one specified member, found {specified}")]
    UnbalancedTrimPair {
        pair: &'static str,
        specified: usize,
    },
    #[error("sideslip has no conjugate response equation and must be specified")]
    SideslipNotSpecified,
    #[error("influence matrix is singular for {panels} panels; check for coincident stations")]
    SingularInfluence { panels: usize },
    #[error("solved {axis} has no authority over its paired target on this planform")]
    DegenerateTrimPair { axis: &'static str },
}

/// Assembled lattice: panel grid, influence matrices, and the cached LU
/// factorization of the flow-tangency matrix.
#[derive(Debug)]
pub struct VortexLattice {
    grid: PanelGrid,
    influence: Influence,
    lu: nalgebra::linalg::LU<f64, Dyn, Dyn>,
}

impl VortexLattice {
    /// Discretize the planform and assemble the influence matrices.
    pub fn new(
        planform: &Planform,
        scheme: SpacingScheme,
        panels: usize,
    ) -> Result<Self, LatticeError> {
        let grid = PanelGrid::new(planform, scheme, panels)?;
        let influence = Influence::assemble(&grid);
        let lu = influence.normalwash.clone().lu();
        Ok(VortexLattice {
            grid,
            influence,
            lu,
        })
    }

    /// Panel grid the matrices were assembled from.
    pub fn grid(&self) -> &PanelGrid {
        &self.grid
    }

    /// Assembled influence operators.
    pub fn influence(&self) -> &Influence {
        &self.influence
    }

    /// Circulation for a fully specified onset flow, via the cached
    /// factorization.
    pub(crate) fn circulation(
        &self,
        state: &FlightState,
    ) -> Result<DVector<f64>, LatticeError> {
        let rhs = self.grid.onset_rhs(state);
        solve_factored(&self.lu, &rhs, self.grid.panel_count())
    }
}

fn solve_factored(
    lu: &nalgebra::linalg::LU<f64, Dyn, Dyn>,
    rhs: &DVector<f64>,
    panels: usize,
) -> Result<DVector<f64>, LatticeError> {
    lu.solve(rhs)
        .ok_or(LatticeError::SingularInfluence { panels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    // Validated geometry cannot produce a singular flow-tangency matrix, so
    // the error path is exercised on a hand-built factorization.
    #[test]
    fn singular_factorization_is_reported() {
        let lu = DMatrix::<f64>::zeros(3, 3).lu();
        let rhs = DVector::from_element(3, 1.0);
        let err = solve_factored(&lu, &rhs, 3).unwrap_err();
        assert!(matches!(err, LatticeError::SingularInfluence { panels: 3 }));
    }
}
