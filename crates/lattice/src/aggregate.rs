//! Reduction of a converged circulation distribution into aerodynamic
//! coefficients and per-panel loading. Pure functions; nothing here mutates
//! the grid, the matrices, or the circulation.

use nalgebra::DVector;

use crate::grid::PanelGrid;
use crate::influence::Influence;
use crate::trim::FlightState;

/// Scalar aerodynamic coefficients for one solved state.
///
/// Sign conventions: rolling moment positive right wing down, yawing moment
/// positive nose right, both about the centerline. `bending` is the root
/// bending coefficient of the starboard half-span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub cl: f64,
    pub cdi: f64,
    /// Diagonal (self-induced) share of CDi.
    pub cdi_self: f64,
    /// Off-diagonal (cross-panel) share of CDi.
    pub cdi_cross: f64,
    pub roll_moment: f64,
    pub yaw_moment: f64,
    pub bending: f64,
    /// CL^2 / (pi AR CDi); zero when there is no induced drag to compare.
    pub span_efficiency: f64,
}

/// Loading at one panel, in directly plottable form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLoad {
    pub eta: f64,
    pub chord: f64,
    pub circulation: f64,
    /// Local section lift coefficient, 2 G Vx / chord.
    pub section_cl: f64,
    /// Nondimensional load per span, chord * cl = 2 G Vx.
    pub load_per_span: f64,
}

/// Reduce circulation into the coefficient set.
pub fn coefficients(
    grid: &PanelGrid,
    influence: &Influence,
    gamma: &DVector<f64>,
    state: &FlightState,
) -> Coefficients {
    let n = grid.panel_count();
    let sbar = grid.area_ratio();
    let vx = grid.onset_x(state);
    let eta = grid.eta();
    let width = grid.width();

    let mut cl = 0.0;
    let mut roll = 0.0;
    let mut bending = 0.0;
    for i in 0..n {
        let lift = gamma[i] * vx[i] * width[i];
        cl += lift;
        roll -= lift * eta[i];
        if eta[i] > 0.0 {
            bending += lift * eta[i];
        }
    }
    cl *= 2.0 / sbar;
    roll /= sbar;
    bending *= 2.0 / sbar;

    let downwash = &influence.drag * gamma;
    let mut cdi = 0.0;
    let mut cdi_self = 0.0;
    let mut yaw = 0.0;
    for i in 0..n {
        cdi += gamma[i] * downwash[i];
        cdi_self += gamma[i] * influence.drag[(i, i)] * gamma[i];
        yaw += eta[i] * gamma[i] * downwash[i];
    }
    cdi *= 2.0 / sbar;
    cdi_self *= 2.0 / sbar;
    yaw /= sbar;

    let ar = grid.aspect_ratio();
    let span_efficiency = if cdi != 0.0 {
        cl * cl / (std::f64::consts::PI * ar * cdi)
    } else {
        0.0
    };

    Coefficients {
        cl,
        cdi,
        cdi_self,
        cdi_cross: cdi - cdi_self,
        roll_moment: roll,
        yaw_moment: yaw,
        bending,
        span_efficiency,
    }
}

/// Per-panel loading table for a solved state.
pub fn loading(grid: &PanelGrid, gamma: &DVector<f64>, state: &FlightState) -> Vec<PanelLoad> {
    let vx = grid.onset_x(state);
    (0..grid.panel_count())
        .map(|i| {
            let ccl = 2.0 * gamma[i] * vx[i];
            PanelLoad {
                eta: grid.eta()[i],
                chord: grid.chord()[i],
                circulation: gamma[i],
                section_cl: ccl / grid.chord()[i],
                load_per_span: ccl,
            }
        })
        .collect()
}
