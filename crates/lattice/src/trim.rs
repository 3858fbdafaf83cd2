//! Trim targets and the quasi-Newton trim iteration.
//!
//! Each trim axis is either an input or an unknown: angle of attack pairs
//! with the lift target, roll rate with the rolling moment, yaw rate with
//! the yawing moment. Exactly one member of each pair is specified; the
//! solver iterates the unknown rates/incidence until the specified responses
//! are met. Sideslip has no conjugate response and is always specified.

use nalgebra::DVector;

use crate::aggregate::{self, Coefficients, PanelLoad};
use crate::{LatticeError, VortexLattice};

/// A trim axis value: supplied by the caller or left for the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimValue {
    Specified(f64),
    Solved,
}

impl TrimValue {
    pub fn specified(self) -> Option<f64> {
        match self {
            TrimValue::Specified(v) => Some(v),
            TrimValue::Solved => None,
        }
    }

    pub fn is_solved(self) -> bool {
        matches!(self, TrimValue::Solved)
    }
}

/// The seven trim axes. Angles and rates are in radians and nondimensional
/// rate units (p b / 2V, r b / 2V).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimTargets {
    pub alpha: TrimValue,
    pub lift: TrimValue,
    pub sideslip: TrimValue,
    pub roll_rate: TrimValue,
    pub roll_moment: TrimValue,
    pub yaw_rate: TrimValue,
    pub yaw_moment: TrimValue,
}

impl TrimTargets {
    /// Fixed incidence: every response is an output.
    pub fn at_alpha(alpha: f64) -> Self {
        TrimTargets {
            alpha: TrimValue::Specified(alpha),
            lift: TrimValue::Solved,
            sideslip: TrimValue::Specified(0.0),
            roll_rate: TrimValue::Specified(0.0),
            roll_moment: TrimValue::Solved,
            yaw_rate: TrimValue::Specified(0.0),
            yaw_moment: TrimValue::Solved,
        }
    }

    /// Lift target with the incidence left to the solver.
    pub fn at_lift(cl: f64) -> Self {
        TrimTargets {
            alpha: TrimValue::Solved,
            lift: TrimValue::Specified(cl),
            ..Self::at_alpha(0.0)
        }
    }

    /// Check the pairing rules: one specified member per pair, sideslip
    /// always specified.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.sideslip.is_solved() {
            return Err(LatticeError::SideslipNotSpecified);
        }
        check_pair("angle of attack / lift", self.alpha, self.lift)?;
        check_pair("roll rate / rolling moment", self.roll_rate, self.roll_moment)?;
        check_pair("yaw rate / yawing moment", self.yaw_rate, self.yaw_moment)?;
        Ok(())
    }
}

fn check_pair(pair: &'static str, a: TrimValue, b: TrimValue) -> Result<(), LatticeError> {
    let specified = usize::from(!a.is_solved()) + usize::from(!b.is_solved());
    if specified != 1 {
        return Err(LatticeError::UnbalancedTrimPair { pair, specified });
    }
    Ok(())
}

/// Resolved flight state after a trim solve. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub alpha: f64,
    pub sideslip: f64,
    pub roll_rate: f64,
    pub yaw_rate: f64,
}

/// Iteration knobs for the trim loop.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Blend factor on each quasi-Newton update, in (0, 1].
    pub relaxation: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: 20,
            tolerance: 1e-6,
            relaxation: 0.8,
        }
    }
}

/// Output of one trim solve. A solve that hits the iteration cap is returned
/// with `converged == false` and the last iterate intact, so the caller can
/// inspect or retry; it is not an error.
#[derive(Debug, Clone)]
pub struct TrimSolution {
    pub converged: bool,
    pub iterations: usize,
    pub residual: f64,
    pub state: FlightState,
    pub circulation: Vec<f64>,
    pub coefficients: Coefficients,
    pub loading: Vec<PanelLoad>,
}

// Finite-difference step for the trim sensitivities.
const SENSITIVITY_STEP: f64 = 1e-4;
// A solved axis whose response changes less than this per unit step has no
// authority over its target.
const SENSITIVITY_FLOOR: f64 = 1e-9;

struct Unknown {
    target: f64,
    sensitivity: f64,
}

impl VortexLattice {
    /// Run the trim iteration for the given targets.
    pub fn solve(
        &self,
        targets: &TrimTargets,
        config: &SolverConfig,
    ) -> Result<TrimSolution, LatticeError> {
        targets.validate()?;

        let sideslip = targets.sideslip.specified().unwrap_or(0.0);
        let mut state = FlightState {
            alpha: 0.0,
            sideslip,
            roll_rate: targets.roll_rate.specified().unwrap_or(0.0),
            yaw_rate: targets.yaw_rate.specified().unwrap_or(0.0),
        };
        state.alpha = match targets.alpha {
            TrimValue::Specified(a) => a,
            TrimValue::Solved => {
                // flat-plate seed: classical lift slope plus the
                // chord-weighted zero-lift offset
                let cl_target = targets.lift.specified().unwrap_or(0.0);
                let slope = 2.0 * std::f64::consts::PI
                    / (1.0 + 2.0 / self.grid().aspect_ratio());
                cl_target / slope + self.grid().zero_lift_offset()
            }
        };

        let (mut gamma, mut coefficients) = self.response(&state)?;

        let alpha_unknown = if targets.alpha.is_solved() {
            let mut probe = state;
            probe.alpha += SENSITIVITY_STEP;
            let (_, c) = self.response(&probe)?;
            Some(self.unknown(
                "angle of attack",
                targets.lift,
                (c.cl - coefficients.cl) / SENSITIVITY_STEP,
            )?)
        } else {
            None
        };
        let roll_unknown = if targets.roll_rate.is_solved() {
            let mut probe = state;
            probe.roll_rate += SENSITIVITY_STEP;
            let (_, c) = self.response(&probe)?;
            Some(self.unknown(
                "roll rate",
                targets.roll_moment,
                (c.roll_moment - coefficients.roll_moment) / SENSITIVITY_STEP,
            )?)
        } else {
            None
        };
        let yaw_unknown = if targets.yaw_rate.is_solved() {
            let mut probe = state;
            probe.yaw_rate += SENSITIVITY_STEP;
            let (_, c) = self.response(&probe)?;
            Some(self.unknown(
                "yaw rate",
                targets.yaw_moment,
                (c.yaw_moment - coefficients.yaw_moment) / SENSITIVITY_STEP,
            )?)
        } else {
            None
        };

        let mut previous = gamma.clone();
        let mut iterations = 0;
        let mut residual: f64 = 0.0;
        let mut converged = false;

        for it in 1..=config.max_iterations {
            iterations = it;
            residual = 0.0;
            if let Some(u) = &alpha_unknown {
                let r = u.target - coefficients.cl;
                state.alpha += config.relaxation * r / u.sensitivity;
                residual = residual.max(r.abs());
            }
            if let Some(u) = &roll_unknown {
                let r = u.target - coefficients.roll_moment;
                state.roll_rate += config.relaxation * r / u.sensitivity;
                residual = residual.max(r.abs());
            }
            if let Some(u) = &yaw_unknown {
                let r = u.target - coefficients.yaw_moment;
                state.yaw_rate += config.relaxation * r / u.sensitivity;
                residual = residual.max(r.abs());
            }

            let (g, c) = self.response(&state)?;
            gamma = g;
            coefficients = c;

            let mut delta: f64 = 0.0;
            for i in 0..gamma.len() {
                delta = delta.max((gamma[i] - previous[i]).abs());
            }
            previous.copy_from(&gamma);

            if delta < config.tolerance && residual < config.tolerance {
                converged = true;
                break;
            }
        }

        let loading = aggregate::loading(self.grid(), &gamma, &state);
        Ok(TrimSolution {
            converged,
            iterations,
            residual,
            state,
            circulation: gamma.iter().copied().collect(),
            coefficients,
            loading,
        })
    }

    fn unknown(
        &self,
        axis: &'static str,
        target: TrimValue,
        sensitivity: f64,
    ) -> Result<Unknown, LatticeError> {
        if sensitivity.abs() < SENSITIVITY_FLOOR {
            return Err(LatticeError::DegenerateTrimPair { axis });
        }
        Ok(Unknown {
            target: target.specified().unwrap_or(0.0),
            sensitivity,
        })
    }

    fn response(
        &self,
        state: &FlightState,
    ) -> Result<(DVector<f64>, Coefficients), LatticeError> {
        let gamma = self.circulation(state)?;
        let coefficients =
            aggregate::coefficients(self.grid(), self.influence(), &gamma, state);
        Ok((gamma, coefficients))
    }
}
