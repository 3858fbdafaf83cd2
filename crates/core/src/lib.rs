//! Core constants, unit conversions, and shared numeric primitives for the
//! spanwise workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Sea-level standard pressure (Pa).
    pub const ISA_SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
    /// Pressure lapse factor of the ISA troposphere (per metre of altitude).
    pub const ISA_PRESSURE_LAPSE_PER_M: f64 = 2.25577e-5;
    /// Exponent of the ISA tropospheric pressure law.
    pub const ISA_PRESSURE_EXPONENT: f64 = 5.25588;
    /// Metres per international foot.
    pub const METERS_PER_FOOT: f64 = 0.3048;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::METERS_PER_FOOT;

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Convert feet to metres.
    #[inline]
    pub fn ft_to_m(v: f64) -> f64 {
        v * METERS_PER_FOOT
    }

    /// Convert metres to feet.
    #[inline]
    pub fn m_to_ft(v: f64) -> f64 {
        v / METERS_PER_FOOT
    }
}

/// Small numeric helpers shared across crates.
pub mod math {
    /// Piecewise-linear interpolation over a sorted abscissa table, clamped
    /// to the end values outside the table range.
    pub fn interp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
        debug_assert_eq!(xs.len(), ys.len());
        if xs.is_empty() {
            return 0.0;
        }
        if x <= xs[0] {
            return ys[0];
        }
        if x >= xs[xs.len() - 1] {
            return ys[ys.len() - 1];
        }
        for i in 0..xs.len() - 1 {
            if xs[i] <= x && x <= xs[i + 1] {
                let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
                return ys[i] * (1.0 - t) + ys[i + 1] * t;
            }
        }
        ys[ys.len() - 1]
    }

    /// Trapezoidal integral of `ys` over `xs`.
    pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
        debug_assert_eq!(xs.len(), ys.len());
        let mut total = 0.0;
        for i in 0..xs.len().saturating_sub(1) {
            total += 0.5 * (ys[i] + ys[i + 1]) * (xs[i + 1] - xs[i]);
        }
        total
    }
}
