//! Influence matrix assembly from horseshoe vortex kernels.

use nalgebra::{DMatrix, Vector3};

use crate::grid::PanelGrid;

const FOUR_PI: f64 = 4.0 * std::f64::consts::PI;

/// Velocity at `p` induced by a unit-strength straight vortex segment from
/// `a` to `b` (Biot-Savart law).
fn segment_velocity(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    let r1 = p - a;
    let r2 = p - b;
    let cr = r1.cross(&r2);
    let c2 = cr.norm_squared();
    let n1 = r1.norm();
    let n2 = r2.norm();
    if c2 < 1e-20 || n1 < 1e-10 || n2 < 1e-10 {
        return Vector3::zeros();
    }
    let r0 = b - a;
    let k = r0.dot(&(r1 / n1 - r2 / n2)) / (FOUR_PI * c2);
    cr * k
}

/// Velocity at `p` induced by a unit-strength semi-infinite filament running
/// downstream (+x) from `a`.
fn trailing_velocity(p: Vector3<f64>, a: Vector3<f64>) -> Vector3<f64> {
    let d = p - a;
    let c2 = d.y * d.y + d.z * d.z;
    let nd = d.norm();
    if c2 < 1e-20 || nd < 1e-10 {
        return Vector3::zeros();
    }
    let k = (1.0 + d.x / nd) / (FOUR_PI * c2);
    Vector3::new(0.0, -d.z * k, d.y * k)
}

/// Trailing filament seen from the far wake: a planar line vortex in the y-z
/// plane at the strength of a semi-infinite leg evaluated on the lifting
/// line. Chordwise offsets drop out, which keeps the induced-drag quadrature
/// exact for smooth loadings.
fn trefftz_velocity(p: Vector3<f64>, a: Vector3<f64>) -> Vector3<f64> {
    let dy = p.y - a.y;
    let dz = p.z - a.z;
    let c2 = dy * dy + dz * dz;
    if c2 < 1e-20 {
        return Vector3::zeros();
    }
    let k = 1.0 / (FOUR_PI * c2);
    Vector3::new(0.0, -dz * k, dy * k)
}

/// Full horseshoe at panel edges `a -> b`: bound segment plus both trailing
/// legs. Circulation runs downstream along the leg at `b` and upstream at
/// `a`, matching a positive bound vortex from `a` to `b`.
fn horseshoe_velocity(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    segment_velocity(p, a, b) + trailing_velocity(p, b) - trailing_velocity(p, a)
}

/// Trailing legs only, in the far-wake sense.
fn horseshoe_trefftz(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    trefftz_velocity(p, b) - trefftz_velocity(p, a)
}

/// The two assembled influence operators. `normalwash` is the classical A
/// matrix: minus the panel-normal velocity at control point i per unit
/// circulation on panel j, so flow tangency reads `A G = onset . normal`.
/// `drag` is the B matrix: minus the trailing-leg normal velocity at drag
/// station i, times the panel width, so `CDi = (2/area_ratio) G' B G`.
#[derive(Debug, Clone)]
pub struct Influence {
    pub normalwash: DMatrix<f64>,
    pub drag: DMatrix<f64>,
}

impl Influence {
    pub fn assemble(grid: &PanelGrid) -> Self {
        let n = grid.panel_count();
        let nodes = grid.nodes();
        let mut normalwash = DMatrix::zeros(n, n);
        let mut drag = DMatrix::zeros(n, n);
        for i in 0..n {
            let normal = grid.normal(i);
            let base = grid.base_normal(i);
            let control = grid.control(i);
            let station = grid.drag_station(i);
            let width = grid.width()[i];
            for j in 0..n {
                let v = horseshoe_velocity(control, nodes[j], nodes[j + 1]);
                normalwash[(i, j)] = -v.dot(&normal);
                let vt = horseshoe_trefftz(station, nodes[j], nodes[j + 1]);
                drag[(i, j)] = -vt.dot(&base) * width;
            }
        }
        Influence { normalwash, drag }
    }
}
