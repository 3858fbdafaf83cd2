//! Full-span panel grid derived from a nondimensional planform.

use nalgebra::Vector3;
use span_geometry::Planform;

use crate::spacing::{self, SpacingScheme};
use crate::trim::FlightState;
use crate::LatticeError;

/// Per-panel geometry for the lattice. Vortex nodes sit on the quarter-chord
/// line at the panel edges; each panel carries a control point on its local
/// three-quarter-chord line and a drag station on the quarter-chord line,
/// both at the panel's collocation span station.
#[derive(Debug, Clone)]
pub struct PanelGrid {
    nodes: Vec<Vector3<f64>>,
    eta: Vec<f64>,
    width: Vec<f64>,
    chord: Vec<f64>,
    twist: Vec<f64>,
    alpha0: Vec<f64>,
    height: Vec<f64>,
    control: Vec<Vector3<f64>>,
    drag: Vec<Vector3<f64>>,
    base_normal: Vec<Vector3<f64>>,
    area_ratio: f64,
}

impl PanelGrid {
    pub fn new(
        planform: &Planform,
        scheme: SpacingScheme,
        panels: usize,
    ) -> Result<Self, LatticeError> {
        let edges = spacing::nodes(scheme, panels)?;
        let stations = spacing::collocation(scheme, &edges);

        let nodes: Vec<Vector3<f64>> = edges
            .iter()
            .map(|&e| {
                let s = planform.sample(e);
                Vector3::new(s.xle + 0.25 * s.chord, e, s.z)
            })
            .collect();

        let mut eta = Vec::with_capacity(panels);
        let mut width = Vec::with_capacity(panels);
        let mut chord = Vec::with_capacity(panels);
        let mut twist = Vec::with_capacity(panels);
        let mut alpha0 = Vec::with_capacity(panels);
        let mut height = Vec::with_capacity(panels);
        let mut control = Vec::with_capacity(panels);
        let mut drag = Vec::with_capacity(panels);
        let mut base_normal = Vec::with_capacity(panels);

        for (i, &em) in stations.iter().enumerate() {
            let s = planform.sample(em);
            eta.push(em);
            width.push(edges[i + 1] - edges[i]);
            chord.push(s.chord);
            twist.push(s.twist);
            alpha0.push(s.alpha0);
            height.push(s.z);
            control.push(Vector3::new(s.xle + 0.75 * s.chord, em, s.z));
            drag.push(Vector3::new(s.xle + 0.25 * s.chord, em, s.z));
            // dihedral angle of the bound segment spanning this panel
            let dz = nodes[i + 1].z - nodes[i].z;
            let dy = edges[i + 1] - edges[i];
            let phi = dz.atan2(dy);
            base_normal.push(Vector3::new(0.0, -phi.sin(), phi.cos()));
        }

        Ok(PanelGrid {
            nodes,
            eta,
            width,
            chord,
            twist,
            alpha0,
            height,
            control,
            drag,
            base_normal,
            area_ratio: planform.area_ratio(),
        })
    }

    pub fn panel_count(&self) -> usize {
        self.eta.len()
    }

    /// Midspan station of each panel, eta in (-1, 1).
    pub fn eta(&self) -> &[f64] {
        &self.eta
    }

    /// Spanwise width of each panel.
    pub fn width(&self) -> &[f64] {
        &self.width
    }

    /// Local chord at each panel station.
    pub fn chord(&self) -> &[f64] {
        &self.chord
    }

    /// Planform area over squared half-span, carried from the planform.
    pub fn area_ratio(&self) -> f64 {
        self.area_ratio
    }

    /// Aspect ratio of the underlying planform.
    pub fn aspect_ratio(&self) -> f64 {
        4.0 / self.area_ratio
    }

    pub(crate) fn nodes(&self) -> &[Vector3<f64>] {
        &self.nodes
    }

    pub(crate) fn control(&self, i: usize) -> Vector3<f64> {
        self.control[i]
    }

    pub(crate) fn drag_station(&self, i: usize) -> Vector3<f64> {
        self.drag[i]
    }

    pub(crate) fn base_normal(&self, i: usize) -> Vector3<f64> {
        self.base_normal[i]
    }

    /// Panel normal with the section twist applied: the base dihedral normal
    /// rotated about the span axis by `twist - alpha0`, so the zero-lift line
    /// is the flow-tangency datum.
    pub(crate) fn normal(&self, i: usize) -> Vector3<f64> {
        let theta = self.twist[i] - self.alpha0[i];
        let base = self.base_normal[i];
        Vector3::new(theta.sin(), base.y * theta.cos(), base.z * theta.cos())
    }

    /// Onset velocity at panel `i` for the given flight state: freestream at
    /// incidence and sideslip plus the small-rate roll and yaw terms.
    pub(crate) fn onset(&self, state: &FlightState, i: usize) -> Vector3<f64> {
        let ca = state.alpha.cos();
        let sa = state.alpha.sin();
        let cb = state.sideslip.cos();
        let sb = state.sideslip.sin();
        Vector3::new(
            ca * cb - state.yaw_rate * self.eta[i],
            -sb - state.roll_rate * self.height[i],
            sa * cb + state.roll_rate * self.eta[i],
        )
    }

    /// Streamwise onset component per panel, the Kutta-Joukowski weight for
    /// lift and moment sums.
    pub(crate) fn onset_x(&self, state: &FlightState) -> Vec<f64> {
        let ca = state.alpha.cos();
        let cb = state.sideslip.cos();
        self.eta
            .iter()
            .map(|&e| ca * cb - state.yaw_rate * e)
            .collect()
    }

    /// Flow-tangency right-hand side for the given state.
    pub(crate) fn onset_rhs(&self, state: &FlightState) -> nalgebra::DVector<f64> {
        nalgebra::DVector::from_fn(self.panel_count(), |i, _| {
            self.onset(state, i).dot(&self.normal(i))
        })
    }

    /// Chord-weighted mean of `alpha0 - twist`, the zero-lift offset used to
    /// seed an unknown angle of attack.
    pub(crate) fn zero_lift_offset(&self) -> f64 {
        let mut weighted = 0.0;
        let mut total = 0.0;
        for i in 0..self.panel_count() {
            let w = self.chord[i] * self.width[i];
            weighted += (self.alpha0[i] - self.twist[i]) * w;
            total += w;
        }
        weighted / total
    }
}
