//! Wing planform geometry: raw station tables in physical units, scaling and
//! normalization directives, and the nondimensional planform consumed by the
//! lattice solver.
//!
//! The station table describes the half span from root to tip. Lengths carry
//! whatever consistent unit the caller uses; angles are degrees here and
//! radians once normalized. The nondimensional planform divides every length
//! by the half-span, so the tip sits at eta = 1.

use span_core::math::{interp, trapezoid};
use span_core::units::deg_to_rad;
use thiserror::Error;

/// One spanwise geometry station, physical units, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    /// Leading-edge chordwise position (positive aft).
    pub xle: f64,
    /// Spanwise position measured from the centerline.
    pub y: f64,
    /// Vertical offset of the section leading edge.
    pub z: f64,
    /// Local chord length.
    pub chord: f64,
    /// Section twist in degrees, positive leading edge up.
    pub twist_deg: f64,
    /// Section zero-lift angle of attack in degrees.
    pub alpha0_deg: f64,
}

impl Station {
    /// Untwisted flat station with zero offsets, handy for simple planforms.
    pub fn flat(y: f64, chord: f64) -> Self {
        Station {
            xle: 0.0,
            y,
            z: 0.0,
            chord,
            twist_deg: 0.0,
            alpha0_deg: 0.0,
        }
    }
}

/// Errors raised while validating or normalizing a station table.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("planform needs at least two stations, found {found}")]
    TooFewStations { found: usize },
    #[error("root station must sit on the centerline, found y = {y}")]
    RootOffCenterline { y: f64 },
    #[error("spanwise coordinate must increase strictly, station {index} at y = {y}")]
    NonIncreasingSpan { index: usize, y: f64 },
    #[error("chord must be positive, station {index} has chord = {chord}")]
    NonPositiveChord { index: usize, chord: f64 },
    #[error("reference area target must be positive, got {area}")]
    NonPositiveReferenceArea { area: f64 },
    #[error("cannot rescale tip height: planform tip height is zero")]
    FlatTipHeight,
}

/// Scaling directives applied to the raw station table before
/// nondimensionalization. Each directive is independent and optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Uniformly rescale chords so the trapezoidal planform area matches this.
    pub reference_area: Option<f64>,
    /// Uniformly rescale vertical offsets so the tip height matches this.
    pub tip_height: Option<f64>,
    /// Shift leading edges so this fraction of local chord lies on an
    /// unswept spanwise line, holding the root axis point fixed.
    pub axis_fraction: Option<f64>,
}

/// Scale factors applied and reference quantities obtained while normalizing.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeReport {
    /// Factor applied to every chord (1.0 when no area target was given).
    pub chord_scale: f64,
    /// Factor applied to every vertical offset (1.0 when no height target).
    pub height_scale: f64,
    /// Planform area after scaling, physical units.
    pub area: f64,
    /// Full span (twice the tip station's spanwise position).
    pub span: f64,
    /// Mean chord, area / span.
    pub mean_chord: f64,
    /// Aspect ratio, span^2 / area.
    pub aspect_ratio: f64,
}

/// Interpolated section properties at one spanwise position of the
/// nondimensional planform. Angles in radians.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub xle: f64,
    pub z: f64,
    pub chord: f64,
    pub twist: f64,
    pub alpha0: f64,
}

/// Immutable nondimensional half-span planform with cached reference
/// quantities. All lengths are divided by the half-span; the spanwise
/// coordinate eta runs from 0 at the root to 1 at the tip, and sampling
/// mirrors the table across the centerline.
#[derive(Debug, Clone)]
pub struct Planform {
    eta: Vec<f64>,
    xle: Vec<f64>,
    z: Vec<f64>,
    chord: Vec<f64>,
    twist: Vec<f64>,
    alpha0: Vec<f64>,
    area_ratio: f64,
    span: f64,
}

impl Planform {
    /// Build a planform from a validated station table with no scaling
    /// directives.
    pub fn new(stations: &[Station]) -> Result<Self, GeometryError> {
        Self::with_options(stations, NormalizeOptions::default()).map(|(p, _)| p)
    }

    /// Build a planform applying the given scaling directives, returning the
    /// normalize report alongside.
    pub fn with_options(
        stations: &[Station],
        options: NormalizeOptions,
    ) -> Result<(Self, NormalizeReport), GeometryError> {
        validate(stations)?;

        let y: Vec<f64> = stations.iter().map(|s| s.y).collect();
        let mut xle: Vec<f64> = stations.iter().map(|s| s.xle).collect();
        let mut z: Vec<f64> = stations.iter().map(|s| s.z).collect();
        let mut chord: Vec<f64> = stations.iter().map(|s| s.chord).collect();

        // Area rescale first, then height, then the axis shift; the shift
        // must see the rescaled chords.
        let mut chord_scale = 1.0;
        if let Some(target) = options.reference_area {
            if target <= 0.0 {
                return Err(GeometryError::NonPositiveReferenceArea { area: target });
            }
            let area = 2.0 * trapezoid(&y, &chord);
            chord_scale = target / area;
            for c in &mut chord {
                *c *= chord_scale;
            }
        }

        let mut height_scale = 1.0;
        if let Some(target) = options.tip_height {
            let tip = z[z.len() - 1];
            if tip == 0.0 {
                return Err(GeometryError::FlatTipHeight);
            }
            height_scale = target / tip;
            for v in &mut z {
                *v *= height_scale;
            }
        }

        if let Some(fraction) = options.axis_fraction {
            let x0 = xle[0] + fraction * chord[0];
            for (x, c) in xle.iter_mut().zip(chord.iter()) {
                *x = x0 - fraction * *c;
            }
        }

        let area = 2.0 * trapezoid(&y, &chord);
        let half_span = y[y.len() - 1];
        let span = 2.0 * half_span;
        let report = NormalizeReport {
            chord_scale,
            height_scale,
            area,
            span,
            mean_chord: area / span,
            aspect_ratio: span * span / area,
        };

        let inv = 1.0 / half_span;
        let planform = Planform {
            eta: y.iter().map(|v| v * inv).collect(),
            xle: xle.iter().map(|v| v * inv).collect(),
            z: z.iter().map(|v| v * inv).collect(),
            chord: chord.iter().map(|v| v * inv).collect(),
            twist: stations.iter().map(|s| deg_to_rad(s.twist_deg)).collect(),
            alpha0: stations.iter().map(|s| deg_to_rad(s.alpha0_deg)).collect(),
            area_ratio: area * inv * inv,
            span,
        };
        Ok((planform, report))
    }

    /// Planform area divided by the squared half-span.
    pub fn area_ratio(&self) -> f64 {
        self.area_ratio
    }

    /// Aspect ratio span^2 / area.
    pub fn aspect_ratio(&self) -> f64 {
        4.0 / self.area_ratio
    }

    /// Mean chord divided by the half-span.
    pub fn mean_chord_ratio(&self) -> f64 {
        self.area_ratio / 2.0
    }

    /// Physical full span the table was normalized by.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Section properties at a spanwise position eta in [-1, 1]; the half
    /// span table is mirrored across the centerline.
    pub fn sample(&self, eta: f64) -> Section {
        let e = eta.abs();
        Section {
            xle: interp(&self.eta, &self.xle, e),
            z: interp(&self.eta, &self.z, e),
            chord: interp(&self.eta, &self.chord, e),
            twist: interp(&self.eta, &self.twist, e),
            alpha0: interp(&self.eta, &self.alpha0, e),
        }
    }
}

fn validate(stations: &[Station]) -> Result<(), GeometryError> {
    if stations.len() < 2 {
        return Err(GeometryError::TooFewStations {
            found: stations.len(),
        });
    }
    if stations[0].y.abs() > 1e-12 {
        return Err(GeometryError::RootOffCenterline { y: stations[0].y });
    }
    for (index, pair) in stations.windows(2).enumerate() {
        if pair[1].y <= pair[0].y {
            return Err(GeometryError::NonIncreasingSpan {
                index: index + 1,
                y: pair[1].y,
            });
        }
    }
    for (index, station) in stations.iter().enumerate() {
        if station.chord <= 0.0 {
            return Err(GeometryError::NonPositiveChord {
                index,
                chord: station.chord,
            });
        }
    }
    Ok(())
}

/// Two-station rectangular planform.
pub fn rectangular(span: f64, chord: f64) -> Vec<Station> {
    vec![Station::flat(0.0, chord), Station::flat(span / 2.0, chord)]
}

/// Two-station linearly tapered planform.
pub fn tapered(span: f64, root_chord: f64, tip_chord: f64) -> Vec<Station> {
    vec![
        Station::flat(0.0, root_chord),
        Station::flat(span / 2.0, tip_chord),
    ]
}

/// Elliptical chord distribution sampled at `stations` points. The tip chord
/// is kept slightly above zero so the table stays valid.
pub fn elliptical(span: f64, root_chord: f64, stations: usize) -> Vec<Station> {
    let count = stations.max(2);
    let half = span / 2.0;
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            let c = root_chord * (1.0 - t * t).max(0.0).sqrt();
            Station::flat(t * half, c.max(1e-4 * root_chord))
        })
        .collect()
}
