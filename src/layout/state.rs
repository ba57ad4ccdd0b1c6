use serde::{Deserialize, Serialize};

/// Angular (`x`, radians) and radial (`y`, depth units) extent of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArcState {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl ArcState {
    pub const fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self { Self { x0, x1, y0, y1 } }

    /// Angular width in radians.
    #[inline] pub fn span(&self) -> f64 { self.x1 - self.x0 }

    /// Radial thickness in depth units.
    #[inline] pub fn thickness(&self) -> f64 { self.y1 - self.y0 }

    /// Zero angular width; such nodes never take pointer events.
    #[inline] pub fn is_degenerate(&self) -> bool { !(self.x1 > self.x0) }

    #[inline] pub fn mid_angle(&self) -> f64 { (self.x0 + self.x1) / 2.0 }

    #[inline] pub fn mid_depth(&self) -> f64 { (self.y0 + self.y1) / 2.0 }

    /// Per-field linear interpolation, `t` in [0, 1].
    pub fn lerp(&self, to: &ArcState, t: f64) -> ArcState {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        ArcState {
            x0: mix(self.x0, to.x0),
            x1: mix(self.x1, to.x1),
            y0: mix(self.y0, to.y0),
            y1: mix(self.y1, to.y1),
        }
    }

    /// Field-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &ArcState, eps: f64) -> bool {
        (self.x0 - other.x0).abs() <= eps
            && (self.x1 - other.x1).abs() <= eps
            && (self.y0 - other.y0).abs() <= eps
            && (self.y1 - other.y1).abs() <= eps
    }
}
