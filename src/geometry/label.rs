use std::f64::consts::PI;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::geometry::polar;

/// Where and how to draw a wedge label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    /// Mid-angle, mid-radius point of the wedge.
    pub anchor: Coord<f64>,
    /// Text rotation in degrees, clockwise.
    pub rotation: f64,
    /// Turned half a revolution so the text reads left to right.
    pub flipped: bool,
}

impl LabelPlacement {
    /// Label for a wedge whose mid-angle is `angle` (radians from 12 o'clock).
    pub fn at(center: Coord<f64>, angle: f64, radius: f64) -> Self {
        let flipped = angle > PI;
        let rotation = angle.to_degrees() - 90.0 + if flipped { 180.0 } else { 0.0 };
        Self { anchor: polar(center, angle, radius), rotation, flipped }
    }

    /// SVG `transform` attribute value.
    pub fn transform(&self) -> String {
        format!("translate({:.3},{:.3}) rotate({:.3})", self.anchor.x, self.anchor.y, self.rotation)
    }
}
