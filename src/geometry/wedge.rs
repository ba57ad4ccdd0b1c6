use std::f64::consts::{PI, TAU};

use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Angular tolerance under which a wedge is treated as a full ring.
const FULL_CIRCLE_EPS: f64 = 1e-9;

/// An annular wedge in pixel space. Angles are radians clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Total angular padding, split evenly between both edges.
    pub pad_angle: f64,
}

/// Pixel position of a polar coordinate around `center` (screen y down).
#[inline]
pub fn polar(center: Coord<f64>, angle: f64, radius: f64) -> Coord<f64> {
    Coord { x: center.x + radius * angle.sin(), y: center.y - radius * angle.cos() }
}

impl Wedge {
    #[inline] pub fn span(&self) -> f64 { self.end_angle - self.start_angle }

    #[inline] pub fn is_full_circle(&self) -> bool { self.span() >= TAU - FULL_CIRCLE_EPS }

    /// Angles after padding; full rings are not padded.
    pub fn padded_angles(&self) -> (f64, f64) {
        if self.is_full_circle() { return (self.start_angle, self.end_angle) }
        let half = self.pad_angle / 2.0;
        (self.start_angle + half, (self.end_angle - half).max(self.start_angle + half))
    }

    /// Zero angular width or zero radial thickness.
    pub fn is_empty(&self) -> bool {
        !(self.span() > 0.0) || !(self.outer_radius > self.inner_radius)
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() { return 0.0 }
        let (a0, a1) = self.padded_angles();
        0.5 * (a1 - a0) * (self.outer_radius.powi(2) - self.inner_radius.powi(2))
    }

    /// Hit test against the unpadded wedge.
    pub fn contains(&self, center: Coord<f64>, point: Coord<f64>) -> bool {
        if self.is_empty() { return false }

        let (dx, dy) = (point.x - center.x, point.y - center.y);
        let r = dx.hypot(dy);
        if r < self.inner_radius || r >= self.outer_radius { return false }
        if self.is_full_circle() { return true }

        let angle = dx.atan2(-dy).rem_euclid(TAU);
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Tessellate into a polygon for raster targets. `segments` is per full turn.
    pub fn to_polygon(&self, center: Coord<f64>, segments: usize) -> Polygon<f64> {
        let (a0, a1) = self.padded_angles();
        let steps = ((a1 - a0) / TAU * segments.max(4) as f64).ceil().max(1.0) as usize;
        let at = |i: usize| a0 + (a1 - a0) * i as f64 / steps as f64;

        let mut ring: Vec<Coord<f64>> = (0..=steps).map(|i| polar(center, at(i), self.outer_radius)).collect();
        if self.inner_radius > 0.0 {
            ring.extend((0..=steps).rev().map(|i| polar(center, at(i), self.inner_radius)));
        } else {
            ring.push(center);
        }

        Polygon::new(LineString::from(ring), vec![])
    }

    /// SVG path data using arc commands. Full rings are drawn as two
    /// concentric circles (render with `fill-rule: evenodd`).
    pub fn to_svg_path(&self, center: Coord<f64>) -> String {
        let (r0, r1) = (self.inner_radius, self.outer_radius);

        if self.is_full_circle() {
            let mut out = circle_path(center, r1);
            if r0 > 0.0 { out.push(' '); out.push_str(&circle_path(center, r0)) }
            return out;
        }

        let (a0, a1) = self.padded_angles();
        let large = if a1 - a0 > PI { 1 } else { 0 };
        let p0 = polar(center, a0, r1);
        let p1 = polar(center, a1, r1);

        let mut out = format!("M{:.3},{:.3} A{r1:.3},{r1:.3} 0 {large} 1 {:.3},{:.3}", p0.x, p0.y, p1.x, p1.y);
        if r0 > 0.0 {
            let q1 = polar(center, a1, r0);
            let q0 = polar(center, a0, r0);
            out.push_str(&format!(" L{:.3},{:.3} A{r0:.3},{r0:.3} 0 {large} 0 {:.3},{:.3}", q1.x, q1.y, q0.x, q0.y));
        } else {
            out.push_str(&format!(" L{:.3},{:.3}", center.x, center.y));
        }
        out.push('Z');
        out
    }
}

fn circle_path(center: Coord<f64>, r: f64) -> String {
    let top = polar(center, 0.0, r);
    let bottom = polar(center, PI, r);
    format!(
        "M{:.3},{:.3} A{r:.3},{r:.3} 0 1 1 {:.3},{:.3} A{r:.3},{r:.3} 0 1 1 {:.3},{:.3}Z",
        top.x, top.y, bottom.x, bottom.y, top.x, top.y,
    )
}

#[cfg(test)]
mod tests {
    use geo::{Area, Contains, Point};

    use super::*;

    const CENTER: Coord<f64> = Coord { x: 100.0, y: 100.0 };

    fn quarter() -> Wedge {
        // 12 o'clock to 3 o'clock.
        Wedge { start_angle: 0.0, end_angle: PI / 2.0, inner_radius: 20.0, outer_radius: 50.0, pad_angle: 0.0 }
    }

    #[test]
    fn polar_is_clockwise_from_top() {
        let top = polar(CENTER, 0.0, 10.0);
        let right = polar(CENTER, PI / 2.0, 10.0);
        assert!((top.x - 100.0).abs() < 1e-9 && (top.y - 90.0).abs() < 1e-9);
        assert!((right.x - 110.0).abs() < 1e-9 && (right.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hit_test_quarter() {
        let w = quarter();
        assert!(w.contains(CENTER, Coord { x: 125.0, y: 75.0 }));
        assert!(!w.contains(CENTER, Coord { x: 75.0, y: 75.0 }));    // wrong quadrant
        assert!(!w.contains(CENTER, Coord { x: 105.0, y: 95.0 }));   // inside inner radius
        assert!(!w.contains(CENTER, Coord { x: 160.0, y: 40.0 }));   // beyond outer radius
    }

    #[test]
    fn degenerate_wedges_never_hit() {
        let w = Wedge { end_angle: 0.0, ..quarter() };
        assert!(w.is_empty());
        assert!(!w.contains(CENTER, Coord { x: 100.0, y: 70.0 }));

        let flat = Wedge { inner_radius: 50.0, ..quarter() };
        assert!(flat.is_empty());
        assert_eq!(flat.area(), 0.0);
    }

    #[test]
    fn full_ring_contains_every_angle() {
        let ring = Wedge { start_angle: 0.0, end_angle: TAU, ..quarter() };
        for (x, y) in [(130.0, 100.0), (70.0, 100.0), (100.0, 130.0), (100.0, 70.0)] {
            assert!(ring.contains(CENTER, Coord { x, y }));
        }
        assert!(ring.to_svg_path(CENTER).matches('M').count() == 2);
    }

    #[test]
    fn polygon_approximates_wedge() {
        let w = quarter();
        let polygon = w.to_polygon(CENTER, 256);
        let expected = w.area();
        assert!((polygon.unsigned_area() - expected).abs() / expected < 0.01);
        assert!(polygon.contains(&Point::new(125.0, 75.0)));
        assert!(!polygon.contains(&Point::new(75.0, 125.0)));
    }

    #[test]
    fn svg_path_uses_large_arc_flag() {
        let small = quarter().to_svg_path(CENTER);
        assert!(small.starts_with("M100.000,50.000 A50.000,50.000 0 0 1"));

        let large = Wedge { end_angle: 1.5 * PI, ..quarter() }.to_svg_path(CENTER);
        assert!(large.contains(" 0 1 1 "));
        assert!(large.ends_with('Z'));
    }
}
