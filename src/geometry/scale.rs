use geo::Coord;

use crate::{config::SunburstConfig, geometry::{LabelPlacement, Wedge}, layout::ArcState};

/// Maps layout states (radians, depth units) to pixel geometry, and decides
/// what is visible in the current zoom window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialScale {
    pub radius: f64,
    pub levels: f64,
    pub center: Coord<f64>,
    pub center_hole: f64,
    pub stroke_gap: f64,
    pub pad_angle: f64,
    pub label_angle_threshold: f64,
}

impl RadialScale {
    /// `tree_levels` is used when the config does not fix the ring count.
    pub fn from_config(config: &SunburstConfig, tree_levels: u32) -> Self {
        let (cx, cy) = config.center();
        Self {
            radius: config.radius(),
            levels: config.levels.unwrap_or(tree_levels).max(1) as f64,
            center: Coord { x: cx, y: cy },
            center_hole: config.center_hole_radius,
            stroke_gap: config.stroke_gap,
            pad_angle: config.pad_angle,
            label_angle_threshold: config.label_angle_threshold,
        }
    }

    #[inline]
    pub fn inner_radius(&self, s: &ArcState) -> f64 {
        self.center_hole.max(s.y0 * self.radius / self.levels)
    }

    #[inline]
    pub fn outer_radius(&self, s: &ArcState) -> f64 {
        self.center_hole.max(s.y1 * self.radius / self.levels - self.stroke_gap)
    }

    /// Whole radial span inside the window and non-zero angular width.
    #[inline]
    pub fn arc_visible(&self, s: &ArcState) -> bool {
        s.y1 <= self.levels && s.y0 >= 0.0 && s.x1 > s.x0
    }

    /// Visible and wide enough to hold a readable label.
    #[inline]
    pub fn label_visible(&self, s: &ArcState) -> bool {
        self.arc_visible(s) && s.span() > self.label_angle_threshold
    }

    /// Concrete wedge for a state. Padding is applied here, never in layout.
    pub fn wedge(&self, s: &ArcState) -> Wedge {
        Wedge {
            start_angle: s.x0,
            end_angle: s.x1,
            inner_radius: self.inner_radius(s),
            outer_radius: self.outer_radius(s),
            pad_angle: (s.span() / 2.0).min(self.pad_angle).max(0.0),
        }
    }

    pub fn label(&self, s: &ArcState) -> LabelPlacement {
        let radius = (self.inner_radius(s) + self.outer_radius(s)) / 2.0;
        LabelPlacement::at(self.center, s.mid_angle(), radius)
    }

    /// Whether a pixel position falls inside the zoom-out control.
    pub fn in_center_hole(&self, point: Coord<f64>) -> bool {
        let (dx, dy) = (point.x - self.center.x, point.y - self.center.y);
        dx.hypot(dy) < self.center_hole
    }
}
