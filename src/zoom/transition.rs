use std::f64::consts::TAU;

use crate::{
    layout::{ArcState, LayoutTree, NodeId},
    zoom::ease_in_out_cubic,
};

/// Where node `d` ends up when the view zooms onto `p`.
///
/// `p`'s angular window is stretched to the full circle and every ring is
/// shifted inward by `p`'s depth. Both states are canonical. `p` must not be
/// degenerate.
pub fn zoom_target(p: &ArcState, p_depth: u32, d: &ArcState) -> ArcState {
    let span = p.span();
    let depth = p_depth as f64;
    ArcState {
        x0: ((d.x0 - p.x0) / span).clamp(0.0, 1.0) * TAU,
        x1: ((d.x1 - p.x0) / span).clamp(0.0, 1.0) * TAU,
        y0: (d.y0 - depth).max(0.0),
        y1: (d.y1 - depth).max(0.0),
    }
}

/// Target state of every node for a zoom onto `focus`, indexed by id.
pub fn zoom_targets(tree: &LayoutTree, focus: NodeId) -> Vec<ArcState> {
    let p = tree.node(focus);
    let p_state = p.canonical();
    tree.iter().map(|d| zoom_target(&p_state, p.depth(), &d.canonical())).collect()
}

/// One in-flight animated zoom.
#[derive(Clone, Debug)]
pub struct Transition {
    focus: NodeId,
    started_at: f64,
    duration: f64,
    from: Vec<ArcState>,
    to: Vec<ArcState>,
}

impl Transition {
    pub(crate) fn new(focus: NodeId, started_at: f64, duration: f64, from: Vec<ArcState>, to: Vec<ArcState>) -> Self {
        debug_assert_eq!(from.len(), to.len());
        Self { focus, started_at, duration: duration.max(0.0), from, to }
    }

    /// Node being zoomed onto.
    #[inline] pub fn focus(&self) -> NodeId { self.focus }

    #[inline] pub fn started_at(&self) -> f64 { self.started_at }

    #[inline] pub fn duration(&self) -> f64 { self.duration }

    /// States at the moment of activation.
    #[inline] pub fn from(&self) -> &[ArcState] { &self.from }

    /// End states.
    #[inline] pub fn to(&self) -> &[ArcState] { &self.to }

    /// Linear progress in [0, 1] at time `now` (milliseconds). A transition
    /// started without a usable clock reading is already finished.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 || self.started_at.is_nan() { return 1.0 }
        let raw = (now - self.started_at) / self.duration;
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }

    /// Eased progress at time `now`.
    #[inline] pub fn eased(&self, now: f64) -> f64 { ease_in_out_cubic(self.progress(now)) }

    /// Interpolated state of node `i` at eased progress `t`.
    #[inline]
    pub fn sample(&self, i: usize, t: f64) -> ArcState {
        self.from[i].lerp(&self.to[i], t)
    }

    pub(crate) fn into_targets(self) -> Vec<ArcState> { self.to }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn zoom_target_fills_circle_with_focus() {
        let p = ArcState::new(0.0, 1.5 * PI, 1.0, 2.0);
        let t = zoom_target(&p, 1, &p);
        assert!(t.approx_eq(&ArcState::new(0.0, TAU, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn zoom_target_clamps_outside_nodes() {
        let p = ArcState::new(0.0, 1.5 * PI, 1.0, 2.0);
        let sibling = ArcState::new(1.5 * PI, 2.0 * PI, 1.0, 2.0);
        let t = zoom_target(&p, 1, &sibling);
        assert_eq!(t.x0, TAU);
        assert_eq!(t.x1, TAU);
        assert!(t.is_degenerate());

        let root = ArcState::new(0.0, TAU, 0.0, 1.0);
        let t = zoom_target(&p, 1, &root);
        assert_eq!((t.y0, t.y1), (0.0, 0.0));
    }

    #[test]
    fn progress_clamps_and_handles_zero_duration() {
        let tr = Transition::new(NodeId(1), 100.0, 1000.0, vec![ArcState::default()], vec![ArcState::new(0.0, 1.0, 0.0, 1.0)]);
        assert_eq!(tr.progress(50.0), 0.0);
        assert_eq!(tr.progress(600.0), 0.5);
        assert_eq!(tr.progress(5000.0), 1.0);
        assert_eq!(tr.eased(600.0), 0.5);
        assert_eq!(tr.sample(0, 0.5), ArcState::new(0.0, 0.5, 0.0, 0.5));

        let instant = Transition::new(NodeId(1), 0.0, 0.0, vec![], vec![]);
        assert_eq!(instant.progress(0.0), 1.0);
        assert_eq!(tr.progress(f64::NAN), 0.0);
        assert_eq!(Transition::new(NodeId(1), f64::NAN, 1000.0, vec![], vec![]).progress(5.0), 1.0);
    }
}
