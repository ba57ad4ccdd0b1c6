use tracing::{debug, trace};

use crate::{
    layout::{ArcState, LayoutTree, NodeId},
    zoom::{zoom_targets, Transition},
};

#[derive(Clone, Debug)]
pub enum ZoomState {
    Idle,
    Animating(Transition),
}

/// Why an activation request was dropped. None of these are errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A transition is already in flight; requests are dropped, not queued.
    Animating,
    UnknownNode,
    /// Leaves cannot be zoomed onto.
    Leaf,
    /// Zero angular width.
    Degenerate,
    AlreadyFocused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Started { focus: NodeId },
    Ignored(IgnoreReason),
}

impl Activation {
    #[inline] pub fn is_started(&self) -> bool { matches!(self, Activation::Started { .. }) }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    Idle,
    /// Still animating, at eased progress `t`.
    Running { t: f64 },
    /// The transition just finished; `current` now equals its targets.
    Completed { focus: NodeId },
}

/// Owns the rendered (`current`) state of every node and the single
/// in-flight transition that is allowed to write it.
#[derive(Clone, Debug)]
pub struct ZoomMachine {
    current: Vec<ArcState>,
    state: ZoomState,
    focus: NodeId,
    duration: f64,
    t: f64,
}

impl ZoomMachine {
    /// Start idle at the canonical layout. `duration` is in milliseconds.
    pub fn new(tree: &LayoutTree, duration: f64) -> Self {
        Self { current: tree.canonical_states(), state: ZoomState::Idle, focus: NodeId::ROOT, duration: duration.max(0.0), t: 0.0 }
    }

    /// Get the idle/animating state.
    #[inline] pub fn state(&self) -> &ZoomState { &self.state }

    /// Check whether a transition is in flight.
    #[inline] pub fn is_animating(&self) -> bool { matches!(self.state, ZoomState::Animating(_)) }

    /// Get the transition duration in milliseconds.
    #[inline] pub fn duration(&self) -> f64 { self.duration }

    /// Eased progress of the in-flight transition as of the last tick.
    #[inline] pub fn eased_progress(&self) -> f64 { self.t }

    /// Node the view is settled on. Changes only when a transition completes.
    #[inline] pub fn focus(&self) -> NodeId { self.focus }

    /// Get the rendered state of every node, indexed by id.
    #[inline] pub fn current_states(&self) -> &[ArcState] { &self.current }

    /// Get the rendered state of one node.
    #[inline] pub fn current(&self, id: NodeId) -> Option<ArcState> { self.current.get(id.index()).copied() }

    /// Present only while a transition is in flight.
    pub fn target(&self, id: NodeId) -> Option<ArcState> {
        match &self.state {
            ZoomState::Animating(transition) => transition.to().get(id.index()).copied(),
            ZoomState::Idle => None,
        }
    }

    /// Get the in-flight transition, if any.
    pub fn transition(&self) -> Option<&Transition> {
        match &self.state {
            ZoomState::Animating(transition) => Some(transition),
            ZoomState::Idle => None,
        }
    }

    /// Zoom onto a clicked node. Leaves are rejected.
    pub fn activate(&mut self, tree: &LayoutTree, p: NodeId, now: f64) -> Activation {
        if self.is_animating() { return Activation::Ignored(IgnoreReason::Animating) }
        match tree.get(p) {
            Some(node) if node.is_leaf() => Activation::Ignored(IgnoreReason::Leaf),
            _ => self.zoom_to(tree, p, now),
        }
    }

    /// Zoom onto any non-degenerate node without the leaf check. Used by the
    /// center control to step back out.
    pub fn zoom_to(&mut self, tree: &LayoutTree, p: NodeId, now: f64) -> Activation {
        if self.is_animating() { return Activation::Ignored(IgnoreReason::Animating) }
        let Some(node) = tree.get(p) else { return Activation::Ignored(IgnoreReason::UnknownNode) };
        if node.canonical().is_degenerate() { return Activation::Ignored(IgnoreReason::Degenerate) }
        if p == self.focus { return Activation::Ignored(IgnoreReason::AlreadyFocused) }

        let to = zoom_targets(tree, p);
        let from = self.current.clone();
        debug!(focus = p.0, name = node.name(), duration = self.duration, "zoom started");

        self.t = 0.0;
        self.state = ZoomState::Animating(Transition::new(p, now, self.duration, from, to));
        Activation::Started { focus: p }
    }

    /// Advance the in-flight transition to time `now` (milliseconds).
    /// A NaN clock reading leaves every state where it is.
    pub fn tick(&mut self, now: f64) -> Tick {
        let ZoomState::Animating(transition) = &self.state else { return Tick::Idle };
        if now.is_nan() {
            trace!("zoom frame skipped: clock reading is NaN");
            return Tick::Running { t: self.t };
        }

        let raw = transition.progress(now);
        if raw >= 1.0 {
            let ZoomState::Animating(transition) = std::mem::replace(&mut self.state, ZoomState::Idle) else {
                return Tick::Idle;
            };
            let focus = transition.focus();
            self.current = transition.into_targets();
            self.focus = focus;
            self.t = 1.0;
            debug!(focus = focus.0, "zoom completed");
            return Tick::Completed { focus };
        }

        let t = transition.eased(now);
        self.t = t;
        for (i, state) in self.current.iter_mut().enumerate() {
            *state = transition.sample(i, t);
        }
        trace!(t, "zoom frame");
        Tick::Running { t }
    }

    /// Abort any transition and snap every node to its canonical state.
    pub fn reset(&mut self, tree: &LayoutTree) {
        if self.is_animating() { debug!("zoom aborted by reset") }
        self.state = ZoomState::Idle;
        self.focus = NodeId::ROOT;
        self.current = tree.canonical_states();
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;
    use crate::{hierarchy::{HierarchyNode, NodeKind}, layout::partition};

    fn tree() -> LayoutTree {
        let region = |name: &str, w: f64| HierarchyNode::new(name, NodeKind::Region { id: None }).with_weight(w);
        partition(HierarchyNode::root("Root")
            .with_child(region("A", 3.0).with_child(region("A1", 0.0)).with_child(region("A2", 0.0)))
            .with_child(region("B", 1.0)))
    }

    #[test]
    fn activation_interpolates_then_completes() {
        let tree = tree();
        let a = NodeId(1);
        let mut zoom = ZoomMachine::new(&tree, 1000.0);

        assert_eq!(zoom.activate(&tree, a, 0.0), Activation::Started { focus: a });
        assert!(zoom.is_animating());
        assert!(zoom.target(a).unwrap().approx_eq(&ArcState::new(0.0, TAU, 0.0, 1.0), 1e-9));

        assert!(matches!(zoom.tick(500.0), Tick::Running { t } if (t - 0.5).abs() < 1e-12));
        let halfway = zoom.current(a).unwrap();
        assert!((halfway.x1 - 1.75 * PI).abs() < 1e-9);
        assert!((halfway.y0 - 0.5).abs() < 1e-9);

        assert_eq!(zoom.focus(), NodeId::ROOT);
        assert_eq!(zoom.tick(1000.0), Tick::Completed { focus: a });
        assert_eq!(zoom.focus(), a);
        assert_eq!(zoom.activate(&tree, a, 1500.0), Activation::Ignored(IgnoreReason::AlreadyFocused));
        assert!(!zoom.is_animating());
        assert_eq!(zoom.target(a), None);
        assert!(zoom.current(a).unwrap().approx_eq(&ArcState::new(0.0, TAU, 0.0, 1.0), 1e-9));
        assert_eq!(zoom.tick(2000.0), Tick::Idle);
    }

    #[test]
    fn rejects_leaves_degenerate_unknown_and_reentry() {
        let tree = tree();
        let mut zoom = ZoomMachine::new(&tree, 1000.0);

        assert_eq!(zoom.activate(&tree, NodeId(4), 0.0), Activation::Ignored(IgnoreReason::Leaf));
        assert_eq!(zoom.zoom_to(&tree, NodeId(2), 0.0), Activation::Ignored(IgnoreReason::Degenerate));
        assert_eq!(zoom.activate(&tree, NodeId(99), 0.0), Activation::Ignored(IgnoreReason::UnknownNode));
        assert!(!zoom.is_animating());

        assert_eq!(zoom.zoom_to(&tree, NodeId::ROOT, 0.0), Activation::Ignored(IgnoreReason::AlreadyFocused));

        assert!(zoom.activate(&tree, NodeId(1), 0.0).is_started());
        let before = zoom.target(NodeId(1));
        assert_eq!(zoom.activate(&tree, NodeId(0), 10.0), Activation::Ignored(IgnoreReason::Animating));
        assert_eq!(zoom.target(NodeId(1)), before);
    }

    #[test]
    fn reset_aborts_and_snaps_to_canonical() {
        let tree = tree();
        let mut zoom = ZoomMachine::new(&tree, 1000.0);
        zoom.activate(&tree, NodeId(1), 0.0);
        zoom.tick(300.0);

        zoom.reset(&tree);
        assert!(!zoom.is_animating());
        assert_eq!(zoom.focus(), NodeId::ROOT);
        assert_eq!(zoom.current_states(), tree.canonical_states().as_slice());
        assert_eq!(zoom.tick(400.0), Tick::Idle);
    }

    #[test]
    fn nan_clock_leaves_states_untouched() {
        let tree = tree();
        let mut zoom = ZoomMachine::new(&tree, 1000.0);
        zoom.activate(&tree, NodeId(1), 0.0);
        zoom.tick(250.0);
        let before = zoom.current_states().to_vec();

        assert!(matches!(zoom.tick(f64::NAN), Tick::Running { t } if t == zoom.eased_progress()));
        assert_eq!(zoom.current_states(), before.as_slice());
        assert!(zoom.current_states().iter().all(|s| [s.x0, s.x1, s.y0, s.y1].iter().all(|v| v.is_finite())));

        // Infinity still means "finish now".
        assert_eq!(zoom.tick(f64::INFINITY), Tick::Completed { focus: NodeId(1) });
    }

    #[test]
    fn activation_without_a_clock_completes_on_next_tick() {
        let tree = tree();
        let mut zoom = ZoomMachine::new(&tree, 1000.0);
        assert!(zoom.activate(&tree, NodeId(1), f64::NAN).is_started());
        assert_eq!(zoom.tick(10.0), Tick::Completed { focus: NodeId(1) });
        assert!(zoom.current(NodeId(1)).unwrap().approx_eq(&ArcState::new(0.0, TAU, 0.0, 1.0), 1e-9));
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let tree = tree();
        let mut zoom = ZoomMachine::new(&tree, 0.0);
        zoom.activate(&tree, NodeId(1), 0.0);
        assert_eq!(zoom.tick(0.0), Tick::Completed { focus: NodeId(1) });
    }
}
