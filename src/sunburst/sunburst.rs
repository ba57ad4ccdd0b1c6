use std::sync::Arc;

use geo::Coord;
use tracing::{debug, info};

use crate::{
    config::SunburstConfig,
    dataset::Dataset,
    frame::Frame,
    geometry::RadialScale,
    hierarchy::{Grouping, HierarchyBuilder, HierarchyNode},
    layout::{partition, ArcState, LayoutTree, NodeId},
    nav::{Crumb, NavigationObserver, Navigator},
    zoom::{Activation, IgnoreReason, Tick, ZoomMachine},
};

/// One interactive sunburst chart.
///
/// Owns the layout, the zoom driver and the navigation state, and publishes
/// an immutable `Frame` after every change. Time is supplied by the host in
/// milliseconds; the chart never reads a clock.
pub struct Sunburst {
    config: SunburstConfig,
    tree: LayoutTree,
    scale: RadialScale,
    zoom: ZoomMachine,
    nav: Navigator,
    frame: Arc<Frame>,
}

impl Sunburst {
    pub fn new(root: HierarchyNode, config: SunburstConfig) -> Self {
        let tree = partition(root);
        let scale = RadialScale::from_config(&config, tree.levels());
        let zoom = ZoomMachine::new(&tree, config.transition_ms);
        let nav = Navigator::new(&tree);
        info!(nodes = tree.len(), levels = tree.levels(), "sunburst ready");

        let mut sunburst = Self { config, tree, scale, zoom, nav, frame: Arc::default() };
        sunburst.publish();
        sunburst
    }

    /// Build the hierarchy from flat records, labelling the root from the config.
    pub fn from_dataset(dataset: &Dataset, grouping: Option<Grouping>, config: SunburstConfig) -> Self {
        let root = dataset.to_hierarchy(&HierarchyBuilder::new(config.root_label.as_str()), grouping);
        Self::new(root, config)
    }

    #[inline] pub fn config(&self) -> &SunburstConfig { &self.config }
    #[inline] pub fn tree(&self) -> &LayoutTree { &self.tree }
    #[inline] pub fn scale(&self) -> &RadialScale { &self.scale }

    /// Replace the data wholesale. Any transition is dropped and the view
    /// returns to the root; observers stay subscribed.
    pub fn set_data(&mut self, root: HierarchyNode) {
        self.tree = partition(root);
        self.scale = RadialScale::from_config(&self.config, self.tree.levels());
        self.zoom = ZoomMachine::new(&self.tree, self.config.transition_ms);
        self.nav.reset(&self.tree);
        debug!(nodes = self.tree.len(), "data replaced");
        self.publish();
    }

    /// Zoom onto `id` (a click on its wedge).
    pub fn activate(&mut self, id: NodeId, now: f64) -> Activation {
        let activation = self.zoom.activate(&self.tree, id, now);
        self.started(activation)
    }

    /// Zoom out one level: onto the focus's parent, or the root.
    pub fn zoom_out(&mut self, now: f64) -> Activation {
        let focus = self.zoom.focus();
        let parent = self.tree.get(focus).and_then(|n| n.parent()).unwrap_or(NodeId::ROOT);
        let activation = self.zoom.zoom_to(&self.tree, parent, now);
        self.started(activation)
    }

    /// A click at `point` (pixels). The center control zooms out, a wedge
    /// zooms in, and empty space does nothing (`None`).
    pub fn pointer_down(&mut self, point: Coord<f64>, now: f64) -> Option<Activation> {
        if self.zoom.is_animating() { return Some(Activation::Ignored(IgnoreReason::Animating)) }
        if self.scale.in_center_hole(point) { return Some(self.zoom_out(now)) }
        let id = self.hit_test(point)?;
        Some(self.activate(id, now))
    }

    /// Pointer moved to `point`. Returns the hovered node, if any.
    pub fn pointer_move(&mut self, point: Coord<f64>) -> Option<NodeId> {
        if self.zoom.is_animating() { return None }
        let hit = if self.scale.in_center_hole(point) { None } else { self.hit_test(point) };
        self.nav.hover(&self.tree, hit, point);
        self.publish();
        self.nav.hovered()
    }

    pub fn pointer_leave(&mut self) {
        self.nav.clear_hover();
        self.publish();
    }

    /// Advance the animation to `now` and republish.
    pub fn tick(&mut self, now: f64) -> Tick {
        let tick = self.zoom.tick(now);
        match tick {
            Tick::Idle => return tick,
            Tick::Running { .. } => {}
            Tick::Completed { focus } => {
                self.nav.set_animating(false);
                self.nav.focus_changed(&self.tree, focus);
            }
        }
        self.publish();
        tick
    }

    /// Back to the canonical root view, aborting any transition.
    pub fn reset(&mut self) {
        self.zoom.reset(&self.tree);
        self.nav.reset(&self.tree);
        self.publish();
    }

    /// Latest published frame. Cloning the `Arc` is cheap; the frame never changes.
    #[inline] pub fn frame(&self) -> Arc<Frame> { Arc::clone(&self.frame) }

    #[inline] pub fn breadcrumb(&self) -> &[Crumb] { self.nav.breadcrumb() }
    #[inline] pub fn focus(&self) -> NodeId { self.nav.focus() }
    #[inline] pub fn current(&self, id: NodeId) -> Option<ArcState> { self.zoom.current(id) }
    #[inline] pub fn target(&self, id: NodeId) -> Option<ArcState> { self.zoom.target(id) }
    #[inline] pub fn is_animating(&self) -> bool { self.zoom.is_animating() }
    #[inline] pub fn hovered(&self) -> Option<NodeId> { self.nav.hovered() }

    /// Interactive wedge under `point` in the published frame.
    pub fn hit_test(&self, point: Coord<f64>) -> Option<NodeId> {
        self.frame.hit_test(point)
    }

    pub fn subscribe(&mut self, observer: impl NavigationObserver + 'static) {
        self.nav.subscribe(Box::new(observer));
    }

    /// Zoom straight down a path of child names and settle there, without
    /// animating. Returns the node reached; stops at the first name that
    /// does not match or cannot be zoomed onto.
    pub fn zoom_path<S: AsRef<str>>(&mut self, names: &[S]) -> NodeId {
        for name in names {
            let Some(child) = self.tree.child_named(self.focus(), name.as_ref()) else { break };
            if !self.activate(child, 0.0).is_started() { break }
            self.tick(f64::INFINITY);
        }
        self.focus()
    }

    fn started(&mut self, activation: Activation) -> Activation {
        if activation.is_started() {
            self.nav.set_animating(true);
            self.publish();
        } else {
            debug!(?activation, "activation ignored");
        }
        activation
    }

    fn publish(&mut self) {
        let size = (self.config.width, self.config.height);
        self.frame = Arc::new(Frame::build(&self.tree, &self.scale, &self.zoom, &self.nav, size));
    }
}
