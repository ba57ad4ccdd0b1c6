use geo::Coord;
use serde::Serialize;
use tracing::debug;

use crate::{
    layout::{LayoutTree, NodeId},
    nav::{FocusEvent, HoverEvent, NavigationObserver, Overlay},
};

/// One breadcrumb entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub id: NodeId,
    pub name: String,
}

/// Focus, breadcrumb, hover and tooltip state for one chart, plus the
/// observers that hear about changes to them.
pub struct Navigator {
    focus: NodeId,
    breadcrumb: Vec<Crumb>,
    animating: bool,
    hovered: Option<NodeId>,
    overlay: Overlay,
    observers: Vec<Box<dyn NavigationObserver>>,
}

impl Navigator {
    pub fn new(tree: &LayoutTree) -> Self {
        Self {
            focus: NodeId::ROOT,
            breadcrumb: crumbs(tree, NodeId::ROOT),
            animating: false,
            hovered: None,
            overlay: Overlay::default(),
            observers: Vec::new(),
        }
    }

    #[inline] pub fn focus(&self) -> NodeId { self.focus }
    #[inline] pub fn breadcrumb(&self) -> &[Crumb] { &self.breadcrumb }
    #[inline] pub fn is_animating(&self) -> bool { self.animating }
    #[inline] pub fn hovered(&self) -> Option<NodeId> { self.hovered }
    #[inline] pub fn overlay(&self) -> &Overlay { &self.overlay }

    pub fn subscribe(&mut self, observer: Box<dyn NavigationObserver>) {
        self.observers.push(observer);
    }

    /// Entering an animation clears any hover and hides the tooltip.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
        if animating { self.clear_hover() }
    }

    /// Commit a new focus and notify observers.
    pub fn focus_changed(&mut self, tree: &LayoutTree, focus: NodeId) {
        self.focus = focus;
        self.breadcrumb = crumbs(tree, focus);
        debug!(focus = focus.0, depth = self.breadcrumb.len() - 1, "focus changed");

        let event = FocusEvent::new(tree, focus);
        for observer in self.observers.iter_mut() {
            observer.on_focus(&event);
        }
    }

    /// Back to the root after a reset or a data refresh. Observers are kept.
    pub fn reset(&mut self, tree: &LayoutTree) {
        self.animating = false;
        self.hovered = None;
        self.overlay.hide();
        self.focus_changed(tree, NodeId::ROOT);
    }

    /// Pointer moved to `position` over `node` (or over nothing).
    /// Returns whether the hovered node changed. No-op while animating.
    pub fn hover(&mut self, tree: &LayoutTree, node: Option<NodeId>, position: Coord<f64>) -> bool {
        if self.animating { return false }
        if node == self.hovered {
            self.overlay.move_to(position);
            return false;
        }

        self.hovered = node;
        match node {
            Some(id) => {
                let event = HoverEvent::new(tree, id);
                self.overlay.show(position, &event);
                for observer in self.observers.iter_mut() {
                    observer.on_hover(&event);
                }
            }
            None => {
                self.overlay.hide();
                for observer in self.observers.iter_mut() {
                    observer.on_hover_end();
                }
            }
        }
        true
    }

    pub fn clear_hover(&mut self) {
        if self.hovered.take().is_some() {
            for observer in self.observers.iter_mut() {
                observer.on_hover_end();
            }
        }
        self.overlay.hide();
    }
}

fn crumbs(tree: &LayoutTree, id: NodeId) -> Vec<Crumb> {
    tree.path(id).into_iter().map(|id| Crumb { id, name: tree.node(id).name().to_owned() }).collect()
}
