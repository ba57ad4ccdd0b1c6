use serde::Serialize;
use serde_json::Value;

use crate::layout::{LayoutTree, NodeId};

/// Emitted when a zoom completes and on reset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FocusEvent {
    pub node: NodeId,
    /// Display names from the root down to `node`.
    pub path: Vec<String>,
    pub details: Value,
}

impl FocusEvent {
    pub fn new(tree: &LayoutTree, node: NodeId) -> Self {
        Self { node, path: tree.path_names(node), details: tree.node(node).details().clone() }
    }
}

/// Emitted when the hovered wedge changes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HoverEvent {
    pub node: NodeId,
    pub name: String,
    pub value: f64,
    pub details: Value,
}

impl HoverEvent {
    pub fn new(tree: &LayoutTree, node: NodeId) -> Self {
        let n = tree.node(node);
        Self { node, name: n.name().to_owned(), value: n.value(), details: n.details().clone() }
    }
}

/// Receives navigation events from a `Sunburst`. All methods default to no-ops.
pub trait NavigationObserver {
    fn on_focus(&mut self, _event: &FocusEvent) {}

    fn on_hover(&mut self, _event: &HoverEvent) {}

    /// The pointer left every wedge.
    fn on_hover_end(&mut self) {}
}

type FocusFn = Box<dyn FnMut(&FocusEvent)>;
type HoverFn = Box<dyn FnMut(&HoverEvent)>;

/// Closure-backed observer, for hosts that hand over plain callbacks.
#[derive(Default)]
pub struct Callbacks {
    on_focus: Option<FocusFn>,
    on_hover: Option<HoverFn>,
}

impl Callbacks {
    pub fn new() -> Self { Self::default() }

    pub fn on_focus(mut self, f: impl FnMut(&FocusEvent) + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    pub fn on_hover(mut self, f: impl FnMut(&HoverEvent) + 'static) -> Self {
        self.on_hover = Some(Box::new(f));
        self
    }
}

impl NavigationObserver for Callbacks {
    fn on_focus(&mut self, event: &FocusEvent) {
        if let Some(f) = self.on_focus.as_mut() { f(event) }
    }

    fn on_hover(&mut self, event: &HoverEvent) {
        if let Some(f) = self.on_hover.as_mut() { f(event) }
    }
}
