//! Immutable render snapshots.
//!
//! A `Frame` holds everything a host needs to draw the chart at one instant:
//! concrete wedges with colors and opacities, label placements, breadcrumb and
//! tooltip. The facade rebuilds one after every mutation and publishes it
//! wholesale, so a renderer never sees a half-updated tree.

use geo::Coord;
use serde::Serialize;

use crate::{
    color::{color, Rgb},
    geometry::{LabelPlacement, RadialScale, Wedge},
    layout::{LayoutTree, NodeId},
    nav::{Crumb, Navigator, Overlay},
    zoom::ZoomMachine,
};

/// Fill opacity of wedges with children; leaves use `LEAF_OPACITY`.
pub const BRANCH_OPACITY: f64 = 0.6;
pub const LEAF_OPACITY: f64 = 0.4;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WedgeFrame {
    pub id: NodeId,
    pub name: String,
    pub wedge: Wedge,
    pub color: Rgb,
    pub opacity: f64,
    pub label: Option<LabelPlacement>,
    pub label_opacity: f64,
    /// Receives pointer events. Always false mid-transition.
    pub interactive: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub center: Coord<f64>,
    pub center_hole_radius: f64,
    /// Drawn back to front: parents before children, larger siblings first.
    pub wedges: Vec<WedgeFrame>,
    pub breadcrumb: Vec<Crumb>,
    pub focus: NodeId,
    pub animating: bool,
    pub overlay: Overlay,
}

impl Frame {
    pub fn build(
        tree: &LayoutTree,
        scale: &RadialScale,
        zoom: &ZoomMachine,
        nav: &Navigator,
        size: (f64, f64),
    ) -> Self {
        let transition = zoom.transition();
        let t = zoom.eased_progress();

        let mut wedges = Vec::with_capacity(tree.len());
        for id in tree.preorder().into_iter().skip(1) {
            let node = tree.node(id);
            let Some(current) = zoom.current(id) else { continue };

            let (arc, label, interactive) = match transition {
                Some(tr) => {
                    let (from, to) = (tr.from()[id.index()], tr.to()[id.index()]);
                    (
                        blend(scale.arc_visible(&from), scale.arc_visible(&to), t),
                        blend(scale.label_visible(&from), scale.label_visible(&to), t),
                        false,
                    )
                }
                None => {
                    let visible = scale.arc_visible(&current);
                    (visible as u8 as f64, scale.label_visible(&current) as u8 as f64, visible)
                }
            };

            let wedge = scale.wedge(&current);
            if arc <= 0.0 || wedge.is_empty() { continue }

            let base = if node.is_leaf() { LEAF_OPACITY } else { BRANCH_OPACITY };
            wedges.push(WedgeFrame {
                id,
                name: node.name().to_owned(),
                wedge,
                color: color(&node.color_key()),
                opacity: base * arc,
                label: (label > 0.0).then(|| scale.label(&current)),
                label_opacity: label,
                interactive,
            });
        }

        Self {
            width: size.0,
            height: size.1,
            center: scale.center,
            center_hole_radius: scale.center_hole,
            wedges,
            breadcrumb: nav.breadcrumb().to_vec(),
            focus: nav.focus(),
            animating: zoom.is_animating(),
            overlay: nav.overlay().clone(),
        }
    }

    /// Topmost interactive wedge under `point`, if any.
    pub fn hit_test(&self, point: Coord<f64>) -> Option<NodeId> {
        self.wedges.iter().rev()
            .find(|w| w.interactive && w.wedge.contains(self.center, point))
            .map(|w| w.id)
    }

    pub fn wedge(&self, id: NodeId) -> Option<&WedgeFrame> {
        self.wedges.iter().find(|w| w.id == id)
    }
}

/// Opacity between the start and end visibility, each evaluated once.
#[inline]
fn blend(from: bool, to: bool, t: f64) -> f64 {
    let (a, b) = (from as u8 as f64, to as u8 as f64);
    a + (b - a) * t
}
