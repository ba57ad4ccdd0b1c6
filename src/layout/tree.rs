use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    color::{ColorKey, Rgb},
    hierarchy::{Category, KindTag, NodeKind, Status},
    layout::ArcState,
};

/// Stable index of a node in a `LayoutTree` (pre-order position in the source tree).
/// Defaults to the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline] pub fn index(self) -> usize { self.0 as usize }
}

/// One node of the partitioned tree.
#[derive(Clone, Debug)]
pub struct LayoutNode {
    pub(super) id: NodeId,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>, // sorted by descending value
    pub(super) depth: u32,
    pub(super) weight: f64,            // own weight, sanitized
    pub(super) value: f64,             // own weight + descendants
    pub(super) canonical: ArcState,
    pub(super) name: String,
    pub(super) kind: NodeKind,
    pub(super) status: Option<Status>,
    pub(super) category: Option<Category>,
    pub(super) color: Option<Rgb>,
    pub(super) details: Value,
}

impl LayoutNode {
    /// Get the node's id.
    #[inline] pub fn id(&self) -> NodeId { self.id }
    /// Get the parent id (`None` for the root).
    #[inline] pub fn parent(&self) -> Option<NodeId> { self.parent }
    /// Get child ids, largest subtree first.
    #[inline] pub fn children(&self) -> &[NodeId] { &self.children }
    /// Get the depth below the root.
    #[inline] pub fn depth(&self) -> u32 { self.depth }
    /// Get the node's own sanitized weight.
    #[inline] pub fn weight(&self) -> f64 { self.weight }
    /// Get the subtree sum.
    #[inline] pub fn value(&self) -> f64 { self.value }
    /// Get the un-zoomed layout state.
    #[inline] pub fn canonical(&self) -> ArcState { self.canonical }
    /// Get the display name.
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn kind(&self) -> &NodeKind { &self.kind }
    #[inline] pub fn status(&self) -> Option<Status> { self.status }
    #[inline] pub fn category(&self) -> Option<Category> { self.category }
    /// Get the opaque payload carried from the source node.
    #[inline] pub fn details(&self) -> &Value { &self.details }
    #[inline] pub fn is_leaf(&self) -> bool { self.children.is_empty() }
    #[inline] pub fn is_root(&self) -> bool { self.parent.is_none() }

    /// Inputs for the color policy.
    pub fn color_key(&self) -> ColorKey {
        ColorKey {
            color: self.color,
            category: self.category,
            status: self.status,
            kind: self.kind.tag(),
        }
    }

    #[inline] pub fn kind_tag(&self) -> KindTag { self.kind.tag() }
}

/// Arena of partitioned nodes. Rebuilt, never patched, when the source changes.
#[derive(Clone, Debug)]
pub struct LayoutTree {
    pub(super) nodes: Vec<LayoutNode>,
    pub(super) max_depth: u32,
    pub(super) total_angle: f64,
}

impl LayoutTree {
    /// Get the number of nodes.
    #[inline] pub fn len(&self) -> usize { self.nodes.len() }

    /// Always false: a tree has at least a root.
    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Get the root node.
    #[inline] pub fn root(&self) -> &LayoutNode { &self.nodes[0] }

    /// Get the depth of the deepest node.
    #[inline] pub fn max_depth(&self) -> u32 { self.max_depth }

    /// Number of rings including the root's (max depth + 1).
    #[inline] pub fn levels(&self) -> u32 { self.max_depth + 1 }

    /// Get the angle the root spans.
    #[inline] pub fn total_angle(&self) -> f64 { self.total_angle }

    #[inline] pub fn contains(&self, id: NodeId) -> bool { id.index() < self.nodes.len() }

    /// Get a node, or `None` for a foreign id.
    #[inline] pub fn get(&self, id: NodeId) -> Option<&LayoutNode> { self.nodes.get(id.index()) }

    /// Panics if `id` does not belong to this tree.
    #[inline] pub fn node(&self, id: NodeId) -> &LayoutNode { &self.nodes[id.index()] }

    /// Nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> { self.nodes.iter() }

    /// Canonical state of every node, indexed by id.
    pub fn canonical_states(&self) -> Vec<ArcState> {
        self.nodes.iter().map(|n| n.canonical).collect()
    }

    /// Ids from the root down to `id`, inclusive.
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.node(id).depth as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.node(current).parent;
        }
        path.reverse();
        path
    }

    /// Display names from the root down to `id`, inclusive.
    pub fn path_names(&self, id: NodeId) -> Vec<String> {
        self.path(id).into_iter().map(|n| self.node(n).name.clone()).collect()
    }

    /// First child of `parent` whose name matches `name` after trimming.
    pub fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let name = name.trim();
        self.get(parent)?.children.iter().copied().find(|&c| self.node(c).name.trim() == name)
    }

    /// Ids in depth-first order, children visited largest first.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev());
        }
        order
    }
}
