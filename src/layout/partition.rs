use std::f64::consts::TAU;

use tracing::debug;

use crate::{
    hierarchy::HierarchyNode,
    layout::{ArcState, LayoutNode, LayoutTree, NodeId},
};

/// Partition a hierarchy over the full circle.
pub fn partition(root: HierarchyNode) -> LayoutTree {
    partition_with_angle(root, TAU)
}

/// Partition a hierarchy over `[0, total_angle)`.
///
/// Every node accumulates its own weight plus its descendants' (`value`).
/// Children are ordered by descending value (stable, so ties keep source
/// order) and split their parent's span in proportion to their value, with
/// no gaps. Rings are one depth unit thick.
pub fn partition_with_angle(root: HierarchyNode, total_angle: f64) -> LayoutTree {
    let total_angle = if total_angle.is_finite() && total_angle > 0.0 { total_angle } else { TAU };

    // 1) Flatten in source pre-order; ids are stable across sorting.
    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(root.len());
    let mut stack: Vec<(HierarchyNode, Option<NodeId>, u32)> = vec![(root, None, 0)];
    while let Some((source, parent, depth)) = stack.pop() {
        let id = NodeId(nodes.len() as u32);
        if let Some(p) = parent { nodes[p.index()].children.push(id) }

        let HierarchyNode { name, kind, weight, status, category, color, children, details } = source;
        let weight = if weight.is_finite() && weight > 0.0 { weight } else { 0.0 };

        nodes.push(LayoutNode {
            id,
            parent,
            children: Vec::with_capacity(children.len()),
            depth,
            weight,
            value: weight,
            canonical: ArcState::default(),
            name,
            kind,
            status,
            category,
            color,
            details,
        });

        // Reverse so the first child is popped (and numbered) first.
        stack.extend(children.into_iter().rev().map(|child| (child, Some(id), depth + 1)));
    }

    // 2) Sum bottom-up: children always have larger ids than their parent.
    for i in (1..nodes.len()).rev() {
        if let Some(p) = nodes[i].parent {
            let value = nodes[i].value;
            nodes[p.index()].value += value;
        }
    }

    // 3) Sort children by descending value; `sort_by` is stable.
    for i in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[i].children);
        children.sort_by(|a, b| nodes[b.index()].value.total_cmp(&nodes[a.index()].value));
        nodes[i].children = children;
    }

    // 4) Allocate spans top-down.
    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    nodes[0].canonical = ArcState::new(0.0, total_angle, 0.0, 1.0);

    let mut queue = vec![NodeId::ROOT];
    while let Some(id) = queue.pop() {
        let ArcState { x0, x1, .. } = nodes[id.index()].canonical;
        let children = nodes[id.index()].children.clone();
        let total: f64 = children.iter().map(|c| nodes[c.index()].value).sum();

        let mut cumulative = 0.0;
        for &child in &children {
            let node = &mut nodes[child.index()];
            let depth = node.depth as f64;

            let (c0, c1) = if total > 0.0 {
                let start = x0 + (x1 - x0) * (cumulative / total);
                cumulative += node.value;
                // The last allocation ends on the parent's edge exactly.
                let end = if cumulative >= total { x1 } else { x0 + (x1 - x0) * (cumulative / total) };
                (start, end.max(start))
            } else {
                (x0, x0)
            };

            node.canonical = ArcState::new(c0, c1, depth, depth + 1.0);
        }

        queue.extend(children);
    }

    debug!(nodes = nodes.len(), max_depth, "partitioned hierarchy");
    LayoutTree { nodes, max_depth, total_angle }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::hierarchy::NodeKind;

    const EPS: f64 = 1e-9;

    fn leaf(name: &str, weight: f64) -> HierarchyNode {
        HierarchyNode::new(name, NodeKind::Region { id: None }).with_weight(weight)
    }

    #[test]
    fn two_regions_three_to_one() {
        let tree = partition(HierarchyNode::root("Root").with_child(leaf("A", 3.0)).with_child(leaf("B", 1.0)));

        let a = tree.node(NodeId(1)).canonical();
        let b = tree.node(NodeId(2)).canonical();
        assert!(a.approx_eq(&ArcState::new(0.0, 1.5 * PI, 1.0, 2.0), EPS));
        assert!(b.approx_eq(&ArcState::new(1.5 * PI, 2.0 * PI, 1.0, 2.0), EPS));
        assert_eq!(tree.root().value(), 4.0);
        assert_eq!(tree.levels(), 2);
    }

    #[test]
    fn ids_follow_source_order_but_layout_sorts_by_value() {
        let tree = partition(HierarchyNode::root("Root")
            .with_child(leaf("small", 1.0))
            .with_child(leaf("big", 5.0).with_child(leaf("big.child", 2.0))));

        assert_eq!(tree.node(NodeId(1)).name(), "small");
        assert_eq!(tree.node(NodeId(2)).name(), "big");
        assert_eq!(tree.node(NodeId(3)).name(), "big.child");

        // big: own 5 + child 2
        assert_eq!(tree.node(NodeId(2)).value(), 7.0);
        assert_eq!(tree.root().children(), &[NodeId(2), NodeId(1)]);
        assert_eq!(tree.node(NodeId(2)).canonical().x0, 0.0);
        assert_eq!(tree.preorder(), vec![NodeId(0), NodeId(2), NodeId(3), NodeId(1)]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let tree = partition(HierarchyNode::root("Root")
            .with_child(leaf("first", 2.0))
            .with_child(leaf("second", 2.0))
            .with_child(leaf("third", 2.0)));

        assert_eq!(tree.root().children(), &[NodeId(1), NodeId(2), NodeId(3)]);
        let spans = tree.root().children().iter().map(|&c| tree.node(c).canonical()).collect::<Vec<_>>();
        assert!(spans[0].x1 <= spans[1].x0 + EPS && spans[1].x1 <= spans[2].x0 + EPS);
    }

    #[test]
    fn completeness_contiguity_and_depth() {
        let mut root = HierarchyNode::root("Root");
        for r in 0..4 {
            let mut region = leaf(&format!("r{r}"), r as f64);
            for s in 0..(r + 1) {
                region.push(leaf(&format!("r{r}s{s}"), (s * 7 % 5) as f64 + 0.5));
            }
            root.push(region);
        }
        let tree = partition(root);

        for node in tree.iter() {
            let s = node.canonical();
            assert_eq!(s.y0, node.depth() as f64);
            assert_eq!(s.thickness(), 1.0);
            assert!(s.x0 >= 0.0 && s.x1 <= 2.0 * PI + EPS && s.x0 <= s.x1);

            if node.is_leaf() { continue }
            let spans = node.children().iter().map(|&c| tree.node(c).canonical()).collect::<Vec<_>>();
            let total: f64 = spans.iter().map(ArcState::span).sum();
            assert!((total - s.span()).abs() < EPS);
            assert!((spans[0].x0 - s.x0).abs() < EPS);
            assert!((spans.last().unwrap().x1 - s.x1).abs() < EPS);
            for pair in spans.windows(2) { assert!((pair[0].x1 - pair[1].x0).abs() < EPS) }

            let values = node.children().iter().map(|&c| tree.node(c).value()).collect::<Vec<_>>();
            for pair in values.windows(2) { assert!(pair[0] >= pair[1]) }
        }
    }

    #[test]
    fn zero_weight_nodes_are_degenerate() {
        let tree = partition(HierarchyNode::root("Root")
            .with_child(leaf("zero", 0.0))
            .with_child(leaf("negative", -4.0))
            .with_child(leaf("nan", f64::NAN))
            .with_child(leaf("one", 1.0)));

        for id in [NodeId(1), NodeId(2), NodeId(3)] {
            assert!(tree.node(id).canonical().is_degenerate());
            assert_eq!(tree.node(id).weight(), 0.0);
        }
        assert!((tree.node(NodeId(4)).canonical().span() - 2.0 * PI).abs() < EPS);
    }

    #[test]
    fn all_zero_siblings_collapse_onto_parent_start() {
        let tree = partition(HierarchyNode::root("Root").with_child(leaf("a", 0.0)).with_child(leaf("b", 0.0)));
        for node in tree.iter().skip(1) {
            assert_eq!(node.canonical().x0, 0.0);
            assert_eq!(node.canonical().x1, 0.0);
        }
    }

    #[test]
    fn root_only_tree() {
        let tree = partition(HierarchyNode::root("Lonely"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.max_depth(), 0);
        assert_eq!(tree.path_names(NodeId::ROOT), vec!["Lonely".to_owned()]);
    }

    #[test]
    fn custom_total_angle() {
        let tree = partition_with_angle(HierarchyNode::root("Root").with_child(leaf("a", 1.0)), PI);
        assert_eq!(tree.total_angle(), PI);
        assert!((tree.node(NodeId(1)).canonical().x1 - PI).abs() < EPS);
    }
}
