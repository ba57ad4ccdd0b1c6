//! Partition layout: angular and radial extents for every node.

mod partition;
mod state;
mod tree;

pub use partition::{partition, partition_with_angle};
pub use state::ArcState;
pub use tree::{LayoutNode, LayoutTree, NodeId};
