#![doc = "Sunburst public API"]
pub mod color;
pub mod geometry;
pub mod hierarchy;
pub mod layout;
pub mod nav;
pub mod zoom;

mod config;
mod dataset;
mod frame;
mod io;
mod sunburst;

#[doc(inline)]
pub use config::SunburstConfig;

#[doc(inline)]
pub use dataset::Dataset;

#[doc(inline)]
pub use frame::{Frame, WedgeFrame, BRANCH_OPACITY, LEAF_OPACITY};

#[doc(inline)]
pub use hierarchy::{Grouping, HierarchyBuilder, HierarchyNode};

#[doc(inline)]
pub use layout::{partition, ArcState, LayoutTree, NodeId};

#[doc(inline)]
pub use nav::{Callbacks, Crumb, FocusEvent, HoverEvent, NavigationObserver};

#[doc(inline)]
pub use sunburst::Sunburst;

#[doc(inline)]
pub use zoom::{Activation, IgnoreReason, Tick};

#[doc(no_inline)]
pub use geo::Coord;
