//! Source hierarchy: typed nodes and the builder that assembles them from
//! flat region/scheme/village records.

mod build;
mod node;
mod records;

pub use build::{
    average_lpcd, build, lpcd_status, scheme_status, Grouping, HierarchyBuilder,
    DEFAULT_ROOT_LABEL, DEFAULT_SCHEME_WEIGHT, DEFAULT_VILLAGE_WEIGHT, LPCD_CRITICAL, LPCD_TARGET,
};
pub use node::{Category, HierarchyNode, KindTag, NodeKind, Status};
pub use records::{RegionRecord, SchemeRecord, VillageRecord};

pub(crate) use records::parse_number;
