use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::hierarchy::{
    Category, HierarchyNode, NodeKind, RegionRecord, SchemeRecord, Status, VillageRecord,
};

pub const DEFAULT_ROOT_LABEL: &str = "Maharashtra";

/// Weight of a village whose population is missing or malformed.
pub const DEFAULT_VILLAGE_WEIGHT: f64 = 100.0;

/// Weight of a scheme with no matched villages.
pub const DEFAULT_SCHEME_WEIGHT: f64 = 1.0;

/// Liters per capita per day at or above which supply is adequate.
pub const LPCD_TARGET: f64 = 55.0;

/// Liters per capita per day below which supply is critical.
pub const LPCD_CRITICAL: f64 = 40.0;

const COMPLETED_LITERAL: &str = "Fully Completed";

/// Intermediate level inserted below each region by `build_grouped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grouping {
    /// Region → completion bucket → scheme → village.
    Completion,
    /// Region → LPCD bucket → village.
    Lpcd,
}

/// Assembles region/scheme/village records into a rooted hierarchy.
#[derive(Clone, Debug)]
pub struct HierarchyBuilder {
    root_label: String,
}

impl Default for HierarchyBuilder {
    fn default() -> Self { Self::new(DEFAULT_ROOT_LABEL) }
}

/// Build with the default root label.
pub fn build(regions: &[RegionRecord], schemes: &[SchemeRecord], villages: &[VillageRecord]) -> HierarchyNode {
    HierarchyBuilder::default().build(regions, schemes, villages)
}

impl HierarchyBuilder {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self { root_label: root_label.into() }
    }

    /// Root → Region → Scheme → Village.
    pub fn build(&self, regions: &[RegionRecord], schemes: &[SchemeRecord], villages: &[VillageRecord]) -> HierarchyNode {
        let joined = Joined::resolve(regions, schemes, villages);

        let mut root = HierarchyNode::root(self.root_label.as_str());
        for (r, region) in regions.iter().enumerate() {
            let children = joined.schemes_by_region[r].iter()
                .map(|&s| scheme_node(&schemes[s], &joined.villages_by_scheme[s], villages))
                .collect::<Vec<_>>();
            root.push(region_node(region, children));
        }

        debug!(nodes = root.len(), "built hierarchy");
        root
    }

    /// Like `build`, with an extra category level under each region.
    pub fn build_grouped(&self, regions: &[RegionRecord], schemes: &[SchemeRecord], villages: &[VillageRecord], grouping: Grouping) -> HierarchyNode {
        let joined = Joined::resolve(regions, schemes, villages);

        let mut root = HierarchyNode::root(self.root_label.as_str());
        for (r, region) in regions.iter().enumerate() {
            let region_schemes = &joined.schemes_by_region[r];

            let buckets = match grouping {
                Grouping::Completion => {
                    let mut completed = Vec::new();
                    let mut in_progress = Vec::new();
                    for &s in region_schemes {
                        let node = scheme_node(&schemes[s], &joined.villages_by_scheme[s], villages);
                        match node.status {
                            Some(Status::Completed) => completed.push(node),
                            _ => in_progress.push(node),
                        }
                    }
                    vec![
                        bucket_node(NodeKind::CompletionCategory, Category::FullyCompleted, completed),
                        bucket_node(NodeKind::CompletionCategory, Category::InProgress, in_progress),
                    ]
                }
                Grouping::Lpcd => {
                    let mut above = Vec::new();
                    let mut below = Vec::new();
                    for &s in region_schemes {
                        for &v in &joined.villages_by_scheme[s] {
                            let node = village_node(&villages[v]);
                            match average_lpcd(&villages[v].lpcd_readings) {
                                Some(avg) if avg >= LPCD_TARGET => above.push(node),
                                Some(_) => below.push(node),
                                None => debug!(village = %villages[v].name, "no LPCD readings; left out of LPCD view"),
                            }
                        }
                    }
                    vec![
                        bucket_node(NodeKind::LpcdCategory, Category::AboveLpcd, above),
                        bucket_node(NodeKind::LpcdCategory, Category::BelowLpcd, below),
                    ]
                }
            };

            let children = buckets.into_iter().flatten().collect();
            let mut node = region_node(region, children);
            // The explicit metric counts schemes, which the buckets already account for.
            if region.integrated_schemes.is_none() { node.weight = region_schemes.len() as f64 }
            root.push(node);
        }

        debug!(nodes = root.len(), ?grouping, "built grouped hierarchy");
        root
    }
}

/// Parent assignments resolved from the flat records.
struct Joined {
    schemes_by_region: Vec<Vec<usize>>,
    villages_by_scheme: Vec<Vec<usize>>,
}

impl Joined {
    fn resolve(regions: &[RegionRecord], schemes: &[SchemeRecord], villages: &[VillageRecord]) -> Self {
        let region_ids = first_index(regions.iter().map(|r| r.id.as_deref()), "region id");
        let region_names = first_index(regions.iter().map(|r| Some(r.name.trim())), "region name");

        let mut schemes_by_region = vec![Vec::new(); regions.len()];
        let mut scheme_attached = vec![false; schemes.len()];
        for (s, scheme) in schemes.iter().enumerate() {
            let by_id = scheme.region_id.as_deref().and_then(|id| region_ids.get(id).copied());
            if by_id.is_none() && scheme.region_id.is_some() {
                debug!(scheme = %scheme.name, region_id = ?scheme.region_id, "unknown region id; falling back to name match");
            }

            match by_id.or_else(|| region_names.get(scheme.region.trim()).copied()) {
                Some(r) => {
                    schemes_by_region[r].push(s);
                    scheme_attached[s] = true;
                }
                None => warn!(scheme = %scheme.name, region = %scheme.region, "scheme references no known region; dropped"),
            }
        }

        let scheme_ids = first_index(schemes.iter().map(|s| Some(s.id.as_str())), "scheme id");
        let mut scheme_names: HashMap<&str, Vec<usize>> = HashMap::new();
        for (s, scheme) in schemes.iter().enumerate() {
            scheme_names.entry(scheme.name.trim()).or_default().push(s);
        }

        let mut villages_by_scheme = vec![Vec::new(); schemes.len()];
        for (v, village) in villages.iter().enumerate() {
            let by_id = village.scheme_id.as_deref().and_then(|id| scheme_ids.get(id).copied());
            let by_name = || village.scheme_name.as_deref()
                .and_then(|name| scheme_names.get(name.trim()))
                .and_then(|candidates| pick_by_region(candidates, schemes, village));

            match by_id.or_else(by_name) {
                Some(s) if scheme_attached[s] => villages_by_scheme[s].push(v),
                Some(s) => debug!(village = %village.name, scheme = %schemes[s].name, "village belongs to a dropped scheme"),
                None => warn!(village = %village.name, scheme_id = ?village.scheme_id, "village references no known scheme; dropped"),
            }
        }

        Self { schemes_by_region, villages_by_scheme }
    }
}

/// Among schemes sharing a display name, prefer the one in the village's
/// region. Without a region match the first candidate wins.
fn pick_by_region(candidates: &[usize], schemes: &[SchemeRecord], village: &VillageRecord) -> Option<usize> {
    let (&first, rest) = candidates.split_first()?;
    if rest.is_empty() { return Some(first) }

    let in_region = village.region.as_deref()
        .and_then(|region| candidates.iter().copied().find(|&s| schemes[s].region.trim() == region.trim()));
    if in_region.is_none() {
        warn!(village = %village.name, scheme = %schemes[first].name, region = ?village.region, "ambiguous scheme name; keeping first occurrence");
    }
    Some(in_region.unwrap_or(first))
}

/// Index keys to the first record carrying them; later duplicates are logged and ignored.
fn first_index<'a>(keys: impl Iterator<Item = Option<&'a str>>, what: &str) -> HashMap<&'a str, usize> {
    let mut index = HashMap::new();
    for (i, key) in keys.enumerate() {
        let Some(key) = key else { continue };
        if index.contains_key(key) {
            warn!(key, what, "duplicate key; keeping first occurrence");
            continue;
        }
        index.insert(key, i);
    }
    index
}

fn region_node(region: &RegionRecord, children: Vec<HierarchyNode>) -> HierarchyNode {
    let weight = region.integrated_schemes
        .filter(|&w| w >= 0.0)
        .unwrap_or(children.len() as f64);

    let mut node = HierarchyNode::new(region.name.as_str(), NodeKind::Region { id: region.id.clone() })
        .with_weight(weight)
        .with_details(details_of(region));
    node.children = children;
    node
}

fn scheme_node(scheme: &SchemeRecord, matched: &[usize], villages: &[VillageRecord]) -> HierarchyNode {
    let weight = if matched.is_empty() { DEFAULT_SCHEME_WEIGHT } else { matched.len() as f64 };

    let kind = NodeKind::Scheme { id: scheme.id.clone(), region_id: scheme.region_id.clone() };
    let mut node = HierarchyNode::new(scheme.name.as_str(), kind)
        .with_weight(weight)
        .with_status(Some(scheme_status(scheme.status.as_deref())))
        .with_category(parse_label(scheme.category.as_deref(), Category::parse, &scheme.name))
        .with_details(details_of(scheme));
    node.children = matched.iter().map(|&v| village_node(&villages[v])).collect();
    node
}

fn village_node(village: &VillageRecord) -> HierarchyNode {
    let population = village.population.filter(|&p| p >= 0.0);
    let average = average_lpcd(&village.lpcd_readings);

    let status = parse_label(village.status.as_deref(), Status::parse, &village.name)
        .or(average.map(lpcd_status));

    let kind = NodeKind::Village { id: village.id.clone(), population, average_lpcd: average };
    HierarchyNode::new(village.name.as_str(), kind)
        .with_weight(population.unwrap_or(DEFAULT_VILLAGE_WEIGHT))
        .with_status(status)
        .with_category(parse_label(village.category.as_deref(), Category::parse, &village.name))
        .with_details(details_of(village))
}

/// Parse an optional collaborator label into a closed enum. Unknown labels become `None`.
fn parse_label<T>(label: Option<&str>, parse: fn(&str) -> Option<T>, owner: &str) -> Option<T> {
    let label = label?;
    let parsed = parse(label);
    if parsed.is_none() { debug!(owner, label, "unrecognized label ignored") }
    parsed
}

/// `None` when the bucket would be empty.
fn bucket_node(kind: NodeKind, category: Category, children: Vec<HierarchyNode>) -> Option<HierarchyNode> {
    if children.is_empty() { return None }

    let mut node = HierarchyNode::new(category.label(), kind)
        .with_weight(children.len() as f64)
        .with_category(Some(category));
    node.children = children;
    Some(node)
}

/// A scheme is complete only on an exact match of the completion literal.
pub fn scheme_status(status: Option<&str>) -> Status {
    match status {
        Some(s) if s.trim() == COMPLETED_LITERAL => Status::Completed,
        _ => Status::InProgress,
    }
}

/// Mean of the available (numeric) readings.
pub fn average_lpcd(readings: &[Option<f64>]) -> Option<f64> {
    let values = readings.iter().flatten().filter(|r| r.is_finite()).collect::<Vec<_>>();
    if values.is_empty() { return None }
    Some(values.iter().copied().sum::<f64>() / values.len() as f64)
}

pub fn lpcd_status(average: f64) -> Status {
    if average >= LPCD_TARGET { Status::Good }
    else if average >= LPCD_CRITICAL { Status::Warning }
    else { Status::Critical }
}

fn details_of(record: &impl Serialize) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}
