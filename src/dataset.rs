use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    hierarchy::{Grouping, HierarchyBuilder, HierarchyNode, RegionRecord, SchemeRecord, VillageRecord},
    io,
};

/// Flat records as supplied by the data collaborator.
///
/// Deserialization checks each record on its own: a malformed record is
/// logged and dropped, and the rest of its table still loads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDataset")]
pub struct Dataset {
    pub regions: Vec<RegionRecord>,
    pub schemes: Vec<SchemeRecord>,
    pub villages: Vec<VillageRecord>,
}

/// Tables as untyped rows. Missing or null tables are empty.
#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    regions: Option<Vec<Value>>,
    #[serde(default)]
    schemes: Option<Vec<Value>>,
    #[serde(default)]
    villages: Option<Vec<Value>>,
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Self {
            regions: records(raw.regions, "regions"),
            schemes: records(raw.schemes, "schemes"),
            villages: records(raw.villages, "villages"),
        }
    }
}

fn records<T: DeserializeOwned>(rows: Option<Vec<Value>>, table: &str) -> Vec<T> {
    rows.unwrap_or_default().into_iter().enumerate().filter_map(|(row, value)| {
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(row, table, error = %err, "[dataset] malformed record dropped");
                None
            }
        }
    }).collect()
}

impl Dataset {
    pub fn new(regions: Vec<RegionRecord>, schemes: Vec<SchemeRecord>, villages: Vec<VillageRecord>) -> Self {
        Self { regions, schemes, villages }
    }

    /// Read `regions.csv`, `schemes.csv` and `villages.csv` from `dir`.
    pub fn from_csv_dir(dir: &Path) -> Result<Self> {
        Self::from_csv_files(&dir.join("regions.csv"), &dir.join("schemes.csv"), &dir.join("villages.csv"))
    }

    pub fn from_csv_files(regions: &Path, schemes: &Path, villages: &Path) -> Result<Self> {
        let dataset = Self {
            regions: io::csv::read_regions(&io::csv::read_csv(regions)?)
                .with_context(|| format!("[dataset] Invalid regions table {}", regions.display()))?,
            schemes: io::csv::read_schemes(&io::csv::read_csv(schemes)?)
                .with_context(|| format!("[dataset] Invalid schemes table {}", schemes.display()))?,
            villages: io::csv::read_villages(&io::csv::read_csv(villages)?)
                .with_context(|| format!("[dataset] Invalid villages table {}", villages.display()))?,
        };
        dataset.log_loaded();
        Ok(dataset)
    }

    /// CSV contents as strings (for WASM/browser use).
    pub fn from_csv_strings(regions: &str, schemes: &str, villages: &str) -> Result<Self> {
        Ok(Self {
            regions: io::csv::read_regions(&io::csv::read_csv_string(regions)?)?,
            schemes: io::csv::read_schemes(&io::csv::read_csv_string(schemes)?)?,
            villages: io::csv::read_villages(&io::csv::read_csv_string(villages)?)?,
        })
    }

    /// `{ "regions": [...], "schemes": [...], "villages": [...] }`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let dataset: Self = io::json::read_json(path)?;
        dataset.log_loaded();
        Ok(dataset)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        io::json::read_json_string(json)
    }

    /// Assemble the hierarchy, optionally with a grouping level under each region.
    pub fn to_hierarchy(&self, builder: &HierarchyBuilder, grouping: Option<Grouping>) -> HierarchyNode {
        match grouping {
            Some(grouping) => builder.build_grouped(&self.regions, &self.schemes, &self.villages, grouping),
            None => builder.build(&self.regions, &self.schemes, &self.villages),
        }
    }

    fn log_loaded(&self) {
        info!(regions = self.regions.len(), schemes = self.schemes.len(), villages = self.villages.len(), "loaded dataset");
    }
}
