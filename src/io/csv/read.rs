//! CSV reading operations.
//!
//! Every column is read as text and parsed leniently afterwards, so a stray
//! "n/a" in a numeric column never fails the whole file.

use std::{collections::HashMap, fs::File, io::Cursor, path::Path};

use anyhow::{ensure, Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType}};
use tracing::warn;

use crate::hierarchy::{parse_number, RegionRecord, SchemeRecord, VillageRecord};

/// Reads a CSV file from `path` into a DataFrame of string columns.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a CSV from a string (for WASM/browser use).
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv::read] Failed to read CSV from string")
}

/// Text columns of a frame, looked up by trimmed lowercase header.
struct Columns {
    by_name: HashMap<String, Vec<Option<String>>>,
    order: Vec<String>,
    height: usize,
}

impl Columns {
    fn new(df: &DataFrame) -> Result<Self> {
        let mut by_name = HashMap::new();
        let mut order = Vec::new();
        for column in df.get_columns() {
            let key = column.name().as_str().trim().to_lowercase();
            let text = column.cast(&DataType::String)?;
            let values = text.str()?.into_iter()
                .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned))
                .collect();
            if by_name.insert(key.clone(), values).is_none() { order.push(key) }
        }
        Ok(Self { by_name, order, height: df.height() })
    }

    fn require(&self, name: &str, table: &str) -> Result<()> {
        ensure!(self.by_name.contains_key(name), "[io::csv::read] {table} CSV is missing required column '{name}'");
        Ok(())
    }

    fn text(&self, name: &str, row: usize) -> Option<String> {
        self.by_name.get(name).and_then(|c| c[row].clone())
    }

    fn number(&self, name: &str, row: usize) -> Option<f64> {
        self.by_name.get(name).and_then(|c| c[row].as_deref()).and_then(parse_number)
    }

    /// Columns named `lpcd*`, in file order.
    fn prefixed(&self, prefix: &str) -> Vec<&Vec<Option<String>>> {
        self.order.iter().filter(|k| k.starts_with(prefix)).map(|k| &self.by_name[k]).collect()
    }
}

pub(crate) fn read_regions(df: &DataFrame) -> Result<Vec<RegionRecord>> {
    let cols = Columns::new(df)?;
    cols.require("name", "regions")?;

    Ok((0..cols.height).filter_map(|row| {
        let Some(name) = cols.text("name", row) else {
            warn!(row, "[io::csv] region row without a name dropped");
            return None;
        };
        Some(RegionRecord {
            id: cols.text("id", row),
            name,
            integrated_schemes: cols.number("integrated_schemes", row),
        })
    }).collect())
}

pub(crate) fn read_schemes(df: &DataFrame) -> Result<Vec<SchemeRecord>> {
    let cols = Columns::new(df)?;
    cols.require("id", "schemes")?;
    cols.require("name", "schemes")?;

    Ok((0..cols.height).filter_map(|row| {
        let (Some(id), Some(name)) = (cols.text("id", row), cols.text("name", row)) else {
            warn!(row, "[io::csv] scheme row without an id or name dropped");
            return None;
        };
        Some(SchemeRecord {
            id,
            name,
            region: cols.text("region", row).unwrap_or_default(),
            region_id: cols.text("region_id", row),
            status: cols.text("status", row),
            category: cols.text("category", row),
        })
    }).collect())
}

pub(crate) fn read_villages(df: &DataFrame) -> Result<Vec<VillageRecord>> {
    let cols = Columns::new(df)?;
    cols.require("name", "villages")?;
    ensure!(
        cols.by_name.contains_key("scheme_id") || cols.by_name.contains_key("scheme_name"),
        "[io::csv::read] villages CSV needs a 'scheme_id' or 'scheme_name' column"
    );
    let readings = cols.prefixed("lpcd");

    Ok((0..cols.height).filter_map(|row| {
        let Some(name) = cols.text("name", row) else {
            warn!(row, "[io::csv] village row without a name dropped");
            return None;
        };
        Some(VillageRecord {
            id: cols.text("id", row),
            name,
            scheme_id: cols.text("scheme_id", row),
            scheme_name: cols.text("scheme_name", row),
            region: cols.text("region", row),
            population: cols.number("population", row),
            lpcd_readings: readings.iter().map(|c| c[row].as_deref().and_then(parse_number)).collect(),
            status: cols.text("status", row),
            category: cols.text("category", row),
        })
    }).collect())
}
