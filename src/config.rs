use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::hierarchy::DEFAULT_ROOT_LABEL;

/// Viewport and styling constants for a sunburst instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunburstConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Radius of the zoom-out control at the center; always clickable.
    pub center_hole_radius: f64,
    /// Gap between rings, subtracted from each outer radius.
    pub stroke_gap: f64,
    /// Upper bound on the angular padding between neighbouring wedges.
    pub pad_angle: f64,
    /// Minimum angular width (radians) for a wedge to carry a label.
    pub label_angle_threshold: f64,
    pub transition_ms: f64,
    /// Rings shown at once; defaults to the tree's level count.
    pub levels: Option<u32>,
    pub root_label: String,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            margin: 10.0,
            center_hole_radius: 50.0,
            stroke_gap: 1.0,
            pad_angle: 0.005,
            label_angle_threshold: 0.08,
            transition_ms: 1000.0,
            levels: None,
            root_label: DEFAULT_ROOT_LABEL.to_owned(),
        }
    }
}

impl SunburstConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .context("[config] Failed to parse sunburst config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("[config] Invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0.0 && self.height > 0.0, "[config] width and height must be positive");
        ensure!(self.margin >= 0.0, "[config] margin must be non-negative");
        ensure!(self.center_hole_radius >= 0.0, "[config] center_hole_radius must be non-negative");
        ensure!(self.stroke_gap >= 0.0 && self.pad_angle >= 0.0, "[config] stroke_gap and pad_angle must be non-negative");
        ensure!(self.transition_ms >= 0.0, "[config] transition_ms must be non-negative");
        ensure!(self.levels != Some(0), "[config] levels must be at least 1");
        Ok(())
    }

    /// Outer radius of the chart in pixels.
    pub fn radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - self.margin).max(0.0)
    }

    /// Chart center in pixels.
    pub fn center(&self) -> (f64, f64) { (self.width / 2.0, self.height / 2.0) }
}
