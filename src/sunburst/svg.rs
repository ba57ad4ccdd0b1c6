use std::{io::Write, path::Path};

use anyhow::Result;

use crate::{io::svg::{write_frame_svg, SvgStringWriter, SvgWriter}, sunburst::Sunburst};

impl Sunburst {
    /// Write the published frame to an SVG file.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        write_frame_svg(&mut writer, &self.frame())?;
        writer.flush()?;
        Ok(())
    }

    /// The published frame as an SVG document (for WASM/browser use).
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        write_frame_svg(&mut writer, &self.frame())?;
        writer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::SunburstConfig, hierarchy::{HierarchyNode, NodeKind}, sunburst::Sunburst};

    #[test]
    fn svg_contains_wedges_labels_and_breadcrumb() {
        let root = HierarchyNode::root("Root & Co")
            .with_child(HierarchyNode::new("Pune", NodeKind::Region { id: None }).with_weight(3.0))
            .with_child(HierarchyNode::new("Nashik", NodeKind::Region { id: None }));
        let chart = Sunburst::new(root, SunburstConfig::default());

        let svg = chart.to_svg_string().unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="arc""#).count(), 2);
        assert!(svg.contains(">Pune</text>"));
        assert!(svg.contains("Root &amp; Co"));
        assert!(svg.contains(r#"<circle class="hole""#));
    }

    #[test]
    fn svg_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let chart = Sunburst::new(HierarchyNode::root("Root"), SunburstConfig::default());
        chart.to_svg(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
