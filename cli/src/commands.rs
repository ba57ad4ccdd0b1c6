pub mod inspect;
pub mod render;

use anyhow::{ensure, Result};
use sunburst::{Dataset, Grouping, Sunburst, SunburstConfig};

use crate::cli::{DataArgs, GroupArg};

/// Load the dataset and config named by `args`, and zoom along `--zoom`.
pub fn load_chart(args: &DataArgs, size: (Option<f64>, Option<f64>)) -> Result<Sunburst> {
    let mut config = match &args.config {
        Some(path) => SunburstConfig::from_json_file(path)?,
        None => SunburstConfig::default(),
    };
    if let Some(width) = size.0 { config.width = width }
    if let Some(height) = size.1 { config.height = height }
    if let Some(levels) = args.levels { config.levels = Some(levels) }
    if let Some(label) = &args.root_label { config.root_label = label.clone() }
    config.validate()?;

    ensure!(args.data.exists(), "[cli] Data path {} does not exist", args.data.display());
    let dataset = if args.data.is_dir() {
        Dataset::from_csv_dir(&args.data)?
    } else {
        Dataset::from_json_file(&args.data)?
    };

    let grouping = args.group.map(|g| match g {
        GroupArg::Completion => Grouping::Completion,
        GroupArg::Lpcd => Grouping::Lpcd,
    });
    let mut chart = Sunburst::from_dataset(&dataset, grouping, config);

    if let Some(path) = &args.zoom {
        let names: Vec<&str> = path.split('/').filter(|s| !s.trim().is_empty()).collect();
        chart.zoom_path(&names);
        let reached = chart.breadcrumb().len() - 1;
        if reached < names.len() {
            tracing::warn!(path = %path, reached, "zoom path stopped early");
        }
    }
    Ok(chart)
}

/// Breadcrumb as "A › B › C".
pub fn breadcrumb_line(chart: &Sunburst) -> String {
    chart.breadcrumb().iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(" › ")
}
