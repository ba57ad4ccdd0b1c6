use anyhow::Result;

use crate::commands::{breadcrumb_line, load_chart};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or("./sunburst.svg".into());

    println!("[render] loading data from {}", args.data.data.display());
    let chart = load_chart(&args.data, (args.width, args.height))?;
    println!("[render] {} nodes, focus: {}", chart.tree().len(), breadcrumb_line(&chart));

    println!("[render] writing {} wedges to {}", chart.frame().wedges.len(), out_path.display());
    chart.to_svg(&out_path)?;

    Ok(())
}
