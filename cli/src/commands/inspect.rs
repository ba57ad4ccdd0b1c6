use std::f64::consts::TAU;

use anyhow::{Context, Result};
use sunburst::Sunburst;

use crate::commands::{breadcrumb_line, load_chart};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InspectArgs) -> Result<()> {
    let chart = load_chart(&args.data, (None, None))?;

    if args.json {
        let json = serde_json::to_string_pretty(&*chart.frame())
            .context("[inspect] Failed to serialize frame")?;
        println!("{json}");
        return Ok(());
    }

    println!("focus: {}", breadcrumb_line(&chart));
    print_tree(&chart);
    Ok(())
}

/// One line per node below the focus: name, value and share of the circle.
fn print_tree(chart: &Sunburst) {
    let tree = chart.tree();
    let focus_depth = tree.node(chart.focus()).depth();
    let mut stack = vec![chart.focus()];
    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        let Some(state) = chart.current(id) else { continue };
        let indent = "  ".repeat((node.depth() - focus_depth) as usize);
        println!(
            "{indent}{name}  value={value}  share={share:.1}%  kind={kind}",
            name = node.name(),
            value = node.value(),
            share = 100.0 * state.span() / TAU,
            kind = node.kind_tag().to_str(),
        );
        stack.extend(node.children().iter().rev());
    }
}
