use std::path::PathBuf;

/// Sunburst chart renderer (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "sunburst", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render a dataset to SVG, optionally zoomed along a path
    Render(RenderArgs),

    /// Print the partitioned hierarchy or the rendered frame
    Inspect(InspectArgs),
}

/// Where the records come from and how they are shaped.
#[derive(clap::Args, Debug)]
pub struct DataArgs {
    /// Directory with regions.csv, schemes.csv and villages.csv, or a JSON file
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub data: PathBuf,

    /// JSON config file (viewport and styling)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Insert a category level under each region
    #[arg(short, long, value_enum)]
    pub group: Option<GroupArg>,

    /// Label of the root node
    #[arg(long)]
    pub root_label: Option<String>,

    /// Rings shown at once (defaults to the tree depth)
    #[arg(long)]
    pub levels: Option<u32>,

    /// Zoom path, names separated by '/', e.g. "Pune/Scheme A"
    #[arg(short, long)]
    pub zoom: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum GroupArg {
    Completion,
    Lpcd,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output SVG file, defaults to "./sunburst.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub height: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Print the rendered frame as JSON instead of the tree
    #[arg(long)]
    pub json: bool,
}
