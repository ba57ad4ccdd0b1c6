mod sunburst;
mod svg;

pub use sunburst::Sunburst;
