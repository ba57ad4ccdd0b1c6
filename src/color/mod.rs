//! Display colors for sunburst wedges.

mod policy;
mod rgb;

pub use policy::{category_color, color, kind_color, status_color, ColorKey, NEUTRAL_GRAY};
pub use rgb::Rgb;
