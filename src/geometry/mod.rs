//! Arc geometry and visibility policy.

mod label;
mod scale;
mod wedge;

pub use label::LabelPlacement;
pub use scale::RadialScale;
pub use wedge::{polar, Wedge};
