//! Animated zoom between canonical layout states.

mod easing;
mod machine;
mod transition;

pub use easing::ease_in_out_cubic;
pub use machine::{Activation, IgnoreReason, Tick, ZoomMachine, ZoomState};
pub use transition::{zoom_target, zoom_targets, Transition};
