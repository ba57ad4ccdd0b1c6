//! Focus, breadcrumb, hover and the observer contract.

mod events;
mod navigator;
mod overlay;

pub use events::{Callbacks, FocusEvent, HoverEvent, NavigationObserver};
pub use navigator::{Crumb, Navigator};
pub use overlay::Overlay;
