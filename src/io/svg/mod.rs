//! SVG export of rendered frames.

mod frame;
mod writer;

pub(crate) use frame::*;
pub(crate) use writer::*;
