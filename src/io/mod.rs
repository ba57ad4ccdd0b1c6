//! IO operations organized by format.
//!
//! - `csv` - region/scheme/village tables, read with polars
//! - `json` - the same records as one JSON document
//! - `svg` - snapshot export of a rendered frame

pub(crate) mod csv;
pub(crate) mod json;
pub(crate) mod svg;
