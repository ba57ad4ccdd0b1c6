//! CSV reading for region/scheme/village tables.

mod read;

pub(crate) use read::*;
