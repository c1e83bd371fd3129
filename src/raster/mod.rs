//! Premultiplied RGBA8 surfaces and the pixel operations the pipeline needs.

pub(crate) mod filter;
pub(crate) mod surface;
pub(crate) mod warp;
