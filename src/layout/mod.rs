//! Relative positioning of elements.

pub(crate) mod flow;
