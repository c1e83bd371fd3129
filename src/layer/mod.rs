//! Layers, groups and the element contract they share.

pub(crate) mod element;
pub(crate) mod group;
#[allow(clippy::module_inception)]
pub(crate) mod layer;
