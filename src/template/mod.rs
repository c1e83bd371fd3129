//! Page templates: configuration, paragraph assembly and document rendering.

pub(crate) mod config;
pub(crate) mod document;
pub(crate) mod paragraph;
