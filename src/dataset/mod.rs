//! Persisting pages and driving multi-page runs.

pub(crate) mod run;
pub(crate) mod sink;
pub(crate) mod writer;
