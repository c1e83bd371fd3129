//! Content and appearance samplers plus the generic switch/selector wrappers.

pub(crate) mod color;
pub(crate) mod corpus;
pub(crate) mod font;
pub(crate) mod interval;
pub(crate) mod switch;

use crate::foundation::error::DocsynthResult;
use crate::foundation::random::PageRng;

/// Two-step collaborator contract: draw a handle, then resolve it to data.
///
/// Keeping the draw separate from the data lets callers record or replay a choice without
/// re-consuming the random stream.
pub trait Sampler {
    /// Opaque handle produced by one draw.
    type Draw;
    /// Resolved value.
    type Output;

    /// Draw a handle from the page stream.
    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<Self::Draw>;

    /// Resolve a handle produced by [`Sampler::sample`].
    fn data(&self, draw: &Self::Draw) -> Self::Output;
}
