//! Pixel-level passes applied to text layers before layout.

pub(crate) mod shape;
pub(crate) mod style;

use crate::foundation::error::DocsynthResult;
use crate::layer::layer::Layer;
use crate::sampling::switch::{Component, Selector, Switch};

/// Component that rewrites layer pixels with a shared parameter set.
pub trait LayerEffect: Component {
    /// Apply `params` to every layer in `layers`.
    fn apply(&self, params: &Self::Params, layers: &mut [Layer]) -> DocsynthResult<()>;
}

impl<T: LayerEffect> LayerEffect for Selector<T> {
    fn apply(&self, params: &Self::Params, layers: &mut [Layer]) -> DocsynthResult<()> {
        self.option(params.index)?.apply(&params.params, layers)
    }
}

impl<T: LayerEffect> LayerEffect for Switch<T> {
    fn apply(&self, params: &Self::Params, layers: &mut [Layer]) -> DocsynthResult<()> {
        match params {
            Some(p) => self.component.apply(p, layers),
            None => Ok(()),
        }
    }
}
