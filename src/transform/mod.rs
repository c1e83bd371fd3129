//! Joint geometric transforms over sets of elements.

pub(crate) mod kind;

use crate::foundation::core::{Rect, validated_rect};
use crate::foundation::error::DocsynthResult;
use crate::foundation::math::Homography;
use crate::layer::element::{Transformable, union_bbox};
use crate::sampling::switch::{Component, Selector, Switch};

/// Component mapping a set of elements through one homography.
///
/// Sampling and application are separate so the same parameters can be applied again, for
/// example to a merged paragraph and to its constituent layers at once.
pub trait GeometricTransform: Component {
    /// Homography for `params` relative to `reference`, or `None` for a no-op.
    fn homography(
        &self,
        params: &Self::Params,
        reference: Rect,
    ) -> DocsynthResult<Option<Homography>>;

    /// Map every element through the homography built from the union box of all of them.
    ///
    /// The elements move as if rigidly attached: one matrix, one reference frame.
    fn apply(
        &self,
        params: &Self::Params,
        elements: &mut [&mut dyn Transformable],
    ) -> DocsynthResult<()> {
        let Some(reference) = union_bbox(elements.iter().map(|e| &**e)) else {
            return Ok(());
        };
        let reference = validated_rect(reference, "transform reference")?;
        let Some(h) = self.homography(params, reference)? else {
            return Ok(());
        };
        for element in elements.iter_mut() {
            element.apply_homography(&h)?;
        }
        Ok(())
    }
}

impl<T: GeometricTransform> GeometricTransform for Selector<T> {
    fn homography(
        &self,
        params: &Self::Params,
        reference: Rect,
    ) -> DocsynthResult<Option<Homography>> {
        self.option(params.index)?
            .homography(&params.params, reference)
    }
}

impl<T: GeometricTransform> GeometricTransform for Switch<T> {
    fn homography(
        &self,
        params: &Self::Params,
        reference: Rect,
    ) -> DocsynthResult<Option<Homography>> {
        match params {
            Some(p) => self.component.homography(p, reference),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mod.rs"]
mod tests;
