use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;
use crate::sampling::interval::validate_prob;

/// A randomized pipeline component whose parameters are drawn separately from their use.
pub trait Component {
    /// Parameters produced by one draw.
    type Params: Clone + std::fmt::Debug;

    /// Draw parameters from the page stream.
    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<Self::Params>;

    /// Reject invalid configuration.
    fn validate(&self) -> DocsynthResult<()> {
        Ok(())
    }
}

fn default_weight() -> f64 {
    1.0
}

/// An option together with its selection weight.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Weighted<T> {
    /// Relative weight; zero disables the option.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// The option itself.
    #[serde(flatten)]
    pub item: T,
}

impl<T> Weighted<T> {
    /// Option `item` with weight `weight`.
    pub fn new(weight: f64, item: T) -> Self {
        Self { weight, item }
    }
}

/// Parameters of the option a [`Selector`] picked.
#[derive(Clone, Debug, PartialEq)]
pub struct Selected<P> {
    /// Position of the picked option.
    pub index: usize,
    /// Its sampled parameters.
    pub params: P,
}

/// Weighted choice of exactly one option.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Selector<T> {
    /// Candidate options.
    pub options: Vec<Weighted<T>>,
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<T> Selector<T> {
    /// Selector over `options`.
    pub fn new(options: Vec<Weighted<T>>) -> Self {
        Self { options }
    }

    /// Option at `index`, as reported by [`Selected::index`].
    pub fn option(&self, index: usize) -> DocsynthResult<&T> {
        self.options
            .get(index)
            .map(|w| &w.item)
            .ok_or_else(|| {
                DocsynthError::configuration(format!(
                    "selector index {index} out of range ({} options)",
                    self.options.len()
                ))
            })
    }
}

impl<T: Component> Component for Selector<T> {
    type Params = Selected<T::Params>;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<Self::Params> {
        let dist = WeightedIndex::new(self.options.iter().map(|w| w.weight))
            .map_err(|e| DocsynthError::configuration(format!("selector weights: {e}")))?;
        let index = dist.sample(rng);
        let params = self.option(index)?.sample(rng)?;
        Ok(Selected { index, params })
    }

    fn validate(&self) -> DocsynthResult<()> {
        if self.options.is_empty() {
            return Err(DocsynthError::configuration(
                "selector needs at least one option",
            ));
        }
        let mut total = 0.0;
        for w in &self.options {
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(DocsynthError::configuration(format!(
                    "selector weight must be finite and >= 0, got {}",
                    w.weight
                )));
            }
            total += w.weight;
            w.item.validate()?;
        }
        if total <= 0.0 {
            return Err(DocsynthError::configuration(
                "selector weights must not all be zero",
            ));
        }
        Ok(())
    }
}

/// Enables its inner component with probability `prob`.
///
/// The enable draw is independent of whatever the inner component draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Switch<T> {
    /// Probability of enabling the inner component.
    #[serde(default)]
    pub prob: f64,
    /// Inner component.
    #[serde(flatten)]
    pub component: T,
}

impl<T: Default> Default for Switch<T> {
    fn default() -> Self {
        Self {
            prob: 0.0,
            component: T::default(),
        }
    }
}

impl<T> Switch<T> {
    /// Switch enabling `component` with probability `prob`.
    pub fn new(prob: f64, component: T) -> Self {
        Self { prob, component }
    }
}

impl<T: Component> Component for Switch<T> {
    type Params = Option<T::Params>;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<Self::Params> {
        validate_prob("switch prob", self.prob)?;
        if !rng.random_bool(self.prob) {
            return Ok(None);
        }
        self.component.sample(rng).map(Some)
    }

    fn validate(&self) -> DocsynthResult<()> {
        validate_prob("switch prob", self.prob)?;
        // A switch that can never fire may carry an empty selector.
        if self.prob == 0.0 {
            return Ok(());
        }
        self.component.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/switch.rs"]
mod tests;
