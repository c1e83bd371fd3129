use rand::Rng;

use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;

/// Closed numeric range `[min, max]`, written as a two-element JSON array.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Interval {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Interval {
    /// Range `[min, max]`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always yields `v`.
    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    /// Check that both bounds are finite and ordered.
    pub fn validate(&self, name: &str) -> DocsynthResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(DocsynthError::configuration(format!(
                "{name} must have finite bounds, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(DocsynthError::configuration(format!(
                "{name} has min > max ([{}, {}])",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Like [`Interval::validate`], additionally requiring `lo <= min` and `max <= hi`.
    pub fn validate_within(&self, name: &str, lo: f64, hi: f64) -> DocsynthResult<()> {
        self.validate(name)?;
        if self.min < lo || self.max > hi {
            return Err(DocsynthError::configuration(format!(
                "{name} must lie within [{lo}, {hi}], got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Uniform draw. A degenerate range returns its bound without touching the stream.
    pub fn sample(&self, rng: &mut PageRng) -> f64 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

impl From<[f64; 2]> for Interval {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Interval> for [f64; 2] {
    fn from(v: Interval) -> Self {
        [v.min, v.max]
    }
}

/// Validate a probability in `[0, 1]`.
pub(crate) fn validate_prob(name: &str, p: f64) -> DocsynthResult<()> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(DocsynthError::configuration(format!(
            "{name} must be within [0, 1], got {p}"
        )));
    }
    Ok(())
}

/// Uniform count in `[1, max]`.
pub(crate) fn sample_count(rng: &mut PageRng, max: u32) -> u32 {
    if max <= 1 {
        return 1;
    }
    rng.random_range(1..=max)
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/interval.rs"]
mod tests;
