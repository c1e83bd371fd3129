use crate::foundation::core::{Point, Size};
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;
use crate::layer::element::Element;
use crate::sampling::interval::Interval;

/// Placement of an item inside the space available to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Flush with the start.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Flush with the end.
    End,
}

impl Align {
    fn factor(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

/// Flow layout settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowLayoutConfig {
    /// Container length along the flow axis; lines wrap once they would exceed it.
    pub length: f64,
    /// Gap between neighbours on one line.
    pub space: Interval,
    /// Gap between consecutive lines.
    pub line_space: Interval,
    /// Placement of each line inside `length`.
    pub align: Align,
    /// Cross-axis placement of each element inside its line.
    pub line_align: Align,
    /// Flow top to bottom and wrap into columns.
    pub vertical: bool,
}

impl Default for FlowLayoutConfig {
    fn default() -> Self {
        Self {
            length: 800.0,
            space: Interval::new(4.0, 12.0),
            line_space: Interval::new(4.0, 12.0),
            align: Align::Start,
            line_align: Align::Start,
            vertical: false,
        }
    }
}

impl FlowLayoutConfig {
    /// Reject non-positive lengths and negative or non-finite gaps.
    pub fn validate(&self, name: &str) -> DocsynthResult<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(DocsynthError::configuration(format!(
                "{name}.length must be finite and > 0, got {}",
                self.length
            )));
        }
        self.space
            .validate_within(&format!("{name}.space"), 0.0, f64::MAX)?;
        self.line_space
            .validate_within(&format!("{name}.line_space"), 0.0, f64::MAX)
    }
}

/// Positions elements left to right (or top to bottom), wrapping at the container length.
///
/// Sizes are never changed. Layout starts at the origin; callers move the result afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowLayout {
    config: FlowLayoutConfig,
}

struct Line {
    items: Vec<(usize, f64)>,
    extent: f64,
    thickness: f64,
}

impl FlowLayout {
    /// Validated layout.
    pub fn new(config: FlowLayoutConfig, name: &str) -> DocsynthResult<Self> {
        config.validate(name)?;
        Ok(Self { config })
    }

    /// Settings in use.
    pub fn config(&self) -> &FlowLayoutConfig {
        &self.config
    }

    /// Place every element in order. Gap draws come from `rng`.
    ///
    /// An element longer than the container still gets placed, alone on its own line. Every
    /// top-left lands on whole pixels, so rasters drawn at rounded offsets match their boxes.
    pub fn apply<E: Element>(&self, rng: &mut PageRng, elements: &mut [E]) -> DocsynthResult<()> {
        let sizes = elements
            .iter()
            .map(|e| self.axes(e.size()))
            .collect::<DocsynthResult<Vec<_>>>()?;

        let mut lines: Vec<Line> = Vec::new();
        for (i, &(main, cross)) in sizes.iter().enumerate() {
            match lines.last_mut() {
                Some(line) => {
                    let gap = self.config.space.sample(rng);
                    let start = (line.extent + gap).ceil();
                    if start + main > self.config.length {
                        lines.push(Line {
                            items: vec![(i, 0.0)],
                            extent: main,
                            thickness: cross,
                        });
                    } else {
                        line.items.push((i, start));
                        line.extent = start + main;
                        line.thickness = line.thickness.max(cross);
                    }
                }
                None => lines.push(Line {
                    items: vec![(i, 0.0)],
                    extent: main,
                    thickness: cross,
                }),
            }
        }

        let mut cross_cursor = 0.0;
        for (n, line) in lines.iter().enumerate() {
            if n > 0 {
                cross_cursor = (cross_cursor + self.config.line_space.sample(rng)).ceil();
            }
            let shift =
                ((self.config.length - line.extent).max(0.0) * self.config.align.factor()).floor();
            for &(i, main_at) in &line.items {
                let (_, cross) = sizes[i];
                let cross_at = cross_cursor
                    + ((line.thickness - cross) * self.config.line_align.factor()).floor();
                let p = if self.config.vertical {
                    Point::new(cross_at, shift + main_at)
                } else {
                    Point::new(shift + main_at, cross_at)
                };
                elements[i].set_topleft(p);
            }
            cross_cursor = (cross_cursor + line.thickness).ceil();
        }
        Ok(())
    }

    fn axes(&self, size: Size) -> DocsynthResult<(f64, f64)> {
        if !size.width.is_finite() || !size.height.is_finite() {
            return Err(DocsynthError::geometry(format!(
                "cannot lay out element of size {}x{}",
                size.width, size.height
            )));
        }
        Ok(if self.config.vertical {
            (size.height, size.width)
        } else {
            (size.width, size.height)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flow.rs"]
mod tests;
