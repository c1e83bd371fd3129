use std::path::PathBuf;

use rand::Rng;

use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;
use crate::sampling::Sampler;

/// Where text lines come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    /// UTF-8 text files, one candidate line per line.
    pub paths: Vec<PathBuf>,
    /// Inline candidate lines, used in addition to `paths`.
    pub lines: Vec<String>,
    /// Shortest accepted line, in characters.
    pub min_length: usize,
    /// Longest accepted line, in characters.
    pub max_length: Option<usize>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            lines: [
                "The quick brown fox jumps over the lazy dog",
                "Sphinx of black quartz, judge my vow",
                "Pack my box with five dozen liquor jugs",
                "How vexingly quick daft zebras jump",
                "Invoice No. 2024-0172 due 15/03",
                "Total amount: 1,284.50 EUR",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_length: 1,
            max_length: None,
        }
    }
}

impl CorpusConfig {
    /// Check length bounds.
    pub fn validate(&self) -> DocsynthResult<()> {
        if self.min_length == 0 {
            return Err(DocsynthError::configuration(
                "corpus.min_length must be >= 1",
            ));
        }
        if let Some(max) = self.max_length
            && max < self.min_length
        {
            return Err(DocsynthError::configuration(format!(
                "corpus.max_length ({max}) must be >= min_length ({})",
                self.min_length
            )));
        }
        Ok(())
    }
}

/// Index of a line in a [`LineCorpus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineDraw(pub usize);

/// In-memory line corpus with length filtering.
///
/// Lines are trimmed and tabs or line breaks are folded to spaces at load time; blank lines are
/// dropped.
#[derive(Clone, Debug, Default)]
pub struct LineCorpus {
    lines: Vec<String>,
}

impl LineCorpus {
    /// Read every configured file and inline line.
    ///
    /// An unreadable file is a configuration error. A corpus that ends up empty loads fine and
    /// fails on the first draw instead.
    pub fn load(config: &CorpusConfig) -> DocsynthResult<Self> {
        config.validate()?;
        let mut raw = Vec::new();
        for path in &config.paths {
            let text = std::fs::read_to_string(path).map_err(|e| {
                DocsynthError::configuration(format!(
                    "read corpus file '{}': {e}",
                    path.display()
                ))
            })?;
            raw.extend(text.lines().map(str::to_owned));
        }
        raw.extend(config.lines.iter().cloned());
        Ok(Self::from_lines(raw, config.min_length, config.max_length))
    }

    /// Build from raw lines, keeping those whose length is within bounds.
    pub fn from_lines(
        lines: impl IntoIterator<Item = String>,
        min_length: usize,
        max_length: Option<usize>,
    ) -> Self {
        let lines = lines
            .into_iter()
            .map(|l| l.replace(['\t', '\n', '\r'], " ").trim().to_owned())
            .filter(|l| {
                let n = l.chars().count();
                n >= min_length.max(1) && max_length.is_none_or(|max| n <= max)
            })
            .collect();
        Self { lines }
    }

    /// Number of usable lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Return `true` when no line survived filtering.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Sampler for LineCorpus {
    type Draw = LineDraw;
    type Output = String;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<LineDraw> {
        if self.lines.is_empty() {
            return Err(DocsynthError::exhausted("text corpus has no usable lines"));
        }
        Ok(LineDraw(rng.random_range(0..self.lines.len())))
    }

    fn data(&self, draw: &LineDraw) -> String {
        self.lines.get(draw.0).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/corpus.rs"]
mod tests;
