use rayon::prelude::*;

use crate::dataset::sink::PageSink;
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::page_rng;
use crate::template::document::{DocumentTemplate, Page};
use crate::text::TextRenderer;

/// Options controlling a multi-page run.
#[derive(Clone, Debug)]
pub struct RunOpts {
    /// Number of pages.
    pub count: u64,
    /// Index of the first page.
    pub start_index: u64,
    /// Run seed; page `i` uses the stream derived from `(seed, i)`.
    pub seed: u64,
    /// Generate pages on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Pages generated per parallel batch before they are handed to the sink.
    pub chunk_size: usize,
    /// Stop at the first failed page instead of skipping it.
    pub halt_on_error: bool,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self {
            count: 1,
            start_index: 0,
            seed: 0,
            parallel: false,
            threads: None,
            chunk_size: 64,
            halt_on_error: false,
        }
    }
}

/// Run statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Pages requested.
    pub pages_total: u64,
    /// Pages handed to the sink.
    pub pages_written: u64,
    /// Pages skipped after a per-page error.
    pub pages_failed: u64,
}

/// Generate page `index` of a run seeded with `seed`.
///
/// Errors are tagged with the page index.
pub fn generate_page(
    template: &DocumentTemplate,
    seed: u64,
    index: u64,
    renderer: &mut dyn TextRenderer,
) -> DocsynthResult<Page> {
    let mut rng = page_rng(seed, index);
    template
        .generate(&mut rng, renderer)
        .map_err(|e| DocsynthError::page(index, e))
}

/// Generate `opts.count` pages starting at `opts.start_index` and stream them into `sink`.
///
/// Pages reach the sink in ascending index order whether or not the run is parallel, so both
/// modes produce identical output. Per-page failures are logged and skipped unless
/// `halt_on_error` is set; sink errors always stop the run. `sink.end()` runs in every case
/// once `sink.begin()` has succeeded.
pub fn generate_dataset(
    template: &DocumentTemplate,
    sink: &mut dyn PageSink,
    opts: &RunOpts,
) -> DocsynthResult<RunStats> {
    let end = opts
        .start_index
        .checked_add(opts.count)
        .ok_or_else(|| DocsynthError::configuration("page index range overflows u64"))?;

    sink.begin()?;
    let result = if opts.parallel {
        run_parallel(template, sink, opts, end)
    } else {
        run_sequential(template, sink, opts, end)
    };
    let closed = sink.end();
    let stats = result?;
    closed?;

    tracing::info!(
        total = stats.pages_total,
        written = stats.pages_written,
        failed = stats.pages_failed,
        "dataset run finished"
    );
    Ok(stats)
}

fn run_sequential(
    template: &DocumentTemplate,
    sink: &mut dyn PageSink,
    opts: &RunOpts,
    end: u64,
) -> DocsynthResult<RunStats> {
    let mut stats = RunStats::default();
    let mut renderer = template.create_renderer();
    for index in opts.start_index..end {
        let page = generate_page(template, opts.seed, index, renderer.as_mut());
        deliver(sink, opts, &mut stats, index, page)?;
    }
    Ok(stats)
}

fn run_parallel(
    template: &DocumentTemplate,
    sink: &mut dyn PageSink,
    opts: &RunOpts,
    end: u64,
) -> DocsynthResult<RunStats> {
    let pool = build_thread_pool(opts.threads)?;
    let chunk_size = normalized_chunk_size(opts.chunk_size);
    let mut stats = RunStats::default();

    let mut chunk_start = opts.start_index;
    while chunk_start < end {
        let chunk_end = chunk_start.saturating_add(chunk_size).min(end);
        let len = (chunk_end - chunk_start) as usize;
        let pages: Vec<DocsynthResult<Page>> = pool.install(|| {
            (0..len)
                .into_par_iter()
                .map_init(
                    || template.create_renderer(),
                    |renderer, i| {
                        let index = chunk_start + i as u64;
                        generate_page(template, opts.seed, index, renderer.as_mut())
                    },
                )
                .collect()
        });
        for (index, page) in (chunk_start..chunk_end).zip(pages) {
            deliver(sink, opts, &mut stats, index, page)?;
        }
        chunk_start = chunk_end;
    }
    Ok(stats)
}

fn deliver(
    sink: &mut dyn PageSink,
    opts: &RunOpts,
    stats: &mut RunStats,
    index: u64,
    page: DocsynthResult<Page>,
) -> DocsynthResult<()> {
    stats.pages_total += 1;
    match page {
        Ok(page) => {
            sink.push_page(index, &page)?;
            stats.pages_written += 1;
        }
        Err(e) if opts.halt_on_error => return Err(e),
        Err(e) => {
            tracing::warn!(page = index, error = %e, "skipping failed page");
            stats.pages_failed += 1;
        }
    }
    Ok(())
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> DocsynthResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(DocsynthError::configuration(
            "'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| DocsynthError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/run.rs"]
mod tests;
