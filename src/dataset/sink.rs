use crate::foundation::error::DocsynthResult;
use crate::template::document::Page;

/// Destination for generated pages.
///
/// A run calls `begin` once, `push_page` for every successful page in ascending index order,
/// and `end` once, also when the run stops early with an error.
pub trait PageSink {
    /// Acquire resources before the first page.
    fn begin(&mut self) -> DocsynthResult<()> {
        Ok(())
    }

    /// Persist one page.
    fn push_page(&mut self, index: u64, page: &Page) -> DocsynthResult<()>;

    /// Release resources after the last page.
    fn end(&mut self) -> DocsynthResult<()> {
        Ok(())
    }
}

/// Keeps every page in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pages: Vec<(u64, Page)>,
    began: bool,
    ended: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages received so far, with their indices.
    pub fn pages(&self) -> &[(u64, Page)] {
        &self.pages
    }

    /// Consume the sink.
    pub fn into_pages(self) -> Vec<(u64, Page)> {
        self.pages
    }

    /// Return `true` once both `begin` and `end` have been called.
    pub fn is_closed(&self) -> bool {
        self.began && self.ended
    }
}

impl PageSink for InMemorySink {
    fn begin(&mut self) -> DocsynthResult<()> {
        self.began = true;
        Ok(())
    }

    fn push_page(&mut self, index: u64, page: &Page) -> DocsynthResult<()> {
        self.pages.push((index, page.clone()));
        Ok(())
    }

    fn end(&mut self) -> DocsynthResult<()> {
        self.ended = true;
        Ok(())
    }
}
