use std::sync::Arc;

use spillmap_core::Report;

/// Forward-only cursor over an immutable search result, handing out
/// fixed-size pages for the sample list.
#[derive(Debug, Clone)]
pub struct SampleCursor {
    reports: Arc<[Report]>,
    offset: usize,
    page_size: usize,
}

impl SampleCursor {
    /// A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(reports: Arc<[Report]>, page_size: usize) -> Self {
        Self {
            reports,
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn empty(page_size: usize) -> Self {
        Self::new(Arc::from(Vec::new()), page_size)
    }

    /// The page that [`SampleCursor::advance`] would move past, without
    /// moving. Empty once exhausted.
    #[must_use]
    pub fn peek_page(&self) -> &[Report] {
        let end = (self.offset + self.page_size).min(self.reports.len());
        &self.reports[self.offset..end]
    }

    /// Moves past `count` reports, stopping at the end of the result.
    pub fn advance(&mut self, count: usize) {
        self.offset = (self.offset + count).min(self.reports.len());
    }

    /// Returns the next page and advances past it. Empty once exhausted.
    pub fn next_page(&mut self) -> &[Report] {
        let start = self.offset;
        self.advance(self.page_size);
        &self.reports[start..self.offset]
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.reports.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.reports.len() - self.offset
    }

    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }
}
