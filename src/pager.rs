//! Cursor over the raw records of a filtered view.

use crate::filter::FilteredView;
use crate::records::TripRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One slice of raw records.
#[derive(Debug)]
pub struct Page<'v, 'a> {
    /// Index of the first record within the view.
    pub offset: usize,
    pub records: &'v [&'a TripRecord],
    /// True when this page reaches the end of the view.
    pub last: bool,
}

#[derive(Debug)]
pub struct Pager<'v, 'a> {
    view: &'v FilteredView<'a>,
    cursor: usize,
    page_size: usize,
}

impl<'v, 'a> Pager<'v, 'a> {
    /// A zero page size is treated as one.
    pub fn new(view: &'v FilteredView<'a>, page_size: usize) -> Self {
        Self {
            view,
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn next_page(&mut self) -> Option<Page<'v, 'a>> {
        if self.is_exhausted() {
            return None;
        }
        let records = self.view.records();
        let offset = self.cursor;
        let end = (offset + self.page_size).min(records.len());
        self.cursor = end;

        Some(Page {
            offset,
            records: &records[offset..end],
            last: end == records.len(),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.view.len()
    }

    pub fn remaining(&self) -> usize {
        self.view.len().saturating_sub(self.cursor)
    }
}
