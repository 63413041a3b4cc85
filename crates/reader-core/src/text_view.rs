use tracing::debug;

use crate::layout::{paginate, Page, Pagination, Size};
use crate::types::{Block, Cursor, PagePosition};

/// Page-oriented access to a laid-out document.
///
/// Page numbers passed in and reported are 1-based.
pub trait TextView {
    fn start_cursor(&self) -> Cursor;
    fn page_position(&self) -> PagePosition;
    fn goto_home(&mut self);
    fn goto_page(&mut self, page: usize);
    fn goto_position(&mut self, cursor: &Cursor);
}

pub struct PagedView {
    pagination: Pagination,
    current: usize,
    size: Size,
}

impl PagedView {
    pub fn new(blocks: &[Block], size: Size) -> Self {
        Self {
            pagination: paginate(blocks, size),
            current: 0,
            size,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pagination.pages
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pagination.pages.get(self.current)
    }

    pub fn next_page(&mut self) {
        self.current = (self.current + 1).min(self.last_index());
    }

    pub fn prev_page(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn goto_end(&mut self) {
        self.current = self.last_index();
    }

    /// Lays the document out again for `size`, staying on the page that holds
    /// the previous start cursor.
    pub fn repaginate(&mut self, blocks: &[Block], size: Size) {
        if size == self.size {
            return;
        }
        let anchor = self.start_cursor();
        self.pagination = paginate(blocks, size);
        self.size = size;
        self.current = self.pagination.page_for_cursor(anchor);
        debug!(
            width = size.width,
            height = size.height,
            pages = self.pagination.pages.len(),
            "repaginated"
        );
    }

    fn last_index(&self) -> usize {
        self.pagination.pages.len().saturating_sub(1)
    }
}

impl TextView for PagedView {
    fn start_cursor(&self) -> Cursor {
        self.current_page().map(|p| p.start).unwrap_or_default()
    }

    fn page_position(&self) -> PagePosition {
        PagePosition {
            current: self.current + 1,
            total: self.pagination.pages.len().max(1),
        }
    }

    fn goto_home(&mut self) {
        self.current = 0;
    }

    fn goto_page(&mut self, page: usize) {
        self.current = page.saturating_sub(1).min(self.last_index());
    }

    fn goto_position(&mut self, cursor: &Cursor) {
        self.current = self.pagination.page_for_cursor(*cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> Vec<Block> {
        (0..10)
            .map(|i| Block::Paragraph(format!("paragraph number {i} has words")))
            .collect()
    }

    fn view() -> PagedView {
        PagedView::new(
            &blocks(),
            Size {
                width: 40,
                height: 2,
            },
        )
    }

    #[test]
    fn goto_page_is_one_based_and_clamped() {
        let mut v = view();
        let total = v.page_position().total;
        v.goto_page(3);
        assert_eq!(v.page_position().current, 3);
        v.goto_page(total + 5);
        assert_eq!(v.page_position().current, total);
        v.goto_page(0);
        assert_eq!(v.page_position().current, 1);
    }

    #[test]
    fn goto_position_returns_to_saved_cursor() {
        let mut v = view();
        v.goto_page(4);
        let saved = v.start_cursor();
        v.goto_home();
        assert_eq!(v.page_position().current, 1);
        v.goto_position(&saved);
        assert_eq!(v.page_position().current, 4);
        assert_eq!(v.start_cursor(), saved);
    }

    #[test]
    fn repaginate_keeps_reading_position() {
        let blocks = blocks();
        let mut v = view();
        v.goto_page(7);
        let before = v.start_cursor();
        v.repaginate(
            &blocks,
            Size {
                width: 40,
                height: 6,
            },
        );
        let page = v.current_page().expect("page");
        assert!(page.start <= before);
        assert!(v.page_position().current < 7);
    }

    #[test]
    fn next_and_prev_stop_at_edges() {
        let mut v = view();
        v.prev_page();
        assert_eq!(v.page_position().current, 1);
        v.goto_end();
        let total = v.page_position().total;
        v.next_page();
        assert_eq!(v.page_position().current, total);
    }
}
