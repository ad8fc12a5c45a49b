//! # Pagination
//!
//! Infinite scroll over the flattened menu. The cursor only moves forward; a
//! fresh [`Paginator`] is the only way back to page zero.
use menu::MenuItem;

pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone)]
pub struct Paginator {
    cursor: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            cursor: 0,
            page_size: page_size.max(1),
        }
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// The next slice of `items`, empty once every page has been handed out.
    /// The cursor advances either way.
    pub fn next_page<'a>(&mut self, items: &'a [MenuItem]) -> &'a [MenuItem] {
        let start = self.cursor.saturating_mul(self.page_size);
        self.cursor = self.cursor.saturating_add(1);

        if start >= items.len() {
            return &[];
        }

        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Where the viewport sits relative to the document, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPosition {
    /// Scroll offset plus viewport height.
    pub viewport_bottom: u32,
    pub document_height: u32,
}

/// Fires once per visit to the bottom of the document.
///
/// Repeated events at the bottom are ignored until either the document grows
/// (a page was rendered) or the viewport leaves the bottom. The second case
/// keeps pagination going when a page fits without changing the height.
#[derive(Debug, Clone, Default)]
pub struct ScrollGuard {
    fired_at_height: Option<u32>,
}

impl ScrollGuard {
    pub fn should_fire(&mut self, position: ScrollPosition) -> bool {
        if position.viewport_bottom < position.document_height {
            self.fired_at_height = None;
            return false;
        }

        if self.fired_at_height == Some(position.document_height) {
            return false;
        }

        self.fired_at_height = Some(position.document_height);
        true
    }
}
