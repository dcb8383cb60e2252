use super::{Document, Page, decoration};

/// Cursor and page list for one render pass.
///
/// The cursor is a baseline y coordinate. It only moves down while a page is
/// current and jumps back to the continuation top margin when a page is
/// added. Pages are kept in creation order; the last one is current.
pub(crate) struct RenderState {
    pages: Vec<Page>,
    cursor_y: f32,
    page_count: usize,
}

impl RenderState {
    pub(crate) fn new(doc: &Document) -> Self {
        Self {
            pages: vec![Page::new()],
            cursor_y: doc.geometry.height - doc.geometry.first_top,
            page_count: 1,
        }
    }

    pub(crate) fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub(crate) fn page_count(&self) -> usize {
        self.page_count
    }

    pub(crate) fn current_page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub(crate) fn advance(&mut self, dy: f32) {
        debug_assert!(dy > 0.0, "cursor must move down, got {dy}");
        self.cursor_y -= dy;
    }

    /// Start a new page unless `needed` points still fit above the bottom
    /// margin. Returns true when a page was added.
    ///
    /// The page being left is sealed first so it keeps its page number and
    /// watermark. A single check is made: a unit taller than a fresh page is
    /// drawn on the new page regardless.
    pub(crate) fn ensure_space(&mut self, doc: &Document, needed: f32) -> bool {
        let g = &doc.geometry;
        if self.cursor_y - g.bottom_margin >= needed {
            return false;
        }

        let leaving = self.page_count;
        decoration::seal_page(doc, self.current_page_mut(), leaving);

        self.page_count += 1;
        let mut page = Page::new();
        decoration::draw_continuation(doc, &mut page, self.page_count);
        self.pages.push(page);
        self.cursor_y = g.height - g.continuation_top;

        log::debug!(
            "page {} started: needed {needed:.1}pt, cursor reset to {:.1}",
            self.page_count,
            self.cursor_y
        );
        true
    }

    pub(crate) fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}
