//! Header, footer and watermark drawing.
//!
//! Every page tracks which of these it already carries in
//! [`Decorations`](super::Decorations), so overflow pages decorated at
//! creation time are not drawn over a second time during finalization.

use super::flow::RenderState;
use super::{Document, Page};

const BRAND: &str = "Moteva";
const WATERMARK_TEXT: &str = "Moteva Confidential";

const HEADER_SIZE: f32 = 18.0;
const HEADER_ADVANCE: f32 = 30.0;
const CONTINUATION_HEADER_SIZE: f32 = 14.0;
const CONTINUATION_HEADER_TOP: f32 = 60.0;
const CONTINUATION_RULE_TOP: f32 = 70.0;
const RULE_THICKNESS: f32 = 0.5;
const FOOTER_SIZE: f32 = 10.0;
const PAGE_NUMBER_INSET: f32 = 50.0;
const WATERMARK_SIZE: f32 = 40.0;
const WATERMARK_ANGLE: f32 = 45.0;

/// Full-width rule between the horizontal margins.
pub(super) fn draw_rule(doc: &Document, page: &mut Page, y: f32, color: super::Rgb) {
    let g = &doc.geometry;
    page.draw_line(g.margin_x, g.width - g.margin_x, y, RULE_THICKNESS, color);
}

/// Page-1 header: brand name and a rule, drawn at the cursor.
pub(super) fn draw_header(doc: &Document, state: &mut RenderState) {
    let y = state.cursor_y();
    let page = state.current_page_mut();
    page.draw_text(
        &doc.fonts.bold,
        BRAND,
        doc.geometry.margin_x,
        y,
        HEADER_SIZE,
        doc.palette.title,
    );
    state.advance(HEADER_ADVANCE);

    let y = state.cursor_y();
    let page = state.current_page_mut();
    draw_rule(doc, page, y, doc.palette.line);
    page.decorations.header = true;
    state.advance(HEADER_ADVANCE);
}

/// Creation-time decoration of an overflow page: a smaller header pinned to
/// the top edge, the page number and the watermark.
pub(super) fn draw_continuation(doc: &Document, page: &mut Page, page_number: usize) {
    let g = &doc.geometry;
    page.draw_text(
        &doc.fonts.bold,
        BRAND,
        g.margin_x,
        g.height - CONTINUATION_HEADER_TOP,
        CONTINUATION_HEADER_SIZE,
        doc.palette.title,
    );
    draw_rule(doc, page, g.height - CONTINUATION_RULE_TOP, doc.palette.title);
    page.decorations.continuation_header = true;

    draw_page_number(doc, page, page_number);
    draw_watermark(doc, page);
}

pub(super) fn draw_page_number(doc: &Document, page: &mut Page, page_number: usize) {
    if page.decorations.page_number {
        return;
    }
    let g = &doc.geometry;
    page.draw_text(
        &doc.fonts.regular,
        &format!("Sida {page_number}"),
        g.width - g.margin_x - PAGE_NUMBER_INSET,
        g.footer_y,
        FOOTER_SIZE,
        doc.palette.footer,
    );
    page.decorations.page_number = true;
}

fn draw_created_date(doc: &Document, page: &mut Page, created: &str) {
    if created.is_empty() || page.decorations.created_date {
        return;
    }
    let g = &doc.geometry;
    page.draw_text(
        &doc.fonts.regular,
        &format!("Skapad: {created}"),
        g.margin_x,
        g.footer_y,
        FOOTER_SIZE,
        doc.palette.footer,
    );
    page.decorations.created_date = true;
}

pub(super) fn draw_watermark(doc: &Document, page: &mut Page) {
    if page.decorations.watermark {
        return;
    }
    let g = &doc.geometry;
    page.draw_translucent_text(
        &doc.fonts.bold,
        WATERMARK_TEXT,
        g.width / 4.0,
        g.height / 2.0,
        WATERMARK_SIZE,
        doc.palette.watermark,
        WATERMARK_ANGLE,
    );
    page.decorations.watermark = true;
}

/// Give a page its page number and watermark if it has neither yet.
pub(super) fn seal_page(doc: &Document, page: &mut Page, page_number: usize) {
    draw_page_number(doc, page, page_number);
    draw_watermark(doc, page);
}

/// Final footer on the current page: creation date (if any), then whatever
/// page number and watermark the page is still missing.
pub(super) fn finalize(doc: &Document, state: &mut RenderState, created: &str) {
    let page_number = state.page_count();
    let page = state.current_page_mut();
    draw_created_date(doc, page, created);
    seal_page(doc, page, page_number);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_document;

    #[test]
    fn header_moves_cursor_by_two_steps() {
        let doc = test_document();
        let mut state = RenderState::new(&doc);
        let before = state.cursor_y();
        draw_header(&doc, &mut state);
        assert_eq!(state.cursor_y(), before - 2.0 * HEADER_ADVANCE);

        let pages = state.into_pages();
        assert!(pages[0].decorations.header);
        assert_eq!(pages[0].texts()[0].text, BRAND);
        assert_eq!(pages[0].texts()[0].size, HEADER_SIZE);
    }

    #[test]
    fn finalize_twice_draws_each_decoration_once() {
        let doc = test_document();
        let mut state = RenderState::new(&doc);
        finalize(&doc, &mut state, "2024-05-01 12:00:00");
        finalize(&doc, &mut state, "2024-05-01 12:00:00");

        let pages = state.into_pages();
        let texts = pages[0].texts();
        assert_eq!(texts.iter().filter(|t| t.text == WATERMARK_TEXT).count(), 1);
        assert_eq!(texts.iter().filter(|t| t.text == "Sida 1").count(), 1);
        assert_eq!(
            texts
                .iter()
                .filter(|t| t.text == "Skapad: 2024-05-01 12:00:00")
                .count(),
            1
        );
    }

    #[test]
    fn empty_creation_date_is_not_drawn() {
        let doc = test_document();
        let mut state = RenderState::new(&doc);
        finalize(&doc, &mut state, "");
        let pages = state.into_pages();
        assert!(!pages[0].decorations.created_date);
        assert!(pages[0].decorations.page_number);
        assert!(!pages[0].texts().iter().any(|t| t.text.starts_with("Skapad")));
    }

    #[test]
    fn watermark_is_rotated_and_centered() {
        let doc = test_document();
        let mut page = Page::new();
        draw_watermark(&doc, &mut page);
        let mark = &page.texts()[0];
        assert_eq!(mark.rotation, WATERMARK_ANGLE);
        assert_eq!(mark.x, doc.geometry.width / 4.0);
        assert_eq!(mark.y, doc.geometry.height / 2.0);
    }
}
