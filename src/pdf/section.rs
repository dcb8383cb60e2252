use super::flow::RenderState;
use super::layout::{paragraphs, wrap};
use super::{Document, decoration};
use crate::model::Section;

/// Room a section title needs so it never sits alone at a page bottom.
const TITLE_BLOCK_BUDGET: f32 = 120.0;
/// Room a single wrapped body line needs.
const LINE_BUDGET: f32 = 80.0;

const TITLE_SIZE: f32 = 14.0;
const TITLE_ADVANCE: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LINE_GAP: f32 = 16.0;
const PARAGRAPH_GAP: f32 = 10.0;
const SECTION_GAP: f32 = 20.0;

/// Title, wrapped body and closing rule. Blank or absent sections draw
/// nothing and never start a page.
pub(super) fn add_section(doc: &Document, state: &mut RenderState, section: &Section<'_>) {
    let Some(content) = section.content.filter(|_| !section.is_empty()) else {
        return;
    };

    state.ensure_space(doc, TITLE_BLOCK_BUDGET);
    let y = state.cursor_y();
    state.current_page_mut().draw_text(
        &doc.fonts.bold,
        section.title,
        doc.geometry.margin_x,
        y,
        TITLE_SIZE,
        doc.palette.title,
    );
    state.advance(TITLE_ADVANCE);

    write_paragraph(doc, state, content, BODY_SIZE, BODY_LINE_GAP);

    let y = state.cursor_y();
    decoration::draw_rule(doc, state.current_page_mut(), y, doc.palette.line);
    state.advance(SECTION_GAP);
}

pub(super) fn write_paragraph(
    doc: &Document,
    state: &mut RenderState,
    text: &str,
    size: f32,
    line_gap: f32,
) {
    for para in paragraphs(text) {
        for line in wrap(para, doc.wrap_columns) {
            state.ensure_space(doc, LINE_BUDGET);
            let y = state.cursor_y();
            state.current_page_mut().draw_text(
                &doc.fonts.regular,
                &line,
                doc.geometry.margin_x,
                y,
                size,
                doc.palette.text,
            );
            state.advance(line_gap);
        }
        state.advance(PARAGRAPH_GAP);
    }
}
