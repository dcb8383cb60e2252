mod decoration;
mod flow;
mod layout;
mod section;

use chrono::{Datelike, FixedOffset, Offset, Timelike, Utc};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{FontHandle, FontPair, FontStyle, printable_text, register_fonts, to_winansi_bytes};
use crate::model::{MeetingRecord, export_filename};

use flow::RenderState;

pub use layout::{paragraphs, wrap};

/// Resource name of the translucent graphics state used by the watermark.
const WATERMARK_GS: &[u8] = b"GS1";
const WATERMARK_OPACITY: f32 = 0.2;

const HEADING_SIZE: f32 = 14.0;
const HEADING_ADVANCE: f32 = 20.0;
const DATE_SIZE: f32 = 12.0;
const DATE_ADVANCE: f32 = 30.0;

/// Page size and the fixed offsets every page is laid out against.
/// All values are PDF points measured from the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    /// Distance from the top edge to the first baseline on page 1.
    pub first_top: f32,
    /// Distance from the top edge to the first baseline on overflow pages.
    pub continuation_top: f32,
    pub bottom_margin: f32,
    pub footer_y: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4
        Self {
            width: 595.28,
            height: 841.89,
            margin_x: 60.0,
            first_top: 70.0,
            continuation_top: 100.0,
            bottom_margin: 0.0,
            footer_y: 40.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub geometry: PageGeometry,
    /// Offset used when printing the record's creation timestamp.
    pub utc_offset: FixedOffset,
    /// Column count used by the wrapping heuristic.
    pub wrap_columns: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            utc_offset: Utc.fix(),
            wrap_columns: 90,
        }
    }
}

impl RenderOptions {
    fn validate(&self) -> Result<(), Error> {
        let g = &self.geometry;
        if self.wrap_columns == 0 {
            return Err(Error::Render("wrap_columns must be positive".into()));
        }
        if g.width <= 2.0 * g.margin_x {
            return Err(Error::Render(format!(
                "page width {} leaves no room between margins of {}",
                g.width, g.margin_x
            )));
        }
        if g.height <= g.first_top.max(g.continuation_top) + g.bottom_margin {
            return Err(Error::Render(format!(
                "page height {} is smaller than its top and bottom margins",
                g.height
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rgb(pub(crate) f32, pub(crate) f32, pub(crate) f32);

pub(crate) struct Palette {
    pub(crate) title: Rgb,
    pub(crate) text: Rgb,
    pub(crate) line: Rgb,
    pub(crate) footer: Rgb,
    pub(crate) watermark: Rgb,
}

const PALETTE: Palette = Palette {
    title: Rgb(0.1, 0.2, 0.6),
    text: Rgb(0.0, 0.0, 0.0),
    line: Rgb(0.85, 0.85, 0.85),
    footer: Rgb(0.4, 0.4, 0.4),
    watermark: Rgb(0.9, 0.9, 0.9),
};

/// Immutable per-render resources: fonts, palette and geometry.
pub(crate) struct Document {
    pub(crate) fonts: FontPair,
    pub(crate) palette: &'static Palette,
    pub(crate) geometry: PageGeometry,
    pub(crate) wrap_columns: usize,
}

/// One string placed on a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub style: FontStyle,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f32,
}

/// Which decorations a page carries. Each is drawn at most once per page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decorations {
    pub header: bool,
    pub continuation_header: bool,
    pub page_number: bool,
    pub created_date: bool,
    pub watermark: bool,
}

pub(crate) struct Page {
    content: Content,
    texts: Vec<PlacedText>,
    pub(crate) decorations: Decorations,
}

impl Page {
    pub(crate) fn new() -> Self {
        Self {
            content: Content::new(),
            texts: Vec::new(),
            decorations: Decorations::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn texts(&self) -> &[PlacedText] {
        &self.texts
    }

    pub(crate) fn draw_text(
        &mut self,
        font: &FontHandle,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
    ) {
        let shown = printable_text(text);
        self.content.set_fill_rgb(color.0, color.1, color.2);
        self.content.begin_text();
        self.content.set_font(font.name(), size);
        self.content.next_line(x, y);
        self.content.show(Str(&to_winansi_bytes(&shown)));
        self.content.end_text();
        self.place(font, &shown, x, y, size, 0.0);
    }

    /// Text rotated about its own origin, painted with the watermark's
    /// reduced fill opacity.
    pub(crate) fn draw_translucent_text(
        &mut self,
        font: &FontHandle,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        degrees: f32,
    ) {
        let shown = printable_text(text);
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.content.save_state();
        self.content.set_parameters(Name(WATERMARK_GS));
        self.content.set_fill_rgb(color.0, color.1, color.2);
        self.content.begin_text();
        self.content.set_font(font.name(), size);
        self.content.set_text_matrix([cos, sin, -sin, cos, x, y]);
        self.content.show(Str(&to_winansi_bytes(&shown)));
        self.content.end_text();
        self.content.restore_state();
        self.place(font, &shown, x, y, size, degrees);
    }

    pub(crate) fn draw_line(&mut self, x1: f32, x2: f32, y: f32, thickness: f32, color: Rgb) {
        self.content.save_state();
        self.content.set_stroke_rgb(color.0, color.1, color.2);
        self.content.set_line_width(thickness);
        self.content.move_to(x1, y);
        self.content.line_to(x2, y);
        self.content.stroke();
        self.content.restore_state();
    }

    fn place(&mut self, font: &FontHandle, text: &str, x: f32, y: f32, size: f32, rotation: f32) {
        self.texts.push(PlacedText {
            text: text.to_string(),
            x,
            y,
            size,
            style: font.style,
            rotation,
        });
    }
}

/// What a finished page carries, kept after its content stream is written.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSummary {
    pub texts: Vec<PlacedText>,
    pub decorations: Decorations,
}

impl PageSummary {
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text == needle)
    }
}

/// A complete, serialized document. Only produced when every render phase
/// succeeded.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub pages: Vec<PageSummary>,
}

impl RenderedPdf {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

pub fn render(record: &MeetingRecord, options: &RenderOptions) -> Result<RenderedPdf, Error> {
    let t0 = std::time::Instant::now();
    options.validate()?;

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let fonts = register_fonts(&mut pdf, &mut alloc);
    let watermark_gs = alloc();
    pdf.ext_graphics(watermark_gs)
        .non_stroking_alpha(WATERMARK_OPACITY);

    let doc = Document {
        fonts,
        palette: &PALETTE,
        geometry: options.geometry,
        wrap_columns: options.wrap_columns,
    };

    // Phase 1: lay out the page-1 header, heading and sections
    let mut state = RenderState::new(&doc);
    decoration::draw_header(&doc, &mut state);

    let margin_x = doc.geometry.margin_x;
    let y = state.cursor_y();
    state.current_page_mut().draw_text(
        &doc.fonts.bold,
        &record.heading(),
        margin_x,
        y,
        HEADING_SIZE,
        doc.palette.title,
    );
    state.advance(HEADING_ADVANCE);
    let y = state.cursor_y();
    state.current_page_mut().draw_text(
        &doc.fonts.regular,
        &record.date_line(),
        margin_x,
        y,
        DATE_SIZE,
        doc.palette.text,
    );
    state.advance(DATE_ADVANCE);

    for s in record.sections() {
        section::add_section(&doc, &mut state, &s);
    }
    let t_layout = t0.elapsed();

    // Phase 2: footer and watermark on whichever page is current
    decoration::finalize(&doc, &mut state, &record.created_label(options.utc_offset));
    let pages = state.into_pages();

    // Phase 3: allocate page and content IDs now that page count is known
    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let mut summaries = Vec::with_capacity(n);
    for (i, page) in pages.into_iter().enumerate() {
        summaries.push(PageSummary {
            texts: page.texts,
            decorations: page.decorations,
        });
        let raw = page.content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let g = &doc.geometry;
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, g.width, g.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for font in doc.fonts.iter() {
                fonts.pair(font.name(), font.font_ref);
            }
        }
        resources.ext_g_states().pair(Name(WATERMARK_GS), watermark_gs);
    }

    let heading = record.heading();
    let created = record.created_at;
    pdf.document_info(info_id)
        .title(TextStr(&heading))
        .producer(TextStr(concat!("moteva-pdf ", env!("CARGO_PKG_VERSION"))))
        .creation_date(
            Date::new(created.year().clamp(0, 9999) as u16)
                .month(created.month() as u8)
                .day(created.day() as u8)
                .hour(created.hour() as u8)
                .minute(created.minute() as u8)
                .second(created.second() as u8)
                .utc_offset_hour(0),
        );

    let bytes = pdf.finish();
    let t_total = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, assembly={:.1}ms, total={:.1}ms ({} pages, {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        n,
        bytes.len(),
    );

    Ok(RenderedPdf {
        bytes,
        filename: export_filename(record.title.as_deref()),
        pages: summaries,
    })
}

#[cfg(test)]
pub(crate) fn test_document() -> Document {
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };
    let fonts = register_fonts(&mut Pdf::new(), &mut alloc);
    Document {
        fonts,
        palette: &PALETTE,
        geometry: PageGeometry::default(),
        wrap_columns: 90,
    }
}
