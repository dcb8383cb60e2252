mod error;
mod fonts;
mod model;
mod pdf;
pub mod store;

#[cfg(feature = "server")]
pub mod server;

pub use error::Error;
pub use fonts::FontStyle;
pub use model::{MeetingRecord, Section, export_filename};
pub use pdf::{
    Decorations, PageGeometry, PageSummary, PlacedText, RenderOptions, RenderedPdf, paragraphs,
    render, wrap,
};

use std::path::Path;
use std::time::Instant;

/// Render a record stored as a JSON file and write the PDF to `output`.
/// Nothing is written unless the render succeeded.
pub fn render_record_file(
    input: &Path,
    output: &Path,
    options: &RenderOptions,
) -> Result<RenderedPdf, Error> {
    let t0 = Instant::now();

    let bytes = std::fs::read(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, input.display())),
        ),
        _ => Error::Io(e),
    })?;
    let record = MeetingRecord::from_json(&bytes)?;
    let t_parse = t0.elapsed();

    let pdf = render(&record, options)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &pdf.bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        pdf.bytes.len(),
    );

    Ok(pdf)
}
