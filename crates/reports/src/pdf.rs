//! PDF rendering of a report document: A4 pages, builtin Helvetica, plain
//! tables with a bold header row and page breaks.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::document::{ReportDocument, ReportSection};
use crate::error::{ReportError, ReportResult};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 9.0;
const ROW_HEIGHT: f32 = 6.0;
/// Average Helvetica glyph advance at body size, in millimetres.
const CHAR_WIDTH: f32 = 1.7;

/// Render the document to `path` in one go.
pub fn write_pdf(document: &ReportDocument, path: &Path) -> ReportResult<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ReportError::Render(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ReportError::Render(err.to_string()))?;

    {
        let mut page = PageCursor {
            doc: &doc,
            layer: doc.get_page(first_page).get_layer(first_layer),
            y: PAGE_HEIGHT - MARGIN - 5.0,
        };

        page.text(&bold, TITLE_SIZE, MARGIN, &document.title);
        page.advance(8.0);
        page.text(
            &regular,
            BODY_SIZE,
            MARGIN,
            &format!(
                "Generated on {}",
                document.generated_at.format("%Y-%m-%d %H:%M")
            ),
        );
        page.advance(ROW_HEIGHT + 6.0);

        for section in &document.sections {
            render_section(&mut page, section, &regular, &bold);
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|err| ReportError::Render(err.to_string()))?;
    Ok(())
}

/// Tracks the current layer and the baseline of the next line to draw.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor<'_> {
    /// Start a fresh page unless `needed` millimetres still fit on this one.
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed >= MARGIN {
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN - 5.0;
    }

    fn text(&self, font: &IndirectFontRef, size: f32, x: f32, text: &str) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }
}

fn render_section(
    page: &mut PageCursor<'_>,
    section: &ReportSection,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    if let Some(heading) = &section.heading {
        page.ensure_room(ROW_HEIGHT * 3.0);
        page.text(bold, HEADING_SIZE, MARGIN, heading);
        page.advance(ROW_HEIGHT + 2.0);
    }

    // A footer row still warrants the table frame when there is no data;
    // otherwise an empty section collapses to its note.
    if section.rows.is_empty() && section.footer.is_none() {
        if let Some(note) = &section.empty_note {
            page.ensure_room(ROW_HEIGHT);
            page.text(regular, BODY_SIZE, MARGIN, note);
            page.advance(ROW_HEIGHT);
        }
        page.advance(4.0);
        return;
    }

    page.ensure_room(ROW_HEIGHT * 2.0);
    let mut x = MARGIN;
    for column in &section.columns {
        page.text(bold, BODY_SIZE, x, &fit(column.header, column.width));
        x += column.width;
    }
    page.advance(ROW_HEIGHT);

    for row in &section.rows {
        page.ensure_room(ROW_HEIGHT);
        render_cells(page, section, row, regular);
        page.advance(ROW_HEIGHT);
    }

    if let Some(footer) = &section.footer {
        page.ensure_room(ROW_HEIGHT);
        render_cells(page, section, footer, bold);
        page.advance(ROW_HEIGHT);
    }
    page.advance(4.0);
}

fn render_cells(
    page: &PageCursor<'_>,
    section: &ReportSection,
    cells: &[String],
    font: &IndirectFontRef,
) {
    let mut x = MARGIN;
    for (column, cell) in section.columns.iter().zip(cells) {
        page.text(font, BODY_SIZE, x, &fit(cell, column.width));
        x += column.width;
    }
}

/// Clip text to what fits in `width` millimetres at body size.
fn fit(text: &str, width: f32) -> String {
    let max_chars = ((width - 2.0) / CHAR_WIDTH).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
