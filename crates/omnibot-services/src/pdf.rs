//! PDF generation.
//!
//! Lays input text out line by line on A4 pages with a fixed margin,
//! breaking to a new page when the current one runs out. Rendering is pure
//! CPU work; async callers run it under `spawn_blocking`.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ServiceError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const FONT_SIZE_PT: f32 = 12.0;

/// Characters per rendered line before a hard wrap.
const MAX_LINE_CHARS: usize = 90;

/// Renders `text` into PDF bytes.
pub fn render_pdf(text: &str) -> Result<Vec<u8>, ServiceError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "omnibot document",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "text",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ServiceError::Render(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in text.lines().flat_map(wrap_line) {
        if y < MARGIN_MM {
            let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
            layer = doc.get_page(page).get_layer(new_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| ServiceError::Render(e.to_string()))
}

/// Splits a source line into chunks that fit the page width. An empty line
/// still produces one (blank) rendered line so spacing survives.
fn wrap_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(MAX_LINE_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let bytes = render_pdf("hello\nworld").unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_pdf_handles_many_lines() {
        let text = (0..200)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");

        let bytes = render_pdf(&text).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_line_splits_long_lines() {
        let long = "x".repeat(MAX_LINE_CHARS * 2 + 10);

        let wrapped = wrap_line(&long);

        assert_eq!(wrapped.len(), 3);
        assert!(wrapped.iter().all(|l| l.chars().count() <= MAX_LINE_CHARS));
    }

    #[test]
    fn test_wrap_line_keeps_blank_lines() {
        assert_eq!(wrap_line(""), vec![String::new()]);
    }
}
