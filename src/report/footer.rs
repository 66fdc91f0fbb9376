//! Footer stamping, the last layout pass.

use crate::core::constants::{font_sizes, page, palette};
use crate::core::{ReportError, Result};
use crate::report::document::{Document, TextStyle};

/// Stamp "Page i of N" and the copyright line on every page.
///
/// Runs once after all content is laid out, since N is only known then.
/// A document can be finalized only once.
pub fn stamp_footers(doc: &mut Document, copyright: &str) -> Result<()> {
    if doc.is_finalized() {
        return Err(ReportError::Render(
            "document footers were already stamped".to_string(),
        ));
    }
    if doc.page_count() == 0 {
        return Err(ReportError::Render("document has no pages".to_string()));
    }

    let total = doc.page_count();
    let style = TextStyle::new(font_sizes::SMALL, palette::MUTED);

    for (index, target) in doc.pages.iter_mut().enumerate() {
        target.fill_rect(
            0.0,
            page::FOOTER_TOP,
            page::WIDTH,
            page::FOOTER_HEIGHT,
            palette::PANEL,
        );
        target.text(
            page::CENTER_X,
            page::FOOTER_BASELINE,
            format!("Page {} of {}", index + 1, total),
            style.centered(),
        );
        target.text(page::TEXT_X, page::FOOTER_BASELINE, copyright, style);
    }

    doc.mark_finalized();
    Ok(())
}
