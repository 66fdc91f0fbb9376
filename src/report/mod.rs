//! Paged report composition and PDF encoding
//!
//! Layout happens on a device-independent [`Document`]; footers are stamped in
//! a separate pass once the page count is known, then the document is encoded.

pub mod composer;
pub mod cursor;
pub mod document;
pub mod footer;
pub mod pdf;
pub mod sanitize;
pub mod table;
pub mod text;

// Re-export commonly used items
pub use composer::{Branding, ReportComposer, ReportContext};
pub use cursor::{InsightBox, LayoutCursor, plan_insight_boxes};
pub use document::{Document, DrawOp, Page};
pub use footer::stamp_footers;
pub use pdf::render_pdf;
pub use sanitize::sanitize_insight;
pub use table::{CorrelationTier, correlation_tier, format_p_value};
pub use text::split_text_to_size;
