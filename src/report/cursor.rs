//! Vertical layout cursor and insight box planning.
//!
//! The cursor is a value: every placement returns the cursor for the next
//! element, so page breaks are decided in one place and can be tested without
//! drawing anything.

use std::ops::Range;

use crate::core::constants::{insights, page};

/// Current page and vertical position in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f32,
}

impl LayoutCursor {
    pub fn new(page: usize, y: f32) -> Self {
        Self { page, y }
    }

    pub fn advance(self, dy: f32) -> Self {
        Self {
            page: self.page,
            y: self.y + dy,
        }
    }

    /// Top of the following page.
    pub fn next_page(self) -> Self {
        Self {
            page: self.page + 1,
            y: page::TOP_MARGIN,
        }
    }

    /// Whether an element ending at `bottom` stays inside the content area.
    pub fn fits(bottom: f32) -> bool {
        bottom <= page::CONTENT_BOTTOM
    }
}

/// Height of an insight box holding `lines` wrapped lines.
pub fn box_height(lines: usize) -> f32 {
    lines as f32 * insights::LINE_HEIGHT + insights::BOX_PADDING
}

/// Lines that fit in a box whose first baseline is at `y`.
fn lines_fitting(y: f32) -> usize {
    let room = page::CONTENT_BOTTOM - (y - insights::BOX_LEAD) - insights::BOX_PADDING;
    ((room / insights::LINE_HEIGHT).floor().max(1.0)) as usize
}

/// Placement of one insight box, or one chunk of an insight split across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightBox {
    /// Zero-based insight index
    pub insight: usize,
    pub page: usize,
    /// Baseline of the first line
    pub y: f32,
    /// Wrapped lines drawn in this box
    pub lines: Range<usize>,
    /// Continuation chunks carry no number badge
    pub continued: bool,
}

impl InsightBox {
    pub fn top(&self) -> f32 {
        self.y - insights::BOX_LEAD
    }

    pub fn height(&self) -> f32 {
        box_height(self.lines.len())
    }

    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }
}

/// Place insight boxes given the wrapped line count of each insight.
///
/// A box that would cross the content bottom moves to the next page, unless
/// it is already the first box on its page; such a box is too tall for any
/// page and is split, with the remainder continuing on following pages.
/// Returns the placements and the cursor after the last box.
pub fn plan_insight_boxes(
    line_counts: &[usize],
    start: LayoutCursor,
) -> (Vec<InsightBox>, LayoutCursor) {
    let mut boxes = Vec::new();
    let mut cursor = start;
    let mut placed_on_page = 0usize;

    for (insight, &count) in line_counts.iter().enumerate() {
        let count = count.max(1);
        let mut first_line = 0;
        let mut continued = false;

        while first_line < count {
            let remaining = count - first_line;
            let bottom = cursor.y - insights::BOX_LEAD + box_height(remaining);

            if !LayoutCursor::fits(bottom) && placed_on_page > 0 {
                cursor = cursor.next_page();
                placed_on_page = 0;
                continue;
            }

            let take = if LayoutCursor::fits(bottom) {
                remaining
            } else {
                lines_fitting(cursor.y).min(remaining)
            };

            let placed = InsightBox {
                insight,
                page: cursor.page,
                y: cursor.y,
                lines: first_line..first_line + take,
                continued,
            };
            cursor = cursor.advance(placed.height() + insights::BOX_SPACING);
            boxes.push(placed);
            placed_on_page += 1;

            first_line += take;
            if first_line < count {
                cursor = cursor.next_page();
                placed_on_page = 0;
                continued = true;
            }
        }
    }

    (boxes, cursor)
}
