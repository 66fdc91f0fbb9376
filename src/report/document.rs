//! Paged document model.
//!
//! Pages hold a flat list of drawing operations in millimetres, origin at the
//! top-left corner. Text `y` is the baseline. The model is independent of the
//! PDF encoder so layout can be inspected and tested directly.

use crate::chart::RasterImage;
use crate::core::constants::palette::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        line_width: f32,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: TextAlign,
    },
    /// The document's embedded chart image
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            line_width: 0.2,
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.ops.push(DrawOp::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            size: style.size,
            style: style.font,
            color: style.color,
            align: style.align,
        });
    }

    pub fn image(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Image {
            x,
            y,
            width,
            height,
        });
    }

    /// Text strings on this page in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Lowest point reached by any operation.
    pub fn content_bottom(&self) -> f32 {
        self.ops
            .iter()
            .map(|op| match op {
                DrawOp::FillRect { y, height, .. }
                | DrawOp::StrokeRect { y, height, .. }
                | DrawOp::Image { y, height, .. } => y + height,
                DrawOp::FillCircle { cy, radius, .. } => cy + radius,
                DrawOp::Text { y, .. } => *y,
            })
            .fold(0.0, f32::max)
    }
}

/// Font, size, color and alignment for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub font: FontStyle,
    pub color: Rgb,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            font: FontStyle::Regular,
            color,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font = FontStyle::Bold;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// An ordered list of pages plus the single chart image they may reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
    pub image: Option<RasterImage>,
    finalized: bool,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append an empty page and return its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.pages.len() - 1
    }

    /// Page at `index`, appending pages as needed to reach it.
    pub fn page_mut(&mut self, index: usize) -> &mut Page {
        while self.pages.len() <= index {
            self.pages.push(Page::default());
        }
        &mut self.pages[index]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether footers have been stamped and the page count is final.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.finalized = true;
    }

    /// Every text string in the document, page by page.
    pub fn all_texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|page| page.texts()).collect()
    }
}
