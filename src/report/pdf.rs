//! PDF encoding of a finalized [`Document`].
//!
//! Pages are A4 with the two standard Helvetica faces (no embedded font
//! programs). Layout coordinates are millimetres from the top-left corner; PDF
//! user space is points from the bottom-left, so every y is flipped here.

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::chart::RasterImage;
use crate::core::constants::page;
use crate::core::constants::palette::Rgb;
use crate::core::{ReportError, Result};
use crate::report::document::{Document, DrawOp, FontStyle, TextAlign};
use crate::report::text::{PT_PER_MM, text_width_mm};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
const CHART_IMAGE: Name<'static> = Name(b"Im1");

/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Flip a top-left y in millimetres to a bottom-left y in points.
fn flip(y_mm: f32) -> f32 {
    pt(page::HEIGHT - y_mm)
}

fn rgb(color: Rgb) -> (f32, f32, f32) {
    (
        f32::from(color.0) / 255.0,
        f32::from(color.1) / 255.0,
        f32::from(color.2) / 255.0,
    )
}

/// Encode `text` as WinAnsi bytes; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\u{0080}'..='\u{009F}' => b'?',
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Decode the chart PNG to packed 8-bit RGB, compositing any alpha onto white.
fn decode_rgb(image: &RasterImage) -> Result<Vec<u8>> {
    let mut decoder = png::Decoder::new(image.png.as_slice());
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    let pixels = &buffer[..info.buffer_size()];

    if info.width != image.width || info.height != image.height {
        return Err(ReportError::Render(format!(
            "chart is {}x{} but declared {}x{}",
            info.width, info.height, image.width, image.height
        )));
    }

    let over_white = |value: u8, alpha: u8| -> u8 {
        let blended = u16::from(value) * u16::from(alpha) + 255 * (255 - u16::from(alpha));
        (blended / 255) as u8
    };

    let rgb = match info.color_type {
        png::ColorType::Rgb => pixels.to_vec(),
        png::ColorType::Rgba => pixels
            .chunks_exact(4)
            .flat_map(|p| [over_white(p[0], p[3]), over_white(p[1], p[3]), over_white(p[2], p[3])])
            .collect(),
        png::ColorType::Grayscale => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|p| {
                let g = over_white(p[0], p[1]);
                [g, g, g]
            })
            .collect(),
        other => {
            return Err(ReportError::Render(format!(
                "unsupported chart color type {other:?}"
            )));
        }
    };

    Ok(rgb)
}

fn draw_circle(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
    content.fill_nonzero();
}

fn page_content(ops: &[DrawOp]) -> Vec<u8> {
    let mut content = Content::new();

    for op in ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (r, g, b) = rgb(*color);
                content.set_fill_rgb(r, g, b);
                content.rect(pt(*x), flip(y + height), pt(*width), pt(*height));
                content.fill_nonzero();
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => {
                let (r, g, b) = rgb(*color);
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(pt(*line_width));
                content.rect(pt(*x), flip(y + height), pt(*width), pt(*height));
                content.stroke();
            }
            DrawOp::FillCircle {
                cx,
                cy,
                radius,
                color,
            } => {
                let (r, g, b) = rgb(*color);
                content.set_fill_rgb(r, g, b);
                draw_circle(&mut content, pt(*cx), flip(*cy), pt(*radius));
            }
            DrawOp::Text {
                x,
                y,
                text,
                size,
                style,
                color,
                align,
            } => {
                let left = match align {
                    TextAlign::Left => *x,
                    TextAlign::Center => x - text_width_mm(text, *size, *style) / 2.0,
                };
                let font = match style {
                    FontStyle::Regular => REGULAR_FONT,
                    FontStyle::Bold => BOLD_FONT,
                };
                let (r, g, b) = rgb(*color);
                content.begin_text();
                content.set_fill_rgb(r, g, b);
                content.set_font(font, *size);
                content.next_line(pt(left), flip(*y));
                content.show(Str(&encode_win_ansi(text)));
                content.end_text();
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
            } => {
                content.save_state();
                content.transform([pt(*width), 0.0, 0.0, pt(*height), pt(*x), flip(y + height)]);
                content.x_object(CHART_IMAGE);
                content.restore_state();
            }
        }
    }

    content.finish()
}

/// Serialize a finalized document to PDF bytes.
pub fn render_pdf(doc: &Document) -> Result<Vec<u8>> {
    if !doc.is_finalized() {
        return Err(ReportError::Render(
            "document must be finalized before encoding".to_string(),
        ));
    }
    if doc.page_count() == 0 {
        return Err(ReportError::Render("document has no pages".to_string()));
    }

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
    let regular_id = alloc();
    let bold_id = alloc();

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let image_id = match &doc.image {
        Some(image) => {
            let rgb = decode_rgb(image)?;
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&rgb, 6);
            let image_id = alloc();
            let mut xobj = pdf.image_xobject(image_id, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(image.width as i32);
            xobj.height(image.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            xobj.finish();
            Some(image_id)
        }
        None => None,
    };

    let page_ids: Vec<(Ref, Ref)> = doc.pages.iter().map(|_| (alloc(), alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(&doc.title))
        .producer(TextStr(concat!("correlation-report ", env!("CARGO_PKG_VERSION"))));

    for (target, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        let raw = page_content(&target.ops);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(*content_id, &compressed)
            .filter(Filter::FlateDecode);

        let mut pdf_page = pdf.page(*page_id);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, pt(page::WIDTH), pt(page::HEIGHT)))
            .parent(pages_id)
            .contents(*content_id);
        let mut resources = pdf_page.resources();
        resources
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        if let Some(image_id) = image_id {
            resources.x_objects().pair(CHART_IMAGE, image_id);
        }
    }

    let bytes = pdf.finish();
    log::debug!(
        "Encoded {} page(s) into {} PDF bytes",
        doc.page_count(),
        bytes.len()
    );
    Ok(bytes)
}
