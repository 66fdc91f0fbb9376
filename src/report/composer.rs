//! Cover page, correlation table and insight pages.

use crate::chart::RasterImage;
use crate::core::constants::{cover, font_sizes, insights, page, palette};
use crate::core::{ActiveWorkers, CorrelationResult, Result};
use crate::report::cursor::{LayoutCursor, plan_insight_boxes};
use crate::report::document::{Document, Page, TextStyle};
use crate::report::sanitize::sanitize_insight;
use crate::report::table::{TableRow, table_rows};
use crate::report::text::split_text_to_size;

/// Strings printed on every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub product_name: String,
    pub report_title: String,
    pub copyright: String,
}

/// Per-invocation inputs that are not part of the analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// 1-based position of the result in the listing
    pub sequence: usize,
    pub active_workers: ActiveWorkers,
    /// Already formatted generation timestamp
    pub generated_at: String,
}

/// Lays a correlation result out as a paged document.
///
/// The composed document has no footers; run [`crate::report::stamp_footers`]
/// once layout is complete.
#[derive(Debug, Clone)]
pub struct ReportComposer {
    branding: Branding,
}

impl ReportComposer {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    pub fn compose(
        &self,
        result: &CorrelationResult,
        chart: RasterImage,
        context: &ReportContext,
    ) -> Result<Document> {
        result.validate()?;

        let mut doc = Document::new(format!(
            "{} - {}",
            self.branding.product_name, self.branding.report_title
        ));
        doc.image = Some(chart);

        let cover_index = doc.add_page();
        let after_table = self.draw_cover(&mut doc, cover_index, result, context);

        if !result.insights.is_empty() {
            // insights never share a page with the table
            let insights_index = after_table.page + 1;
            self.draw_insights(&mut doc, insights_index, &result.insights);
        }

        Ok(doc)
    }

    /// Header band, metadata box, chart and table. Returns the cursor below the last row.
    fn draw_cover(
        &self,
        doc: &mut Document,
        index: usize,
        result: &CorrelationResult,
        context: &ReportContext,
    ) -> LayoutCursor {
        let white = TextStyle::new(font_sizes::BODY, palette::WHITE);
        let ink = TextStyle::new(font_sizes::BODY, palette::INK);
        let section = TextStyle::new(font_sizes::SECTION, palette::BRAND_BLUE).bold();

        let cover_page = doc.page_mut(index);
        cover_page.fill_rect(0.0, 0.0, page::WIDTH, cover::HEADER_HEIGHT, palette::BRAND_BLUE);
        cover_page.text(
            page::CENTER_X,
            cover::TITLE_Y,
            &self.branding.product_name,
            TextStyle { size: font_sizes::TITLE, ..white }.bold().centered(),
        );
        cover_page.text(
            page::CENTER_X,
            cover::SUBTITLE_Y,
            &self.branding.report_title,
            TextStyle { size: font_sizes::SUBTITLE, ..white }.bold().centered(),
        );
        cover_page.text(
            page::CENTER_X,
            cover::TIMESTAMP_Y,
            format!("Generated: {}", context.generated_at),
            white.centered(),
        );

        cover_page.fill_rect(
            page::MARGIN_X,
            cover::META_TOP,
            page::CONTENT_WIDTH,
            cover::META_HEIGHT,
            palette::PANEL,
        );
        cover_page.stroke_rect(
            page::MARGIN_X,
            cover::META_TOP,
            page::CONTENT_WIDTH,
            cover::META_HEIGHT,
            palette::BORDER,
        );
        let [sequence_y, job_y, sample_y, workers_y] = cover::META_LINES_Y;
        cover_page.text(
            page::TEXT_X,
            sequence_y,
            format!("Analysis #{}", context.sequence),
            section,
        );
        cover_page.text(page::TEXT_X, job_y, format!("Job ID: {}", result.job_id), ink);
        cover_page.text(
            page::TEXT_X,
            sample_y,
            format!("Sample size: {} days", result.sample_size),
            ink,
        );
        cover_page.text(
            page::TEXT_X,
            workers_y,
            format!("Active workers: {}", context.active_workers),
            ink,
        );

        cover_page.text(page::TEXT_X, cover::CHART_TITLE_Y, "Correlation Chart", section);
        cover_page.image(
            page::MARGIN_X,
            cover::CHART_TOP,
            page::CONTENT_WIDTH,
            cover::CHART_HEIGHT,
        );

        cover_page.text(page::TEXT_X, cover::TABLE_TITLE_Y, "Correlation Values", section);

        let header_top = cover::TABLE_TITLE_Y + cover::TABLE_HEADER_GAP;
        draw_table(
            doc,
            LayoutCursor::new(index, header_top),
            &table_rows(result),
        )
    }

    fn draw_insights(&self, doc: &mut Document, index: usize, items: &[String]) {
        let wrapped: Vec<Vec<String>> = items
            .iter()
            .map(|item| {
                split_text_to_size(&sanitize_insight(item), insights::WRAP_WIDTH, font_sizes::BODY)
            })
            .collect();
        let counts: Vec<usize> = wrapped.iter().map(Vec::len).collect();

        let header_page = doc.page_mut(index);
        header_page.fill_rect(0.0, 0.0, page::WIDTH, insights::HEADER_HEIGHT, palette::BRAND_BLUE);
        header_page.text(
            page::CENTER_X,
            insights::TITLE_Y,
            "Insights",
            TextStyle::new(font_sizes::INSIGHTS_TITLE, palette::WHITE)
                .bold()
                .centered(),
        );

        let (boxes, _) = plan_insight_boxes(&counts, LayoutCursor::new(index, insights::FIRST_Y));
        let body = TextStyle::new(font_sizes::BODY, palette::INK);
        let badge = TextStyle::new(font_sizes::SMALL, palette::WHITE)
            .bold()
            .centered();

        for placed in &boxes {
            let target = doc.page_mut(placed.page);
            target.fill_rect(
                page::MARGIN_X,
                placed.top(),
                page::CONTENT_WIDTH,
                placed.height(),
                palette::PANEL,
            );
            target.stroke_rect(
                page::MARGIN_X,
                placed.top(),
                page::CONTENT_WIDTH,
                placed.height(),
                palette::BORDER,
            );

            if !placed.continued {
                target.fill_circle(
                    insights::BADGE_X,
                    placed.y + 2.0,
                    insights::BADGE_RADIUS,
                    palette::BRAND_BLUE,
                );
                target.text(
                    insights::BADGE_X,
                    placed.y + 3.0,
                    (placed.insight + 1).to_string(),
                    badge,
                );
            }

            let lines = &wrapped[placed.insight];
            for (offset, line) in lines[placed.lines.clone()].iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                target.text(
                    insights::TEXT_X,
                    placed.y + offset as f32 * insights::LINE_HEIGHT,
                    line.clone(),
                    body,
                );
            }
        }
    }
}

fn draw_table_header(target: &mut Page, top: f32) {
    let header = TextStyle::new(font_sizes::BODY, palette::WHITE).bold();
    let [metric_x, value_x, p_x] = cover::COLUMN_X;
    target.fill_rect(
        page::MARGIN_X,
        top,
        page::CONTENT_WIDTH,
        cover::ROW_HEIGHT,
        palette::BRAND_BLUE,
    );
    target.text(metric_x, top + 6.0, "Metric", header);
    target.text(value_x, top + 6.0, "Correlation", header);
    target.text(p_x, top + 6.0, "P-value", header);
}

/// Table header and rows starting with the header at `start`.
///
/// A row whose shading would cross the content bottom continues on the next
/// page under a repeated header.
fn draw_table(doc: &mut Document, start: LayoutCursor, rows: &[TableRow]) -> LayoutCursor {
    let half_row = cover::ROW_HEIGHT / 2.0;
    let first_row_gap = cover::ROW_HEIGHT + 2.0;
    let [metric_x, value_x, p_x] = cover::COLUMN_X;
    let ink = TextStyle::new(font_sizes::BODY, palette::INK);

    draw_table_header(doc.page_mut(start.page), start.y);
    let mut cursor = start.advance(first_row_gap);

    for (index, row) in rows.iter().enumerate() {
        if !LayoutCursor::fits(cursor.y + half_row) {
            let header_at = cursor.next_page();
            draw_table_header(doc.page_mut(header_at.page), header_at.y);
            cursor = header_at.advance(first_row_gap);
        }

        let target = doc.page_mut(cursor.page);
        if index % 2 == 0 {
            target.fill_rect(
                page::MARGIN_X,
                cursor.y - half_row,
                page::CONTENT_WIDTH,
                cover::ROW_HEIGHT,
                palette::PANEL,
            );
        }
        target.text(metric_x, cursor.y, row.metric.clone(), ink);
        target.text(
            value_x,
            cursor.y,
            row.correlation.clone(),
            TextStyle::new(font_sizes::BODY, row.tier.color()).bold(),
        );
        target.text(p_x, cursor.y, row.p_value.clone(), ink);

        cursor = cursor.advance(cover::ROW_HEIGHT);
    }

    cursor
}
