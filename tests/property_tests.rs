//! Property-based tests for correlation-report using proptest
//!
//! These tests generate random results and insight texts to check the
//! layout and text invariants across a wide range of inputs.

use correlation_report::chart::{BarTone, ChartLayout, ChartRasterizer};
use correlation_report::core::{ActiveWorkers, CorrelationResult};
use correlation_report::export::report_filename;
use correlation_report::report::{
    Branding, LayoutCursor, ReportComposer, ReportContext, plan_insight_boxes, sanitize_insight,
    stamp_footers,
};
use indexmap::IndexMap;
use proptest::prelude::*;
use std::collections::HashMap;

/// Metric name to correlation value maps with unique keys
fn correlations_strategy(max: usize) -> impl Strategy<Value = IndexMap<String, f64>> {
    prop::collection::vec(("[a-z_]{1,12}", -1.0f64..=1.0), 1..max).prop_map(|pairs| {
        let mut map = IndexMap::new();
        for (metric, value) in pairs {
            map.entry(metric).or_insert(value);
        }
        map
    })
}

/// Insight texts mixing ASCII, accented letters, pictographs and odd spacing
fn insight_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-zA-Z0-9 .,%]{0,200}",
        r"[a-zé ñü\t\n]{0,80}",
        prop::collection::vec(
            prop_oneof![
                Just("📈".to_string()),
                Just("★".to_string()),
                Just("€".to_string()),
                Just("\u{a0}".to_string()),
                r"[a-z]{1,10}",
                Just("  ".to_string()),
            ],
            0..20
        )
        .prop_map(|parts| parts.concat()),
    ]
}

fn branding() -> Branding {
    Branding {
        product_name: "News2Market".to_string(),
        report_title: "Correlation Analysis".to_string(),
        copyright: "News2Market © 2025".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    #[test]
    fn test_sanitized_insights_are_latin1_and_trimmed(text in insight_strategy()) {
        let clean = sanitize_insight(&text);

        prop_assert!(clean.chars().all(|c| (c as u32) <= 0xFF));
        prop_assert_eq!(clean.trim(), clean.as_str());
        let chars: Vec<char> = clean.chars().collect();
        prop_assert!(!chars.windows(2).any(|w| w[0].is_whitespace() && w[1].is_whitespace()));
    }

    #[test]
    fn test_chart_bars_follow_map_order(correlations in correlations_strategy(8)) {
        let layout = ChartLayout::plan(&correlations);

        prop_assert_eq!(layout.bars.len(), correlations.len());
        prop_assert_eq!(layout.gridlines.len(), 5);
        for (index, (bar, (metric, value))) in layout.bars.iter().zip(&correlations).enumerate() {
            prop_assert_eq!(&bar.metric, metric);
            prop_assert!((bar.x - (80.0 + 180.0 * index as f32)).abs() < 1e-3);
            match bar.tone {
                BarTone::Positive => {
                    prop_assert!(*value >= 0.0);
                    prop_assert!((bar.bottom() - 250.0).abs() < 1e-3);
                }
                BarTone::Negative => {
                    prop_assert!(*value < 0.0);
                    prop_assert!((bar.y - 250.0).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_insight_boxes_stay_above_footer(
        counts in prop::collection::vec(0usize..60, 0..15),
        start in 20.0f32..260.0,
    ) {
        let (boxes, _) = plan_insight_boxes(&counts, LayoutCursor::new(1, start));

        for placed in &boxes {
            prop_assert!(placed.bottom() <= 270.0 + 1e-3 || placed.lines.len() == 1);
            prop_assert!(placed.page >= 1);
        }
        for (insight, &count) in counts.iter().enumerate() {
            let drawn: usize = boxes
                .iter()
                .filter(|b| b.insight == insight)
                .map(|b| b.lines.len())
                .sum();
            prop_assert_eq!(drawn, count.max(1));
            let badged = boxes.iter().filter(|b| b.insight == insight && !b.continued).count();
            prop_assert_eq!(badged, 1);
        }
        prop_assert!(boxes.windows(2).all(|w| w[0].page <= w[1].page));
    }

    #[test]
    fn test_page_labels_match_page_count(
        correlations in correlations_strategy(14),
        insights in prop::collection::vec(insight_strategy(), 0..12),
    ) {
        let result = CorrelationResult {
            job_id: "corr_20250101_120000".to_string(),
            correlations,
            p_values: HashMap::new(),
            insights,
            sample_size: 30,
        };
        let context = ReportContext {
            sequence: 1,
            active_workers: ActiveWorkers::Known(3),
            generated_at: "01/01/2025 12:00:00".to_string(),
        };
        let chart = ChartRasterizer::new().render(&result.correlations).expect("chart renders");
        let mut document = ReportComposer::new(branding())
            .compose(&result, chart, &context)
            .expect("composes");
        stamp_footers(&mut document, "News2Market © 2025").expect("stamps");

        let total = document.page_count();
        prop_assert!(total >= 1);
        for (index, page) in document.pages.iter().enumerate() {
            let label = format!("Page {} of {}", index + 1, total);
            prop_assert_eq!(page.texts().iter().filter(|t| **t == label).count(), 1);
        }
    }

    #[test]
    fn test_report_filename_is_plain(prefix in "[A-Za-z0-9_]{1,20}", job_id in r"[a-z0-9_/\\]{1,30}") {
        let name = report_filename(&prefix, &job_id);

        let expected_start = format!("{}_", prefix);
        prop_assert!(name.starts_with(&expected_start));
        prop_assert!(name.ends_with(".pdf"));
        prop_assert!(!name.contains('/') && !name.contains('\\'));
        let stem_len = name.len() - prefix.len() - "_".len() - ".pdf".len();
        prop_assert!(stem_len >= 1 && stem_len <= job_id.len().max(8));
    }
}
