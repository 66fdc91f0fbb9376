/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Geometry for the chart is expressed in canvas pixels, geometry for the
/// document in millimetres on an A4 page with the origin at the top-left corner.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced notifications
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// Gateway routes relative to the API prefix
pub mod routes {
    pub const RESULTS: &str = "/correlation/results";
    pub const ACTIVE_WORKERS: &str = "/text-processor/workers/active";
}

/// Timeout and limit constants
pub mod timeouts {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
}

/// Default configuration values
pub mod defaults {
    pub const API_BASE_URL: &str = "http://localhost:8000";
    pub const API_PREFIX: &str = "/api/v1";
    pub const RESULTS_LIMIT: usize = 20;
    pub const MAX_RESULTS_LIMIT: usize = 1000;
    pub const OUTPUT_DIR: &str = ".";
    pub const FILENAME_PREFIX: &str = "News2Market_Analysis";
    pub const PRODUCT_NAME: &str = "News2Market";
    pub const REPORT_TITLE: &str = "Correlation Analysis";
    pub const COPYRIGHT: &str = "News2Market © 2025";
    /// Day-first local date and time, as shown in the report header
    pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".correlation-report.toml";
}

/// Statistical display conventions
pub mod stats {
    /// p-values strictly below this are significant
    pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
    /// p-values strictly below this render as "< 0.001"
    pub const P_VALUE_FLOOR: f64 = 0.001;
    /// Substituted when a metric has no p-value
    pub const MISSING_P_VALUE: f64 = 1.0;
    /// Table tier boundary, inclusive on both signs
    pub const STRONG_CORRELATION: f64 = 0.5;
}

/// Chart canvas geometry in pixels
pub mod chart {
    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 300;
    pub const PLOT_HEIGHT: f32 = 200.0;
    pub const PLOT_TOP: f32 = 50.0;
    pub const BASELINE_Y: f32 = 250.0;
    pub const GRID_LEFT: f32 = 50.0;
    pub const GRID_RIGHT: f32 = 750.0;
    pub const GRID_LINES: usize = 5;
    pub const AXIS_LABEL_RIGHT: f32 = 45.0;
    pub const AXIS_LABELS: [&str; GRID_LINES] = ["1.0", "0.5", "0.0", "-0.5", "-1.0"];
    pub const FIRST_BAR_X: f32 = 80.0;
    pub const BAR_PITCH: f32 = 180.0;
    pub const BAR_WIDTH: f32 = 100.0;
    pub const BAR_BORDER: f32 = 2.0;
    pub const VALUE_LABEL_GAP: f32 = 10.0;
    pub const METRIC_LABEL_OFFSET: f32 = 20.0;
    pub const VALUE_FONT_PX: f32 = 14.0;
    pub const METRIC_FONT_PX: f32 = 12.0;
    pub const AXIS_FONT_PX: f32 = 10.0;
}

/// Colors as RGB triples
pub mod palette {
    pub type Rgb = (u8, u8, u8);

    pub const WHITE: Rgb = (255, 255, 255);
    pub const BRAND_BLUE: Rgb = (30, 64, 175);
    pub const INK: Rgb = (17, 24, 39);
    pub const MUTED: Rgb = (107, 114, 128);
    pub const PANEL: Rgb = (249, 250, 251);
    pub const BORDER: Rgb = (229, 231, 235);
    pub const POSITIVE: Rgb = (16, 185, 129);
    pub const POSITIVE_DARK: Rgb = (4, 120, 87);
    pub const NEGATIVE: Rgb = (220, 38, 38);
    pub const NEGATIVE_DARK: Rgb = (185, 28, 28);
}

/// Document page geometry in millimetres
pub mod page {
    pub const WIDTH: f32 = 210.0;
    pub const HEIGHT: f32 = 297.0;
    pub const CENTER_X: f32 = WIDTH / 2.0;
    pub const MARGIN_X: f32 = 15.0;
    pub const CONTENT_WIDTH: f32 = WIDTH - 2.0 * MARGIN_X;
    pub const TEXT_X: f32 = 20.0;
    /// Cursor position on continuation pages
    pub const TOP_MARGIN: f32 = 20.0;
    /// Content must not extend below this line
    pub const CONTENT_BOTTOM: f32 = 270.0;
    pub const FOOTER_TOP: f32 = 287.0;
    pub const FOOTER_HEIGHT: f32 = 10.0;
    pub const FOOTER_BASELINE: f32 = 293.0;
}

/// Cover page layout in millimetres
pub mod cover {
    pub const HEADER_HEIGHT: f32 = 40.0;
    pub const TITLE_Y: f32 = 15.0;
    pub const SUBTITLE_Y: f32 = 27.0;
    pub const TIMESTAMP_Y: f32 = 35.0;
    pub const META_TOP: f32 = 50.0;
    pub const META_HEIGHT: f32 = 42.0;
    pub const META_LINES_Y: [f32; 4] = [60.0, 70.0, 77.0, 84.0];
    pub const CHART_TITLE_Y: f32 = 100.0;
    pub const CHART_TOP: f32 = 105.0;
    pub const CHART_HEIGHT: f32 = 90.0;
    pub const TABLE_TITLE_Y: f32 = 205.0;
    pub const TABLE_HEADER_GAP: f32 = 8.0;
    pub const ROW_HEIGHT: f32 = 8.0;
    pub const COLUMN_X: [f32; 3] = [20.0, 100.0, 150.0];
}

/// Insight section layout in millimetres
pub mod insights {
    pub const HEADER_HEIGHT: f32 = 30.0;
    pub const TITLE_Y: f32 = 20.0;
    pub const FIRST_Y: f32 = 45.0;
    pub const WRAP_WIDTH: f32 = 160.0;
    pub const LINE_HEIGHT: f32 = 5.0;
    pub const BOX_PADDING: f32 = 10.0;
    /// Distance from a box's top edge to its first baseline
    pub const BOX_LEAD: f32 = 5.0;
    pub const BOX_SPACING: f32 = 5.0;
    pub const BADGE_X: f32 = 25.0;
    pub const BADGE_RADIUS: f32 = 4.0;
    pub const TEXT_X: f32 = 35.0;
}

/// Font sizes in points
pub mod font_sizes {
    pub const TITLE: f32 = 24.0;
    pub const SUBTITLE: f32 = 16.0;
    pub const SECTION: f32 = 14.0;
    pub const INSIGHTS_TITLE: f32 = 18.0;
    pub const BODY: f32 = 10.0;
    pub const SMALL: f32 = 8.0;
}

/// Display constants for terminal notifications
pub mod display {
    pub const SUCCESS_EMOJI: &str = "✅";
    pub const ERROR_EMOJI: &str = "❌";
    pub const WARNING_EMOJI: &str = "⚠️";
    pub const REPORT_EMOJI: &str = "📄";
    /// Characters of the job id shown in listings
    pub const JOB_ID_SHORT_LEN: usize = 8;
}
