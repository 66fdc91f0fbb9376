//! Correlation analysis reports
//!
//! Turns a stored correlation result into a fixed-layout PDF: a cover page
//! with metadata, a bar chart and the correlation table, followed by the
//! insight pages. Every page carries a "Page i of N" footer.

pub mod api;
pub mod chart;
pub mod config;
pub mod core;
pub mod export;
pub mod logging;
pub mod report;
pub mod ui;

// Re-export the types most callers need
pub use api::{AnalysisSource, GatewayClient, ResultSelector};
pub use chart::{ChartRasterizer, RasterImage};
pub use config::{CliConfig, Config};
pub use crate::core::{ActiveWorkers, CorrelationResult, ReportError, Result};
pub use export::{RenderedReport, ResultOrigin, export_report, generate_report};
pub use report::{Branding, Document, ReportComposer, ReportContext, render_pdf, stamp_footers};
