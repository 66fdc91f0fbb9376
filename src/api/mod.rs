//! Gateway access for stored analysis results
//!
//! The report only needs two read endpoints; deletion is exposed for the CLI.

pub mod client;

pub use client::{
    AnalysisSource, GatewayClient, ResultSelector, resolve_active_workers, select_result,
};
