//! ANSI colors for terminal notifications and listings

use crate::report::{CorrelationTier, correlation_tier};

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const BRIGHT_BLACK: &'static str = "\x1b[90m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Correlation value colored with the same tiers as the report table.
pub fn paint_correlation(value: f64) -> String {
    let text = format!("{value:+.3}");
    let color = match correlation_tier(value) {
        CorrelationTier::StrongPositive => Colors::GREEN,
        CorrelationTier::StrongNegative => Colors::RED,
        CorrelationTier::Neutral => Colors::BRIGHT_BLACK,
    };
    colorize(&text, color)
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) if term == "dumb" || term.is_empty() => false,
        Ok(term) => {
            term.contains("color")
                || term.contains("256")
                || term.starts_with("xterm")
                || term.starts_with("screen")
                || term.starts_with("tmux")
                || term == "linux"
        }
        Err(_) => matches!(
            env::var("TERM_PROGRAM").as_deref(),
            Ok("Apple_Terminal" | "iTerm.app" | "vscode" | "Alacritty" | "kitty" | "WezTerm")
        ),
    }
}
