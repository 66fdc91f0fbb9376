use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a report is fetched, rendered and saved.
///
/// Disabled reporters do nothing, which keeps JSON output and quiet mode clean.
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start the spinner, or move it to the next step.
    pub fn step(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        match self.spinner {
            Some(ref pb) => pb.set_message(message.to_string()),
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
                {
                    pb.set_style(style);
                }
                pb.set_message(message.to_string());
                pb.enable_steady_tick(Duration::from_millis(120));
                self.spinner = Some(pb);
            }
        }
    }

    pub fn finish(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_is_noop() {
        let mut progress = ProgressReporter::new(false);
        progress.step("Fetching results");
        assert!(progress.spinner.is_none());
        progress.finish();
    }

    #[test]
    fn test_enabled_reporter_reuses_spinner() {
        let mut progress = ProgressReporter::new(true);
        assert!(progress.is_enabled());
        progress.step("Fetching results");
        progress.step("Rendering report");
        assert!(progress.spinner.is_some());
        progress.finish();
        assert!(progress.spinner.is_none());
    }
}
