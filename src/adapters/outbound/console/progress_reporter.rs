use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ports::outbound::ProgressReporter;

/// Stage progress on stderr via an indicatif spinner, keeping stdout
/// clean for the report itself. Clones share the same spinner.
#[derive(Clone)]
pub struct StderrProgressReporter {
    spinner: ProgressBar,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// A reporter that renders nothing, for quiet or non-tty runs.
    pub fn hidden() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    fn report_error(&self, message: &str) {
        self.spinner.suspend(|| eprintln!("{}", message));
    }

    fn report_completion(&self, message: &str) {
        self.spinner.finish_and_clear();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_methods_do_not_panic() {
        let reporter = StderrProgressReporter::hidden();
        reporter.report("Scanning components...");
        reporter.report_error("OSV chunk skipped");
        reporter.report_completion("Analysis complete");
    }
}
