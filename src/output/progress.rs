//! Progress reporting functionality
//!
//! A spinner on stderr while files are analyzed. Stdout is left to the
//! formatted report so that piping output stays clean.

use crate::core::parallel::{ProgressCallback, ProgressUpdate};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Progress reporter for the analysis phase
pub struct ProgressReporter {
    quiet: bool,
    spinner: Option<ProgressBar>,
    files_analyzed: AtomicUsize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    ///
    /// When `enabled` is false nothing is drawn; notices are still printed
    /// unless `quiet` is set.
    pub fn new(enabled: bool, quiet: bool) -> Self {
        let spinner = if enabled && !quiet {
            let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            Some(spinner)
        } else {
            None
        };

        Self {
            quiet,
            spinner,
            files_analyzed: AtomicUsize::new(0),
        }
    }

    /// A reporter that never draws anything
    pub fn hidden() -> Self {
        Self::new(false, true)
    }

    /// Start spinning with a message
    pub fn start(&self, operation: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(operation.to_string());
            spinner.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Record one analyzed file
    pub fn update_from(&self, progress: ProgressUpdate) {
        let seen = self.files_analyzed.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!(
                "{} files analyzed (level: {}/{})",
                seen, progress.current, progress.total
            ));
        }
    }

    /// Stop and clear the spinner
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
        tracing::debug!(files = self.files_analyzed(), "analysis finished");
    }

    /// Number of files reported so far
    pub fn files_analyzed(&self) -> usize {
        self.files_analyzed.load(Ordering::Relaxed)
    }

    /// Print a notice to stderr unless quiet
    pub fn print_notice(&self, message: &str) {
        if self.quiet {
            return;
        }
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }
}

/// Create a progress callback that feeds a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> ProgressCallback {
    Arc::new(move |progress: ProgressUpdate| reporter.update_from(progress))
}
