//! Lint collaborator
//!
//! The graph builder asks a [`LintSource`] for per-file issue counts. Any
//! failure of the underlying tool degrades to zero counts.

use crate::models::LintCounts;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Source of lint issue counts for a file
pub trait LintSource: Send + Sync {
    fn lint_counts(&self, path: &Path) -> LintCounts;
}

/// Lint source that reports no issues
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLint;

impl LintSource for NoLint {
    fn lint_counts(&self, _path: &Path) -> LintCounts {
        LintCounts::default()
    }
}

impl<F> LintSource for F
where
    F: Fn(&Path) -> LintCounts + Send + Sync,
{
    fn lint_counts(&self, path: &Path) -> LintCounts {
        self(path)
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const READ_GRACE: Duration = Duration::from_secs(1);

/// Runs `ruff check` on a single file
#[derive(Debug, Clone)]
pub struct RuffLinter {
    program: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RuffDiagnostic {
    code: Option<String>,
}

impl RuffLinter {
    /// Create a linter invoking `ruff` from `PATH`
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("ruff", timeout)
    }

    /// Create a linter invoking a specific executable
    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Whether the executable can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Run the tool and capture stdout, killing it after the timeout
    fn run(&self, path: &Path) -> Option<String> {
        let mut child = Command::new(&self.program)
            .arg("check")
            .arg(path)
            .arg("--output-format=json")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| tracing::debug!("failed to start {}: {}", self.program, e))
            .ok()?;

        // Drain stdout concurrently so a full pipe cannot stall the child
        let mut stdout = child.stdout.take()?;
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = sender.send(stdout.read_to_string(&mut buf).map(|_| buf));
        });

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() >= deadline => {
                    tracing::warn!("{} timed out on {}", self.program, path.display());
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    tracing::debug!("waiting for {} failed: {}", self.program, e);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
            }
        }

        // The pipe stays open while any process spawned by the tool holds it
        match receiver.recv_timeout(READ_GRACE) {
            Ok(output) => output.ok(),
            Err(_) => {
                tracing::debug!("{} left its output pipe open", self.program);
                None
            }
        }
    }
}

impl LintSource for RuffLinter {
    fn lint_counts(&self, path: &Path) -> LintCounts {
        self.run(path)
            .map(|output| parse_ruff_output(&output))
            .unwrap_or_default()
    }
}

/// Count errors and warnings in ruff's JSON diagnostics
///
/// `E` (pycodestyle errors) and `F` (pyflakes) codes are errors, every other
/// code is a warning. Diagnostics without a code are syntax errors.
pub fn parse_ruff_output(output: &str) -> LintCounts {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return LintCounts::default();
    }

    let diagnostics: Vec<RuffDiagnostic> = match serde_json::from_str(trimmed) {
        Ok(diagnostics) => diagnostics,
        Err(e) => {
            tracing::debug!("unparsable ruff output: {}", e);
            return LintCounts::default();
        }
    };

    diagnostics
        .iter()
        .fold(LintCounts::default(), |mut counts, diagnostic| {
            match diagnostic.code.as_deref() {
                Some(code) if code.starts_with('E') || code.starts_with('F') => counts.errors += 1,
                Some(_) => counts.warnings += 1,
                None => counts.errors += 1,
            }
            counts
        })
}
