//! Run-level observability.
//!
//! Observers receive the outcome of each pipeline run: success with row
//! stats, or failure with a computed severity. Implementors can record
//! metrics, logs, or trigger alerts.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PipelineError;
use crate::profile::SourceFamily;
use crate::types::RunStats;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (run failed).
    Error,
    /// Critical error (typically I/O, e.g. a missing source file).
    Critical,
}

/// Context about one pipeline run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The source path for the run.
    pub source: PathBuf,
    /// Source family that was processed.
    pub family: SourceFamily,
}

/// Observer interface for run outcomes.
pub trait PipelineObserver: Send + Sync {
    /// Called when a run completes and both sinks are flushed.
    fn on_success(&self, _ctx: &RunContext, _stats: RunStats) {}

    /// Called when a run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: Severity, _error: &PipelineError) {}

    /// Called when a run failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs run outcomes to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        eprintln!(
            "[pipeline][ok] family={:?} path={} rows={} valid={} invalid={}",
            ctx.family,
            ctx.source.display(),
            stats.rows,
            stats.valid,
            stats.invalid
        );
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        eprintln!(
            "[pipeline][{:?}] family={:?} path={} err={}",
            severity,
            ctx.family,
            ctx.source.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        eprintln!(
            "[ALERT][pipeline][{:?}] family={:?} path={} err={}",
            severity,
            ctx.family,
            ctx.source.display(),
            error
        );
    }
}

/// Appends run outcomes to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        self.append_line(&format!(
            "{} ok family={:?} path={} rows={} valid={} invalid={}",
            unix_ts(),
            ctx.family,
            ctx.source.display(),
            stats.rows,
            stats.valid,
            stats.invalid
        ));
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        self.append_line(&format!(
            "{} fail severity={:?} family={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.family,
            ctx.source.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &PipelineError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} family={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.family,
            ctx.source.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
