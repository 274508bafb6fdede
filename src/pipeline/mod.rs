//! Pipeline driver and per-row stages.
//!
//! One run is a single pass over the source: each row is projected onto
//! canonical field names ([`mapper`]), checked ([`validate`]) and assembled
//! ([`assemble`]) independently of every other row, then routed to exactly
//! one sink. Row-level problems never abort the run; only source
//! unavailability (and sink I/O) is fatal.
//!
//! Rows can optionally be processed on a rayon thread pool. Results are
//! collected in input order before routing, so the parallel path produces
//! byte-identical output to the sequential one.

pub mod assemble;
pub mod mapper;
pub mod normalize;
pub mod observability;
pub mod validate;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use rayon::prelude::*;

use crate::error::{PipelineError, PipelineResult};
use crate::output::OutputRouter;
use crate::profile::SourceProfile;
use crate::source::load_table;
use crate::types::{CanonicalRecord, RunStats};

pub use observability::{
    CompositeObserver, FileObserver, PipelineObserver, RunContext, Severity, StdErrObserver,
};

/// Options controlling one pipeline run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Process rows on a rayon thread pool. Output order is unchanged.
    pub parallel: bool,
    /// Optional observer for run outcomes.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("parallel", &self.parallel)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Run the full pipeline for one source file.
///
/// Reads the source declared by `profile.family`, processes every row, and
/// writes `<destination>.csv` (valid rows) and `<destination>_bad.csv`
/// (invalid rows), both headed by the profile's column names.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/partition counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >=
///   `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use contact_normalizer::pipeline::{run_pipeline, PipelineOptions};
/// use contact_normalizer::profile::SourceProfile;
///
/// # fn main() -> Result<(), contact_normalizer::PipelineError> {
/// let profile = SourceProfile::sql_dump();
/// let stats = run_pipeline(
///     "dumps/users.sql".as_ref(),
///     "out/users".as_ref(),
///     &profile,
///     &PipelineOptions::default(),
/// )?;
/// println!("rows={} valid={} invalid={}", stats.rows, stats.valid, stats.invalid);
/// # Ok(())
/// # }
/// ```
pub fn run_pipeline(
    source: &Path,
    destination: &Path,
    profile: &SourceProfile,
    options: &PipelineOptions,
) -> PipelineResult<RunStats> {
    let ctx = RunContext {
        source: source.to_path_buf(),
        family: profile.family,
    };

    let result = run_inner(source, destination, profile, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(stats) => obs.on_success(&ctx, *stats),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn run_inner(
    source: &Path,
    destination: &Path,
    profile: &SourceProfile,
    options: &PipelineOptions,
) -> PipelineResult<RunStats> {
    let table = load_table(source, profile)?;
    let source_name = source_basename(source);
    let today = Local::now().date_naive();
    let columns = table.columns.as_deref();

    let process = |row: &Vec<Option<String>>| -> (CanonicalRecord, bool) {
        let record = mapper::map_row(row, columns, &profile.mapping);
        let valid = validate::validate_record(&record, &profile.checks, today);
        let canonical = assemble::assemble_record(&record, profile, &source_name, today);
        (canonical, valid)
    };

    // Both paths collect in input order; routing below never reorders.
    let processed: Vec<(CanonicalRecord, bool)> = if options.parallel {
        table.rows.par_iter().map(process).collect()
    } else {
        table.rows.iter().map(process).collect()
    };

    let mut router = OutputRouter::create(destination, &profile.header())?;
    let mut stats = RunStats::default();
    for (record, valid) in &processed {
        router.route(record, *valid)?;
        stats.rows += 1;
        if *valid {
            stats.valid += 1;
        } else {
            stats.invalid += 1;
        }
    }
    router.finish()?;

    Ok(stats)
}

/// Source file identifier written into every output row: the path's basename.
fn source_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn severity_for_error(e: &PipelineError) -> Severity {
    match e {
        PipelineError::Io(_) => Severity::Critical,
        PipelineError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        #[cfg(feature = "excel")]
        PipelineError::Excel(_) => Severity::Error,
        PipelineError::SchemaMismatch { .. } => Severity::Error,
        PipelineError::Profile { .. } => Severity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::{severity_for_error, source_basename, Severity};
    use crate::error::PipelineError;

    #[test]
    fn basename_strips_directories() {
        assert_eq!(source_basename("dumps/users.sql".as_ref()), "users.sql");
        assert_eq!(source_basename("users.sql".as_ref()), "users.sql");
    }

    #[test]
    fn io_errors_are_critical() {
        let err = PipelineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(severity_for_error(&err), Severity::Critical);

        let err = PipelineError::SchemaMismatch {
            message: "bad".into(),
        };
        assert_eq!(severity_for_error(&err), Severity::Error);
    }
}
