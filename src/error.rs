use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by source adapters and the pipeline driver.
///
/// This is a single error enum shared across the spreadsheet/PDF-table/SQL-dump
/// adapters and the output router. Per-row problems (malformed values, rows
/// with the wrong cell count) are *not* errors: they degrade to pass-through
/// values or a `false` validation outcome and the row is still routed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. source file not found, permission denied).
    ///
    /// The only run-fatal condition in normal operation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV read/write error (output sinks, PDF table extracts).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not have the shape the source family requires
    /// (no sheets, no usable rows, unknown file extension, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A source profile could not be loaded or is unusable.
    #[error("profile error: {message}")]
    Profile { message: String },
}
