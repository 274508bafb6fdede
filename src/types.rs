//! Core value types for the normalization pipeline.
//!
//! Every type here is built and consumed within the processing of a single
//! row (or a single run, for [`RunStats`]); there is no cross-row shared
//! mutable state.

use std::collections::BTreeMap;

/// Row-like output of a source adapter.
///
/// `columns` carries source column names when the format has them (PDF table
/// extracts, spreadsheet headers); positional sources may leave it `None`.
/// Rows may be shorter than the widest row; absent positions read as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    /// Source column names, if the format provides them.
    pub columns: Option<Vec<String>>,
    /// Row-major cells; `None` marks an empty/absent cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl SourceTable {
    /// Create a table from optional column names and rows.
    pub fn new(columns: Option<Vec<String>>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One source row projected onto canonical field names.
///
/// Built once per row by the schema mapper and immutable afterward.
/// Empty/whitespace-only values are treated as absent and never stored, so
/// `get` returning `Some` always means "present and non-empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field value. Whitespace is trimmed; empty values are dropped.
    pub fn insert(&mut self, field: impl Into<String>, value: &str) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.fields.insert(field.into(), trimmed.to_owned());
        }
    }

    /// Look up a field. Absent and empty are indistinguishable by design.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// True if no field holds a value.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Heuristic decomposition of a free-text address line.
///
/// Produced by [`crate::pipeline::normalize::split_address`]; components are
/// never independently validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// One fully assembled output row.
///
/// Values are ordered exactly like the owning profile's column list; the
/// record is written once to exactly one sink and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    /// Output cells, in header order.
    pub values: Vec<String>,
}

impl CanonicalRecord {
    /// Create a record from ordered output cells.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }
}

/// Row counts for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Rows read from the source.
    pub rows: usize,
    /// Rows routed to the valid sink.
    pub valid: usize,
    /// Rows routed to the invalid sink.
    pub invalid: usize,
}
