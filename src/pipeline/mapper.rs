//! Schema mapper: source row → [`RawRecord`].
//!
//! A pure renaming/projection step. No validation or transformation happens
//! here; cells land under their canonical field names and everything
//! undeclared is dropped.

use crate::profile::FieldMapping;
use crate::types::RawRecord;

/// Project one source row onto canonical field names.
///
/// - Positional mappings read by cell index; indexes past the end of a short
///   row are absent.
/// - Named mappings resolve source column names against `columns`; columns
///   the table does not have are absent.
pub fn map_row(
    row: &[Option<String>],
    columns: Option<&[String]>,
    mapping: &FieldMapping,
) -> RawRecord {
    let mut record = RawRecord::new();

    match mapping {
        FieldMapping::Positional(pairs) => {
            for (idx, field) in pairs {
                if let Some(Some(value)) = row.get(*idx) {
                    record.insert(field.clone(), value);
                }
            }
        }
        FieldMapping::Named(pairs) => {
            let columns = columns.unwrap_or(&[]);
            for (column, field) in pairs {
                let idx = columns.iter().position(|c| c == column);
                if let Some(Some(value)) = idx.and_then(|i| row.get(i)) {
                    record.insert(field.clone(), value);
                }
            }
        }
    }

    record
}
