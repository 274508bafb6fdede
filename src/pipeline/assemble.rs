//! Record assembler: [`RawRecord`] → [`CanonicalRecord`].
//!
//! Walks the profile's column specs and fills each output cell from its
//! declared source. Assembly is independent of the validation outcome; an
//! invalid row is assembled exactly like a valid one.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::pipeline::normalize::{
    compile_additional_info, normalize_birth_year, normalize_long_date, normalize_phone,
    split_address,
};
use crate::profile::{ColumnSource, SourceProfile};
use crate::types::{AddressParts, CanonicalRecord, RawRecord};

/// Build the canonical output row for one record.
///
/// `source_name` is the source file identifier (basename), constant for the
/// whole run. Absent inputs render as empty cells.
pub fn assemble_record(
    record: &RawRecord,
    profile: &SourceProfile,
    source_name: &str,
    today: NaiveDate,
) -> CanonicalRecord {
    // Split each referenced address field once, not per column.
    let mut splits: HashMap<&str, AddressParts> = HashMap::new();
    for spec in &profile.columns {
        if let Some(field) = spec.source.address_field() {
            splits.entry(field).or_insert_with(|| {
                record
                    .get(field)
                    .map(split_address)
                    .unwrap_or_default()
            });
        }
    }

    let values = profile
        .columns
        .iter()
        .map(|spec| match &spec.source {
            ColumnSource::SourceName => source_name.to_owned(),
            ColumnSource::Raw { field } => record.get(field).unwrap_or_default().to_owned(),
            ColumnSource::FullName { first, last } => {
                let parts: Vec<&str> = [record.get(first), record.get(last)]
                    .into_iter()
                    .flatten()
                    .collect();
                parts.join(" ")
            }
            ColumnSource::Street { field } => part(&splits, field, |p| p.street.as_deref()),
            ColumnSource::City { field } => part(&splits, field, |p| p.city.as_deref()),
            ColumnSource::State { field } => part(&splits, field, |p| p.state.as_deref()),
            ColumnSource::ZipFromSplit { field } => part(&splits, field, |p| p.zip.as_deref()),
            ColumnSource::Phone { field } => {
                record.get(field).map(normalize_phone).unwrap_or_default()
            }
            ColumnSource::LongDate { field } => record
                .get(field)
                .map(|raw| normalize_long_date(raw, today))
                .unwrap_or_default(),
            ColumnSource::BirthYear { field } => record
                .get(field)
                .and_then(normalize_birth_year)
                .unwrap_or_default(),
            ColumnSource::AdditionalInfo => {
                compile_additional_info(record, &profile.info_fields)
            }
        })
        .collect();

    CanonicalRecord::new(values)
}

fn part<'a>(
    splits: &'a HashMap<&str, AddressParts>,
    field: &str,
    select: impl Fn(&'a AddressParts) -> Option<&'a str>,
) -> String {
    splits
        .get(field)
        .and_then(select)
        .unwrap_or_default()
        .to_owned()
}
