//! Field validators and the validation aggregator.
//!
//! Every validator is a pure predicate over one raw value and is *vacuously
//! true* for absent values: validation only rejects fields that are present
//! but malformed. Sparse source data must not be penalized.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::pipeline::normalize::LONG_DATE_FORMAT;
use crate::profile::{CheckRule, FieldCheck};
use crate::types::RawRecord;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z\s\.',-]*)$").expect("invalid name regex"));

static SSN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d[-.]?){2}\d[-.]?(?:\d[-.]?){4}\d[-.]?\d$").expect("invalid ssn regex")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1?\d{10}$").expect("invalid phone regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9_-]+\.)*[a-z0-9_-]+@[a-z0-9_-]+(\.[a-z0-9_-]+)*\.[a-z]{2,6}$")
        .expect("invalid email regex")
});

/// Letters, whitespace and `.'-,` only; rejects digits and other symbols.
pub fn name_ok(value: &str) -> bool {
    NAME.is_match(value)
}

/// Nine digits, optionally separated by `-` or `.`.
pub fn ssn_ok(value: &str) -> bool {
    SSN.is_match(value)
}

/// Ten digits, or eleven beginning with `1`, after stripping `()-.` and
/// whitespace.
pub fn phone_ok(value: &str) -> bool {
    let stripped: String = value
        .chars()
        .filter(|&c| !matches!(c, '(' | ')' | '-' | '.') && !c.is_whitespace())
        .collect();
    PHONE.is_match(&stripped)
}

/// Dot-separated lowercase local part `@` dot-separated domain with a 2-6
/// letter TLD.
pub fn email_ok(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Long-form birth date: must parse as [`LONG_DATE_FORMAT`] and not lie after
/// `today`.
pub fn long_date_ok(value: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(value, LONG_DATE_FORMAT)
        .map(|date| date <= today)
        .unwrap_or(false)
}

/// Bare birth year: any present value passes.
///
/// Year plausibility is deliberately not enforced; the dob column is
/// normalized independently and downstream consumers expect implausible
/// years in the valid partition.
// TODO: decide with the data owners whether out-of-range years should start
// failing validation; consumers currently rely on them passing.
pub fn birth_year_ok(_value: &str) -> bool {
    true
}

/// Run every declared check against the record and AND the results.
///
/// Checks whose field is absent are vacuously true, so a fully empty record
/// validates regardless of the profile. Order does not matter; fields are
/// independent and there is no short-circuit requirement.
pub fn validate_record(record: &RawRecord, checks: &[FieldCheck], today: NaiveDate) -> bool {
    checks.iter().all(|check| {
        record.get(&check.field).is_none_or(|value| match check.rule {
            CheckRule::Name => name_ok(value),
            CheckRule::Ssn => ssn_ok(value),
            CheckRule::Phone => phone_ok(value),
            CheckRule::Email => email_ok(value),
            CheckRule::LongDate => long_date_ok(value, today),
            CheckRule::BirthYear => birth_year_ok(value),
        })
    })
}
