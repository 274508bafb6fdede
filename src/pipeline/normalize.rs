//! Field normalizers: best-effort canonicalization of single raw values.
//!
//! Normalizers never fail loudly. A value that cannot be confidently
//! transformed degrades to a pass-through (or, for bare years, to absent) and
//! the row keeps flowing. None of these functions validate; validation is a
//! separate, independent pass (see [`crate::pipeline::validate`]).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::profile::InfoField;
use crate::types::{AddressParts, RawRecord};

/// Separator for the additional-info bag.
pub const INFO_SEPARATOR: &str = "|";

/// Long-form date layout used by PDF person cards, e.g. `14 June 1985`.
pub const LONG_DATE_FORMAT: &str = "%d %B %Y";

/// Heuristic address capture: leading "number + street" up to the first
/// comma, a comma-delimited city, a two-uppercase-letter state, a trailing
/// digit/hyphen zip. Known-lossy on unusual layouts; every group is optional.
static ADDRESS_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z.\s']*\d[A-Za-z.\d\s']*)?,?\s?([A-Z'\sa-z]*?)?,?\s?([A-Z]{2})?\s?([\d-]*)?$")
        .expect("invalid address split regex")
});

/// Normalize a phone number by digit extraction.
///
/// Eleven digits starting with `1` become `1-DDD-DDD-DDDD`; otherwise each
/// run of ten digits is formatted `DDD-DDD-DDDD` in place and any trailing
/// digits are kept as-is. Fewer than ten digits pass through unformatted.
/// This does not validate; it formats whatever digits are there.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 11 {
        if let Some(rest) = digits.strip_prefix('1') {
            return format!("1-{}-{}-{}", &rest[..3], &rest[3..6], &rest[6..]);
        }
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + 2);
    let mut rest = digits.as_str();
    while rest.len() >= 10 {
        let (group, tail) = rest.split_at(10);
        out.push_str(&group[..3]);
        out.push('-');
        out.push_str(&group[3..6]);
        out.push('-');
        out.push_str(&group[6..]);
        rest = tail;
    }
    out.push_str(rest);
    out
}

/// Split a free-text address line into street/city/state/zip.
///
/// Only comma-bearing text is decomposed; anything else (including text the
/// capture pattern cannot consume) is returned whole as the street.
pub fn split_address(raw: &str) -> AddressParts {
    if raw.contains(',') {
        if let Some(caps) = ADDRESS_SPLIT.captures(raw) {
            let group = |i: usize| {
                caps.get(i)
                    .map(|m| m.as_str())
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            };
            return AddressParts {
                street: group(1),
                city: group(2),
                state: group(3),
                zip: group(4),
            };
        }
    }

    AddressParts {
        street: Some(raw.to_owned()),
        city: None,
        state: None,
        zip: None,
    }
}

/// Normalize a long-form date to ISO `YYYY-MM-DD`.
///
/// Values that fail to parse, or that parse to a date after `today`, pass
/// through unchanged.
pub fn normalize_long_date(raw: &str, today: NaiveDate) -> String {
    match NaiveDate::parse_from_str(raw, LONG_DATE_FORMAT) {
        Ok(date) if date <= today => date.format("%Y-%m-%d").to_string(),
        _ => raw.to_owned(),
    }
}

/// Normalize a bare birth year.
///
/// Accepts one to four digits; leading zeros are dropped (`0085` → `85`).
/// Anything else is absent rather than passed through.
pub fn normalize_birth_year(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.len() > 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: u16 = raw.parse().ok()?;
    if year == 0 {
        return None;
    }
    Some(year.to_string())
}

/// Compile the additional-info bag.
///
/// Each declared field that is present renders as `label:value`; absent
/// fields contribute nothing (no empty `label:` stubs). Entries are joined
/// with [`INFO_SEPARATOR`] in declaration order.
pub fn compile_additional_info(record: &RawRecord, fields: &[InfoField]) -> String {
    let entries: Vec<String> = fields
        .iter()
        .filter_map(|info| {
            record
                .get(&info.field)
                .map(|value| format!("{}:{}", info.label, value))
        })
        .collect();
    entries.join(INFO_SEPARATOR)
}
