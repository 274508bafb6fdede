//! Source profiles: per-family declaration tables.
//!
//! A [`SourceProfile`] is the single piece of configuration that
//! distinguishes the three source families. It declares how source cells map
//! onto canonical field names, which format checks apply, the exact output
//! column set (the compatibility surface downstream tooling depends on), and
//! the order of the additional-info bag.
//!
//! Profiles are plain data: the built-ins below cover the known families, and
//! a custom profile can be loaded from JSON for a source with a different
//! column layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// The known source families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFamily {
    /// Spreadsheet workbooks (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`).
    Spreadsheet,
    /// Two-column `field,data` CSV produced by an upstream PDF table extractor.
    PdfTable,
    /// Line-oriented `INSERT ... VALUES` SQL dumps.
    SqlDump,
}

impl SourceFamily {
    /// Infer a source family from a file extension (case-insensitive).
    ///
    /// `.csv` maps to [`SourceFamily::PdfTable`]: extracted PDF tables arrive
    /// as CSV, and plain CSV is not a source family of its own.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Spreadsheet),
            "csv" => Some(Self::PdfTable),
            "sql" => Some(Self::SqlDump),
            _ => None,
        }
    }
}

/// How source cells map onto canonical field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMapping {
    /// `(cell index, canonical field)` pairs. Indexes beyond a row's length
    /// read as absent; undeclared indexes are dropped.
    Positional(Vec<(usize, String)>),
    /// `(source column name, canonical field)` pairs, resolved against the
    /// table's column names. Unresolved columns read as absent.
    Named(Vec<(String, String)>),
}

impl FieldMapping {
    /// Expected cell count for positional sources: one past the highest
    /// declared index. `None` for named mappings.
    pub fn expected_width(&self) -> Option<usize> {
        match self {
            Self::Positional(pairs) => pairs.iter().map(|(idx, _)| idx + 1).max(),
            Self::Named(_) => None,
        }
    }
}

/// Format checks a profile can declare against a raw field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRule {
    /// Letters, whitespace and `.'-,` only.
    Name,
    /// Nine digits, optional `-`/`.` separators.
    Ssn,
    /// Ten digits, or eleven starting with `1`, ignoring punctuation.
    Phone,
    /// Lowercase local-part `@` domain with a 2-6 letter TLD.
    Email,
    /// Long-form birth date (`%d %B %Y`), must parse and not be in the future.
    LongDate,
    /// Bare birth year (SQL dumps).
    BirthYear,
}

/// One declared check: apply `rule` to `field` (vacuous when absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    pub field: String,
    pub rule: CheckRule,
}

impl FieldCheck {
    pub fn new(field: impl Into<String>, rule: CheckRule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}

/// Where one output column takes its value from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// Basename of the source file; constant per run.
    SourceName,
    /// Raw field value, copied as-is.
    Raw { field: String },
    /// `first + " " + last`, skipping absent parts.
    FullName { first: String, last: String },
    /// Street segment of the split address.
    Street { field: String },
    /// City segment of the split address.
    City { field: String },
    /// State segment of the split address.
    State { field: String },
    /// Zip segment of the split address (families without a zip column).
    ZipFromSplit { field: String },
    /// Normalized phone number.
    Phone { field: String },
    /// Normalized long-form date (pass-through on failure).
    LongDate { field: String },
    /// Normalized bare year (absent on failure).
    BirthYear { field: String },
    /// The compiled `|`-joined additional-info bag.
    AdditionalInfo,
}

impl ColumnSource {
    /// The raw field this column splits as an address, if any.
    pub fn address_field(&self) -> Option<&str> {
        match self {
            Self::Street { field }
            | Self::City { field }
            | Self::State { field }
            | Self::ZipFromSplit { field } => Some(field),
            _ => None,
        }
    }
}

/// One output column: header name plus value source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub source: ColumnSource,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, source: ColumnSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// One additional-info entry, rendered `label:value` when the field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoField {
    pub label: String,
    pub field: String,
}

impl InfoField {
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            field: field.into(),
        }
    }
}

/// Complete declaration table for one source family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Which adapter reads the source file.
    pub family: SourceFamily,
    /// Source cell → canonical field projection.
    pub mapping: FieldMapping,
    /// Checks feeding the validation outcome.
    pub checks: Vec<FieldCheck>,
    /// Output columns, in header order. Fixed per family; part of the output
    /// contract.
    pub columns: Vec<ColumnSpec>,
    /// Additional-info bag, in concatenation order.
    pub info_fields: Vec<InfoField>,
}

impl SourceProfile {
    /// The built-in profile for `family`.
    pub fn for_family(family: SourceFamily) -> Self {
        match family {
            SourceFamily::Spreadsheet => Self::spreadsheet(),
            SourceFamily::PdfTable => Self::pdf_table(),
            SourceFamily::SqlDump => Self::sql_dump(),
        }
    }

    /// Employee-roster spreadsheets: positional columns, zip in its own
    /// column, SSN/company/department/position in the info bag.
    pub fn spreadsheet() -> Self {
        use ColumnSource as C;
        Self {
            family: SourceFamily::Spreadsheet,
            mapping: FieldMapping::Positional(vec![
                (0, "first_name".into()),
                (1, "last_name".into()),
                (2, "ssn".into()),
                (3, "address".into()),
                (4, "company".into()),
                (5, "department".into()),
                (6, "position".into()),
                (7, "zip".into()),
                (8, "mobile_number".into()),
            ]),
            checks: vec![
                FieldCheck::new("ssn", CheckRule::Ssn),
                FieldCheck::new("first_name", CheckRule::Name),
                FieldCheck::new("last_name", CheckRule::Name),
                FieldCheck::new("mobile_number", CheckRule::Phone),
            ],
            columns: vec![
                ColumnSpec::new("name", C::SourceName),
                ColumnSpec::new(
                    "address",
                    C::Street {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "user_fullname",
                    C::FullName {
                        first: "first_name".into(),
                        last: "last_name".into(),
                    },
                ),
                ColumnSpec::new(
                    "city",
                    C::City {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "state",
                    C::State {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "zip",
                    C::Raw {
                        field: "zip".into(),
                    },
                ),
                ColumnSpec::new(
                    "tel",
                    C::Phone {
                        field: "mobile_number".into(),
                    },
                ),
                ColumnSpec::new("user_additional_info", C::AdditionalInfo),
            ],
            info_fields: vec![
                InfoField::new("ssn", "ssn"),
                InfoField::new("company", "company"),
                InfoField::new("department", "department"),
                InfoField::new("position", "position"),
            ],
        }
    }

    /// PDF-extracted person cards: named columns, zip taken from the address
    /// split, long-form birth dates, nationality in the info bag.
    pub fn pdf_table() -> Self {
        use ColumnSource as C;
        Self {
            family: SourceFamily::PdfTable,
            mapping: FieldMapping::Named(vec![
                ("name".into(), "name".into()),
                ("address".into(), "address".into()),
                ("tel".into(), "tel".into()),
                ("email".into(), "email".into()),
                ("date".into(), "date".into()),
                ("nationality".into(), "nationality".into()),
            ]),
            checks: vec![
                FieldCheck::new("name", CheckRule::Name),
                FieldCheck::new("tel", CheckRule::Phone),
                FieldCheck::new("email", CheckRule::Email),
                FieldCheck::new("date", CheckRule::LongDate),
            ],
            columns: vec![
                ColumnSpec::new("name", C::SourceName),
                ColumnSpec::new(
                    "usermail",
                    C::Raw {
                        field: "email".into(),
                    },
                ),
                ColumnSpec::new(
                    "address",
                    C::Street {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "user_fullname",
                    C::Raw {
                        field: "name".into(),
                    },
                ),
                ColumnSpec::new(
                    "city",
                    C::City {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "state",
                    C::State {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "zip",
                    C::ZipFromSplit {
                        field: "address".into(),
                    },
                ),
                ColumnSpec::new(
                    "tel",
                    C::Phone {
                        field: "tel".into(),
                    },
                ),
                ColumnSpec::new(
                    "dob",
                    C::LongDate {
                        field: "date".into(),
                    },
                ),
                ColumnSpec::new("user_additional_info", C::AdditionalInfo),
            ],
            info_fields: vec![InfoField::new("nationality", "nationality")],
        }
    }

    /// Account-table SQL dumps: positional tuple cells (index 5 is unused in
    /// the upstream layout), bare birth years, password/sex in the info bag.
    pub fn sql_dump() -> Self {
        use ColumnSource as C;
        Self {
            family: SourceFamily::SqlDump,
            mapping: FieldMapping::Positional(vec![
                (0, "user_ID".into()),
                (1, "name".into()),
                (2, "username".into()),
                (3, "password".into()),
                (4, "usermail".into()),
                (6, "sex".into()),
                (7, "country".into()),
                (8, "birth".into()),
            ]),
            checks: vec![
                FieldCheck::new("name", CheckRule::Name),
                FieldCheck::new("usermail", CheckRule::Email),
                FieldCheck::new("birth", CheckRule::BirthYear),
            ],
            columns: vec![
                ColumnSpec::new("name", C::SourceName),
                ColumnSpec::new(
                    "username",
                    C::Raw {
                        field: "username".into(),
                    },
                ),
                ColumnSpec::new(
                    "user_ID",
                    C::Raw {
                        field: "user_ID".into(),
                    },
                ),
                ColumnSpec::new(
                    "usermail",
                    C::Raw {
                        field: "usermail".into(),
                    },
                ),
                ColumnSpec::new(
                    "user_fullname",
                    C::Raw {
                        field: "name".into(),
                    },
                ),
                ColumnSpec::new(
                    "country",
                    C::Raw {
                        field: "country".into(),
                    },
                ),
                ColumnSpec::new(
                    "dob",
                    C::BirthYear {
                        field: "birth".into(),
                    },
                ),
                ColumnSpec::new("user_additional_info", C::AdditionalInfo),
            ],
            info_fields: vec![
                InfoField::new("password", "password"),
                InfoField::new("sex", "sex"),
            ],
        }
    }

    /// Output header, in column order.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Load a custom profile from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load a custom profile from JSON text.
    pub fn from_json_str(text: &str) -> PipelineResult<Self> {
        let profile: Self =
            serde_json::from_str(text).map_err(|e| PipelineError::Profile {
                message: e.to_string(),
            })?;
        if profile.columns.is_empty() {
            return Err(PipelineError::Profile {
                message: "profile declares no output columns".to_string(),
            });
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckRule, FieldMapping, SourceFamily, SourceProfile};

    #[test]
    fn family_from_extension_covers_known_formats() {
        assert_eq!(
            SourceFamily::from_extension("XLSX"),
            Some(SourceFamily::Spreadsheet)
        );
        assert_eq!(
            SourceFamily::from_extension("ods"),
            Some(SourceFamily::Spreadsheet)
        );
        assert_eq!(
            SourceFamily::from_extension("csv"),
            Some(SourceFamily::PdfTable)
        );
        assert_eq!(
            SourceFamily::from_extension("sql"),
            Some(SourceFamily::SqlDump)
        );
        assert_eq!(SourceFamily::from_extension("parquet"), None);
    }

    #[test]
    fn builtin_headers_match_output_contract() {
        assert_eq!(
            SourceProfile::spreadsheet().header(),
            vec![
                "name",
                "address",
                "user_fullname",
                "city",
                "state",
                "zip",
                "tel",
                "user_additional_info"
            ]
        );
        assert_eq!(
            SourceProfile::pdf_table().header(),
            vec![
                "name",
                "usermail",
                "address",
                "user_fullname",
                "city",
                "state",
                "zip",
                "tel",
                "dob",
                "user_additional_info"
            ]
        );
        assert_eq!(
            SourceProfile::sql_dump().header(),
            vec![
                "name",
                "username",
                "user_ID",
                "usermail",
                "user_fullname",
                "country",
                "dob",
                "user_additional_info"
            ]
        );
    }

    #[test]
    fn expected_width_is_one_past_highest_index() {
        assert_eq!(SourceProfile::sql_dump().mapping.expected_width(), Some(9));
        assert_eq!(
            SourceProfile::spreadsheet().mapping.expected_width(),
            Some(9)
        );
        assert_eq!(SourceProfile::pdf_table().mapping.expected_width(), None);
    }

    #[test]
    fn custom_profile_loads_from_json() {
        let json = r#"{
            "family": "sql_dump",
            "mapping": { "positional": [[0, "name"], [1, "usermail"]] },
            "checks": [
                { "field": "name", "rule": "name" },
                { "field": "usermail", "rule": "email" }
            ],
            "columns": [
                { "name": "name", "source": "source_name" },
                { "name": "usermail", "source": { "raw": { "field": "usermail" } } },
                { "name": "user_additional_info", "source": "additional_info" }
            ],
            "info_fields": []
        }"#;

        let profile = SourceProfile::from_json_str(json).unwrap();
        assert_eq!(profile.family, SourceFamily::SqlDump);
        assert_eq!(profile.mapping.expected_width(), Some(2));
        assert_eq!(profile.checks[1].rule, CheckRule::Email);
        assert_eq!(
            profile.header(),
            vec!["name", "usermail", "user_additional_info"]
        );
        assert!(matches!(profile.mapping, FieldMapping::Positional(_)));
    }

    #[test]
    fn empty_column_set_is_rejected() {
        let json = r#"{
            "family": "pdf_table",
            "mapping": { "named": [] },
            "checks": [],
            "columns": [],
            "info_fields": []
        }"#;
        let err = SourceProfile::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("no output columns"));
    }
}
