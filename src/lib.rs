//! `contact-normalizer` turns person-record exports into a canonical contact
//! CSV, split into a valid and an invalid partition.
//!
//! Three source families are supported, each with its own raw layout and its
//! own canonical output column set:
//!
//! - **Spreadsheet workbooks** (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`;
//!   requires the default `excel` feature): employee rosters with positional
//!   columns.
//! - **PDF table extracts** (`.csv`): the two-column `field,data` output of
//!   an upstream stream-mode PDF table extractor, transposed back into
//!   person rows.
//! - **SQL dumps** (`.sql`): line-oriented `INSERT ... VALUES` account
//!   tables.
//!
//! Every source row is projected onto canonical field names, checked against
//! the family's format rules (absent fields are vacuously valid), normalized
//! (phone formatting, heuristic address splitting, date canonicalization),
//! and routed to `<destination>.csv` or `<destination>_bad.csv`. Both files
//! start with the same header; no row is dropped and no row is written
//! twice.
//!
//! ## Quick example
//!
//! ```no_run
//! use contact_normalizer::pipeline::{run_pipeline, PipelineOptions};
//! use contact_normalizer::profile::SourceProfile;
//!
//! # fn main() -> Result<(), contact_normalizer::PipelineError> {
//! let profile = SourceProfile::spreadsheet();
//! let stats = run_pipeline(
//!     "exports/roster.xlsx".as_ref(),
//!     "out/roster_result".as_ref(),
//!     &profile,
//!     &PipelineOptions::default(),
//! )?;
//! println!("valid={} invalid={}", stats.valid, stats.invalid);
//! # Ok(())
//! # }
//! ```
//!
//! A source with a different column layout can supply its own declaration
//! table instead of a built-in one:
//!
//! ```no_run
//! use contact_normalizer::profile::SourceProfile;
//!
//! # fn main() -> Result<(), contact_normalizer::PipelineError> {
//! let profile = SourceProfile::from_json_path("profiles/legacy_dump.json")?;
//! println!("columns: {:?}", profile.header());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`source`]: format adapters yielding row-like tables
//! - [`profile`]: per-family declaration tables (mapping, checks, columns)
//! - [`pipeline`]: mapper, validators, normalizers, assembler, run driver
//! - [`output`]: the valid/invalid CSV sinks
//! - [`types`]: value types flowing between the stages
//! - [`error`]: the shared error enum
//!
//! ## Behavior notes
//!
//! The address splitter and name/SSN/phone/email patterns are deliberately
//! heuristic, known ambiguities included; they are kept as named,
//! independently tested functions rather than second-guessed. Normalizers
//! never fail a row: a value that cannot be transformed passes through (or,
//! for bare years, goes absent) and validation alone decides the partition.

pub mod error;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod source;
pub mod types;

pub use error::{PipelineError, PipelineResult};
