//! Output router: the valid/invalid CSV sinks.
//!
//! Both sinks are created up front with the same header row, before any data
//! row is written, so an empty partition still yields a header-only file.
//! The router owns the sink handles for the duration of a run; appends never
//! reorder rows relative to the order they are routed in.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::PipelineResult;
use crate::types::CanonicalRecord;

/// Suffix appended to the destination stem for the invalid partition.
pub const INVALID_SUFFIX: &str = "_bad";

/// Routes canonical records to the valid or invalid CSV sink.
pub struct OutputRouter {
    valid: csv::Writer<File>,
    invalid: csv::Writer<File>,
    valid_path: PathBuf,
    invalid_path: PathBuf,
}

impl OutputRouter {
    /// Create both sinks for `destination` (a path stem, without extension)
    /// and write `header` to each.
    ///
    /// `<destination>.csv` receives valid rows, `<destination>_bad.csv`
    /// invalid ones. Existing files are truncated: a re-run replaces the
    /// previous output rather than appending to it.
    pub fn create(destination: &Path, header: &[&str]) -> PipelineResult<Self> {
        let valid_path = stem_with(destination, ".csv");
        let invalid_path = stem_with(destination, &format!("{INVALID_SUFFIX}.csv"));

        let mut valid = csv::Writer::from_path(&valid_path)?;
        let mut invalid = csv::Writer::from_path(&invalid_path)?;
        valid.write_record(header)?;
        invalid.write_record(header)?;

        Ok(Self {
            valid,
            invalid,
            valid_path,
            invalid_path,
        })
    }

    /// Append `record` to the sink selected by `valid`.
    pub fn route(&mut self, record: &CanonicalRecord, valid: bool) -> PipelineResult<()> {
        let sink = if valid { &mut self.valid } else { &mut self.invalid };
        sink.write_record(&record.values)?;
        Ok(())
    }

    /// Flush both sinks and return their paths `(valid, invalid)`.
    pub fn finish(mut self) -> PipelineResult<(PathBuf, PathBuf)> {
        self.valid.flush()?;
        self.invalid.flush()?;
        Ok((self.valid_path, self.invalid_path))
    }

    /// Path of the valid sink.
    pub fn valid_path(&self) -> &Path {
        &self.valid_path
    }

    /// Path of the invalid sink.
    pub fn invalid_path(&self) -> &Path {
        &self.invalid_path
    }
}

/// `<stem><suffix>` without touching any existing extension-like segments in
/// the stem itself.
fn stem_with(stem: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = stem.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::OutputRouter;
    use crate::types::CanonicalRecord;

    #[test]
    fn both_sinks_start_with_the_same_header() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("out");

        let router = OutputRouter::create(&stem, &["name", "tel"]).unwrap();
        let (valid_path, invalid_path) = router.finish().unwrap();

        let valid = std::fs::read_to_string(valid_path).unwrap();
        let invalid = std::fs::read_to_string(invalid_path).unwrap();
        assert_eq!(valid, "name,tel\n");
        assert_eq!(invalid, valid);
    }

    #[test]
    fn routing_appends_to_exactly_one_sink_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("out");

        let mut router = OutputRouter::create(&stem, &["name", "tel"]).unwrap();
        router
            .route(&CanonicalRecord::new(vec!["a.csv".into(), "1".into()]), true)
            .unwrap();
        router
            .route(&CanonicalRecord::new(vec!["a.csv".into(), "2".into()]), false)
            .unwrap();
        router
            .route(&CanonicalRecord::new(vec!["a.csv".into(), "3".into()]), true)
            .unwrap();
        let (valid_path, invalid_path) = router.finish().unwrap();

        let valid = std::fs::read_to_string(valid_path).unwrap();
        let invalid = std::fs::read_to_string(invalid_path).unwrap();
        assert_eq!(valid, "name,tel\na.csv,1\na.csv,3\n");
        assert_eq!(invalid, "name,tel\na.csv,2\n");
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("out");

        let mut router = OutputRouter::create(&stem, &["name"]).unwrap();
        router
            .route(&CanonicalRecord::new(vec!["Smith, John".into()]), true)
            .unwrap();
        let (valid_path, _) = router.finish().unwrap();

        let valid = std::fs::read_to_string(valid_path).unwrap();
        assert_eq!(valid, "name\n\"Smith, John\"\n");
    }

    #[test]
    fn invalid_sink_path_carries_the_bad_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("result");

        let router = OutputRouter::create(&stem, &["name"]).unwrap();
        assert!(router.valid_path().ends_with("result.csv"));
        assert!(router.invalid_path().ends_with("result_bad.csv"));
        router.finish().unwrap();
    }
}
