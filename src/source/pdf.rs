//! PDF-table adapter.
//!
//! PDF text extraction happens upstream (a stream-mode table extractor run
//! over the document); what reaches this adapter is its two-column
//! `field,data` CSV, one cell pair per line, with person cards laid out
//! vertically and repeating. This adapter groups the pairs by field name and
//! transposes them: the Nth occurrence of each field becomes row N of the
//! resulting [`SourceTable`].

use std::path::Path;

use crate::error::PipelineResult;
use crate::types::SourceTable;

/// Load a `field,data` PDF table extract.
pub fn load_pdf_table(path: impl AsRef<Path>) -> PipelineResult<SourceTable> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    table_from_pairs(&mut rdr)
}

/// Transpose `field,data` pairs from an open CSV reader.
pub fn table_from_pairs<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> PipelineResult<SourceTable> {
    // Field order is first-seen; groups collect each field's values in
    // document order.
    let mut order: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<Option<String>>> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let field = match record.get(0).map(str::trim) {
            Some(f) if !f.is_empty() => f.to_owned(),
            _ => continue,
        };
        let data = record
            .get(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let idx = match order.iter().position(|f| *f == field) {
            Some(idx) => idx,
            None => {
                order.push(field);
                groups.push(Vec::new());
                groups.len() - 1
            }
        };
        groups[idx].push(data);
    }

    let row_count = groups.iter().map(Vec::len).max().unwrap_or(0);
    let rows: Vec<Vec<Option<String>>> = (0..row_count)
        .map(|i| {
            groups
                .iter()
                .map(|group| group.get(i).cloned().flatten())
                .collect()
        })
        .collect();

    Ok(SourceTable::new(Some(order), rows))
}
