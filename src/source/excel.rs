#![cfg(feature = "excel")]

//! Spreadsheet adapter.
//!
//! Reads the first sheet of a workbook into a [`SourceTable`]: the first
//! non-empty row is the header, everything below it is data. Cells are
//! rendered as strings; the pipeline's field mapping decides what any of
//! them mean.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{PipelineError, PipelineResult};
use crate::types::SourceTable;

/// Load the first sheet of a workbook (`.xlsx`, `.xls`, `.ods`, ...).
pub fn load_spreadsheet(path: impl AsRef<Path>) -> PipelineResult<SourceTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PipelineError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    table_from_range(&sheet, &range)
}

fn table_from_range(
    sheet: &str,
    range: &calamine::Range<Data>,
) -> PipelineResult<SourceTable> {
    let mut header_row_idx: Option<usize> = None;
    let mut columns: Vec<String> = Vec::new();

    for (idx0, row) in range.rows().enumerate() {
        if row.iter().any(|c| !matches!(c, Data::Empty)) {
            header_row_idx = Some(idx0);
            columns = row.iter().map(cell_to_string).collect();
            break;
        }
    }

    let header_row_idx = header_row_idx.ok_or_else(|| PipelineError::SchemaMismatch {
        message: format!("sheet '{sheet}': no non-empty rows (no header row found)"),
    })?;

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }
        rows.push(row.iter().map(cell_to_value).collect());
    }

    Ok(SourceTable::new(Some(columns), rows))
}

fn cell_to_value(c: &Data) -> Option<String> {
    if matches!(c, Data::Empty) {
        return None;
    }
    let s = cell_to_string(c);
    if s.is_empty() { None } else { Some(s) }
}

/// Render a cell as text. Whole-number floats drop the trailing `.0` so zip
/// codes and phone digits survive the spreadsheet's numeric typing.
fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use calamine::Data;

    use super::{cell_to_string, cell_to_value};

    #[test]
    fn whole_number_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(62704.0)), "62704");
        assert_eq!(cell_to_string(&Data::Float(98.5)), "98.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
    }

    #[test]
    fn empty_cells_read_as_absent() {
        assert_eq!(cell_to_value(&Data::Empty), None);
        assert_eq!(cell_to_value(&Data::String(String::new())), None);
        assert_eq!(
            cell_to_value(&Data::String("Ada".into())).as_deref(),
            Some("Ada")
        );
    }
}
