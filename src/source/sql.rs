//! SQL-dump adapter.
//!
//! Reads a line-oriented dump where each `INSERT ... VALUES` statement is
//! followed by one parenthesized tuple per line. Tuples are split on commas
//! with single-quote awareness (spaces before an opening quote do not defeat
//! it); cells are cleaned of quoting leftovers and the `''`/`'0'`/`'NULL'`
//! placeholder values read as absent. A tuple whose quote handling produced
//! the wrong cell count is best-effort re-segmented by splitting cells that
//! still contain commas; whatever comes out flows on to mapping, so a
//! malformed row is routed by its validation outcome rather than dropped.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PipelineResult;
use crate::types::SourceTable;

/// `INSERT ... VALUES` statement preamble; such lines carry no tuple.
static INSERT_PREAMBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^INSERT.*VALUES").expect("invalid insert preamble regex"));

/// Tuple decoration: leading paren, trailing `),`/`);`, and tab characters.
static TUPLE_DECOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(|\),$|\);$|\t").expect("invalid tuple decoration regex"));

/// Placeholder cell values the dumps use for "no data".
const NULL_MARKERS: &[&str] = &["", "0", "NULL"];

/// Load a SQL dump.
///
/// `expected_width` is the tuple cell count the source family declares (one
/// past the highest mapped index); rows with any other count are
/// re-segmented. Dumps are read lossily: these exports predate UTF-8 and the
/// odd legacy byte should not kill the run.
pub fn load_sql_dump(
    path: impl AsRef<Path>,
    expected_width: Option<usize>,
) -> PipelineResult<SourceTable> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(table_from_dump(&text, expected_width))
}

/// Parse dump text into a [`SourceTable`]. Never fails: every malformed line
/// degrades to a best-effort row.
pub fn table_from_dump(text: &str, expected_width: Option<usize>) -> SourceTable {
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    for line in text.lines() {
        if INSERT_PREAMBLE.is_match(line) {
            continue;
        }
        let line = TUPLE_DECOR.replace_all(line, "");
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells: Vec<Option<String>> = split_tuple(line)
            .iter()
            .map(|cell| clean_cell(cell))
            .collect();

        if let Some(width) = expected_width {
            if cells.len() != width {
                cells = resegment(cells);
            }
        }

        rows.push(cells);
    }

    SourceTable::new(None, rows)
}

/// Split one tuple line on commas, honoring single-quoted strings.
///
/// Spaces between a comma and an opening quote are skipped, a doubled quote
/// inside a quoted cell is a literal quote, and text after a closing quote
/// (an unpaired quote somewhere upstream) is appended to the cell rather
/// than rejected.
fn split_tuple(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut chars = line.chars().peekable();

    'cells: loop {
        while chars.peek() == Some(&' ') {
            chars.next();
        }

        let mut cell = String::new();
        if chars.peek() == Some(&'\'') {
            chars.next();
            loop {
                match chars.next() {
                    Some('\'') => {
                        if chars.peek() == Some(&'\'') {
                            cell.push('\'');
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    Some(c) => cell.push(c),
                    None => break,
                }
            }
        }

        // Unquoted remainder (or the whole cell when it never was quoted).
        loop {
            match chars.next() {
                Some(',') => {
                    cells.push(cell);
                    continue 'cells;
                }
                Some(c) => cell.push(c),
                None => {
                    cells.push(cell);
                    break 'cells;
                }
            }
        }
    }

    cells
}

/// Strip quoting leftovers and map placeholder values to absent.
fn clean_cell(cell: &str) -> Option<String> {
    let no_tabs = cell.replace('\t', "");
    let trimmed = no_tabs.trim();
    let s = trimmed.strip_prefix('\'').unwrap_or(trimmed);
    let s = s.strip_suffix('\'').unwrap_or(s);

    if NULL_MARKERS.contains(&s) {
        None
    } else {
        Some(s.to_owned())
    }
}

/// Re-split cells that still contain commas; the usual cause is a quote
/// character the tuple splitter could not pair up.
fn resegment(cells: Vec<Option<String>>) -> Vec<Option<String>> {
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Some(value) if value.contains(',') => {
                out.extend(value.split(',').map(clean_cell));
            }
            other => out.push(other),
        }
    }
    out
}
