#![cfg(feature = "excel_test_writer")]

use std::path::Path;

use contact_normalizer::pipeline::{run_pipeline, PipelineOptions};
use contact_normalizer::profile::SourceProfile;

/// Roster sheet matching the spreadsheet family's positional layout:
/// first_name, last_name, ssn, address, company, department, position, zip,
/// mobile_number.
fn write_roster_xlsx(path: &Path) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Employees").unwrap();

    let header = [
        "First Name",
        "Last Name",
        "SSN",
        "Address",
        "Company",
        "Department",
        "Position",
        "Zip",
        "Mobile number",
    ];
    for (col, name) in header.iter().enumerate() {
        ws.write_string(0, col as u16, *name).unwrap();
    }

    // Clean row.
    ws.write_string(1, 0, "Ada").unwrap();
    ws.write_string(1, 1, "Lovelace").unwrap();
    ws.write_string(1, 2, "123-45-6789").unwrap();
    ws.write_string(1, 3, "123 Main St, Springfield, IL 62704")
        .unwrap();
    ws.write_string(1, 4, "Analytical Engines").unwrap();
    ws.write_string(1, 6, "Engineer").unwrap();
    ws.write_number(1, 7, 62704.0).unwrap();
    ws.write_string(1, 8, "(123) 456-7890").unwrap();

    // Malformed SSN fails validation; the row still normalizes and routes.
    ws.write_string(2, 0, "Grace").unwrap();
    ws.write_string(2, 1, "Hopper").unwrap();
    ws.write_string(2, 2, "12-34").unwrap();
    ws.write_string(2, 3, "17 Navy Way").unwrap();
    ws.write_string(2, 8, "11234567890").unwrap();

    wb.save(path).unwrap();
}

#[test]
fn roster_sheet_maps_positionally_and_routes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("roster.xlsx");
    let dest = dir.path().join("roster_result");
    write_roster_xlsx(&src);

    let stats = run_pipeline(
        &src,
        &dest,
        &SourceProfile::spreadsheet(),
        &PipelineOptions::default(),
    )
    .unwrap();

    assert_eq!(stats.rows, 2);
    assert_eq!(stats.valid, 1);
    assert_eq!(stats.invalid, 1);

    let valid = std::fs::read_to_string(dir.path().join("roster_result.csv")).unwrap();
    let invalid = std::fs::read_to_string(dir.path().join("roster_result_bad.csv")).unwrap();

    let header = "name,address,user_fullname,city,state,zip,tel,user_additional_info\n";
    assert!(valid.starts_with(header));
    assert!(invalid.starts_with(header));

    // Zip survives the sheet's numeric typing without a trailing `.0`, and
    // the info bag skips the empty department column.
    assert_eq!(
        valid.lines().nth(1).unwrap(),
        "roster.xlsx,123 Main St,Ada Lovelace,Springfield,IL,62704,123-456-7890,\
         ssn:123-45-6789|company:Analytical Engines|position:Engineer"
    );

    assert_eq!(
        invalid.lines().nth(1).unwrap(),
        "roster.xlsx,17 Navy Way,Grace Hopper,,,,1-123-456-7890,ssn:12-34"
    );
}
