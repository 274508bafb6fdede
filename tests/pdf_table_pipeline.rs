use contact_normalizer::pipeline::{run_pipeline, PipelineOptions};
use contact_normalizer::profile::SourceProfile;

#[test]
fn pdf_extract_transposes_normalizes_and_routes() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("people_result");

    let profile = SourceProfile::pdf_table();
    let stats = run_pipeline(
        "tests/fixtures/people_extract.csv".as_ref(),
        &dest,
        &profile,
        &PipelineOptions::default(),
    )
    .unwrap();

    assert_eq!(stats.rows, 3);
    assert_eq!(stats.valid, 1);
    assert_eq!(stats.invalid, 2);

    let valid = std::fs::read_to_string(dir.path().join("people_result.csv")).unwrap();
    let invalid = std::fs::read_to_string(dir.path().join("people_result_bad.csv")).unwrap();

    let header =
        "name,usermail,address,user_fullname,city,state,zip,tel,dob,user_additional_info\n";
    assert!(valid.starts_with(header));
    assert!(invalid.starts_with(header));

    // The one clean card: address split four ways, phone grouped, long-form
    // date canonicalized to ISO.
    let ada: Vec<&str> = valid.lines().nth(1).unwrap().split(',').collect();
    assert_eq!(ada[0], "people_extract.csv");
    assert_eq!(ada[1], "ada@example.com");
    assert_eq!(ada[2], "12 St James Square");
    assert_eq!(ada[7], "123-456-7890");
    assert_eq!(ada[8], "1815-12-10");
    assert_eq!(ada[9], "nationality:British");

    // A future birth date fails validation but still normalizes to
    // pass-through, and an eleven-digit phone keeps its leading one.
    let grace = invalid.lines().nth(1).unwrap();
    assert!(grace.contains("1-123-456-7890"));
    assert!(grace.contains("9 December 2199"));
    // Comma-free address: whole text is the street, nothing else.
    assert!(grace.contains("17 Navy Way"));

    // An unparseable date and a short phone both pass through raw.
    let linus = invalid.lines().nth(2).unwrap();
    assert!(linus.contains("sometime in winter"));
    assert!(linus.contains(",555,"));
}

#[test]
fn quoted_address_splits_into_street_city_state_zip() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("one_result");
    let src = dir.path().join("one.csv");
    std::fs::write(
        &src,
        "name,Jane Doe\naddress,\"123 Main St, Springfield, IL 62704\"\n",
    )
    .unwrap();

    run_pipeline(
        &src,
        &dest,
        &SourceProfile::pdf_table(),
        &PipelineOptions::default(),
    )
    .unwrap();

    let valid = std::fs::read_to_string(dir.path().join("one_result.csv")).unwrap();
    let row = valid.lines().nth(1).unwrap();
    assert_eq!(row, "one.csv,,123 Main St,Jane Doe,Springfield,IL,62704,,,");
}
