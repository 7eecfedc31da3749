use assert_fs::prelude::*;
use snpfile::{Dataset, MinusStrandTable, RecordSet, import};

#[test]
fn load_records_reads_a_dtc_export() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("genome.txt");
    input
        .write_str(
            "# This data file generated by an example platform\n\
             # rsid\tchromosome\tposition\tgenotype\n\
             rs1\t1\t101\tAA\n\
             rs2\t2\t202\t--\n\
             rs3\tX\t303\tAG\n",
        )
        .unwrap();

    let records = import::load_records(input.path()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records.get("rs1").unwrap().genotype, "AA");
    assert_eq!(records.get("rs2").unwrap().genotype, "??");

    let dataset = Dataset::new("upload", records, MinusStrandTable::new());
    assert_eq!(dataset.no_calls(), ["rs2".to_string()]);
}

#[test]
fn csv_export_round_trips_through_the_reader() {
    let records: RecordSet = [
        ("rs1".to_string(), snpfile::VariantRecord::new("1", "AA")),
        ("rs2".to_string(), snpfile::VariantRecord::new("2", "??")),
        ("rs3".to_string(), snpfile::VariantRecord::new("MT", "CT")),
    ]
    .into_iter()
    .collect();
    let dataset = Dataset::new("file", records.clone(), MinusStrandTable::new());

    let csv = dataset.serialize("csv").unwrap();
    let reparsed = import::read_records(import::Reader::new(csv.as_bytes())).unwrap();

    assert_eq!(reparsed, records);
}

#[test]
fn load_records_reports_the_failing_path() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("nope.txt");
    let err = import::load_records(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to open genotype file"));
}

#[test]
fn load_records_reports_the_failing_line() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("genome.txt");
    input.write_str("rs1\t1\t101\tAA\nrs2\t2\n").unwrap();

    let err = import::load_records(input.path()).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("line 2"), "unexpected error chain: {chain}");
}
