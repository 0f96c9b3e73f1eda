use cable_core::sheets::{count_sheet_name, logs_sheet_name};
use cable_core::{run_ingest, InMemorySheetStore, RawLogFile, SheetStore};

fn log_file(name: &str, timestamp: &str, test_type: &str, sns: (&str, &str, &str)) -> RawLogFile {
    RawLogFile {
        name: name.to_string(),
        text: format!(
            "{timestamp}  info  Test log started\n\
             Test Type: {test_type}\n\
             Test Set SN: {}\n\
             Coax Cable SN: {}\n\
             Signal Cable SN: {}\n",
            sns.0, sns.1, sns.2
        ),
    }
}

fn count_of(store: &InMemorySheetStore, test_type: &str, part: &str, serial: &str) -> Option<u64> {
    let sheet = store.read_sheet(&count_sheet_name(test_type)).unwrap()?;
    sheet
        .rows
        .iter()
        .find(|cells| cells[0] == part && cells[1] == serial)
        .map(|cells| cells[2].parse().unwrap())
}

#[test]
fn single_file_creates_three_counter_rows_and_a_log_row() {
    let mut store = InMemorySheetStore::new();
    let files = vec![log_file("a.log", "2024-03-05 09:00:00", "atp", ("100", "200", "300"))];
    let report = run_ingest(&mut store, &files).unwrap();

    assert_eq!(report.files_seen, 1);
    assert_eq!(report.ingested, 1);
    assert_eq!(count_of(&store, "ATP", "ATP TESTER", "100"), Some(1));
    assert_eq!(count_of(&store, "ATP", "ATP COAX CABLE", "200"), Some(1));
    assert_eq!(count_of(&store, "ATP", "ATP SIGNAL CABLE", "300"), Some(1));

    let logs = store.read_sheet(&logs_sheet_name("ATP")).unwrap().unwrap();
    assert_eq!(logs.rows.len(), 1);
    assert_eq!(logs.rows[0][0], "2024-03-05 09:00:00");
}

#[test]
fn duplicate_timestamp_increments_only_once() {
    // Same event twice (re-scan of the same directory): counters move once
    let mut store = InMemorySheetStore::new();
    let f = log_file("a.log", "2024-03-05 09:00:00", "ATP", ("100", "200", "300"));
    run_ingest(&mut store, std::slice::from_ref(&f)).unwrap();
    let report = run_ingest(&mut store, &[f]).unwrap();

    assert_eq!(report.ingested, 0);
    assert_eq!(report.skipped_duplicate, 1);
    assert_eq!(count_of(&store, "ATP", "ATP COAX CABLE", "200"), Some(1));
}

#[test]
fn duplicate_within_one_batch_is_also_skipped() {
    let mut store = InMemorySheetStore::new();
    let files = vec![
        log_file("a.log", "2024-03-05 09:00:00", "ATP", ("100", "200", "300")),
        log_file("b.log", "2024-03-05 09:00:00", "ATP", ("100", "200", "300")),
    ];
    let report = run_ingest(&mut store, &files).unwrap();
    assert_eq!(report.ingested, 1);
    assert_eq!(report.skipped_duplicate, 1);
}

#[test]
fn same_serials_different_timestamps_are_two_events() {
    let mut store = InMemorySheetStore::new();
    let files = vec![
        log_file("a.log", "2024-03-05 09:00:00", "ATP", ("100", "200", "300")),
        log_file("b.log", "2024-03-05 09:00:01", "ATP", ("100", "200", "300")),
    ];
    let report = run_ingest(&mut store, &files).unwrap();
    assert_eq!(report.ingested, 2);
    assert_eq!(count_of(&store, "ATP", "ATP TESTER", "100"), Some(2));
    assert_eq!(count_of(&store, "ATP", "ATP COAX CABLE", "200"), Some(2));
    assert_eq!(count_of(&store, "ATP", "ATP SIGNAL CABLE", "300"), Some(2));
}

#[test]
fn malformed_file_is_skipped_without_side_effects() {
    let mut store = InMemorySheetStore::new();
    let mut bad = log_file("bad.log", "2024-03-05 09:00:00", "ATP", ("1", "2", "3"));
    bad.text = bad.text.replace("Test Type: ATP\n", "");
    let good = log_file("good.log", "2024-03-05 09:00:05", "ATP", ("1", "2", "3"));
    let report = run_ingest(&mut store, &[bad, good]).unwrap();

    assert_eq!(report.skipped_parse, 1);
    assert_eq!(report.ingested, 1);
    let logs = store.read_sheet(&logs_sheet_name("ATP")).unwrap().unwrap();
    assert_eq!(logs.rows.len(), 1);
    assert_eq!(count_of(&store, "ATP", "ATP TESTER", "1"), Some(1));
}

#[test]
fn dedup_spans_all_test_types() {
    // An event logged under one test type blocks the same timestamp under
    // another type: the guard scans every logs sheet
    let mut store = InMemorySheetStore::new();
    run_ingest(&mut store, &[log_file("a.log", "2024-03-05 09:00:00", "ATP", ("1", "2", "3"))]).unwrap();
    let report =
        run_ingest(&mut store, &[log_file("b.log", "2024-03-05 09:00:00", "BIT", ("1", "2", "3"))]).unwrap();
    assert_eq!(report.skipped_duplicate, 1);
    assert!(store.read_sheet(&count_sheet_name("BIT")).unwrap().is_none());
}

#[test]
fn ledger_counts_equal_distinct_events_referencing_the_item() {
    let mut store = InMemorySheetStore::new();
    let files: Vec<RawLogFile> = (0..5)
        .map(|i| {
            log_file(
                &format!("f{i}.log"),
                &format!("2024-03-05 09:00:0{i}"),
                "ATP",
                ("100", "200", "300"),
            )
        })
        .collect();
    // Re-run the batch twice: only the first pass counts
    run_ingest(&mut store, &files).unwrap();
    run_ingest(&mut store, &files).unwrap();
    assert_eq!(count_of(&store, "ATP", "ATP COAX CABLE", "200"), Some(5));
}

#[test]
fn types_are_segregated_into_their_own_sheets() {
    let mut store = InMemorySheetStore::new();
    let files = vec![
        log_file("a.log", "2024-03-05 09:00:00", "atp", ("1", "2", "3")),
        log_file("b.log", "2024-03-05 10:00:00", "bit", ("1", "2", "3")),
    ];
    run_ingest(&mut store, &files).unwrap();
    assert!(store.sheet_exists(&count_sheet_name("ATP")).unwrap());
    assert!(store.sheet_exists(&count_sheet_name("BIT")).unwrap());
    // Same serial under different types is a different part number
    assert_eq!(count_of(&store, "ATP", "ATP TESTER", "1"), Some(1));
    assert_eq!(count_of(&store, "BIT", "BIT TESTER", "1"), Some(1));
}
