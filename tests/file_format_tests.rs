use ecglabel::doctest_utils::create_test_recording;
use ecglabel::{
    derive_table, read_label_table, read_recording, write_label_table, LabelError, LabelTable,
    SegmentLabel,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_recording_keeps_timestamps_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("s01_1_klud.csv");
    fs::write(&path, "2024-03-01 10:00:00.000;0.125\r\n2024-03-01 10:00:00.002;-0.5\r\n").unwrap();

    let recording = read_recording(&path).unwrap();
    assert_eq!(recording.len(), 2);
    assert_eq!(recording.samples()[1].timestamp, "2024-03-01 10:00:00.002");
    assert_eq!(recording.samples()[1].value, -0.5);
}

#[test]
fn test_recording_with_only_blank_lines_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blank.csv");
    fs::write(&path, "\n\n   \n").unwrap();

    assert!(matches!(read_recording(&path), Err(LabelError::InputEmpty(_))));
}

#[test]
fn test_recording_with_comma_delimiter_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("comma.csv");
    fs::write(&path, "0,1.0\n1,2.0\n").unwrap();

    match read_recording(&path) {
        Err(LabelError::InputMalformed { line, reason }) => {
            assert_eq!(line, 1);
            assert!(reason.contains("2 fields"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_recording_with_invalid_utf8_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("s01_1_klud.csv");
    fs::write(&path, b"0;1.0\n1;\xff\xfe\n").unwrap();

    let err = read_recording(&path).unwrap_err();
    assert!(matches!(err, LabelError::InputMalformed { line: 2, .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_label_file_with_invalid_utf8_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("labels.csv");
    fs::write(&path, b"start;end;activity;artifact;electrode\n0;10;0;\xff;1\n").unwrap();

    let err = read_label_table(&path).unwrap_err();
    assert!(matches!(err, LabelError::LabelFileMalformed { line: 2, .. }));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_out_of_range_float_cell_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("labels.csv");
    fs::write(&path, "start;end;activity;artifact;electrode\n0;10;0;1e20;1\n").unwrap();

    assert!(matches!(
        read_label_table(&path),
        Err(LabelError::LabelFileMalformed { line: 2, .. })
    ));
}

#[test]
fn test_generated_recording_loads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/dir/s01_1_klud.csv");
    create_test_recording(&path, 1_234).unwrap();

    let recording = read_recording(&path).unwrap();
    assert_eq!(recording.len(), 1_234);
    assert!(recording.values().all(|v| v.is_finite()));
}

#[test]
fn test_label_table_file_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let recording_path = temp_dir.path().join("s05_2_ruky.csv");
    let label_path = temp_dir.path().join("labels.csv");
    create_test_recording(&recording_path, 4_500).unwrap();

    let recording = read_recording(&recording_path).unwrap();
    let table = derive_table(&recording, "s05_2_ruky.csv", 500, 2).unwrap();
    assert_eq!(table.len(), 4);

    write_label_table(&label_path, &table).unwrap();
    let loaded = read_label_table(&label_path).unwrap();
    assert_eq!(loaded, table);

    let content = fs::read_to_string(&label_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "start;end;activity;artifact;electrode");
    assert_eq!(lines[1], "0;1000;1;2;2");
    assert_eq!(lines[4], "3000;4000;1;2;2");
}

#[test]
fn test_write_overwrites_previous_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("labels.csv");
    let long = LabelTable::from_rows(
        (0..5)
            .map(|i| SegmentLabel { start: i * 10, end: i * 10 + 10, activity: 0, artifact: Some(1), electrode: 1 })
            .collect(),
    );
    let short = LabelTable::from_rows(long.rows()[..2].to_vec());

    write_label_table(&path, &long).unwrap();
    write_label_table(&path, &short).unwrap();
    assert_eq!(read_label_table(&path).unwrap().len(), 2);
}

#[test]
fn test_write_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing/labels.csv");

    assert!(matches!(
        write_label_table(&path, &LabelTable::default()),
        Err(LabelError::Io(_))
    ));
}

#[test]
fn test_malformed_label_file_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("labels.csv");
    fs::write(&path, "start;end;activity;artifact;electrode\n0;10;0;1;1\n10;20;0;1\n").unwrap();

    let err = read_label_table(&path).unwrap_err();
    assert!(matches!(err, LabelError::LabelFileMalformed { line: 3, .. }));
    assert_eq!(err.exit_code(), 6);
}
