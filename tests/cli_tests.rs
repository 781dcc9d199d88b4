//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn cleans_and_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "a,b\n1,\n1,\n2,3\n");
    let output = dir.path().join("out.csv");

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&input)
        .arg("--clean")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate row(s) removed"))
        .stdout(predicate::str::contains("Wrote 2 row(s), 2 column(s)"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "a,b\n1,Missing\n2,3\n");
}

#[test]
fn default_output_is_cleaned_data_with_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "a,b\n1,2\n");

    Command::cargo_bin("datatidy")
        .unwrap()
        .current_dir(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("cleaned_data.csv"))
        .stdout(predicate::str::contains("text/csv"));

    assert!(dir.path().join("cleaned_data.csv").exists());
}

#[test]
fn excel_export_writes_zip_container() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "a,b\n1,2\n");
    let output = dir.path().join("out.xlsx");

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&input)
        .arg("--format")
        .arg("excel")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[test]
fn column_selection_keeps_original_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "a,b,c\n1,2,3\n");
    let output = dir.path().join("out.csv");

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&input)
        .arg("--columns")
        .arg("c,a")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "a,c\n1,3\n");
}

#[test]
fn unsupported_format_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "a,b\n1,2\n");
    let output = dir.path().join("out.pdf");

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&input)
        .arg("--format")
        .arg("PDF")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported export format: PDF"));

    assert!(!output.exists());
}

#[test]
fn unknown_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "a,b\n1,2\n");

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&input)
        .arg("--columns")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column: nope"));
}

#[test]
fn garbage_input_fails_with_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.csv");
    std::fs::write(&path, [0xffu8, 0x00, 0x9c, 0x80]).unwrap();

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input stream"));
}

#[test]
fn preview_and_stats_render() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "input.csv", "id,name\n1,alice\n2,bob\n3,carol\n");
    let output = dir.path().join("out.csv");

    Command::cargo_bin("datatidy")
        .unwrap()
        .arg(&input)
        .arg("--preview")
        .arg("2")
        .arg("--stats")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("(2 of 3 rows)"))
        .stdout(predicate::str::contains("Numeric columns: id"));
}
