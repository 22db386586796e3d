// tests/input_feeding.rs

//! Feeding the child's stdin from input files.

mod common;

use std::fs;

use buildpipe::{FailureKind, RunOptions};

#[test]
fn input_files_are_fed_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let session = common::session_at(dir.path());

    let first = dir.path().join("first.in");
    let second = dir.path().join("second.in");
    fs::write(&first, "one\n").unwrap();
    fs::write(&second, "two\n").unwrap();

    let outcome = session
        .run_with(
            "libfoo",
            "gen",
            &["cat"],
            RunOptions::new().input_file(&first).input_file(&second),
        )
        .unwrap();

    let log = fs::read_to_string(&outcome.log_path).unwrap();
    assert!(log.ends_with("one\ntwo\n"));
}

#[test]
fn input_reaches_a_consumer_through_the_child() {
    let dir = tempfile::tempdir().unwrap();
    let session = common::session_at(dir.path());

    let input = dir.path().join("answers.in");
    fs::write(&input, "yes\nyes\n").unwrap();

    let mut seen = Vec::new();
    session
        .run_with(
            "libfoo",
            "gen",
            &["cat"],
            RunOptions::new()
                .input_file(&input)
                .on_line(|line| seen.push(line.to_string())),
        )
        .unwrap();

    assert_eq!(seen, ["yes", "yes"]);
}

#[test]
fn missing_input_file_is_an_input_failure() {
    let dir = tempfile::tempdir().unwrap();
    let session = common::session_at(dir.path());

    let err = session
        .run_with(
            "libfoo",
            "gen",
            &["cat"],
            RunOptions::new().input_file(dir.path().join("no-such.in")),
        )
        .unwrap_err();

    assert!(matches!(err.kind, FailureKind::Input(_)));
    assert_eq!(err.code(), libc::ENOENT);
}
