//! Integration tests for error handling and edge cases.

use pdfsplice::config::{Config, MergeOptions, OverwriteMode};
use pdfsplice::error::{MergeError, OrderingError, PdfSpliceError};
use pdfsplice::merge::MergeEngine;
use pdfsplice::session::Session;
use pdfsplice::source::Source;
use pdfsplice::utils::collect_paths_for_patterns;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{marked_pdf, marked_source, page_markers};

fn test_config(inputs: Vec<PathBuf>, output: PathBuf) -> Config {
    Config {
        inputs,
        output,
        order: None,
        exclude: Vec::new(),
        commands: Vec::new(),
        password: None,
        merge: MergeOptions::default(),
        overwrite_mode: OverwriteMode::Force,
        dry_run: false,
        verbose: false,
        quiet: true,
        json: false,
    }
}

#[test]
fn test_error_empty_selection() {
    let session = Session::new();

    let err = session.merge(&MergeEngine::new(), None, "out").unwrap_err();
    assert_eq!(err, MergeError::EmptySelection);
    assert_eq!(
        err.to_string(),
        "No files selected: at least one file is required to merge"
    );
}

#[test]
fn test_error_everything_deselected() {
    let mut session = Session::new();
    session.upload("a.pdf", marked_pdf("a", 1)).unwrap();
    session.deselect("a.pdf").unwrap();

    let err = session.merge(&MergeEngine::new(), Some("Strong1"), "out").unwrap_err();
    assert_eq!(err, MergeError::EmptySelection);
}

#[test]
fn test_error_corrupt_input_is_named() {
    let mut session = Session::new();
    session.upload("good.pdf", marked_pdf("good", 1)).unwrap();
    session.upload("bad.pdf", b"%PDF-1.4 garbage".to_vec()).unwrap();

    let err = session.merge(&MergeEngine::new(), None, "out").unwrap_err();
    assert!(matches!(err, MergeError::CorruptOrProtectedInput { .. }));
    assert_eq!(err.source_name(), Some("bad.pdf"));
    assert!(err.to_string().contains("bad.pdf"));
}

#[test]
fn test_session_survives_failed_merge() {
    let mut session = Session::new();
    session.upload("good.pdf", marked_pdf("good", 2)).unwrap();
    session.upload("bad.pdf", b"not a pdf".to_vec()).unwrap();
    let engine = MergeEngine::new();

    assert!(session.merge(&engine, None, "out").is_err());
    assert_eq!(session.order(), ["good.pdf", "bad.pdf"]);

    session.deselect("bad.pdf").unwrap();
    let download = session.merge(&engine, None, "out").unwrap();
    assert_eq!(page_markers(download.merged.bytes()), ["good-1", "good-2"]);
}

#[test]
fn test_error_pageless_input() {
    let empty = Source::new("blank.pdf", marked_pdf("blank", 0));
    let a = marked_source("a.pdf", 1);

    let err = MergeEngine::new().merge([&a, &empty], None).unwrap_err();
    assert_eq!(err.source_name(), Some("blank.pdf"));
}

#[test]
fn test_error_out_of_range_move() {
    let mut session = Session::new();
    session.upload("a.pdf", marked_pdf("a", 1)).unwrap();

    let err = session
        .apply(pdfsplice::OrderCommand::MoveDown(1))
        .unwrap_err();
    assert!(matches!(
        err,
        PdfSpliceError::Ordering(OrderingError::IndexOutOfRange { index: 1, len: 1 })
    ));
}

#[test]
fn test_error_exit_codes() {
    let corrupt: PdfSpliceError = MergeError::corrupt_input("bad.pdf", "garbage").into();
    let empty: PdfSpliceError = MergeError::EmptySelection.into();
    let missing = PdfSpliceError::file_not_found(PathBuf::from("missing.pdf"));

    assert_eq!(corrupt.exit_code(), 3);
    assert_eq!(missing.exit_code(), 2);
    assert_ne!(empty.exit_code(), 0);
}

#[test]
fn test_error_nonexistent_input() {
    let result = collect_paths_for_patterns(["/nonexistent/file.pdf"]);
    assert!(matches!(result, Err(PdfSpliceError::FileNotFound { .. })));
}

#[test]
fn test_error_empty_input_list() {
    let config = test_config(vec![], PathBuf::from("out.pdf"));
    assert!(config.validate().is_err());
}

#[test]
fn test_error_output_is_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("a.pdf");

    let config = test_config(vec![input.clone()], input);
    assert!(config.validate().is_err());
}
