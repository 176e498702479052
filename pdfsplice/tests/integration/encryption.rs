//! Integration tests for password-protected output.

use pdfsplice::io::PdfReader;
use pdfsplice::merge::MergeEngine;
use pdfsplice::session::Session;
use pdfsplice::source::Source;
use pdfsplice::{MergeError, is_valid_password};
use rstest::rstest;

use crate::common::{marked_pdf, marked_source, page_markers};

fn two_file_session() -> Session {
    let mut session = Session::new();
    session.upload("A.pdf", marked_pdf("A", 1)).unwrap();
    session.upload("B.pdf", marked_pdf("B", 2)).unwrap();
    session
}

#[rstest]
#[case("", false)]
#[case("password1", false)]
#[case("PASSWORD", false)]
#[case("Password1", true)]
#[case("1A", true)]
#[case("Pass٣", true)]
fn test_password_rule(#[case] password: &str, #[case] valid: bool) {
    assert_eq!(is_valid_password(password), valid);
}

#[test]
fn test_weak_password_rejected_before_merge() {
    let session = two_file_session();

    let err = session
        .merge(&MergeEngine::new(), Some("password1"), "out")
        .unwrap_err();
    assert_eq!(err, MergeError::WeakPassword);
}

#[test]
fn test_strong_password_protects_output() {
    let session = two_file_session();

    let download = session
        .merge(&MergeEngine::new(), Some("Strong1"), "secret")
        .unwrap();
    assert!(download.merged.is_encrypted());
    assert_eq!(download.merged.statistics().total_pages, 3);

    let bytes = download.merged.bytes();
    let reader = PdfReader::new();

    let err = reader
        .load(&Source::new("secret.pdf", bytes.to_vec()))
        .unwrap_err();
    assert!(matches!(err, MergeError::CorruptOrProtectedInput { .. }));

    assert!(reader.authenticate("secret.pdf", bytes, "").is_err());
    assert!(reader.authenticate("secret.pdf", bytes, "Strong1").is_ok());
    assert!(reader.authenticate("secret.pdf", bytes, "Other9").is_err());
}

#[test]
fn test_password_does_not_change_page_order() {
    let session = two_file_session();
    let engine = MergeEngine::new();

    let open = session.merge(&engine, None, "open").unwrap();
    let locked = session.merge(&engine, Some("Strong1"), "locked").unwrap();

    assert_eq!(page_markers(open.merged.bytes()), ["A-1", "B-1", "B-2"]);
    assert_eq!(locked.merged.sources(), open.merged.sources());
}

#[test]
fn test_protected_output_is_rejected_as_input() {
    let a = marked_source("a.pdf", 1);
    let protected = MergeEngine::new().merge([&a], Some("Strong1")).unwrap();

    let locked = Source::new("locked.pdf", protected.into_bytes());
    let err = MergeEngine::new().merge([&a, &locked], None).unwrap_err();

    assert!(matches!(err, MergeError::CorruptOrProtectedInput { .. }));
    assert_eq!(err.source_name(), Some("locked.pdf"));
}

#[test]
fn test_empty_password_leaves_output_open() {
    let session = two_file_session();

    let download = session.merge(&MergeEngine::new(), Some(""), "open").unwrap();
    assert!(!download.merged.is_encrypted());

    let reopened = PdfReader::new()
        .load(&Source::new("open.pdf", download.merged.bytes().to_vec()))
        .unwrap();
    assert_eq!(reopened.page_count, 3);
}
