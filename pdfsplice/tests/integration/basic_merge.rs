//! Integration tests for ordered merging.

use pdfsplice::config::{CompressionLevel, MergeOptions};
use pdfsplice::io::PdfWriter;
use pdfsplice::merge::MergeEngine;
use pdfsplice::session::Session;
use pdfsplice::source::Source;
use pdfsplice::OrderCommand;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{marked_pdf, marked_source, page_markers};

fn session_of(sources: &[(&str, usize)]) -> Session {
    let mut session = Session::new();
    for (name, pages) in sources {
        let label = name.trim_end_matches(".pdf");
        session.upload(*name, marked_pdf(label, *pages)).unwrap();
    }
    session
}

#[test]
fn test_merge_in_upload_order() {
    let session = session_of(&[("A.pdf", 1), ("B.pdf", 2)]);

    let download = session.merge(&MergeEngine::new(), None, "out").unwrap();

    assert_eq!(download.file_name, "out.pdf");
    assert_eq!(download.mime_type, "application/pdf");
    assert_eq!(download.merged.statistics().total_pages, 3);
    assert_eq!(page_markers(download.merged.bytes()), ["A-1", "B-1", "B-2"]);
}

#[test]
fn test_merge_after_reorder() {
    let mut session = session_of(&[("A.pdf", 1), ("B.pdf", 2)]);
    session.apply(OrderCommand::MoveUp(1)).unwrap();

    let download = session.merge(&MergeEngine::new(), None, "").unwrap();

    assert_eq!(download.file_name, "merged.pdf");
    assert_eq!(page_markers(download.merged.bytes()), ["B-1", "B-2", "A-1"]);
}

#[rstest]
#[case(&[1])]
#[case(&[1, 1])]
#[case(&[3, 1, 2])]
#[case(&[5, 4])]
fn test_page_count_is_sum_of_inputs(#[case] page_counts: &[usize]) {
    let sources: Vec<Source> = page_counts
        .iter()
        .enumerate()
        .map(|(i, pages)| marked_source(&format!("s{i}.pdf"), *pages))
        .collect();

    let merged = MergeEngine::new().merge(&sources, None).unwrap();

    let expected: Vec<String> = page_counts
        .iter()
        .enumerate()
        .flat_map(|(i, pages)| (1..=*pages).map(move |n| format!("s{i}-{n}")))
        .collect();
    assert_eq!(merged.statistics().total_pages, page_counts.iter().sum::<usize>());
    assert_eq!(page_markers(merged.bytes()), expected);
}

#[test]
fn test_merge_is_associative() {
    let a = marked_source("a.pdf", 2);
    let b = marked_source("b.pdf", 1);
    let c = marked_source("c.pdf", 3);
    let engine = MergeEngine::new();

    let ab = Source::new("ab.pdf", engine.merge([&a, &b], None).unwrap().into_bytes());
    let left = engine.merge([&ab, &c], None).unwrap();

    let bc = Source::new("bc.pdf", engine.merge([&b, &c], None).unwrap().into_bytes());
    let right = engine.merge([&a, &bc], None).unwrap();

    let flat = engine.merge([&a, &b, &c], None).unwrap();

    assert_eq!(page_markers(left.bytes()), page_markers(right.bytes()));
    assert_eq!(page_markers(left.bytes()), page_markers(flat.bytes()));
}

#[test]
fn test_merge_is_order_sensitive() {
    let a = marked_source("a.pdf", 1);
    let b = marked_source("b.pdf", 1);
    let engine = MergeEngine::new();

    let ab = engine.merge([&a, &b], None).unwrap();
    let ba = engine.merge([&b, &a], None).unwrap();

    assert_ne!(page_markers(ab.bytes()), page_markers(ba.bytes()));
}

#[test]
fn test_same_source_twice() {
    let a = marked_source("a.pdf", 2);

    let merged = MergeEngine::new().merge([&a, &a], None).unwrap();
    assert_eq!(page_markers(merged.bytes()), ["a-1", "a-2", "a-1", "a-2"]);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_compression_keeps_pages(#[case] compression: CompressionLevel) {
    let a = marked_source("a.pdf", 2);
    let b = marked_source("b.pdf", 2);

    let engine = MergeEngine::with_options(MergeOptions::with_compression(compression));
    let merged = engine.merge([&a, &b], None).unwrap();

    assert_eq!(page_markers(merged.bytes()), ["a-1", "a-2", "b-1", "b-2"]);
}

#[test]
fn test_download_saved_to_disk() {
    let temp_dir = TempDir::new().unwrap();
    let session = session_of(&[("A.pdf", 2), ("B.pdf", 1)]);

    let download = session.merge(&MergeEngine::new(), None, "report").unwrap();
    let output = temp_dir.path().join(&download.file_name);
    let stats = PdfWriter::new().save(download.merged.bytes(), &output).unwrap();

    assert_eq!(stats.file_size, download.merged.bytes().len() as u64);
    let written = std::fs::read(&output).unwrap();
    assert_eq!(page_markers(&written), ["A-1", "A-2", "B-1"]);
}
