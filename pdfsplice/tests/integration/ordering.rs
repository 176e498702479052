//! Integration tests for the merge order.

use pdfsplice::ordering::{OrderCommand, OrderingStore};
use pdfsplice::session::Session;
use rstest::rstest;

use crate::common::marked_pdf;

fn store(names: &[&str]) -> OrderingStore {
    let mut store = OrderingStore::new();
    store.reconcile(names.iter().copied());
    store
}

#[test]
fn test_reconcile_is_idempotent() {
    let mut once = store(&["a", "b", "c"]);
    let mut twice = once.clone();
    twice.reconcile(["a", "b", "c"]);
    assert_eq!(once, twice);

    once.reconcile(["c", "b", "a"]);
    assert_eq!(once.current_order(), ["a", "b", "c"]);
}

#[test]
fn test_reorder_survives_refresh() {
    let mut store = store(&["a", "b", "c"]);
    store.apply(OrderCommand::SetOrder(vec!["c".into(), "a".into(), "b".into()])).unwrap();

    store.reconcile(["a", "b", "c"]);
    assert_eq!(store.current_order(), ["c", "a", "b"]);

    store.reconcile(["a", "b", "c", "d"]);
    assert_eq!(store.current_order(), ["c", "a", "b", "d"]);

    store.reconcile(["b", "c", "d"]);
    assert_eq!(store.current_order(), ["c", "b", "d"]);
}

#[rstest]
#[case(OrderCommand::MoveUp(0))]
#[case(OrderCommand::MoveDown(3))]
fn test_boundary_moves_are_no_ops(#[case] command: OrderCommand) {
    let mut store = store(&["a", "b", "c", "d"]);
    store.apply(command).unwrap();
    assert_eq!(store.current_order(), ["a", "b", "c", "d"]);
}

#[rstest]
#[case(OrderCommand::MoveUp(2), 1, 2)]
#[case(OrderCommand::MoveDown(1), 1, 2)]
#[case(OrderCommand::MoveUp(3), 2, 3)]
#[case(OrderCommand::MoveDown(0), 0, 1)]
fn test_interior_moves_swap_exactly_two(
    #[case] command: OrderCommand,
    #[case] i: usize,
    #[case] j: usize,
) {
    let before = ["a", "b", "c", "d"];
    let mut store = store(&before);
    store.apply(command).unwrap();

    let after = store.current_order();
    let changed: Vec<usize> = (0..before.len()).filter(|&k| after[k] != before[k]).collect();
    assert_eq!(changed, [i, j]);
    assert_eq!(after[i], before[j]);
    assert_eq!(after[j], before[i]);
}

#[test]
fn test_session_order_drives_merge_inputs() {
    let mut session = Session::new();
    for name in ["x.pdf", "y.pdf", "z.pdf"] {
        session.upload(name, marked_pdf(name, 1)).unwrap();
    }
    session.apply(OrderCommand::Swap(0, 2)).unwrap();
    session.deselect("y.pdf").unwrap();

    let request = session.prepare(None, "out.PDF").unwrap();
    let names: Vec<&str> = request.sources.iter().map(|s| s.name()).collect();
    assert_eq!(names, ["z.pdf", "x.pdf"]);
    assert_eq!(request.file_name, "out.PDF");
}
