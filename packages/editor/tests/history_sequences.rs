//! Sequence tests for the snapshot history: arbitrary interleavings of
//! captures and head navigation against the documented invariants.

use xmledit_editor::{InsertPosition, UndoHistory, XmlDocument};

fn versioned_doc(version: usize) -> XmlDocument {
    let mut doc = XmlDocument::new("doc", None);
    doc.create_text(doc.root(), format!("v{version}"), InsertPosition::Append)
        .unwrap();
    doc
}

fn version_of(doc: &XmlDocument) -> String {
    let text = doc.children(doc.root()).unwrap()[0];
    doc.node(text).unwrap().value().unwrap().to_string()
}

fn assert_invariants(history: &UndoHistory) {
    assert!(history.len() <= history.capacity());
    match history.head() {
        Some(head) => assert!(head < history.len()),
        None => assert!(history.is_empty()),
    }
}

#[test]
fn test_length_bounded_for_any_capture_count() {
    for capacity in [1usize, 2, 5] {
        let mut history = UndoHistory::new(capacity);
        for i in 0..10 {
            history.capture(&versioned_doc(i));
            assert_invariants(&history);
            // After any sequence of captures the head sits on the last
            // snapshot.
            assert_eq!(history.head(), Some(history.len() - 1));
        }
        assert_eq!(history.len(), capacity);
    }
}

#[test]
fn test_capture_at_nonfinal_head_truncates() {
    let mut history = UndoHistory::new(10);
    for i in 0..3 {
        history.capture(&versioned_doc(i));
    }

    history.change_head(-1).unwrap();
    assert_eq!(history.head(), Some(1));

    // Capture at head=1 of 3 snapshots: the trailing snapshot is discarded
    // before the new one is appended.
    history.capture(&versioned_doc(9));
    assert_eq!(history.len(), 3);
    assert_eq!(history.head(), Some(2));

    // The discarded branch is unreachable; the new branch reads back.
    assert_eq!(version_of(&history.change_head(-1).unwrap()), "v1");
    assert_eq!(version_of(&history.change_head(1).unwrap()), "v9");
    assert!(history.change_head(1).is_none());
}

#[test]
fn test_boundary_navigation_is_idempotent() {
    let mut history = UndoHistory::new(10);
    for i in 0..2 {
        history.capture(&versioned_doc(i));
    }

    // Undo at head == 0 leaves state unchanged.
    history.change_head(-1).unwrap();
    let before = history.state();
    assert!(history.change_head(-1).is_none());
    assert_eq!(history.state(), before);

    // Redo at head == len-1 leaves state unchanged.
    history.change_head(1).unwrap();
    let before = history.state();
    assert!(history.change_head(1).is_none());
    assert_eq!(history.state(), before);
}

#[test]
fn test_multi_step_navigation() {
    let mut history = UndoHistory::new(10);
    for i in 0..5 {
        history.capture(&versioned_doc(i));
    }

    assert_eq!(version_of(&history.change_head(-3).unwrap()), "v1");
    assert_eq!(version_of(&history.change_head(2).unwrap()), "v3");
    assert!(history.change_head(-4).is_none());
    assert_eq!(history.head(), Some(3));
}

#[test]
fn test_interleaved_edits_and_navigation() {
    let mut live = versioned_doc(0);
    let mut history = UndoHistory::new(10);
    history.capture(&live);

    // Edit, capture, edit, capture.
    let text = live.children(live.root()).unwrap()[0];
    live.set_value(text, "v1").unwrap();
    history.capture(&live);
    live.set_value(text, "v2").unwrap();
    history.capture(&live);

    // Undo twice: back to the original content.
    live = history.change_head(-1).unwrap();
    live = history.change_head(-1).unwrap();
    assert_eq!(version_of(&live), "v0");

    // Edit from the restored state; redo history is gone.
    let text = live.children(live.root()).unwrap()[0];
    live.set_value(text, "v3").unwrap();
    history.capture(&live);
    assert!(history.change_head(1).is_none());
    assert_eq!(history.len(), 2);

    live = history.change_head(-1).unwrap();
    assert_eq!(version_of(&live), "v0");
    live = history.change_head(1).unwrap();
    assert_eq!(version_of(&live), "v3");
}

#[test]
fn test_eviction_shifts_head_with_snapshots() {
    let mut history = UndoHistory::new(3);
    for i in 0..6 {
        history.capture(&versioned_doc(i));
        assert_invariants(&history);
    }

    // Only the newest three survive.
    assert_eq!(version_of(&history.change_head(-2).unwrap()), "v3");
    assert_eq!(version_of(&history.change_head(1).unwrap()), "v4");
    assert_eq!(version_of(&history.change_head(1).unwrap()), "v5");
}

#[test]
fn test_stored_snapshots_are_immune_to_live_mutation() {
    let mut live = versioned_doc(0);
    let mut history = UndoHistory::new(10);
    history.capture(&live);

    let text = live.children(live.root()).unwrap()[0];
    live.set_value(text, "scribbled").unwrap();
    live.create_text(live.root(), "extra", InsertPosition::Append)
        .unwrap();

    let restored = history.change_head(0).unwrap();
    assert_eq!(version_of(&restored), "v0");
    assert_eq!(restored.children(restored.root()).unwrap().len(), 1);
}

#[test]
fn test_clear_resets_to_empty() {
    let mut history = UndoHistory::new(10);
    for i in 0..3 {
        history.capture(&versioned_doc(i));
    }

    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.head(), None);
    assert!(history.change_head(-1).is_none());
    assert_invariants(&history);
}
