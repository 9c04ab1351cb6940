use editor_engine::messages::*;
use editor_engine::{Engine, Reply};
use pretty_assertions::assert_eq;

#[test]
fn test_views_share_text_and_follow_each_other() {
    let mut first = Engine::new();
    first.dispatch(SCI_SETTEXT, 0, "hello world");
    let document = first.dispatch(SCI_GETDOCPOINTER, 0, 0).into_document();
    assert!(document.is_some());

    let mut second = Engine::new();
    second.dispatch(SCI_SETDOCPOINTER, 0, document);
    assert_eq!(second.text(), "hello world");

    second.dispatch(SCI_SETSEL, 6, 11);
    first.dispatch(SCI_INSERTTEXT, 0, "big ");

    assert_eq!(second.dispatch(SCI_GETSELECTIONSTART, 0, 0).as_int(), 10);
    assert_eq!(second.dispatch(SCI_GETSELTEXT, 0, 0).into_text(), "world");

    second.dispatch(SCI_UNDO, 0, 0);
    assert_eq!(first.text(), "hello world");
}

#[test]
fn test_line_count_changes_reach_other_view() {
    let mut first = Engine::new();
    let mut second = Engine::with_document(first.document().clone());
    first.dispatch(SCI_SETTEXT, 0, "a\nb\nc");
    assert_eq!(second.dispatch(SCI_GETLINECOUNT, 0, 0).as_int(), 3);
    assert_eq!(second.contraction().lines_in_doc(), 3);

    second.dispatch(SCI_DELETERANGE, 0, 2);
    assert_eq!(first.dispatch(SCI_GETLINECOUNT, 0, 0).as_int(), 2);
    assert_eq!(first.contraction().lines_in_doc(), 2);
}

#[test]
fn test_attach_and_detach_count_references() {
    let first = Engine::new();
    let document = first.document().clone();
    assert_eq!(document.borrow().ref_count(), 1);

    let mut second = Engine::new();
    second.dispatch(SCI_SETDOCPOINTER, 0, document.clone());
    assert_eq!(document.borrow().ref_count(), 2);
    assert_eq!(document.borrow().view_count(), 2);

    second.dispatch(SCI_SETDOCPOINTER, 0, ());
    assert_eq!(document.borrow().ref_count(), 1);
    assert!(!second.document().ptr_eq(&document));

    drop(first);
    assert_eq!(document.borrow().ref_count(), 0);
}

#[test]
fn test_created_document_is_owned_by_caller() {
    let mut engine = Engine::new();
    let document = engine
        .dispatch(SCI_CREATEDOCUMENT, 0, 0)
        .into_document()
        .expect("new document");
    assert_eq!(document.borrow().ref_count(), 1);

    engine.dispatch(SCI_SETDOCPOINTER, 0, document.clone());
    assert_eq!(document.borrow().ref_count(), 2);
    engine.dispatch(SCI_RELEASEDOCUMENT, 0, document.clone());
    assert_eq!(document.borrow().ref_count(), 1);

    engine.dispatch(SCI_ADDREFDOCUMENT, 0, document.clone());
    assert_eq!(document.borrow().ref_count(), 2);
    drop(engine);
    assert_eq!(document.borrow().ref_count(), 1);
}

#[test]
fn test_switching_document_resets_view_state() {
    let mut engine = Engine::new();
    engine.dispatch(SCI_SETTEXT, 0, "some text here");
    engine.dispatch(SCI_SETSEL, 2, 6);
    engine.dispatch(SCI_SETTARGETRANGE, 1, 4);

    engine.dispatch(SCI_SETDOCPOINTER, 0, ());
    assert_eq!(engine.text(), "");
    assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 0);
    assert_eq!(engine.target(), (0, 0));
}

#[test]
fn test_same_document_pointer_is_a_no_op() {
    let mut engine = Engine::new();
    engine.dispatch(SCI_SETTEXT, 0, "keep");
    engine.dispatch(SCI_GOTOPOS, 2, 0);
    let document = engine.document().clone();
    engine.dispatch(SCI_SETDOCPOINTER, 0, document.clone());
    assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 2);
    assert_eq!(document.borrow().ref_count(), 1);
    assert_eq!(
        engine.dispatch(SCI_GETDOCPOINTER, 0, 0),
        Reply::Document(Some(document))
    );
}
