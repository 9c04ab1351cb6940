use editor_engine::Engine;
use editor_engine::messages::*;
use editor_engine::selection::{
    SC_SEL_RECTANGLE, SC_SEL_STREAM, SC_SEL_THIN, SCVS_RECTANGULARSELECTION,
};
use pretty_assertions::assert_eq;

fn engine_with(text: &str) -> Engine {
    let mut engine = Engine::new();
    engine.dispatch(SCI_SETTEXT, 0, text);
    engine
}

#[test]
fn test_rectangular_typing_replaces_each_line() {
    let mut engine = engine_with("abc\ndef\nghi");
    engine.dispatch(SCI_SETRECTANGULARSELECTIONANCHOR, 1, 0);
    engine.dispatch(SCI_SETRECTANGULARSELECTIONCARET, 10, 0);
    assert_eq!(engine.dispatch(SCI_SELECTIONISRECTANGLE, 0, 0).as_int(), 1);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 3);
    assert_eq!(engine.dispatch(SCI_GETSELTEXT, 0, 0).into_text(), "b\ne\nh\n");

    engine.type_char('X');
    assert_eq!(engine.text(), "aXc\ndXf\ngXi");

    engine.dispatch(SCI_UNDO, 0, 0);
    assert_eq!(engine.text(), "abc\ndef\nghi");
}

#[test]
fn test_virtual_space_is_filled_when_typing() {
    let mut engine = engine_with("ab\nabcd\nab");
    engine.dispatch(SCI_SETVIRTUALSPACEOPTIONS, SCVS_RECTANGULARSELECTION, 0);
    engine.dispatch(SCI_SETRECTANGULARSELECTIONANCHOR, 2, 0);
    engine.dispatch(SCI_SETRECTANGULARSELECTIONANCHORVIRTUALSPACE, 2, 0);
    engine.dispatch(SCI_SETRECTANGULARSELECTIONCARET, 10, 0);
    engine.dispatch(SCI_SETRECTANGULARSELECTIONCARETVIRTUALSPACE, 2, 0);

    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 3);
    assert_eq!(
        engine
            .dispatch(SCI_GETSELECTIONNCARETVIRTUALSPACE, 0, 0)
            .as_int(),
        2
    );
    assert_eq!(
        engine
            .dispatch(SCI_GETSELECTIONNCARETVIRTUALSPACE, 1, 0)
            .as_int(),
        0
    );

    engine.type_char('X');
    assert_eq!(engine.text(), "ab  X\nabcdX\nab  X");
}

#[test]
fn test_additional_selection_typing() {
    let mut engine = engine_with("abcdef");
    engine.dispatch(SCI_SETADDITIONALSELECTIONTYPING, 1, 0);
    engine.dispatch(SCI_SETSELECTION, 1, 1);
    engine.dispatch(SCI_ADDSELECTION, 4, 4);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 2);
    assert_eq!(engine.dispatch(SCI_GETMAINSELECTION, 0, 0).as_int(), 1);

    engine.type_char('Z');
    assert_eq!(engine.text(), "aZbcdZef");
    assert_eq!(engine.dispatch(SCI_GETSELECTIONNCARET, 0, 0).as_int(), 2);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONNCARET, 1, 0).as_int(), 6);
}

#[test]
fn test_overlapping_selections_merge() {
    let mut engine = engine_with("abcdefgh");
    engine.dispatch(SCI_SETSELECTION, 4, 1);
    engine.dispatch(SCI_ADDSELECTION, 6, 3);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 1);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONSTART, 0, 0).as_int(), 1);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONEND, 0, 0).as_int(), 6);
}

#[test]
fn test_thin_mode_has_no_width() {
    let mut engine = engine_with("abcd\nefgh");
    engine.dispatch(SCI_SETSEL, 1, 8);
    engine.dispatch(SCI_SETSELECTIONMODE, SC_SEL_THIN, 0);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 2);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONEMPTY, 0, 0).as_int(), 1);

    engine.dispatch(SCI_SETSELECTIONMODE, SC_SEL_STREAM, 0);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONMODE, 0, 0).as_int(), SC_SEL_STREAM);
}

#[test]
fn test_set_selection_keeps_mode() {
    let mut engine = engine_with("abcd\nefgh\nijkl");
    engine.dispatch(SCI_SETSEL, 1, 12);
    engine.dispatch(SCI_SETSELECTIONMODE, SC_SEL_RECTANGLE, 0);
    engine.dispatch(SCI_SETSELECTION, 7, 6);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONMODE, 0, 0).as_int(), SC_SEL_RECTANGLE);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 1);
    assert_eq!(engine.dispatch(SCI_GETRECTANGULARSELECTIONCARET, 0, 0).as_int(), 7);
    assert_eq!(engine.dispatch(SCI_GETRECTANGULARSELECTIONANCHOR, 0, 0).as_int(), 6);

    engine.dispatch(SCI_SETSELECTIONMODE, SC_SEL_STREAM, 0);
    engine.dispatch(SCI_SETSELECTION, 3, 1);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONMODE, 0, 0).as_int(), SC_SEL_STREAM);
}

#[test]
fn test_clear_selections_leaves_caret_at_start() {
    let mut engine = engine_with("abcdef");
    engine.dispatch(SCI_SETSELECTION, 2, 2);
    engine.dispatch(SCI_ADDSELECTION, 5, 5);
    engine.dispatch(SCI_CLEARSELECTIONS, 0, 0);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 1);
    assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 0);
}

#[test]
fn test_rotate_and_swap() {
    let mut engine = engine_with("abcdefgh");
    engine.dispatch(SCI_SETSELECTION, 2, 1);
    engine.dispatch(SCI_ADDSELECTION, 6, 5);
    engine.dispatch(SCI_ROTATESELECTION, 0, 0);
    assert_eq!(engine.dispatch(SCI_GETMAINSELECTION, 0, 0).as_int(), 0);
    engine.dispatch(SCI_SWAPMAINANCHORCARET, 0, 0);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONNCARET, 0, 0).as_int(), 1);
    assert_eq!(engine.dispatch(SCI_GETSELECTIONNANCHOR, 0, 0).as_int(), 2);
}

#[test]
fn test_delete_back_in_virtual_space_moves_left() {
    let mut engine = engine_with("ab");
    engine.dispatch(SCI_SETSELECTION, 2, 2);
    engine.dispatch(SCI_SETSELECTIONNCARETVIRTUALSPACE, 0, 3);
    engine.dispatch(SCI_SETSELECTIONNANCHORVIRTUALSPACE, 0, 3);
    engine.dispatch(SCI_DELETEBACK, 0, 0);
    assert_eq!(engine.text(), "ab");
    assert_eq!(
        engine
            .dispatch(SCI_GETSELECTIONNCARETVIRTUALSPACE, 0, 0)
            .as_int(),
        2
    );
    engine.type_char('!');
    assert_eq!(engine.text(), "ab  !");
}
