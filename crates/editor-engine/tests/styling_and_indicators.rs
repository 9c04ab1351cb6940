use editor_engine::messages::*;
use editor_engine::styles::INDIC_ROUNDBOX;
use editor_engine::{Engine, Reply};
use pretty_assertions::assert_eq;

fn engine_with(text: &str) -> Engine {
    let mut engine = Engine::new();
    engine.dispatch(SCI_SETTEXT, 0, text);
    engine
}

#[test]
fn test_styling_runs_and_end_styled() {
    let mut engine = engine_with("let x = 1;");
    engine.dispatch(SCI_STARTSTYLING, 0, 0);
    engine.dispatch(SCI_SETSTYLING, 3, 5);
    engine.dispatch(SCI_SETSTYLINGEX, 2, vec![7u8, 8]);
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 1, 0).as_int(), 5);
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 4, 0).as_int(), 8);
    assert_eq!(engine.dispatch(SCI_GETENDSTYLED, 0, 0).as_int(), 5);
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 100, 0).as_int(), 0);

    engine.dispatch(SCI_INSERTTEXT, 1, "XY");
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 1, 0).as_int(), 0);
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 3, 0).as_int(), 5);
    assert_eq!(engine.dispatch(SCI_GETENDSTYLED, 0, 0).as_int(), 1);
}

#[test]
fn test_styled_text_round_trip() {
    let mut engine = Engine::new();
    engine.dispatch(SCI_ADDSTYLEDTEXT, 0, vec![b'h', 3, b'i', 4]);
    assert_eq!(engine.text(), "hi");
    assert_eq!(
        engine.dispatch(SCI_GETSTYLEDTEXT, 0, 2),
        Reply::Bytes(vec![b'h', 3, b'i', 4])
    );
}

#[test]
fn test_style_mask_limits_bits() {
    let mut engine = engine_with("abcd");
    engine.dispatch(SCI_STARTSTYLING, 0, 0);
    engine.dispatch(SCI_SETSTYLING, 4, 0x11);
    engine.dispatch(SCI_STARTSTYLING, 0, 0x0F);
    engine.dispatch(SCI_SETSTYLING, 4, 0x02);
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 0, 0).as_int(), 0x12);
}

#[test]
fn test_indicator_fill_and_query() {
    let mut engine = engine_with("abcdefgh");
    engine.dispatch(SCI_SETINDICATORCURRENT, 2, 0);
    engine.dispatch(SCI_SETINDICATORVALUE, 7, 0);
    engine.dispatch(SCI_INDICATORFILLRANGE, 2, 3);

    assert_eq!(engine.dispatch(SCI_INDICATORVALUEAT, 2, 3).as_int(), 7);
    assert_eq!(engine.dispatch(SCI_INDICATORALLONFOR, 3, 0).as_int(), 1 << 2);
    assert_eq!(engine.dispatch(SCI_INDICATORSTART, 2, 3).as_int(), 2);
    assert_eq!(engine.dispatch(SCI_INDICATOREND, 2, 3).as_int(), 5);
    assert_eq!(engine.dispatch(SCI_INDICATORALLONFOR, 6, 0).as_int(), 0);

    engine.dispatch(SCI_INSERTTEXT, 0, "__");
    assert_eq!(engine.dispatch(SCI_INDICATORSTART, 2, 5).as_int(), 4);

    engine.dispatch(SCI_INDICATORCLEARRANGE, 0, 10);
    assert_eq!(engine.dispatch(SCI_INDICATORVALUEAT, 2, 5).as_int(), 0);
}

#[test]
fn test_indicator_index_out_of_range_is_ignored() {
    let mut engine = engine_with("abc");
    engine.dispatch(SCI_SETINDICATORCURRENT, 40, 0);
    assert_eq!(engine.dispatch(SCI_GETINDICATORCURRENT, 0, 0).as_int(), 0);
    engine.dispatch(SCI_INDICSETSTYLE, 40, INDIC_ROUNDBOX);
    assert_eq!(engine.dispatch(SCI_INDICGETSTYLE, 40, 0).as_int(), 0);
    engine.dispatch(SCI_INDICSETSTYLE, 5, INDIC_ROUNDBOX);
    assert_eq!(engine.dispatch(SCI_INDICGETSTYLE, 5, 0).as_int(), INDIC_ROUNDBOX as isize);
    assert_eq!(engine.dispatch(SCI_INDICATORVALUEAT, 40, 1).as_int(), 0);
}

#[test]
fn test_margin_text_and_styles() {
    let mut engine = engine_with("one\ntwo\nthree");
    engine.dispatch(SCI_MARGINSETTEXT, 1, "err");
    engine.dispatch(SCI_MARGINSETSTYLE, 1, 9);
    assert_eq!(engine.dispatch(SCI_MARGINGETTEXT, 1, 0).into_text(), "err");
    assert_eq!(engine.dispatch(SCI_MARGINGETSTYLE, 1, 0).as_int(), 9);

    engine.dispatch(SCI_INSERTTEXT, 0, "zero\n");
    assert_eq!(engine.dispatch(SCI_MARGINGETTEXT, 2, 0).into_text(), "err");
    assert_eq!(engine.dispatch(SCI_MARGINGETTEXT, 1, 0).into_text(), "");

    engine.dispatch(SCI_MARGINTEXTCLEARALL, 0, 0);
    assert_eq!(engine.dispatch(SCI_MARGINGETTEXT, 2, 0).into_text(), "");
}

#[test]
fn test_annotation_lines() {
    let mut engine = engine_with("one\ntwo");
    engine.dispatch(SCI_ANNOTATIONSETTEXT, 0, "first\nsecond");
    assert_eq!(engine.dispatch(SCI_ANNOTATIONGETLINES, 0, 0).as_int(), 2);
    engine.dispatch(SCI_ANNOTATIONSETSTYLES, 0, vec![1u8; 12]);
    assert_eq!(engine.dispatch(SCI_ANNOTATIONGETSTYLES, 0, 0).as_int(), 12);

    engine.dispatch(SCI_ANNOTATIONSETTEXT, 0, ());
    assert_eq!(engine.dispatch(SCI_ANNOTATIONGETLINES, 0, 0).as_int(), 0);

    engine.dispatch(SCI_ANNOTATIONSETVISIBLE, 2, 0);
    assert_eq!(engine.dispatch(SCI_ANNOTATIONGETVISIBLE, 0, 0).as_int(), 2);
}

#[test]
fn test_line_state() {
    let mut engine = engine_with("a\nb\nc");
    assert_eq!(engine.dispatch(SCI_SETLINESTATE, 2, 42).as_int(), 0);
    assert_eq!(engine.dispatch(SCI_SETLINESTATE, 2, 43).as_int(), 42);
    assert_eq!(engine.dispatch(SCI_GETLINESTATE, 2, 0).as_int(), 43);
    assert_eq!(engine.dispatch(SCI_GETMAXLINESTATE, 0, 0).as_int(), 3);
    assert_eq!(engine.dispatch(SCI_GETLINESTATE, 9, 0).as_int(), 0);
}

#[test]
fn test_char_classes_drive_whole_word_search() {
    let mut engine = engine_with("foo_bar foo");
    engine.dispatch(SCI_SETSEARCHFLAGS, 0x2, 0);
    engine.dispatch(SCI_TARGETWHOLEDOCUMENT, 0, 0);
    assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "foo").as_int(), 8);

    engine.dispatch(SCI_SETPUNCTUATIONCHARS, 0, "_");
    engine.dispatch(SCI_TARGETWHOLEDOCUMENT, 0, 0);
    assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "foo").as_int(), 0);
    assert!(engine.dispatch(SCI_GETPUNCTUATIONCHARS, 0, 0).into_text().contains('_'));
}
