use std::cell::RefCell;
use std::rc::Rc;

use editor_engine::delta::{SC_MOD_DELETETEXT, SC_MOD_INSERTTEXT, SC_PERFORMED_UNDO};
use editor_engine::idle::{SC_IDLESTYLING_ALL, TICK_MS};
use editor_engine::messages::*;
use editor_engine::notify::SC_UPDATE_SELECTION;
use editor_engine::{
    Engine, HostEvent, Lexer, Notification, NotificationKind, Param, Styler, Surface,
};
use pretty_assertions::assert_eq;

type Log = Rc<RefCell<Vec<Notification>>>;

fn recording_engine(text: &str) -> (Engine, Log) {
    let mut engine = Engine::new();
    engine.dispatch(SCI_SETTEXT, 0, text);
    let log = Log::default();
    let sink = Rc::clone(&log);
    engine.subscribe(move |n| sink.borrow_mut().push(n.clone()));
    (engine, log)
}

fn kinds(log: &Log) -> Vec<NotificationKind> {
    log.borrow().iter().map(|n| n.kind).collect()
}

#[derive(Clone, Default)]
struct RecordingSurface {
    idle: Rc<RefCell<Vec<bool>>>,
    repaints: Rc<RefCell<usize>>,
}

impl Surface for RecordingSurface {
    fn invalidate_lines(&mut self, _first: usize, _last: usize) {
        *self.repaints.borrow_mut() += 1;
    }

    fn invalidate_all(&mut self) {
        *self.repaints.borrow_mut() += 1;
    }

    fn set_idle(&mut self, on: bool) {
        self.idle.borrow_mut().push(on);
    }
}

/// Styles every character with style 1.
struct FlatLexer;

impl Lexer for FlatLexer {
    fn colourise(&mut self, styler: &mut Styler<'_>, start: usize, end: usize) {
        styler.start(start);
        styler.set(end - start, 1);
    }
}

#[test]
fn test_macro_record_reports_messages() {
    let (mut engine, log) = recording_engine("");
    engine.dispatch(SCI_STARTRECORD, 0, 0);
    engine.dispatch(SCI_INSERTTEXT, 0, "x");
    engine.dispatch(SCI_STOPRECORD, 0, 0);
    engine.dispatch(SCI_INSERTTEXT, 0, "y");

    let log = log.borrow();
    let recorded: Vec<_> = log
        .iter()
        .filter(|n| n.kind == NotificationKind::MacroRecord)
        .collect();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].message, SCI_INSERTTEXT);
    assert_eq!(recorded[0].w_param, Param::Int(0));
    assert_eq!(recorded[0].l_param, Param::Text("x".to_string()));
}

#[test]
fn test_modified_describes_insert_and_undo() {
    let (mut engine, log) = recording_engine("abc");
    engine.dispatch(SCI_INSERTTEXT, 1, "X\n");

    let inserted = log
        .borrow()
        .iter()
        .find(|n| n.kind == NotificationKind::Modified)
        .cloned()
        .expect("modified");
    assert!(inserted.modification_type & SC_MOD_INSERTTEXT != 0);
    assert_eq!(inserted.position, 1);
    assert_eq!(inserted.length, 2);
    assert_eq!(inserted.lines_added, 1);
    assert_eq!(inserted.text.as_deref(), Some("X\n"));

    log.borrow_mut().clear();
    engine.dispatch(SCI_UNDO, 0, 0);
    let undone = log
        .borrow()
        .iter()
        .find(|n| n.kind == NotificationKind::Modified)
        .cloned()
        .expect("modified");
    assert!(undone.modification_type & SC_MOD_DELETETEXT != 0);
    assert!(undone.modification_type & SC_PERFORMED_UNDO != 0);
    assert_eq!(undone.lines_added, -1);
}

#[test]
fn test_mod_event_mask_filters_modified() {
    let (mut engine, log) = recording_engine("abc");
    engine.dispatch(SCI_SETMODEVENTMASK, SC_MOD_DELETETEXT, 0);
    engine.dispatch(SCI_INSERTTEXT, 0, "z");
    assert!(!kinds(&log).contains(&NotificationKind::Modified));

    engine.dispatch(SCI_DELETERANGE, 0, 1);
    assert!(kinds(&log).contains(&NotificationKind::Modified));
}

#[test]
fn test_save_point_notifications() {
    let (mut engine, log) = recording_engine("");
    engine.dispatch(SCI_SETSAVEPOINT, 0, 0);
    engine.dispatch(SCI_APPENDTEXT, 1, "a");
    assert!(kinds(&log).contains(&NotificationKind::SavePointLeft));

    log.borrow_mut().clear();
    engine.dispatch(SCI_UNDO, 0, 0);
    assert!(kinds(&log).contains(&NotificationKind::SavePointReached));
}

#[test]
fn test_read_only_edit_reports_attempt() {
    let (mut engine, log) = recording_engine("locked");
    engine.dispatch(SCI_SETREADONLY, 1, 0);
    engine.dispatch(SCI_INSERTTEXT, 0, "x");
    assert_eq!(engine.text(), "locked");
    assert!(kinds(&log).contains(&NotificationKind::ModifyAttemptReadOnly));
    assert!(!kinds(&log).contains(&NotificationKind::Modified));
}

#[test]
fn test_zoom_is_clamped_and_reported_once() {
    let (mut engine, log) = recording_engine("");
    engine.dispatch(SCI_SETZOOM, 3, 0);
    engine.dispatch(SCI_SETZOOM, 3, 0);
    let zooms = kinds(&log)
        .into_iter()
        .filter(|k| *k == NotificationKind::Zoom)
        .count();
    assert_eq!(zooms, 1);

    engine.dispatch(SCI_SETZOOM, 99, 0);
    assert_eq!(engine.dispatch(SCI_GETZOOM, 0, 0).as_int(), 20);
}

#[test]
fn test_focus_notifications() {
    let (mut engine, log) = recording_engine("");
    engine.dispatch(SCI_SETFOCUS, 1, 0);
    engine.handle_event(HostEvent::Focus(false));
    assert_eq!(engine.dispatch(SCI_GETFOCUS, 0, 0).as_int(), 0);
    let focus: Vec<_> = kinds(&log)
        .into_iter()
        .filter(|k| matches!(k, NotificationKind::FocusIn | NotificationKind::FocusOut))
        .collect();
    assert_eq!(focus, vec![NotificationKind::FocusIn, NotificationKind::FocusOut]);
}

#[test]
fn test_update_ui_reports_selection_change() {
    let (mut engine, log) = recording_engine("abcdef");
    engine.dispatch(SCI_GOTOPOS, 3, 0);
    let update = log
        .borrow()
        .iter()
        .rev()
        .find(|n| n.kind == NotificationKind::UpdateUi)
        .cloned()
        .expect("update ui");
    assert!(update.updated & SC_UPDATE_SELECTION != 0);
}

#[test]
fn test_idle_styling_runs_in_chunks() {
    let surface = RecordingSurface::default();
    let mut engine = Engine::new();
    engine.set_surface(surface.clone());
    engine.set_lexer(FlatLexer);
    engine.dispatch(SCI_SETTEXT, 0, "0123456789");
    assert_eq!(engine.dispatch(SCI_GETENDSTYLED, 0, 0).as_int(), 0);

    engine.dispatch(SCI_SETIDLESTYLING, SC_IDLESTYLING_ALL, 0);
    assert_eq!(surface.idle.borrow().as_slice(), &[true]);

    let mut calls = 0;
    while engine.idle(4) {
        calls += 1;
        assert!(calls < 10);
    }
    assert_eq!(engine.dispatch(SCI_GETENDSTYLED, 0, 0).as_int(), 10);
    assert_eq!(engine.dispatch(SCI_GETSTYLEAT, 9, 0).as_int(), 1);
    assert_eq!(surface.idle.borrow().as_slice(), &[true, false]);
}

#[test]
fn test_paint_without_lexer_asks_host_to_style() {
    let (mut engine, log) = recording_engine("ab\ncd");
    engine.handle_event(HostEvent::Paint {
        first_line: 0,
        last_line: 0,
    });
    let log = log.borrow();
    let needed = log
        .iter()
        .find(|n| n.kind == NotificationKind::StyleNeeded)
        .expect("style needed");
    assert_eq!(needed.position, 3);
    assert!(log.iter().any(|n| n.kind == NotificationKind::Painted));
}

#[test]
fn test_tick_blinks_caret_and_starts_dwell() {
    let surface = RecordingSurface::default();
    let (mut engine, log) = recording_engine("hover here");
    engine.set_surface(surface.clone());
    engine.dispatch(SCI_SETMOUSEDWELLTIME, 2 * TICK_MS, 0);
    engine.handle_event(HostEvent::PointerMoved {
        x: 4,
        y: 5,
        position: 3,
    });

    let repaints_before = *surface.repaints.borrow();
    for _ in 0..5 {
        engine.tick();
    }
    assert!(*surface.repaints.borrow() > repaints_before);

    let dwell = log
        .borrow()
        .iter()
        .filter(|n| n.kind == NotificationKind::DwellStart)
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(dwell.len(), 1);
    assert_eq!((dwell[0].position, dwell[0].x, dwell[0].y), (3, 4, 5));

    engine.handle_event(HostEvent::PointerLeft);
    assert!(kinds(&log).contains(&NotificationKind::DwellEnd));
}
