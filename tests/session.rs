use egui::Pos2;
use freehand_paint::error::TransitionError;
use freehand_paint::input::{MOUSE_POINTER_ID, buttons};
use freehand_paint::{PointerEvent, PointerEventKind, Sample, SessionEnd, SessionState, StrokeSession};

fn event(kind: PointerEventKind, x: f32, y: f32, pointer_id: u64, buttons: u32) -> PointerEvent {
    PointerEvent::new(kind, Pos2::new(x, y), 0.5, pointer_id, buttons)
}

fn down(x: f32, y: f32) -> PointerEvent {
    event(PointerEventKind::Down, x, y, MOUSE_POINTER_ID, buttons::PRIMARY)
}

fn drag(x: f32, y: f32) -> PointerEvent {
    event(PointerEventKind::Move, x, y, MOUSE_POINTER_ID, buttons::PRIMARY)
}

#[test]
fn test_starts_idle() {
    let session = StrokeSession::new();
    assert_eq!(session.state(), &SessionState::Idle);
    assert!(session.samples().is_empty());
    assert_eq!(session.captured_pointer(), None);
}

#[test]
fn test_capture_and_commit() {
    let mut session = StrokeSession::new();
    session.pointer_down(&down(0.0, 0.0)).unwrap();
    assert!(session.is_capturing());
    assert_eq!(session.captured_pointer(), Some(MOUSE_POINTER_ID));

    assert!(session.pointer_move(&drag(1.0, 1.0)));
    assert!(session.pointer_move(&drag(2.0, 0.0)));

    let end = session.release(MOUSE_POINTER_ID);
    assert_eq!(
        end,
        Some(SessionEnd::Commit(vec![
            Sample::new(0.0, 0.0, 0.5),
            Sample::new(1.0, 1.0, 0.5),
            Sample::new(2.0, 0.0, 0.5),
        ]))
    );
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn test_samples_keep_arrival_order() {
    let mut session = StrokeSession::new();
    session.pointer_down(&down(0.0, 0.0)).unwrap();
    for i in 1..100 {
        session.pointer_move(&drag(i as f32, (i % 7) as f32));
    }
    let xs: Vec<f32> = session.samples().iter().map(|s| s.x).collect();
    let expected: Vec<f32> = (0..100).map(|i| i as f32).collect();
    assert_eq!(xs, expected);
}

#[test]
fn test_moves_without_primary_button_are_ignored() {
    let mut session = StrokeSession::new();
    session.pointer_down(&down(0.0, 0.0)).unwrap();

    let hover = event(PointerEventKind::Move, 5.0, 5.0, MOUSE_POINTER_ID, 0);
    let right_drag = event(PointerEventKind::Move, 6.0, 6.0, MOUSE_POINTER_ID, buttons::SECONDARY);
    let chord = event(
        PointerEventKind::Move,
        7.0,
        7.0,
        MOUSE_POINTER_ID,
        buttons::PRIMARY | buttons::SECONDARY,
    );
    assert!(!session.pointer_move(&hover));
    assert!(!session.pointer_move(&right_drag));
    assert!(!session.pointer_move(&chord));
    assert_eq!(session.samples().len(), 1);
}

#[test]
fn test_moves_while_idle_are_ignored() {
    let mut session = StrokeSession::new();
    assert!(!session.pointer_move(&drag(3.0, 3.0)));
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn test_release_while_idle_is_abandoned() {
    let mut session = StrokeSession::new();
    assert_eq!(session.release(MOUSE_POINTER_ID), Some(SessionEnd::Abandoned));
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn test_second_pointer_is_rejected() {
    let mut session = StrokeSession::new();
    session.pointer_down(&down(0.0, 0.0)).unwrap();

    let touch = event(PointerEventKind::Down, 9.0, 9.0, 3, buttons::PRIMARY);
    assert_eq!(
        session.pointer_down(&touch),
        Err(TransitionError::PointerBusy {
            active: MOUSE_POINTER_ID,
            requested: 3,
        })
    );

    // Other pointers neither extend nor end the capture
    let touch_move = event(PointerEventKind::Move, 9.5, 9.5, 3, buttons::PRIMARY);
    assert!(!session.pointer_move(&touch_move));
    assert_eq!(session.release(3), None);
    assert!(session.is_capturing());
    assert_eq!(session.samples().len(), 1);
}

#[test]
fn test_new_capture_after_release() {
    let mut session = StrokeSession::new();
    session.pointer_down(&down(0.0, 0.0)).unwrap();
    session.release(MOUSE_POINTER_ID);

    session.pointer_down(&down(50.0, 50.0)).unwrap();
    assert_eq!(session.samples(), &[Sample::new(50.0, 50.0, 0.5)]);
}

#[test]
fn test_repeated_down_restarts_capture() {
    let mut session = StrokeSession::new();
    session.pointer_down(&down(0.0, 0.0)).unwrap();
    session.pointer_move(&drag(5.0, 5.0));

    // The up for the first press never arrived
    session.pointer_down(&down(40.0, 40.0)).unwrap();
    assert_eq!(session.captured_pointer(), Some(MOUSE_POINTER_ID));
    assert_eq!(session.samples(), &[Sample::new(40.0, 40.0, 0.5)]);

    session.pointer_move(&drag(41.0, 41.0));
    assert_eq!(
        session.release(MOUSE_POINTER_ID),
        Some(SessionEnd::Commit(vec![
            Sample::new(40.0, 40.0, 0.5),
            Sample::new(41.0, 41.0, 0.5),
        ]))
    );
}
