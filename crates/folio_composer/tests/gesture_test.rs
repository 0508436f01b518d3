//! Tests for the swipe-to-delete interpreter.

use folio_composer::{GestureConfig, GestureInterpreter};

fn drag(gesture: &mut GestureInterpreter, deltas: &[i32]) -> u32 {
    gesture.drag_start(300);
    for delta in deltas {
        gesture.drag_move(300 - delta);
    }
    gesture.drag_end()
}

#[test]
fn test_final_delta_decides_detent() {
    let mut gesture = GestureInterpreter::default();
    assert_eq!(drag(&mut gesture, &[10, 40, 35]), 70);

    let mut gesture = GestureInterpreter::default();
    assert_eq!(drag(&mut gesture, &[10, 40, 30]), 0);

    let mut gesture = GestureInterpreter::default();
    assert_eq!(drag(&mut gesture, &[31]), 70);
}

#[test]
fn test_drag_end_is_idempotent() {
    let mut gesture = GestureInterpreter::default();
    assert_eq!(drag(&mut gesture, &[10, 40, 35]), 70);
    assert_eq!(gesture.drag_end(), 70);
    assert_eq!(gesture.drag_end(), 70);

    let mut gesture = GestureInterpreter::default();
    assert_eq!(drag(&mut gesture, &[20]), 0);
    assert_eq!(gesture.drag_end(), 0);
}

#[test]
fn test_offset_is_clamped() {
    let mut gesture = GestureInterpreter::default();
    gesture.drag_start(300);
    assert_eq!(gesture.drag_move(100), 70);
    assert_eq!(gesture.drag_move(400), 0);
    assert_eq!(gesture.drag_move(250), 50);
}

#[test]
fn test_delete_only_when_open() {
    let mut gesture = GestureInterpreter::default();
    assert!(!gesture.tap_delete());

    gesture.drag_start(300);
    gesture.drag_move(280);
    assert!(!gesture.tap_delete());
    gesture.drag_end();
    assert!(!gesture.tap_delete());

    drag(&mut gesture, &[60]);
    assert!(gesture.is_open());
    assert!(gesture.tap_delete());
    assert_eq!(gesture.reveal_offset(), 0);
    assert!(!gesture.tap_delete());
}

#[test]
fn test_tap_outside_closes() {
    let mut gesture = GestureInterpreter::default();
    drag(&mut gesture, &[50]);
    assert_eq!(gesture.reveal_offset(), 70);
    gesture.tap_outside();
    assert_eq!(gesture.reveal_offset(), 0);
}

#[test]
fn test_custom_detents() {
    let mut gesture = GestureInterpreter::new(GestureConfig {
        reveal_width: 100,
        open_threshold: 50,
    });
    assert_eq!(drag(&mut gesture, &[45]), 0);
    assert_eq!(drag(&mut gesture, &[120]), 100);
}
