use crate::support::{draw_line, harness, harness_with};
use sketch_surface::sketch::codec::decode;
use sketch_surface::sketch::{Color, SketchSettings};

#[test]
fn burst_of_strokes_is_persisted_once_with_latest_state() {
    let mut h = harness(30, 30);
    for y in [2.0, 6.0, 10.0] {
        draw_line(&mut h.engine, (1.0, y), (28.0, y));
        h.clock.advance_ms(100);
        assert_eq!(h.engine.poll(), Ok(false));
    }
    h.clock.advance_ms(400);
    assert_eq!(h.engine.poll(), Ok(true));

    let blobs = h.store.blobs();
    assert_eq!(blobs.len(), 1);
    assert_eq!(&decode(blobs[0].as_str()).unwrap(), h.engine.surface());
}

#[test]
fn undo_redo_and_clear_schedule_persistence() {
    let mut h = harness(20, 20);
    draw_line(&mut h.engine, (1.0, 1.0), (18.0, 1.0));
    h.engine.flush().unwrap();

    h.engine.undo().unwrap();
    assert!(h.engine.has_pending_persist());
    h.engine.flush().unwrap();
    h.engine.redo().unwrap();
    assert!(h.engine.has_pending_persist());
    h.engine.flush().unwrap();
    h.engine.clear().unwrap();
    h.engine.flush().unwrap();

    let blobs = h.store.blobs();
    assert_eq!(blobs.len(), 4);
    assert!(decode(blobs[1].as_str()).unwrap().is_blank());
    assert_eq!(
        decode(blobs[2].as_str()).unwrap().pixel(9, 1),
        Some(Color::BLACK)
    );
    assert!(decode(blobs[3].as_str()).unwrap().is_blank());
}

#[test]
fn viewport_resize_and_style_changes_do_not_persist() {
    let mut h = harness(20, 20);
    h.engine.resize_viewport(40, 40).unwrap();
    h.engine.set_width(9.0).unwrap();
    h.clock.advance_ms(5_000);
    assert_eq!(h.engine.poll(), Ok(false));
    assert_eq!(h.store.count(), 0);
}

#[test]
fn debounce_delay_comes_from_settings() {
    let settings = SketchSettings {
        persist_debounce_ms: 50,
        ..SketchSettings::default()
    };
    let mut h = harness_with(&settings, 20, 20);
    draw_line(&mut h.engine, (1.0, 1.0), (5.0, 5.0));
    h.clock.advance_ms(49);
    assert_eq!(h.engine.poll(), Ok(false));
    h.clock.advance_ms(1);
    assert_eq!(h.engine.poll(), Ok(true));
}
