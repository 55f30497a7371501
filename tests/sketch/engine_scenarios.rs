use crate::support::{draw_line, harness, harness_with};
use sketch_surface::sketch::{
    Color, CompositeMode, SketchError, SketchSettings, StrokeState, Surface, Tool,
};

#[test]
fn vertical_pen_stroke_undo_redo() {
    let mut h = harness(100, 100);
    h.engine.set_tool(Tool::Pen);
    h.engine.set_color(Color::BLACK);
    h.engine.set_width(4.0).unwrap();

    draw_line(&mut h.engine, (10.0, 10.0), (10.0, 90.0));
    for y in 10..=90 {
        for x in 8..=12 {
            assert_eq!(h.engine.surface().pixel(x, y), Some(Color::BLACK), "({x},{y})");
        }
    }
    let stroked = h.engine.surface().clone();

    h.engine.undo().unwrap();
    for y in 10..=90 {
        for x in 8..=12 {
            assert_eq!(h.engine.surface().pixel(x, y), Some(Color::TRANSPARENT));
        }
    }
    assert!(h.engine.surface().is_blank());

    h.engine.redo().unwrap();
    assert_eq!(h.engine.surface(), &stroked);
}

#[test]
fn undo_redo_inverse_over_a_sequence_of_strokes() {
    let mut h = harness(64, 64);
    let mut states: Vec<Surface> = vec![h.engine.surface().clone()];
    let tools = [Tool::Pen, Tool::Highlighter, Tool::Pencil, Tool::Eraser, Tool::Pen];
    for (i, tool) in tools.into_iter().enumerate() {
        h.engine.set_tool(tool);
        let y = 6.0 + i as f32 * 10.0;
        draw_line(&mut h.engine, (2.0, y), (60.0, 40.0 - y / 2.0));
        states.push(h.engine.surface().clone());
    }

    for expected in states.iter().rev().skip(1) {
        h.engine.undo().unwrap();
        assert_eq!(h.engine.surface(), expected);
    }
    assert_eq!(h.engine.undo(), Err(SketchError::NothingToUndo));

    for expected in states.iter().skip(1) {
        h.engine.redo().unwrap();
        assert_eq!(h.engine.surface(), expected);
    }
    assert_eq!(h.engine.redo(), Err(SketchError::NothingToRedo));
}

#[test]
fn history_is_bounded_to_configured_depth() {
    let depth = 7;
    let settings = SketchSettings {
        history_depth: depth,
        ..SketchSettings::default()
    };
    let mut h = harness_with(&settings, 40, 40);
    for i in 0..depth + 5 {
        let x = 1.0 + i as f32 * 3.0;
        draw_line(&mut h.engine, (x, 1.0), (x, 30.0));
    }
    assert_eq!(h.engine.undo_depth(), depth);

    for _ in 0..depth {
        h.engine.undo().unwrap();
    }
    assert_eq!(h.engine.undo(), Err(SketchError::NothingToUndo));
    // The five oldest strokes can no longer be undone.
    assert!(!h.engine.surface().is_blank());
}

#[test]
fn default_history_depth_is_twenty() {
    let mut h = harness(30, 30);
    for i in 0..25 {
        draw_line(&mut h.engine, (1.0, i as f32), (28.0, i as f32));
    }
    let mut undone = 0;
    while h.engine.undo().is_ok() {
        undone += 1;
    }
    assert_eq!(undone, 20);
}

#[test]
fn new_stroke_after_undo_invalidates_redo() {
    let mut h = harness(30, 30);
    draw_line(&mut h.engine, (2.0, 2.0), (20.0, 2.0));
    draw_line(&mut h.engine, (2.0, 8.0), (20.0, 8.0));
    h.engine.undo().unwrap();
    assert_eq!(h.engine.redo_depth(), 1);

    draw_line(&mut h.engine, (2.0, 14.0), (20.0, 14.0));
    assert_eq!(h.engine.redo(), Err(SketchError::NothingToRedo));
}

#[test]
fn clear_after_undo_also_invalidates_redo() {
    let mut h = harness(30, 30);
    draw_line(&mut h.engine, (2.0, 2.0), (20.0, 2.0));
    h.engine.undo().unwrap();
    h.engine.clear().unwrap();
    assert_eq!(h.engine.redo(), Err(SketchError::NothingToRedo));
}

#[test]
fn tap_renders_a_mark_for_every_tool_that_paints() {
    for tool in [Tool::Pen, Tool::Pencil, Tool::Highlighter] {
        let mut h = harness(20, 20);
        h.engine.set_tool(tool);
        h.engine.set_width(1.0).unwrap();
        h.engine.pointer_down((7.0, 9.0).into()).unwrap();
        h.engine.end_stroke();
        let mark = h.engine.surface().pixel(7, 9).unwrap();
        assert!(mark.a > 0, "{tool} tap left no mark");
    }
}

#[test]
fn tool_switch_applies_to_whole_next_stroke() {
    let mut h = harness(60, 60);
    h.engine.set_color(Color::rgb(200, 0, 0));
    h.engine.pointer_down((5.0, 5.0).into()).unwrap();
    h.engine.pointer_move((30.0, 5.0).into());

    h.engine.set_tool(Tool::Highlighter);
    h.engine.set_color(Color::rgb(0, 0, 200));
    assert_eq!(h.engine.active_profile().unwrap().tool, Tool::Pen);
    h.engine.pointer_move((55.0, 5.0).into());
    h.engine.pointer_up((55.0, 5.0).into());

    // Every pixel of the first stroke is opaque pen red, including the part
    // drawn after the switch.
    for x in 5..=55 {
        assert_eq!(h.engine.surface().pixel(x, 5), Some(Color::rgb(200, 0, 0)));
    }

    h.engine.pointer_down((5.0, 40.0).into()).unwrap();
    let active = h.engine.active_profile().unwrap();
    assert_eq!(active.composite_mode, CompositeMode::Multiply);
    assert_eq!(active.color, Color::rgb(0, 0, 200));
    h.engine.pointer_up((55.0, 40.0).into());
    for x in 5..=55 {
        let px = h.engine.surface().pixel(x, 40).unwrap();
        assert_eq!((px.r, px.g, px.b), (0, 0, 200));
        assert!(px.a > 0 && px.a < 255);
    }
}

#[test]
fn resize_preserves_overlap_and_pads_with_transparency() {
    let mut h = harness(100, 100);
    h.engine.set_width(6.0).unwrap();
    draw_line(&mut h.engine, (0.0, 0.0), (99.0, 99.0));
    draw_line(&mut h.engine, (0.0, 30.0), (99.0, 30.0));
    let before = h.engine.surface().clone();

    h.engine.resize_viewport(50, 50).unwrap();
    h.engine.resize_viewport(100, 100).unwrap();

    let after = h.engine.surface();
    assert_eq!(after.size(), (100, 100));
    for y in 0..100 {
        for x in 0..100 {
            if x < 50 && y < 50 {
                assert_eq!(after.pixel(x, y), before.pixel(x, y), "({x},{y})");
            } else {
                assert_eq!(after.pixel(x, y), Some(Color::TRANSPARENT), "({x},{y})");
            }
        }
    }
    assert_eq!(h.engine.undo_depth(), 2);
}

#[test]
fn undo_after_resize_keeps_viewport_dimensions() {
    let mut h = harness(40, 40);
    draw_line(&mut h.engine, (5.0, 5.0), (35.0, 35.0));
    h.engine.resize_viewport(20, 60).unwrap();
    h.engine.undo().unwrap();
    assert_eq!(h.engine.surface().size(), (20, 60));
    h.engine.redo().unwrap();
    assert_eq!(h.engine.surface().size(), (20, 60));
    assert_eq!(h.engine.surface().pixel(10, 10), Some(Color::BLACK));
}

#[test]
fn eraser_removes_ink_without_painting_background() {
    let mut h = harness(40, 40);
    h.engine.set_width(8.0).unwrap();
    draw_line(&mut h.engine, (2.0, 20.0), (38.0, 20.0));

    h.engine.set_tool(Tool::Eraser);
    h.engine.set_color(Color::WHITE);
    h.engine.set_width(2.0).unwrap();
    draw_line(&mut h.engine, (20.0, 0.0), (20.0, 39.0));

    assert_eq!(h.engine.surface().pixel(20, 20), Some(Color::TRANSPARENT));
    assert_eq!(h.engine.surface().pixel(2, 20), Some(Color::BLACK));
}

#[test]
fn stroke_in_progress_survives_viewport_change() {
    let mut h = harness(40, 40);
    h.engine.pointer_down((2.0, 2.0).into()).unwrap();
    h.engine.resize_viewport(20, 20).unwrap();
    h.engine.pointer_move((18.0, 2.0).into());
    h.engine.pointer_up((18.0, 2.0).into());
    assert_eq!(h.engine.state(), StrokeState::Idle);
    assert_eq!(h.engine.surface().pixel(10, 2), Some(Color::BLACK));
}

#[test]
fn invalid_dimension_is_rejected() {
    let mut h = harness(10, 10);
    assert!(matches!(
        h.engine.resize_viewport(10, -3),
        Err(SketchError::InvalidDimension { .. })
    ));
    assert_eq!(h.engine.surface().size(), (10, 10));
    assert!(Surface::new(-1, 0).is_err());
}
