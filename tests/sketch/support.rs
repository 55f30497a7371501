#![allow(dead_code)]

use sketch_surface::sketch::{Clock, SketchEngine, SketchSettings, SurfaceBlob};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// Records every blob the engine hands to the note store.
#[derive(Clone, Default)]
pub struct RecordingStore(Rc<RefCell<Vec<SurfaceBlob>>>);

impl RecordingStore {
    pub fn blobs(&self) -> Vec<SurfaceBlob> {
        self.0.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }
}

impl sketch_surface::sketch::NoteStoreCollaborator for RecordingStore {
    fn notify_changed(&mut self, blob: &SurfaceBlob) {
        self.0.borrow_mut().push(blob.clone());
    }
}

pub struct Harness {
    pub engine: SketchEngine,
    pub clock: ManualClock,
    pub store: RecordingStore,
}

pub fn harness(width: i64, height: i64) -> Harness {
    harness_with(&SketchSettings::default(), width, height)
}

pub fn harness_with(settings: &SketchSettings, width: i64, height: i64) -> Harness {
    let clock = ManualClock::new();
    let store = RecordingStore::default();
    let mut engine = SketchEngine::with_clock(settings, store.clone(), clock.clone());
    engine.resize_viewport(width, height).expect("viewport");
    Harness {
        engine,
        clock,
        store,
    }
}

pub fn draw_line(engine: &mut SketchEngine, from: (f32, f32), to: (f32, f32)) {
    engine.pointer_down(from.into()).expect("pointer down");
    engine.pointer_move(to.into());
    engine.pointer_up(to.into());
}
