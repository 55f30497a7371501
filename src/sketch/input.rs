use crate::sketch::engine::SketchEngine;
use crate::sketch::error::SketchError;
use crate::sketch::model::Point;
use crate::sketch::render::DirtyRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the surface or the platform cancelled the touch.
    Cancel,
}

/// One pointer or touch sample in surface-local coordinates. Translating
/// from screen space is the host's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Down)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Move)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Up)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerPhase::Cancel)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl SketchEngine {
    /// Routes a sample to the matching stroke operation and returns the area
    /// that needs repainting.
    pub fn handle_pointer(
        &mut self,
        sample: PointerSample,
    ) -> Result<Option<DirtyRect>, SketchError> {
        let point = sample.point();
        match sample.phase {
            PointerPhase::Down => self.pointer_down(point).map(|()| None),
            PointerPhase::Move => Ok(self.pointer_move(point)),
            PointerPhase::Up => Ok(self.pointer_up(point)),
            PointerPhase::Cancel => Ok(self.end_stroke()),
        }
    }

    pub fn handle_pointer_batch<I>(&mut self, samples: I) -> Result<Option<DirtyRect>, SketchError>
    where
        I: IntoIterator<Item = PointerSample>,
    {
        let mut dirty: Option<DirtyRect> = None;
        for sample in samples {
            if let Some(rect) = self.handle_pointer(sample)? {
                dirty = Some(dirty.map_or(rect, |d| d.union(rect)));
            }
        }
        Ok(dirty)
    }
}
