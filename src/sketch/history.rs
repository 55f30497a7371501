use crate::sketch::error::SketchError;
use crate::sketch::surface::Surface;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_DEPTH: usize = 20;

/// Bounded undo/redo stacks of full-surface snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceHistory {
    undo_stack: VecDeque<Surface>,
    redo_stack: VecDeque<Surface>,
    capacity: usize,
}

impl Default for SurfaceHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SurfaceHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::new(),
            capacity,
        }
    }

    /// Saves `surface` before an edit. Evicts the oldest snapshot when full and
    /// drops every redo entry.
    pub fn checkpoint(&mut self, surface: &Surface) {
        push_bounded(&mut self.undo_stack, surface.clone(), self.capacity);
        self.redo_stack.clear();
    }

    pub fn undo(&mut self, surface: &mut Surface) -> Result<(), SketchError> {
        let previous = self.undo_stack.pop_back().ok_or(SketchError::NothingToUndo)?;
        let restored = previous.fitted(surface.width(), surface.height());
        let current = std::mem::replace(surface, restored);
        push_bounded(&mut self.redo_stack, current, self.capacity);
        Ok(())
    }

    pub fn redo(&mut self, surface: &mut Surface) -> Result<(), SketchError> {
        let next = self.redo_stack.pop_back().ok_or(SketchError::NothingToRedo)?;
        let restored = next.fitted(surface.width(), surface.height());
        let current = std::mem::replace(surface, restored);
        push_bounded(&mut self.undo_stack, current, self.capacity);
        Ok(())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shrinking drops the oldest snapshots first.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        trim_oldest(&mut self.undo_stack, self.capacity);
        trim_oldest(&mut self.redo_stack, self.capacity);
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Surface>, snapshot: Surface, capacity: usize) {
    stack.push_back(snapshot);
    trim_oldest(stack, capacity);
}

fn trim_oldest(stack: &mut VecDeque<Surface>, capacity: usize) {
    while stack.len() > capacity {
        stack.pop_front();
    }
}
