use crate::sketch::codec::{self, SurfaceBlob};
use crate::sketch::error::SketchError;
use crate::sketch::history::SurfaceHistory;
use crate::sketch::model::{Color, Point, StrokeStyle, StrokeWidth, Tool};
use crate::sketch::persist::{Clock, NoteStoreCollaborator, PersistDebouncer, SystemClock};
use crate::sketch::profile::{resolve_style, ToolProfile};
use crate::sketch::render::{DirtyRect, StrokeRenderer};
use crate::sketch::settings::SketchSettings;
use crate::sketch::state::{can_transition, StrokeState};
use crate::sketch::surface::{validate_dimensions, Surface};
use std::fmt;

/// One note's drawing: the raster, its undo history, the brush selection and
/// the debounced hand-off to the note store.
///
/// The engine starts with a zero-area surface; the host is expected to call
/// [`SketchEngine::resize_viewport`] once its layout is known. A drawing
/// restored before that keeps its own size until the first resize.
pub struct SketchEngine {
    surface: Surface,
    // Last size passed to `resize_viewport`, if any.
    viewport: Option<(u32, u32)>,
    history: SurfaceHistory,
    renderer: StrokeRenderer,
    style: StrokeStyle,
    state: StrokeState,
    debouncer: PersistDebouncer,
    max_dimension: u32,
    collaborator: Box<dyn NoteStoreCollaborator>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for SketchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SketchEngine")
            .field("size", &self.surface.size())
            .field("style", &self.style)
            .field("state", &self.state)
            .field("undo_depth", &self.history.undo_len())
            .field("redo_depth", &self.history.redo_len())
            .field("persist_pending", &self.debouncer.is_pending())
            .finish_non_exhaustive()
    }
}

impl SketchEngine {
    pub fn new(settings: &SketchSettings, collaborator: impl NoteStoreCollaborator + 'static) -> Self {
        Self::with_clock(settings, collaborator, SystemClock)
    }

    pub fn with_clock(
        settings: &SketchSettings,
        collaborator: impl NoteStoreCollaborator + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let mut settings = settings.clone();
        settings.sanitize();
        Self {
            surface: Surface::default(),
            viewport: None,
            history: SurfaceHistory::new(settings.history_depth),
            renderer: StrokeRenderer::default(),
            style: StrokeStyle {
                tool: settings.default_tool,
                color: settings.default_color,
                width: settings.stroke_width(),
            },
            state: StrokeState::Idle,
            debouncer: PersistDebouncer::new(settings.persist_debounce()),
            max_dimension: settings.max_dimension,
            collaborator: Box::new(collaborator),
            clock: Box::new(clock),
        }
    }

    /// Applies runtime limits from reloaded settings. The brush selection is
    /// left alone; it belongs to the user, not the settings file.
    pub fn apply_settings(&mut self, settings: &SketchSettings) {
        let mut settings = settings.clone();
        settings.sanitize();
        self.history.set_capacity(settings.history_depth);
        self.debouncer.set_delay(settings.persist_debounce());
        self.max_dimension = settings.max_dimension;
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn tool(&self) -> Tool {
        self.style.tool
    }

    pub fn color(&self) -> Color {
        self.style.color
    }

    pub fn width(&self) -> StrokeWidth {
        self.style.width
    }

    /// Profile the next stroke will use.
    pub fn pending_profile(&self) -> ToolProfile {
        resolve_style(self.style)
    }

    /// Profile of the stroke in progress, fixed when it began.
    pub fn active_profile(&self) -> Option<ToolProfile> {
        self.renderer.active_profile().copied()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    pub fn has_pending_persist(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.style.tool = tool;
    }

    /// Selects a tool by name. An unknown name keeps the current tool.
    pub fn select_tool(&mut self, name: &str) -> Result<Tool, SketchError> {
        let tool = name.parse::<Tool>()?;
        self.set_tool(tool);
        Ok(tool)
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_color_hex(&mut self, value: &str) -> Result<Color, SketchError> {
        let color = Color::from_hex(value)?;
        self.set_color(color);
        Ok(color)
    }

    pub fn set_width(&mut self, width: f32) -> Result<(), SketchError> {
        self.style.width = StrokeWidth::new(width)?;
        Ok(())
    }

    /// Starts a stroke. The surface is checkpointed here, before the first
    /// pixel of the stroke can be written.
    pub fn pointer_down(&mut self, point: Point) -> Result<(), SketchError> {
        self.transition("begin stroke", StrokeState::Stroking)?;
        let profile = self.pending_profile();
        self.history.checkpoint(&self.surface);
        self.renderer.begin_stroke(&self.surface, profile, point);
        tracing::debug!(
            tool = %profile.tool,
            x = point.x,
            y = point.y,
            undo_depth = self.history.undo_len(),
            "stroke started"
        );
        Ok(())
    }

    /// Extends the current stroke. Ignored while idle.
    pub fn pointer_move(&mut self, point: Point) -> Option<DirtyRect> {
        if !self.state.is_stroking() {
            return None;
        }
        self.renderer.extend_stroke(&mut self.surface, point)
    }

    /// Finishes the stroke at `point`. Ignored while idle.
    pub fn pointer_up(&mut self, point: Point) -> Option<DirtyRect> {
        if !self.state.is_stroking() {
            return None;
        }
        let moved = point.is_drawable() && self.renderer.last_point() != Some(point);
        let drawn = if moved {
            self.renderer.extend_stroke(&mut self.surface, point)
        } else {
            None
        };
        union_dirty(drawn, self.finish_stroke())
    }

    /// Ends the stroke where it is, for pointer-leave and cancelled touches.
    /// Whatever was drawn stays drawn.
    pub fn end_stroke(&mut self) -> Option<DirtyRect> {
        if !self.state.is_stroking() {
            return None;
        }
        self.finish_stroke()
    }

    fn finish_stroke(&mut self) -> Option<DirtyRect> {
        let dirty = self.renderer.end_stroke(&mut self.surface);
        self.state = StrokeState::Idle;
        self.schedule_persist();
        tracing::debug!("stroke ended");
        dirty
    }

    pub fn clear(&mut self) -> Result<(), SketchError> {
        self.require_idle("clear")?;
        self.history.checkpoint(&self.surface);
        self.surface.clear();
        self.schedule_persist();
        tracing::debug!(undo_depth = self.history.undo_len(), "surface cleared");
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), SketchError> {
        self.require_idle("undo")?;
        self.history.undo(&mut self.surface)?;
        self.schedule_persist();
        tracing::debug!(
            undo_depth = self.history.undo_len(),
            redo_depth = self.history.redo_len(),
            "undo"
        );
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), SketchError> {
        self.require_idle("redo")?;
        self.history.redo(&mut self.surface)?;
        self.schedule_persist();
        tracing::debug!(
            undo_depth = self.history.undo_len(),
            redo_depth = self.history.redo_len(),
            "redo"
        );
        Ok(())
    }

    /// Matches the surface to the host viewport. Not an edit: no checkpoint,
    /// no persistence.
    pub fn resize_viewport(&mut self, width: i64, height: i64) -> Result<(), SketchError> {
        let (width, height) = validate_dimensions(width, height, self.max_dimension)?;
        self.viewport = Some((width, height));
        if self.surface.size() == (width, height) {
            return Ok(());
        }
        self.surface.fit_to(width, height);
        tracing::debug!(width, height, "viewport resized");
        Ok(())
    }

    pub fn encode(&self) -> Result<SurfaceBlob, SketchError> {
        codec::encode(&self.surface)
    }

    /// Replaces the drawing with a stored one, as when a note is opened.
    /// Either the whole blob is applied or nothing changes.
    ///
    /// With a viewport set, the drawing is fitted into it. Before the first
    /// [`SketchEngine::resize_viewport`] the drawing is kept at its stored
    /// size (capped by the configured maximum), so no stored pixel is lost
    /// when the host opens a note ahead of laying it out.
    pub fn restore(&mut self, blob: &str) -> Result<(), SketchError> {
        self.require_idle("restore")?;
        let decoded = match codec::decode(blob) {
            Ok(surface) => surface,
            Err(err) => {
                tracing::warn!(error = %err, "keeping current drawing");
                return Err(err);
            }
        };
        let source = decoded.size();
        let (width, height) = self.viewport.unwrap_or((
            source.0.min(self.max_dimension),
            source.1.min(self.max_dimension),
        ));
        self.surface = decoded.fitted(width, height);
        self.history.clear();
        self.debouncer.cancel();
        tracing::debug!(
            width,
            height,
            source_width = source.0,
            source_height = source.1,
            "drawing restored"
        );
        Ok(())
    }

    /// Delivers the pending notification once its debounce delay has passed.
    /// Returns whether the collaborator was notified.
    pub fn poll(&mut self) -> Result<bool, SketchError> {
        let now = self.clock.now();
        if !self.debouncer.take_due(now) {
            return Ok(false);
        }
        self.deliver()
    }

    /// Delivers any pending notification immediately.
    pub fn flush(&mut self) -> Result<bool, SketchError> {
        if !self.debouncer.take_pending() {
            return Ok(false);
        }
        self.deliver()
    }

    fn deliver(&mut self) -> Result<bool, SketchError> {
        let blob = codec::encode(&self.surface).map_err(|err| {
            tracing::warn!(error = %err, "drawing not persisted");
            err
        })?;
        self.collaborator.notify_changed(&blob);
        Ok(true)
    }

    fn schedule_persist(&mut self) {
        let now = self.clock.now();
        self.debouncer.schedule(now);
    }

    fn transition(&mut self, operation: &'static str, to: StrokeState) -> Result<(), SketchError> {
        if !can_transition(self.state, to) {
            return Err(SketchError::InvalidState {
                operation,
                state: self.state,
            });
        }
        self.state = to;
        Ok(())
    }

    fn require_idle(&self, operation: &'static str) -> Result<(), SketchError> {
        if self.state.is_stroking() {
            return Err(SketchError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }
}

fn union_dirty(a: Option<DirtyRect>, b: Option<DirtyRect>) -> Option<DirtyRect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, b) => a.or(b),
    }
}
