use crate::sketch::composite::composite_pixel;
use crate::sketch::model::Point;
use crate::sketch::profile::ToolProfile;
use crate::sketch::surface::Surface;

/// Smallest brush radius. Keeps a 1px pen at a fractional position from
/// missing every pixel center.
const MIN_BRUSH_RADIUS: f32 = 0.75;
const COVERAGE_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    /// Pixels a segment of half-width `pad` can touch, limited to a
    /// `width` x `height` surface. Computed in float space so segments far
    /// larger than the surface still clip correctly.
    pub fn covering_segment(
        a: Point,
        b: Point,
        pad: f32,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = (width - 1) as f32;
        let max_y = (height - 1) as f32;
        let x0 = (a.x.min(b.x) - pad).floor().max(0.0);
        let y0 = (a.y.min(b.y) - pad).floor().max(0.0);
        let x1 = (a.x.max(b.x) + pad).ceil().min(max_x);
        let y1 = (a.y.max(b.y) + pad).ceil().min(max_y);
        if !(x0 <= x1 && y0 <= y1) {
            return None;
        }
        Some(Self {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as i32 + 1,
            height: (y1 - y0) as i32 + 1,
        })
    }

    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        DirtyRect {
            x: min_x,
            y: min_y,
            width: (max_x - min_x).max(1),
            height: (max_y - min_y).max(1),
        }
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

#[derive(Debug, Clone)]
struct ActiveStroke {
    profile: ToolProfile,
    last: Point,
    segments: usize,
    // Pixels already composited by this stroke; each is touched at most once
    // so overlapping round joins do not stack translucent ink.
    coverage: Vec<bool>,
    coverage_width: u32,
}

/// Rasterises one polyline at a time into a [`Surface`] with round caps and
/// joins. The profile is fixed when the stroke begins.
#[derive(Debug, Clone, Default)]
pub struct StrokeRenderer {
    active: Option<ActiveStroke>,
}

impl StrokeRenderer {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_profile(&self) -> Option<&ToolProfile> {
        self.active.as_ref().map(|stroke| &stroke.profile)
    }

    pub fn last_point(&self) -> Option<Point> {
        self.active.as_ref().map(|stroke| stroke.last)
    }

    /// Starts a polyline at `point`. Does not touch the surface.
    pub fn begin_stroke(&mut self, surface: &Surface, profile: ToolProfile, point: Point) {
        self.active = Some(ActiveStroke {
            profile,
            last: point,
            segments: 0,
            coverage: vec![false; coverage_len(surface)],
            coverage_width: surface.width(),
        });
    }

    /// Draws from the previous point to `point`. A zero-length segment draws
    /// a dot. Returns the touched area, if any.
    pub fn extend_stroke(&mut self, surface: &mut Surface, point: Point) -> Option<DirtyRect> {
        let stroke = self.active.as_mut()?;
        if !point.is_drawable() {
            return None;
        }
        let start = if stroke.last.is_drawable() { stroke.last } else { point };
        let dirty = rasterize_segment(surface, stroke, start, point);
        stroke.last = point;
        stroke.segments += 1;
        dirty
    }

    /// Terminates the polyline. A stroke that never drew a segment leaves a
    /// dot at its start so taps register.
    pub fn end_stroke(&mut self, surface: &mut Surface) -> Option<DirtyRect> {
        let mut stroke = self.active.take()?;
        if stroke.segments > 0 || !stroke.last.is_drawable() {
            return None;
        }
        let point = stroke.last;
        rasterize_segment(surface, &mut stroke, point, point)
    }
}

fn coverage_len(surface: &Surface) -> usize {
    surface.width() as usize * surface.height() as usize
}

fn rasterize_segment(
    surface: &mut Surface,
    stroke: &mut ActiveStroke,
    start: Point,
    end: Point,
) -> Option<DirtyRect> {
    let (width, height) = surface.size();
    if stroke.coverage_width != width || stroke.coverage.len() != coverage_len(surface) {
        // Viewport changed mid-stroke.
        stroke.coverage = vec![false; coverage_len(surface)];
        stroke.coverage_width = width;
    }

    let profile = stroke.profile;
    let radius = (profile.effective_width * 0.5).max(MIN_BRUSH_RADIUS);
    let bounds = DirtyRect::covering_segment(start, end, radius, width, height)?;
    let radius_sq = radius * radius + COVERAGE_EPSILON;

    let mut touched: Option<DirtyRect> = None;
    for y in bounds.y..(bounds.y + bounds.height) {
        for x in bounds.x..(bounds.x + bounds.width) {
            if point_segment_distance_sq((x as f32, y as f32), start, end) > radius_sq {
                continue;
            }
            let idx = y as usize * width as usize + x as usize;
            if stroke.coverage[idx] {
                continue;
            }
            stroke.coverage[idx] = true;
            if let Some(dst) = surface.pixel(x, y) {
                let out =
                    composite_pixel(dst, profile.color, profile.composite_mode, profile.opacity);
                surface.set_pixel(x, y, out);
            }
            let pixel = DirtyRect {
                x,
                y,
                width: 1,
                height: 1,
            };
            touched = Some(touched.map_or(pixel, |rect| rect.union(pixel)));
        }
    }
    touched
}

// Evaluated in f64: samples may lie far off-surface, and the projection must
// stay accurate to well under a pixel there.
fn point_segment_distance_sq(point: (f32, f32), start: Point, end: Point) -> f32 {
    let (px, py) = (f64::from(point.0), f64::from(point.1));
    let (sx, sy) = (f64::from(start.x), f64::from(start.y));
    let vx = f64::from(end.x) - sx;
    let vy = f64::from(end.y) - sy;
    let wx = px - sx;
    let wy = py - sy;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return (wx * wx + wy * wy) as f32;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (sx + vx * t);
    let dy = py - (sy + vy * t);
    (dx * dx + dy * dy) as f32
}
