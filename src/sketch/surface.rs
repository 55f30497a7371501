use crate::sketch::error::SketchError;
use crate::sketch::model::Color;

/// Largest edge accepted unless the caller configures a different limit.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Checks a requested size and converts it to unsigned pixel dimensions.
pub fn validate_dimensions(
    width: i64,
    height: i64,
    max_dimension: u32,
) -> Result<(u32, u32), SketchError> {
    let max = i64::from(max_dimension);
    if width < 0 || height < 0 || width > max || height > max {
        return Err(SketchError::InvalidDimension { width, height });
    }
    Ok((width as u32, height as u32))
}

/// RGBA8 raster the strokes are drawn into. Pixels are straight (not
/// premultiplied) and stored row-major.
///
/// `Clone` produces a fully independent deep copy, which is what the undo
/// history stores.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Allocates a fully transparent surface.
    pub fn new(width: i64, height: i64) -> Result<Self, SketchError> {
        let (width, height) = validate_dimensions(width, height, DEFAULT_MAX_DIMENSION)?;
        Ok(Self::transparent(width, height))
    }

    pub(crate) fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; pixel_len(width, height)],
        }
    }

    /// Wraps raw RGBA8 data. Returns `None` when the buffer length does not
    /// match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != pixel_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reallocates to the new size. Pixels inside both the old and new bounds
    /// keep their coordinates; newly exposed area is transparent. On error the
    /// surface is left untouched.
    pub fn resize(&mut self, width: i64, height: i64) -> Result<(), SketchError> {
        let (width, height) = validate_dimensions(width, height, DEFAULT_MAX_DIMENSION)?;
        self.fit_to(width, height);
        Ok(())
    }

    pub(crate) fn fit_to(&mut self, width: u32, height: u32) {
        if self.size() == (width, height) {
            return;
        }
        *self = self.fitted(width, height);
    }

    /// Copy of this surface clipped or padded to `width` x `height`; content is
    /// never rescaled.
    pub(crate) fn fitted(&self, width: u32, height: u32) -> Surface {
        if self.size() == (width, height) {
            return self.clone();
        }
        let mut out = Surface::transparent(width, height);
        let copy_w = self.width.min(width) as usize * 4;
        for y in 0..self.height.min(height) as usize {
            let src = y * self.width as usize * 4;
            let dst = y * width as usize * 4;
            out.pixels[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let idx = self.index(x, y)?;
        Some(Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixel_count(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

fn pixel_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}
