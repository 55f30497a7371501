//! Lossless, deterministic surface serialisation.
//!
//! Blobs are `data:` URLs so a note store can keep them next to text the same
//! way a browser canvas export would be kept:
//!
//! - `data:image/png;base64,<payload>` for any surface with pixels (RGBA8 PNG,
//!   fixed compression and filter settings)
//! - `data:image/x-empty;width=W;height=H,` for zero-area surfaces, which PNG
//!   cannot represent

use crate::sketch::error::SketchError;
use crate::sketch::surface::{Surface, DEFAULT_MAX_DIMENSION};
use base64::{engine::general_purpose, Engine as _};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder, ImageFormat};
use std::fmt;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
pub const EMPTY_DATA_URL_PREFIX: &str = "data:image/x-empty;";

/// Opaque serialised surface handed to the note store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceBlob(String);

impl SurfaceBlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SurfaceBlob {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SurfaceBlob {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn encode(surface: &Surface) -> Result<SurfaceBlob, SketchError> {
    let (width, height) = surface.size();
    if width == 0 || height == 0 {
        return Ok(SurfaceBlob(format!(
            "{EMPTY_DATA_URL_PREFIX}width={width};height={height},"
        )));
    }

    let mut png = Vec::new();
    PngEncoder::new_with_quality(&mut png, CompressionType::Default, FilterType::Adaptive)
        .write_image(surface.pixels(), width, height, ColorType::Rgba8)
        .map_err(|err| SketchError::EncodeFailed(err.to_string()))?;

    let mut blob = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    blob.push_str(PNG_DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(&png, &mut blob);
    Ok(SurfaceBlob(blob))
}

/// Rebuilds a surface from a blob. Never returns a partially decoded surface.
pub fn decode(blob: &str) -> Result<Surface, SketchError> {
    let blob = blob.trim();
    if let Some(payload) = blob.strip_prefix(PNG_DATA_URL_PREFIX) {
        return decode_png(payload);
    }
    if let Some(params) = blob.strip_prefix(EMPTY_DATA_URL_PREFIX) {
        return decode_empty(params);
    }
    Err(malformed("unrecognised blob header"))
}

fn decode_png(payload: &str) -> Result<Surface, SketchError> {
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| malformed(format!("invalid base64: {err}")))?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|err| malformed(format!("invalid png: {err}")))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > DEFAULT_MAX_DIMENSION || height > DEFAULT_MAX_DIMENSION {
        return Err(malformed(format!("image too large: {width}x{height}")));
    }
    Surface::from_rgba(width, height, rgba.into_raw())
        .ok_or_else(|| malformed("pixel buffer does not match image dimensions"))
}

fn decode_empty(params: &str) -> Result<Surface, SketchError> {
    let params = params
        .strip_suffix(',')
        .ok_or_else(|| malformed("missing data separator"))?;
    let mut width = None;
    let mut height = None;
    for param in params.split(';') {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| malformed(format!("bad parameter `{param}`")))?;
        let value: u32 = value
            .parse()
            .map_err(|_| malformed(format!("bad {key} `{value}`")))?;
        match key {
            "width" => width = Some(value),
            "height" => height = Some(value),
            _ => return Err(malformed(format!("unknown parameter `{key}`"))),
        }
    }
    let (Some(width), Some(height)) = (width, height) else {
        return Err(malformed("missing width or height"));
    };
    if width != 0 && height != 0 {
        return Err(malformed("empty blob with non-zero area"));
    }
    if width > DEFAULT_MAX_DIMENSION || height > DEFAULT_MAX_DIMENSION {
        return Err(malformed(format!("image too large: {width}x{height}")));
    }
    Ok(Surface::transparent(width, height))
}

fn malformed(reason: impl Into<String>) -> SketchError {
    SketchError::MalformedBlob(reason.into())
}
