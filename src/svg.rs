//! SVG to PNG conversion
//!
//! Parses SVG markup with `usvg`, renders it with `resvg` into an RGBA pixmap
//! and encodes the result as PNG.

use std::fmt;
use std::sync::Arc;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageEncoder;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use thiserror::Error;

/// Largest canvas rendered, in pixels (16383 x 16383).
pub const MAX_PIXELS: u64 = 0x3FFF * 0x3FFF;

/// Failure while rasterizing SVG markup.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("{0}")]
    Parse(#[from] usvg::Error),

    #[error("SVG has an empty canvas ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("output of {width}x{height} pixels exceeds the limit of {} pixels", MAX_PIXELS)]
    TooLarge { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("rasterizer task failed: {0}")]
    Task(String),
}

/// Output canvas and the transform that places the SVG on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Layout {
    /// Compute the canvas for an SVG of `intrinsic` size.
    ///
    /// - both dimensions: contain-fit into `width`x`height`, centred, the rest
    ///   of the canvas left transparent
    /// - one dimension: scale uniformly so that side matches
    /// - neither: intrinsic size
    ///
    /// Zero is treated as "not given".
    pub fn fit(intrinsic: (f32, f32), width: Option<u32>, height: Option<u32>) -> Self {
        let (src_w, src_h) = intrinsic;
        let width = width.filter(|w| *w > 0);
        let height = height.filter(|h| *h > 0);

        match (width, height) {
            (Some(w), Some(h)) => {
                let scale = (w as f32 / src_w).min(h as f32 / src_h);
                Self {
                    width: w,
                    height: h,
                    scale,
                    offset_x: (w as f32 - src_w * scale) / 2.0,
                    offset_y: (h as f32 - src_h * scale) / 2.0,
                }
            }
            (Some(w), None) => {
                let scale = w as f32 / src_w;
                Self::scaled(w, (src_h * scale).round() as u32, scale)
            }
            (None, Some(h)) => {
                let scale = h as f32 / src_h;
                Self::scaled((src_w * scale).round() as u32, h, scale)
            }
            (None, None) => Self::scaled(src_w.ceil() as u32, src_h.ceil() as u32, 1.0),
        }
    }

    fn scaled(width: u32, height: u32, scale: f32) -> Self {
        Self { width: width.max(1), height: height.max(1), scale, offset_x: 0.0, offset_y: 0.0 }
    }

    fn transform(&self) -> Transform {
        Transform::from_row(self.scale, 0.0, 0.0, self.scale, self.offset_x, self.offset_y)
    }
}

/// SVG rasterizer sharing one font database across conversions.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgRasterizer").field("fonts", &self.fontdb.len()).finish()
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    /// Rasterizer without fonts; `<text>` elements render as nothing.
    pub fn new() -> Self {
        Self { fontdb: Arc::new(fontdb::Database::new()) }
    }

    /// Rasterizer backed by the fonts installed on this machine.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(fonts = db.len(), "loaded system fonts");
        Self { fontdb: Arc::new(db) }
    }

    /// Render `svg` to PNG bytes.
    pub fn render_png(
        &self,
        svg: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Vec<u8>, SvgError> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(svg, &options)?;
        let size = tree.size();
        let layout = Layout::fit((size.width(), size.height()), width, height);
        if u64::from(layout.width) * u64::from(layout.height) > MAX_PIXELS {
            return Err(SvgError::TooLarge { width: layout.width, height: layout.height });
        }

        let mut pixmap = Pixmap::new(layout.width, layout.height).ok_or(
            SvgError::EmptyCanvas { width: layout.width, height: layout.height },
        )?;
        resvg::render(&tree, layout.transform(), &mut pixmap.as_mut());

        encode_png(pixmap)
    }

    /// Render on the blocking pool so the runtime keeps serving other calls.
    pub async fn render_png_async(
        &self,
        svg: String,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Vec<u8>, SvgError> {
        let rasterizer = self.clone();
        tokio::task::spawn_blocking(move || rasterizer.render_png(&svg, width, height))
            .await
            .map_err(|e| SvgError::Task(e.to_string()))?
    }
}

fn encode_png(pixmap: Pixmap) -> Result<Vec<u8>, SvgError> {
    let (width, height) = (pixmap.width(), pixmap.height());

    // tiny-skia stores premultiplied alpha; PNG wants straight alpha
    let mut rgba = pixmap.take();
    for px in rgba.chunks_exact_mut(4) {
        let alpha = u16::from(px[3]);
        if alpha != 0 && alpha != 255 {
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + alpha / 2) / alpha).min(255) as u8;
            }
        }
    }

    let mut png_bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png_bytes, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(&rgba, width, height, image::ColorType::Rgba8)?;
    Ok(png_bytes)
}

/// Upload name for a converted SVG: a trailing `.svg` (any case) becomes
/// `.png`. Names without that extension are returned unchanged.
pub fn png_file_name(file_name: &str) -> String {
    let split = file_name.len().saturating_sub(4);
    match (file_name.get(..split), file_name.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".svg") => format!("{}.png", stem),
        _ => file_name.to_string(),
    }
}
