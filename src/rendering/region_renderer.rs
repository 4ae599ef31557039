//! Region renderer - crops a page raster to a clip and magnifies it.

use std::io::Cursor;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Magnification used for area excerpts unless configured otherwise.
pub const DEFAULT_MAGNIFICATION: f32 = 5.0;

/// Largest excerpt side, in output pixels.
pub const MAX_OUTPUT_SIDE: u32 = 1 << 14;

/// Options for region rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output pixels per page unit, in each axis (default: 5.0)
    pub magnification: f32,
    /// Resampling filter used when scaling the raster
    pub filter: FilterType,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            magnification: DEFAULT_MAGNIFICATION,
            filter: FilterType::CatmullRom,
        }
    }
}

impl RenderOptions {
    /// Create options with a custom magnification.
    pub fn with_magnification(magnification: f32) -> Self {
        Self {
            magnification,
            ..Default::default()
        }
    }

    /// Set the resampling filter.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

/// Rendered PNG excerpt.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// PNG-encoded image data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl RenderedImage {
    /// Save the image to a file.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.data)?;
        Ok(())
    }

    /// Get the image data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Render `clip` (page units) from a raster of a page `page_width` units wide.
///
/// The raster may have any resolution; its scale is derived from
/// `page_width`. A clip hanging off the page is cut at the page edge, and
/// the output size is the on-page part times the magnification. Outputs
/// wider or taller than [`MAX_OUTPUT_SIDE`] are refused.
pub fn render_raster_region(
    raster: &DynamicImage,
    page_width: f32,
    clip: &Rect,
    options: &RenderOptions,
) -> Result<RenderedImage> {
    if clip.is_empty() {
        return Err(Error::Render(format!("invalid clip rectangle {:?}", clip)));
    }
    if !(options.magnification.is_finite() && options.magnification > 0.0) {
        return Err(Error::Render(format!("invalid magnification {}", options.magnification)));
    }
    if !(page_width.is_finite() && page_width > 0.0) || raster.width() == 0 {
        return Err(Error::Render(format!("invalid page width {}", page_width)));
    }

    let scale = raster.width() as f32 / page_width;
    let bounds = Rect::new(0.0, 0.0, raster.width() as f32, raster.height() as f32);
    let pixels = clip
        .scale(scale)
        .intersection(&bounds)
        .ok_or_else(|| Error::Render(format!("clip {:?} lies outside the page", clip)))?;

    let x = pixels.left().floor() as u32;
    let y = pixels.top().floor() as u32;
    let width = (pixels.right().ceil() as u32).min(raster.width()).saturating_sub(x).max(1);
    let height = (pixels.bottom().ceil() as u32).min(raster.height()).saturating_sub(y).max(1);

    let out_width = (pixels.width / scale * options.magnification).round().max(1.0);
    let out_height = (pixels.height / scale * options.magnification).round().max(1.0);
    if out_width > MAX_OUTPUT_SIDE as f32 || out_height > MAX_OUTPUT_SIDE as f32 {
        return Err(Error::Render(format!(
            "excerpt of {:.0}x{:.0} px exceeds the {} px limit",
            out_width, out_height, MAX_OUTPUT_SIDE
        )));
    }
    let out_width = out_width as u32;
    let out_height = out_height as u32;

    let excerpt = raster
        .crop_imm(x, y, width, height)
        .resize_exact(out_width, out_height, options.filter);

    let mut output = Cursor::new(Vec::new());
    excerpt.write_to(&mut output, image::ImageFormat::Png)?;

    log::debug!(
        "Rendered clip {:?} from {}x{} raster to {}x{} PNG",
        clip,
        raster.width(),
        raster.height(),
        out_width,
        out_height
    );

    Ok(RenderedImage {
        data: output.into_inner(),
        width: out_width,
        height: out_height,
    })
}
