//! Rendering of page regions to PNG excerpts.
//!
//! Area annotations (drawn rectangles, ellipses, ink, stamps) are reproduced
//! in the transcript as images. The document collaborator supplies a raster
//! of the page; this module crops it to the annotation bounds and magnifies
//! the result so small regions stay legible.
//!
//! ## Example
//!
//! ```no_run
//! use annot_oxide::geometry::Rect;
//! use annot_oxide::rendering::{render_raster_region, RenderOptions};
//!
//! # fn main() -> annot_oxide::Result<()> {
//! let page = image::open("page1.png")?;
//! let clip = Rect::new(72.0, 100.0, 200.0, 120.0);
//! let excerpt = render_raster_region(&page, 612.0, &clip, &RenderOptions::default())?;
//! excerpt.save("Img_P1_1.png")?;
//! # Ok(())
//! # }
//! ```

mod region_renderer;

pub use region_renderer::{
    render_raster_region, RenderOptions, RenderedImage, DEFAULT_MAGNIFICATION, MAX_OUTPUT_SIDE,
};
