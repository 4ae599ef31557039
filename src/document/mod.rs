//! Document collaborator interface and its adapters.
//!
//! The transcript engine consumes, per page, the words in reading order,
//! the annotation list, and a way to render a page region. Anything that
//! can supply those implements [`AnnotatedDocument`]; a [`DocumentLoader`]
//! opens one per source file.
//!
//! - [`pdf`]: [`PdfLoader`], reading PDF files directly
//! - [`sidecar`]: [`LayoutLoader`], reading a `<stem>.layout.json` page dump

pub mod pdf;
pub mod sidecar;

pub use pdf::{PdfFileDocument, PdfLoader};
pub use sidecar::{
    LayoutAnnotation, LayoutDocument, LayoutLoader, LayoutPage, LayoutWord,
    LAYOUT_SIDECAR_EXTENSION,
};

use std::path::Path;

use crate::annotations::Annotation;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::WordIndex;
use crate::rendering::{RenderOptions, RenderedImage};

/// A paginated document with words, annotations and a region renderer.
///
/// All geometry is in top-down page units: origin at the top-left of the
/// page, y growing downward, one unit per PDF point.
pub trait AnnotatedDocument {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Words of page `page` in natural reading order.
    fn words(&self, page: usize) -> Result<WordIndex>;

    /// Annotations of page `page` in the order the engine reports them.
    fn annotations(&self, page: usize) -> Result<Vec<Annotation>>;

    /// Render `clip` of page `page` at the configured magnification.
    fn render_region(
        &self,
        page: usize,
        clip: &Rect,
        options: &RenderOptions,
    ) -> Result<RenderedImage>;
}

/// Opens source files as [`AnnotatedDocument`]s.
pub trait DocumentLoader {
    /// Extension (without dot) of the source files this loader accepts.
    fn source_extension(&self) -> &str;

    /// Open `path`. Failures are reported as [`Error::Parse`].
    fn load(&self, path: &Path) -> Result<Box<dyn AnnotatedDocument>>;
}
