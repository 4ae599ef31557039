//! PDF adapter built on the `pdf_oxide` engine.
//!
//! Words come from the engine's text spans, split at whitespace. Annotation
//! geometry comes from `/Rect` and `/QuadPoints`. Excerpts are cut from a
//! page raster rendered at `72 * magnification` DPI, which is kept for the
//! next excerpt on the same page.
//!
//! PDF user space has its origin at the bottom-left of the media box with y
//! growing upward. Everything handed to the engine is converted to top-down
//! page units first. Page rotation is not applied.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdf_oxide::PdfDocument;

use super::{AnnotatedDocument, DocumentLoader};
use crate::annotation_types::{quad_points, AnnotationSubtype};
use crate::annotations::Annotation;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layout::WordIndex;
use crate::rendering::{render_raster_region, RenderOptions, RenderedImage, MAX_OUTPUT_SIDE};

/// PDF user-space units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Media box of one page, used to flip PDF user space to top-down units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageFrame {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl PageFrame {
    fn new(media_box: &pdf_oxide::geometry::Rect) -> Self {
        let left = media_box.x.min(media_box.x + media_box.width);
        let bottom = media_box.y.min(media_box.y + media_box.height);
        let height = media_box.height.abs();
        Self {
            left,
            top: bottom + height,
            width: media_box.width.abs(),
            height,
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(x - self.left, self.top - y)
    }

    /// Top-down rectangle for PDF corners `(x0, y0)`, `(x1, y1)` in any order.
    fn rect(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_points(
            x0.min(x1) - self.left,
            self.top - y0.max(y1),
            x0.max(x1) - self.left,
            self.top - y0.min(y1),
        )
    }

    /// DPI for `magnification`, lowered so no raster side exceeds the excerpt limit.
    fn dpi(&self, magnification: f32) -> u32 {
        let longest = self.width.max(self.height).max(1.0);
        let ceiling = MAX_OUTPUT_SIDE as f32 * POINTS_PER_INCH / longest;
        (POINTS_PER_INCH * magnification).min(ceiling).round().max(1.0) as u32
    }
}

/// Split a span's text at whitespace, sharing its width out by character count.
fn split_span(text: &str, bbox: &Rect) -> Vec<(Rect, String)> {
    let total = text.chars().count();
    if total == 0 {
        return Vec::new();
    }
    let per_char = bbox.width / total as f32;

    let mut words = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    for (i, c) in text.chars().chain(std::iter::once(' ')).enumerate() {
        if c.is_whitespace() {
            if !current.is_empty() {
                let x0 = bbox.x + per_char * start as f32;
                let x1 = bbox.x + per_char * i as f32;
                words.push((
                    Rect::from_points(x0, bbox.top(), x1, bbox.bottom()),
                    std::mem::take(&mut current),
                ));
            }
            start = i + 1;
        } else {
            current.push(c);
        }
    }
    words
}

struct PageRaster {
    page: usize,
    dpi: u32,
    image: DynamicImage,
}

/// A PDF file opened through `pdf_oxide`.
pub struct PdfFileDocument {
    path: PathBuf,
    doc: RefCell<PdfDocument>,
    frames: Vec<PageFrame>,
    raster: RefCell<Option<PageRaster>>,
}

impl PdfFileDocument {
    /// Open and index `path`. Any engine failure is an [`Error::Parse`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parse_error = |e: pdf_oxide::error::Error| Error::parse(path, e.to_string());

        let mut doc = PdfDocument::open(path).map_err(parse_error)?;
        let page_count = doc.page_count().map_err(parse_error)?;
        let frames = (0..page_count)
            .map(|page| {
                doc.get_page_info(page)
                    .map(|info| PageFrame::new(&info.media_box))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            doc: RefCell::new(doc),
            frames,
            raster: RefCell::new(None),
        })
    }

    fn frame(&self, page: usize) -> Result<PageFrame> {
        self.frames.get(page).copied().ok_or(Error::PageOutOfRange {
            page,
            count: self.frames.len(),
        })
    }

    fn parse_error(&self, page: usize, e: pdf_oxide::error::Error) -> Error {
        Error::parse(&self.path, format!("page {}: {}", page + 1, e))
    }

    fn rasterize(&self, page: usize, dpi: u32) -> Result<PageRaster> {
        let options = pdf_oxide::rendering::RenderOptions::with_dpi(dpi);
        let rendered =
            pdf_oxide::rendering::render_page(&mut self.doc.borrow_mut(), page, &options)
                .map_err(|e| Error::Render(format!("page {}: {}", page + 1, e)))?;
        let image = image::load_from_memory(&rendered.data)?;
        log::debug!(
            "Rasterised page {} of {} at {} dpi ({}x{})",
            page + 1,
            self.path.display(),
            dpi,
            image.width(),
            image.height()
        );
        Ok(PageRaster { page, dpi, image })
    }
}

impl AnnotatedDocument for PdfFileDocument {
    fn page_count(&self) -> usize {
        self.frames.len()
    }

    fn words(&self, page: usize) -> Result<WordIndex> {
        let frame = self.frame(page)?;
        let spans = self
            .doc
            .borrow_mut()
            .extract_spans(page)
            .map_err(|e| self.parse_error(page, e))?;

        Ok(WordIndex::new(spans.iter().flat_map(|span| {
            let b = &span.bbox;
            let bbox = frame.rect(b.x, b.y, b.x + b.width, b.y + b.height);
            split_span(&span.text, &bbox)
        })))
    }

    fn annotations(&self, page: usize) -> Result<Vec<Annotation>> {
        let frame = self.frame(page)?;
        let found = self
            .doc
            .borrow_mut()
            .get_annotations(page)
            .map_err(|e| self.parse_error(page, e))?;

        Ok(found
            .iter()
            .map(|a| Annotation {
                subtype: a
                    .subtype
                    .as_deref()
                    .map(AnnotationSubtype::from_pdf_name)
                    .unwrap_or(AnnotationSubtype::Unknown),
                vertices: a.quad_points.as_ref().map(|quads| {
                    quad_points::to_vertices(quads)
                        .into_iter()
                        .map(|p| frame.point(p.x, p.y))
                        .collect()
                }),
                rect: a.rect.map(|[x0, y0, x1, y1]| {
                    frame.rect(x0 as f32, y0 as f32, x1 as f32, y1 as f32)
                }),
                contents: a.contents.clone(),
                page_index: page,
            })
            .collect())
    }

    fn render_region(
        &self,
        page: usize,
        clip: &Rect,
        options: &RenderOptions,
    ) -> Result<RenderedImage> {
        let frame = self.frame(page)?;
        let dpi = frame.dpi(options.magnification);

        let mut cache = self.raster.borrow_mut();
        let raster = match cache.take().filter(|r| r.page == page && r.dpi == dpi) {
            Some(raster) => raster,
            None => self.rasterize(page, dpi)?,
        };
        let excerpt = render_raster_region(&raster.image, frame.width, clip, options);
        *cache = Some(raster);
        excerpt
    }
}

/// Opens `.pdf` sources with the `pdf_oxide` engine.
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    /// Create a loader.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn source_extension(&self) -> &str {
        "pdf"
    }

    fn load(&self, path: &Path) -> Result<Box<dyn AnnotatedDocument>> {
        let document = PdfFileDocument::open(path)?;
        log::debug!("Opened {} ({} pages)", path.display(), document.page_count());
        Ok(Box::new(document))
    }
}
