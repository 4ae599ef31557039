//! Page-layout sidecar adapter.
//!
//! For a source `paper.pdf`, [`LayoutLoader`] reads `paper.layout.json`, a
//! page dump in top-down page units:
//!
//! ```json
//! { "pages": [ {
//!     "width": 612.0, "height": 792.0,
//!     "raster": "paper-p1.png",
//!     "words": [ { "bbox": [72.0, 90.0, 101.5, 102.0], "text": "Hello" } ],
//!     "annotations": [ {
//!         "subtype": "Highlight",
//!         "rect": [70.0, 88.0, 140.0, 104.0],
//!         "vertices": [[70.0, 88.0], [140.0, 88.0], [70.0, 104.0], [140.0, 104.0]],
//!         "contents": "good point"
//!     } ]
//! } ] }
//! ```
//!
//! Useful for fixtures and for documents prepared by another tool.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{AnnotatedDocument, DocumentLoader};
use crate::annotation_types::{quad_points, AnnotationSubtype};
use crate::annotations::Annotation;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layout::WordIndex;
use crate::rendering::{render_raster_region, RenderOptions, RenderedImage};

/// Suffix replacing the source extension to locate the layout sidecar.
pub const LAYOUT_SIDECAR_EXTENSION: &str = "layout.json";

/// One word of a layout page.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutWord {
    /// Corners `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    /// Word text
    pub text: String,
}

/// One annotation of a layout page.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutAnnotation {
    /// PDF subtype name
    pub subtype: AnnotationSubtype,
    /// Annotation bounds `[x0, y0, x1, y1]`
    #[serde(default)]
    pub rect: Option<[f32; 4]>,
    /// Flat vertex list, four points per quad
    #[serde(default)]
    pub vertices: Option<Vec<[f32; 2]>>,
    /// PDF-style flat QuadPoints array, used when `vertices` is absent
    #[serde(default)]
    pub quad_points: Option<Vec<f64>>,
    /// Comment text
    #[serde(default)]
    pub contents: Option<String>,
}

impl LayoutAnnotation {
    fn to_annotation(&self, page_index: usize) -> Annotation {
        let vertices = match (&self.vertices, &self.quad_points) {
            (Some(vertices), _) => Some(vertices.iter().copied().map(Point::from).collect()),
            (None, Some(flat)) => Some(quad_points::to_vertices(&quad_points::parse(flat))),
            (None, None) => None,
        };
        Annotation {
            subtype: self.subtype,
            vertices,
            rect: self.rect.map(Rect::from),
            contents: self.contents.clone(),
            page_index,
        }
    }
}

/// One page of a layout dump.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutPage {
    /// Page width in page units
    pub width: f32,
    /// Page height in page units
    pub height: f32,
    /// Page raster, relative to the sidecar file
    #[serde(default)]
    pub raster: Option<PathBuf>,
    /// Words in reading order
    #[serde(default)]
    pub words: Vec<LayoutWord>,
    /// Annotations in engine order
    #[serde(default)]
    pub annotations: Vec<LayoutAnnotation>,
}

#[derive(Debug, Deserialize)]
struct LayoutFile {
    pages: Vec<LayoutPage>,
}

/// A document backed by a page-layout sidecar.
#[derive(Debug, Clone)]
pub struct LayoutDocument {
    pages: Vec<LayoutPage>,
    base_dir: PathBuf,
}

impl LayoutDocument {
    /// Parse a layout dump. Raster paths resolve against `base_dir`.
    pub fn from_json_str(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let file: LayoutFile = serde_json::from_str(json)?;
        Ok(Self {
            pages: file.pages,
            base_dir: base_dir.into(),
        })
    }

    /// Read and parse a layout sidecar file.
    pub fn open(sidecar: impl AsRef<Path>) -> Result<Self> {
        let sidecar = sidecar.as_ref();
        let json = std::fs::read_to_string(sidecar)?;
        let base_dir = sidecar.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_json_str(&json, base_dir)
    }

    fn page(&self, page: usize) -> Result<&LayoutPage> {
        self.pages.get(page).ok_or(Error::PageOutOfRange {
            page,
            count: self.pages.len(),
        })
    }
}

impl AnnotatedDocument for LayoutDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn words(&self, page: usize) -> Result<WordIndex> {
        let page = self.page(page)?;
        Ok(WordIndex::new(
            page.words
                .iter()
                .map(|w| (Rect::from(w.bbox), w.text.as_str())),
        ))
    }

    fn annotations(&self, page: usize) -> Result<Vec<Annotation>> {
        let layout = self.page(page)?;
        Ok(layout
            .annotations
            .iter()
            .map(|a| a.to_annotation(page))
            .collect())
    }

    fn render_region(
        &self,
        page: usize,
        clip: &Rect,
        options: &RenderOptions,
    ) -> Result<RenderedImage> {
        let layout = self.page(page)?;
        let raster = layout
            .raster
            .as_ref()
            .ok_or_else(|| Error::Render(format!("page {} has no raster", page + 1)))?;
        let raster = image::open(self.base_dir.join(raster))?;
        render_raster_region(&raster, layout.width, clip, options)
    }
}

/// Loads `<stem>.layout.json` sidecars for `.pdf` sources.
#[derive(Debug, Clone, Default)]
pub struct LayoutLoader;

impl LayoutLoader {
    /// Create a loader.
    pub fn new() -> Self {
        Self
    }

    /// Sidecar path for a source file.
    pub fn sidecar_path(source: &Path) -> PathBuf {
        source.with_extension(LAYOUT_SIDECAR_EXTENSION)
    }
}

impl DocumentLoader for LayoutLoader {
    fn source_extension(&self) -> &str {
        "pdf"
    }

    fn load(&self, path: &Path) -> Result<Box<dyn AnnotatedDocument>> {
        let sidecar = Self::sidecar_path(path);
        if !sidecar.is_file() {
            return Err(Error::parse(
                path,
                format!("no page layout found at {}", sidecar.display()),
            ));
        }
        let document = LayoutDocument::open(&sidecar).map_err(|e| Error::parse(path, e.to_string()))?;
        log::debug!("Loaded {} pages from {}", document.page_count(), sidecar.display());
        Ok(Box::new(document))
    }
}
