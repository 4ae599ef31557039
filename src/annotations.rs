//! Annotations as reported by the document collaborator, and region resolution.
//!
//! An annotation's geometry arrives as a flat vertex list where every
//! consecutive group of four points is one quad. [`resolve_regions`] turns
//! that list into one bounding rectangle per quad, which is what word
//! selection tests against.

use crate::annotation_types::{quad_points, AnnotationKind, AnnotationSubtype, QuadPoint};
use crate::geometry::{Point, Rect};

/// Number of vertices making up one quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// A reader-applied annotation on one page.
///
/// Read-only to the transcript engine; owned by whoever reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Annotation subtype (Highlight, Text, Square, ...)
    pub subtype: AnnotationSubtype,

    /// Flat quad vertex list, four points per highlighted region
    pub vertices: Option<Vec<Point>>,

    /// Annotation bounds, used as the clip for area excerpts
    pub rect: Option<Rect>,

    /// Comment text attached to the annotation
    pub contents: Option<String>,

    /// Zero-based page index
    pub page_index: usize,
}

impl Annotation {
    /// Create an annotation with no geometry and no comment.
    pub fn new(subtype: AnnotationSubtype, page_index: usize) -> Self {
        Self {
            subtype,
            vertices: None,
            rect: None,
            contents: None,
            page_index,
        }
    }

    /// Set the flat vertex list.
    pub fn with_vertices(mut self, vertices: Vec<Point>) -> Self {
        self.vertices = Some(vertices);
        self
    }

    /// Set the geometry from PDF-style quad points.
    pub fn with_quad_points(mut self, quads: &[QuadPoint]) -> Self {
        self.vertices = Some(quad_points::to_vertices(quads));
        self
    }

    /// Set the annotation bounds.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Set the comment text.
    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Transcript handling for this annotation, `None` when it is ignored.
    pub fn kind(&self) -> Option<AnnotationKind> {
        self.subtype.kind()
    }

    /// Comment text, if present and non-empty.
    pub fn comment(&self) -> Option<&str> {
        self.contents.as_deref().filter(|c| !c.is_empty())
    }

    /// Bounding rectangle of each quad, in supplied order.
    ///
    /// `None` signals missing geometry.
    pub fn regions(&self) -> Option<Vec<Rect>> {
        resolve_regions(self.vertices.as_deref())
    }

    /// Clip rectangle for rendering: the annotation bounds, else the union of its quads.
    pub fn clip_rect(&self) -> Option<Rect> {
        self.rect.or_else(|| {
            self.regions()?
                .into_iter()
                .reduce(|acc, r| acc.union(&r))
        })
    }
}

/// Convert a flat vertex list into one bounding rectangle per quad.
///
/// Returns `None` when the list is absent or holds no complete quad. A
/// trailing group of fewer than four points is ignored.
///
/// # Examples
///
/// ```
/// use annot_oxide::annotations::resolve_regions;
/// use annot_oxide::geometry::{Point, Rect};
///
/// let vertices = vec![
///     Point::new(0.0, 0.0), Point::new(50.0, 0.0),
///     Point::new(0.0, 10.0), Point::new(50.0, 10.0),
///     Point::new(0.0, 12.0), Point::new(20.0, 12.0),
///     Point::new(0.0, 22.0), Point::new(20.0, 22.0),
/// ];
/// let regions = resolve_regions(Some(vertices.as_slice())).unwrap();
/// assert_eq!(regions, vec![
///     Rect::from_points(0.0, 0.0, 50.0, 10.0),
///     Rect::from_points(0.0, 12.0, 20.0, 22.0),
/// ]);
/// assert!(resolve_regions(None).is_none());
/// ```
pub fn resolve_regions(vertices: Option<&[Point]>) -> Option<Vec<Rect>> {
    let vertices = vertices?;
    if vertices.len() % VERTICES_PER_QUAD != 0 {
        log::debug!(
            "Vertex list of length {} is not a multiple of {}; ignoring the remainder",
            vertices.len(),
            VERTICES_PER_QUAD
        );
    }

    let regions: Vec<Rect> = vertices
        .chunks_exact(VERTICES_PER_QUAD)
        .filter_map(Rect::bounding)
        .collect();

    if regions.is_empty() {
        None
    } else {
        Some(regions)
    }
}
