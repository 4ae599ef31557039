//! Annotation subtypes and their classification into transcript handling kinds.
//!
//! Subtype names follow PDF spec ISO 32000-1:2008, Table 169. Only the
//! subtypes a reader actually applies while marking up a document get a
//! [`AnnotationKind`]; everything else (links, widgets, popups) is ignored by
//! the transcript.

use serde::Deserialize;

/// Annotation subtype as reported by the document collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum AnnotationSubtype {
    /// Sticky note
    Text,
    /// Free text box
    FreeText,
    /// Highlight markup
    Highlight,
    /// Underline markup
    Underline,
    /// Squiggly underline markup
    Squiggly,
    /// Strikeout markup
    StrikeOut,
    /// Rectangle drawn over the page
    Square,
    /// Ellipse drawn over the page
    Circle,
    /// Closed polygon
    Polygon,
    /// Freehand drawing
    Ink,
    /// Rubber stamp or image placeholder
    Stamp,
    /// Hyperlink
    Link,
    /// Popup window attached to a markup annotation
    Popup,
    /// Form field
    Widget,
    /// Anything else
    Unknown,
}

impl AnnotationSubtype {
    /// Get the PDF name for this annotation subtype.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::FreeText => "FreeText",
            Self::Highlight => "Highlight",
            Self::Underline => "Underline",
            Self::Squiggly => "Squiggly",
            Self::StrikeOut => "StrikeOut",
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Polygon => "Polygon",
            Self::Ink => "Ink",
            Self::Stamp => "Stamp",
            Self::Link => "Link",
            Self::Popup => "Popup",
            Self::Widget => "Widget",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse from PDF name. Unrecognised names map to [`AnnotationSubtype::Unknown`].
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Text" => Self::Text,
            "FreeText" => Self::FreeText,
            "Highlight" => Self::Highlight,
            "Underline" => Self::Underline,
            "Squiggly" => Self::Squiggly,
            "StrikeOut" => Self::StrikeOut,
            "Square" => Self::Square,
            "Circle" => Self::Circle,
            "Polygon" => Self::Polygon,
            "Ink" => Self::Ink,
            "Stamp" => Self::Stamp,
            "Link" => Self::Link,
            "Popup" => Self::Popup,
            "Widget" => Self::Widget,
            _ => Self::Unknown,
        }
    }

    /// Transcript handling for this subtype, if any.
    pub fn kind(&self) -> Option<AnnotationKind> {
        match self {
            Self::Highlight | Self::Underline | Self::Squiggly | Self::StrikeOut => {
                Some(AnnotationKind::Highlight)
            },
            Self::Text | Self::FreeText => Some(AnnotationKind::TextComment),
            Self::Square | Self::Circle | Self::Polygon | Self::Ink | Self::Stamp => {
                Some(AnnotationKind::AreaOrImage)
            },
            Self::Link | Self::Popup | Self::Widget | Self::Unknown => None,
        }
    }
}

impl From<String> for AnnotationSubtype {
    fn from(name: String) -> Self {
        Self::from_pdf_name(&name)
    }
}

/// How an annotation contributes to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Text markup: the covered words become a quote line.
    Highlight,
    /// Note that may or may not carry geometry; mostly contributes its comment.
    TextComment,
    /// Marked region: rendered to an image excerpt.
    AreaOrImage,
}

/// A quad point specification (8 numbers defining a quadrilateral).
///
/// Points are `[x1, y1, x2, y2, x3, y3, x4, y4]`. The corner order varies
/// between producers, so only the bounding box is ever used.
pub type QuadPoint = [f64; 8];

/// Helper functions for quad points.
pub mod quad_points {
    use super::QuadPoint;
    use crate::geometry::Point;

    /// Parse quad points from a flat array of numbers. A trailing partial quad is dropped.
    pub fn parse(arr: &[f64]) -> Vec<QuadPoint> {
        arr.chunks_exact(8)
            .map(|chunk| {
                [
                    chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
                ]
            })
            .collect()
    }

    /// Expand quad points into the flat vertex list (four points per quad).
    pub fn to_vertices(quads: &[QuadPoint]) -> Vec<Point> {
        quads
            .iter()
            .flat_map(|q| {
                q.chunks_exact(2)
                    .map(|xy| Point::new(xy[0] as f32, xy[1] as f32))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
