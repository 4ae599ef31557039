//! Annotation extraction pipeline.
//!
//! ```text
//! source file
//!     ↓
//! [DocumentLoader] (file → AnnotatedDocument)
//!     ↓
//! per page: WordIndex + Annotation[]
//!     ↓
//! [AnnotationKind] dispatch
//!     ├─ Highlight / TextComment → [SpanReconstructor] → quote + comment lines
//!     └─ AreaOrImage             → [AreaExporter]      → PNG + image line
//!     ↓
//! FileTranscript → Transcript → annotations.md
//! ```
//!
//! Files, pages and annotations are processed strictly in order. Errors are
//! sorted by [`Error::is_file_level`](crate::error::Error::is_file_level):
//! a file-level failure aborts that file only, anything else raised while
//! exporting an image or cleaning a comment skips that item only.

pub mod batch;

pub use batch::{discover, BatchExtractor, BatchReport};

use std::path::Path;

use crate::annotation_types::AnnotationKind;
use crate::annotations::Annotation;
use crate::config::ExtractionConfig;
use crate::converters::{sanitize_comment, FileTranscript};
use crate::document::AnnotatedDocument;
use crate::error::Result;
use crate::extractors::{AreaExporter, ImageNamer, SpanReconstructor};
use crate::layout::WordIndex;
use crate::rendering::RenderOptions;

/// Turns one document's annotations into a transcript section.
#[derive(Debug, Clone)]
pub struct AnnotationPipeline {
    reconstructor: SpanReconstructor,
    render_options: RenderOptions,
}

impl Default for AnnotationPipeline {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl AnnotationPipeline {
    /// Create a pipeline from configuration.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            reconstructor: SpanReconstructor::new(config.merge_strategy),
            render_options: config.render_options(),
        }
    }

    /// Process every page of `doc`.
    ///
    /// `source` names the section and decides where image excerpts are
    /// written (its parent directory).
    pub fn process_document(
        &self,
        doc: &dyn AnnotatedDocument,
        source: &Path,
    ) -> Result<FileTranscript> {
        let base_name = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut out = FileTranscript::new(base_name);
        let exporter = AreaExporter::beside(source, self.render_options.clone());

        for page in 0..doc.page_count() {
            self.process_page(doc, page, &exporter, &mut out)?;
        }

        log::debug!("{}: {} transcript lines", source.display(), out.line_count());
        Ok(out)
    }

    fn process_page(
        &self,
        doc: &dyn AnnotatedDocument,
        page: usize,
        exporter: &AreaExporter,
        out: &mut FileTranscript,
    ) -> Result<()> {
        let annotations = doc.annotations(page)?;
        if annotations.is_empty() {
            return Ok(());
        }
        let words = doc.words(page)?;
        let mut namer = ImageNamer::new(page);

        for annot in &annotations {
            match annot.kind() {
                Some(AnnotationKind::Highlight | AnnotationKind::TextComment) => {
                    self.transcribe_text(annot, &words, out)
                },
                Some(AnnotationKind::AreaOrImage) => {
                    match exporter.export(doc, annot, &mut namer) {
                        Ok(image) => out.push_image(image.file_name),
                        Err(e) if e.is_file_level() => return Err(e),
                        Err(e) => log::warn!(
                            "Skipping image on page {}: {}",
                            page + 1,
                            e
                        ),
                    }
                },
                None => log::debug!(
                    "Ignoring {} annotation on page {}",
                    annot.subtype.pdf_name(),
                    page + 1
                ),
            }
        }
        Ok(())
    }

    fn transcribe_text(&self, annot: &Annotation, words: &WordIndex, out: &mut FileTranscript) {
        if let Some(regions) = annot.regions() {
            let text = self.reconstructor.reconstruct(words, &regions);
            if text.is_empty() {
                log::debug!(
                    "No words under {} annotation on page {}",
                    annot.subtype.pdf_name(),
                    annot.page_index + 1
                );
            } else {
                out.push_quote(text);
            }
        }

        if let Some(comment) = annot.comment() {
            match sanitize_comment(comment) {
                Ok(Some(clean)) => out.push_comment(clean),
                Ok(None) => {},
                Err(e) => log::warn!(
                    "Dropping comment on page {}: {}",
                    annot.page_index + 1,
                    e
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation_types::AnnotationSubtype;
    use crate::converters::TranscriptBlock;
    use crate::error::Error;
    use crate::geometry::{Point, Rect};
    use crate::rendering::RenderedImage;

    struct OnePage {
        words: Vec<(Rect, &'static str)>,
        annotations: Vec<Annotation>,
        render_error: fn() -> Error,
    }

    impl AnnotatedDocument for OnePage {
        fn page_count(&self) -> usize {
            1
        }

        fn words(&self, _page: usize) -> Result<WordIndex> {
            Ok(WordIndex::new(self.words.iter().cloned()))
        }

        fn annotations(&self, _page: usize) -> Result<Vec<Annotation>> {
            Ok(self.annotations.clone())
        }

        fn render_region(
            &self,
            _page: usize,
            _clip: &Rect,
            _options: &RenderOptions,
        ) -> Result<RenderedImage> {
            Err((self.render_error)())
        }
    }

    fn quad(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
        ]
    }

    fn doc(annotations: Vec<Annotation>) -> OnePage {
        OnePage {
            words: vec![
                (Rect::new(0.0, 0.0, 40.0, 10.0), "Hello"),
                (Rect::new(50.0, 0.0, 40.0, 10.0), "world"),
            ],
            annotations,
            render_error: || Error::Render("no raster".to_string()),
        }
    }

    fn lines(out: &FileTranscript) -> Vec<TranscriptBlock> {
        out.blocks()[1..].to_vec()
    }

    #[test]
    fn test_highlight_with_comment() {
        let annot = Annotation::new(AnnotationSubtype::Highlight, 0)
            .with_vertices(quad(0.0, 0.0, 100.0, 10.0))
            .with_contents("greeting");
        let out = AnnotationPipeline::default()
            .process_document(&doc(vec![annot]), Path::new("dir/paper.pdf"))
            .unwrap();
        assert_eq!(out.blocks()[0], TranscriptBlock::SectionHeader("paper".into()));
        assert_eq!(
            lines(&out),
            vec![
                TranscriptBlock::QuoteLine("Hello world".into()),
                TranscriptBlock::CommentLine("greeting".into()),
            ]
        );
    }

    #[test]
    fn test_comment_only_annotation() {
        let annot = Annotation::new(AnnotationSubtype::Text, 0).with_contents("a note");
        let out = AnnotationPipeline::default()
            .process_document(&doc(vec![annot]), Path::new("paper.pdf"))
            .unwrap();
        assert_eq!(lines(&out), vec![TranscriptBlock::CommentLine("a note".into())]);
    }

    #[test]
    fn test_no_geometry_no_comment_emits_nothing() {
        let annot = Annotation::new(AnnotationSubtype::Highlight, 0);
        let out = AnnotationPipeline::default()
            .process_document(&doc(vec![annot]), Path::new("paper.pdf"))
            .unwrap();
        assert_eq!(out.line_count(), 0);
    }

    #[test]
    fn test_render_failure_is_contained() {
        let area = Annotation::new(AnnotationSubtype::Square, 0)
            .with_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let text = Annotation::new(AnnotationSubtype::Highlight, 0)
            .with_vertices(quad(45.0, 0.0, 100.0, 10.0));
        let out = AnnotationPipeline::default()
            .process_document(&doc(vec![area, text]), Path::new("paper.pdf"))
            .unwrap();
        assert_eq!(lines(&out), vec![TranscriptBlock::QuoteLine("world".into())]);
    }

    #[test]
    fn test_file_level_render_failure_aborts_file() {
        let area = Annotation::new(AnnotationSubtype::Stamp, 0)
            .with_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut document = doc(vec![area]);
        document.render_error = || Error::PageOutOfRange { page: 0, count: 0 };
        let result = AnnotationPipeline::default().process_document(&document, Path::new("paper.pdf"));
        assert!(matches!(result, Err(Error::PageOutOfRange { .. })));
    }

    #[test]
    fn test_unsupported_subtypes_ignored() {
        let link = Annotation::new(AnnotationSubtype::Link, 0)
            .with_rect(Rect::new(0.0, 0.0, 100.0, 10.0))
            .with_contents("https://example.com");
        let out = AnnotationPipeline::default()
            .process_document(&doc(vec![link]), Path::new("paper.pdf"))
            .unwrap();
        assert_eq!(out.line_count(), 0);
    }
}
