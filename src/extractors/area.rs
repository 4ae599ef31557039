//! Image excerpts for area annotations.
//!
//! Drawn rectangles, ellipses, ink and stamps mark a region rather than
//! text. Each one is rendered to `Img_P<page>_<title>.png` next to the source
//! file and referenced from the transcript.
//!
//! Titles come from the first line of the annotation's comment. Untitled
//! images on a page are numbered 1, 2, 3, ... by an [`ImageNamer`], which
//! lives for one page and also keeps names unique on that page.
//!
//! Names are unique per page of one source file only. Two sources in the
//! same directory that both have an untitled excerpt on page 1 both write
//! `Img_P1_1.png`, and the later file replaces the earlier one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::annotations::Annotation;
use crate::document::AnnotatedDocument;
use crate::error::{Error, Result};
use crate::rendering::RenderOptions;

/// Longest title kept in a file name, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

lazy_static! {
    /// Heading markers, control characters and characters not allowed in file names
    static ref UNSAFE_TITLE_CHARS: Regex = Regex::new(r#"[#\x00-\x1F\x7F/\\:*?"<>|]"#).unwrap();
}

/// File name for an excerpt of zero-based page `page_index`.
///
/// The name carries no trace of the source file; see the module notes on
/// collisions between sources sharing a directory.
///
/// # Examples
///
/// ```
/// use annot_oxide::extractors::area::image_file_name;
///
/// assert_eq!(image_file_name(0, "Fig3"), "Img_P1_Fig3.png");
/// ```
pub fn image_file_name(page_index: usize, title: &str) -> String {
    format!("Img_P{}_{}.png", page_index + 1, title)
}

/// Title carried by a comment, or an empty string when it has none.
///
/// Takes the text before the first line break, drops every `#` along with
/// control characters and characters that cannot appear in a file name, and
/// caps the length at [`MAX_TITLE_CHARS`].
pub fn derive_title(comment: Option<&str>) -> String {
    let first_line = comment
        .unwrap_or_default()
        .split(|c: char| c == '\r' || c == '\n')
        .next()
        .unwrap_or_default();
    let cleaned = UNSAFE_TITLE_CHARS.replace_all(first_line, "");
    let title: String = cleaned.trim().chars().take(MAX_TITLE_CHARS).collect();
    title.trim_end().to_string()
}

/// Page-scoped image naming state.
///
/// Create one per page; it is never shared between pages.
#[derive(Debug, Clone)]
pub struct ImageNamer {
    page_index: usize,
    next_untitled: u32,
    used: HashSet<String>,
}

impl ImageNamer {
    /// Fresh naming state for zero-based page `page_index`.
    pub fn new(page_index: usize) -> Self {
        Self {
            page_index,
            next_untitled: 1,
            used: HashSet::new(),
        }
    }

    /// Claim the title for the next image on this page.
    ///
    /// An empty derived title takes the next counter value. A title already
    /// claimed on this page gets a `_2`, `_3`, ... suffix.
    pub fn next_title(&mut self, comment: Option<&str>) -> String {
        let pending = self.peek_title(comment);
        self.claim(pending)
    }

    /// The title [`next_title`](Self::next_title) would return, left unclaimed.
    pub fn peek_title(&self, comment: Option<&str>) -> PendingTitle {
        let mut title = derive_title(comment);
        let counted = title.is_empty();
        if counted {
            title = self.next_untitled.to_string();
        }

        let mut candidate = title.clone();
        let mut n = 1;
        while self.used.contains(&candidate) {
            n += 1;
            candidate = format!("{}_{}", title, n);
        }
        PendingTitle {
            title: candidate,
            counted,
        }
    }

    /// Mark a pending title as used, advancing the counter if it took a
    /// counter value.
    pub fn claim(&mut self, pending: PendingTitle) -> String {
        if pending.counted {
            self.next_untitled += 1;
        }
        self.used.insert(pending.title.clone());
        pending.title
    }

    /// File name for a title on this page.
    pub fn file_name(&self, title: &str) -> String {
        image_file_name(self.page_index, title)
    }
}

/// A title chosen by [`ImageNamer::peek_title`] but not yet claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTitle {
    title: String,
    counted: bool,
}

impl PendingTitle {
    /// The title text.
    pub fn as_str(&self) -> &str {
        &self.title
    }
}

/// An excerpt written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Full path of the written PNG
    pub path: PathBuf,
    /// File name referenced from the transcript
    pub file_name: String,
    /// Zero-based page index
    pub page_index: usize,
    /// Derived title
    pub title: String,
}

/// Renders area annotations into PNG files.
#[derive(Debug, Clone)]
pub struct AreaExporter {
    output_dir: PathBuf,
    options: RenderOptions,
}

impl AreaExporter {
    /// Exporter writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, options: RenderOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    /// Exporter writing next to `source`.
    pub fn beside(source: &Path, options: RenderOptions) -> Self {
        let dir = source.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::new(dir, options)
    }

    /// Render `annot` and write it to disk.
    ///
    /// The title is claimed only once the file is written, so a failed
    /// render or write leaves the page counter untouched.
    pub fn export(
        &self,
        doc: &dyn AnnotatedDocument,
        annot: &Annotation,
        namer: &mut ImageNamer,
    ) -> Result<ExportedImage> {
        let clip = annot
            .clip_rect()
            .ok_or_else(|| Error::Render("annotation has no bounds".to_string()))?;
        let image = doc.render_region(annot.page_index, &clip, &self.options)?;

        let pending = namer.peek_title(annot.contents.as_deref());
        let file_name = namer.file_name(pending.as_str());
        let path = self.output_dir.join(&file_name);
        image.save(&path)?;
        let title = namer.claim(pending);

        log::debug!("Wrote {}x{} excerpt {}", image.width, image.height, path.display());
        Ok(ExportedImage {
            path,
            file_name,
            page_index: annot.page_index,
            title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation_types::AnnotationSubtype;

    #[test]
    fn test_title_fallback_sequence() {
        let mut namer = ImageNamer::new(0);
        assert_eq!(namer.next_title(None), "1");
        assert_eq!(namer.next_title(Some("")), "2");
        assert_eq!(namer.next_title(Some("#Fig3")), "Fig3");
        assert_eq!(namer.next_title(None), "3");
    }

    #[test]
    fn test_counter_is_page_scoped() {
        let mut first = ImageNamer::new(0);
        first.next_title(None);
        first.next_title(None);
        let mut second = ImageNamer::new(1);
        assert_eq!(second.next_title(None), "1");
        assert_eq!(second.file_name("1"), "Img_P2_1.png");
    }

    #[test]
    fn test_title_is_first_line() {
        assert_eq!(derive_title(Some("## Figure 2\rThe caption")), "Figure 2");
        assert_eq!(derive_title(Some("Table 1\nmore")), "Table 1");
    }

    #[test]
    fn test_title_drops_unsafe_characters() {
        assert_eq!(derive_title(Some("a/b\\c:d*e?f\"g<h>i|j")), "abcdefghij");
        assert_eq!(derive_title(Some("tab\there")), "tabhere");
    }

    #[test]
    fn test_hash_only_comment_falls_back_to_counter() {
        let mut namer = ImageNamer::new(0);
        assert_eq!(namer.next_title(Some("###")), "1");
    }

    #[test]
    fn test_title_truncated() {
        let long = "x".repeat(250);
        assert_eq!(derive_title(Some(&long)).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_duplicate_titles_get_suffix() {
        let mut namer = ImageNamer::new(3);
        assert_eq!(namer.next_title(Some("Chart")), "Chart");
        assert_eq!(namer.next_title(Some("#Chart")), "Chart_2");
        assert_eq!(namer.next_title(Some("Chart")), "Chart_3");
        assert_eq!(namer.next_title(Some("1")), "1");
        assert_eq!(namer.next_title(None), "1_2");
    }

    #[test]
    fn test_peek_does_not_claim() {
        let mut namer = ImageNamer::new(0);
        assert_eq!(namer.peek_title(None).as_str(), "1");
        assert_eq!(namer.peek_title(None).as_str(), "1");
        assert_eq!(namer.next_title(None), "1");
        assert_eq!(namer.peek_title(Some("1")).as_str(), "1_2");
        assert_eq!(namer.peek_title(None).as_str(), "2");
    }

    struct BlankPage;

    impl AnnotatedDocument for BlankPage {
        fn page_count(&self) -> usize {
            1
        }

        fn words(&self, _page: usize) -> Result<crate::layout::WordIndex> {
            Ok(crate::layout::WordIndex::default())
        }

        fn annotations(&self, _page: usize) -> Result<Vec<Annotation>> {
            Ok(Vec::new())
        }

        fn render_region(
            &self,
            _page: usize,
            clip: &crate::geometry::Rect,
            options: &RenderOptions,
        ) -> Result<crate::rendering::RenderedImage> {
            let raster = image::DynamicImage::new_rgb8(100, 100);
            crate::rendering::render_raster_region(&raster, 100.0, clip, options)
        }
    }

    #[test]
    fn test_failed_write_keeps_counter() {
        let dir = tempfile::tempdir().unwrap();
        let annot = Annotation::new(AnnotationSubtype::Square, 0)
            .with_rect(crate::geometry::Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut namer = ImageNamer::new(0);

        let missing = AreaExporter::new(dir.path().join("missing"), RenderOptions::default());
        assert!(matches!(missing.export(&BlankPage, &annot, &mut namer), Err(Error::Io(_))));

        let exporter = AreaExporter::new(dir.path(), RenderOptions::default());
        let image = exporter.export(&BlankPage, &annot, &mut namer).unwrap();
        assert_eq!(image.file_name, "Img_P1_1.png");
        assert!(image.path.is_file());
    }

    #[test]
    fn test_same_input_same_name() {
        let name = |comment| {
            let mut namer = ImageNamer::new(4);
            let title = namer.next_title(comment);
            namer.file_name(&title)
        };
        assert_eq!(name(Some("Fig 7")), name(Some("Fig 7")));
        assert_eq!(name(Some("Fig 7")), "Img_P5_Fig 7.png");
    }
}
