//! Markdown transcript assembly.
//!
//! A transcript is one section per source file, each holding the quote,
//! comment and image lines of that file's annotations in discovery order:
//!
//! ```text
//! ## <file-base-name>
//!
//!   > <reconstructed text>
//!   > Comment: <comment text>
//!   > ![[Img_P<page>_<title>.png]]
//!
//! ```
//!
//! Quote lines end with a single space before the newline. Nothing is
//! reordered or deduplicated across annotations.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    /// Control characters other than line feed and tab
    static ref RE_CONTROL: Regex = Regex::new(r"[\x00-\x08\x0B-\x1F\x7F]").unwrap();
}

/// Blockquote prefix, for output typeset through LaTeX.
pub const BLOCKQUOTE_PREFIX: &str = "  > ";

/// List-item prefix, for output converted to HTML.
pub const LIST_ITEM_PREFIX: &str = "  - ";

/// Second-level heading marker used for file sections.
pub const SECTION_PREFIX: &str = "## ";

/// Label placed before comment text.
pub const COMMENT_LABEL: &str = "Comment:";

/// Page break emitted after each file section in the LaTeX preset.
pub const LATEX_PAGE_BREAK: &str = "\\newpage";

/// Prefixes and separators used when rendering a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptStyle {
    /// Prefix of file section headers (default: `"## "`)
    pub section_prefix: String,
    /// Prefix of quote, comment and image lines
    pub quote_prefix: String,
    /// Label before comment text (default: `"Comment:"`)
    pub comment_label: String,
    /// Raw line emitted after each file section
    pub page_break: Option<String>,
    /// Put a blank line between consecutive lines of a section
    pub separate_blocks: bool,
}

impl Default for TranscriptStyle {
    fn default() -> Self {
        Self::blockquote()
    }
}

impl TranscriptStyle {
    /// Blockquote preset for PDF/LaTeX-oriented output.
    pub fn blockquote() -> Self {
        Self {
            section_prefix: SECTION_PREFIX.to_string(),
            quote_prefix: BLOCKQUOTE_PREFIX.to_string(),
            comment_label: COMMENT_LABEL.to_string(),
            page_break: Some(LATEX_PAGE_BREAK.to_string()),
            separate_blocks: false,
        }
    }

    /// List-item preset for HTML-oriented output.
    pub fn list_item() -> Self {
        Self {
            quote_prefix: LIST_ITEM_PREFIX.to_string(),
            page_break: None,
            ..Self::blockquote()
        }
    }

    /// Set the comment label.
    pub fn with_comment_label(mut self, label: impl Into<String>) -> Self {
        self.comment_label = label.into();
        self
    }

    /// Set the section header prefix.
    pub fn with_section_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.section_prefix = prefix.into();
        self
    }

    /// Set the page break line; `None` disables it.
    pub fn with_page_break(mut self, page_break: Option<String>) -> Self {
        self.page_break = page_break;
        self
    }

    /// Set whether lines are separated by blank lines.
    pub fn with_separate_blocks(mut self, separate: bool) -> Self {
        self.separate_blocks = separate;
        self
    }
}

/// One unit of transcript output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptBlock {
    /// File heading, holding the file's base name
    SectionHeader(String),
    /// Reconstructed highlight text
    QuoteLine(String),
    /// Comment text, rendered after the comment label
    CommentLine(String),
    /// Image embed, holding the excerpt's file name
    ImageRef(String),
}

/// Blocks contributed by one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTranscript {
    blocks: Vec<TranscriptBlock>,
}

impl FileTranscript {
    /// Start a section headed by `base_name`.
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            blocks: vec![TranscriptBlock::SectionHeader(base_name.into())],
        }
    }

    /// Append a quote line.
    pub fn push_quote(&mut self, text: impl Into<String>) {
        self.blocks.push(TranscriptBlock::QuoteLine(text.into()));
    }

    /// Append a comment line.
    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.blocks.push(TranscriptBlock::CommentLine(comment.into()));
    }

    /// Append an image embed.
    pub fn push_image(&mut self, file_name: impl Into<String>) {
        self.blocks.push(TranscriptBlock::ImageRef(file_name.into()));
    }

    /// All blocks, header first.
    pub fn blocks(&self) -> &[TranscriptBlock] {
        &self.blocks
    }

    /// Number of blocks after the header.
    pub fn line_count(&self) -> usize {
        self.blocks.len().saturating_sub(1)
    }

    /// Render this section.
    pub fn render(&self, style: &TranscriptStyle) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            render_block(block, style, &mut out);
        }
        out.push('\n');
        if let Some(page_break) = &style.page_break {
            out.push_str(page_break);
            out.push('\n');
        }
        out
    }
}

fn render_block(block: &TranscriptBlock, style: &TranscriptStyle, out: &mut String) {
    let prefix = style.quote_prefix.as_str();
    match block {
        TranscriptBlock::SectionHeader(name) => {
            out.push_str(&format!("{}{}\n\n", style.section_prefix, name));
            return;
        },
        TranscriptBlock::QuoteLine(text) => {
            out.push_str(&format!("{}{} \n", prefix, text));
        },
        TranscriptBlock::CommentLine(comment) => {
            let continued = comment.replace('\n', &format!("\n{}", prefix));
            out.push_str(&format!("{}{} {} \n", prefix, style.comment_label, continued));
        },
        TranscriptBlock::ImageRef(file_name) => {
            out.push_str(&format!("{}![[{}]]\n\n", prefix, file_name));
            return;
        },
    }
    if style.separate_blocks {
        out.push('\n');
    }
}

/// Make comment text safe to place in a quote line.
///
/// Line endings are normalised to `\n`, other control characters are
/// dropped, and surrounding whitespace is trimmed. Blank comments yield
/// `Ok(None)`; a comment made only of control characters is an
/// [`Error::Encoding`].
pub fn sanitize_comment(comment: &str) -> Result<Option<String>> {
    let normalized = comment.replace("\r\n", "\n").replace('\r', "\n");
    if normalized.trim().is_empty() {
        return Ok(None);
    }
    let cleaned = RE_CONTROL.replace_all(&normalized, "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(Error::Encoding(format!(
            "comment has no printable text ({} control characters)",
            normalized.trim().chars().count()
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// The complete transcript of a batch.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    style: TranscriptStyle,
    files: Vec<FileTranscript>,
}

impl Transcript {
    /// Empty transcript rendered with `style`.
    pub fn new(style: TranscriptStyle) -> Self {
        Self {
            style,
            files: Vec::new(),
        }
    }

    /// Rendering style.
    pub fn style(&self) -> &TranscriptStyle {
        &self.style
    }

    /// Append one file's section.
    pub fn push_file(&mut self, file: FileTranscript) {
        self.files.push(file);
    }

    /// Sections in the order they were added.
    pub fn files(&self) -> &[FileTranscript] {
        &self.files
    }

    /// True when no file contributed a section.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Render all sections.
    pub fn render(&self) -> String {
        self.files.iter().map(|f| f.render(&self.style)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileTranscript {
        let mut file = FileTranscript::new("paper");
        file.push_quote("international treaty");
        file.push_comment("check date");
        file.push_image("Img_P1_1.png");
        file
    }

    #[test]
    fn test_blockquote_format() {
        let style = TranscriptStyle::blockquote().with_page_break(None);
        assert_eq!(
            sample().render(&style),
            "## paper\n\n  > international treaty \n  > Comment: check date \n  > ![[Img_P1_1.png]]\n\n\n"
        );
    }

    #[test]
    fn test_list_item_format() {
        let rendered = sample().render(&TranscriptStyle::list_item());
        assert!(rendered.contains("  - international treaty \n"));
        assert!(rendered.contains("  - Comment: check date \n"));
        assert!(rendered.contains("  - ![[Img_P1_1.png]]\n\n"));
        assert!(!rendered.contains(LATEX_PAGE_BREAK));
    }

    #[test]
    fn test_latex_page_break_after_section() {
        let rendered = sample().render(&TranscriptStyle::blockquote());
        assert!(rendered.ends_with("\n\\newpage\n"));
    }

    #[test]
    fn test_separate_blocks() {
        let style = TranscriptStyle::blockquote()
            .with_page_break(None)
            .with_separate_blocks(true);
        let mut file = FileTranscript::new("paper");
        file.push_quote("one");
        file.push_quote("two");
        assert_eq!(file.render(&style), "## paper\n\n  > one \n\n  > two \n\n\n");
    }

    #[test]
    fn test_custom_label_and_section_prefix() {
        let style = TranscriptStyle::list_item()
            .with_comment_label("Comentário:")
            .with_section_prefix("# ");
        let rendered = sample().render(&style);
        assert!(rendered.starts_with("# paper\n\n"));
        assert!(rendered.contains("  - Comentário: check date \n"));
    }

    #[test]
    fn test_multiline_comment_stays_quoted() {
        let mut file = FileTranscript::new("paper");
        file.push_comment("first\nsecond");
        let rendered = file.render(&TranscriptStyle::list_item());
        assert!(rendered.contains("  - Comment: first\n  - second \n"));
    }

    #[test]
    fn test_sanitize_comment() {
        assert_eq!(sanitize_comment("a\r\nb\rc").unwrap(), Some("a\nb\nc".to_string()));
        assert_eq!(sanitize_comment("bell\x07 text").unwrap(), Some("bell text".to_string()));
        assert_eq!(sanitize_comment("  \n ").unwrap(), None);
        assert_eq!(sanitize_comment("").unwrap(), None);
    }

    #[test]
    fn test_unprintable_comment_is_encoding_error() {
        assert!(matches!(sanitize_comment("\x00\x01"), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_header_only_file() {
        let file = FileTranscript::new("empty");
        assert_eq!(file.line_count(), 0);
        assert_eq!(file.render(&TranscriptStyle::list_item()), "## empty\n\n\n");
    }

    #[test]
    fn test_transcript_keeps_file_order() {
        let mut transcript = Transcript::new(TranscriptStyle::list_item());
        assert!(transcript.is_empty());
        transcript.push_file(FileTranscript::new("b"));
        transcript.push_file(FileTranscript::new("a"));
        let rendered = transcript.render();
        assert!(rendered.find("## b").unwrap() < rendered.find("## a").unwrap());
        assert_eq!(transcript.files().len(), 2);
    }
}
