//! Output converters for annotation transcripts.
//!
//! The only output format is the Markdown transcript built by
//! [`Transcript`]. Two presets exist: blockquote lines for PDF/LaTeX
//! typesetting and list-item lines for HTML conversion.
//!
//! # Examples
//!
//! ```
//! use annot_oxide::converters::{FileTranscript, Transcript, TranscriptStyle};
//!
//! let mut file = FileTranscript::new("paper");
//! file.push_quote("international treaty");
//! file.push_comment("check the date");
//!
//! let mut transcript = Transcript::new(TranscriptStyle::list_item());
//! transcript.push_file(file);
//! assert!(transcript.render().starts_with("## paper\n\n  - international treaty \n"));
//! ```

pub mod transcript;

// Re-export main types
pub use transcript::{
    sanitize_comment, FileTranscript, Transcript, TranscriptBlock, TranscriptStyle,
    BLOCKQUOTE_PREFIX, COMMENT_LABEL, LIST_ITEM_PREFIX,
};
