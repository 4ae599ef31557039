//! Error types for annotation extraction.
//!
//! Failures are contained at two boundaries: a render or encoding failure
//! drops one annotation's output, a parse failure drops one file's
//! contribution. Missing geometry is not an error at all.

use std::path::PathBuf;

/// Result type alias for annotation extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a transcript.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document-parsing collaborator could not open or parse a file
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Reason reported by the collaborator
        reason: String,
    },

    /// Rendering an area excerpt failed
    #[error("Render failure: {0}")]
    Render(String),

    /// Text could not be represented safely in the transcript or a file name
    #[error("Encoding failure: {0}")]
    Encoding(String),

    /// Page index outside the document
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested zero-based page index
        page: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed page-layout JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Build a parse error for `path`.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error should abort the whole file rather than one annotation.
    pub fn is_file_level(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::Json(_) | Error::PageOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_file() {
        let err = Error::parse("/tmp/paper.pdf", "missing layout");
        let msg = format!("{}", err);
        assert!(msg.contains("paper.pdf"));
        assert!(msg.contains("missing layout"));
        assert!(err.is_file_level());
    }

    #[test]
    fn test_render_error_is_annotation_level() {
        let err = Error::Render("empty clip".to_string());
        assert!(format!("{}", err).contains("empty clip"));
        assert!(!err.is_file_level());
    }

    #[test]
    fn test_page_out_of_range() {
        let err = Error::PageOutOfRange { page: 7, count: 3 };
        let msg = format!("{}", err);
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
