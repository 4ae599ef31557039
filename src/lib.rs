// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # Annot Oxide
//!
//! Turn the markup readers leave in PDFs into a Markdown transcript.
//!
//! ## Core Features
//!
//! - **Highlight reconstruction**: recovers the exact words under each
//!   highlighted quad and merges multi-line highlights into one passage
//! - **Hyphenation cleanup**: joins words split across line breaks
//! - **Comments**: sticky notes and highlight comments become quoted lines
//! - **Image excerpts**: drawn rectangles, ellipses, ink and stamps are
//!   rendered at 5× magnification and embedded by file name
//! - **Batch mode**: every file under a directory, one section per file,
//!   a failing file never stops the batch
//!
//! ## Architecture
//!
//! Document parsing is a collaborator behind the [`AnnotatedDocument`] and
//! [`DocumentLoader`] traits. [`PdfLoader`] reads PDF files through the
//! `pdf_oxide` engine; [`LayoutLoader`] reads a JSON page-layout sidecar
//! next to each source file instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use annot_oxide::{BatchExtractor, ExtractionConfig, OutputTarget, PdfLoader};
//!
//! # fn main() -> annot_oxide::Result<()> {
//! let config = ExtractionConfig::new().with_target(OutputTarget::Html);
//! let extractor = BatchExtractor::new(PdfLoader::new(), config);
//!
//! let dir = Path::new("papers");
//! let report = extractor.extract_dir(dir)?;
//! extractor.write_transcript(&report, dir)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Document collaborator
pub mod document;

// Geometry and page layout
pub mod geometry;
pub mod layout;

// Text reconstruction and image excerpts
pub mod extractors;
pub mod text;

// Region rendering
pub mod rendering;

// Annotation model
/// Annotation subtypes, kinds and quad points
pub mod annotation_types;
pub mod annotations;

// Transcript output
pub mod converters;

// Extraction pipeline
pub mod pipeline;

// Configuration
pub mod config;

// Re-exports
pub use annotation_types::{AnnotationKind, AnnotationSubtype, QuadPoint};
pub use annotations::Annotation;
pub use config::{ExtractionConfig, OutputTarget};
pub use converters::{FileTranscript, Transcript, TranscriptStyle};
pub use document::{
    AnnotatedDocument, DocumentLoader, LayoutDocument, LayoutLoader, PdfFileDocument, PdfLoader,
};
pub use error::{Error, Result};
pub use extractors::{MergeStrategy, SpanReconstructor};
pub use pipeline::{AnnotationPipeline, BatchExtractor, BatchReport};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
