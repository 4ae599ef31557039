//! Extraction of transcript content from annotations.
//!
//! - [`span`]: text under highlight quads
//! - [`area`]: image excerpts for drawn regions

pub mod area;
pub mod span;

pub use area::{
    derive_title, image_file_name, AreaExporter, ExportedImage, ImageNamer, PendingTitle,
};
pub use span::{merge_token_sequences, CoveredRanges, MergeStrategy, MergedSpan, SpanReconstructor};
