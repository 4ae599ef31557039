//! Configuration for annotation extraction.

use crate::converters::{TranscriptStyle, COMMENT_LABEL};
use crate::extractors::MergeStrategy;
use crate::rendering::{RenderOptions, DEFAULT_MAGNIFICATION};

/// Default name of the transcript file written into the input directory.
pub const DEFAULT_OUTPUT_FILE: &str = "annotations.md";

/// What the transcript will be converted to afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// PDF through LaTeX: blockquote lines and a page break per file
    #[default]
    Latex,
    /// HTML: list-item lines
    Html,
}

impl OutputTarget {
    /// Transcript preset for this target.
    pub fn style(&self) -> TranscriptStyle {
        match self {
            Self::Latex => TranscriptStyle::blockquote(),
            Self::Html => TranscriptStyle::list_item(),
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Output target, selects the transcript preset.
    pub target: OutputTarget,

    /// How text from several highlighted regions is merged.
    pub merge_strategy: MergeStrategy,

    /// Magnification applied to image excerpts.
    pub magnification: f32,

    /// Label placed before comment text.
    pub comment_label: String,

    /// Transcript file name.
    pub output_file_name: String,

    /// Search subdirectories for source files.
    pub recursive: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            target: OutputTarget::default(),
            merge_strategy: MergeStrategy::default(),
            magnification: DEFAULT_MAGNIFICATION,
            comment_label: COMMENT_LABEL.to_string(),
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            recursive: true,
        }
    }

    /// Set the output target.
    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the merge strategy.
    pub fn with_merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    /// Set the image magnification.
    pub fn with_magnification(mut self, magnification: f32) -> Self {
        self.magnification = magnification;
        self
    }

    /// Set the comment label.
    pub fn with_comment_label(mut self, label: impl Into<String>) -> Self {
        self.comment_label = label.into();
        self
    }

    /// Set the transcript file name.
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    /// Enable or disable recursive discovery.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Transcript style for this configuration.
    pub fn transcript_style(&self) -> TranscriptStyle {
        self.target.style().with_comment_label(self.comment_label.clone())
    }

    /// Render options for image excerpts.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::with_magnification(self.magnification)
    }
}
