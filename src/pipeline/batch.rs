//! Batch extraction over a directory tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExtractionConfig;
use crate::converters::Transcript;
use crate::document::DocumentLoader;
use crate::error::Result;

use super::AnnotationPipeline;

/// Collect files under `dir` whose extension is `extension`, sorted by path.
///
/// The extension match ignores ASCII case. Subdirectories are searched when
/// `recursive` is set; unreadable subdirectories are logged and skipped.
/// Symbolic links to directories are never followed, so every file is found
/// at most once. Symbolic links to files are kept.
pub fn discover(dir: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(dir, extension, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(dir: &Path, extension: &str, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)?.filter_map(|e| e.ok()) {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                log::warn!("Cannot stat {}: {}", path.display(), e);
                continue;
            },
        };
        if file_type.is_symlink() && path.is_dir() {
            log::debug!("Not following directory link {}", path.display());
        } else if file_type.is_dir() {
            if recursive {
                if let Err(e) = collect(&path, extension, recursive, files) {
                    log::warn!("Cannot read directory {}: {}", path.display(), e);
                }
            }
        } else if path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Sections of every file that was transcribed
    pub transcript: Transcript,
    /// Files that were transcribed, in order
    pub processed: Vec<PathBuf>,
    /// Files that failed, with the failure message
    pub skipped: Vec<(PathBuf, String)>,
}

/// Runs the pipeline over many files and writes the transcript.
pub struct BatchExtractor<L: DocumentLoader> {
    loader: L,
    config: ExtractionConfig,
    pipeline: AnnotationPipeline,
}

impl<L: DocumentLoader> BatchExtractor<L> {
    /// Create an extractor using `loader` to open source files.
    pub fn new(loader: L, config: ExtractionConfig) -> Self {
        let pipeline = AnnotationPipeline::new(&config);
        Self {
            loader,
            config,
            pipeline,
        }
    }

    /// Source files under `dir`.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        discover(dir, self.loader.source_extension(), self.config.recursive)
    }

    /// Transcribe `files` in order.
    ///
    /// A file that fails to load or parse is logged and recorded in
    /// [`BatchReport::skipped`]; the batch always runs to the end.
    pub fn run(&self, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport {
            transcript: Transcript::new(self.config.transcript_style()),
            processed: Vec::new(),
            skipped: Vec::new(),
        };

        for path in files {
            log::info!("Processing {}", path.display());
            let result = self
                .loader
                .load(path)
                .and_then(|doc| self.pipeline.process_document(doc.as_ref(), path));
            match result {
                Ok(file) => {
                    report.transcript.push_file(file);
                    report.processed.push(path.clone());
                },
                Err(e) => {
                    log::error!("Skipping {}: {}", path.display(), e);
                    report.skipped.push((path.clone(), e.to_string()));
                },
            }
        }
        report
    }

    /// Discover and transcribe every source file under `dir`.
    pub fn extract_dir(&self, dir: &Path) -> Result<BatchReport> {
        let files = self.discover(dir)?;
        log::info!("Found {} file(s) in {}", files.len(), dir.display());
        Ok(self.run(&files))
    }

    /// Write the rendered transcript into `dir`, replacing any previous one.
    pub fn write_transcript(&self, report: &BatchReport, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.config.output_file_name);
        fs::write(&path, report.transcript.render())?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }
}
