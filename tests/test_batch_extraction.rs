//! End-to-end tests for batch transcript extraction.
//!
//! Each test builds a directory of source files with page-layout sidecars
//! and page rasters, runs the batch extractor and inspects the transcript
//! and the image excerpts written next to the sources.

use std::fs;
use std::path::Path;

use annot_oxide::{
    BatchExtractor, ExtractionConfig, LayoutLoader, MergeStrategy, OutputTarget,
};
use tempfile::TempDir;

const PAPER_A: &str = r##"{
    "pages": [
        {
            "width": 100.0, "height": 50.0, "raster": "raster.png",
            "words": [
                { "bbox": [0.0, 0.0, 40.0, 10.0], "text": "Hello" },
                { "bbox": [50.0, 0.0, 90.0, 10.0], "text": "world" }
            ],
            "annotations": [
                { "subtype": "Highlight",
                  "vertices": [[0.0, 0.0], [100.0, 0.0], [0.0, 10.0], [100.0, 10.0]],
                  "contents": "greeting" },
                { "subtype": "Square", "rect": [10.0, 20.0, 30.0, 30.0], "contents": "#Fig3\rcaption" },
                { "subtype": "Circle", "rect": [40.0, 20.0, 60.0, 40.0] }
            ]
        },
        {
            "width": 100.0, "height": 50.0, "raster": "raster.png",
            "annotations": [
                { "subtype": "Ink", "rect": [0.0, 0.0, 10.0, 10.0] }
            ]
        }
    ]
}"##;

const PAPER_C: &str = r#"{
    "pages": [
        { "width": 100.0, "height": 50.0,
          "annotations": [ { "subtype": "Text", "rect": [0.0, 0.0, 5.0, 5.0], "contents": "just a note" } ] }
    ]
}"#;

/// Write `<name>.pdf` and its sidecar into `dir`.
fn add_source(dir: &Path, name: &str, sidecar: &str) {
    fs::write(dir.join(format!("{}.pdf", name)), b"%PDF-1.4\n").unwrap();
    fs::write(dir.join(format!("{}.layout.json", name)), sidecar).unwrap();
}

fn add_raster(dir: &Path) {
    image::RgbaImage::from_pixel(200, 100, image::Rgba([255, 255, 255, 255]))
        .save(dir.join("raster.png"))
        .unwrap();
}

fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    add_raster(dir.path());
    add_source(dir.path(), "a", PAPER_A);
    add_source(dir.path(), "b", "{ this is not json");
    add_source(dir.path(), "c", PAPER_C);
    dir
}

#[test]
fn test_failed_file_is_skipped_and_others_transcribed() {
    let dir = corpus();
    let config = ExtractionConfig::new().with_target(OutputTarget::Html);
    let extractor = BatchExtractor::new(LayoutLoader::new(), config);

    let report = extractor.extract_dir(dir.path()).unwrap();
    assert_eq!(report.processed.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].0.ends_with("b.pdf"));

    let path = extractor.write_transcript(&report, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("annotations.md"));
    let transcript = fs::read_to_string(path).unwrap();
    assert_eq!(
        transcript,
        "## a\n\n\
         \x20 - Hello world \n\
         \x20 - Comment: greeting \n\
         \x20 - ![[Img_P1_Fig3.png]]\n\n\
         \x20 - ![[Img_P1_1.png]]\n\n\
         \x20 - ![[Img_P2_1.png]]\n\n\
         \n\
         ## c\n\n\
         \x20 - Comment: just a note \n\
         \n"
    );
}

#[test]
fn test_images_written_beside_source() {
    let dir = corpus();
    let extractor = BatchExtractor::new(LayoutLoader::new(), ExtractionConfig::new());
    extractor.extract_dir(dir.path()).unwrap();

    let fig = image::open(dir.path().join("Img_P1_Fig3.png")).unwrap();
    // 20x10 page units magnified 5x
    assert_eq!((fig.width(), fig.height()), (100, 50));
    assert!(dir.path().join("Img_P1_1.png").exists());
    assert!(dir.path().join("Img_P2_1.png").exists());
}

#[test]
fn test_latex_target_uses_blockquotes_and_page_breaks() {
    let dir = corpus();
    let extractor = BatchExtractor::new(LayoutLoader::new(), ExtractionConfig::new());
    let report = extractor.extract_dir(dir.path()).unwrap();
    let text = report.transcript.render();

    assert!(text.contains("  > Hello world \n"));
    assert!(text.contains("  > Comment: just a note \n"));
    assert_eq!(text.matches("\\newpage\n").count(), 2);
}

#[test]
fn test_missing_raster_skips_only_images() {
    let dir = TempDir::new().unwrap();
    add_source(dir.path(), "a", PAPER_A);

    let extractor = BatchExtractor::new(LayoutLoader::new(), ExtractionConfig::new());
    let report = extractor.extract_dir(dir.path()).unwrap();
    assert_eq!(report.processed.len(), 1);

    let text = report.transcript.render();
    assert!(text.contains("Hello world"));
    assert!(!text.contains("![["));
}

#[test]
fn test_non_recursive_discovery() {
    let dir = corpus();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    add_source(&nested, "d", PAPER_C);

    let recursive = BatchExtractor::new(LayoutLoader::new(), ExtractionConfig::new());
    assert_eq!(recursive.discover(dir.path()).unwrap().len(), 4);

    let flat = BatchExtractor::new(
        LayoutLoader::new(),
        ExtractionConfig::new().with_recursive(false),
    );
    assert_eq!(flat.discover(dir.path()).unwrap().len(), 3);
}

#[test]
fn test_custom_output_name_and_merge() {
    let dir = corpus();
    let config = ExtractionConfig::new()
        .with_merge_strategy(MergeStrategy::SequenceDiff)
        .with_output_file_name("notes.md");
    let extractor = BatchExtractor::new(LayoutLoader::new(), config);
    let report = extractor.extract_dir(dir.path()).unwrap();
    let path = extractor.write_transcript(&report, dir.path()).unwrap();

    assert!(path.ends_with("notes.md"));
    assert!(fs::read_to_string(path).unwrap().contains("Hello world"));
}

#[test]
fn test_empty_directory_writes_empty_transcript() {
    let dir = TempDir::new().unwrap();
    let extractor = BatchExtractor::new(LayoutLoader::new(), ExtractionConfig::new());
    let report = extractor.extract_dir(dir.path()).unwrap();
    assert!(report.transcript.is_empty());

    let path = extractor.write_transcript(&report, dir.path()).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "");
}

#[test]
fn test_image_names_are_scoped_to_one_source() {
    let dir = TempDir::new().unwrap();
    add_raster(dir.path());
    let untitled = r#"{ "pages": [ { "width": 100.0, "height": 50.0, "raster": "raster.png",
        "annotations": [ { "subtype": "Square", "rect": [0.0, 0.0, 10.0, 10.0] } ] } ] }"#;
    add_source(dir.path(), "first", untitled);
    add_source(dir.path(), "second", untitled);

    let extractor = BatchExtractor::new(LayoutLoader::new(), ExtractionConfig::new());
    let report = extractor.extract_dir(dir.path()).unwrap();
    let text = report.transcript.render();

    // Both sections embed the same name; the second source's excerpt is the one on disk
    assert_eq!(text.matches("![[Img_P1_1.png]]").count(), 2);
    let pngs = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("Img_"))
        .count();
    assert_eq!(pngs, 1);
}
