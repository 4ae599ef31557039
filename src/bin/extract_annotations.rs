//! Extract PDF annotations into a Markdown transcript
//!
//! Walks a directory, transcribes the highlights, comments and drawn regions
//! of every PDF found, and writes `annotations.md` into that directory.
//!
//! Usage:
//!   extract_annotations -d <DIR>                 - blockquote transcript for PDF/LaTeX
//!   extract_annotations -d <DIR> --html          - list-item transcript for HTML
//!   extract_annotations -d <DIR> --merge diff    - sequence-diff merge of multi-line highlights

use std::path::PathBuf;

use annot_oxide::{
    BatchExtractor, ExtractionConfig, MergeStrategy, OutputTarget, PdfLoader,
};
use clap::{Arg, ArgAction, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("extract_annotations")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transcribe PDF highlights, comments and drawn regions to Markdown")
        .arg(
            Arg::new("directory")
                .long("directory")
                .short('d')
                .help("Directory containing the PDF files")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Format the transcript for HTML conversion (list items)")
                .action(ArgAction::SetTrue)
                .conflicts_with("pdf"),
        )
        .arg(
            Arg::new("pdf")
                .long("pdf")
                .help("Format the transcript for PDF/LaTeX conversion (blockquotes, default)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("merge")
                .long("merge")
                .help("How multi-line highlights are merged")
                .value_parser(["union", "diff"])
                .default_value("union"),
        )
        .arg(
            Arg::new("no-recursive")
                .long("no-recursive")
                .help("Only look at files directly inside the directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Transcript file name")
                .default_value("annotations.md"),
        )
        .get_matches();

    let dir = matches
        .get_one::<PathBuf>("directory")
        .expect("directory is required");
    let target = if matches.get_flag("html") {
        OutputTarget::Html
    } else {
        OutputTarget::Latex
    };
    let merge = matches
        .get_one::<String>("merge")
        .and_then(|name| MergeStrategy::from_name(name))
        .unwrap_or_default();
    let output = matches.get_one::<String>("output").unwrap();

    let config = ExtractionConfig::new()
        .with_target(target)
        .with_merge_strategy(merge)
        .with_recursive(!matches.get_flag("no-recursive"))
        .with_output_file_name(output.as_str());
    let extractor = BatchExtractor::new(PdfLoader::new(), config);

    let report = extractor.extract_dir(dir).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", dir.display(), e);
        std::process::exit(1);
    });
    let path = extractor.write_transcript(&report, dir).unwrap_or_else(|e| {
        eprintln!("Cannot write transcript: {}", e);
        std::process::exit(1);
    });

    println!(
        "Transcribed {} file(s), skipped {} → {}",
        report.processed.len(),
        report.skipped.len(),
        path.display()
    );
    for (file, reason) in &report.skipped {
        println!("  skipped {}: {}", file.display(), reason);
    }
}
