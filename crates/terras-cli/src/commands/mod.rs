pub mod extract;
pub mod parse;
pub mod preprocess;

use std::path::{Path, PathBuf};
use terras_core::config::{load_config, PipelineConfig};
use terras_core::error::TerrasError;
use terras_core::extraction::pdftotext::PdftotextExtractor;
use terras_core::extraction::{PdfExtractor, PlainTextExtractor};

/// Config from `--config`, or defaults when no file was given.
fn resolve_config(path: Option<&Path>) -> Result<PipelineConfig, TerrasError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(PipelineConfig::default()),
    }
}

/// Files directly inside `dir` with one of `extensions`, sorted by path.
fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, TerrasError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

/// Pre-extracted .txt pages are read as is; everything else goes through pdftotext.
fn extractor_for(path: &Path) -> Box<dyn PdfExtractor> {
    if is_text_file(path) {
        Box::new(PlainTextExtractor)
    } else {
        Box::new(PdftotextExtractor::new())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
