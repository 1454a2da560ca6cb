use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TerrasError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no input documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    #[error("{} is missing required columns: {}", .path.display(), .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("invalid record in {} at line {line}: {reason}", .path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to load gazetteer from {}: {reason}", .path.display())]
    GazetteerLoad { path: PathBuf, reason: String },

    #[error("failed to load config from {}: {reason}", .path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
