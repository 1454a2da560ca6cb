use super::{extractor_for, file_name, is_text_file, list_files, resolve_config};
use std::path::{Path, PathBuf};
use terras_core::config::{ContextScope, PipelineConfig};
use terras_core::error::TerrasError;
use terras_core::extraction::pdftotext::PdftotextExtractor;
use terras_core::extraction::PdfExtractor;
use terras_core::model::RawPriceRecord;
use terras_core::records::write_raw_csv_path;
use tracing::{info, warn};

pub fn run(
    input_dir: PathBuf,
    out: PathBuf,
    config_file: Option<PathBuf>,
    context_scope: Option<ContextScope>,
) -> Result<(), TerrasError> {
    let mut config = resolve_config(config_file.as_deref())?;
    if let Some(scope) = context_scope {
        config.context_scope = scope;
    }

    let documents = list_files(&input_dir, &["pdf", "txt"])?;
    if documents.is_empty() {
        return Err(TerrasError::NoDocuments(input_dir));
    }
    if documents.iter().any(|p| !is_text_file(p)) && !PdftotextExtractor::is_available() {
        return Err(TerrasError::PdftotextNotFound);
    }

    let (records, skipped) = compile(&documents, &config, extractor_for);

    write_raw_csv_path(&out, &records)?;
    info!(
        path = %out.display(),
        documents = documents.len(),
        skipped,
        records = records.len(),
        "wrote raw records"
    );

    Ok(())
}

/// Parse each document in turn. Unreadable, unparsable or undetected
/// documents are counted as skipped and do not stop the run.
fn compile(
    documents: &[PathBuf],
    config: &PipelineConfig,
    pick_extractor: impl Fn(&Path) -> Box<dyn PdfExtractor>,
) -> (Vec<RawPriceRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for path in documents {
        let filename = file_name(path);
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file = %filename, error = %e, "could not read document; skipping");
                skipped += 1;
                continue;
            }
        };

        let extractor = pick_extractor(path);
        match terras_core::extract_pdf(&bytes, &filename, extractor.as_ref(), config) {
            Ok(outcome) => {
                if outcome.format.is_none() {
                    skipped += 1;
                }
                records.extend(outcome.records);
            }
            Err(e) => {
                warn!(file = %filename, error = %e, "extraction failed; skipping");
                skipped += 1;
            }
        }
    }

    (records, skipped)
}
