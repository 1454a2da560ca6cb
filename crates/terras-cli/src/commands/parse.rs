use super::{extractor_for, file_name};
use std::path::PathBuf;
use terras_core::config::{ContextScope, PipelineConfig};
use terras_core::error::TerrasError;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    context_scope: Option<ContextScope>,
) -> Result<(), TerrasError> {
    let bytes = std::fs::read(&input_file)?;
    let config = PipelineConfig {
        context_scope: context_scope.unwrap_or_default(),
        ..Default::default()
    };

    let extractor = extractor_for(&input_file);
    let outcome =
        terras_core::extract_pdf(&bytes, &file_name(&input_file), extractor.as_ref(), &config)?;

    match output_format {
        "json" => output::json::print(&outcome.records)?,
        _ => output::table::print(&outcome),
    }

    Ok(())
}
