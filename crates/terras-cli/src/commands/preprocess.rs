use super::{list_files, resolve_config};
use serde::Serialize;
use std::path::{Path, PathBuf};
use terras_core::error::TerrasError;
use terras_core::metadata::build_metadata;
use terras_core::records::read_raw_csv_path;
use terras_core::territory::Gazetteer;
use tracing::{info, warn};

const COMPILED_CSV: &str = "compiled.csv";

pub fn run(
    input: PathBuf,
    out_dir: PathBuf,
    gazetteer_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    drop_null_prices: bool,
) -> Result<(), TerrasError> {
    let mut config = resolve_config(config_file.as_deref())?;
    if drop_null_prices {
        config.drop_null_prices = true;
    }
    if gazetteer_file.is_some() {
        config.gazetteer = gazetteer_file;
    }

    let sources = csv_sources(&input)?;
    let mut raw = Vec::new();
    for path in &sources {
        raw.extend(read_raw_csv_path(path)?);
    }

    let gazetteer = match config.gazetteer.as_deref() {
        Some(path) => Gazetteer::load(path)?.unwrap_or_else(|| {
            warn!(path = %path.display(), "gazetteer not found; regions left blank");
            Gazetteer::default()
        }),
        None => {
            warn!("no gazetteer configured; regions left blank");
            Gazetteer::default()
        }
    };

    let records = terras_core::normalize_records(raw, &gazetteer, &config);
    let metadata = build_metadata(&records);

    std::fs::create_dir_all(&out_dir)?;
    let detailed_path = out_dir.join("detailed.json");
    let aggregated_path = out_dir.join("aggregated.json");
    write_json(&detailed_path, &records)?;
    write_json(&aggregated_path, &metadata)?;

    info!(
        sources = sources.len(),
        records = records.len(),
        gazetteer_entries = gazetteer.len(),
        detailed = %detailed_path.display(),
        aggregated = %aggregated_path.display(),
        "wrote normalized dataset"
    );

    Ok(())
}

/// A single CSV, or a directory's compiled.csv, or else every CSV in it.
fn csv_sources(input: &Path) -> Result<Vec<PathBuf>, TerrasError> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }
    let compiled = input.join(COMPILED_CSV);
    if compiled.is_file() {
        return Ok(vec![compiled]);
    }
    let files = list_files(input, &["csv"])?;
    if files.is_empty() {
        return Err(TerrasError::NoDocuments(input.to_path_buf()));
    }
    Ok(files)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TerrasError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
