//! Raw record stream: CSV with the fixed nine-column layout.

use crate::error::TerrasError;
use crate::model::{RawPriceRecord, RAW_COLUMNS};
use crate::parsing::values::{format_number, parse_number};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Write records as CSV, header first, prices in canonical comma-decimal form.
pub fn write_raw_csv<W: Write>(writer: W, records: &[RawPriceRecord]) -> Result<(), TerrasError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(RAW_COLUMNS)?;
    for r in records {
        let ano = r.ano.map(|a| a.to_string()).unwrap_or_default();
        let preco = r.preco.map(format_number).unwrap_or_default();
        wtr.write_record([
            ano.as_str(),
            r.nivel.as_str(),
            r.territorio.as_str(),
            r.territorio_codigo.as_str(),
            r.categoria.as_str(),
            r.subcategoria.as_str(),
            r.classe.as_str(),
            preco.as_str(),
            r.unidade.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_raw_csv_path(path: &Path, records: &[RawPriceRecord]) -> Result<(), TerrasError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    write_raw_csv(File::create(path)?, records)
}

/// Names of required columns absent from `headers`, in canonical order.
pub fn missing_columns(headers: &[&str]) -> Vec<String> {
    RAW_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h.trim() == **col))
        .map(|col| col.to_string())
        .collect()
}

/// Read a raw record CSV. `source` names the input in errors.
///
/// Fails before reading any row when a required column is missing.
pub fn read_raw_csv<R: Read>(reader: R, source: &Path) -> Result<Vec<RawPriceRecord>, TerrasError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing = missing_columns(&headers.iter().collect::<Vec<_>>());
    if !missing.is_empty() {
        return Err(TerrasError::MissingColumns {
            path: source.to_path_buf(),
            missing,
        });
    }

    let index: Vec<usize> = RAW_COLUMNS
        .iter()
        .filter_map(|col| headers.iter().position(|h| h.trim() == *col))
        .collect();

    let mut records = Vec::new();
    for (line_num, result) in rdr.records().enumerate() {
        let row = result?;
        let field = |i: usize| row.get(index[i]).unwrap_or("").trim().to_string();

        let ano_raw = field(0);
        let ano = if ano_raw.is_empty() {
            None
        } else {
            Some(ano_raw.parse::<i32>().map_err(|_| TerrasError::InvalidRecord {
                path: source.to_path_buf(),
                line: line_num + 2, // 1-indexed plus header row
                reason: format!("invalid year '{}'", ano_raw),
            })?)
        };

        records.push(RawPriceRecord {
            ano,
            nivel: field(1),
            territorio: field(2),
            territorio_codigo: field(3),
            categoria: field(4),
            subcategoria: field(5),
            classe: field(6),
            preco: parse_number(&field(7)),
            unidade: field(8),
        });
    }

    Ok(records)
}

pub fn read_raw_csv_path(path: &Path) -> Result<Vec<RawPriceRecord>, TerrasError> {
    read_raw_csv(File::open(path)?, path)
}
