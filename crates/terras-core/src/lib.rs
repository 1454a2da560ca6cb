pub mod config;
pub mod error;
pub mod extraction;
pub mod metadata;
pub mod model;
pub mod nomenclature;
pub mod parsing;
pub mod records;
pub mod territory;
pub mod text;

use config::PipelineConfig;
use error::TerrasError;
use extraction::PdfExtractor;
use model::{PriceRecord, RawPriceRecord, NIVEL_MUNICIPIO};
use nomenclature::normalize_nomenclature;
use parsing::DocumentOutcome;
use territory::{is_valid_municipality, Gazetteer};
use tracing::{debug, info};

/// Main API entry point: extract raw price records from one report.
///
/// A document whose layout cannot be detected yields an outcome with no
/// format and no records rather than an error.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    filename: &str,
    extractor: &dyn PdfExtractor,
    config: &PipelineConfig,
) -> Result<DocumentOutcome, TerrasError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let outcome = parsing::parse_document(filename, &pages, config);

    match outcome.format {
        Some(format) => info!(
            filename,
            %format,
            pages = pages.len(),
            records = outcome.records.len(),
            "parsed document"
        ),
        None => info!(
            filename,
            backend = extractor.backend_name(),
            "no known table layout; document skipped"
        ),
    }

    Ok(outcome)
}

/// Turn raw records into canonical ones, preserving order.
///
/// Rows without a year and municipal rows with artifact names are dropped,
/// nomenclature is unified and regions are joined from the gazetteer when
/// it knows the name.
pub fn normalize_records(
    raw: Vec<RawPriceRecord>,
    gazetteer: &Gazetteer,
    config: &PipelineConfig,
) -> Vec<PriceRecord> {
    let mut out = Vec::with_capacity(raw.len());
    let mut enriched = 0;

    for r in raw {
        if r.nivel == NIVEL_MUNICIPIO && !is_valid_municipality(&r.territorio) {
            debug!(territorio = %r.territorio, "dropping non-municipality row");
            continue;
        }
        if r.ano.is_none() {
            debug!(territorio = %r.territorio, "dropping row without a year");
            continue;
        }
        if config.drop_null_prices && r.preco.is_none() {
            continue;
        }

        let mut record = PriceRecord::from(r);
        let (categoria, subcategoria) =
            normalize_nomenclature(&record.categoria, &record.subcategoria);
        record.categoria = categoria;
        record.subcategoria = subcategoria;
        if gazetteer.enrich(&mut record) {
            enriched += 1;
        }
        out.push(record);
    }

    debug!(records = out.len(), enriched, "normalized records");
    out
}
