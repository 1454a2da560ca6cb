pub mod header;
pub mod multi_year;
pub mod single_year;
pub mod values;

use crate::config::{ContextScope, PipelineConfig};
use crate::extraction::PageContent;
use crate::model::{RawPriceRecord, TableFormat};
use crate::text::{collapse_ws, fold};
use header::year_from_filename;
use multi_year::MultiYearContext;
use single_year::SingleYearContext;
use tracing::{debug, warn};

/// What a single line did to the parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank, boilerplate or caption line.
    Skipped,
    /// Column header (years or class codes).
    Header,
    /// Data line; carries the number of records emitted.
    Prices(usize),
    /// "<municipality> <soil type>" block header.
    SoilHeader,
    /// Territory name continuation.
    Territory,
    /// Line that matched no rule.
    Ignored,
}

/// Classify page text as one of the known layouts, or None when unknown.
pub fn detect_format(text: &str) -> Option<TableFormat> {
    let lines: Vec<String> = text.lines().map(|l| collapse_ws(&fold(l))).collect();
    if lines.iter().any(|l| l.contains("municipio classe / grau")) {
        Some(TableFormat::MultiYear)
    } else if lines.iter().any(|l| l.contains("municipio a-")) {
        Some(TableFormat::SingleYear)
    } else {
        None
    }
}

/// Result of parsing one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentOutcome {
    pub format: Option<TableFormat>,
    pub year_hint: Option<i32>,
    pub records: Vec<RawPriceRecord>,
}

/// Parse all pages of one document in order.
///
/// The format is taken from the first page that yields one and applies to
/// every page after it. Pages before that contribute nothing. Parser state
/// lives for the whole document unless `context_scope` is `Page`.
pub fn parse_document(
    filename: &str,
    pages: &[PageContent],
    config: &PipelineConfig,
) -> DocumentOutcome {
    let year_hint = year_from_filename(filename);
    let mut format = None;
    let mut multi = MultiYearContext::default();
    let mut single = year_hint.map(SingleYearContext::new);
    let mut records = Vec::new();

    for page in pages {
        let text = page.text();
        if format.is_none() {
            format = detect_format(&text);
            if let Some(detected) = format {
                debug!(filename, page = page.page_number, format = %detected, "detected table format");
            }
        }

        if config.context_scope == ContextScope::Page {
            multi = MultiYearContext::default();
            single = year_hint.map(SingleYearContext::new);
        }

        match format {
            Some(TableFormat::MultiYear) => {
                records.extend(multi_year::parse_text(&mut multi, &text));
            }
            Some(TableFormat::SingleYear) => {
                if let Some(ctx) = single.as_mut() {
                    records.extend(single_year::parse_text(ctx, &text));
                }
            }
            None => {}
        }
    }

    if format == Some(TableFormat::SingleYear) && year_hint.is_none() {
        warn!(filename, "single-year table without a year in the filename; document skipped");
    }

    DocumentOutcome {
        format,
        year_hint,
        records,
    }
}
