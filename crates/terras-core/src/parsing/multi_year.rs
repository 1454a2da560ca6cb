//! Multi-year layout: years as columns, land classes grouped under a
//! "<municipality> <soil type>" header that repeats per soil block.

use super::header::{extract_years, is_boilerplate, is_header_line, number_tokens};
use super::values::parse_number;
use super::LineKind;
use crate::model::RawPriceRecord;
use crate::text::{collapse_ws, fold, has_digit};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Class-name prefixes (folded) and their display labels, in match order.
const CLASS_NAMES: &[(&str, &str)] = &[
    ("mecanizada", "Mecanizada"),
    ("mecanizavel", "Mecanizável"),
    ("nao mecanizavel", "Não Mecanizável"),
    ("inaproveitaveis", "Inaproveitáveis"),
];

const SOIL_TYPES: &[&str] = &[
    "Roxa",
    "Mista",
    "Arenosa",
    "Orgânica",
    "Hidromórfica",
    "Brunada",
    "Brunizada",
];

/// Folded soil name -> display name.
static SOIL_DISPLAY: LazyLock<HashMap<String, &'static str>> =
    LazyLock::new(|| SOIL_TYPES.iter().map(|s| (fold(s), *s)).collect());

/// State carried forward while scanning a multi-year table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiYearContext {
    pub territorio: Option<String>,
    pub categoria: Option<String>,
    pub anos: Vec<i32>,
}

/// Advance the context by one line, appending any price records to `out`.
pub fn step(ctx: &mut MultiYearContext, line: &str, out: &mut Vec<RawPriceRecord>) -> LineKind {
    let line = line.trim();
    if line.is_empty() || is_boilerplate(line) {
        return LineKind::Skipped;
    }

    if is_header_line(line) {
        let anos = extract_years(line);
        if !anos.is_empty() {
            ctx.anos = anos;
        }
        return LineKind::Header;
    }

    // pdftotext -layout pads cells with runs of spaces.
    let folded = collapse_ws(&fold(line));

    if has_digit(line) {
        let Some((_, display)) = CLASS_NAMES
            .iter()
            .find(|(prefix, _)| folded.starts_with(prefix))
        else {
            return LineKind::Ignored;
        };
        let before = out.len();
        if let Some(territorio) = ctx.territorio.as_deref() {
            let categoria = ctx.categoria.as_deref().unwrap_or("");
            let values = number_tokens(line).into_iter().map(parse_number);
            for (&ano, value) in ctx.anos.iter().zip(values) {
                if let Some(preco) = value {
                    out.push(RawPriceRecord::municipal(
                        ano, territorio, categoria, display, preco,
                    ));
                }
            }
        }
        return LineKind::Prices(out.len() - before);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(last) = tokens.last() else {
        return LineKind::Skipped;
    };

    if let Some(soil) = SOIL_DISPLAY.get(&fold(last)) {
        if tokens.len() > 1 {
            ctx.territorio = Some(tokens[..tokens.len() - 1].join(" "));
        }
        ctx.categoria = Some(soil.to_string());
        return LineKind::SoilHeader;
    }

    // Column caption of the soil block ("Tipo de Solo ...").
    if folded.starts_with("tipo de") {
        return LineKind::Skipped;
    }

    if tokens.len() > 1 {
        ctx.territorio = Some(collapse_ws(line));
        return LineKind::Territory;
    }

    LineKind::Ignored
}

/// Parse every line of one page's text under a shared context.
pub fn parse_text(ctx: &mut MultiYearContext, text: &str) -> Vec<RawPriceRecord> {
    let mut out = Vec::new();
    for line in text.lines() {
        step(ctx, line, &mut out);
    }
    out
}
