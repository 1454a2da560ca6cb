//! Single-year layout: class codes as columns, one municipality per row.

use super::header::{extract_class_codes, is_boilerplate, is_header_line, number_tokens};
use super::values::parse_number;
use super::LineKind;
use crate::model::RawPriceRecord;

/// Category label attached to every single-year record.
pub const CATEGORIA_CLASSE_DE_TERRA: &str = "Classe de Terra";

#[derive(Debug, Clone, PartialEq)]
pub struct SingleYearContext {
    pub ano: i32,
    pub codes: Vec<String>,
}

impl SingleYearContext {
    pub fn new(ano: i32) -> Self {
        SingleYearContext {
            ano,
            codes: Vec::new(),
        }
    }
}

/// Advance the context by one line, appending any price records to `out`.
pub fn step(ctx: &mut SingleYearContext, line: &str, out: &mut Vec<RawPriceRecord>) -> LineKind {
    let line = line.trim();
    if line.is_empty() || is_boilerplate(line) {
        return LineKind::Skipped;
    }

    if is_header_line(line) {
        let codes = extract_class_codes(line);
        if !codes.is_empty() {
            ctx.codes = codes;
        }
        return LineKind::Header;
    }

    let Some(first_digit) = line.find(|c: char| c.is_ascii_digit()) else {
        return LineKind::Ignored;
    };

    // Placeholder cells before the first number belong to the price columns.
    let mut name_tokens: Vec<&str> = line[..first_digit].split_whitespace().collect();
    let mut leading_nulls = 0;
    while matches!(name_tokens.last(), Some(&"-") | Some(&"—")) {
        name_tokens.pop();
        leading_nulls += 1;
    }
    let territorio = name_tokens.join(" ");
    if territorio.is_empty() {
        return LineKind::Ignored;
    }

    let before = out.len();
    let values = std::iter::repeat(None)
        .take(leading_nulls)
        .chain(number_tokens(&line[first_digit..]).into_iter().map(parse_number));
    for (code, value) in ctx.codes.iter().zip(values) {
        if let Some(preco) = value {
            out.push(RawPriceRecord::municipal(
                ctx.ano,
                &territorio,
                CATEGORIA_CLASSE_DE_TERRA,
                code,
                preco,
            ));
        }
    }
    LineKind::Prices(out.len() - before)
}

/// Parse every line of one page's text under a shared context.
pub fn parse_text(ctx: &mut SingleYearContext, text: &str) -> Vec<RawPriceRecord> {
    let mut out = Vec::new();
    for line in text.lines() {
        step(ctx, line, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_sets_codes() {
        let mut ctx = SingleYearContext::new(2010);
        let mut out = Vec::new();
        let kind = step(&mut ctx, "Município A- I A- II", &mut out);

        assert_eq!(kind, LineKind::Header);
        assert_eq!(ctx.codes, vec!["A-I", "A-II"]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_row_zips_codes() {
        let mut ctx = SingleYearContext::new(2010);
        let mut out = Vec::new();
        step(&mut ctx, "Município A- I A- II", &mut out);
        let kind = step(&mut ctx, "Ponta Grossa 1.500,00 1.200,00", &mut out);

        assert_eq!(kind, LineKind::Prices(2));
        assert_eq!(out[0].subcategoria, "A-I");
        assert_eq!(out[0].preco, Some(1500.0));
        assert_eq!(out[1].subcategoria, "A-II");
        assert_eq!(out[1].preco, Some(1200.0));
        assert!(out.iter().all(|r| r.ano == Some(2010)
            && r.territorio == "Ponta Grossa"
            && r.categoria == CATEGORIA_CLASSE_DE_TERRA));
    }

    #[test]
    fn test_null_cells_are_skipped() {
        let mut ctx = SingleYearContext::new(2010);
        ctx.codes = vec!["A-I".into(), "B-VI".into(), "C-VIII".into()];
        let mut out = Vec::new();
        step(&mut ctx, "Castro 9.000,00 - 2.500,00", &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].subcategoria, "A-I");
        assert_eq!(out[1].subcategoria, "C-VIII");
    }

    #[test]
    fn test_leading_dash_cell_keeps_column_position() {
        let mut ctx = SingleYearContext::new(2010);
        ctx.codes = vec!["A-I".into(), "A-II".into(), "B-VI".into()];
        let mut out = Vec::new();
        let kind = step(&mut ctx, "Castro   -   —   650,00", &mut out);

        assert_eq!(kind, LineKind::Prices(1));
        assert_eq!(out[0].territorio, "Castro");
        assert_eq!(out[0].subcategoria, "B-VI");
        assert_eq!(out[0].preco, Some(650.0));
    }

    #[test]
    fn test_hyphenated_name_is_kept() {
        let mut ctx = SingleYearContext::new(2010);
        ctx.codes = vec!["A-I".into()];
        let mut out = Vec::new();
        step(&mut ctx, "Pato Branco-Sul 1.000,00", &mut out);

        assert_eq!(out[0].territorio, "Pato Branco-Sul");
        assert_eq!(out[0].subcategoria, "A-I");
    }

    #[test]
    fn test_row_without_name_or_digit_ignored() {
        let mut ctx = SingleYearContext::new(2010);
        ctx.codes = vec!["A-I".into()];
        let mut out = Vec::new();
        assert_eq!(step(&mut ctx, "1.500,00 1.200,00", &mut out), LineKind::Ignored);
        assert_eq!(step(&mut ctx, "Campos Gerais", &mut out), LineKind::Ignored);
        assert_eq!(step(&mut ctx, "Fonte: SEAB 2010", &mut out), LineKind::Skipped);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rows_before_header_emit_nothing() {
        let mut ctx = SingleYearContext::new(2010);
        let records = parse_text(&mut ctx, "Castro 9.000,00\nMunicípio A- I\nCastro 9.000,00");
        assert_eq!(records.len(), 1);
    }
}
