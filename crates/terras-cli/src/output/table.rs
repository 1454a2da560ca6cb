use terras_core::model::RawPriceRecord;
use terras_core::parsing::values::format_number;
use terras_core::parsing::DocumentOutcome;

pub fn print(outcome: &DocumentOutcome) {
    match outcome.format {
        Some(format) => println!("Format: {format}"),
        None => {
            println!("Format: unknown (no records)");
            return;
        }
    }
    if let Some(year) = outcome.year_hint {
        println!("Year hint: {year}");
    }
    println!("Records: {}\n", outcome.records.len());
    print!("{}", format_records(&outcome.records));
}

/// Render records as left-aligned columns: year, territory, category, class, price.
fn format_records(records: &[RawPriceRecord]) -> String {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|r| {
            [
                r.ano.map(|a| a.to_string()).unwrap_or_default(),
                r.territorio.clone(),
                r.categoria.clone(),
                r.subcategoria.clone(),
                r.preco.map(format_number).unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();

    let headers = ["Ano", "Territorio", "Categoria", "Subcategoria", "Preco (R$/ha)"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    push_row(&headers);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&cells);
    }
    out
}
