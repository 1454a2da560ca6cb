//! Integration tests for the extraction and normalization pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use terras_core::config::{ContextScope, PipelineConfig};
use terras_core::error::TerrasError;
use terras_core::extraction::{PageContent, PdfExtractor};
use terras_core::metadata::build_metadata;
use terras_core::model::{TableFormat, NIVEL_MUNICIPIO, UNIDADE_REAIS_HA};
use terras_core::records::{read_raw_csv_path, write_raw_csv_path};
use terras_core::territory::Gazetteer;
use terras_core::{extract_pdf, normalize_records};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TerrasError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingExtractor;

impl PdfExtractor for FailingExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, TerrasError> {
        Err(TerrasError::Extraction("corrupt xref table".into()))
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

fn multi_year_report() -> MockExtractor {
    MockExtractor {
        pages: vec![
            page(
                1,
                &[
                    "PREÇOS MÉDIOS DE TERRAS AGRÍCOLAS - R$/ha",
                    "Divisão de Estatísticas Básicas",
                    "Munícipio        Classe / Grau        2015        2016",
                    "Curitiba         Roxa",
                    "                 Mecanizada           1.234,56    987,10",
                    "                 Mecanizável          1.100,00    1.150,00",
                    "                 Mista",
                    "                 Não Mecanizável      800,00      -",
                    "Fonte: SEAB/DERAL",
                ],
            ),
            page(
                2,
                &[
                    "Munícipio        Classe / Grau        2015        2016",
                    "                 Inaproveitáveis      150,00      160,00",
                    "Ponta Grossa     Arenosa",
                    "                 Mecanizada           2.000,00    2.100,00",
                ],
            ),
        ],
    }
}

// ---------------------------------------------------------------------------
// Multi-year report: year columns, soil blocks, continuation across pages
// ---------------------------------------------------------------------------
#[test]
fn multi_year_report_to_raw_records() {
    let outcome = extract_pdf(
        &[],
        "precos_terras_2016.pdf",
        &multi_year_report(),
        &PipelineConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome.format, Some(TableFormat::MultiYear));
    let records = &outcome.records;
    assert_eq!(records.len(), 9);

    assert_eq!(records[0].ano, Some(2015));
    assert_eq!(records[0].territorio, "Curitiba");
    assert_eq!(records[0].categoria, "Roxa");
    assert_eq!(records[0].subcategoria, "Mecanizada");
    assert_eq!(records[0].preco, Some(1234.56));
    assert_eq!(records[1].preco, Some(987.10));

    // "-" for 2016 yields no record, only the 2015 cell
    assert_eq!(records[4].categoria, "Mista");
    assert_eq!(records[4].subcategoria, "Não Mecanizável");
    assert_eq!(records[5].territorio, "Curitiba");
    assert_eq!(records[5].subcategoria, "Inaproveitáveis");

    // second page block continues Curitiba/Mista until the next soil header
    assert_eq!(records[5].categoria, "Mista");
    assert_eq!(records[7].territorio, "Ponta Grossa");
    assert_eq!(records[8].categoria, "Arenosa");

    assert!(records
        .iter()
        .all(|r| r.nivel == NIVEL_MUNICIPIO && r.unidade == UNIDADE_REAIS_HA));
}

#[test]
fn multi_year_page_scope_drops_orphaned_rows() {
    let config = PipelineConfig {
        context_scope: ContextScope::Page,
        ..Default::default()
    };
    let outcome = extract_pdf(&[], "precos.pdf", &multi_year_report(), &config).unwrap();

    // "Inaproveitáveis" at the top of page 2 has no territory in a fresh context
    assert_eq!(outcome.records.len(), 7);
    assert!(outcome
        .records
        .iter()
        .all(|r| r.subcategoria != "Inaproveitáveis"));
}

// ---------------------------------------------------------------------------
// Single-year report: class-code columns, year from the filename
// ---------------------------------------------------------------------------
#[test]
fn single_year_report_to_raw_records() {
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "PREÇOS DE TERRAS AGRÍCOLAS 2010",
                "Município     A- I       A- II      B- VI",
                "Ponta Grossa  1.500,00   1.200,00   700,00",
                "Castro        1.400,00   -          650,00",
                "Fonte: SEAB/DERAL",
            ],
        )],
    };
    let outcome = extract_pdf(
        &[],
        "precos_terras_10.pdf",
        &extractor,
        &PipelineConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome.format, Some(TableFormat::SingleYear));
    assert_eq!(outcome.year_hint, Some(2010));
    let subs: Vec<(&str, &str)> = outcome
        .records
        .iter()
        .map(|r| (r.territorio.as_str(), r.subcategoria.as_str()))
        .collect();
    assert_eq!(
        subs,
        vec![
            ("Ponta Grossa", "A-I"),
            ("Ponta Grossa", "A-II"),
            ("Ponta Grossa", "B-VI"),
            ("Castro", "A-I"),
            ("Castro", "B-VI"),
        ]
    );
}

#[test]
fn unknown_layout_is_skipped() {
    let extractor = MockExtractor {
        pages: vec![page(1, &["Relatório de atividades", "Curitiba 1.000,00"])],
    };
    let outcome = extract_pdf(&[], "relatorio_15.pdf", &extractor, &PipelineConfig::default())
        .unwrap();
    assert_eq!(outcome.format, None);
    assert!(outcome.records.is_empty());
}

#[test]
fn extraction_failure_is_reported() {
    let err = extract_pdf(&[], "x.pdf", &FailingExtractor, &PipelineConfig::default())
        .unwrap_err();
    assert!(matches!(err, TerrasError::Extraction(_)));
}

// ---------------------------------------------------------------------------
// Full pipeline: raw CSV on disk, normalization, enrichment, metadata
// ---------------------------------------------------------------------------
#[test]
fn raw_csv_to_normalized_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::default();

    let mut raw = extract_pdf(&[], "precos.pdf", &multi_year_report(), &config)
        .unwrap()
        .records;
    let mut artifact = raw[0].clone();
    artifact.territorio = "Página 3".into();
    raw.push(artifact);
    let mut title = raw[0].clone();
    title.territorio = "Divisão de Estatísticas Básicas".into();
    raw.push(title);

    let csv_path = dir.path().join("extracted").join("compiled.csv");
    write_raw_csv_path(&csv_path, &raw).unwrap();
    let reread = read_raw_csv_path(&csv_path).unwrap();
    assert_eq!(reread, raw);

    let geojson_path = dir.path().join("territorios.geojson");
    std::fs::write(
        &geojson_path,
        r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature",
              "properties": { "nome": "Curitiba", "codigo": "4106902",
                              "regiao": "Leste", "mesorregiao": "Metropolitana de Curitiba" } }
        ] }"#,
    )
    .unwrap();
    let gazetteer = Gazetteer::load(&geojson_path).unwrap().unwrap();

    let records = normalize_records(reread, &gazetteer, &config);
    assert_eq!(records.len(), 9);

    let first = &records[0];
    assert_eq!((first.categoria.as_str(), first.subcategoria.as_str()), ("A", "A-I"));
    assert_eq!(first.regiao, "Leste");
    assert_eq!(first.territorio_codigo, "4106902");

    let ponta_grossa = records.iter().find(|r| r.territorio == "Ponta Grossa").unwrap();
    assert_eq!(ponta_grossa.subcategoria, "A-III");
    assert_eq!(ponta_grossa.regiao, "");
    assert_eq!(ponta_grossa.mesorregiao, "");

    let metadata = build_metadata(&records);
    assert_eq!(metadata.ano_min, 2015);
    assert_eq!(metadata.ano_max, 2016);
    assert_eq!(metadata.categorias, vec!["A", "B", "C"]);
    assert_eq!(
        metadata.subcategorias,
        vec!["A-I", "A-II", "A-III", "B-VII", "C-VIII"]
    );
    assert_eq!(metadata.regioes, vec!["Leste"]);
    assert_eq!(
        metadata.territorios[NIVEL_MUNICIPIO],
        vec!["Curitiba", "Ponta Grossa"]
    );
}

#[test]
fn missing_gazetteer_leaves_regions_blank() {
    let config = PipelineConfig::default();
    let raw = extract_pdf(&[], "precos.pdf", &multi_year_report(), &config)
        .unwrap()
        .records;

    let loaded = Gazetteer::load(std::path::Path::new("/nonexistent/territorios.geojson")).unwrap();
    assert!(loaded.is_none());

    let records = normalize_records(raw, &Gazetteer::default(), &config);
    assert!(records
        .iter()
        .all(|r| r.regiao.is_empty() && r.mesorregiao.is_empty()));

    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["regiao"], "");
    assert_eq!(json["preco"], 1234.56);
}

#[test]
fn null_prices_kept_unless_configured() {
    let mut raw = extract_pdf(&[], "precos.pdf", &multi_year_report(), &PipelineConfig::default())
        .unwrap()
        .records;
    raw[0].preco = None;

    let kept = normalize_records(raw.clone(), &Gazetteer::default(), &PipelineConfig::default());
    assert_eq!(kept.len(), 9);
    assert_eq!(kept[0].preco, None);
    assert_eq!(serde_json::to_value(&kept[0]).unwrap()["preco"], serde_json::Value::Null);

    let config = PipelineConfig {
        drop_null_prices: true,
        ..Default::default()
    };
    let dropped = normalize_records(raw, &Gazetteer::default(), &config);
    assert_eq!(dropped.len(), 8);
}

#[test]
fn rows_without_year_are_dropped() {
    let mut raw = extract_pdf(&[], "precos.pdf", &multi_year_report(), &PipelineConfig::default())
        .unwrap()
        .records;
    raw[0].ano = None;

    let records = normalize_records(raw, &Gazetteer::default(), &PipelineConfig::default());
    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|r| r.ano.is_some()));
}
