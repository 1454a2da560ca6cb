use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Territorial level of every record produced from the municipal tables.
pub const NIVEL_MUNICIPIO: &str = "Municipio";

/// Unit of every price produced by this pipeline.
pub const UNIDADE_REAIS_HA: &str = "R$/ha";

/// Column order of the raw record stream.
pub const RAW_COLUMNS: [&str; 9] = [
    "ano",
    "nivel",
    "territorio",
    "territorio_codigo",
    "categoria",
    "subcategoria",
    "classe",
    "preco",
    "unidade",
];

/// Known table layouts of the price reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Years as columns, land classes grouped under a soil-type header.
    MultiYear,
    /// Class codes as columns, municipalities as rows, one year per document.
    SingleYear,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::MultiYear => write!(f, "multi_year"),
            TableFormat::SingleYear => write!(f, "single_year"),
        }
    }
}

/// One row of the raw record stream, as emitted by the table parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRecord {
    pub ano: Option<i32>,
    pub nivel: String,
    pub territorio: String,
    pub territorio_codigo: String,
    pub categoria: String,
    pub subcategoria: String,
    pub classe: String,
    pub preco: Option<f64>,
    pub unidade: String,
}

impl RawPriceRecord {
    /// A municipal price in R$/ha with empty code and class columns.
    pub fn municipal(
        ano: i32,
        territorio: &str,
        categoria: &str,
        subcategoria: &str,
        preco: f64,
    ) -> Self {
        RawPriceRecord {
            ano: Some(ano),
            nivel: NIVEL_MUNICIPIO.to_string(),
            territorio: territorio.trim().to_string(),
            territorio_codigo: String::new(),
            categoria: categoria.to_string(),
            subcategoria: subcategoria.trim().to_string(),
            classe: String::new(),
            preco: Some(preco),
            unidade: UNIDADE_REAIS_HA.to_string(),
        }
    }
}

/// Canonical, normalized and geo-enriched price record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub ano: Option<i32>,
    pub nivel: String,
    pub territorio: String,
    pub territorio_codigo: String,
    pub regiao: String,
    pub mesorregiao: String,
    pub categoria: String,
    pub subcategoria: String,
    pub preco: Option<f64>,
    pub unidade: String,
}

impl From<RawPriceRecord> for PriceRecord {
    fn from(raw: RawPriceRecord) -> Self {
        PriceRecord {
            ano: raw.ano,
            nivel: raw.nivel,
            territorio: raw.territorio,
            territorio_codigo: raw.territorio_codigo,
            regiao: String::new(),
            mesorregiao: String::new(),
            categoria: raw.categoria,
            subcategoria: raw.subcategoria,
            preco: raw.preco,
            unidade: raw.unidade,
        }
    }
}

/// Dataset-wide enumeration used to populate client-side filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub ano_min: i32,
    pub ano_max: i32,
    pub anos: Vec<i32>,
    pub niveis: Vec<String>,
    pub categorias: Vec<String>,
    pub subcategorias: Vec<String>,
    pub regioes: Vec<String>,
    pub mesorregioes: Vec<String>,
    pub territorios: BTreeMap<String, Vec<String>>,
}
