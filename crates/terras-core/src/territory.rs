//! Municipality name validation and gazetteer enrichment.

use crate::error::TerrasError;
use crate::model::PriceRecord;
use crate::text::{fold, has_digit};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Folded lines that show up in the name column but are not municipalities.
const NON_MUNICIPALITIES: &[&str] = &[
    "municipio",
    "municipios",
    "pagina",
    "divisao de estatisticas basicas",
    "departamento de economia rural",
    "secretaria da agricultura e do abastecimento",
    "precos de terras agricolas",
    "precos medios de terras agricolas",
    "classe / grau",
    "tipo de solo",
    "estado do parana",
    "total",
    "media",
    "fonte",
];

const NAME_KEYS: &[&str] = &["nome", "Nome", "Municipio", "municipio", "territorio", "name"];
const CODE_KEYS: &[&str] = &["codigo", "Codigo", "CODIGO", "CodIbge", "cod_ibge", "id"];
const REGION_KEYS: &[&str] = &["regiao", "Regiao", "region"];
const MESOREGION_KEYS: &[&str] = &["mesorregiao", "Mesorregiao", "mesoregion"];

/// Whether a territory string can be a municipality name.
pub fn is_valid_municipality(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || has_digit(name) {
        return false;
    }
    if !name.chars().any(char::is_alphanumeric) {
        return false;
    }
    !NON_MUNICIPALITIES.contains(&fold(name).as_str())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GazetteerEntry {
    pub nome: String,
    pub codigo: String,
    pub regiao: String,
    pub mesorregiao: String,
}

/// Municipality name -> region lookup, keyed by folded name.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, GazetteerEntry>,
}

impl Gazetteer {
    /// Load a GeoJSON gazetteer. Returns None when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Gazetteer>, TerrasError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TerrasError::GazetteerLoad {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };
        Self::from_geojson(&content)
            .map(Some)
            .map_err(|e| TerrasError::GazetteerLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Build a gazetteer from a GeoJSON FeatureCollection string.
    ///
    /// Features without a recognizable name are ignored. The first feature
    /// with a given name wins.
    pub fn from_geojson(json: &str) -> Result<Gazetteer, TerrasError> {
        let doc: Value = serde_json::from_str(json)?;
        let features = doc
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let entries = features
            .iter()
            .filter_map(|f| f.get("properties"))
            .filter_map(|props| {
                let nome = first_property(props, NAME_KEYS)?;
                Some(GazetteerEntry {
                    codigo: first_property(props, CODE_KEYS).unwrap_or_default(),
                    regiao: first_property(props, REGION_KEYS).unwrap_or_default(),
                    mesorregiao: first_property(props, MESOREGION_KEYS).unwrap_or_default(),
                    nome,
                })
            });
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = GazetteerEntry>) -> Gazetteer {
        let mut map = HashMap::new();
        for entry in entries {
            map.entry(fold(&entry.nome)).or_insert(entry);
        }
        Gazetteer { entries: map }
    }

    pub fn lookup(&self, name: &str) -> Option<&GazetteerEntry> {
        self.entries.get(&fold(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill region fields (and an empty code) from the matching entry.
    ///
    /// Returns whether a match was found; unmatched records are left as is.
    pub fn enrich(&self, record: &mut PriceRecord) -> bool {
        let Some(entry) = self.lookup(&record.territorio) else {
            return false;
        };
        record.regiao = entry.regiao.clone();
        record.mesorregiao = entry.mesorregiao.clone();
        if record.territorio_codigo.is_empty() {
            record.territorio_codigo = entry.codigo.clone();
        }
        true
    }
}

/// First non-empty string (or number) property among `keys`.
fn first_property(props: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match props.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
