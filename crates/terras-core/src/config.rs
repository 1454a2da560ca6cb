use crate::error::TerrasError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How long table-parser state lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextScope {
    /// One context threaded through every page of a document.
    #[default]
    Document,
    /// Fresh context per page; blocks split across pages lose their territory.
    Page,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub context_scope: ContextScope,
    /// Drop records without a price during normalization.
    pub drop_null_prices: bool,
    /// GeoJSON gazetteer used for region enrichment.
    pub gazetteer: Option<PathBuf>,
}

/// Load a pipeline config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, TerrasError> {
    let content = std::fs::read_to_string(path).map_err(|e| TerrasError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a pipeline config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<PipelineConfig, TerrasError> {
    serde_json::from_str(json).map_err(|e| TerrasError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}
