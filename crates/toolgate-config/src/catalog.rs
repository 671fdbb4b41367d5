//! Tool catalog loader: reads the `[[tools]]` list from a TOML file.
//!
//! Only metadata lives here. Handlers are bound by the embedding binary.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use toolgate_types::ToolSpec;

/// Error type for catalog parsing failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("cannot read catalog at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The TOML content is invalid or missing required fields.
    #[error("invalid catalog: {0}")]
    Parse(String),
}

/// Parses catalog TOML into tool specs, keeping file order.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the TOML is malformed, an entry is
/// missing `name` or `required_role`, or a name appears twice.
pub fn parse_catalog(content: &str) -> Result<Vec<ToolSpec>, CatalogError> {
    let raw: RawCatalog =
        toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let mut seen = HashSet::new();
    for spec in &raw.tools {
        if !seen.insert(spec.name.as_str().to_string()) {
            return Err(CatalogError::Parse(format!(
                "duplicate tool name '{}'",
                spec.name
            )));
        }
    }
    Ok(raw.tools)
}

/// Reads a catalog file from disk and parses it.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read.
/// Returns `CatalogError::Parse` if the content is invalid.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<ToolSpec>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    tools: Vec<ToolSpec>,
}
