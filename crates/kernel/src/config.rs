//! Configuration loaded from environment variables.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sottotitolo_sdk::types::{BUILTIN_TYPES, ContentTypeDefinition};

use crate::content::FilterPipeline;
use crate::error::{SetupError, SetupResult};

/// Kernel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Content types that get subtitle support during setup (default: post,page).
    pub enabled_types: Vec<String>,

    /// Optional TOML file declaring additional content types.
    pub types_file: Option<PathBuf>,

    /// Sanitizer applied on write: "post_html" (default) or "plain_text".
    pub subtitle_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled_types: BUILTIN_TYPES.iter().map(|t| t.to_string()).collect(),
            types_file: None,
            subtitle_format: "post_html".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let enabled_types = lookup("SOTTOTITOLO_ENABLED_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.enabled_types);

        let types_file = lookup("SOTTOTITOLO_TYPES_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let subtitle_format = lookup("SOTTOTITOLO_SUBTITLE_FORMAT")
            .map(|v| v.trim().to_lowercase())
            .unwrap_or(defaults.subtitle_format);

        FilterPipeline::for_format(&subtitle_format)
            .context("SOTTOTITOLO_SUBTITLE_FORMAT must be post_html or plain_text")?;

        Ok(Self {
            enabled_types,
            types_file,
            subtitle_format,
        })
    }

    /// Content types declared in the configured types file, if any.
    pub fn load_types(&self) -> SetupResult<Vec<ContentTypeDefinition>> {
        match &self.types_file {
            Some(path) => load_types_file(path),
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TypesFile {
    #[serde(default)]
    content_type: Vec<ContentTypeDefinition>,
}

/// Read content type declarations from a TOML file.
pub fn load_types_file(path: &Path) -> SetupResult<Vec<ContentTypeDefinition>> {
    let raw = std::fs::read_to_string(path).map_err(|source| SetupError::TypesFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_types_toml(&raw)
}

/// Parse content type declarations (`[[content_type]]` tables).
pub fn parse_types_toml(raw: &str) -> SetupResult<Vec<ContentTypeDefinition>> {
    let file: TypesFile = toml::from_str(raw)?;
    Ok(file.content_type)
}
