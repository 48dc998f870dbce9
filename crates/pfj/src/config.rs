//! Configuration file (pfj.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pfj_charts::Delivery;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub catalogs: CatalogsConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default)]
    pub delivery: Delivery,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            delivery: Delivery::default(),
            pretty: true,
        }
    }
}

/// Catalog locations; each may be a JSON file or a directory.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct CatalogsConfig {
    pub icons: Option<PathBuf>,
    pub tokens: Option<PathBuf>,
    pub snippets: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

/// Load the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());

    // Catalog paths are relative to the config file.
    if let Some(base) = path.parent() {
        for catalog in [
            &mut config.catalogs.icons,
            &mut config.catalogs.tokens,
            &mut config.catalogs.snippets,
        ] {
            if let Some(p) = catalog.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
    }

    Ok(config)
}
