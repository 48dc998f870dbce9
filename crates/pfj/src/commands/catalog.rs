//! Catalog lookups.

use std::path::Path;

use anyhow::{bail, Context, Result};
use pfj_catalog::{IconCatalog, SnippetCatalog, TokenCatalog};

use crate::config::ConfigFile;

fn location<'a>(path: Option<&'a Path>, section: &str) -> Result<&'a Path> {
    match path {
        Some(path) => Ok(path),
        None => bail!("No {} catalog configured; set [catalogs] {} in pfj.toml", section, section),
    }
}

/// Print an icon as JSON.
pub fn icon(config: &ConfigFile, set: &str, id: &str) -> Result<()> {
    let path = location(config.catalogs.icons.as_deref(), "icons")?;
    let catalog = IconCatalog::open(path)
        .with_context(|| format!("Failed to load icons from {}", path.display()))?;

    let Some(icon) = catalog.get(set, id) else {
        bail!("Unknown icon {}/{}", set, id);
    };
    println!("{}", serde_json::to_string_pretty(icon)?);
    Ok(())
}

/// Print a token and its `var()` reference.
pub fn token(config: &ConfigFile, name: &str) -> Result<()> {
    let path = location(config.catalogs.tokens.as_deref(), "tokens")?;
    let catalog = TokenCatalog::open(path)
        .with_context(|| format!("Failed to load tokens from {}", path.display()))?;

    let Some(token) = catalog.get(name) else {
        bail!("Unknown token {}", name);
    };
    println!("{token}");
    println!("{}", token.var());
    Ok(())
}

/// Print a snippet; unknown names print "n/a".
pub fn snippet(config: &ConfigFile, name: &str) -> Result<()> {
    let path = location(config.catalogs.snippets.as_deref(), "snippets")?;
    let catalog = SnippetCatalog::open(path)
        .with_context(|| format!("Failed to load snippets from {}", path.display()))?;

    println!("{}", catalog.code(name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogsConfig;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn unconfigured_catalog_is_an_error() {
        let err = icon(&ConfigFile::default(), "fas", "star").unwrap_err();

        assert!(err.to_string().contains("No icons catalog configured"));
    }

    #[test]
    fn unknown_entries_are_errors() {
        let temp = tempdir().unwrap();
        let tokens = temp.path().join("tokens.json");
        fs::write(&tokens, r#"{ "a": { "cssVar": "--a", "value": "1px" } }"#).unwrap();
        let config = ConfigFile {
            catalogs: CatalogsConfig {
                tokens: Some(tokens),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(token(&config, "a").is_ok());
        assert!(token(&config, "b")
            .unwrap_err()
            .to_string()
            .contains("Unknown token b"));
    }

    #[test]
    fn unknown_snippets_print_placeholder() {
        let temp = tempdir().unwrap();
        let snippets = temp.path().join("snippets");
        fs::create_dir_all(&snippets).unwrap();
        let config = ConfigFile {
            catalogs: CatalogsConfig {
                snippets: Some(snippets),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(snippet(&config, "missing").is_ok());
    }
}
