//! Design token catalog.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::source::{files, insert_logged, is_json, read_json, CatalogError};

/// A design token backed by a CSS custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Custom property name, e.g. `--pf-t--global--color--brand--default`
    pub css_var: String,

    /// Resolved value
    pub value: String,
}

impl Token {
    /// The custom property wrapped for use in a declaration.
    pub fn var(&self) -> String {
        format!("var({})", self.css_var)
    }

    /// Like [`Token::var`], falling back to the resolved value.
    pub fn var_with_fallback(&self) -> String {
        format!("var({}, {})", self.css_var, self.value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.css_var, self.value)
    }
}

/// Tokens by name.
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    tokens: BTreeMap<String, Token>,
}

impl TokenCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON file of the form `{ "<name>": { "cssVar": ..., "value": ... } }`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.add_file(path)?;
        Ok(catalog)
    }

    /// Load every JSON file below a directory.
    pub fn scan(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for path in files(dir, is_json)? {
            catalog.add_file(&path)?;
        }
        tracing::debug!("Loaded {} tokens from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if path.is_dir() {
            Self::scan(path)
        } else {
            Self::load(path)
        }
    }

    fn add_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let tokens: BTreeMap<String, Token> = read_json(path)?;
        for (name, token) in tokens {
            insert_logged(&mut self.tokens, name, token, "token");
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
