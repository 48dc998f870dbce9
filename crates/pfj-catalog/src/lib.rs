//! Read-only catalogs of icons, design tokens and code snippets.
//!
//! Catalogs are loaded once from JSON files (or directories of them) and
//! never change afterwards.

pub mod icons;
pub mod snippets;
pub mod source;
pub mod tokens;

pub use icons::{IconCatalog, IconSpec};
pub use snippets::{extract_snippets, SnippetCatalog, MISSING_SNIPPET};
pub use source::CatalogError;
pub use tokens::{Token, TokenCatalog};
