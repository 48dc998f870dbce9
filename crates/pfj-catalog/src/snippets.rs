//! Named code snippets shown next to live examples.
//!
//! Snippets come either from JSON files (`{ "<name>": "<code>" }`) or are
//! cut out of source files between `// @code-start:<name>` and
//! `// @code-end:<name>` markers.

use std::collections::BTreeMap;
use std::path::Path;

use crate::source::{files, insert_logged, is_json, read_json, read_to_string, CatalogError};

/// Returned by [`SnippetCatalog::code`] for unknown names.
pub const MISSING_SNIPPET: &str = "n/a";

const START_MARKER: &str = "// @code-start:";
const END_MARKER: &str = "// @code-end:";

/// Extensions of source files searched for snippet markers.
const SOURCE_EXTENSIONS: &[&str] = &["java", "kt", "kts", "rs", "js", "jsx", "ts", "tsx"];

/// Snippets by name.
#[derive(Debug, Clone, Default)]
pub struct SnippetCatalog {
    snippets: BTreeMap<String, String>,
}

impl SnippetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON map of snippet names to code.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.add_file(path)?;
        Ok(catalog)
    }

    /// Collect snippets from every file below a directory.
    ///
    /// JSON files are read as snippet maps, source files are searched for
    /// snippet markers. Other files are ignored.
    pub fn scan(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for path in files(dir, |p| is_json(p) || is_source(p))? {
            catalog.add_file(&path)?;
        }
        tracing::debug!("Loaded {} snippets from {}", catalog.len(), dir.display());
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
        let snippets: Vec<(String, String)> = if is_json(path) {
            read_json::<BTreeMap<String, String>>(path)?
                .into_iter()
                .collect()
        } else {
            extract_snippets(&read_to_string(path)?)
        };

        for (name, code) in snippets {
            insert_logged(&mut self.snippets, name, code, "snippet");
        }
        Ok(())
    }

    /// Code of a snippet, or [`MISSING_SNIPPET`].
    pub fn code(&self, name: &str) -> &str {
        self.get(name).unwrap_or(MISSING_SNIPPET)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.snippets.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.snippets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Cut marked snippets out of a source file.
///
/// Lines are dedented by the column of the start marker. A snippet without
/// its end marker is dropped.
pub fn extract_snippets(source: &str) -> Vec<(String, String)> {
    let mut snippets = Vec::new();
    // (name, indent, lines)
    let mut current: Option<(String, usize, Vec<&str>)> = None;

    for line in source.lines() {
        if let Some(column) = line.find(START_MARKER) {
            if let Some((name, _, _)) = &current {
                tracing::warn!("Snippet '{}' is never closed", name);
            }
            let name = line[column + START_MARKER.len()..].trim().to_string();
            current = Some((name, column, Vec::new()));
            continue;
        }

        let Some((name, indent, lines)) = current.as_mut() else {
            continue;
        };

        if line
            .find(END_MARKER)
            .is_some_and(|i| line[i + END_MARKER.len()..].trim() == name.as_str())
        {
            let code = lines.join("\n");
            let name = std::mem::take(name);
            snippets.push((name, code));
            current = None;
        } else {
            lines.push(dedent(line, *indent));
        }
    }

    if let Some((name, _, _)) = current {
        tracing::warn!("Snippet '{}' is never closed", name);
    }

    snippets
}

fn dedent(line: &str, indent: usize) -> &str {
    let strip = line
        .char_indices()
        .find(|(i, c)| *i >= indent || !c.is_whitespace())
        .map_or(line.len(), |(i, _)| i);
    &line[strip..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const SOURCE: &str = r#"
public class DonutComponent {
    void examples() {
        // @code-start:donut-basic
        Donut donut = donut()
                .title("Pets");
        // @code-end:donut-basic

        // @code-start:donut-unclosed
        ignored();
    }
}
"#;

    #[test]
    fn extracts_and_dedents_marked_code() {
        let snippets = extract_snippets(SOURCE);

        assert_eq!(
            snippets,
            vec![(
                "donut-basic".to_string(),
                "Donut donut = donut()\n        .title(\"Pets\");".to_string()
            )]
        );
    }

    #[test]
    fn unknown_snippets_are_not_available() {
        let catalog = SnippetCatalog::new();

        assert_eq!(catalog.code("missing"), "n/a");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn scans_json_and_marked_sources() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("DonutComponent.java"), SOURCE).unwrap();
        fs::write(
            temp.path().join("extra.json"),
            r#"{ "bullet-basic": "bullet()" }"#,
        )
        .unwrap();

        let catalog = SnippetCatalog::scan(temp.path()).unwrap();

        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["bullet-basic", "donut-basic"]
        );
        assert_eq!(catalog.code("bullet-basic"), "bullet()");
    }

    #[test]
    fn duplicate_names_keep_the_last_definition() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.json"), r#"{ "x": "first" }"#).unwrap();
        fs::write(temp.path().join("b.json"), r#"{ "x": "second" }"#).unwrap();

        let catalog = SnippetCatalog::scan(temp.path()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.code("x"), "second");
    }

    #[test]
    fn scan_ignores_binary_and_unknown_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.json"), r#"{ "x": "code" }"#).unwrap();
        fs::write(temp.path().join("logo.png"), [0x89, 0x50, 0xff, 0xfe, 0x00]).unwrap();
        fs::write(temp.path().join("Chart.class"), [0xca, 0xfe, 0xba, 0xbe, 0xff]).unwrap();

        let catalog = SnippetCatalog::scan(temp.path()).unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["x"]);
    }
}
