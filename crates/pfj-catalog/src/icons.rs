//! Icon catalog: SVG path data grouped into icon sets.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::source::{files, insert_logged, is_json, read_json, CatalogError};

/// One icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    /// Icon set (e.g. "fas", "patternfly")
    pub set: String,
    pub id: String,
    pub x_offset: i64,
    pub y_offset: i64,
    pub width: u32,
    pub height: u32,
    /// SVG path data
    pub path: String,
    pub license: String,
}

impl IconSpec {
    /// The `viewBox` attribute for an `<svg>` showing this icon.
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.x_offset, self.y_offset, self.width, self.height
        )
    }
}

/// Icon as stored in catalog files; set and id come from the enclosing keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIcon {
    #[serde(default)]
    x_offset: i64,
    #[serde(default)]
    y_offset: i64,
    width: u32,
    height: u32,
    svg_path_data: String,
    #[serde(default)]
    license: String,
}

type RawCatalog = BTreeMap<String, BTreeMap<String, RawIcon>>;

/// Icons by set, then by id.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    sets: BTreeMap<String, BTreeMap<String, IconSpec>>,
}

impl IconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON file of the form `{ "<set>": { "<id>": { ... } } }`.
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
        tracing::debug!("Loaded {} icons from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// Load from a file or a directory, whichever `path` is.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if path.is_dir() {
            Self::scan(path)
        } else {
            Self::load(path)
        }
    }

    fn add_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let raw: RawCatalog = read_json(path)?;
        for (set, icons) in raw {
            for (id, icon) in icons {
                self.insert(IconSpec {
                    set: set.clone(),
                    id,
                    x_offset: icon.x_offset,
                    y_offset: icon.y_offset,
                    width: icon.width,
                    height: icon.height,
                    path: icon.svg_path_data,
                    license: icon.license,
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, spec: IconSpec) {
        let icons = self.sets.entry(spec.set.clone()).or_default();
        insert_logged(icons, spec.id.clone(), spec, "icon");
    }

    pub fn get(&self, set: &str, id: &str) -> Option<&IconSpec> {
        self.sets.get(set)?.get(id)
    }

    /// First icon with this id, searching sets in name order.
    pub fn find(&self, id: &str) -> Option<&IconSpec> {
        self.sets.values().find_map(|icons| icons.get(id))
    }

    pub fn sets(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const ICONS: &str = r#"{
        "fas": {
            "star": { "width": 576, "height": 512, "svgPathData": "M259.3 17.8", "license": "CC BY 4.0" }
        },
        "patternfly": {
            "star": { "xOffset": 0, "yOffset": 64, "width": 1024, "height": 1024, "svgPathData": "M512 0" },
            "cluster": { "width": 1024, "height": 1024, "svgPathData": "M0 0" }
        }
    }"#;

    #[test]
    fn loads_icons_by_set_and_id() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("icons.json");
        fs::write(&path, ICONS).unwrap();

        let catalog = IconCatalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.sets().collect::<Vec<_>>(), vec!["fas", "patternfly"]);

        let star = catalog.get("patternfly", "star").unwrap();
        assert_eq!(star.view_box(), "0 64 1024 1024");
        assert_eq!(star.license, "");
        assert_eq!(catalog.get("fas", "star").unwrap().x_offset, 0);
        assert!(catalog.get("far", "star").is_none());
    }

    #[test]
    fn find_searches_sets_in_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("icons.json");
        fs::write(&path, ICONS).unwrap();

        let catalog = IconCatalog::load(&path).unwrap();

        assert_eq!(catalog.find("star").unwrap().set, "fas");
        assert_eq!(catalog.find("cluster").unwrap().set, "patternfly");
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.json"), ICONS).unwrap();
        fs::write(
            temp.path().join("b.json"),
            r#"{ "fas": { "star": { "width": 1, "height": 1, "svgPathData": "M1 1" } } }"#,
        )
        .unwrap();

        let catalog = IconCatalog::scan(temp.path()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("fas", "star").unwrap().path, "M1 1");
    }
}
