//! Read component definition documents from disk.
//!
//! A definition document is a JSON file holding a version marker and one or
//! more component classes. A definition set is a directory tree of such
//! files, loaded recursively.

use crate::component::{ComponentDef, ComponentRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use walkdir::WalkDir;

const CURRENT_VERSION: &str = "1.0";

/// One definition file: a version plus its component classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionDoc {
    pub version: String,
    pub components: Vec<ComponentDef>,
}

impl Default for DefinitionDoc {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            components: Vec::new(),
        }
    }
}

/// Result of loading a definition set: the registry plus non-fatal findings.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub registry: ComponentRegistry,
    pub warnings: Vec<String>,
}

/// Parse a single definition document.
pub fn parse_doc(json: &str) -> Result<DefinitionDoc> {
    let doc: DefinitionDoc =
        serde_json::from_str(json).context("failed to parse definition document")?;
    if doc.version != CURRENT_VERSION {
        anyhow::bail!(
            "definition version mismatch: expected {}, found {}",
            CURRENT_VERSION,
            doc.version
        );
    }
    Ok(doc)
}

/// Serialize a definition document to pretty-printed JSON.
pub fn to_json(doc: &DefinitionDoc) -> Result<String> {
    serde_json::to_string_pretty(doc).context("failed to serialize definition document")
}

/// Load one definition file into an existing outcome.
pub fn load_file(path: &Path, outcome: &mut LoadOutcome) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read definitions from {}", path.display()))?;
    let doc =
        parse_doc(&json).with_context(|| format!("invalid definition file {}", path.display()))?;
    for def in doc.components {
        if def.name.is_empty() {
            outcome
                .warnings
                .push(format!("{}: component with empty name skipped", path.display()));
            continue;
        }
        let name = def.name.clone();
        if outcome.registry.insert(def).is_some() {
            outcome.warnings.push(format!(
                "{}: duplicate class '{}' overrides an earlier definition",
                path.display(),
                name
            ));
        }
    }
    Ok(())
}

/// Load every `.json` definition file under `root`, in stable path order.
pub fn load_dir(root: &Path) -> Result<LoadOutcome> {
    let mut outcome = LoadOutcome::default();
    let mut files: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "json")
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();

    for file in files {
        load_file(&file, &mut outcome)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::FieldDef;

    #[test]
    fn test_parse_doc_version_mismatch() {
        let json = r#"{ "version": "9.9", "components": [] }"#;
        assert!(parse_doc(json).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let doc = DefinitionDoc {
            components: vec![ComponentDef::new("Teaser").with_field(FieldDef::new("title"))],
            ..Default::default()
        };
        let json = to_json(&doc).unwrap();
        let parsed = parse_doc(&json).unwrap();
        assert_eq!(parsed.components.len(), 1);
        assert_eq!(parsed.components[0].name, "Teaser");
    }

    #[test]
    fn test_load_dir_collects_duplicates() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = |name: &str| {
            format!(
                r#"{{ "version": "1.0", "components": [{{ "name": "{name}" }}] }}"#
            )
        };
        std::fs::write(tmp.path().join("a.json"), doc("Teaser")).unwrap();
        std::fs::write(tmp.path().join("b.json"), doc("Teaser")).unwrap();

        let outcome = load_dir(tmp.path()).unwrap();
        assert_eq!(outcome.registry.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_load_dir_ignores_other_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "not json").unwrap();
        let outcome = load_dir(tmp.path()).unwrap();
        assert!(outcome.registry.is_empty());
    }
}
