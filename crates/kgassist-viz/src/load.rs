//! Locate and read the entity/relationship tables.
//!
//! GraphRAG versions disagree on file and column names, so each lookup
//! tries a short list of alternatives: `create_final_entities` before
//! `entities`, `title` before `name`, `source`/`target` before `src`/`tgt`.

use crate::error::{Result, VizError};
use crate::model::{Entity, Relationship, UNKNOWN_TYPE};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const ENTITY_STEMS: &[&str] = &["create_final_entities", "entities"];
const RELATIONSHIP_STEMS: &[&str] = &["create_final_relationships", "relationships"];
const EXTENSIONS: &[&str] = &["csv", "json"];
/// Extensions listed when the entity table is missing.
const TABULAR_EXTENSIONS: &[&str] = &["csv", "json", "parquet"];

/// Resolved input table paths.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFiles {
    pub entities: PathBuf,
    pub relationships: PathBuf,
}

impl InputFiles {
    /// Find the entity and relationship tables in `dir`.
    pub fn locate(dir: &Path) -> Result<Self> {
        let Some(entities) = first_existing(dir, ENTITY_STEMS) else {
            return Err(VizError::EntitiesNotFound {
                dir: dir.to_path_buf(),
                found: tabular_files(dir),
            });
        };
        let Some(relationships) = first_existing(dir, RELATIONSHIP_STEMS) else {
            return Err(VizError::RelationshipsNotFound {
                dir: dir.to_path_buf(),
            });
        };
        Ok(Self {
            entities,
            relationships,
        })
    }
}

fn first_existing(dir: &Path, stems: &[&str]) -> Option<PathBuf> {
    stems
        .iter()
        .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
        .find(|p| p.is_file())
}

/// Names of tabular files in `dir`, sorted. Empty if the directory is missing.
fn tabular_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| TABULAR_EXTENSIONS.contains(&e))
        })
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

/// The two loaded tables, rows in file order.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl Tables {
    pub fn load(files: &InputFiles) -> Result<Self> {
        let entities = load_entities(&files.entities)?;
        let relationships = load_relationships(&files.relationships)?;
        tracing::info!(
            entities = entities.len(),
            relationships = relationships.len(),
            "loaded tables"
        );
        Ok(Self {
            entities,
            relationships,
        })
    }

    /// Distinct entity types in first-appearance order.
    pub fn entity_types(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for e in &self.entities {
            if !seen.contains(&e.entity_type) {
                seen.push(e.entity_type.clone());
            }
        }
        seen
    }

    /// Whether any entity has a type other than the `unknown` fallback.
    pub fn has_types(&self) -> bool {
        self.entities.iter().any(|e| e.entity_type != UNKNOWN_TYPE)
    }

    /// Row count per entity type, most frequent first (ties keep first appearance).
    pub fn entity_type_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for e in &self.entities {
            match counts.iter_mut().find(|(t, _)| *t == e.entity_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((e.entity_type.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

pub fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let table = RawTable::read(path)?;
    let title = table.require(&["title", "name"])?;
    let kind = table.column(&["type"]);
    let description = table.column(&["description"]);

    Ok(table
        .rows
        .iter()
        .filter_map(|row| {
            let title = row.get(&title).map(|s| s.trim()).unwrap_or_default();
            if title.is_empty() {
                return None;
            }
            let entity_type = kind
                .as_ref()
                .and_then(|c| row.get(c))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_TYPE);
            Some(Entity {
                title: title.to_string(),
                entity_type: entity_type.to_string(),
                description: cell(row, description.as_deref()),
            })
        })
        .collect())
}

pub fn load_relationships(path: &Path) -> Result<Vec<Relationship>> {
    let table = RawTable::read(path)?;
    let source = table.require(&["source", "src"])?;
    let target = table.require(&["target", "tgt"])?;
    let description = table.column(&["description"]);
    let weight = table.column(&["weight"]);

    Ok(table
        .rows
        .iter()
        .map(|row| {
            let source = row.get(&source).map(|s| s.trim()).unwrap_or_default();
            let target = row.get(&target).map(|s| s.trim()).unwrap_or_default();
            let raw_weight = cell(row, weight.as_deref());
            let weight = if raw_weight.trim().is_empty() {
                1.0
            } else {
                raw_weight.trim().parse::<f64>().unwrap_or_else(|_| {
                    tracing::warn!(%source, %target, value = %raw_weight, "unparseable weight, using 1.0");
                    1.0
                })
            };
            Relationship {
                source: source.to_string(),
                target: target.to_string(),
                description: cell(row, description.as_deref()),
                weight,
            }
        })
        .collect())
}

fn cell(row: &HashMap<String, String>, column: Option<&str>) -> String {
    column
        .and_then(|c| row.get(c))
        .cloned()
        .unwrap_or_default()
}

/// A table as column names plus string cells, independent of file format.
struct RawTable {
    path: PathBuf,
    columns: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    fn read(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::read_json(path)
        } else {
            Self::read_csv(path)
        }
    }

    fn read_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = columns
                .iter()
                .zip(record.iter())
                .map(|(c, v)| (c.clone(), v.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    fn read_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let serde_json::Value::Array(items) = value else {
            return Err(VizError::InvalidTable {
                file: path.to_path_buf(),
                message: "expected a JSON array of objects".to_string(),
            });
        };

        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let serde_json::Value::Object(map) = item else {
                return Err(VizError::InvalidTable {
                    file: path.to_path_buf(),
                    message: "expected every row to be a JSON object".to_string(),
                });
            };
            let mut row = HashMap::with_capacity(map.len());
            for (key, value) in map {
                if !columns.contains(&key) {
                    columns.push(key.clone());
                }
                let text = match value {
                    serde_json::Value::Null => String::new(),
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                row.insert(key, text);
            }
            rows.push(row);
        }
        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    /// First of `names` present as a column.
    fn column(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .find(|n| self.columns.iter().any(|c| c == *n))
            .map(|n| n.to_string())
    }

    fn require(&self, names: &[&str]) -> Result<String> {
        self.column(names).ok_or_else(|| VizError::MissingColumn {
            file: self.path.clone(),
            expected: names.iter().map(|n| n.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prefers_create_final_tables() {
        let dir = tempfile::tempdir().unwrap();
        for f in [
            "entities.csv",
            "create_final_entities.csv",
            "relationships.json",
        ] {
            fs::write(dir.path().join(f), "").unwrap();
        }
        let files = InputFiles::locate(dir.path()).unwrap();
        assert_eq!(files.entities, dir.path().join("create_final_entities.csv"));
        assert_eq!(files.relationships, dir.path().join("relationships.json"));
    }

    #[test]
    fn missing_entities_lists_what_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("relationships.parquet"), "").unwrap();
        fs::write(dir.path().join("communities.parquet"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        match InputFiles::locate(dir.path()) {
            Err(VizError::EntitiesNotFound { found, .. }) => {
                assert_eq!(found, vec!["communities.parquet", "relationships.parquet"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        match InputFiles::locate(&dir.path().join("output")) {
            Err(VizError::EntitiesNotFound { found, .. }) => assert!(found.is_empty()),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_relationships_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("entities.csv"), "title\nA\n").unwrap();
        assert!(matches!(
            InputFiles::locate(dir.path()),
            Err(VizError::RelationshipsNotFound { .. })
        ));
    }

    #[test]
    fn csv_entities_with_fallback_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        fs::write(
            &path,
            "id,name,description\n1,PEAK ENERGY,\"Energy, during peak\"\n2,,skipped\n3,INVOICE,\n",
        )
        .unwrap();

        let entities = load_entities(&path).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].title, "PEAK ENERGY");
        assert_eq!(entities[0].entity_type, UNKNOWN_TYPE);
        assert_eq!(entities[0].description, "Energy, during peak");
        assert_eq!(entities[1].title, "INVOICE");
        assert!(!Tables { entities, relationships: vec![] }.has_types());
    }

    #[test]
    fn json_relationships_with_short_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relationships.json");
        fs::write(
            &path,
            r#"[
                {"src": "A", "tgt": "B", "weight": 2.5, "description": "pays"},
                {"src": "B", "tgt": "C"},
                {"src": "C", "tgt": "D", "weight": null},
                {"src": "", "tgt": "D"}
            ]"#,
        )
        .unwrap();

        let rels = load_relationships(&path).unwrap();
        assert_eq!(rels.len(), 4);
        assert_eq!(rels[0].weight, 2.5);
        assert_eq!(rels[0].description, "pays");
        assert_eq!(rels[1].weight, 1.0);
        assert_eq!(rels[2].weight, 1.0);
        // half-blank rows still count as relationships
        assert_eq!(rels[3].source, "");
        assert_eq!(rels[3].target, "D");
    }

    #[test]
    fn missing_required_column_names_alternatives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relationships.csv");
        fs::write(&path, "from,to\nA,B\n").unwrap();

        let err = load_relationships(&path).unwrap_err();
        assert!(err.to_string().contains("source, src"));
    }

    #[test]
    fn type_counts_sorted_by_frequency() {
        let tables = Tables {
            entities: vec![
                Entity::new("A", "organization"),
                Entity::new("B", "event"),
                Entity::new("C", "event"),
                Entity::new("D", "geo"),
            ],
            relationships: vec![],
        };
        assert!(tables.has_types());
        assert_eq!(tables.entity_types(), vec!["organization", "event", "geo"]);
        assert_eq!(
            tables.entity_type_counts(),
            vec![
                ("event".to_string(), 2),
                ("organization".to_string(), 1),
                ("geo".to_string(), 1),
            ]
        );
    }
}
