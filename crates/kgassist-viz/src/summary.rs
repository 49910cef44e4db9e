//! Most-connected entities, counted straight from the relationship table.

use crate::error::Result;
use crate::model::Relationship;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityConnections {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Connections")]
    pub connections: usize,
}

/// Count how often each name appears as a source or target, including names
/// with no matching entity row. Blank endpoints are not counted. Highest
/// counts first, ties in first-seen order, at most `limit` rows.
pub fn top_entities(relationships: &[Relationship], limit: usize) -> Vec<EntityConnections> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<EntityConnections> = Vec::new();

    let endpoints = relationships
        .iter()
        .map(|r| r.source.as_str())
        .chain(relationships.iter().map(|r| r.target.as_str()))
        .filter(|name| !name.is_empty());
    for name in endpoints {
        match position.get(name) {
            Some(&i) => counts[i].connections += 1,
            None => {
                position.insert(name, counts.len());
                counts.push(EntityConnections {
                    entity: name.to_string(),
                    connections: 1,
                });
            }
        }
    }

    // stable: ties keep first-seen order
    counts.sort_by(|a, b| b.connections.cmp(&a.connections));
    counts.truncate(limit);
    counts
}

/// Write rows as CSV with an `Entity,Connections` header.
pub fn write_csv(path: &Path, rows: &[EntityConnections]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(["Entity", "Connections"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
