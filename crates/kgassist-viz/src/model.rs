//! Rows of the entity and relationship tables.

use serde::Serialize;

/// Entity type used when the table has no type column or the cell is blank.
pub const UNKNOWN_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub title: String,
    pub entity_type: String,
    pub description: String,
}

impl Entity {
    pub fn new(title: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entity_type: entity_type.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub description: String,
    pub weight: f64,
}

impl Relationship {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            description: String::new(),
            weight: 1.0,
        }
    }
}
