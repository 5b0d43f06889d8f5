//! Parser-layer intermediate representation handed to the repair compiler.
//!
//! The per-technology parsers produce a `UnitBlock`. The labeler and the
//! DeltaP compiler consume it. Only the parts of the tree the compiler reads
//! are modeled here.

pub mod tech;

use serde::{Deserialize, Serialize};

pub use tech::Tech;

/// One IaC script: the unit compiled into a single effect program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitBlock {
    /// Script name, when the parser could determine one.
    #[serde(default)]
    pub name: Option<String>,
    /// Path of the script on disk.
    #[serde(default)]
    pub path: String,
    /// Declared resources, in source order.
    #[serde(default)]
    pub atomic_units: Vec<AtomicUnit>,
}

impl UnitBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn add_atomic_unit(&mut self, unit: AtomicUnit) {
        self.atomic_units.push(unit);
    }
}

/// A declared infrastructure resource (e.g. a managed file).
///
/// The resource exclusively owns its attributes. The compiler appends
/// sketched placeholders here, so later passes see them like source ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicUnit {
    pub name: String,
    /// Technology-specific resource type (e.g. `file`, `ansible.builtin.file`).
    #[serde(rename = "type")]
    pub unit_type: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub position: Position,
}

impl AtomicUnit {
    pub fn new(name: impl Into<String>, unit_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit_type: unit_type.into(),
            attributes: Vec::new(),
            position: Position::default(),
        }
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }
}

/// A `name => value` pair attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    /// `None` when the value is not a plain string (e.g. a nested block).
    pub value: Option<String>,
    /// Whether the value references a variable of the script.
    #[serde(default)]
    pub has_variable: bool,
    pub position: Position,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<String>, has_variable: bool) -> Self {
        Self {
            name: name.into(),
            value,
            has_variable,
            position: Position::default(),
        }
    }

    /// Builder-style setter for the source position.
    pub fn at(mut self, line: i64, column: i64) -> Self {
        self.position = Position::new(line, column);
        self
    }
}

/// Source position of a code element.
///
/// Elements read from source have non-negative coordinates. Negative ones
/// mark placeholders synthesized during compilation. Positions double as the
/// identity of an attribute inside one unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: i64,
    pub column: i64,
}

impl Position {
    pub fn new(line: i64, column: i64) -> Self {
        Self { line, column }
    }

    pub fn is_sketched(&self) -> bool {
        self.line < 0 || self.column < 0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_positions_are_sketched() {
        assert!(Position::new(-1, -1).is_sketched());
        assert!(!Position::new(0, 0).is_sketched());
        assert!(!Position::new(12, 4).is_sketched());
    }

    #[test]
    fn unit_block_loads_from_json() {
        let json = r#"{
            "name": "site.pp",
            "path": "manifests/site.pp",
            "atomic_units": [{
                "name": "/etc/motd",
                "type": "file",
                "position": { "line": 1, "column": 0 },
                "attributes": [
                    { "name": "ensure", "value": "present", "position": { "line": 2, "column": 2 } },
                    { "name": "content", "value": null, "has_variable": true, "position": { "line": 3, "column": 2 } }
                ]
            }]
        }"#;
        let block: UnitBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.atomic_units.len(), 1);
        let unit = &block.atomic_units[0];
        assert_eq!(unit.unit_type, "file");
        assert_eq!(unit.attributes[0].value.as_deref(), Some("present"));
        assert!(!unit.attributes[0].has_variable);
        assert!(unit.attributes[1].value.is_none());
        assert!(unit.attributes[1].has_variable);
    }
}
