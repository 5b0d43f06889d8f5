//! Labels correlate compiled attributes with the code elements they came from.
//!
//! Every attribute the compiler reasons about gets a `Label` and a program
//! variable. Repair search uses the label to find which source attribute (or
//! which sketched placeholder) a candidate value belongs to.

use std::collections::HashMap;

use serde::Serialize;

use crate::delta_p::Label;
use crate::ir::{Position, Tech, UnitBlock};
use crate::names::NamesDatabase;

/// A unit block together with the labels of its attributes.
#[derive(Debug, Clone)]
pub struct LabeledUnitBlock {
    pub script: UnitBlock,
    pub tech: Tech,
    pub labels: LabelTable,
}

impl LabeledUnitBlock {
    /// Wrap a script without labeling anything yet.
    pub fn new(script: UnitBlock, tech: Tech) -> Self {
        Self {
            script,
            tech,
            labels: LabelTable::default(),
        }
    }
}

/// Identity of an attribute inside a unit block: the resource's index in
/// `atomic_units` and the attribute's index in that resource's list.
///
/// Source positions are not unique (parsers may leave them at `0:0`), so
/// labels are never looked up by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeId {
    pub unit: usize,
    pub attribute: usize,
}

impl AttributeId {
    pub fn new(unit: usize, attribute: usize) -> Self {
        Self { unit, attribute }
    }
}

/// Label bookkeeping for one unit. Labels are dense, starting at 0.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: Vec<LabelEntry>,
    by_attribute: HashMap<AttributeId, Label>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub label: Label,
    pub var: String,
    pub attribute: AttributeId,
    /// Position of the labeled attribute, negative when sketched.
    pub position: Position,
    pub sketched: bool,
    /// Index of the atomic unit a sketched attribute was appended to.
    pub sketch_location: Option<usize>,
}

impl LabelTable {
    /// Mint a fresh label for `attribute`, replacing any earlier one.
    pub fn add_label(
        &mut self,
        name: &str,
        attribute: AttributeId,
        position: Position,
        sketched: bool,
    ) -> Label {
        let label = Label(self.entries.len());
        let var = if sketched {
            format!("sketched-{name}-{label}")
        } else {
            format!("{name}-{label}")
        };
        self.entries.push(LabelEntry {
            label,
            var,
            attribute,
            position,
            sketched,
            sketch_location: None,
        });
        self.by_attribute.insert(attribute, label);
        label
    }

    pub fn add_sketch_location(&mut self, label: Label, atomic_unit: usize) {
        if let Some(entry) = self.entries.get_mut(label.0) {
            entry.sketch_location = Some(atomic_unit);
        }
    }

    pub fn get_label(&self, attribute: AttributeId) -> Option<Label> {
        self.by_attribute.get(&attribute).copied()
    }

    pub fn get_var(&self, label: Label) -> Option<&str> {
        self.entry(label).map(|e| e.var.as_str())
    }

    /// Variable of a label minted by this table. Panics on foreign labels.
    pub(crate) fn var_of(&self, label: Label) -> &str {
        &self.entries[label.0].var
    }

    pub fn get_position(&self, label: Label) -> Option<Position> {
        self.entry(label).map(|e| e.position)
    }

    pub fn is_sketched(&self, label: Label) -> bool {
        self.entry(label).is_some_and(|e| e.sketched)
    }

    pub fn sketch_location(&self, label: Label) -> Option<usize> {
        self.entry(label).and_then(|e| e.sketch_location)
    }

    pub fn entry(&self, label: Label) -> Option<&LabelEntry> {
        self.entries.get(label.0)
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Label every canonicalizable attribute of every resource, in source order.
pub fn label(script: UnitBlock, tech: Tech, names: &dyn NamesDatabase) -> LabeledUnitBlock {
    let mut labeled = LabeledUnitBlock::new(script, tech);

    for (unit_index, unit) in labeled.script.atomic_units.iter().enumerate() {
        let resource_type = names.canonicalize_resource_type(&unit.unit_type, tech);
        for (index, attribute) in unit.attributes.iter().enumerate() {
            if let Some(name) =
                names.canonicalize_attribute_name(&attribute.name, &resource_type, tech)
            {
                let id = AttributeId::new(unit_index, index);
                labeled.labels.add_label(&name, id, attribute.position, false);
            }
        }
    }

    tracing::debug!(
        script = labeled.script.name.as_deref().unwrap_or("<unnamed>"),
        labels = labeled.labels.len(),
        "labeled unit block"
    );

    labeled
}
