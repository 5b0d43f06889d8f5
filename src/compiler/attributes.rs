use std::collections::HashMap;

use crate::delta_p::{Expr, Label};
use crate::ir::{AtomicUnit, Attribute, Position, Tech};
use crate::labeler::{AttributeId, LabelTable};
use crate::names::NamesDatabase;

/// Per-unit compilation state.
///
/// Created once per compiled unit and dropped with it, so concurrent
/// compilations of different units never share a sketch counter.
pub struct CompileContext<'n> {
    names: &'n dyn NamesDatabase,
    tech: Tech,
    next_sketch: i64,
}

impl<'n> CompileContext<'n> {
    pub fn new(names: &'n dyn NamesDatabase, tech: Tech) -> Self {
        Self {
            names,
            tech,
            next_sketch: -1,
        }
    }

    pub fn tech(&self) -> Tech {
        self.tech
    }

    /// Position for the next synthesized attribute: -1, -2, -3, ...
    fn next_sketch_position(&mut self) -> Position {
        let position = Position::new(self.next_sketch, self.next_sketch);
        self.next_sketch -= 1;
        position
    }
}

/// Attributes of one resource, keyed by canonical name.
///
/// Holds the resource mutably for the duration of its compilation: sketched
/// placeholders are appended to the resource's own attribute list.
pub struct ResourceAttributes<'u> {
    unit: &'u mut AtomicUnit,
    unit_index: usize,
    resource_type: String,
    entries: HashMap<String, (Expr, usize)>,
}

impl<'u> ResourceAttributes<'u> {
    pub fn new(unit: &'u mut AtomicUnit, unit_index: usize, ctx: &CompileContext<'_>) -> Self {
        let resource_type = ctx
            .names
            .canonicalize_resource_type(&unit.unit_type, ctx.tech);
        Self {
            unit,
            unit_index,
            resource_type,
            entries: HashMap::new(),
        }
    }

    /// Canonical type of the resource.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn unit(&self) -> &AtomicUnit {
        self.unit
    }

    /// Register the attribute at `index` under its canonical name.
    ///
    /// Returns the canonical name, or `None` when the name database does not
    /// model the attribute; such attributes are left out of compilation.
    pub fn add_attribute(&mut self, index: usize, ctx: &CompileContext<'_>) -> Option<String> {
        let attribute = self.unit.attributes.get(index)?;
        let name = ctx.names.canonicalize_attribute_name(
            &attribute.name,
            &self.resource_type,
            ctx.tech,
        );
        match name {
            Some(name) => {
                self.register(name.clone(), index);
                Some(name)
            }
            None => {
                tracing::debug!(
                    resource = %self.unit.name,
                    attribute = %attribute.name,
                    "attribute has no canonical name, dropped"
                );
                None
            }
        }
    }

    /// Register every source attribute, returning canonical names in order.
    pub fn add_all(&mut self, ctx: &CompileContext<'_>) -> Vec<String> {
        (0..self.unit.attributes.len())
            .filter_map(|index| self.add_attribute(index, ctx))
            .collect()
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.entries
            .get(name)
            .and_then(|(_, index)| self.unit.attributes.get(*index))
    }

    /// Compiled value of an attribute, `Undefined` when it was never set.
    pub fn get_attribute_value(&self, name: &str) -> Expr {
        self.entries
            .get(name)
            .map_or(Expr::Undefined, |(value, _)| value.clone())
    }

    /// Label and variable for the attribute `name` of this resource.
    ///
    /// Repeated calls for the same name return the same pair. When the
    /// resource never set the attribute, a placeholder with an empty value is
    /// appended to the resource and labeled as sketched, so repair search can
    /// treat its variable as a free parameter.
    pub fn create_label_var_pair(
        &mut self,
        name: &str,
        ctx: &mut CompileContext<'_>,
        labels: &mut LabelTable,
    ) -> (Label, String) {
        let label = match self.entries.get(name).map(|(_, index)| *index) {
            Some(index) => {
                let id = AttributeId::new(self.unit_index, index);
                let position = self.unit.attributes[index].position;
                labels
                    .get_label(id)
                    .unwrap_or_else(|| labels.add_label(name, id, position, false))
            }
            None => self.sketch(name, ctx, labels),
        };
        (label, labels.var_of(label).to_string())
    }

    fn sketch(
        &mut self,
        name: &str,
        ctx: &mut CompileContext<'_>,
        labels: &mut LabelTable,
    ) -> Label {
        let position = ctx.next_sketch_position();
        let mut attribute = Attribute::new(name, Some(String::new()), false);
        attribute.position = position;
        self.unit.add_attribute(attribute);
        let index = self.unit.attributes.len() - 1;
        self.register(name.to_string(), index);

        let id = AttributeId::new(self.unit_index, index);
        let label = labels.add_label(name, id, position, true);
        labels.add_sketch_location(label, self.unit_index);
        tracing::debug!(
            resource = %self.unit.name,
            attribute = name,
            %label,
            %position,
            "sketched missing attribute"
        );
        label
    }

    fn register(&mut self, name: String, index: usize) {
        let value = compile_value(self.unit.attributes[index].value.as_deref());
        self.entries.insert(name, (value, index));
    }
}

/// Absent values become `Undefined`, the single "unknown" sentinel.
fn compile_value(value: Option<&str>) -> Expr {
    match value {
        Some(value) => Expr::constant(value),
        None => Expr::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::BuiltinNames;
    use proptest::prelude::*;

    fn motd() -> AtomicUnit {
        let mut unit = AtomicUnit::new("/etc/motd", "file");
        unit.add_attribute(Attribute::new("ensure", Some("present".into()), false).at(2, 2));
        unit.add_attribute(Attribute::new("owner", None, true).at(3, 2));
        unit.add_attribute(Attribute::new("backup", Some("false".into()), false).at(4, 2));
        unit
    }

    #[test]
    fn values_are_compiled_by_canonical_name() {
        let names = BuiltinNames;
        let ctx = CompileContext::new(&names, Tech::Puppet);
        let mut unit = motd();
        let mut attributes = ResourceAttributes::new(&mut unit, 0, &ctx);
        assert_eq!(attributes.add_all(&ctx), vec!["state", "owner"]);

        assert_eq!(attributes.get_attribute_value("state"), Expr::constant("present"));
        assert_eq!(attributes.get_attribute_value("owner"), Expr::Undefined);
        assert_eq!(attributes.get_attribute_value("mode"), Expr::Undefined);
        assert_eq!(
            attributes.get_attribute("state").map(|a| a.name.as_str()),
            Some("ensure")
        );
        assert!(attributes.get_attribute("backup").is_none());
    }

    #[test]
    fn existing_attribute_reuses_its_label() {
        let names = BuiltinNames;
        let mut ctx = CompileContext::new(&names, Tech::Puppet);
        let mut labels = LabelTable::default();
        let state_label =
            labels.add_label("state", AttributeId::new(0, 0), Position::new(2, 2), false);

        let mut unit = motd();
        let mut attributes = ResourceAttributes::new(&mut unit, 0, &ctx);
        attributes.add_all(&ctx);
        let (label, var) = attributes.create_label_var_pair("state", &mut ctx, &mut labels);

        assert_eq!(label, state_label);
        assert_eq!(var, "state-0");
        assert_eq!(attributes.unit().attributes.len(), 3);
    }

    #[test]
    fn missing_attribute_is_sketched_onto_the_resource() {
        let names = BuiltinNames;
        let mut ctx = CompileContext::new(&names, Tech::Puppet);
        let mut labels = LabelTable::default();

        let mut unit = motd();
        let mut attributes = ResourceAttributes::new(&mut unit, 4, &ctx);
        attributes.add_all(&ctx);
        let (label, var) = attributes.create_label_var_pair("content", &mut ctx, &mut labels);

        assert_eq!(var, "sketched-content-0");
        assert!(labels.is_sketched(label));
        assert_eq!(labels.sketch_location(label), Some(4));
        assert_eq!(attributes.get_attribute_value("content"), Expr::constant(""));

        let sketched = attributes.unit().attributes.last().unwrap();
        assert_eq!(sketched.name, "content");
        assert_eq!(sketched.value.as_deref(), Some(""));
        assert!(!sketched.has_variable);
        assert_eq!(sketched.position, Position::new(-1, -1));
    }

    #[test]
    fn unlabeled_source_attribute_gets_a_fresh_label() {
        let names = BuiltinNames;
        let mut ctx = CompileContext::new(&names, Tech::Puppet);
        let mut labels = LabelTable::default();

        let mut unit = motd();
        let mut attributes = ResourceAttributes::new(&mut unit, 0, &ctx);
        attributes.add_all(&ctx);
        let (label, var) = attributes.create_label_var_pair("owner", &mut ctx, &mut labels);

        assert_eq!(var, "owner-0");
        assert!(!labels.is_sketched(label));
        assert_eq!(attributes.unit().attributes.len(), 3);
    }

    #[test]
    fn attributes_at_the_default_position_keep_separate_labels() {
        let names = BuiltinNames;
        let mut ctx = CompileContext::new(&names, Tech::Puppet);
        let mut labels = LabelTable::default();

        let mut unit = AtomicUnit::new("/etc/motd", "file");
        unit.add_attribute(Attribute::new("ensure", Some("present".into()), false));
        unit.add_attribute(Attribute::new("owner", Some("root".into()), false));
        let mut attributes = ResourceAttributes::new(&mut unit, 0, &ctx);
        attributes.add_all(&ctx);

        let (state, state_var) = attributes.create_label_var_pair("state", &mut ctx, &mut labels);
        let (owner, owner_var) = attributes.create_label_var_pair("owner", &mut ctx, &mut labels);
        assert_ne!(state, owner);
        assert_eq!(state_var, "state-0");
        assert_eq!(owner_var, "owner-1");
        assert_eq!(labels.get_label(AttributeId::new(0, 0)), Some(state));
        assert_eq!(labels.get_label(AttributeId::new(0, 1)), Some(owner));
    }

    proptest! {
        #[test]
        fn label_var_pairs_are_memoized(names in prop::collection::vec("[a-z]{1,6}", 1..12)) {
            let db = BuiltinNames;
            let mut ctx = CompileContext::new(&db, Tech::Puppet);
            let mut labels = LabelTable::default();
            let mut unit = AtomicUnit::new("f", "file");
            let mut attributes = ResourceAttributes::new(&mut unit, 0, &ctx);

            for name in &names {
                let first = attributes.create_label_var_pair(name, &mut ctx, &mut labels);
                let second = attributes.create_label_var_pair(name, &mut ctx, &mut labels);
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn sketch_positions_strictly_decrease(count in 1usize..20) {
            let db = BuiltinNames;
            let mut ctx = CompileContext::new(&db, Tech::Puppet);
            let mut labels = LabelTable::default();
            let mut unit = AtomicUnit::new("f", "file");
            let mut attributes = ResourceAttributes::new(&mut unit, 0, &ctx);

            for i in 0..count {
                attributes.create_label_var_pair(&format!("attr{i}"), &mut ctx, &mut labels);
            }

            let lines: Vec<i64> = attributes.unit().attributes.iter().map(|a| a.position.line).collect();
            let expected: Vec<i64> = (1..=count as i64).map(|n| -n).collect();
            prop_assert_eq!(lines, expected);
        }
    }
}
