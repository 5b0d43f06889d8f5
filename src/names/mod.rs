//! Canonical names for resource types and attributes.
//!
//! Each technology spells the same concept differently (Puppet `ensure`,
//! Ansible `state`, Chef `action`). The compiler only reasons about canonical
//! names, so every raw name goes through a `NamesDatabase` first.

mod builtin;
mod configured;

use crate::ir::Tech;

pub use builtin::BuiltinNames;
pub use configured::{AttributeAlias, ConfiguredNames, NamesConfig, ResourceTypeAlias};

/// Canonical resource type of managed files.
pub const FILE: &str = "file";

/// Maps technology-specific names onto canonical ones.
pub trait NamesDatabase: Send + Sync {
    /// Canonical resource type. Unknown types come back unchanged.
    fn canonicalize_resource_type(&self, raw: &str, tech: Tech) -> String;

    /// Canonical attribute name, or `None` when the attribute is not modeled.
    fn canonicalize_attribute_name(
        &self,
        raw: &str,
        resource_type: &str,
        tech: Tech,
    ) -> Option<String>;
}
