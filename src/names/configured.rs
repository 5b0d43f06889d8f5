use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{BuiltinNames, NamesDatabase};
use crate::ir::Tech;

/// `[names]` section of `.iacrepair.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesConfig {
    /// Extra raw resource type spellings.
    #[serde(default)]
    pub resource_types: Vec<ResourceTypeAlias>,
    /// Extra raw attribute spellings.
    #[serde(default)]
    pub attributes: Vec<AttributeAlias>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeAlias {
    pub tech: Tech,
    pub name: String,
    pub canonical: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAlias {
    pub tech: Tech,
    /// Canonical resource type the alias applies to.
    pub resource: String,
    pub name: String,
    pub canonical: String,
}

/// User aliases layered over the builtin tables. Aliases win.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredNames {
    resource_types: HashMap<(Tech, String), String>,
    attributes: HashMap<(Tech, String, String), String>,
    fallback: BuiltinNames,
}

impl ConfiguredNames {
    pub fn new(config: &NamesConfig) -> Self {
        let resource_types = config
            .resource_types
            .iter()
            .map(|alias| ((alias.tech, alias.name.clone()), alias.canonical.clone()))
            .collect();
        let attributes = config
            .attributes
            .iter()
            .map(|alias| {
                (
                    (alias.tech, alias.resource.clone(), alias.name.clone()),
                    alias.canonical.clone(),
                )
            })
            .collect();
        Self {
            resource_types,
            attributes,
            fallback: BuiltinNames,
        }
    }
}

impl NamesDatabase for ConfiguredNames {
    fn canonicalize_resource_type(&self, raw: &str, tech: Tech) -> String {
        match self.resource_types.get(&(tech, raw.to_string())) {
            Some(canonical) => canonical.clone(),
            None => self.fallback.canonicalize_resource_type(raw, tech),
        }
    }

    fn canonicalize_attribute_name(
        &self,
        raw: &str,
        resource_type: &str,
        tech: Tech,
    ) -> Option<String> {
        let key = (tech, resource_type.to_string(), raw.to_string());
        match self.attributes.get(&key) {
            Some(canonical) => Some(canonical.clone()),
            None => self
                .fallback
                .canonicalize_attribute_name(raw, resource_type, tech),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NamesConfig {
        NamesConfig {
            resource_types: vec![ResourceTypeAlias {
                tech: Tech::Chef,
                name: "cookbook_file".into(),
                canonical: "file".into(),
            }],
            attributes: vec![AttributeAlias {
                tech: Tech::Puppet,
                resource: "file".into(),
                name: "target".into(),
                canonical: "path".into(),
            }],
        }
    }

    #[test]
    fn aliases_extend_builtin_tables() {
        let names = ConfiguredNames::new(&config());
        assert_eq!(names.canonicalize_resource_type("cookbook_file", Tech::Chef), "file");
        assert_eq!(
            names
                .canonicalize_attribute_name("target", "file", Tech::Puppet)
                .as_deref(),
            Some("path")
        );
    }

    #[test]
    fn builtin_names_still_resolve() {
        let names = ConfiguredNames::new(&config());
        assert_eq!(names.canonicalize_resource_type("file", Tech::Puppet), "file");
        assert_eq!(
            names
                .canonicalize_attribute_name("ensure", "file", Tech::Puppet)
                .as_deref(),
            Some("state")
        );
    }

    #[test]
    fn alias_overrides_builtin_entry() {
        let mut config = config();
        config.attributes.push(AttributeAlias {
            tech: Tech::Ansible,
            resource: "file".into(),
            name: "name".into(),
            canonical: "owner".into(),
        });
        let names = ConfiguredNames::new(&config);
        assert_eq!(
            names
                .canonicalize_attribute_name("name", "file", Tech::Ansible)
                .as_deref(),
            Some("owner")
        );
    }
}
