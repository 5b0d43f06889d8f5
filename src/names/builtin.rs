use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{NamesDatabase, FILE};
use crate::ir::Tech;

/// Name tables shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNames;

static RESOURCE_TYPES: Lazy<HashMap<Tech, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            (Tech::Puppet, HashMap::from([("file", FILE)])),
            (Tech::Chef, HashMap::from([("file", FILE)])),
            (
                Tech::Ansible,
                HashMap::from([("file", FILE), ("ansible.builtin.file", FILE)]),
            ),
            (Tech::Terraform, HashMap::from([("local_file", FILE)])),
        ])
    });

// raw attribute name -> canonical name, for the canonical `file` type
static FILE_ATTRIBUTES: Lazy<HashMap<Tech, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            (
                Tech::Puppet,
                HashMap::from([
                    ("path", "path"),
                    ("content", "content"),
                    ("ensure", "state"),
                    ("owner", "owner"),
                    ("group", "group"),
                    ("mode", "mode"),
                ]),
            ),
            (
                Tech::Ansible,
                HashMap::from([
                    ("path", "path"),
                    ("dest", "path"),
                    ("name", "path"),
                    ("content", "content"),
                    ("state", "state"),
                    ("owner", "owner"),
                    ("group", "group"),
                    ("mode", "mode"),
                ]),
            ),
            (
                Tech::Chef,
                HashMap::from([
                    ("path", "path"),
                    ("content", "content"),
                    ("action", "state"),
                    ("owner", "owner"),
                    ("group", "group"),
                    ("mode", "mode"),
                ]),
            ),
            (
                Tech::Terraform,
                HashMap::from([
                    ("filename", "path"),
                    ("content", "content"),
                    ("file_permission", "mode"),
                ]),
            ),
        ])
    });

impl NamesDatabase for BuiltinNames {
    fn canonicalize_resource_type(&self, raw: &str, tech: Tech) -> String {
        RESOURCE_TYPES
            .get(&tech)
            .and_then(|types| types.get(raw))
            .map_or_else(|| raw.to_string(), |canonical| canonical.to_string())
    }

    fn canonicalize_attribute_name(
        &self,
        raw: &str,
        resource_type: &str,
        tech: Tech,
    ) -> Option<String> {
        if resource_type != FILE {
            return None;
        }
        FILE_ATTRIBUTES
            .get(&tech)
            .and_then(|names| names.get(raw))
            .map(|canonical| canonical.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_types_are_canonicalized_per_tech() {
        let names = BuiltinNames;
        assert_eq!(names.canonicalize_resource_type("file", Tech::Puppet), "file");
        assert_eq!(
            names.canonicalize_resource_type("ansible.builtin.file", Tech::Ansible),
            "file"
        );
        assert_eq!(
            names.canonicalize_resource_type("local_file", Tech::Terraform),
            "file"
        );
    }

    #[test]
    fn unknown_types_pass_through() {
        let names = BuiltinNames;
        assert_eq!(names.canonicalize_resource_type("package", Tech::Puppet), "package");
        assert_eq!(names.canonicalize_resource_type("local_file", Tech::Puppet), "local_file");
    }

    #[test]
    fn state_spellings_converge() {
        let names = BuiltinNames;
        for (raw, tech) in [
            ("ensure", Tech::Puppet),
            ("state", Tech::Ansible),
            ("action", Tech::Chef),
        ] {
            assert_eq!(
                names.canonicalize_attribute_name(raw, "file", tech).as_deref(),
                Some("state"),
                "{raw} in {tech}"
            );
        }
    }

    #[test]
    fn unmodeled_attributes_are_dropped() {
        let names = BuiltinNames;
        assert_eq!(names.canonicalize_attribute_name("backup", "file", Tech::Puppet), None);
        assert_eq!(names.canonicalize_attribute_name("ensure", "package", Tech::Puppet), None);
        assert_eq!(names.canonicalize_attribute_name("ensure", "file", Tech::Ansible), None);
    }
}
