use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RepairError, Result};
use crate::names::{ConfiguredNames, NamesConfig};

/// Top-level configuration from `.iacrepair.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub names: NamesConfig,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let types = self
            .names
            .resource_types
            .iter()
            .map(|a| (a.name.as_str(), a.canonical.as_str()));
        let attributes = self
            .names
            .attributes
            .iter()
            .map(|a| (a.name.as_str(), a.canonical.as_str()));
        for (name, canonical) in types.chain(attributes) {
            if name.trim().is_empty() || canonical.trim().is_empty() {
                return Err(RepairError::Config(format!(
                    "alias '{name}' -> '{canonical}' has an empty name"
                )));
            }
        }
        Ok(())
    }

    /// Name database with this config's aliases applied.
    pub fn names_database(&self) -> ConfiguredNames {
        ConfiguredNames::new(&self.names)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# iacrepair configuration

# Extra spellings for resource types, mapped to a canonical type.
# [[names.resource_types]]
# tech = "chef"
# name = "cookbook_file"
# canonical = "file"

# Extra spellings for attributes of a canonical resource type.
# [[names.attributes]]
# tech = "puppet"
# resource = "file"
# name = "target"
# canonical = "path"
"#
    }
}
