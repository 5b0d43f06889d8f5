use serde::{Deserialize, Serialize};

/// IaC technology a script was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tech {
    Ansible,
    Chef,
    Puppet,
    Terraform,
    Docker,
}

impl Tech {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ansible" => Some(Self::Ansible),
            "chef" => Some(Self::Chef),
            "puppet" => Some(Self::Puppet),
            "terraform" | "tf" => Some(Self::Terraform),
            "docker" | "dockerfile" => Some(Self::Docker),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ansible => write!(f, "ansible"),
            Self::Chef => write!(f, "chef"),
            Self::Puppet => write!(f, "puppet"),
            Self::Terraform => write!(f, "terraform"),
            Self::Docker => write!(f, "docker"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parsing_accepts_aliases() {
        assert_eq!(Tech::from_str_lenient("Puppet"), Some(Tech::Puppet));
        assert_eq!(Tech::from_str_lenient("tf"), Some(Tech::Terraform));
        assert_eq!(Tech::from_str_lenient("salt"), None);
    }
}
