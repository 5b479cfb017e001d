use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named Git identity stored in the profiles file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    /// Unique profile name
    pub name: String,
    /// Git username (user.name)
    pub git_name: String,
    /// Git email address (user.email)
    pub git_email: String,
    /// Fields written by other tools or by hand, kept as-is on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn new(name: &str, git_name: &str, git_email: &str) -> Self {
        Self {
            name: name.to_string(),
            git_name: git_name.to_string(),
            git_email: git_email.to_string(),
            extra: Map::new(),
        }
    }

    /// Identity this profile writes to the Git config
    pub fn identity(&self) -> Identity {
        Identity::new(&self.git_name, &self.git_email)
    }

    /// Checks whether this profile carries the given identity
    pub fn matches(&self, git_name: &str, git_email: &str) -> bool {
        self.git_name == git_name && self.git_email == git_email
    }
}

/// Snapshot of `user.name` and `user.email` for one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
