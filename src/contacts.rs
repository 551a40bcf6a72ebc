use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directory entry. All fields except `id` and `name` are optional in the
/// source data and degrade to empty strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub notes: String,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: String::new(),
            organization: String::new(),
            role: String::new(),
            notes: String::new(),
        }
    }

    /// One-line summary for list output.
    pub fn display(&self) -> String {
        let mut output = self.name.clone();
        if !self.email.is_empty() {
            output.push_str(&format!(" <{}>", self.email));
        }
        if !self.organization.is_empty() {
            output.push_str(&format!(" - {}", self.organization));
        }
        if !self.role.is_empty() {
            output.push_str(&format!(" ({})", self.role));
        }
        output
    }
}
