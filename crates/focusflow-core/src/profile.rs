use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_PLAN: &str = "Pro";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default = "default_plan")]
    pub plan: String,
}

fn default_plan() -> String {
    DEFAULT_PLAN.to_string()
}

impl UserProfile {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name"));
        }
        Ok(Self {
            name: name.to_string(),
            plan: default_plan(),
        })
    }

    /// Up to two uppercase initials, one per word.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials() {
        let p = UserProfile::new("ada  lovelace byron").unwrap();
        assert_eq!(p.initials(), "AL");
        assert_eq!(UserProfile::new("Grace").unwrap().initials(), "G");
    }

    #[test]
    fn new_trims_and_defaults_plan() {
        let p = UserProfile::new("  Sam ").unwrap();
        assert_eq!(p.name, "Sam");
        assert_eq!(p.plan, "Pro");
        assert!(UserProfile::new("   ").is_err());
    }
}
