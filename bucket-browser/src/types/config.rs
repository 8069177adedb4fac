//! Browser behaviour switches

use std::env;

/// Settings that shape what the pages offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Offer deleting objects
    pub allow_delete: bool,
    /// List every key below a prefix instead of grouping by `/`
    pub list_recursive: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            allow_delete: true,
            list_recursive: false,
        }
    }
}

impl BrowserConfig {
    /// Reads `ALLOW_DELETE` and `LIST_RECURSIVE`, keeping defaults for unset or invalid values
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            allow_delete: bool_var("ALLOW_DELETE").unwrap_or(defaults.allow_delete),
            list_recursive: bool_var("LIST_RECURSIVE").unwrap_or(defaults.list_recursive),
        }
    }
}

fn bool_var(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .and_then(|val| val.trim().to_lowercase().parse::<bool>().ok())
}
