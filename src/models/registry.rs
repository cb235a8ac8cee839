//! Registry of available distro configurations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Available distros, keyed by short name (e.g. `ubuntu`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistroRegistry {
    pub default_key: String,
    pub entries: IndexMap<String, DistroEntry>,
}

/// One registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistroEntry {
    pub display_name: String,
    /// Where the distro bundle is fetched from.
    pub config_location: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

impl DistroRegistry {
    pub fn get(&self, key: &str) -> Option<&DistroEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Pick `preferred` when it is registered, otherwise the default key.
    pub fn resolve_key<'a>(&'a self, preferred: Option<&'a str>) -> &'a str {
        match preferred {
            Some(key) if self.contains(key) => key,
            _ => &self.default_key,
        }
    }
}
