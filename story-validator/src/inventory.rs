//! Component inventory snapshot supplied by the discovery collaborator.
//!
//! The inventory is an ordered list: suggestion lookups walk it in the
//! caller-supplied insertion order, so the same inventory always yields the
//! same suggestion. Callers own its lifetime and refresh policy; the
//! validator only borrows it for the duration of one call.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

use crate::errors::Result;

/// Metadata for one real, importable component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub prop_names: Vec<String>,
    pub import_path: String,
}

impl ComponentInfo {
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            prop_names: Vec::new(),
            import_path: import_path.into(),
        }
    }
}

/// Immutable, insertion-ordered `name -> ComponentInfo` snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ComponentInfo>", into = "Vec<ComponentInfo>")]
pub struct ComponentInventory {
    entries: Vec<ComponentInfo>,
    by_name: HashMap<String, usize>,
}

impl ComponentInventory {
    /// Build from entries; a repeated name keeps its first occurrence.
    pub fn new(components: impl IntoIterator<Item = ComponentInfo>) -> Self {
        let mut entries = Vec::new();
        let mut by_name = HashMap::new();
        for c in components {
            if by_name.contains_key(&c.name) {
                continue;
            }
            by_name.insert(c.name.clone(), entries.len());
            entries.push(c);
        }
        Self { entries, by_name }
    }

    /// Convenience constructor: every name shares one import path.
    pub fn from_names<I, S>(import_path: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|n| ComponentInfo::new(n, import_path)),
        )
    }

    /// Parse a JSON array of `{name, required, propNames, importPath}` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<ComponentInfo> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load a discovery snapshot written to disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let inv = Self::from_json_str(&text)?;
        debug!(path = %path.display(), components = inv.len(), "component inventory loaded");
        Ok(inv)
    }

    pub fn get(&self, name: &str) -> Option<&ComponentInfo> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Component names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ComponentInfo>> for ComponentInventory {
    fn from(entries: Vec<ComponentInfo>) -> Self {
        Self::new(entries)
    }
}

impl From<ComponentInventory> for Vec<ComponentInfo> {
    fn from(inv: ComponentInventory) -> Self {
        inv.entries
    }
}
