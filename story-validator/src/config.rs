//! Validator configuration loaded from environment variables or JSON.
//!
//! # Environment variables
//! - `STORY_PRIMARY_IMPORT`    = design-system import path (default `@mantine/core`)
//! - `STORY_MAX_RETRIES`       = syntax repair cycles (default `1`)
//! - `STORY_FILE_KIND`         = `tsx` | `jsx` (default `tsx`)
//! - `STORY_RUNTIME_MODULE`    = rendering runtime module (default `react`, `none` disables)
//! - `STORY_RUNTIME_STATEMENT` = import statement inserted when the runtime is missing

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidatorError};
use crate::types::FileKind;

pub const DEFAULT_PRIMARY_IMPORT: &str = "@mantine/core";
pub const DEFAULT_MAX_RETRIES: usize = 1;
pub const DEFAULT_MAX_LISTED_COMPONENTS: usize = 10;

/// Rendering runtime that must be imported whenever JSX is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeImport {
    /// Module specifier, e.g. `react`.
    pub module: String,
    /// Canonical statement inserted by the repair pass.
    pub statement: String,
}

impl RuntimeImport {
    pub fn react() -> Self {
        Self::for_module("react")
    }

    pub fn for_module(module: &str) -> Self {
        Self {
            module: module.to_string(),
            statement: format!("import React from '{module}';"),
        }
    }
}

/// Identifier patterns that look like components but are story exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlacklistConfig {
    /// Always rejected (regex).
    pub always: Vec<String>,
    /// Rejected only when the candidate source also exports the same name.
    pub when_exported: Vec<String>,
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            always: vec![r"Story$".into(), r"Stories$".into()],
            when_exported: vec![r"^Default$".into(), r"Meta$".into(), r"Template$".into()],
        }
    }
}

/// A known hallucinated name and the real component it usually means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionAlias {
    pub from: String,
    pub to: String,
}

impl SuggestionAlias {
    fn pair(from: &str, to: &str) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Default alias table, consulted in order before substring matching.
pub fn default_suggestion_aliases() -> Vec<SuggestionAlias> {
    [
        ("Heading", "Title"),
        ("Header", "Title"),
        ("Typography", "Text"),
        ("Paragraph", "Text"),
        ("Link", "Anchor"),
        ("Spinner", "Loader"),
        ("Dialog", "Modal"),
        ("Toast", "Notification"),
        ("Dropdown", "Menu"),
        ("Input", "TextInput"),
        ("Icon", "ThemeIcon"),
    ]
    .into_iter()
    .map(|(from, to)| SuggestionAlias::pair(from, to))
    .collect()
}

/// Full validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    pub primary_import_path: String,
    pub max_retries: usize,
    pub file_kind: FileKind,
    /// `None` disables the "JSX without runtime import" check and its repair.
    pub runtime_import: Option<RuntimeImport>,
    pub blacklist: BlacklistConfig,
    pub suggestion_aliases: Vec<SuggestionAlias>,
    pub max_listed_components: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            primary_import_path: DEFAULT_PRIMARY_IMPORT.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            file_kind: FileKind::Tsx,
            runtime_import: Some(RuntimeImport::react()),
            blacklist: BlacklistConfig::default(),
            suggestion_aliases: default_suggestion_aliases(),
            max_listed_components: DEFAULT_MAX_LISTED_COMPONENTS,
        }
    }
}

impl ValidatorConfig {
    /// Defaults with an explicit primary path and retry budget.
    pub fn with_primary(primary_import_path: &str, max_retries: usize) -> Self {
        Self {
            primary_import_path: primary_import_path.to_string(),
            max_retries,
            ..Self::default()
        }
    }

    /// Build from process environment.
    ///
    /// # Errors
    /// [`ValidatorError::InvalidNumber`] for a non-numeric `STORY_MAX_RETRIES`,
    /// [`ValidatorError::UnknownFileKind`] for an unsupported `STORY_FILE_KIND`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup (unset and blank values fall back to defaults).
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(path) = get("STORY_PRIMARY_IMPORT") {
            cfg.primary_import_path = path;
        }
        if let Some(v) = get("STORY_MAX_RETRIES") {
            cfg.max_retries = v.parse().map_err(|_| ValidatorError::InvalidNumber {
                var: "STORY_MAX_RETRIES",
                reason: "expected non-negative integer",
            })?;
        }
        if let Some(v) = get("STORY_FILE_KIND") {
            cfg.file_kind = v.parse()?;
        }
        match get("STORY_RUNTIME_MODULE") {
            Some(m) if m.eq_ignore_ascii_case("none") => cfg.runtime_import = None,
            Some(m) => cfg.runtime_import = Some(RuntimeImport::for_module(&m)),
            None => {}
        }
        if let (Some(rt), Some(stmt)) = (cfg.runtime_import.as_mut(), get("STORY_RUNTIME_STATEMENT")) {
            rt.statement = stmt;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = ValidatorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ValidatorConfig::default());
        assert_eq!(cfg.runtime_import.unwrap().statement, "import React from 'react';");
    }

    #[test]
    fn reads_overrides() {
        let cfg = ValidatorConfig::from_lookup(lookup(&[
            ("STORY_PRIMARY_IMPORT", "@acme/ui"),
            ("STORY_MAX_RETRIES", "3"),
            ("STORY_FILE_KIND", "jsx"),
            ("STORY_RUNTIME_MODULE", "none"),
        ]))
        .unwrap();
        assert_eq!(cfg.primary_import_path, "@acme/ui");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.file_kind, FileKind::Jsx);
        assert!(cfg.runtime_import.is_none());
    }

    #[test]
    fn custom_runtime_statement() {
        let cfg = ValidatorConfig::from_lookup(lookup(&[
            ("STORY_RUNTIME_MODULE", "preact"),
            ("STORY_RUNTIME_STATEMENT", "import { h } from 'preact';"),
        ]))
        .unwrap();
        let rt = cfg.runtime_import.unwrap();
        assert_eq!(rt.module, "preact");
        assert_eq!(rt.statement, "import { h } from 'preact';");
    }

    #[test]
    fn rejects_bad_retry_count() {
        let err = ValidatorConfig::from_lookup(lookup(&[("STORY_MAX_RETRIES", "many")]));
        assert!(matches!(err, Err(ValidatorError::InvalidNumber { .. })));
    }

    #[test]
    fn deserializes_partial_json() {
        let cfg: ValidatorConfig =
            serde_json::from_str(r#"{"primaryImportPath": "@acme/ui", "maxRetries": 2}"#).unwrap();
        assert_eq!(cfg.primary_import_path, "@acme/ui");
        assert_eq!(cfg.max_retries, 2);
        assert_eq!(cfg.blacklist, BlacklistConfig::default());
    }
}
