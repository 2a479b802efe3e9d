//! Story-export name blacklist.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::warn;

use crate::config::BlacklistConfig;
use crate::errors::{Result, ValidatorError};

static LOCAL_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\bexport\s+(?:default\s+)?(?:const|let|var|function|class)\s+([A-Za-z_$][\w$]*)")
        .expect("valid export regex")
});

static DEFAULT_EXPORT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\bexport\s+default\s+([A-Za-z_$][\w$]*)\s*;?\s*$").expect("valid export regex")
});

/// Compiled form of [`BlacklistConfig`].
#[derive(Debug, Clone)]
pub struct Blacklist {
    always: Vec<Regex>,
    when_exported: Vec<Regex>,
}

impl Blacklist {
    /// # Errors
    /// [`ValidatorError::InvalidPattern`] for the first pattern that does not compile.
    pub fn compile(cfg: &BlacklistConfig) -> Result<Self> {
        Ok(Self {
            always: compile_all(&cfg.always)?,
            when_exported: compile_all(&cfg.when_exported)?,
        })
    }

    /// True when `name` looks like a story export rather than a component.
    pub fn matches(&self, name: &str, local_exports: &HashSet<String>) -> bool {
        if self.always.iter().any(|re| re.is_match(name)) {
            return true;
        }
        local_exports.contains(name) && self.when_exported.iter().any(|re| re.is_match(name))
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        let cfg = BlacklistConfig::default();
        let lossy = |patterns: &[String]| -> Vec<Regex> {
            patterns
                .iter()
                .filter_map(|p| match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(pattern = %p, error = %e, "skipping invalid blacklist pattern");
                        None
                    }
                })
                .collect()
        };
        Self {
            always: lossy(&cfg.always),
            when_exported: lossy(&cfg.when_exported),
        }
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| ValidatorError::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Names the source itself exports (`export const X`, `export default X`, ...).
pub fn local_exports(source: &str) -> HashSet<String> {
    LOCAL_EXPORT
        .captures_iter(source)
        .chain(DEFAULT_EXPORT_NAME.captures_iter(source))
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
