//! Generation knobs read from the environment.
//!
//! - `STORY_FRAMEWORK`    = react | vue | angular | svelte | web-components (default `react`)
//! - `STORY_MAX_ATTEMPTS` = LLM round-trips before falling back (default `3`, min `1`)

use story_validator::Framework;

use crate::errors::{GeneratorError, Result};

pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Framework used when a request does not name one.
    pub framework: Framework,
    pub max_attempts: usize,
    /// Sampling temperature for generation calls; `None` keeps the model config.
    pub temperature: Option<f32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            framework: Framework::React,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            temperature: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// # Errors
    /// [`GeneratorError::InvalidConfig`] for a non-numeric or zero `STORY_MAX_ATTEMPTS`.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(fw) = get("STORY_FRAMEWORK") {
            cfg.framework = Framework::from_name(&fw);
        }
        if let Some(v) = get("STORY_MAX_ATTEMPTS") {
            cfg.max_attempts = match v.parse::<usize>() {
                Ok(0) => {
                    return Err(GeneratorError::InvalidConfig {
                        var: "STORY_MAX_ATTEMPTS",
                        reason: "must be at least 1",
                    });
                }
                Ok(n) => n,
                Err(_) => {
                    return Err(GeneratorError::InvalidConfig {
                        var: "STORY_MAX_ATTEMPTS",
                        reason: "expected positive integer",
                    });
                }
            };
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
    fn defaults() {
        let cfg = GeneratorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, GeneratorConfig::default());
        assert_eq!(cfg.max_attempts, 3);
    }

    #[test]
    fn overrides() {
        let cfg = GeneratorConfig::from_lookup(lookup(&[
            ("STORY_FRAMEWORK", "Vue"),
            ("STORY_MAX_ATTEMPTS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.framework, Framework::Vue);
        assert_eq!(cfg.max_attempts, 5);
    }

    #[test]
    fn zero_or_garbage_attempts_rejected() {
        for bad in ["0", "three", "-1"] {
            let err = GeneratorConfig::from_lookup(lookup(&[("STORY_MAX_ATTEMPTS", bad)]));
            assert!(matches!(err, Err(GeneratorError::InvalidConfig { .. })), "{bad}");
        }
    }
}
