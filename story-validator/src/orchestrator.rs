//! Validation orchestrator: syntax check, bounded repair loop, import check.

use tracing::{debug, instrument};

use crate::config::ValidatorConfig;
use crate::errors::Result;
use crate::imports::{Blacklist, ImportRules};
use crate::inventory::ComponentInventory;
use crate::repair::RepairEngine;
use crate::syntax::{check_content, validate_syntax};
use crate::types::{Diagnostic, ValidationVerdict};

/// Pre-built validation pipeline. Holds configuration only; the inventory is
/// borrowed per call.
pub struct Validator {
    config: ValidatorConfig,
    engine: RepairEngine,
    rules: ImportRules,
}

impl Validator {
    /// # Errors
    /// [`crate::ValidatorError::InvalidPattern`] when a blacklist pattern does not compile.
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        let rules = ImportRules::from_config(&config)?;
        Ok(Self::assemble(config, rules))
    }

    fn assemble(config: ValidatorConfig, rules: ImportRules) -> Self {
        let engine = RepairEngine::new(config.file_kind, config.runtime_import.as_ref());
        Self {
            config,
            engine,
            rules,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `raw` against `inventory`, repairing syntax when possible.
    ///
    /// The repair loop runs at most `max_retries` cycles and stops early
    /// when a cycle changes nothing. Import errors are never repaired.
    #[instrument(level = "debug", skip_all, fields(len = raw.len(), max_retries = self.config.max_retries))]
    pub fn validate(&self, raw: &str, inventory: &ComponentInventory) -> ValidationVerdict {
        let cfg = &self.config;
        if let Some(d) = check_content(raw, cfg.file_kind) {
            debug!("no content to validate");
            return ValidationVerdict::failed(vec![d.to_string()], Vec::new());
        }

        let runtime = cfg.runtime_import.as_ref();
        let mut current = raw.to_string();
        let mut diagnostics = validate_syntax(&current, cfg.file_kind, runtime);
        let mut warnings = Vec::new();
        let mut applied: Vec<&'static str> = Vec::new();
        let mut attempts = 0;

        while !diagnostics.is_empty() {
            if attempts >= cfg.max_retries {
                debug!(attempts, errors = diagnostics.len(), "repair budget exhausted");
                return ValidationVerdict::failed(render(&diagnostics), warnings);
            }
            attempts += 1;

            let report = self.engine.run(&current, &diagnostics);
            if !report.changed() {
                debug!(attempts, errors = diagnostics.len(), "repair reached a fixed point");
                return ValidationVerdict::failed(render(&diagnostics), warnings);
            }
            for name in report.applied {
                if !applied.contains(&name) {
                    applied.push(name);
                }
            }
            current = report.source;
            diagnostics = validate_syntax(&current, cfg.file_kind, runtime);

            if diagnostics.is_empty() {
                warnings.push(format!("Auto-fixed syntax ({})", applied.join(", ")));
            }
        }

        let import_errors = self
            .rules
            .check(&current, inventory, &cfg.primary_import_path);
        if !import_errors.is_empty() {
            debug!(errors = import_errors.len(), "import validation failed");
            return ValidationVerdict::failed(render(&import_errors), warnings);
        }

        let fixed = (current != raw).then_some(current);
        debug!(attempts, repaired = fixed.is_some(), "story is valid");
        ValidationVerdict::valid(warnings, fixed)
    }
}

impl Default for Validator {
    fn default() -> Self {
        let config = ValidatorConfig::default();
        let rules = ImportRules::with_blacklist(&config, Blacklist::default());
        Self::assemble(config, rules)
    }
}

/// Validate with the default configuration for `primary_import_path` and
/// `max_retries` repair cycles.
pub fn validate(
    raw: &str,
    inventory: &ComponentInventory,
    primary_import_path: &str,
    max_retries: usize,
) -> ValidationVerdict {
    let config = ValidatorConfig::with_primary(primary_import_path, max_retries);
    let rules = ImportRules::with_blacklist(&config, Blacklist::default());
    Validator::assemble(config, rules).validate(raw, inventory)
}

fn render(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(diagnostics.len());
    for d in diagnostics {
        let line = d.to_string();
        if !out.contains(&line) {
            out.push(line);
        }
    }
    out
}
