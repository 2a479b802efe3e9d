//! Auto-repair engine: an ordered chain of crude, text-level repair passes.
//!
//! Each pass is a pure `&str -> String` transformation tagged with the
//! diagnostic messages it targets. The engine runs every pass at most once
//! per call, in a fixed order (cheap and confident first), and only when at
//! least one of the supplied diagnostics matches the pass target. A pass
//! whose precondition does not hold returns its input unchanged, so the
//! chain is safe to run unconditionally. Re-validation and retry looping
//! belong to the orchestrator, not to this module.

pub mod braces;
pub mod jsx_tags;
pub mod runtime_import;
pub mod strings;
pub mod truncation;

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use crate::config::RuntimeImport;
use crate::syntax::{MISSING_RUNTIME_FRAGMENT, SYNTAX_ERROR_PREFIX};
use crate::types::{Diagnostic, FileKind};

pub use braces::BraceBalancer;
pub use jsx_tags::JsxTagReconciler;
pub use runtime_import::RuntimeImportInserter;
pub use strings::StringCloser;
pub use truncation::TruncationTrimmer;

pub(crate) static SYNTAX_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}", regex::escape(SYNTAX_ERROR_PREFIX))).expect("valid target regex")
});

pub(crate) static RUNTIME_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&regex::escape(MISSING_RUNTIME_FRAGMENT)).expect("valid target regex")
});

/// One independent repair transformation.
pub trait RepairPass: Send + Sync {
    /// Stable short name, used in logs and auto-fix warnings.
    fn name(&self) -> &'static str;

    /// Diagnostic message pattern this pass targets.
    fn target(&self) -> &Regex;

    /// Produce a new candidate; must return the input unchanged when it cannot help.
    fn apply(&self, source: &str) -> String;

    fn applies_to(&self, diagnostics: &[Diagnostic]) -> bool {
        diagnostics.iter().any(|d| self.target().is_match(&d.message))
    }
}

/// Result of one repair cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub source: String,
    /// Names of passes that actually changed the text, in run order.
    pub applied: Vec<&'static str>,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// The fixed pass chain.
pub struct RepairEngine {
    passes: Vec<Box<dyn RepairPass>>,
}

impl RepairEngine {
    /// Build the chain. Without a runtime import the inserter is left out.
    pub fn new(kind: FileKind, runtime: Option<&RuntimeImport>) -> Self {
        let mut passes: Vec<Box<dyn RepairPass>> = vec![Box::new(TruncationTrimmer)];
        if let Some(rt) = runtime {
            passes.push(Box::new(RuntimeImportInserter::new(rt.clone(), kind)));
        }
        passes.push(Box::new(BraceBalancer));
        passes.push(Box::new(StringCloser));
        passes.push(Box::new(JsxTagReconciler));
        Self { passes }
    }

    /// Pass names in run order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run one repair cycle against `source` and the diagnostics computed for it.
    pub fn run(&self, source: &str, diagnostics: &[Diagnostic]) -> RepairReport {
        let mut current = source.to_string();
        let mut applied = Vec::new();

        for pass in &self.passes {
            if !pass.applies_to(diagnostics) {
                trace!(pass = pass.name(), "repair pass skipped: no matching diagnostic");
                continue;
            }
            let next = pass.apply(&current);
            if next != current {
                trace!(pass = pass.name(), before = current.len(), after = next.len(), "repair pass changed source");
                applied.push(pass.name());
                current = next;
            }
        }

        debug!(passes = ?applied, "repair cycle finished");
        RepairReport {
            source: current,
            applied,
        }
    }
}

impl Default for RepairEngine {
    fn default() -> Self {
        Self::new(FileKind::Tsx, Some(&RuntimeImport::react()))
    }
}

/// Run the default pass chain once (TSX, React runtime).
pub fn repair(source: &str, diagnostics: &[Diagnostic]) -> String {
    RepairEngine::default().run(source, diagnostics).source
}
