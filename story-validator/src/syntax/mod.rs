//! Syntax validator: tree-sitter structural checks plus the runtime-import rule.
//!
//! Parsing is permissive (JSX-aware, no type checking). Every `ERROR` region
//! and every `MISSING` token in the tree becomes one error [`Diagnostic`]
//! with a 1-based position taken from the tree itself. Nothing here panics
//! or returns `Err`: a parser that cannot even produce a tree is reported as
//! a single diagnostic.

pub mod jsx;
pub mod lang;

use tracing::{debug, trace};
use tree_sitter::{Node, Tree};

use crate::config::RuntimeImport;
use crate::types::{Diagnostic, FileKind};

/// Prefix of every structural parse diagnostic; repair passes gate on it.
pub const SYNTAX_ERROR_PREFIX: &str = "Syntax error";
/// Fragment of the missing-runtime-import diagnostic; its repair pass gates on it.
pub const MISSING_RUNTIME_FRAGMENT: &str = "is never imported";
/// Message of the "nothing recognisable to validate" failure.
pub const NO_CONTENT_MESSAGE: &str = "No JSX content or import statements found";

const SNIPPET_CHARS: usize = 24;

/// Validate `source` structurally and return its error diagnostics, sorted by position.
///
/// When `runtime` is given and the source contains JSX without importing
/// `runtime.module`, an extra error is emitted at line 1 (the parser alone
/// considers such a file fine).
pub fn validate_syntax(
    source: &str,
    kind: FileKind,
    runtime: Option<&RuntimeImport>,
) -> Vec<Diagnostic> {
    let tree = lang::parse(source, kind);
    let mut out = match &tree {
        Some(t) => collect_tree_errors(t, source),
        None => vec![Diagnostic::error(
            format!("{SYNTAX_ERROR_PREFIX}: parser produced no tree for {kind} source"),
            1,
            None,
        )],
    };

    if let Some(rt) = runtime {
        if jsx::contains_jsx(tree.as_ref(), source) && !jsx::imports_module(source, &rt.module) {
            out.push(Diagnostic::error(
                format!("JSX markup found but `{}` {MISSING_RUNTIME_FRAGMENT}", rt.module),
                1,
                Some(1),
            ));
        }
    }

    out.sort_by_key(|d| (d.line, d.column.unwrap_or(0)));
    debug!(kind = %kind, errors = out.len(), "syntax validation finished");
    out
}

/// Higher-level content check: `None` when the source contains markup or at
/// least one import, otherwise the no-content diagnostic.
pub fn check_content(source: &str, kind: FileKind) -> Option<Diagnostic> {
    if source.trim().is_empty() {
        return Some(Diagnostic::error(NO_CONTENT_MESSAGE, 1, None));
    }
    let tree = lang::parse(source, kind);
    if jsx::contains_jsx(tree.as_ref(), source) || jsx::contains_import(source) {
        None
    } else {
        Some(Diagnostic::error(NO_CONTENT_MESSAGE, 1, None))
    }
}

/// Walk only subtrees that contain errors; report top-most `ERROR` nodes and
/// every `MISSING` token.
fn collect_tree_errors(tree: &Tree, code: &str) -> Vec<Diagnostic> {
    let root = tree.root_node();
    if !root.has_error() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut stack: Vec<Node> = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            trace!(kind = node.kind(), row = node.start_position().row, "missing node");
            out.push(located(
                format!("{SYNTAX_ERROR_PREFIX}: missing `{}`", node.kind()),
                node,
            ));
            continue;
        }
        if node.is_error() {
            trace!(row = node.start_position().row, "error node");
            out.push(located(
                format!("{SYNTAX_ERROR_PREFIX}: unexpected {}", describe(node, code)),
                node,
            ));
            continue;
        }
        if node.has_error() {
            let mut w = node.walk();
            stack.extend(node.children(&mut w));
        }
    }

    if out.is_empty() {
        // has_error() without a reachable ERROR/MISSING node: still not clean.
        out.push(Diagnostic::error(
            format!("{SYNTAX_ERROR_PREFIX}: malformed source"),
            1,
            None,
        ));
    }
    out.dedup();
    out
}

fn located(message: String, node: Node) -> Diagnostic {
    let p = node.start_position();
    Diagnostic::error(message, p.row + 1, Some(p.column + 1))
}

/// Short, single-line description of an error region.
fn describe(node: Node, code: &str) -> String {
    let text = code.get(node.byte_range()).unwrap_or("");
    let first = text.lines().map(str::trim).find(|l| !l.is_empty());
    match first {
        None => "end of input".to_string(),
        Some(line) => {
            let snippet: String = line.chars().take(SNIPPET_CHARS).collect();
            format!("`{snippet}`")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(src: &str) -> Vec<Diagnostic> {
        validate_syntax(src, FileKind::Tsx, Some(&RuntimeImport::react()))
    }

    #[test]
    fn clean_story_has_no_diagnostics() {
        let src = "import React from 'react';\n\
                   import { Button } from '@mantine/core';\n\
                   export const Primary = () => <Button variant=\"filled\">Go</Button>;\n";
        assert!(errors(src).is_empty());
    }

    #[test]
    fn unclosed_tags_are_reported_with_positions() {
        let diags = errors("import React from 'react';\n<Card><Card.Section>x");
        assert!(!diags.is_empty());
        assert!(diags.iter().all(|d| d.is_error() && d.line >= 1));
        assert!(diags.iter().any(|d| d.message.starts_with(SYNTAX_ERROR_PREFIX)));
    }

    #[test]
    fn unbalanced_brace_is_reported() {
        let diags = errors("import React from 'react';\nconst meta = {\n  title: 'X',\n");
        assert!(diags.iter().any(|d| d.message.starts_with(SYNTAX_ERROR_PREFIX)));
    }

    #[test]
    fn jsx_without_runtime_import() {
        let diags = errors("<Button>Click</Button>");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains(MISSING_RUNTIME_FRAGMENT));
        assert_eq!(diags[0].line, 1);
    }

    #[test]
    fn runtime_rule_can_be_disabled() {
        assert!(validate_syntax("<Button>Click</Button>", FileKind::Tsx, None).is_empty());
    }

    #[test]
    fn jsx_grammar_accepts_plain_javascript() {
        let src = "import React from 'react';\nexport const A = () => <div className=\"a\" />;";
        assert!(validate_syntax(src, FileKind::Jsx, Some(&RuntimeImport::react())).is_empty());
    }

    #[test]
    fn content_check() {
        assert!(check_content("", FileKind::Tsx).is_some());
        assert!(check_content("   \n", FileKind::Tsx).is_some());
        assert!(check_content("const x = 1;", FileKind::Tsx).is_some());
        assert!(check_content("import x from 'y';", FileKind::Tsx).is_none());
        assert!(check_content("<div/>", FileKind::Tsx).is_none());
    }
}
