//! Markup and import sniffing shared by the validator and repair passes.

use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::{Node, Tree};

/// Capitalised opening tag or any closing tag, outside identifier context.
/// Used when the tree is too broken to carry `jsx_*` nodes.
static JSX_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?:^|[\s(>={},?:])<[A-Z][\w.]*[\s/>]|</[A-Za-z][\w.]*\s*>|(?:^|[\s(>={},?:])<[A-Z][\w.]*$"#)
        .expect("valid jsx hint regex")
});

static IMPORT_STMT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*import[\s{*'"]"#).expect("valid import regex"));

/// True when the source contains JSX markup.
///
/// A clean tree is authoritative (markup inside string literals does not
/// count); a broken or missing tree falls back to the textual hint.
pub fn contains_jsx(tree: Option<&Tree>, code: &str) -> bool {
    match tree {
        Some(t) if !t.root_node().has_error() => tree_has_jsx(t.root_node()),
        Some(t) => tree_has_jsx(t.root_node()) || JSX_HINT.is_match(code),
        None => JSX_HINT.is_match(code),
    }
}

fn tree_has_jsx(root: Node) -> bool {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind().starts_with("jsx_") {
            return true;
        }
        let mut w = node.walk();
        stack.extend(node.children(&mut w));
    }
    false
}

/// True when at least one import statement is present.
pub fn contains_import(code: &str) -> bool {
    IMPORT_STMT.is_match(code)
}

/// True when `code` imports `module` (`import X from 'm'`, `import 'm'`, ...).
pub fn imports_module(code: &str, module: &str) -> bool {
    let pattern = format!(
        r#"(?m)^\s*import\s+(?:[^'";]*?\bfrom\s*)?['"]{}['"]"#,
        regex::escape(module)
    );
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(code),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_markup_without_tree() {
        assert!(contains_jsx(None, "<Button>Click</Button>"));
        assert!(contains_jsx(None, "render: () => <Card.Section/>"));
        assert!(contains_jsx(None, "<Card><Card.Section>x"));
        assert!(!contains_jsx(None, "const x: Array<String> = [];"));
        assert!(!contains_jsx(None, "if (a < b) {}"));
    }

    #[test]
    fn module_import_forms() {
        assert!(imports_module("import React from 'react';", "react"));
        assert!(imports_module("import React, { useState } from \"react\";", "react"));
        assert!(imports_module("import * as R from 'react'", "react"));
        assert!(imports_module("import 'react';", "react"));
        assert!(!imports_module("import { render } from 'react-dom';", "react"));
        assert!(!imports_module("// import React from 'react'", "react"));
    }

    #[test]
    fn import_statement_presence() {
        assert!(contains_import("  import { Button } from '@mantine/core';"));
        assert!(!contains_import("const important = 1;"));
    }
}
