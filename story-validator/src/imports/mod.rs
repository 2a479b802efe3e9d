//! Import/component validator.
//!
//! Only named imports from the primary design-system path are checked;
//! every other module is somebody else's business. Type-only imports are
//! skipped, and an aliased specifier (`Title as Heading`) is checked under
//! the name it imports, not the local alias.

pub mod blacklist;
pub mod suggest;

use std::collections::HashSet;
use tracing::{debug, warn};
use tree_sitter::Node;

use crate::config::{SuggestionAlias, ValidatorConfig, default_suggestion_aliases};
use crate::errors::Result;
use crate::inventory::ComponentInventory;
use crate::syntax::lang;
use crate::types::{Diagnostic, FileKind};

pub use blacklist::{Blacklist, local_exports};
pub use suggest::suggest;

/// One `{ Name }` specifier imported from the primary path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    pub name: String,
    pub line: usize,
    pub column: usize,
}

/// Compiled rule set for the import check.
#[derive(Debug, Clone)]
pub struct ImportRules {
    pub blacklist: Blacklist,
    pub aliases: Vec<SuggestionAlias>,
    pub max_listed: usize,
    pub kind: FileKind,
}

impl Default for ImportRules {
    fn default() -> Self {
        Self {
            blacklist: Blacklist::default(),
            aliases: default_suggestion_aliases(),
            max_listed: crate::config::DEFAULT_MAX_LISTED_COMPONENTS,
            kind: FileKind::Tsx,
        }
    }
}

impl ImportRules {
    /// # Errors
    /// Propagates blacklist pattern compilation failures.
    pub fn from_config(cfg: &ValidatorConfig) -> Result<Self> {
        Ok(Self::with_blacklist(cfg, Blacklist::compile(&cfg.blacklist)?))
    }

    pub(crate) fn with_blacklist(cfg: &ValidatorConfig, blacklist: Blacklist) -> Self {
        Self {
            blacklist,
            aliases: cfg.suggestion_aliases.clone(),
            max_listed: cfg.max_listed_components,
            kind: cfg.file_kind,
        }
    }

    pub fn check(
        &self,
        source: &str,
        inventory: &ComponentInventory,
        primary_import_path: &str,
    ) -> Vec<Diagnostic> {
        let imports = named_imports(source, self.kind, primary_import_path);
        if imports.is_empty() {
            return Vec::new();
        }
        let exports = local_exports(source);

        let out: Vec<Diagnostic> = imports
            .iter()
            .filter_map(|imp| self.check_one(imp, inventory, primary_import_path, &exports))
            .collect();
        debug!(
            checked = imports.len(),
            errors = out.len(),
            path = primary_import_path,
            "import validation finished"
        );
        out
    }

    fn check_one(
        &self,
        imp: &NamedImport,
        inventory: &ComponentInventory,
        path: &str,
        exports: &HashSet<String>,
    ) -> Option<Diagnostic> {
        let name = imp.name.as_str();
        let hint = || suggest(name, inventory, &self.aliases);

        let message = if self.blacklist.matches(name, exports) {
            let mut m =
                format!("`{name}` is not a valid component, it appears to be a story export name.");
            if let Some(s) = hint() {
                m.push_str(&format!(" Did you mean `{s}`?"));
            }
            m
        } else if !inventory.contains(name) {
            let mut m = format!("`{name}` is not available from `{path}`.");
            if let Some(s) = hint() {
                m.push_str(&format!(" Did you mean `{s}`?"));
            }
            let listed: Vec<&str> = inventory.names().take(self.max_listed).collect();
            if !listed.is_empty() {
                m.push_str(&format!(" Available components include: {}", listed.join(", ")));
            }
            m
        } else {
            return None;
        };
        Some(Diagnostic::error(message, imp.line, Some(imp.column)))
    }
}

/// Check named imports from `primary_import_path` with the default rules.
pub fn validate_imports(
    source: &str,
    inventory: &ComponentInventory,
    primary_import_path: &str,
) -> Vec<Diagnostic> {
    ImportRules::default().check(source, inventory, primary_import_path)
}

/// Value-level named specifiers imported from `path`, in source order.
pub fn named_imports(source: &str, kind: FileKind, path: &str) -> Vec<NamedImport> {
    let Some(tree) = lang::parse(source, kind) else {
        warn!(%kind, "import scan skipped: parser produced no tree");
        return Vec::new();
    };
    let root = tree.root_node();
    let mut out = Vec::new();
    let mut w = root.walk();
    for stmt in root.children(&mut w) {
        if stmt.kind() != "import_statement" || has_keyword(stmt, "type") {
            continue;
        }
        let Some(src) = stmt.child_by_field_name("source") else {
            continue;
        };
        if text(src, source).trim_matches(&['\'', '"'][..]) != path {
            continue;
        }
        collect_specifiers(stmt, source, &mut out);
    }
    out
}

fn collect_specifiers(stmt: Node, code: &str, out: &mut Vec<NamedImport>) {
    let mut stack = vec![stmt];
    while let Some(node) = stack.pop() {
        if node.kind() == "import_specifier" {
            if has_keyword(node, "type") || has_keyword(node, "typeof") {
                continue;
            }
            if let Some(name) = node.child_by_field_name("name") {
                let p = name.start_position();
                out.push(NamedImport {
                    name: text(name, code).to_string(),
                    line: p.row + 1,
                    column: p.column + 1,
                });
            }
            continue;
        }
        let mut w = node.walk();
        let children: Vec<Node> = node.named_children(&mut w).collect();
        // Reverse so the stack pops in source order.
        stack.extend(children.into_iter().rev());
    }
}

fn has_keyword(node: Node, keyword: &str) -> bool {
    let mut w = node.walk();
    node.children(&mut w)
        .any(|c| !c.is_named() && c.kind() == keyword)
}

fn text<'a>(node: Node, code: &'a str) -> &'a str {
    code.get(node.byte_range()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: &str = "@mantine/core";

    fn inv() -> ComponentInventory {
        ComponentInventory::from_names(PRIMARY, ["Button", "Card", "Title", "Text"])
    }

    #[test]
    fn scans_only_primary_value_imports() {
        let src = "import React from 'react';\n\
                   import type { ButtonProps } from '@mantine/core';\n\
                   import { Button, type CardProps, Title as Heading } from '@mantine/core';\n\
                   import { Foo } from 'other-lib';\n";
        let names: Vec<String> = named_imports(src, FileKind::Tsx, PRIMARY)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["Button", "Title"]);
    }

    #[test]
    fn unknown_component_gets_suggestion_and_listing() {
        let src = "import { Heading } from '@mantine/core';\n";
        let diags = validate_imports(src, &inv(), PRIMARY);
        assert_eq!(diags.len(), 1);
        let d = &diags[0];
        assert!(d.is_error());
        assert_eq!((d.line, d.column), (1, Some(10)));
        assert!(d.message.contains("`Heading` is not available from `@mantine/core`"));
        assert!(d.message.contains("Did you mean `Title`?"));
        assert!(d.message.contains("Available components include: Button, Card, Title, Text"));
    }

    #[test]
    fn listing_is_capped() {
        let many = ComponentInventory::from_names(PRIMARY, (0..15).map(|i| format!("C{i}")));
        let diags = validate_imports("import { Zzz } from '@mantine/core';", &many, PRIMARY);
        assert!(diags[0].message.ends_with("C0, C1, C2, C3, C4, C5, C6, C7, C8, C9"));
    }

    #[test]
    fn story_export_names_are_rejected() {
        let src = "import { ButtonStory } from '@mantine/core';\n";
        let diags = validate_imports(src, &inv(), PRIMARY);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("appears to be a story export name"));
        assert!(diags[0].message.contains("Did you mean `Button`?"));
    }

    #[test]
    fn other_paths_and_valid_names_pass() {
        assert!(validate_imports("import { Button } from 'other-lib'; <Button/>", &inv(), PRIMARY).is_empty());
        assert!(validate_imports("import { Button, Card } from \"@mantine/core\";", &inv(), PRIMARY).is_empty());
    }
}
