//! Language hooks for the tree-sitter grammars.

use tree_sitter::{Language, Parser, Tree};

use crate::types::FileKind;

/// Return the tree-sitter language for a file kind.
/// Both grammar crates expose `LANGUAGE*` constants convertible into `tree_sitter::Language`.
#[inline]
pub fn language(kind: FileKind) -> Language {
    match kind {
        FileKind::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        FileKind::Jsx => tree_sitter_javascript::LANGUAGE.into(),
    }
}

/// Parse `code` with a fresh parser. `None` only if the grammar cannot be
/// loaded or the parser gives up; callers turn that into a diagnostic.
pub fn parse(code: &str, kind: FileKind) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(&language(kind)).ok()?;
    parser.parse(code, None)
}
