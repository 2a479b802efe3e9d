//! Missing-runtime-import inserter.

use regex::Regex;
use std::sync::LazyLock;

use super::{RUNTIME_TARGET, RepairPass};
use crate::config::RuntimeImport;
use crate::syntax::{jsx, lang};
use crate::types::FileKind;

static FIRST_IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*import\b").expect("valid import line regex"));

pub struct RuntimeImportInserter {
    runtime: RuntimeImport,
    kind: FileKind,
}

impl RuntimeImportInserter {
    pub fn new(runtime: RuntimeImport, kind: FileKind) -> Self {
        Self { runtime, kind }
    }
}

impl RepairPass for RuntimeImportInserter {
    fn name(&self) -> &'static str {
        "runtime-import"
    }

    fn target(&self) -> &Regex {
        &RUNTIME_TARGET
    }

    fn apply(&self, source: &str) -> String {
        insert_runtime_import(source, &self.runtime, self.kind)
    }
}

/// Insert `runtime.statement` before the first import line (or at the top)
/// when the source has markup but does not import `runtime.module`.
pub fn insert_runtime_import(source: &str, runtime: &RuntimeImport, kind: FileKind) -> String {
    if jsx::imports_module(source, &runtime.module) {
        return source.to_string();
    }
    let tree = lang::parse(source, kind);
    if !jsx::contains_jsx(tree.as_ref(), source) {
        return source.to_string();
    }

    let at = FIRST_IMPORT_LINE.find(source).map_or(0, |m| m.start());
    let mut out = String::with_capacity(source.len() + runtime.statement.len() + 1);
    out.push_str(&source[..at]);
    out.push_str(&runtime.statement);
    out.push('\n');
    out.push_str(&source[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn react() -> RuntimeImport {
        RuntimeImport::react()
    }

    #[test]
    fn inserts_at_top_without_imports() {
        assert_eq!(
            insert_runtime_import("<Button>Click</Button>", &react(), FileKind::Tsx),
            "import React from 'react';\n<Button>Click</Button>"
        );
    }

    #[test]
    fn inserts_before_first_import() {
        let src = "// story\nimport { Button } from '@mantine/core';\nexport const A = () => <Button/>;";
        let out = insert_runtime_import(src, &react(), FileKind::Tsx);
        assert_eq!(
            out,
            "// story\nimport React from 'react';\nimport { Button } from '@mantine/core';\nexport const A = () => <Button/>;"
        );
    }

    #[test]
    fn no_op_when_present_or_without_markup() {
        let present = "import React from 'react';\n<div/>";
        assert_eq!(insert_runtime_import(present, &react(), FileKind::Tsx), present);
        let plain = "import { x } from 'y';\nexport const a = 1;";
        assert_eq!(insert_runtime_import(plain, &react(), FileKind::Tsx), plain);
    }

    #[test]
    fn custom_runtime_module() {
        let rt = RuntimeImport::for_module("preact");
        let out = insert_runtime_import("<div/>", &rt, FileKind::Jsx);
        assert!(out.starts_with("import React from 'preact';\n"));
    }
}
