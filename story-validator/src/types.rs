//! Shared value types: diagnostics, verdicts and file kinds.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Severity of a [`Diagnostic`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A located problem in one candidate source.
///
/// `line` and `column` are 1-based and only meaningful for the exact text
/// they were computed against; any repair pass invalidates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, line: usize, column: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            severity: Severity::Error,
        }
    }

    pub fn warning(message: impl Into<String>, line: usize, column: Option<usize>) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            severity: Severity::Warning,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    /// `Line 3:7: message` (column omitted when unknown).
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(col) => write!(f, "Line {}:{}: {}", self.line, col, self.message),
            None => write!(f, "Line {}: {}", self.line, self.message),
        }
    }
}

/// Terminal result of one validation call. The only output type of the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Final text, present only when it differs from the raw input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_code: Option<String>,
}

impl ValidationVerdict {
    pub fn valid(warnings: Vec<String>, fixed_code: Option<String>) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings,
            fixed_code,
        }
    }

    pub fn failed(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings,
            fixed_code: None,
        }
    }
}

/// Grammar used to parse a candidate source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// TypeScript + JSX (tree-sitter `tsx` grammar).
    #[default]
    Tsx,
    /// JavaScript + JSX (tree-sitter `javascript` grammar).
    Jsx,
}

impl FileKind {
    /// Best-effort detection by file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsx" | "ts" => Some(Self::Tsx),
            "jsx" | "js" | "mjs" | "cjs" => Some(Self::Jsx),
            _ => None,
        }
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FileKind::Tsx => "tsx",
            FileKind::Jsx => "jsx",
        })
    }
}

impl std::str::FromStr for FileKind {
    type Err = crate::errors::ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim())
            .ok_or_else(|| crate::errors::ValidatorError::UnknownFileKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display_includes_position() {
        let d = Diagnostic::error("Syntax error: missing `}`", 4, Some(2));
        assert_eq!(d.to_string(), "Line 4:2: Syntax error: missing `}`");
        let d = Diagnostic::warning("note", 1, None);
        assert_eq!(d.to_string(), "Line 1: note");
        assert!(!d.is_error());
    }

    #[test]
    fn verdict_serializes_camel_case_without_empty_fixed_code() {
        let v = ValidationVerdict::failed(vec!["boom".into()], Vec::new());
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["isValid"], false);
        assert!(json.get("fixedCode").is_none());
    }

    #[test]
    fn file_kind_parses_extensions() {
        assert_eq!("TSX".parse::<FileKind>().unwrap(), FileKind::Tsx);
        assert_eq!(FileKind::from_extension("js"), Some(FileKind::Jsx));
        assert!("vue".parse::<FileKind>().is_err());
    }
}
