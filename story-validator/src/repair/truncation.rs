//! Truncated-tail trimmer.
//!
//! LLM output cut off mid-token usually ends in a half-written tag, an
//! open call, or an operator followed by a partial identifier. Such a last
//! line is dropped entirely (with any trailing blank lines) so that the
//! later passes work on a cleaner prefix.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::jsx_tags::is_tag_start;
use super::{RepairPass, SYNTAX_TARGET};

/// An operator (or `return`) immediately followed by a bare identifier or number at line end.
static DANGLING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[=+\-*/%.,:?&|(]|\breturn)\s*[A-Za-z0-9_$]+$").expect("valid dangling regex")
});

pub struct TruncationTrimmer;

impl RepairPass for TruncationTrimmer {
    fn name(&self) -> &'static str {
        "truncation"
    }

    fn target(&self) -> &Regex {
        &SYNTAX_TARGET
    }

    fn apply(&self, source: &str) -> String {
        trim_truncated_tail(source)
    }
}

/// Heuristic signals computed for one line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TruncationSignals {
    /// Odd count of `'` or `"`. Recorded only: a lone open string is left to the string closer.
    pub odd_quotes: bool,
    /// The last tag start has no closing `>`.
    pub open_tag: bool,
    /// More `(` than `)`.
    pub open_paren: bool,
    /// Operator followed by a partial identifier at line end.
    pub dangling_token: bool,
}

impl TruncationSignals {
    pub fn of_line(line: &str) -> Self {
        let trimmed = line.trim();
        let odd_quotes = trimmed.matches('"').count() % 2 == 1
            || trimmed.matches('\'').count() % 2 == 1;
        Self {
            odd_quotes,
            open_tag: has_open_tag(trimmed),
            open_paren: trimmed.matches('(').count() > trimmed.matches(')').count(),
            // Operators inside an unterminated string are just text.
            dangling_token: !odd_quotes && has_dangling_token(trimmed),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.open_tag || self.open_paren || self.dangling_token
    }
}

fn has_open_tag(line: &str) -> bool {
    let bytes = line.as_bytes();
    let last_start = (0..bytes.len())
        .rev()
        .find(|&i| bytes[i] == b'<' && is_tag_start(bytes, i));
    match last_start {
        Some(i) => !line[i..].contains('>'),
        None => false,
    }
}

fn has_dangling_token(line: &str) -> bool {
    if line.contains('<') || line.contains('>') {
        return false;
    }
    if line.starts_with("export ") || line.starts_with("import ") {
        return false;
    }
    DANGLING_TOKEN.is_match(line)
}

/// Drop the last non-blank line when it looks cut off; otherwise return the input.
pub fn trim_truncated_tail(source: &str) -> String {
    let body = source.trim_end();
    let line_start = body.rfind('\n').map_or(0, |i| i + 1);
    let last = &body[line_start..];
    if last.trim().is_empty() {
        return source.to_string();
    }

    let signals = TruncationSignals::of_line(last);
    if !signals.is_truncated() {
        return source.to_string();
    }
    debug!(?signals, line = last, "dropping truncated last line");
    body[..line_start].trim_end().to_string()
}
