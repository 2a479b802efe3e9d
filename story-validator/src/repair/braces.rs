//! Brace balancer: appends missing `}` on new trailing lines.
//!
//! One-directional: excess closing braces are never removed.

use regex::Regex;

use super::{RepairPass, SYNTAX_TARGET};

pub struct BraceBalancer;

impl RepairPass for BraceBalancer {
    fn name(&self) -> &'static str {
        "braces"
    }

    fn target(&self) -> &Regex {
        &SYNTAX_TARGET
    }

    fn apply(&self, source: &str) -> String {
        balance_braces(source)
    }
}

/// Number of `{` not matched by a `}` anywhere in the text (0 when balanced or over-closed).
pub fn brace_deficit(source: &str) -> usize {
    let opens = source.matches('{').count();
    let closes = source.matches('}').count();
    opens.saturating_sub(closes)
}

pub fn balance_braces(source: &str) -> String {
    let missing = brace_deficit(source);
    if missing == 0 {
        return source.to_string();
    }
    let mut out = String::with_capacity(source.len() + missing * 2 + 1);
    out.push_str(source);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    for _ in 0..missing {
        out.push_str("}\n");
    }
    out
}
