//! JSX tag reconciler.
//!
//! Scans the text for tag tokens with a small hand-written lexer (skipping
//! comments and string literals in expression position), keeps a stack of
//! open tag names, and closes whatever is still open (innermost
//! first) right after the last tag token, or before the first following
//! `export default` / `export const` line when there is one. Closing tags
//! that do not match the top of the stack are left alone.

use regex::Regex;

use super::braces::{balance_braces, brace_deficit};
use super::{RepairPass, SYNTAX_TARGET};

pub struct JsxTagReconciler;

impl RepairPass for JsxTagReconciler {
    fn name(&self) -> &'static str {
        "jsx-tags"
    }

    fn target(&self) -> &Regex {
        &SYNTAX_TARGET
    }

    fn apply(&self, source: &str) -> String {
        reconcile_tags(source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
    SelfClosing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tag {
    /// Empty for fragments.
    name: String,
    kind: TagKind,
    /// Byte offset just past the closing `>`.
    end: usize,
}

#[derive(Debug, Default)]
struct TagScan {
    open: Vec<String>,
    last_tag_end: usize,
}

pub fn reconcile_tags(source: &str) -> String {
    let scan = scan_tags(source);
    if scan.open.is_empty() {
        return source.to_string();
    }

    let closers: String = scan
        .open
        .iter()
        .rev()
        .map(|name| format!("</{name}>"))
        .collect();

    let at = insertion_point(source, scan.last_tag_end);
    let mut out = String::with_capacity(source.len() + closers.len() + 1);
    out.push_str(&source[..at]);
    out.push_str(&closers);
    if at < source.trim_end().len() {
        out.push('\n');
    }
    out.push_str(&source[at..]);

    if brace_deficit(&out) > 0 {
        out = balance_braces(&out);
        let end = out.trim_end().len();
        out.truncate(end);
        if !out.ends_with(';') {
            out.push(';');
        }
    }
    out
}

/// Names still open at the end of the text, outermost first.
pub fn unclosed_tags(source: &str) -> Vec<String> {
    scan_tags(source).open
}

fn scan_tags(source: &str) -> TagScan {
    let bytes = source.as_bytes();
    let mut scan = TagScan::default();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(end) = skip_literal(bytes, i) {
            i = end;
            continue;
        }
        if bytes[i] != b'<' || !is_tag_start(bytes, i) {
            i += 1;
            continue;
        }
        let Some(tag) = read_tag(source, i) else {
            i += 1;
            continue;
        };
        match tag.kind {
            TagKind::Open => scan.open.push(tag.name),
            TagKind::Close => {
                if scan.open.last() == Some(&tag.name) {
                    scan.open.pop();
                }
            }
            TagKind::SelfClosing => {}
        }
        scan.last_tag_end = tag.end;
        i = tag.end;
    }
    scan
}

/// End of a comment, or of a string literal in expression position, that starts at `i`.
fn skip_literal(bytes: &[u8], i: usize) -> Option<usize> {
    match (bytes[i], bytes.get(i + 1)) {
        // `://` is a URL in JSX text, not a comment.
        (b'/', Some(b'/')) if i == 0 || bytes[i - 1] != b':' => {
            Some(find_from(bytes, i + 2, b"\n").unwrap_or(bytes.len()))
        }
        (b'/', Some(b'*')) => Some(find_from(bytes, i + 2, b"*/").map_or(bytes.len(), |e| e + 2)),
        (q @ (b'"' | b'\'' | b'`'), _) if in_expression(bytes, i) => Some(string_end(bytes, i, q)),
        _ => None,
    }
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// A quote right after an operator, an opening bracket or `return` opens a JS string.
fn in_expression(bytes: &[u8], i: usize) -> bool {
    let before = bytes[..i].trim_ascii_end();
    match before.last() {
        None => true,
        Some(b'=' | b'(' | b'[' | b'{' | b',' | b':' | b'?' | b'+' | b'!' | b'&' | b'|') => true,
        Some(_) => {
            before.ends_with(b"return")
                && !before[..before.len() - 6]
                    .last()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(*c, b'_' | b'$'))
        }
    }
}

/// `'` and `"` strings stop at the end of the line; template literals may span lines.
fn string_end(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 1,
            c if c == quote => return j + 1,
            b'\n' if quote != b'`' => return j,
            _ => {}
        }
        j += 1;
    }
    bytes.len()
}

/// `<` starts a tag when followed by a letter, `/` or `>` and not preceded
/// by something that makes it a comparison or a type argument. `</name` and
/// `</>` are always closing tags, whatever precedes them.
pub(crate) fn is_tag_start(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1) {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some(b'>') => {}
        Some(b'/') => {
            return matches!(bytes.get(i + 2), Some(c) if c.is_ascii_alphabetic() || *c == b'>');
        }
        _ => return false,
    }
    match i.checked_sub(1).map(|p| bytes[p]) {
        None => true,
        Some(p) => !(p.is_ascii_alphanumeric() || matches!(p, b'_' | b'$' | b')' | b']')),
    }
}

fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b'-' | b':')
}

/// Read one complete tag token starting at `start`; `None` when it never closes.
fn read_tag(source: &str, start: usize) -> Option<Tag> {
    let bytes = source.as_bytes();
    let mut j = start + 1;

    let closing = bytes.get(j) == Some(&b'/');
    if closing {
        j += 1;
    }
    let name_start = j;
    while j < bytes.len() && is_name_byte(bytes[j]) {
        j += 1;
    }
    let name = source[name_start..j].to_string();

    if closing {
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        return (bytes.get(j) == Some(&b'>')).then(|| Tag {
            name,
            kind: TagKind::Close,
            end: j + 1,
        });
    }

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut last_significant: Option<u8> = None;
    while j < bytes.len() {
        let c = bytes[j];
        if let Some(q) = quote {
            if c == q && bytes[j - 1] != b'\\' {
                quote = None;
            }
        } else {
            match c {
                b'"' | b'\'' | b'`' => quote = Some(c),
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    let kind = if last_significant == Some(b'/') {
                        TagKind::SelfClosing
                    } else {
                        TagKind::Open
                    };
                    return Some(Tag {
                        name,
                        kind,
                        end: j + 1,
                    });
                }
                b'<' if depth == 0 => return None,
                _ => {}
            }
        }
        if !c.is_ascii_whitespace() {
            last_significant = Some(c);
        }
        j += 1;
    }
    None
}

/// Where the closers go: the first `export default` / `export const` line
/// after the last tag token, or a final `};` line, else the end of the text.
fn insertion_point(source: &str, after: usize) -> usize {
    let mut candidates = Vec::new();
    let mut last_nonblank: Option<(usize, &str)> = None;

    let mut start = 0;
    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();
        if start >= after
            && (trimmed.starts_with("export default") || trimmed.starts_with("export const"))
        {
            candidates.push(start);
        }
        if !trimmed.is_empty() {
            last_nonblank = Some((start, trimmed));
        }
        start += line.len();
    }

    if let Some((at, "};")) = last_nonblank {
        if at >= after {
            candidates.push(at);
        }
    }
    candidates
        .into_iter()
        .min()
        .unwrap_or_else(|| source.trim_end().len())
}
