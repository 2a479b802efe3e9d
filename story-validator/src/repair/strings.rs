//! Unterminated-string closer, line by line.
//!
//! A line with an odd number of `'` or `"` gets the missing quote appended
//! at its end. Escaped quotes and apostrophes inside words (`don't`) are not
//! counted. Backtick templates span lines and are left alone.

use regex::Regex;

use super::{RepairPass, SYNTAX_TARGET};

pub struct StringCloser;

impl RepairPass for StringCloser {
    fn name(&self) -> &'static str {
        "strings"
    }

    fn target(&self) -> &Regex {
        &SYNTAX_TARGET
    }

    fn apply(&self, source: &str) -> String {
        close_strings(source)
    }
}

pub fn close_strings(source: &str) -> String {
    source
        .split('\n')
        .map(close_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn close_line(line: &str) -> String {
    let (body, cr) = match line.strip_suffix('\r') {
        Some(b) => (b, "\r"),
        None => (line, ""),
    };

    // (quote, position of its last counted occurrence) for each odd quote kind.
    let mut unmatched: Vec<(char, usize)> = ['"', '\'']
        .into_iter()
        .filter_map(|q| {
            let hits = counted_quotes(body, q);
            (hits.len() % 2 == 1).then(|| (q, *hits.last().unwrap_or(&0)))
        })
        .collect();

    if unmatched.is_empty() {
        return line.to_string();
    }
    // Innermost (most recently opened) string closes first.
    unmatched.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = String::with_capacity(line.len() + 2);
    out.push_str(body);
    for (q, _) in unmatched {
        out.push(q);
    }
    out.push_str(cr);
    out
}

/// Char positions of `quote` that count toward balancing.
fn counted_quotes(line: &str, quote: char) -> Vec<usize> {
    let chars: Vec<char> = line.chars().collect();
    let mut out = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        if c != quote {
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        if prev == Some('\\') {
            continue;
        }
        if quote == '\''
            && prev.is_some_and(char::is_alphanumeric)
            && next.is_some_and(char::is_alphanumeric)
        {
            continue;
        }
        out.push(i);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_double_and_single_quotes() {
        assert_eq!(close_strings("title: \"Hello"), "title: \"Hello\"");
        assert_eq!(close_strings("a: 'x',\nb: 'y"), "a: 'x',\nb: 'y'");
    }

    #[test]
    fn ignores_escapes_and_contractions() {
        let src = "label: \"say \\\"hi\\\"\",\ntext: \"Don't stop\"";
        assert_eq!(close_strings(src), src);
    }

    #[test]
    fn innermost_quote_closes_first() {
        assert_eq!(close_strings("x = \"a 'b"), "x = \"a 'b'\"");
    }

    #[test]
    fn keeps_crlf_line_endings() {
        assert_eq!(close_strings("a = 'x\r\nb = 1"), "a = 'x'\r\nb = 1");
    }

    #[test]
    fn idempotent() {
        let once = close_strings("a = \"x\nb = 'y\nc = 1");
        assert_eq!(close_strings(&once), once);
    }
}
