//! Code-region extraction from a chat reply.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// A whole line that opens or closes a Markdown fence, with its info string.
static FENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*```[ \t]*([A-Za-z0-9_+-]*)[ \t]*\r?$").expect("valid fence regex")
});

static IMPORT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*import\b").expect("valid import regex"));

const CODE_LANGS: [&str; 6] = ["typescript", "javascript", "tsx", "jsx", "ts", "js"];

/// One fenced region; `closed` is false for a final fence that never closes.
#[derive(Debug)]
struct Fence<'a> {
    lang: &'a str,
    body: &'a str,
    closed: bool,
}

impl Fence<'_> {
    fn is_code(&self) -> bool {
        CODE_LANGS.iter().any(|l| self.lang.eq_ignore_ascii_case(l))
    }
}

/// Strip Markdown fencing from `text`.
///
/// Fence lines are paired in order, so a closing fence never opens a block.
/// Tried in order: a closed fence tagged `tsx`/`jsx`/`ts`/`js`/`typescript`/
/// `javascript` (any case), a closed untagged fence, an unterminated final
/// fence, and finally everything from the first line starting with `import`.
/// Returns `None` when no non-empty region is found.
pub fn extract_code_block(text: &str) -> Option<String> {
    let fences = fenced_blocks(text);
    let strategies: [(&str, fn(&Fence) -> bool); 3] = [
        ("tagged", |f| f.closed && f.is_code()),
        ("bare", |f| f.closed && f.lang.is_empty()),
        ("open", |f| !f.closed && (f.lang.is_empty() || f.is_code())),
    ];
    let fenced = strategies.into_iter().find_map(|(strategy, accept)| {
        let body = fences
            .iter()
            .filter(|f| accept(f))
            .map(|f| strip_closing_fence(f.body))
            .find(|body| !body.is_empty())?;
        trace!(strategy, len = body.len(), "code block extracted");
        Some(body.to_string())
    });
    if fenced.is_some() {
        return fenced;
    }

    let start = IMPORT_START.find(text)?.start();
    let tail = strip_closing_fence(&text[start..]);
    (!tail.is_empty()).then(|| {
        trace!(len = tail.len(), "code extracted from first import");
        tail.to_string()
    })
}

fn fenced_blocks(text: &str) -> Vec<Fence<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<(&str, usize)> = None;
    for caps in FENCE_LINE.captures_iter(text) {
        let (Some(line), Some(lang)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        match open.take() {
            None => open = Some((lang.as_str(), line.end())),
            Some((lang, body_start)) => blocks.push(Fence {
                lang,
                body: &text[body_start..line.start()],
                closed: true,
            }),
        }
    }
    if let Some((lang, body_start)) = open {
        blocks.push(Fence {
            lang,
            body: &text[body_start..],
            closed: false,
        });
    }
    blocks
}

fn strip_closing_fence(region: &str) -> &str {
    let region = region.trim();
    region.strip_suffix("```").unwrap_or(region).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_fence_any_case() {
        let reply = "Here you go:\n```TSX\nimport React from 'react';\n<Button/>\n```\nEnjoy!";
        assert_eq!(
            extract_code_block(reply).as_deref(),
            Some("import React from 'react';\n<Button/>")
        );
        let reply = "```typescript\nconst a = 1;\n```";
        assert_eq!(extract_code_block(reply).as_deref(), Some("const a = 1;"));
    }

    #[test]
    fn tagged_fence_preferred_over_earlier_bare_fence() {
        let reply = "```\nnpm i\n```\n```jsx\n<div/>\n```";
        assert_eq!(extract_code_block(reply).as_deref(), Some("<div/>"));
    }

    #[test]
    fn bare_and_unterminated_fences() {
        assert_eq!(extract_code_block("```\n<div/>\n```").as_deref(), Some("<div/>"));
        assert_eq!(
            extract_code_block("```tsx\nimport x from 'y';\n<Card>").as_deref(),
            Some("import x from 'y';\n<Card>")
        );
    }

    #[test]
    fn closing_fence_of_other_block_does_not_open_one() {
        let reply = "```bash\nnpm i\n```\nThen run it.\n```\n";
        assert_eq!(extract_code_block(reply), None);

        let reply = "Install:\n```bash\nnpm i\n```\nThen:\n```\n<Card/>\n```\n";
        assert_eq!(extract_code_block(reply).as_deref(), Some("<Card/>"));
    }

    #[test]
    fn fences_must_start_a_line() {
        let reply = "Use ```tsx``` blocks.\n```tsx\nconst a = 1;\n```";
        assert_eq!(extract_code_block(reply).as_deref(), Some("const a = 1;"));
    }

    #[test]
    fn import_fallback() {
        let reply = "Sure.\nimport { Button } from '@mantine/core';\nexport default {};\n```";
        assert_eq!(
            extract_code_block(reply).as_deref(),
            Some("import { Button } from '@mantine/core';\nexport default {};")
        );
    }

    #[test]
    fn nothing_plausible() {
        assert_eq!(extract_code_block("I cannot help with that."), None);
        assert_eq!(extract_code_block("```tsx\n\n```"), None);
        assert_eq!(extract_code_block(""), None);
    }
}
