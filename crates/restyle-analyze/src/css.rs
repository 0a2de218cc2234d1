//! Lightweight CSS text scanning shared by the extraction stages.
//!
//! This is deliberately a heuristic scanner, not a grammar parser: the
//! input is arbitrary real-world CSS and the failure mode everywhere is
//! "skip the fragment", never an error.

/// One `selector { body }` rule, flattened out of any grouping at-rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBlock {
    pub selector: String,
    pub body: String,
    /// Byte offset of the block's `{` in the original text.
    pub offset: usize,
}

/// Remove `/* ... */` comments. Unterminated comments swallow the rest of
/// the input, matching browser recovery behavior.
#[must_use]
pub fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Scan every rule block in the text, recursing through grouping at-rules
/// (`@media`, `@supports`, ...) and skipping non-rule at-rules entirely.
#[must_use]
pub fn scan_rule_blocks(css: &str) -> Vec<RuleBlock> {
    let mut blocks = Vec::new();
    collect_blocks(css, 0, &mut blocks);
    blocks
}

fn collect_blocks(text: &str, base_offset: usize, blocks: &mut Vec<RuleBlock>) {
    let bytes = text.as_bytes();
    let mut cursor = 0usize;
    while cursor < bytes.len() {
        let Some(open_rel) = text[cursor..].find('{') else {
            break;
        };
        let open = cursor + open_rel;
        let selector = text[cursor..open]
            .rsplit(['}', ';'])
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        let Some(close) = matching_brace(text, open) else {
            // Unbalanced block: drop the remainder.
            break;
        };
        let body = &text[open + 1..close];
        if selector.starts_with('@') {
            if body.contains('{') {
                // Grouping at-rule: recurse into its contents.
                collect_blocks(body, base_offset + open + 1, blocks);
            }
            // @font-face and friends carry no selector facts.
        } else if !selector.is_empty() {
            blocks.push(RuleBlock {
                selector,
                body: body.to_string(),
                offset: base_offset + open,
            });
        }
        cursor = close + 1;
    }
}

/// Index of the `}` matching the `{` at `open`, or `None` if unbalanced.
#[must_use]
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in text.char_indices().skip_while(|(i, _)| *i < open) {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Best-effort enclosing selector for a byte position inside raw CSS.
///
/// Scans backward to the nearest unclosed `{`, then takes the selector
/// text preceding it. Used to attribute `var()` references.
#[must_use]
pub fn enclosing_selector(css: &str, position: usize) -> Option<String> {
    let head = &css[..position.min(css.len())];
    let mut depth = 0i32;
    for (index, ch) in head.char_indices().rev() {
        match ch {
            '}' => depth += 1,
            '{' => {
                if depth == 0 {
                    let selector = head[..index]
                        .rsplit(['}', ';'])
                        .next()
                        .unwrap_or("")
                        .trim();
                    if selector.is_empty() {
                        return None;
                    }
                    return Some(selector.to_string());
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// True when the selector's parentheses and brackets pair up. Unbalanced
/// selectors are dropped before emission.
#[must_use]
pub fn selector_is_balanced(selector: &str) -> bool {
    let mut parens = 0i32;
    let mut brackets = 0i32;
    for ch in selector.chars() {
        match ch {
            '(' => parens += 1,
            ')' => parens -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            '{' | '}' => return false,
            _ => {}
        }
        if parens < 0 || brackets < 0 {
            return false;
        }
    }
    parens == 0 && brackets == 0
}
